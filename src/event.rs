use std::rc::Rc;

use crate::menu::MenuItem;

/// User interaction with the tray icon, as seen by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    LeftClick,
    MenuSelect(MenuItem),
}

/// Receives tray interaction on the UI thread.
pub trait TrayHandler {
    fn on_left_click(&self) {}

    fn on_menu_select(&self, item: MenuItem) {
        let _ = item;
    }
}

pub(crate) type LeftClickCallback = Rc<dyn Fn()>;
pub(crate) type MenuCallback = Rc<dyn Fn(MenuItem)>;

/// The two callback slots. Registering replaces whatever was there.
#[derive(Default, Clone)]
pub(crate) struct Callbacks {
    pub left_click: Option<LeftClickCallback>,
    pub menu: Option<MenuCallback>,
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct ClickOnly(RefCell<Vec<TrayEvent>>);

    impl TrayHandler for ClickOnly {
        fn on_left_click(&self) {
            self.0.borrow_mut().push(TrayEvent::LeftClick);
        }
    }

    #[test]
    fn unhandled_menu_selection_is_ignored() {
        let handler = ClickOnly(RefCell::default());

        handler.on_menu_select(MenuItem::Exit);
        handler.on_left_click();

        assert_eq!(*handler.0.borrow(), vec![TrayEvent::LeftClick]);
    }

    #[test]
    fn new_registration_replaces_slot() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = Callbacks::default();

        let sink = calls.clone();
        callbacks.left_click = Some(Rc::new(move || sink.borrow_mut().push("first")));
        let sink = calls.clone();
        callbacks.left_click = Some(Rc::new(move || sink.borrow_mut().push("second")));

        if let Some(callback) = callbacks.left_click.clone() {
            callback();
        }
        assert_eq!(*calls.borrow(), vec!["second"]);
    }
}
