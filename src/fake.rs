//! Recording [`Shell`] used by the controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Result, TrayError};
use crate::menu::MenuEntry;
use crate::shell::{Descriptor, IconSize, MessageCallback, NotifyAction, Point, Shell, TrayMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateWindow {
        class_name: String,
        title: String,
    },
    CreateMenu(Vec<MenuEntry>),
    DefaultIcon,
    LoadIcon(PathBuf, IconSize),
    Notify {
        action: NotifyAction,
        window: u32,
        icon: u32,
        tooltip: String,
    },
    CursorPosition,
    SetForeground(u32),
    TrackPopupMenu {
        window: u32,
        menu: u32,
        at: Point,
    },
    PostNull(u32),
    PostQuit,
    ReleaseWindow(u32),
    ReleaseMenu(u32),
    ReleaseIcon(u32),
}

impl Call {
    pub fn notify_action(&self) -> Option<NotifyAction> {
        match self {
            Call::Notify { action, .. } => Some(*action),
            _ => None,
        }
    }

    pub fn window(&self) -> Option<u32> {
        match self {
            Call::Notify { window, .. } => Some(*window),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    on_message: RefCell<Option<Rc<dyn Fn(TrayMessage)>>>,
    failing: RefCell<HashSet<&'static str>>,
    loadable: RefCell<HashMap<PathBuf, IconSize>>,
    cursor: Cell<Point>,
    selection: Cell<u32>,
    during_menu: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Makes every later call to the named shell method fail.
    pub fn fail(&self, method: &'static str) {
        self.failing.borrow_mut().insert(method);
    }

    pub fn heal(&self, method: &'static str) {
        self.failing.borrow_mut().remove(method);
    }

    /// Lets `path` load, but only at `size`.
    pub fn allow_icon(&self, path: impl Into<PathBuf>, size: IconSize) {
        self.loadable.borrow_mut().insert(path.into(), size);
    }

    pub fn set_cursor(&self, point: Point) {
        self.cursor.set(point);
    }

    /// Command id the next context menus return.
    pub fn select(&self, id: u32) {
        self.selection.set(id);
    }

    /// Runs `f` while the context menu is open.
    pub fn during_menu(&self, f: impl Fn() + 'static) {
        *self.during_menu.borrow_mut() = Some(Rc::new(f));
    }

    /// Delivers a message to the window, like the message loop would.
    pub fn send(&self, message: TrayMessage) {
        let on_message = self.on_message.borrow().clone();
        if let Some(on_message) = on_message {
            on_message(message);
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, method: &'static str) -> Result<()> {
        if self.failing.borrow().contains(method) {
            return Err(TrayError::os(method, 5));
        }
        Ok(())
    }

    fn handle(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

#[derive(Default)]
pub struct FakeShell {
    recorder: Rc<Recorder>,
}

impl FakeShell {
    pub fn recorder(&self) -> Rc<Recorder> {
        self.recorder.clone()
    }
}

pub struct FakeWindow {
    id: u32,
    recorder: Rc<Recorder>,
}

impl Drop for FakeWindow {
    fn drop(&mut self) {
        self.recorder.record(Call::ReleaseWindow(self.id));
        self.recorder.send(TrayMessage::Destroyed);
        self.recorder.on_message.borrow_mut().take();
    }
}

pub struct FakeMenu {
    id: u32,
    recorder: Rc<Recorder>,
}

impl Drop for FakeMenu {
    fn drop(&mut self) {
        self.recorder.record(Call::ReleaseMenu(self.id));
    }
}

pub struct FakeIcon {
    id: u32,
    owned: bool,
    recorder: Rc<Recorder>,
}

impl Drop for FakeIcon {
    fn drop(&mut self) {
        if self.owned {
            self.recorder.record(Call::ReleaseIcon(self.id));
        }
    }
}

impl Shell for FakeShell {
    type Window = FakeWindow;
    type Menu = FakeMenu;
    type Icon = FakeIcon;

    fn create_window(
        &self,
        class_name: &str,
        title: &str,
        on_message: MessageCallback,
    ) -> Result<FakeWindow> {
        let recorder = &self.recorder;
        recorder.check("create_window")?;
        recorder.record(Call::CreateWindow {
            class_name: class_name.to_owned(),
            title: title.to_owned(),
        });
        *recorder.on_message.borrow_mut() = Some(Rc::from(on_message));

        Ok(FakeWindow {
            id: recorder.handle(),
            recorder: recorder.clone(),
        })
    }

    fn create_menu(&self, entries: &[MenuEntry]) -> Result<FakeMenu> {
        let recorder = &self.recorder;
        recorder.check("create_menu")?;
        recorder.record(Call::CreateMenu(entries.to_vec()));

        Ok(FakeMenu {
            id: recorder.handle(),
            recorder: recorder.clone(),
        })
    }

    fn default_icon(&self) -> Result<FakeIcon> {
        let recorder = &self.recorder;
        recorder.check("default_icon")?;
        recorder.record(Call::DefaultIcon);

        Ok(FakeIcon {
            id: recorder.handle(),
            owned: false,
            recorder: recorder.clone(),
        })
    }

    fn load_icon(&self, path: &Path, size: IconSize) -> Result<FakeIcon> {
        let recorder = &self.recorder;
        recorder.record(Call::LoadIcon(path.to_owned(), size));

        if recorder.loadable.borrow().get(path) != Some(&size) {
            return Err(TrayError::IconLoad {
                path: path.to_owned(),
                code: 2,
            });
        }

        Ok(FakeIcon {
            id: recorder.handle(),
            owned: true,
            recorder: recorder.clone(),
        })
    }

    fn notify(&self, action: NotifyAction, descriptor: Descriptor<'_, Self>) -> Result<()> {
        self.recorder.check("notify")?;
        self.recorder.record(Call::Notify {
            action,
            window: descriptor.window.id,
            icon: descriptor.icon.id,
            tooltip: descriptor.tooltip.as_str().to_owned(),
        });
        Ok(())
    }

    fn cursor_position(&self) -> Result<Point> {
        self.recorder.check("cursor_position")?;
        self.recorder.record(Call::CursorPosition);
        Ok(self.recorder.cursor.get())
    }

    fn set_foreground(&self, window: &FakeWindow) {
        self.recorder.record(Call::SetForeground(window.id));
    }

    fn track_popup_menu(&self, window: &FakeWindow, menu: &FakeMenu, at: Point) -> u32 {
        self.recorder.record(Call::TrackPopupMenu {
            window: window.id,
            menu: menu.id,
            at,
        });

        let during_menu = self.recorder.during_menu.borrow().clone();
        if let Some(during_menu) = during_menu {
            during_menu();
        }

        self.recorder.selection.get()
    }

    fn post_null(&self, window: &FakeWindow) {
        self.recorder.record(Call::PostNull(window.id));
    }

    fn post_quit(&self) {
        self.recorder.record(Call::PostQuit);
    }
}
