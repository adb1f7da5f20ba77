use std::cell::{Cell, RefCell, RefMut};
use std::path::Path;
use std::rc::Rc;

use crate::config::TrayConfig;
use crate::error::{Result, TrayError};
use crate::event::{Callbacks, TrayHandler};
use crate::menu::{tray_menu, MenuItem};
use crate::shell::{
    Descriptor, MessageCallback, NotifyAction, Shell, TrayMessage, ICON_LOAD_ATTEMPTS,
};
use crate::tooltip::Tooltip;

/// Resources that exist between `init` and `remove`.
///
/// Fields drop in declaration order, so the window goes last.
struct Instance<S: Shell> {
    menu: S::Menu,
    icon: S::Icon,
    window: S::Window,
    // set under a shared borrow by `restore_icon`
    shown: Cell<bool>,
}

impl<S: Shell> Instance<S> {
    fn descriptor<'a>(&'a self, tooltip: &'a Tooltip) -> Descriptor<'a, S> {
        Descriptor {
            window: &self.window,
            icon: &self.icon,
            tooltip,
        }
    }
}

struct State<S: Shell> {
    config: TrayConfig,
    tooltip: Tooltip,
    instance: Option<Instance<S>>,
}

struct Shared<S: Shell> {
    shell: S,
    state: RefCell<State<S>>,
    callbacks: RefCell<Callbacks>,
    quit_on_destroy: Cell<bool>,
}

/// Owns the hidden window, the notification-area icon and its context menu.
///
/// All methods must be called on the thread that runs the message loop.
/// Mutating methods fail with [`TrayError::Busy`] while the context menu is
/// open, because the menu runs a modal loop inside the window procedure.
pub struct TrayController<S: Shell> {
    shared: Rc<Shared<S>>,
}

impl<S: Shell> TrayController<S> {
    pub fn new(shell: S, config: TrayConfig) -> Result<Self> {
        let tooltip = Tooltip::new(&config.tooltip)?;

        let state = State {
            config,
            tooltip,
            instance: None,
        };

        Ok(Self {
            shared: Rc::new(Shared {
                shell,
                state: RefCell::new(state),
                callbacks: Default::default(),
                quit_on_destroy: Cell::new(false),
            }),
        })
    }

    pub fn shell(&self) -> &S {
        &self.shared.shell
    }

    fn state_mut(&self) -> Result<RefMut<'_, State<S>>> {
        self.shared
            .state
            .try_borrow_mut()
            .map_err(|_| TrayError::Busy)
    }

    pub fn is_initialized(&self) -> bool {
        self.shared
            .state
            .try_borrow()
            .map(|state| state.instance.is_some())
            .unwrap_or(false)
    }

    pub fn is_shown(&self) -> bool {
        self.shared
            .state
            .try_borrow()
            .map(|state| state.instance.as_ref().is_some_and(|i| i.shown.get()))
            .unwrap_or(false)
    }

    pub fn tooltip(&self) -> Option<String> {
        let state = self.shared.state.try_borrow().ok()?;
        Some(state.tooltip.as_str().to_owned())
    }

    /// Creates the hidden window, the descriptor with the default icon and
    /// the context menu. The icon is not shown until [`Self::add`].
    pub fn init(&self) -> Result<()> {
        let mut state = self.state_mut()?;

        if state.instance.is_some() {
            return Err(TrayError::AlreadyInitialized);
        }

        let shared = Rc::downgrade(&self.shared);
        let on_message: MessageCallback = Box::new(move |message| {
            if let Some(shared) = shared.upgrade() {
                shared.dispatch(message);
            }
        });

        let shell = &self.shared.shell;
        let window = shell.create_window(
            &state.config.class_name,
            &state.config.window_title,
            on_message,
        )?;
        let icon = shell.default_icon()?;
        let menu = shell.create_menu(&tray_menu(&state.config))?;

        state.instance = Some(Instance {
            menu,
            icon,
            window,
            shown: Cell::new(false),
        });
        self.shared.quit_on_destroy.set(true);

        tracing::debug!("Initialized tray window `{}`", state.config.class_name);

        Ok(())
    }

    /// Registers the icon with the notification area.
    pub fn add(&self) -> Result<()> {
        let mut state = self.state_mut()?;
        let state = &mut *state;

        let instance = state
            .instance
            .as_mut()
            .ok_or(TrayError::NotInitialized)?;

        if instance.shown.get() {
            return Ok(());
        }

        self.shared
            .shell
            .notify(NotifyAction::Add, instance.descriptor(&state.tooltip))?;
        instance.shown.set(true);

        tracing::debug!("Added tray icon");

        Ok(())
    }

    /// Tears everything down. Calling it again, or without `init`, does nothing.
    ///
    /// If unregistering the icon fails, the menu and window are still
    /// destroyed and the error is returned.
    pub fn remove(&self) -> Result<()> {
        let (icon, window, result) = {
            let mut state = self.state_mut()?;
            let state = &mut *state;

            let Some(instance) = state.instance.take() else {
                return Ok(());
            };

            let Instance {
                menu,
                icon,
                window,
                shown,
            } = instance;
            drop(menu);

            let result = if shown.get() {
                let descriptor = Descriptor {
                    window: &window,
                    icon: &icon,
                    tooltip: &state.tooltip,
                };
                self.shared.shell.notify(NotifyAction::Delete, descriptor)
            } else {
                Ok(())
            };

            (icon, window, result)
        };

        // The window is destroyed without any borrow held, its destroy
        // message comes back through `dispatch`.
        drop(icon);
        drop(window);
        self.shared.quit_on_destroy.set(false);

        tracing::debug!("Removed tray");

        result
    }

    /// Unregisters the icon, keeping the window and menu alive.
    pub fn hide(&self) -> Result<()> {
        let mut state = self.state_mut()?;
        let state = &mut *state;

        let instance = state
            .instance
            .as_mut()
            .ok_or(TrayError::NotInitialized)?;

        if !instance.shown.get() {
            return Ok(());
        }

        self.shared
            .shell
            .notify(NotifyAction::Delete, instance.descriptor(&state.tooltip))?;
        instance.shown.set(false);

        Ok(())
    }

    /// Registers the icon again after [`Self::hide`].
    pub fn show(&self) -> Result<()> {
        self.add()
    }

    /// Replaces the tooltip. Text that does not fit the platform buffer is
    /// rejected and the current tooltip is kept.
    pub fn set_tooltip(&self, text: &str) -> Result<()> {
        let tooltip = Tooltip::new(text)?;

        let mut state = self.state_mut()?;
        let state = &mut *state;

        if let Some(instance) = state.instance.as_ref().filter(|i| i.shown.get()) {
            self.shared
                .shell
                .notify(NotifyAction::Modify, instance.descriptor(&tooltip))?;
        }

        state.tooltip = tooltip;

        Ok(())
    }

    /// Loads an icon file, trying each of [`ICON_LOAD_ATTEMPTS`] in turn.
    /// On failure the current icon stays in place.
    pub fn set_icon_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let mut state = self.state_mut()?;
        let state = &mut *state;

        let instance = state
            .instance
            .as_mut()
            .ok_or(TrayError::NotInitialized)?;

        tracing::debug!("Trying to load icon from: {}", path.display());

        let icon = self.load_icon(path)?;

        if instance.shown.get() {
            let descriptor = Descriptor {
                window: &instance.window,
                icon: &icon,
                tooltip: &state.tooltip,
            };
            self.shared.shell.notify(NotifyAction::Modify, descriptor)?;
        }

        // drops the previous icon
        instance.icon = icon;

        tracing::info!("Successfully loaded icon from: {}", path.display());

        Ok(())
    }

    fn load_icon(&self, path: &Path) -> Result<S::Icon> {
        let mut result = Err(TrayError::IconLoad {
            path: path.to_owned(),
            code: 0,
        });

        for size in ICON_LOAD_ATTEMPTS {
            result = self.shared.shell.load_icon(path, size);
            match &result {
                Ok(_) => break,
                Err(e) => tracing::warn!("Icon load attempt at {size:?} failed: {e}"),
            }
        }

        result
    }

    pub fn set_left_click_callback(&self, callback: impl Fn() + 'static) {
        self.shared.callbacks.borrow_mut().left_click = Some(Rc::new(callback));
    }

    pub fn set_menu_callback(&self, callback: impl Fn(MenuItem) + 'static) {
        self.shared.callbacks.borrow_mut().menu = Some(Rc::new(callback));
    }

    pub fn clear_left_click_callback(&self) {
        self.shared.callbacks.borrow_mut().left_click = None;
    }

    pub fn clear_menu_callback(&self) {
        self.shared.callbacks.borrow_mut().menu = None;
    }

    /// Fills both callback slots from one handler.
    pub fn set_handler(&self, handler: impl TrayHandler + 'static) {
        let handler = Rc::new(handler);

        let left_click = handler.clone();
        self.set_left_click_callback(move || left_click.on_left_click());
        self.set_menu_callback(move |item| handler.on_menu_select(item));
    }

    /// Feeds a decoded window message to the controller, as the window
    /// procedure does.
    pub fn dispatch(&self, message: TrayMessage) {
        self.shared.dispatch(message);
    }
}

impl<S: Shell> Drop for TrayController<S> {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            tracing::error!("Failed to remove tray on drop: {e}");
        }
    }
}

impl<S: Shell> Shared<S> {
    fn dispatch(&self, message: TrayMessage) {
        match message {
            TrayMessage::LeftButtonUp => {
                let callback = self.callbacks.borrow().left_click.clone();
                if let Some(callback) = callback {
                    callback();
                }
            }

            TrayMessage::RightButtonUp => self.show_context_menu(),

            TrayMessage::TaskbarCreated => self.restore_icon(),

            TrayMessage::Destroyed => {
                if self.quit_on_destroy.get() {
                    self.shell.post_quit();
                }
            }
        }
    }

    fn show_context_menu(&self) {
        let command = {
            let Ok(state) = self.state.try_borrow() else {
                tracing::warn!("Ignoring right click, tray is busy");
                return;
            };
            let Some(instance) = state.instance.as_ref() else {
                return;
            };

            let position = match self.shell.cursor_position() {
                Ok(position) => position,
                Err(e) => {
                    tracing::error!("Failed to get cursor position: {e}");
                    return;
                }
            };

            self.shell.set_foreground(&instance.window);
            self.shell
                .track_popup_menu(&instance.window, &instance.menu, position)
        };

        if command > 0 {
            match MenuItem::from_id(command) {
                Some(item) => {
                    let callback = self.callbacks.borrow().menu.clone();
                    if let Some(callback) = callback {
                        callback(item);
                    }
                }
                None => tracing::warn!("Unknown tray menu command {command}"),
            }
        }

        // The callback may have removed the tray.
        if let Ok(state) = self.state.try_borrow() {
            if let Some(instance) = state.instance.as_ref() {
                self.shell.post_null(&instance.window);
            }
        }
    }

    /// Only needs a shared borrow, so it also runs while the context menu's
    /// modal loop is open.
    fn restore_icon(&self) {
        let Ok(state) = self.state.try_borrow() else {
            tracing::warn!("Ignoring taskbar recreation, tray is busy");
            return;
        };

        let Some(instance) = state.instance.as_ref().filter(|i| i.shown.get()) else {
            return;
        };

        tracing::info!("Taskbar recreated, adding tray icon again");

        if let Err(e) = self
            .shell
            .notify(NotifyAction::Add, instance.descriptor(&state.tooltip))
        {
            tracing::error!("Failed to add tray icon after taskbar recreation: {e}");
            instance.shown.set(false);
        }
    }
}
