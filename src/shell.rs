//! The seam between the tray controller and the windowing system.
//!
//! [`Shell`] is the set of platform calls the controller makes. The handle
//! types it produces own their platform resource and release it on drop, so
//! the controller never balances create/destroy calls by hand.

use std::path::Path;

use crate::error::Result;
use crate::menu::MenuEntry;
use crate::tooltip::Tooltip;

/// Id of the single icon this crate registers with the notification area.
pub const TRAY_ICON_ID: u32 = 1;

/// Window messages the controller reacts to, already decoded by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMessage {
    LeftButtonUp,
    RightButtonUp,
    /// The notification area was recreated, e.g. after an Explorer restart.
    TaskbarCreated,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    Add,
    Modify,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Whatever the system reports as the default icon size.
    Default,
    Square(i32),
}

/// Sizes tried, in order, when loading an icon file.
pub const ICON_LOAD_ATTEMPTS: [IconSize; 3] =
    [IconSize::Default, IconSize::Square(16), IconSize::Square(32)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

pub type MessageCallback = Box<dyn Fn(TrayMessage)>;

/// Everything the notification area needs to know about the icon.
pub struct Descriptor<'a, S: Shell + ?Sized> {
    pub window: &'a S::Window,
    pub icon: &'a S::Icon,
    pub tooltip: &'a Tooltip,
}

pub trait Shell: 'static {
    type Window;
    type Menu;
    type Icon;

    /// Registers `class_name` and creates the hidden window. Decoded messages
    /// for that window are passed to `on_message` on the UI thread.
    fn create_window(
        &self,
        class_name: &str,
        title: &str,
        on_message: MessageCallback,
    ) -> Result<Self::Window>;

    fn create_menu(&self, entries: &[MenuEntry]) -> Result<Self::Menu>;

    /// The built-in application icon. Dropping it must not release it.
    fn default_icon(&self) -> Result<Self::Icon>;

    /// Loads an icon file. The returned icon is released when dropped.
    fn load_icon(&self, path: &Path, size: IconSize) -> Result<Self::Icon>;

    fn notify(&self, action: NotifyAction, descriptor: Descriptor<'_, Self>) -> Result<()>;

    fn cursor_position(&self) -> Result<Point>;

    fn set_foreground(&self, window: &Self::Window);

    /// Shows `menu` at `at` and blocks until it is dismissed. Returns the
    /// selected command id, or `0` when nothing was selected.
    fn track_popup_menu(&self, window: &Self::Window, menu: &Self::Menu, at: Point) -> u32;

    fn post_null(&self, window: &Self::Window);

    fn post_quit(&self);
}
