//! Win32 implementation of [`Shell`].

use std::path::Path;

use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::Result;
use crate::menu::MenuEntry;
use crate::shell::{Descriptor, IconSize, MessageCallback, NotifyAction, Point, Shell};

mod context_menu;
mod message_window;
mod tray_icon;
mod utils;

pub use self::context_menu::ContextMenu;
pub use self::message_window::{MessageWindow, WM_TRAYICON};
pub use self::tray_icon::TrayIconImage;

#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Shell;

impl Shell for Win32Shell {
    type Window = MessageWindow;
    type Menu = ContextMenu;
    type Icon = TrayIconImage;

    fn create_window(
        &self,
        class_name: &str,
        title: &str,
        on_message: MessageCallback,
    ) -> Result<MessageWindow> {
        MessageWindow::create(class_name, title, on_message)
    }

    fn create_menu(&self, entries: &[MenuEntry]) -> Result<ContextMenu> {
        ContextMenu::new(entries)
    }

    fn default_icon(&self) -> Result<TrayIconImage> {
        TrayIconImage::application()
    }

    fn load_icon(&self, path: &Path, size: IconSize) -> Result<TrayIconImage> {
        TrayIconImage::from_file(path, size)
    }

    fn notify(&self, action: NotifyAction, descriptor: Descriptor<'_, Self>) -> Result<()> {
        tray_icon::notify(
            action,
            descriptor.window.hwnd(),
            descriptor.icon.handle(),
            descriptor.tooltip,
        )
    }

    fn cursor_position(&self) -> Result<Point> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }.map_err(|e| utils::os_error("GetCursorPos", e))?;
        Ok(Point {
            x: point.x,
            y: point.y,
        })
    }

    fn set_foreground(&self, window: &MessageWindow) {
        // Without this the menu does not close when clicking elsewhere.
        let _ = unsafe { SetForegroundWindow(window.hwnd()) };
    }

    fn track_popup_menu(&self, window: &MessageWindow, menu: &ContextMenu, at: Point) -> u32 {
        menu.track(window.hwnd(), at)
    }

    fn post_null(&self, window: &MessageWindow) {
        // Lets the next click on the icon open the menu again.
        if let Err(e) = unsafe { PostMessageW(Some(window.hwnd()), WM_NULL, WPARAM(0), LPARAM(0)) }
        {
            tracing::warn!("Failed to post WM_NULL to tray window: {e}");
        }
    }

    fn post_quit(&self) {
        unsafe { PostQuitMessage(0) };
    }
}
