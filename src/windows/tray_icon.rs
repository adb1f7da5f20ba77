use std::path::Path;

use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Shell::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::{Result, TrayError};
use crate::shell::{IconSize, NotifyAction, TRAY_ICON_ID};
use crate::tooltip::Tooltip;
use crate::windows::message_window::WM_TRAYICON;
use crate::windows::utils::{last_os_error, os_error, to_wide_path};

/// Icon shown in the notification area.
///
/// Icons loaded from files are destroyed on drop, the shared application
/// icon is not.
pub struct TrayIconImage {
    handle: HICON,
    owned: bool,
}

impl TrayIconImage {
    pub fn application() -> Result<Self> {
        let handle =
            unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(|e| os_error("LoadIconW", e))?;

        Ok(Self {
            handle,
            owned: false,
        })
    }

    pub fn from_file(path: &Path, size: IconSize) -> Result<Self> {
        let wide = to_wide_path(path)?;

        let (width, height, flags) = match size {
            IconSize::Default => (0, 0, LR_LOADFROMFILE | LR_DEFAULTSIZE),
            IconSize::Square(side) => (side, side, LR_LOADFROMFILE),
        };

        let handle = unsafe {
            LoadImageW(
                None,
                PCWSTR(wide.as_ptr()),
                IMAGE_ICON,
                width,
                height,
                flags,
            )
        }
        .map_err(|e| TrayError::IconLoad {
            path: path.to_owned(),
            code: e.code().0,
        })?;

        Ok(Self {
            handle: HICON(handle.0),
            owned: true,
        })
    }

    pub fn handle(&self) -> HICON {
        self.handle
    }
}

impl Drop for TrayIconImage {
    fn drop(&mut self) {
        if self.owned {
            if let Err(e) = unsafe { DestroyIcon(self.handle) } {
                tracing::warn!("Failed to destroy tray icon: {e}");
            }
        }
    }
}

pub fn notify(action: NotifyAction, hwnd: HWND, icon: HICON, tooltip: &Tooltip) -> Result<()> {
    let nid = NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
        uCallbackMessage: WM_TRAYICON,
        hIcon: icon,
        szTip: tooltip.to_buffer(),
        ..Default::default()
    };

    let message = match action {
        NotifyAction::Add => NIM_ADD,
        NotifyAction::Modify => NIM_MODIFY,
        NotifyAction::Delete => NIM_DELETE,
    };

    if unsafe { Shell_NotifyIconW(message, &nid) }.as_bool() {
        Ok(())
    } else {
        Err(last_os_error("Shell_NotifyIconW"))
    }
}
