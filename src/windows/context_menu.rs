use windows::core::{HSTRING, PCWSTR};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::Result;
use crate::menu::MenuEntry;
use crate::shell::Point;
use crate::windows::utils::os_error;

/// Popup menu shown on right click, destroyed when dropped.
pub struct ContextMenu(HMENU);

impl ContextMenu {
    pub fn new(entries: &[MenuEntry]) -> Result<Self> {
        let menu = unsafe { CreatePopupMenu() }.map_err(|e| os_error("CreatePopupMenu", e))?;
        let menu = Self(menu);

        for entry in entries {
            let appended = match entry {
                MenuEntry::Item { item, label } => unsafe {
                    AppendMenuW(
                        menu.0,
                        MF_STRING,
                        item.id() as usize,
                        &HSTRING::from(label.as_str()),
                    )
                },
                MenuEntry::Separator => unsafe {
                    AppendMenuW(menu.0, MF_SEPARATOR, 0, PCWSTR::null())
                },
            };
            appended.map_err(|e| os_error("AppendMenuW", e))?;
        }

        Ok(menu)
    }

    /// Blocks until the menu is dismissed and returns the selected command id,
    /// `0` if none.
    pub fn track(&self, hwnd: HWND, at: Point) -> u32 {
        let command = unsafe {
            TrackPopupMenu(
                self.0,
                TPM_RETURNCMD | TPM_NONOTIFY,
                at.x,
                at.y,
                None,
                hwnd,
                None,
            )
        };

        command_id(command.0)
    }
}

/// `TrackPopupMenu` returns the command id, or zero or less when the menu
/// was dismissed or failed.
fn command_id(result: i32) -> u32 {
    result.max(0) as u32
}

impl Drop for ContextMenu {
    fn drop(&mut self) {
        if let Err(e) = unsafe { DestroyMenu(self.0) } {
            tracing::warn!("Failed to destroy tray menu: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{tray_menu, MenuItem};
    use crate::TrayConfig;

    #[test]
    fn dismissed_or_failed_menu_maps_to_zero() {
        assert_eq!(command_id(0), 0);
        assert_eq!(command_id(-1), 0);
        assert_eq!(command_id(i32::MIN), 0);
    }

    #[test]
    fn selected_command_is_returned() {
        assert_eq!(command_id(MenuItem::ShowApp.id() as i32), 1);
        assert_eq!(command_id(MenuItem::Exit.id() as i32), 2);
    }

    #[test]
    fn builds_tray_menu() {
        let menu = ContextMenu::new(&tray_menu(&TrayConfig::default())).unwrap();

        let count = unsafe { GetMenuItemCount(Some(menu.0)) };
        assert_eq!(count, 3);
    }
}
