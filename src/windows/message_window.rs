use std::rc::Rc;
use std::sync::LazyLock;

use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::System::LibraryLoader::*;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::error::Result;
use crate::shell::{MessageCallback, TrayMessage};
use crate::windows::utils::{last_os_error, os_error, HwndWithDrop};

/// Message the notification area sends to the window for icon events.
pub const WM_TRAYICON: u32 = WM_USER + 1;

static WM_TASKBARCREATED: LazyLock<u32> =
    LazyLock::new(|| unsafe { RegisterWindowMessageA(s!("TaskbarCreated")) });

struct WndProcUserData {
    on_message: Rc<dyn Fn(TrayMessage)>,
}

/// A registered window class, unregistered on drop.
struct WindowClass {
    name: HSTRING,
    hinstance: HINSTANCE,
}

impl WindowClass {
    fn register(name: &str) -> Result<Self> {
        let hinstance: HINSTANCE = unsafe { GetModuleHandleW(None) }
            .map_err(|e| os_error("GetModuleHandleW", e))?
            .into();
        let name = HSTRING::from(name);

        let wc = WNDCLASSW {
            hInstance: hinstance,
            lpszClassName: PCWSTR(name.as_ptr()),
            lpfnWndProc: Some(wndproc_message_window),
            ..Default::default()
        };

        if unsafe { RegisterClassW(&wc) } == 0 {
            return Err(last_os_error("RegisterClassW"));
        }

        Ok(Self { name, hinstance })
    }
}

impl Drop for WindowClass {
    fn drop(&mut self) {
        if let Err(e) = unsafe { UnregisterClassW(&self.name, Some(self.hinstance)) } {
            tracing::warn!("Failed to unregister window class `{}`: {e}", self.name);
        }
    }
}

/// Hidden top-level window that receives the tray icon's messages.
///
/// It is not a message-only window: those never see the `TaskbarCreated`
/// broadcast.
pub struct MessageWindow {
    hwnd: HwndWithDrop,
    // unregistered after the window is gone
    _class: WindowClass,
}

impl MessageWindow {
    pub fn create(class_name: &str, title: &str, on_message: MessageCallback) -> Result<Self> {
        let class = WindowClass::register(class_name)?;

        let userdata = WndProcUserData {
            on_message: Rc::from(on_message),
        };
        let userdata = Box::into_raw(Box::new(userdata));

        let hwnd = unsafe {
            CreateWindowExW(
                // WS_EX_TOOLWINDOW keeps the hidden window out of the taskbar and alt-tab.
                WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW,
                &class.name,
                &HSTRING::from(title),
                WS_OVERLAPPED,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(class.hinstance),
                Some(userdata as _),
            )
        };

        let hwnd = match hwnd {
            Ok(hwnd) => hwnd,
            Err(e) => {
                drop(unsafe { Box::from_raw(userdata) });
                return Err(os_error("CreateWindowExW", e));
            }
        };

        tracing::debug!("Created tray message window {hwnd:?}");

        Ok(Self {
            hwnd: HwndWithDrop(hwnd),
            _class: class,
        })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd.0
    }
}

/// Maps a window message to the tray event it carries, if any.
///
/// For [`WM_TRAYICON`] the mouse message is in the low word of `lparam`, the
/// high word may carry the icon id.
pub fn decode(msg: u32, lparam: LPARAM) -> Option<TrayMessage> {
    if msg == WM_TRAYICON {
        return match (lparam.0 as u32) & 0xFFFF {
            WM_LBUTTONUP => Some(TrayMessage::LeftButtonUp),
            WM_RBUTTONUP => Some(TrayMessage::RightButtonUp),
            _ => None,
        };
    }

    // 0 means registering the message failed
    let taskbar_created = *WM_TASKBARCREATED;
    (taskbar_created != 0 && msg == taskbar_created).then_some(TrayMessage::TaskbarCreated)
}

unsafe fn dispatch(hwnd: HWND, message: TrayMessage) {
    let userdata = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const WndProcUserData;
    let Some(userdata) = userdata.as_ref() else {
        return;
    };

    // Keep the callback alive even if it ends up destroying this window.
    let on_message = userdata.on_message.clone();
    on_message(message);
}

unsafe extern "system" fn wndproc_message_window(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        // Initialize GWLP_USERDATA
        WM_CREATE => {
            let create_struct = &*(lparam.0 as *const CREATESTRUCTW);
            let userdata = create_struct.lpCreateParams as *const WndProcUserData;
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, userdata as _);
        }

        WM_DESTROY => {
            // Drop userdata
            let userdata = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WndProcUserData;
            if !userdata.is_null() {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                let userdata = Box::from_raw(userdata);
                (userdata.on_message)(TrayMessage::Destroyed);
            }

            return LRESULT(0);
        }

        _ => {
            // Also handles taskbar recreation (explorer.exe restart)
            if let Some(message) = decode(msg, lparam) {
                dispatch(hwnd, message);
            }

            if msg == WM_TRAYICON {
                return LRESULT(0);
            }
        }
    }

    DefWindowProcW(hwnd, msg, wparam, lparam)
}
