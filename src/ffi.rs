//! C surface for the plugin host.
//!
//! The host talks to one controller per UI thread. Every function returns
//! `1` on success and `0` on failure, matching a glib `gboolean`; the reason
//! for a failure is logged.
//!
//! The controller uses [`TrayConfig::default`]; the host sets the tooltip
//! and icon through the functions below.

use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr};

use crate::config::TrayConfig;
use crate::controller::TrayController;
use crate::error::{Result, TrayError};
use crate::windows::Win32Shell;

thread_local! {
    static TRAY: RefCell<Option<TrayController<Win32Shell>>> = const { RefCell::new(None) };
}

fn with_tray(call: &str, f: impl FnOnce(&TrayController<Win32Shell>) -> Result<()>) -> c_int {
    let result = TRAY.with(|tray| {
        if tray.borrow().is_none() {
            let controller = TrayController::new(Win32Shell, TrayConfig::default())?;
            *tray.borrow_mut() = Some(controller);
        }

        match tray.borrow().as_ref() {
            Some(controller) => f(controller),
            None => Err(TrayError::NotInitialized),
        }
    });

    match result {
        Ok(()) => 1,
        Err(e) => {
            tracing::error!("`{call}` failed: {e}");
            0
        }
    }
}

unsafe fn utf8<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }

    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!("Rejected non UTF-8 string: {e}");
            None
        }
    }
}

#[no_mangle]
pub extern "C" fn tray_init() -> c_int {
    with_tray("tray_init", |tray| tray.init())
}

#[no_mangle]
pub extern "C" fn tray_add() -> c_int {
    with_tray("tray_add", |tray| tray.add())
}

#[no_mangle]
pub extern "C" fn tray_remove() -> c_int {
    with_tray("tray_remove", |tray| tray.remove())
}

#[no_mangle]
pub extern "C" fn tray_hide() -> c_int {
    with_tray("tray_hide", |tray| tray.hide())
}

#[no_mangle]
pub extern "C" fn tray_show() -> c_int {
    with_tray("tray_show", |tray| tray.show())
}

/// # Safety
///
/// `tooltip` must be null or point to a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tray_set_tooltip(tooltip: *const c_char) -> c_int {
    let Some(tooltip) = utf8(tooltip) else {
        return 0;
    };

    with_tray("tray_set_tooltip", |tray| tray.set_tooltip(tooltip))
}

/// # Safety
///
/// `icon_path` must be null or point to a nul-terminated string.
#[no_mangle]
pub unsafe extern "C" fn tray_set_icon_from_file(icon_path: *const c_char) -> c_int {
    let Some(icon_path) = utf8(icon_path) else {
        return 0;
    };

    with_tray("tray_set_icon_from_file", |tray| {
        tray.set_icon_from_file(icon_path)
    })
}

/// Passing null clears the callback.
#[no_mangle]
pub extern "C" fn tray_set_left_click_callback(callback: Option<extern "C" fn()>) {
    with_tray("tray_set_left_click_callback", |tray| {
        match callback {
            Some(callback) => tray.set_left_click_callback(move || callback()),
            None => tray.clear_left_click_callback(),
        }
        Ok(())
    });
}

/// Passing null clears the callback. The callback receives `1` for "show"
/// and `2` for "exit".
#[no_mangle]
pub extern "C" fn tray_set_menu_callback(callback: Option<extern "C" fn(c_int)>) {
    with_tray("tray_set_menu_callback", |tray| {
        match callback {
            Some(callback) => tray.set_menu_callback(move |item| callback(item.id() as c_int)),
            None => tray.clear_menu_callback(),
        }
        Ok(())
    });
}
