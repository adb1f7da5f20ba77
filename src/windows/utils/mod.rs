use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use crate::error::{Result, TrayError};

mod hwnd;

pub use hwnd::HwndWithDrop;

pub fn os_error(call: &'static str, error: windows::core::Error) -> TrayError {
    TrayError::os(call, error.code().0)
}

/// Builds an error from the calling thread's last-error code.
pub fn last_os_error(call: &'static str) -> TrayError {
    os_error(call, windows::core::Error::from_win32())
}

/// Nul-terminated UTF-16 copy of `path`.
pub fn to_wide_path(path: &Path) -> Result<Vec<u16>> {
    let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    if wide.contains(&0) {
        return Err(TrayError::InteriorNul);
    }

    wide.push(0);
    Ok(wide)
}
