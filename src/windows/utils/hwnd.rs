use windows::Win32::Foundation::HWND;

/// A simple wrapper around HWND that destroys the window when dropped.
pub struct HwndWithDrop(pub HWND);

impl Drop for HwndWithDrop {
    fn drop(&mut self) {
        unsafe {
            if let Err(e) = windows::Win32::UI::WindowsAndMessaging::DestroyWindow(self.0) {
                tracing::warn!("Failed to destroy window {:?}: {e}", self.0);
            }
        }
    }
}
