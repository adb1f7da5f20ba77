use std::fmt::Display;

/// Blocking error box, the tray has no window of its own to report into.
pub fn error_dialog<T: Display>(error: T) {
    rfd::MessageDialog::new()
        .set_title("Dino Tray")
        .set_description(format!("{error:#}"))
        .set_level(rfd::MessageLevel::Error)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
