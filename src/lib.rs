//! Notification area icon for the Dino chat client.
//!
//! [`TrayController`] owns a hidden window, the tray icon and its context
//! menu, and reports clicks back to the host through callbacks. The platform
//! side sits behind [`Shell`]; [`Win32Shell`] is the Windows implementation.

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod menu;
pub mod shell;
pub mod tooltip;
#[cfg(target_os = "windows")]
pub mod ffi;
#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(test)]
mod fake;

pub use crate::config::TrayConfig;
pub use crate::controller::TrayController;
pub use crate::error::TrayError;
pub use crate::event::{TrayEvent, TrayHandler};
pub use crate::menu::MenuItem;
pub use crate::shell::{Shell, TrayMessage};
pub use crate::tooltip::Tooltip;
#[cfg(target_os = "windows")]
pub use crate::windows::Win32Shell;
