use std::path::PathBuf;

use crate::tooltip::TOOLTIP_MAX_UNITS;

pub type Result<T, E = TrayError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("tray is not initialized, call `init` first")]
    NotInitialized,

    #[error("tray is already initialized, call `remove` first")]
    AlreadyInitialized,

    #[error("tray is busy dispatching a message")]
    Busy,

    #[error("tooltip is {units} UTF-16 units long, the limit is {}", TOOLTIP_MAX_UNITS)]
    TooltipTooLong { units: usize },

    #[error("input contains an interior nul character")]
    InteriorNul,

    #[error("failed to load icon from {} (error code: {code:#010x})", path.display())]
    IconLoad { path: PathBuf, code: i32 },

    #[error("`{call}` failed (error code: {code:#010x})")]
    Os { call: &'static str, code: i32 },
}

impl TrayError {
    pub fn os(call: &'static str, code: i32) -> Self {
        Self::Os { call, code }
    }
}
