use std::fmt;

use crate::error::{Result, TrayError};

/// Size of the notification area's tooltip buffer, in UTF-16 units,
/// including the terminating nul.
pub const TOOLTIP_BUFFER_LEN: usize = 128;

/// Longest tooltip that still fits the buffer with its terminator.
pub const TOOLTIP_MAX_UNITS: usize = TOOLTIP_BUFFER_LEN - 1;

/// Tooltip text, already encoded the way the notification area stores it.
///
/// Construction rejects text that does not fit instead of truncating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    text: String,
    wide: Vec<u16>,
}

impl Tooltip {
    pub fn new(text: &str) -> Result<Self> {
        if text.contains('\0') {
            return Err(TrayError::InteriorNul);
        }

        let wide: Vec<u16> = text.encode_utf16().collect();
        if wide.len() > TOOLTIP_MAX_UNITS {
            return Err(TrayError::TooltipTooLong { units: wide.len() });
        }

        Ok(Self {
            text: text.to_owned(),
            wide,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_wide(&self) -> &[u16] {
        &self.wide
    }

    /// Nul-terminated copy sized for the platform's fixed buffer.
    pub fn to_buffer(&self) -> [u16; TOOLTIP_BUFFER_LEN] {
        let mut buffer = [0; TOOLTIP_BUFFER_LEN];
        buffer[..self.wide.len()].copy_from_slice(&self.wide);
        buffer
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
