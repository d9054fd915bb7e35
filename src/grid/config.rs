use crate::foundation::error::{SphereError, SphereResult};

/// Fixed per-session display dimensions.
///
/// Width and height are process-wide constants for a session: the per-pixel
/// direction table in [`crate::SphereMap`] and any mesh acceleration
/// structures are sized from them once. Changing them means rebuilding both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DisplayConfig {
    /// Pixel columns around the equator (theta resolution).
    pub width: u32,
    /// Pixel rows from pole to pole (phi resolution), inclusive of both poles.
    pub height: u32,
}

impl DisplayConfig {
    /// Validate and build a display configuration.
    pub fn new(width: u32, height: u32) -> SphereResult<Self> {
        if width < 4 {
            return Err(SphereError::config("display width must be >= 4"));
        }
        if height < 2 {
            return Err(SphereError::config("display height must be >= 2"));
        }
        Ok(Self { width, height })
    }

    /// Total pixel count.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/config.rs"]
mod tests;
