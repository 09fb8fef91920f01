use crate::foundation::error::{CurtainError, CurtainResult};

pub use kurbo::{BezPath, Point};

/// Side length of the normalized viewport. Every curtain coordinate lives in `[0, VIEWBOX]`.
pub const VIEWBOX: f64 = 100.0;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> CurtainResult<Self> {
        if den == 0 {
            return Err(CurtainError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CurtainError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Pixel size of an output surface. The curtain itself never sees pixels; only rasterization
/// and pointer tracking do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> CurtainResult<Self> {
        if width == 0 || height == 0 {
            return Err(CurtainError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Which edge a layer's fill is anchored to, and therefore which height means "covered".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Fill hangs from the bottom edge; 0 covers, 100 reveals.
    #[default]
    Rising,
    /// Fill hangs from the top edge; 100 covers, 0 reveals.
    Falling,
}

impl Polarity {
    pub fn covered_value(self) -> f64 {
        match self {
            Self::Rising => 0.0,
            Self::Falling => VIEWBOX,
        }
    }

    pub fn revealed_value(self) -> f64 {
        match self {
            Self::Rising => VIEWBOX,
            Self::Falling => 0.0,
        }
    }

    /// Horizontal edge the path closes against (`V {edge} H 0`).
    pub fn closing_edge(self) -> f64 {
        self.revealed_value()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
