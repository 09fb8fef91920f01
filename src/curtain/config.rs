use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    animation::{ease::Ease, timeline::TweenProps},
    curtain::stagger::{STABLE_DELAYS, StaggerPolicy},
    foundation::{
        core::Polarity,
        error::{CurtainError, CurtainResult},
    },
};

/// Which layer leads a reveal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerOrder {
    /// Back layer first, same as the cover.
    Forward,
    /// Front layer first, so the last layer drawn is the first to leave.
    #[default]
    Reversed,
}

/// Everything that shapes one curtain. Serialized as JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurtainConfig {
    /// Control points per layer (N).
    pub points: usize,
    /// Lag between the two layers, seconds.
    pub per_path_delay: f64,
    /// Duration of every point tween, seconds.
    pub duration: f64,
    pub ease: Ease,
    pub stagger: StaggerPolicy,
    pub polarity: Polarity,
    pub reveal_order: LayerOrder,
    /// Offset of the reveal half of a round trip.
    pub pulse_offset: f64,
    /// Start delay of the page-entrance reveal.
    pub entrance_delay: f64,
    /// Fill for the back and front layer.
    pub fills: [String; 2],
}

impl Default for CurtainConfig {
    fn default() -> Self {
        Self::overlay()
    }
}

impl CurtainConfig {
    /// Full-screen overlay curtain: stable ripple, white then near-black.
    pub fn overlay() -> Self {
        Self {
            points: 10,
            per_path_delay: 0.1,
            duration: 0.8,
            ease: Ease::InOutQuart,
            stagger: StaggerPolicy::Table {
                delays: STABLE_DELAYS.to_vec(),
            },
            polarity: Polarity::Rising,
            reveal_order: LayerOrder::Reversed,
            pulse_offset: 0.9,
            entrance_delay: 0.0,
            fills: ["#ffffff".to_string(), "#0e100f".to_string()],
        }
    }

    /// Quick inline round trip with a randomized ripple.
    pub fn hero(seed: u64) -> Self {
        Self {
            per_path_delay: 0.25,
            duration: 0.5,
            ease: Ease::InOutCubic,
            stagger: StaggerPolicy::Jitter {
                max_jitter: 0.3,
                seed,
            },
            fills: ["#ffd9b0".to_string(), "#ff8709".to_string()],
            ..Self::overlay()
        }
    }

    /// Slow reveal played when a page mounts.
    pub fn entrance() -> Self {
        Self {
            duration: 1.2,
            entrance_delay: 0.1,
            ..Self::overlay()
        }
    }

    pub fn tween_props(&self) -> TweenProps {
        TweenProps::new(self.duration, self.ease)
    }

    pub fn validate(&self) -> CurtainResult<()> {
        if self.points < 2 {
            return Err(CurtainError::validation(format!(
                "curtain needs at least 2 control points, got {}",
                self.points
            )));
        }
        for (name, value) in [
            ("per_path_delay", self.per_path_delay),
            ("duration", self.duration),
            ("pulse_offset", self.pulse_offset),
            ("entrance_delay", self.entrance_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CurtainError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        self.stagger.validate(self.points)?;
        for fill in &self.fills {
            if fill.trim().is_empty() {
                return Err(CurtainError::validation("layer fill must be non-empty"));
            }
            if fill.contains(['"', '<', '>', '&']) {
                return Err(CurtainError::validation(format!(
                    "layer fill '{fill}' contains markup characters"
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> CurtainResult<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| CurtainError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> CurtainResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open curtain config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| CurtainError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curtain/config.rs"]
mod tests;
