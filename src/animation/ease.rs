use crate::foundation::error::{CurtainError, CurtainResult};

/// Easing curves for tweens.
///
/// Every curve maps `[0, 1]` onto `[0, 1]` monotonically, so an eased tween between two
/// in-range heights never leaves the range. Deserialization also accepts the GSAP-style names
/// (`"power3.inOut"`) that motion designers tend to hand over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[serde(alias = "none", alias = "power0")]
    Linear,
    #[serde(alias = "power1.in")]
    InQuad,
    #[serde(alias = "power1.out", alias = "power1")]
    OutQuad,
    #[serde(alias = "power1.inOut")]
    InOutQuad,
    #[serde(alias = "power2.in")]
    InCubic,
    #[serde(alias = "power2.out", alias = "power2")]
    OutCubic,
    #[serde(alias = "power2.inOut")]
    InOutCubic,
    #[serde(alias = "power3.in")]
    InQuart,
    #[serde(alias = "power3.out", alias = "power3")]
    OutQuart,
    #[serde(alias = "power3.inOut")]
    InOutQuart,
}

impl Ease {
    /// Parse a variant name or GSAP alias, e.g. `"InOutQuart"` or `"power3.inOut"`.
    pub fn parse(name: &str) -> CurtainResult<Self> {
        serde_json::from_value(serde_json::Value::String(name.trim().to_owned()))
            .map_err(|_| CurtainError::validation(format!("unknown ease '{name}'")))
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
        }
    }
}

impl std::str::FromStr for Ease {
    type Err = CurtainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
