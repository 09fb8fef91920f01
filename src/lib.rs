//! Wavecurtain is a two-layer wave-curtain transition engine.
//!
//! A curtain is two stacked layers of N control-point heights on a normalized 0..100 viewport.
//! Each layer renders as one closed SVG path of flat-tangent cubics. A small caller-driven
//! timeline tweens every point with a staggered start, and [`Curtain`] sequences the tweens into
//! a cover/reveal state machine:
//!
//! - Configure a [`CurtainConfig`] (or start from a preset) and build a [`Curtain`]
//! - Request `open`, `close`, `pulse` or `enter`
//! - Call [`Curtain::tick`] every frame with a [`RenderSurface`] to receive the new geometry
//!
//! [`Overlay`] layers a nested detail curtain, content fades and Escape handling on top, and
//! [`record`] plays a motion offline for export.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod curtain;
/// Control-point heights to SVG path data and kurbo geometry.
pub mod curve;
pub(crate) mod overlay;
/// Offline frame capture.
pub mod playback;
pub(crate) mod surface;

pub use crate::foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, Polarity, VIEWBOX};
pub use crate::foundation::error::{CurtainError, CurtainResult};
pub use crate::foundation::math::Rng64;

pub use crate::animation::ease::Ease;
pub use crate::animation::timeline::{
    Timeline, TimelineOpts, TimelineStatus, Tween, TweenProps, TweenTarget,
};

pub use crate::curtain::config::{CurtainConfig, LayerOrder};
pub use crate::curtain::hooks::{CurtainHooks, FnHooks, NoHooks};
pub use crate::curtain::orchestrator::{Curtain, Phase};
pub use crate::curtain::scroll::{ScrollGuard, ScrollLock};
pub use crate::curtain::stagger::{
    STABLE_DELAYS, Stagger, StaggerPolicy, jitter_delays, per_layer_stagger,
};
pub use crate::curtain::state::{CurtainState, LAYERS, Layer, PointKey};

pub use crate::curve::{covered_fraction, curve_shape, sample_curve, sample_curve_to_edge};

pub use crate::overlay::content::{ContentFade, ContentKey, ContentStyle};
pub use crate::overlay::flashlight::{Flashlight, FlashlightConfig, FlashlightKey, FlashlightPose};
pub use crate::overlay::panel::Overlay;

pub use crate::playback::{FrameSnapshot, Motion, record, snapshot_at};

pub use crate::surface::RenderSurface;
pub use crate::surface::raster::{FrameRGBA, rasterize_svg};
pub use crate::surface::svg::SvgSurface;
