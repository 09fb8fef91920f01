//! Offline playback: drive a curtain on a fixed frame clock and capture what each frame shows.

use crate::{
    curtain::{
        config::CurtainConfig,
        orchestrator::{Curtain, Phase},
        state::LAYERS,
    },
    curve::covered_fraction,
    foundation::{
        core::{Canvas, Fps, FrameIndex},
        error::{CurtainError, CurtainResult},
    },
    surface::{RenderSurface, svg::SvgSurface},
};

/// Float dust in a frame clock can leave the final tween a hair short of its end.
const SETTLE_EPS: f64 = 1e-9;

/// Which curtain transition to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    Open,
    /// Starts from a settled `open`.
    Close,
    Pulse,
    Enter,
}

/// One captured frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameIndex>,
    pub time_s: f64,
    pub phase: Phase,
    /// Back then front layer `d` attribute.
    pub paths: [String; LAYERS],
    /// Share of the viewport each layer hides, in `[0, 1]`.
    pub coverage: [f64; LAYERS],
}

impl FrameSnapshot {
    fn capture(curtain: &Curtain, frame: Option<FrameIndex>, time_s: f64) -> Self {
        let state = curtain.state();
        let polarity = state.polarity();
        Self {
            frame,
            time_s,
            phase: curtain.phase(),
            paths: state.render(),
            coverage: std::array::from_fn(|i| {
                covered_fraction(state.layer(i).points(), polarity)
            }),
        }
    }

    /// Standalone SVG document of this frame.
    pub fn to_svg(&self, fills: &[String; LAYERS], canvas: Canvas) -> String {
        let mut surface = SvgSurface::new(fills.clone());
        for (layer, d) in self.paths.iter().enumerate() {
            surface.set_path(layer, d);
        }
        surface.to_svg_document(canvas)
    }
}

/// Build a curtain and start `motion` on it. `Close` first plays the cover to completion.
pub fn start(config: &CurtainConfig, motion: Motion) -> CurtainResult<Curtain> {
    let mut curtain = Curtain::new(config.clone())?;
    let started = match motion {
        Motion::Open => curtain.open(),
        Motion::Pulse => curtain.pulse(),
        Motion::Enter => curtain.enter(),
        Motion::Close => {
            curtain.open();
            let mut sink = SvgSurface::detached(config.fills.clone());
            while let Some(left) = curtain.remaining() {
                curtain.tick(left + SETTLE_EPS, &mut sink);
            }
            curtain.close()
        }
    };
    if !started {
        return Err(CurtainError::validation(format!(
            "curtain refused to start {motion:?}"
        )));
    }
    Ok(curtain)
}

/// Snapshot of `motion` at `time_s` seconds after it starts.
#[tracing::instrument(skip(config))]
pub fn snapshot_at(
    config: &CurtainConfig,
    motion: Motion,
    time_s: f64,
) -> CurtainResult<FrameSnapshot> {
    if !time_s.is_finite() || time_s < 0.0 {
        return Err(CurtainError::validation("snapshot time must be finite and >= 0"));
    }
    let mut curtain = start(config, motion)?;
    let mut sink = SvgSurface::detached(config.fills.clone());
    curtain.tick(time_s, &mut sink);
    Ok(FrameSnapshot::capture(&curtain, None, time_s))
}

/// Every frame of `motion` at `fps`, from time zero through the frame where the curtain settles.
#[tracing::instrument(skip(config))]
pub fn record(
    config: &CurtainConfig,
    motion: Motion,
    fps: Fps,
) -> CurtainResult<Vec<FrameSnapshot>> {
    let mut curtain = start(config, motion)?;
    let total = curtain.remaining().unwrap_or(0.0);
    // A zero-length motion still needs one tick to settle.
    let last = fps.secs_to_frames_ceil(total).max(1);
    let mut sink = SvgSurface::detached(config.fills.clone());

    let mut frames = Vec::with_capacity(last as usize + 1);
    frames.push(FrameSnapshot::capture(&curtain, Some(FrameIndex(0)), 0.0));
    let mut now = 0.0;
    for f in 1..=last {
        let t = fps.frames_to_secs(f);
        curtain.tick(t - now, &mut sink);
        now = t;
        if f == last
            && let Some(left) = curtain.remaining()
        {
            curtain.tick(left + SETTLE_EPS, &mut sink);
        }
        frames.push(FrameSnapshot::capture(&curtain, Some(FrameIndex(f)), t));
    }
    tracing::debug!(frames = frames.len(), total_s = total, "recorded curtain motion");
    Ok(frames)
}

#[cfg(test)]
#[path = "../tests/unit/playback.rs"]
mod tests;
