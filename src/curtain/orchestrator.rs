use crate::{
    animation::timeline::{Timeline, TimelineOpts, TimelineStatus, Tween},
    curtain::{
        config::{CurtainConfig, LayerOrder},
        hooks::{CurtainHooks, NoHooks},
        scroll::{ScrollGuard, ScrollLock},
        stagger::{Stagger, per_layer_stagger},
        state::{CurtainState, LAYERS, PointKey},
    },
    foundation::error::CurtainResult,
    surface::RenderSurface,
};

/// Lifecycle phase of a curtain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing on screen.
    Idle,
    Covering,
    /// Viewport fully hidden; covered content may be mounted.
    Covered,
    Revealing,
}

/// Which transition the active timeline belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Run {
    Open,
    Close,
    Pulse { reveal_at: f64 },
    Enter,
}

/// A two-layer wave curtain and the state machine that drives it.
///
/// `open`, `close`, `pulse` and `enter` only schedule work; the caller moves time forward with
/// [`Curtain::tick`], which writes the new geometry to a [`RenderSurface`] and fires the
/// [`CurtainHooks`] at phase boundaries. Requests that do not fit the current phase are ignored.
pub struct Curtain {
    config: CurtainConfig,
    state: CurtainState,
    stagger: Stagger,
    delays: Vec<f64>,
    phase: Phase,
    run: Option<Run>,
    timeline: Option<Timeline<PointKey>>,
    hooks: Box<dyn CurtainHooks>,
    scroll: Option<ScrollLock>,
    scroll_guard: Option<ScrollGuard>,
}

impl std::fmt::Debug for Curtain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curtain")
            .field("phase", &self.phase)
            .field("run", &self.run)
            .field("points", &self.config.points)
            .field("scheduled", &self.scheduled().len())
            .finish_non_exhaustive()
    }
}

impl Curtain {
    /// Build an idle, fully revealed curtain. Fails on invalid configuration (e.g. N < 2).
    #[tracing::instrument(skip(config), fields(points = config.points))]
    pub fn new(config: CurtainConfig) -> CurtainResult<Self> {
        config.validate()?;
        let polarity = config.polarity;
        let state = CurtainState::new(config.points, polarity.revealed_value(), polarity);
        let mut stagger = Stagger::new(config.stagger.clone());
        let delays = stagger.compute_delays(config.points);
        Ok(Self {
            config,
            state,
            stagger,
            delays,
            phase: Phase::Idle,
            run: None,
            timeline: None,
            hooks: Box::new(NoHooks),
            scroll: None,
            scroll_guard: None,
        })
    }

    pub fn with_hooks(mut self, hooks: impl CurtainHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Lock page scrolling from the start of every `open` until its `close` finishes.
    pub fn with_scroll_lock(mut self, lock: ScrollLock) -> Self {
        self.scroll = Some(lock);
        self
    }

    pub fn config(&self) -> &CurtainConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_animating(&self) -> bool {
        self.timeline.is_some()
    }

    pub fn state(&self) -> &CurtainState {
        &self.state
    }

    /// Per-point delays of the current cycle.
    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    /// Tweens of the active timeline, in start order. Empty when idle or covered.
    pub fn scheduled(&self) -> &[Tween<PointKey>] {
        match &self.timeline {
            Some(tl) => tl.tweens(),
            None => &[],
        }
    }

    /// Seconds left on the active timeline.
    pub fn remaining(&self) -> Option<f64> {
        self.timeline
            .as_ref()
            .map(|tl| (tl.total_duration() - tl.elapsed()).max(0.0))
    }

    /// Cover the viewport. Only accepted from [`Phase::Idle`].
    #[tracing::instrument(skip(self))]
    pub fn open(&mut self) -> bool {
        if !self.accepts(Phase::Idle, "open") {
            return false;
        }
        self.start_cycle(self.config.polarity.revealed_value());
        if let Some(lock) = &self.scroll {
            self.scroll_guard = Some(lock.acquire());
        }

        let mut tl = Timeline::new(TimelineOpts::default());
        self.schedule(&mut tl, self.config.polarity.covered_value(), 0.0, LayerOrder::Forward);
        self.begin(tl, Run::Open, Phase::Covering);
        true
    }

    /// Reveal the viewport again. Only accepted from [`Phase::Covered`].
    #[tracing::instrument(skip(self))]
    pub fn close(&mut self) -> bool {
        if !self.accepts(Phase::Covered, "close") {
            return false;
        }
        self.hooks.on_unmount();

        let mut tl = Timeline::new(TimelineOpts::default());
        self.schedule(
            &mut tl,
            self.config.polarity.revealed_value(),
            0.0,
            self.config.reveal_order,
        );
        self.begin(tl, Run::Close, Phase::Revealing);
        true
    }

    /// Cover then immediately reveal in one timeline, never resting in [`Phase::Covered`].
    #[tracing::instrument(skip(self))]
    pub fn pulse(&mut self) -> bool {
        if !self.accepts(Phase::Idle, "pulse") {
            return false;
        }
        self.start_cycle(self.config.polarity.revealed_value());

        let mut tl = Timeline::new(TimelineOpts::default());
        let polarity = self.config.polarity;
        self.schedule(&mut tl, polarity.covered_value(), 0.0, LayerOrder::Forward);
        let offset = self.pulse_reveal_offset();
        self.schedule(&mut tl, polarity.revealed_value(), offset, self.config.reveal_order);
        let reveal_at = offset + self.delays.iter().copied().fold(f64::INFINITY, f64::min);
        self.begin(tl, Run::Pulse { reveal_at }, Phase::Covering);
        true
    }

    /// Start fully covered and reveal after the entrance delay, as on a fresh page load.
    #[tracing::instrument(skip(self))]
    pub fn enter(&mut self) -> bool {
        if !self.accepts(Phase::Idle, "enter") {
            return false;
        }
        self.start_cycle(self.config.polarity.covered_value());

        let mut tl = Timeline::new(TimelineOpts {
            delay: self.config.entrance_delay,
        });
        self.schedule(
            &mut tl,
            self.config.polarity.revealed_value(),
            0.0,
            self.config.reveal_order,
        );
        self.begin(tl, Run::Enter, Phase::Revealing);
        true
    }

    /// Stop whatever is running and snap back to idle without notifying hooks.
    pub fn kill(&mut self) {
        if self.timeline.take().is_some() || self.phase != Phase::Idle {
            tracing::debug!(phase = ?self.phase, "curtain killed");
        }
        self.run = None;
        self.state.reset(self.config.polarity.revealed_value());
        self.phase = Phase::Idle;
        self.scroll_guard = None;
    }

    /// Advance the active timeline by `dt` seconds and redraw every attached layer.
    ///
    /// Without an active timeline this does nothing.
    pub fn tick(&mut self, dt: f64, surface: &mut dyn RenderSurface) -> Phase {
        let Some(tl) = self.timeline.as_mut() else {
            return self.phase;
        };
        let status = tl.advance(dt, &mut self.state);
        let local = tl.local_time();

        if let Some(Run::Pulse { reveal_at }) = self.run
            && self.phase == Phase::Covering
            && local >= reveal_at
        {
            self.set_phase(Phase::Revealing);
        }

        self.present(surface);
        if status == TimelineStatus::Complete {
            self.finish();
        }
        self.phase
    }

    /// Write the current geometry to `surface`, skipping layers that are not attached.
    pub fn present(&self, surface: &mut dyn RenderSurface) {
        for layer in 0..LAYERS {
            if surface.is_attached(layer) {
                surface.set_path(layer, &self.state.render_layer(layer));
            }
        }
    }

    fn accepts(&self, required: Phase, request: &'static str) -> bool {
        if self.phase == required && self.timeline.is_none() {
            return true;
        }
        tracing::trace!(request, phase = ?self.phase, "ignored curtain request");
        false
    }

    fn start_cycle(&mut self, initial: f64) {
        self.state.reset(initial);
        self.delays = self.stagger.compute_delays(self.config.points);
    }

    /// One tween per (layer, point) towards `target`, at `base + delay[point] + layer lag`.
    fn schedule(&self, tl: &mut Timeline<PointKey>, target: f64, base: f64, order: LayerOrder) {
        let props = self.config.tween_props();
        for layer in 0..LAYERS {
            let lag_index = match order {
                LayerOrder::Forward => layer,
                LayerOrder::Reversed => LAYERS - 1 - layer,
            };
            let lag = per_layer_stagger(lag_index, LAYERS, self.config.per_path_delay);
            for (point, delay) in self.delays.iter().enumerate() {
                tl.to(PointKey { layer, point }, target, props, base + delay + lag);
            }
        }
    }

    /// Base of the reveal half of a round trip. Raised above `pulse_offset` when needed so that
    /// no point starts revealing before its cover tween has ended.
    fn pulse_reveal_offset(&self) -> f64 {
        let lag = |index| per_layer_stagger(index, LAYERS, self.config.per_path_delay);
        let overlap = (0..LAYERS)
            .map(|layer| {
                let reveal_index = match self.config.reveal_order {
                    LayerOrder::Forward => layer,
                    LayerOrder::Reversed => LAYERS - 1 - layer,
                };
                lag(layer) - lag(reveal_index)
            })
            .fold(0.0, f64::max);
        let min_offset = self.config.duration + overlap;
        let offset = self.config.pulse_offset;
        if offset + 1e-9 < min_offset {
            tracing::debug!(offset, min_offset, "pulse reveal pushed past the cover");
            return min_offset;
        }
        offset
    }

    fn begin(&mut self, tl: Timeline<PointKey>, run: Run, phase: Phase) {
        tracing::debug!(
            ?run,
            tweens = tl.tweens().len(),
            total_s = tl.total_duration(),
            "curtain timeline scheduled"
        );
        self.timeline = Some(tl);
        self.run = Some(run);
        self.set_phase(phase);
    }

    fn finish(&mut self) {
        self.timeline = None;
        match self.run.take() {
            Some(Run::Open) => {
                self.set_phase(Phase::Covered);
                self.hooks.on_revealed();
            }
            Some(Run::Close) => {
                self.set_phase(Phase::Idle);
                self.scroll_guard = None;
                self.hooks.on_closed();
            }
            Some(Run::Pulse { .. }) | Some(Run::Enter) => {
                self.set_phase(Phase::Idle);
                self.hooks.on_finished();
            }
            None => {}
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "curtain phase");
            self.phase = phase;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curtain/orchestrator.rs"]
mod tests;
