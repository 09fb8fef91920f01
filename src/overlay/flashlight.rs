use kurbo::{Point, Rect, Vec2};

use crate::{
    animation::{
        ease::Ease,
        timeline::{Timeline, TimelineOpts, TweenProps, TweenTarget},
    },
    foundation::{
        core::Canvas,
        error::{CurtainError, CurtainResult},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlashlightConfig {
    pub width: f64,
    pub height: f64,
    /// Tween used every time the pointer moves.
    pub follow: TweenProps,
}

impl Default for FlashlightConfig {
    fn default() -> Self {
        Self {
            width: 450.0,
            height: 140.0,
            follow: TweenProps::new(0.2, Ease::OutCubic),
        }
    }
}

impl FlashlightConfig {
    pub fn validate(&self) -> CurtainResult<()> {
        if !(self.width.is_finite() && self.width > 0.0 && self.height.is_finite() && self.height > 0.0)
        {
            return Err(CurtainError::validation(
                "flashlight window size must be finite and > 0",
            ));
        }
        if !self.follow.duration.is_finite() || self.follow.duration < 0.0 {
            return Err(CurtainError::validation(
                "flashlight follow duration must be finite and >= 0",
            ));
        }
        Ok(())
    }

    fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashlightKey {
    WindowX,
    WindowY,
    ContentX,
    ContentY,
}

/// Window position in viewport pixels and the counter-offset of the content inside it.
///
/// The content moves opposite to the window so that what shows through stays pinned to the
/// viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct FlashlightPose {
    pub window: Point,
    pub content: Point,
}

impl TweenTarget<FlashlightKey> for FlashlightPose {
    fn value(&self, key: FlashlightKey) -> f64 {
        match key {
            FlashlightKey::WindowX => self.window.x,
            FlashlightKey::WindowY => self.window.y,
            FlashlightKey::ContentX => self.content.x,
            FlashlightKey::ContentY => self.content.y,
        }
    }

    fn set_value(&mut self, key: FlashlightKey, value: f64) {
        match key {
            FlashlightKey::WindowX => self.window.x = value,
            FlashlightKey::WindowY => self.window.y = value,
            FlashlightKey::ContentX => self.content.x = value,
            FlashlightKey::ContentY => self.content.y = value,
        }
    }
}

/// A small window that trails the pointer over a covered curtain.
#[derive(Clone, Debug)]
pub struct Flashlight {
    config: FlashlightConfig,
    viewport: Canvas,
    pose: FlashlightPose,
    visible: bool,
    timeline: Timeline<FlashlightKey>,
}

impl Flashlight {
    pub fn new(config: FlashlightConfig, viewport: Canvas) -> CurtainResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            viewport,
            pose: FlashlightPose::default(),
            visible: false,
            timeline: Timeline::new(TimelineOpts::default()),
        })
    }

    pub fn config(&self) -> &FlashlightConfig {
        &self.config
    }

    pub fn pose(&self) -> FlashlightPose {
        self.pose
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Window bounds in viewport pixels.
    pub fn window_rect(&self) -> Rect {
        Rect::from_center_size(self.pose.window, (self.config.width, self.config.height))
    }

    /// Appear at the viewport centre, with no follow tween pending.
    pub fn show(&mut self) {
        let center = self.viewport.center();
        self.pose = FlashlightPose {
            window: center,
            content: Self::counter_offset(center, self.config.half_size()),
        };
        self.visible = true;
        self.timeline = Timeline::new(TimelineOpts::default());
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.timeline = Timeline::new(TimelineOpts::default());
    }

    /// Point the window at `(x, y)`. Replaces any follow tween still in flight.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        if !self.visible || !x.is_finite() || !y.is_finite() {
            return false;
        }
        let window = Point::new(x, y);
        let content = Self::counter_offset(window, self.config.half_size());
        let now = self.timeline.local_time();
        for (key, target) in [
            (FlashlightKey::WindowX, window.x),
            (FlashlightKey::WindowY, window.y),
            (FlashlightKey::ContentX, content.x),
            (FlashlightKey::ContentY, content.y),
        ] {
            self.timeline.kill(key);
            self.timeline.to(key, target, self.config.follow, now);
        }
        tracing::trace!(x, y, "flashlight retargeted");
        true
    }

    pub fn tick(&mut self, dt: f64) {
        if self.visible {
            self.timeline.advance(dt, &mut self.pose);
        }
    }

    fn counter_offset(window: Point, half: Vec2) -> Point {
        Point::new(-window.x + half.x, -window.y + half.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/flashlight.rs"]
mod tests;
