use crate::animation::{
    ease::Ease,
    timeline::{Timeline, TimelineOpts, TimelineStatus, TweenProps, TweenTarget},
};

/// Opacity and vertical offset of the content shown under a covered curtain.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ContentStyle {
    pub opacity: f64,
    /// Pixels below the resting position.
    pub offset_y: f64,
}

impl ContentStyle {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        offset_y: 30.0,
    };
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKey {
    Opacity,
    OffsetY,
}

impl TweenTarget<ContentKey> for ContentStyle {
    fn value(&self, key: ContentKey) -> f64 {
        match key {
            ContentKey::Opacity => self.opacity,
            ContentKey::OffsetY => self.offset_y,
        }
    }

    fn set_value(&mut self, key: ContentKey, value: f64) {
        match key {
            ContentKey::Opacity => self.opacity = value.clamp(0.0, 1.0),
            ContentKey::OffsetY => self.offset_y = value,
        }
    }
}

/// Mount state plus the fade-in that plays when content appears.
#[derive(Clone, Debug)]
pub struct ContentFade {
    props: TweenProps,
    style: ContentStyle,
    mounted: bool,
    timeline: Option<Timeline<ContentKey>>,
}

impl Default for ContentFade {
    fn default() -> Self {
        Self::new(TweenProps::new(0.6, Ease::OutQuart))
    }
}

impl ContentFade {
    pub fn new(props: TweenProps) -> Self {
        Self {
            props,
            style: ContentStyle::HIDDEN,
            mounted: false,
            timeline: None,
        }
    }

    /// Mount hidden and start fading in.
    pub fn mount(&mut self) {
        self.mounted = true;
        self.style = ContentStyle::HIDDEN;
        let mut tl = Timeline::new(TimelineOpts::default());
        tl.to(ContentKey::Opacity, ContentStyle::SHOWN.opacity, self.props, 0.0)
            .to(ContentKey::OffsetY, ContentStyle::SHOWN.offset_y, self.props, 0.0);
        self.timeline = Some(tl);
    }

    /// Remove immediately, without a fade.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.timeline = None;
        self.style = ContentStyle::HIDDEN;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_animating(&self) -> bool {
        self.timeline.is_some()
    }

    /// Current style, `None` while unmounted.
    pub fn style(&self) -> Option<ContentStyle> {
        self.mounted.then_some(self.style)
    }

    pub fn tick(&mut self, dt: f64) {
        let Some(tl) = self.timeline.as_mut() else {
            return;
        };
        if tl.advance(dt, &mut self.style) == TimelineStatus::Complete {
            self.timeline = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/content.rs"]
mod tests;
