//! A minimal tween timeline driven by an explicit clock.
//!
//! A [`Timeline`] is a list of tweens, each moving one keyed scalar of some [`TweenTarget`]
//! towards a target value over `[at, at + duration]` (timeline-local seconds). The owner calls
//! [`Timeline::advance`] once per frame; tweens are applied in start-offset order, so the target
//! has received every value for the tick before `advance` returns and the caller can render.
//!
//! The start value of a tween is captured the first time it becomes active, not when it is
//! scheduled. Two tweens on the same key therefore chain naturally when the later one starts
//! after the earlier one ends.

use crate::{animation::ease::Ease, foundation::math::lerp};

/// Something a timeline can read and write scalars on.
pub trait TweenTarget<K> {
    /// Current value for `key`.
    fn value(&self, key: K) -> f64;
    /// Store an interpolated value for `key`.
    fn set_value(&mut self, key: K, value: f64);
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TweenProps {
    /// Seconds from start to target.
    pub duration: f64,
    pub ease: Ease,
}

impl TweenProps {
    pub fn new(duration: f64, ease: Ease) -> Self {
        Self { duration, ease }
    }
}

/// One scheduled interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<K> {
    pub key: K,
    pub target: f64,
    /// Start offset in timeline-local seconds.
    pub at: f64,
    pub props: TweenProps,
    from: Option<f64>,
    done: bool,
}

impl<K> Tween<K> {
    pub fn end(&self) -> f64 {
        self.at + self.props.duration.max(0.0)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimelineOpts {
    /// Seconds to wait before local time starts running.
    pub delay: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    /// Still inside the start delay; nothing has been written.
    Pending,
    Running,
    /// Every tween has reached its target.
    Complete,
}

#[derive(Clone, Debug)]
pub struct Timeline<K> {
    tweens: Vec<Tween<K>>,
    delay: f64,
    elapsed: f64,
}

impl<K: Copy + PartialEq> Timeline<K> {
    pub fn new(opts: TimelineOpts) -> Self {
        Self {
            tweens: Vec::new(),
            delay: opts.delay.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Schedule `key` to move to `target` starting at local offset `at`.
    pub fn to(&mut self, key: K, target: f64, props: TweenProps, at: f64) -> &mut Self {
        debug_assert!(target.is_finite(), "tween target must be finite");
        debug_assert!(props.duration >= 0.0, "tween duration must be >= 0");
        let at = at.max(0.0);
        // Keep start order; ties keep insertion order.
        let idx = self.tweens.partition_point(|t| t.at <= at);
        self.tweens.insert(
            idx,
            Tween {
                key,
                target,
                at,
                props,
                from: None,
                done: false,
            },
        );
        self
    }

    /// Drop every tween on `key`, finished or not. Used for overwrite-style retargeting.
    pub fn kill(&mut self, key: K) {
        self.tweens.retain(|t| t.key != key);
    }

    pub fn tweens(&self) -> &[Tween<K>] {
        &self.tweens
    }

    /// Local length: end of the latest tween.
    pub fn duration(&self) -> f64 {
        self.tweens.iter().map(Tween::end).fold(0.0, f64::max)
    }

    /// Start delay plus local length.
    pub fn total_duration(&self) -> f64 {
        self.delay + self.duration()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds since the start delay ran out (zero while pending).
    pub fn local_time(&self) -> f64 {
        (self.elapsed - self.delay).max(0.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay && self.tweens.iter().all(Tween::is_done)
    }

    /// Move the clock forward by `dt` seconds and write every active tween's value.
    pub fn advance<T: TweenTarget<K>>(&mut self, dt: f64, target: &mut T) -> TimelineStatus {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed < self.delay {
            return TimelineStatus::Pending;
        }

        let now = self.local_time();
        for tween in self.tweens.iter_mut() {
            if tween.done || tween.at > now {
                continue;
            }
            let key = tween.key;
            let from = *tween.from.get_or_insert_with(|| target.value(key));
            let progress = if tween.props.duration <= 0.0 {
                1.0
            } else {
                ((now - tween.at) / tween.props.duration).clamp(0.0, 1.0)
            };
            let value = if progress >= 1.0 {
                tween.target
            } else {
                lerp(from, tween.target, tween.props.ease.apply(progress))
            };
            target.set_value(key, value);
            tween.done = progress >= 1.0;
        }

        if self.is_complete() {
            TimelineStatus::Complete
        } else {
            TimelineStatus::Running
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
