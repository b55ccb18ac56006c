//! Progress animator: one input signal, several styled outputs
//!
//! Combines a control-point [`Transform`] per style property with an
//! optional [`Smoothing`] stage. The raw frame is a pure function of the
//! most recent input; the smoothed frame is advanced explicitly once per
//! display refresh.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::smoothing::{Smoother, Smoothing};
use super::transform::{ControlPoint, Interpolation, Transform};
use crate::Result;

/// Visual parameter driven by an animated channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    /// 0.0 (transparent) to 1.0 (opaque); always clamped to that range
    Opacity,
    /// Horizontal translation in pixels
    TranslateX,
    /// Vertical translation in pixels
    TranslateY,
    /// Rotation in degrees
    Rotate,
    /// Tilt around the horizontal axis, degrees
    RotateX,
    /// Tilt around the vertical axis, degrees
    RotateY,
    /// Scale factor
    Scale,
    /// Blur radius in pixels
    Blur,
}

impl StyleProperty {
    /// Value of the property when no channel drives it
    pub fn identity(&self) -> f64 {
        match self {
            StyleProperty::Opacity | StyleProperty::Scale => 1.0,
            _ => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::TranslateX => "translate_x",
            StyleProperty::TranslateY => "translate_y",
            StyleProperty::Rotate => "rotate",
            StyleProperty::RotateX => "rotate_x",
            StyleProperty::RotateY => "rotate_y",
            StyleProperty::Scale => "scale",
            StyleProperty::Blur => "blur",
        }
    }

    fn constrain(&self, value: f64) -> f64 {
        match self {
            StyleProperty::Opacity => value.clamp(0.0, 1.0),
            StyleProperty::Blur => value.max(0.0),
            _ => value,
        }
    }
}

/// Declarative configuration of one animated channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub property: StyleProperty,
    pub points: Vec<ControlPoint>,
    #[serde(default)]
    pub interpolation: Interpolation,
    #[serde(default)]
    pub smoothing: Smoothing,
}

impl ChannelConfig {
    /// Linear channel without smoothing
    pub fn new(property: StyleProperty, pairs: &[(f64, f64)]) -> Self {
        Self {
            property,
            points: pairs.iter().copied().map(ControlPoint::from).collect(),
            interpolation: Interpolation::Linear,
            smoothing: Smoothing::None,
        }
    }

    pub fn smoothed(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn interpolated(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}

/// Resolved style values for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleFrame {
    values: BTreeMap<StyleProperty, f64>,
}

impl StyleFrame {
    /// Value for `property`, or its identity when no channel drives it
    pub fn get(&self, property: StyleProperty) -> f64 {
        self.values
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.identity())
    }

    pub fn is_driven(&self, property: StyleProperty) -> bool {
        self.values.contains_key(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    fn set(&mut self, property: StyleProperty, value: f64) {
        self.values.insert(property, value);
    }

    pub fn opacity(&self) -> f64 {
        self.get(StyleProperty::Opacity)
    }

    pub fn translate(&self) -> (f64, f64) {
        (
            self.get(StyleProperty::TranslateX),
            self.get(StyleProperty::TranslateY),
        )
    }

    pub fn scale(&self) -> f64 {
        self.get(StyleProperty::Scale)
    }
}

#[derive(Debug, Clone)]
struct Channel {
    property: StyleProperty,
    transform: Transform,
    smoothing: Smoothing,
    smoother: Smoother,
}

/// Maps a progress value onto a set of style channels
#[derive(Debug, Clone)]
pub struct ProgressAnimator {
    channels: Vec<Channel>,
    progress: f64,
}

impl ProgressAnimator {
    /// Build an animator; fails if any channel's control points are invalid
    pub fn new(configs: Vec<ChannelConfig>) -> Result<Self> {
        let channels = configs
            .into_iter()
            .map(|c| {
                let transform = Transform::new(c.points, c.interpolation)?;
                let initial = c.property.constrain(transform.sample(0.0));
                Ok(Channel {
                    property: c.property,
                    smoother: c.smoothing.build(initial),
                    smoothing: c.smoothing,
                    transform,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut animator = Self {
            channels,
            progress: 0.0,
        };
        animator.set_progress(0.0);
        animator.settle();
        Ok(animator)
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Record the latest input; non-finite input counts as 0
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_finite() { progress } else { 0.0 };
        for channel in &mut self.channels {
            let target = channel.property.constrain(channel.transform.sample(self.progress));
            channel.smoother.set_target(target);
        }
    }

    /// Unsmoothed values for the current input
    pub fn style(&self) -> StyleFrame {
        self.style_at(self.progress)
    }

    /// Unsmoothed values for an arbitrary input, state untouched
    pub fn style_at(&self, progress: f64) -> StyleFrame {
        let mut frame = StyleFrame::default();
        for channel in &self.channels {
            frame.set(
                channel.property,
                channel.property.constrain(channel.transform.sample(progress)),
            );
        }
        frame
    }

    /// Step every smoother by `dt` and return the smoothed values
    pub fn advance(&mut self, dt: Duration) -> StyleFrame {
        let mut frame = StyleFrame::default();
        for channel in &mut self.channels {
            let value = channel.smoother.advance(dt);
            frame.set(channel.property, channel.property.constrain(value));
        }
        frame
    }

    /// Smoothed values as of the last [`advance`](Self::advance)
    pub fn current(&self) -> StyleFrame {
        let mut frame = StyleFrame::default();
        for channel in &self.channels {
            frame.set(channel.property, channel.property.constrain(channel.smoother.value()));
        }
        frame
    }

    /// True once every smoothed channel has reached its target
    pub fn is_settled(&self) -> bool {
        self.channels.iter().all(|c| c.smoother.is_settled())
    }

    /// Snap every smoothed channel to its target
    pub fn settle(&mut self) {
        for channel in &mut self.channels {
            let target = channel.property.constrain(channel.transform.sample(self.progress));
            channel.smoother.jump(target);
        }
    }

    /// Drop smoothing state (unmount): rebuild each smoother at its target
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            let target = channel.property.constrain(channel.transform.sample(self.progress));
            channel.smoother = channel.smoothing.build(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpringConfig;

    const FRAME: Duration = Duration::from_millis(16);

    fn hero() -> ProgressAnimator {
        ProgressAnimator::new(vec![
            ChannelConfig::new(StyleProperty::Opacity, &[(0.0, 1.0), (300.0, 0.0)]),
            ChannelConfig::new(StyleProperty::Scale, &[(0.0, 1.0), (300.0, 0.9)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_raw_style_is_pure() {
        let mut animator = hero();
        animator.set_progress(150.0);
        let a = animator.style();
        let b = animator.style();
        assert_eq!(a, b);
        assert!((a.opacity() - 0.5).abs() < 1e-9);
        assert!((a.scale() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_past_range() {
        let mut animator = hero();
        animator.set_progress(10_000.0);
        let frame = animator.style();
        assert_eq!(frame.opacity(), 0.0);
        assert_eq!(frame.scale(), 0.9);
    }

    #[test]
    fn test_opacity_always_in_unit_range() {
        let animator = ProgressAnimator::new(vec![ChannelConfig::new(
            StyleProperty::Opacity,
            &[(0.0, -2.0), (1.0, 3.0)],
        )])
        .unwrap();
        for i in 0..=10 {
            let o = animator.style_at(i as f64 / 10.0).opacity();
            assert!((0.0..=1.0).contains(&o));
        }
    }

    #[test]
    fn test_undriven_properties_use_identity() {
        let frame = hero().style();
        assert!(!frame.is_driven(StyleProperty::Rotate));
        assert_eq!(frame.get(StyleProperty::Rotate), 0.0);
        assert_eq!(frame.translate(), (0.0, 0.0));
    }

    #[test]
    fn test_non_finite_progress() {
        let mut animator = hero();
        animator.set_progress(f64::NAN);
        assert_eq!(animator.progress(), 0.0);
        assert_eq!(animator.style().opacity(), 1.0);
    }

    #[test]
    fn test_smoothed_channel_lags_then_settles() {
        let mut animator = ProgressAnimator::new(vec![ChannelConfig::new(
            StyleProperty::Scale,
            &[(0.0, 0.0), (1.0, 1.0)],
        )
        .smoothed(Smoothing::Spring(SpringConfig::new(100.0, 30.0)))])
        .unwrap();

        animator.set_progress(1.0);
        assert_eq!(animator.style().scale(), 1.0);
        let first = animator.advance(FRAME).scale();
        assert!(first > 0.0 && first < 1.0);
        assert!(!animator.is_settled());

        for _ in 0..600 {
            animator.advance(FRAME);
        }
        assert!(animator.is_settled());
        assert_eq!(animator.current().scale(), 1.0);
    }

    #[test]
    fn test_reset_snaps_to_target() {
        let mut animator = ProgressAnimator::new(vec![ChannelConfig::new(
            StyleProperty::TranslateY,
            &[(0.0, 0.0), (1.0, -100.0)],
        )
        .smoothed(Smoothing::Exponential { time_constant_ms: 200 })])
        .unwrap();
        animator.set_progress(0.5);
        animator.advance(FRAME);
        animator.reset();
        assert!(animator.is_settled());
        assert!((animator.current().translate().1 + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_channel_is_rejected() {
        let result = ProgressAnimator::new(vec![ChannelConfig::new(StyleProperty::Blur, &[(0.0, 1.0)])]);
        assert!(result.is_err());
    }
}
