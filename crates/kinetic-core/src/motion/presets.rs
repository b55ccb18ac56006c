//! Named channel tables for the recurring page effects

use std::time::Duration;

use super::animator::{ChannelConfig, ProgressAnimator, StyleProperty};
use super::progress::ScrollOffset;
use super::smoothing::{Smoother, Smoothing};
use crate::config::SpringConfig;
use crate::Result;

/// What feeds a preset's input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresetInput {
    /// Raw page scroll offset in pixels
    PageOffset,
    /// Region progress fraction between two crossings
    Region(ScrollOffset),
    /// Whole-page progress fraction
    PageProgress,
}

#[derive(Debug, Clone)]
pub struct MotionPreset {
    pub name: &'static str,
    pub input: PresetInput,
    pub channels: Vec<ChannelConfig>,
}

impl MotionPreset {
    pub fn build(&self) -> Result<ProgressAnimator> {
        ProgressAnimator::new(self.channels.clone())
    }

    /// Every preset, in page order
    pub fn all() -> Vec<MotionPreset> {
        vec![
            Self::hero_fade(),
            Self::page_progress_bar(),
            Self::marquee(true),
            Self::featured_parallax(true),
            Self::work_showcase(),
            Self::cta_lift(),
            Self::project_hero(),
            Self::footer_reveal(),
        ]
    }

    pub fn by_name(name: &str) -> Option<MotionPreset> {
        Self::all().into_iter().find(|p| p.name == name)
    }

    /// Hero fades and shrinks over the first 300px of scroll
    pub fn hero_fade() -> Self {
        Self {
            name: "hero",
            input: PresetInput::PageOffset,
            channels: vec![
                ChannelConfig::new(StyleProperty::Opacity, &[(0.0, 1.0), (300.0, 0.0)]),
                ChannelConfig::new(StyleProperty::Scale, &[(0.0, 1.0), (300.0, 0.9)]),
            ],
        }
    }

    /// Reading progress bar, spring-smoothed
    pub fn page_progress_bar() -> Self {
        Self {
            name: "progress-bar",
            input: PresetInput::PageProgress,
            channels: vec![ChannelConfig::new(StyleProperty::Scale, &[(0.0, 0.0), (1.0, 1.0)])
                .smoothed(Smoothing::Spring(SpringConfig {
                    rest_delta: 0.001,
                    ..SpringConfig::new(100.0, 30.0)
                }))],
        }
    }

    /// Testimonial rows drifting in opposite directions
    pub fn marquee(left_row: bool) -> Self {
        let pairs = if left_row {
            [(0.0, -150.0), (1.0, 150.0)]
        } else {
            [(0.0, 150.0), (1.0, -150.0)]
        };
        Self {
            name: "marquee",
            input: PresetInput::Region(ScrollOffset::ENTER_EXIT),
            channels: vec![ChannelConfig::new(StyleProperty::TranslateX, &pairs)],
        }
    }

    /// Featured project row: sideways drift plus a scale pulse at mid-scroll
    pub fn featured_parallax(even_row: bool) -> Self {
        let drift = if even_row {
            [(0.0, -20.0), (1.0, 20.0)]
        } else {
            [(0.0, 20.0), (1.0, -20.0)]
        };
        Self {
            name: "featured",
            input: PresetInput::Region(ScrollOffset::ENTER_EXIT),
            channels: vec![
                ChannelConfig::new(StyleProperty::TranslateX, &drift),
                ChannelConfig::new(StyleProperty::Scale, &[(0.0, 0.9), (0.5, 1.0), (1.0, 0.9)]),
            ],
        }
    }

    /// Work listing: image slides and rotates, section fades in and out
    pub fn work_showcase() -> Self {
        Self {
            name: "work",
            input: PresetInput::Region(ScrollOffset::ENTER_EXIT),
            channels: vec![
                ChannelConfig::new(StyleProperty::TranslateX, &[(0.0, 100.0), (1.0, -100.0)]),
                ChannelConfig::new(StyleProperty::Rotate, &[(0.0, 5.0), (1.0, -5.0)]),
                ChannelConfig::new(
                    StyleProperty::Opacity,
                    &[(0.0, 0.0), (0.2, 1.0), (0.8, 1.0), (1.0, 0.0)],
                ),
            ],
        }
    }

    /// Call-to-action block rises while it crosses the viewport
    pub fn cta_lift() -> Self {
        Self {
            name: "cta",
            input: PresetInput::Region(ScrollOffset::ENTER_EXIT),
            channels: vec![ChannelConfig::new(StyleProperty::TranslateY, &[(0.0, 0.0), (1.0, -100.0)])],
        }
    }

    /// Case-study hero zooms, blurs and sinks during the first fifth of the page
    pub fn project_hero() -> Self {
        Self {
            name: "project-hero",
            input: PresetInput::Region(ScrollOffset::CONTAIN),
            channels: vec![
                ChannelConfig::new(StyleProperty::Scale, &[(0.0, 1.0), (0.2, 1.1)]),
                ChannelConfig::new(StyleProperty::Blur, &[(0.0, 0.0), (0.2, 10.0)]),
                ChannelConfig::new(StyleProperty::TranslateY, &[(0.0, 0.0), (0.25, 200.0)]),
            ],
        }
    }

    /// Footer slides up and fades in as it is revealed
    pub fn footer_reveal() -> Self {
        Self {
            name: "footer",
            input: PresetInput::Region(ScrollOffset::REVEAL),
            channels: vec![
                ChannelConfig::new(StyleProperty::TranslateY, &[(0.0, 100.0), (1.0, 0.0)]),
                ChannelConfig::new(StyleProperty::Opacity, &[(0.0, 0.0), (0.5, 1.0)]),
            ],
        }
    }
}

/// 3D tilt following a centered pointer position, spring-smoothed per axis
#[derive(Debug, Clone)]
pub struct PointerTilt {
    /// Pointer x drives rotation around the vertical axis
    yaw: ProgressAnimator,
    /// Pointer y drives rotation around the horizontal axis
    pitch: ProgressAnimator,
}

impl PointerTilt {
    /// `max_degrees` of tilt at the container edges
    pub fn new(max_degrees: f64, spring: SpringConfig) -> Result<Self> {
        let smoothing = Smoothing::Spring(spring);
        Ok(Self {
            yaw: ProgressAnimator::new(vec![ChannelConfig::new(
                StyleProperty::RotateY,
                &[(-0.5, -max_degrees), (0.5, max_degrees)],
            )
            .smoothed(smoothing)])?,
            pitch: ProgressAnimator::new(vec![ChannelConfig::new(
                StyleProperty::RotateX,
                &[(-0.5, max_degrees), (0.5, -max_degrees)],
            )
            .smoothed(smoothing)])?,
        })
    }

    /// The hero card: 5 degrees, stiffness 100, damping 30
    pub fn hero() -> Result<Self> {
        Self::new(5.0, SpringConfig::new(100.0, 30.0))
    }

    /// Feed a centered pointer position in [-0.5, 0.5]
    pub fn pointer(&mut self, x: f64, y: f64) {
        self.yaw.set_progress(x);
        self.pitch.set_progress(y);
    }

    /// Step both springs; returns (rotate_x, rotate_y) in degrees
    pub fn advance(&mut self, dt: Duration) -> (f64, f64) {
        let yaw = self.yaw.advance(dt).get(StyleProperty::RotateY);
        let pitch = self.pitch.advance(dt).get(StyleProperty::RotateX);
        (pitch, yaw)
    }

    pub fn is_settled(&self) -> bool {
        self.yaw.is_settled() && self.pitch.is_settled()
    }
}

/// Spring-smoothed offset of a magnetic button
#[derive(Debug, Clone)]
pub struct MagneticPull {
    x: Smoother,
    y: Smoother,
}

impl MagneticPull {
    pub fn new(spring: SpringConfig) -> Self {
        let smoothing = Smoothing::Spring(spring);
        Self {
            x: smoothing.build(0.0),
            y: smoothing.build(0.0),
        }
    }

    /// Raw offset toward the pointer, see `PointerTracker::magnetic_offset`
    pub fn pull(&mut self, (dx, dy): (f64, f64)) {
        self.x.set_target(dx);
        self.y.set_target(dy);
    }

    pub fn advance(&mut self, dt: Duration) -> (f64, f64) {
        (self.x.advance(dt), self.y.advance(dt))
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.x.value(), self.y.value())
    }

    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_build() {
        for preset in MotionPreset::all() {
            assert!(preset.build().is_ok(), "{} failed to build", preset.name);
        }
    }

    #[test]
    fn test_by_name() {
        assert!(MotionPreset::by_name("hero").is_some());
        assert!(MotionPreset::by_name("nope").is_none());
    }

    #[test]
    fn test_work_envelope() {
        let animator = MotionPreset::work_showcase().build().unwrap();
        assert_eq!(animator.style_at(0.0).opacity(), 0.0);
        assert_eq!(animator.style_at(0.5).opacity(), 1.0);
        assert_eq!(animator.style_at(1.0).opacity(), 0.0);
        assert_eq!(animator.style_at(0.5).get(StyleProperty::Rotate), 0.0);
    }

    #[test]
    fn test_project_hero_holds_after_range() {
        let animator = MotionPreset::project_hero().build().unwrap();
        let frame = animator.style_at(0.6);
        assert!((frame.scale() - 1.1).abs() < 1e-9);
        assert_eq!(frame.get(StyleProperty::Blur), 10.0);
        assert_eq!(frame.translate().1, 200.0);
    }

    #[test]
    fn test_magnetic_pull_follows_on_a_spring() {
        let mut pull = MagneticPull::new(SpringConfig::new(100.0, 30.0));
        pull.pull((27.0, -6.0));
        let first = pull.advance(Duration::from_millis(16));
        assert!(first.0 > 0.0 && first.0 < 27.0);
        assert!(first.1 < 0.0 && first.1 > -6.0);

        let mut prev = first.0;
        for _ in 0..300 {
            let (x, _) = pull.advance(Duration::from_millis(16));
            assert!(x >= prev - 1e-9 && x <= 27.0 + 1e-9);
            prev = x;
        }
        assert!((pull.offset().0 - 27.0).abs() < 0.01);
        assert!(pull.is_settled());

        pull.pull((0.0, 0.0));
        pull.advance(Duration::from_millis(16));
        assert!(pull.offset().0 > 0.0);
    }

    #[test]
    fn test_pointer_tilt_direction() {
        let mut tilt = PointerTilt::hero().unwrap();
        assert!(tilt.is_settled());
        tilt.pointer(0.5, 0.5);
        let mut last = (0.0, 0.0);
        for _ in 0..500 {
            last = tilt.advance(Duration::from_millis(16));
        }
        assert!((last.0 + 5.0).abs() < 1e-6, "pitch {}", last.0);
        assert!((last.1 - 5.0).abs() < 1e-6, "yaw {}", last.1);
        assert!(tilt.is_settled());
    }
}
