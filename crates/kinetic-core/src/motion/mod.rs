//! Scroll- and pointer-driven motion
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - Pure easing curves
//! - `timing` - Progress and interpolation helpers
//! - `transform` - Control-point tables mapping an input onto an output
//! - `progress` - Scroll and pointer geometry turned into progress fractions
//! - `smoothing` - Spring and exponential smoothing stages
//!
//! ## Molecules
//! - `animator` - Several style channels driven by one progress value
//! - `scroll` - Smooth page scrolling
//! - `presets` - The recurring page effects as ready-made channel tables
//!
//! # Usage
//!
//! ```ignore
//! use kinetic_core::motion::{ChannelConfig, ProgressAnimator, ScrollTracker, Region, ScrollOffset, StyleProperty, Viewport};
//!
//! let mut tracker = ScrollTracker::region(Region::new(1200.0, 400.0), ScrollOffset::ENTER_EXIT);
//! let mut animator = ProgressAnimator::new(vec![
//!     ChannelConfig::new(StyleProperty::TranslateY, &[(0.0, 0.0), (1.0, -100.0)]),
//! ])?;
//!
//! // on every scroll event
//! animator.set_progress(tracker.update(&viewport));
//! // once per frame
//! let style = animator.advance(frame_delta);
//! ```

pub mod easing;
pub mod progress;
pub mod smoothing;
pub mod timing;
pub mod transform;

pub mod animator;
pub mod presets;
pub mod scroll;

pub use animator::{ChannelConfig, ProgressAnimator, StyleFrame, StyleProperty};
pub use easing::EasingType;
pub use presets::{MagneticPull, MotionPreset, PointerTilt, PresetInput};
pub use progress::{
    Bounds, Edge, Intersection, Normalization, PointerTracker, Region, ScrollOffset, ScrollTracker,
    Viewport,
};
pub use scroll::SmoothScroll;
pub use smoothing::{ExponentialSmoother, Smoother, Smoothing, Spring};
pub use transform::{ControlPoint, Interpolation, Transform};
