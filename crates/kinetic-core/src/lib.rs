pub mod config;
pub mod error;
pub mod frame;
pub mod motion;
pub mod scramble;

pub use config::{AppConfig, EasingType, ScrambleConfig, ScrollConfig, SpringConfig};
pub use error::{Error, Result};
pub use frame::{FrameLoop, FrameLoopHandle};
