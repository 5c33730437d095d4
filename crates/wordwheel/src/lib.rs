pub mod candidate;
pub mod config;
pub mod events;
pub mod input;
mod macros;
pub mod settings;
pub mod wheel;

pub use crate::candidate::Candidate;
pub use crate::config::{ConfigError, Radii, Thresholds, WheelConfig};
pub use crate::events::{ChannelHooks, HapticPulse, WheelEvent};
pub use crate::input::{InputAdapter, PointerEvent, Propagation};
pub use crate::wheel::{Controller, Phase, Point, Size, WheelHooks, WheelSnapshot};
