use std::f64::consts::PI;

pub mod controller;
pub mod geometry;
pub mod state;

pub use controller::{Controller, NoHooks, SubscriptionId, WheelHooks};
pub use geometry::{Hit, Point, Ring, Size, SlotGeometry};
pub use state::{InteractionState, Phase, VisibleSlot, WheelSnapshot};

pub const INNER_SLOTS: usize = 4;
pub const OUTER_SLOTS: usize = 8;
pub const COLLAPSED_WINDOW: usize = INNER_SLOTS;
pub const EXPANDED_WINDOW: usize = INNER_SLOTS + OUTER_SLOTS;
pub const START_OFFSET: f64 = -PI / 2.0; // slot 0 at the top, then clockwise
