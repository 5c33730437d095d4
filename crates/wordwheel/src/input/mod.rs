pub mod adapter;
pub mod scale;
pub mod timer;

pub use adapter::InputAdapter;
pub use scale::SurfaceScale;
pub use timer::{ActivationTimer, ManualTimer, TimerToken, TokioTimer};

use crate::wheel::Point;

/// Raw pointer input in render-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel(Point),
}

/// Whether an event should continue to widgets underneath the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Proceed,
    Stop,
}
