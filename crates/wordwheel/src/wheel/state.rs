use super::geometry::{self, Point, Ring, SlotGeometry};
use crate::candidate::Candidate;
use crate::config::WheelConfig;
use strum::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
pub enum Phase {
    #[default]
    Hidden,
    Activating,
    Visible,
    Dragging,
}

impl Phase {
    pub fn is_on_screen(&self) -> bool {
        matches!(self, Self::Visible | Self::Dragging)
    }
}

/// Mutable interaction state. Only [`Controller`](super::Controller)
/// writes to it.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub phase: Phase,
    pub candidates: Vec<Candidate>,
    pub hover_index: Option<usize>,
    pub drag_point: Option<Point>,
    pub expanded: bool,
}

impl InteractionState {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn hovered(&self) -> Option<&Candidate> {
        self.hover_index.and_then(|i| self.candidates.get(i))
    }

    /// Back to the initial phase. The candidate list survives.
    pub fn reset(&mut self) {
        self.phase = Phase::Hidden;
        self.hover_index = None;
        self.drag_point = None;
        self.expanded = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSlot {
    pub candidate: Candidate,
    pub ring: Ring,
    pub angle: f64,
    pub position: Point,
    pub hovered: bool,
}

/// Read-only view of the wheel published after every command.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSnapshot {
    pub phase: Phase,
    pub center: Point,
    pub slots: Vec<VisibleSlot>,
    pub hovered: Option<Candidate>,
    pub drag_point: Option<Point>,
    pub expanded: bool,
}

impl WheelSnapshot {
    pub fn capture(state: &InteractionState, config: &WheelConfig) -> Self {
        let window = geometry::visible_window(&state.candidates, state.expanded);
        let slots = window
            .iter()
            .enumerate()
            .filter_map(|(i, candidate)| {
                SlotGeometry::calculate(i, window.len(), config).map(|slot| VisibleSlot {
                    candidate: candidate.clone(),
                    ring: slot.ring,
                    angle: slot.angle,
                    position: slot.center,
                    hovered: state.hover_index == Some(i),
                })
            })
            .collect();

        Self {
            phase: state.phase,
            center: config.center,
            slots,
            hovered: state.hovered().cloned(),
            drag_point: state.drag_point,
            expanded: state.expanded,
        }
    }

    pub fn is_on_screen(&self) -> bool {
        self.phase.is_on_screen()
    }
}
