use super::geometry::{self, Point};
use super::state::{InteractionState, Phase, WheelSnapshot};
use crate::candidate::Candidate;
use crate::config::{ConfigError, WheelConfig};
use crate::events::HapticPulse;

/// Lifecycle callbacks fired by the controller.
///
/// All methods run synchronously on the thread issuing the command.
pub trait WheelHooks {
    fn on_activated(&mut self) {}
    fn on_hidden(&mut self) {}
    fn on_word_selected(&mut self, _candidate: &Candidate) {}
    fn haptic(&mut self, _pulse: HapticPulse) {}
}

pub struct NoHooks;

impl WheelHooks for NoHooks {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&WheelSnapshot)>;

pub struct Controller {
    config: WheelConfig,
    state: InteractionState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    hooks: Box<dyn WheelHooks>,
    disposed: bool,
}

impl Controller {
    pub fn new(
        config: WheelConfig,
        candidates: Vec<Candidate>,
        hooks: impl WheelHooks + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: InteractionState::new(candidates),
            subscribers: Vec::new(),
            next_subscription: 0,
            hooks: Box::new(hooks),
            disposed: false,
        })
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot::capture(&self.state, &self.config)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&WheelSnapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if !self.disposed {
            self.subscribers.push((id, Box::new(subscriber)));
        }
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Starts a touch sequence at `point`. Only the hidden wheel reacts.
    pub fn activate(&mut self, point: Point) {
        if self.ignored("activate") {
            return;
        }
        let fresh = self.state.phase == Phase::Hidden;
        if fresh {
            self.set_phase(Phase::Activating);
            self.state.drag_point = Some(point);
        } else {
            log::trace!("activate ignored while {}", self.state.phase);
        }
        self.notify();
        if fresh {
            self.hooks.on_activated();
        }
    }

    pub fn show(&mut self) {
        if self.ignored("show") {
            return;
        }
        self.set_phase(Phase::Visible);
        self.notify();
    }

    pub fn update_drag(&mut self, point: Point) {
        if self.ignored("update_drag") {
            return;
        }
        if matches!(self.state.phase, Phase::Activating | Phase::Visible) {
            self.set_phase(Phase::Dragging);
        }
        self.state.drag_point = Some(point);

        let d = geometry::elliptical_distance(point, &self.config);
        let expanded = geometry::next_expansion(
            d,
            self.state.candidates.len(),
            self.state.expanded,
            &self.config,
        );
        if expanded != self.state.expanded {
            log::debug!("wheel {}", if expanded { "expanded" } else { "collapsed" });
            self.state.expanded = expanded;
        }

        let moved = self.rehover();
        self.notify();
        if moved {
            self.hooks.haptic(HapticPulse::Moved);
        }
    }

    /// Dismisses the wheel, selecting whatever was hovered at the moment of release.
    pub fn release(&mut self) {
        if self.ignored("release") {
            return;
        }
        let selected = self.state.hovered().cloned();
        self.hide();
        if let Some(candidate) = selected {
            log::debug!("selected '{}'", candidate.text);
            self.hooks.on_word_selected(&candidate);
        }
    }

    pub fn hide(&mut self) {
        if self.ignored("hide") {
            return;
        }
        self.set_phase(Phase::Hidden);
        self.state.reset();
        self.notify();
        self.hooks.on_hidden();
    }

    /// Replaces the ranked list. An active drag is re-resolved against the
    /// new words without waiting for the finger to move.
    pub fn update_words(&mut self, candidates: Vec<Candidate>) {
        if self.ignored("update_words") {
            return;
        }
        self.state.candidates = candidates;
        let moved = self.rehover();
        self.notify();
        if moved {
            self.hooks.haptic(HapticPulse::Moved);
        }
    }

    /// Forwards a haptic request to the hooks. Not a state change.
    pub fn pulse(&mut self, pulse: HapticPulse) {
        if !self.ignored("pulse") {
            self.hooks.haptic(pulse);
        }
    }

    /// Drops subscribers and hooks; every later command is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("disposing wheel controller");
        self.disposed = true;
        self.subscribers.clear();
        self.hooks = Box::new(NoHooks);
    }

    /// Recomputes the hovered candidate from the recorded drag point.
    /// Returns true when the hover moved to another slot or another word.
    fn rehover(&mut self) -> bool {
        let previous = self
            .state
            .hovered()
            .map(|c| c.id.clone())
            .zip(self.state.hover_index);
        self.state.hover_index = self.state.drag_point.and_then(|point| {
            geometry::hit_test(point, &self.state.candidates, self.state.expanded, &self.config)
                .map(|hit| hit.index)
        });
        let current = self.state.hovered().map(|c| c.id.clone()).zip(self.state.hover_index);
        current.is_some() && current != previous
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            log::debug!("wheel phase {} -> {}", self.state.phase, phase);
            self.state.phase = phase;
        }
    }

    fn ignored(&self, command: &str) -> bool {
        if self.disposed {
            log::trace!("{} on disposed controller ignored", command);
        }
        self.disposed
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = WheelSnapshot::capture(&self.state, &self.config);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WheelEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<WheelEvent>>>);

    impl WheelHooks for Recorder {
        fn on_activated(&mut self) {
            self.0.borrow_mut().push(WheelEvent::Activated);
        }
        fn on_hidden(&mut self) {
            self.0.borrow_mut().push(WheelEvent::Hidden);
        }
        fn on_word_selected(&mut self, candidate: &Candidate) {
            self.0
                .borrow_mut()
                .push(WheelEvent::WordSelected(candidate.clone()));
        }
        fn haptic(&mut self, pulse: HapticPulse) {
            self.0.borrow_mut().push(WheelEvent::Haptic(pulse));
        }
    }

    impl Recorder {
        fn events(&self) -> Vec<WheelEvent> {
            self.0.borrow().clone()
        }

        fn selections(&self) -> Vec<String> {
            self.0
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    WheelEvent::WordSelected(c) => Some(c.text.to_string()),
                    _ => None,
                })
                .collect()
        }
    }

    fn words(list: &[&str]) -> Vec<Candidate> {
        list.iter().map(|w| Candidate::word(*w)).collect()
    }

    struct Harness {
        controller: Controller,
        hooks: Recorder,
        snapshots: Rc<RefCell<Vec<WheelSnapshot>>>,
    }

    impl Harness {
        fn new(candidates: Vec<Candidate>) -> Self {
            let hooks = Recorder::default();
            let mut controller =
                Controller::new(WheelConfig::default(), candidates, hooks.clone()).unwrap();
            let snapshots = Rc::new(RefCell::new(Vec::new()));
            let sink = snapshots.clone();
            controller.subscribe(move |s| sink.borrow_mut().push(s.clone()));
            Self {
                controller,
                hooks,
                snapshots,
            }
        }

        fn open(&mut self, point: Point) {
            self.controller.activate(point);
            self.controller.show();
        }

        fn last(&self) -> WheelSnapshot {
            self.snapshots.borrow().last().cloned().unwrap()
        }

        fn notifications(&self) -> usize {
            self.snapshots.borrow().len()
        }
    }

    fn five() -> Vec<Candidate> {
        words(&["I", "want", "more", "help", "please"])
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = WheelConfig {
            dead_zone: 500.0,
            ..WheelConfig::default()
        };
        assert!(Controller::new(config, Vec::new(), NoHooks).is_err());
    }

    #[test]
    fn test_select_top_slot_on_release() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 100.0));
        h.controller.update_drag(Point::new(200.0, 100.0));

        let snap = h.last();
        assert_eq!(snap.phase, Phase::Dragging);
        assert_eq!(snap.hovered.as_ref().map(|c| c.text.as_str()), Some("I"));
        assert!(!snap.expanded);

        h.controller.release();
        assert_eq!(h.hooks.selections(), vec!["I".to_string()]);
        assert_eq!(h.controller.phase(), Phase::Hidden);
    }

    #[test]
    fn test_dead_zone_clears_hover() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 200.0));
        h.controller.update_drag(Point::new(200.0, 100.0));
        assert!(h.last().hovered.is_some());

        h.controller.update_drag(Point::new(200.0, 205.0));
        assert!(h.last().hovered.is_none());

        h.controller.release();
        assert!(h.hooks.selections().is_empty());
        assert_eq!(h.hooks.events().last(), Some(&WheelEvent::Hidden));
    }

    #[test]
    fn test_hide_resets_from_every_phase_and_is_idempotent() {
        let steps: [fn(&mut Controller); 4] = [
            |_| {},
            |c| c.activate(Point::new(200.0, 100.0)),
            |c| {
                c.activate(Point::new(200.0, 100.0));
                c.show();
            },
            |c| {
                c.activate(Point::new(200.0, 100.0));
                c.show();
                c.update_drag(Point::new(200.0, 10.0));
            },
        ];

        for step in steps {
            let mut h = Harness::new(words(&["a", "b", "c", "d", "e", "f"]));
            step(&mut h.controller);
            h.controller.hide();
            let once = h.last();
            h.controller.hide();
            let twice = h.last();

            assert_eq!(once.phase, Phase::Hidden);
            assert!(once.hovered.is_none());
            assert!(once.drag_point.is_none());
            assert!(!once.expanded);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_one_notification_per_command() {
        let mut h = Harness::new(five());
        h.controller.activate(Point::new(200.0, 120.0));
        assert_eq!(h.notifications(), 1);
        h.controller.show();
        assert_eq!(h.notifications(), 2);
        h.controller.update_drag(Point::new(200.0, 100.0));
        assert_eq!(h.notifications(), 3);
        h.controller.update_words(words(&["x", "y"]));
        assert_eq!(h.notifications(), 4);
        h.controller.activate(Point::new(0.0, 0.0));
        assert_eq!(h.notifications(), 5);
        h.controller.release();
        assert_eq!(h.notifications(), 6);
        h.controller.hide();
        assert_eq!(h.notifications(), 7);
    }

    #[test]
    fn test_release_publishes_final_state_only() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 100.0));
        h.controller.update_drag(Point::new(200.0, 100.0));
        let before = h.notifications();

        h.controller.release();
        assert_eq!(h.notifications(), before + 1);
        let snap = h.last();
        assert_eq!(snap.phase, Phase::Hidden);
        assert!(snap.hovered.is_none());
    }

    #[test]
    fn test_activate_only_from_hidden() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 100.0));
        h.controller.activate(Point::new(10.0, 10.0));

        assert_eq!(h.controller.phase(), Phase::Visible);
        assert_eq!(h.last().drag_point, Some(Point::new(200.0, 100.0)));
        let activations = h
            .hooks
            .events()
            .iter()
            .filter(|e| **e == WheelEvent::Activated)
            .count();
        assert_eq!(activations, 1);
    }

    #[test]
    fn test_update_words_rehovers_mid_drag() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 200.0));
        h.controller.update_drag(Point::new(300.0, 200.0));
        assert_eq!(
            h.last().hovered.map(|c| c.text.to_string()),
            Some("want".into())
        );
        let before = h.notifications();

        h.controller.update_words(words(&["yes", "no", "maybe", "stop"]));
        assert_eq!(h.notifications(), before + 1);
        let snap = h.last();
        assert_eq!(snap.phase, Phase::Dragging);
        assert_eq!(snap.hovered.map(|c| c.text.to_string()), Some("no".into()));

        h.controller.release();
        assert_eq!(h.hooks.selections(), vec!["no".to_string()]);
    }

    #[test]
    fn test_update_words_without_drag_leaves_hover_empty() {
        let mut h = Harness::new(five());
        h.controller.update_words(words(&["a"]));
        assert_eq!(h.last().phase, Phase::Hidden);
        assert!(h.last().hovered.is_none());
        assert_eq!(h.last().slots.len(), 1);
    }

    #[test]
    fn test_update_words_to_empty_drops_hover() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 100.0));
        h.controller.update_drag(Point::new(200.0, 100.0));
        h.controller.update_words(Vec::new());
        assert!(h.last().hovered.is_none());
        h.controller.release();
        assert!(h.hooks.selections().is_empty());
    }

    #[test]
    fn test_expands_and_collapses_while_dragging() {
        let mut h = Harness::new(words(&[
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l",
        ]));
        h.open(Point::new(200.0, 200.0));

        h.controller.update_drag(Point::new(200.0, 30.0));
        let snap = h.last();
        assert!(snap.expanded);
        assert_eq!(snap.slots.len(), 12);
        assert_eq!(snap.hovered.map(|c| c.text.to_string()), Some("e".into()));

        // between the collapse distance and the expand threshold
        h.controller.update_drag(Point::new(200.0, 100.0));
        assert!(h.last().expanded);
        assert_eq!(
            h.last().hovered.map(|c| c.text.to_string()),
            Some("a".into())
        );

        h.controller.update_drag(Point::new(200.0, 140.0));
        let snap = h.last();
        assert!(!snap.expanded);
        assert_eq!(snap.slots.len(), 4);
        assert_eq!(snap.hovered.map(|c| c.text.to_string()), Some("a".into()));
    }

    #[test]
    fn test_few_candidates_never_expand() {
        let mut h = Harness::new(words(&["a", "b", "c", "d"]));
        h.open(Point::new(200.0, 200.0));
        h.controller.update_drag(Point::new(200.0, 30.0));
        assert!(!h.last().expanded);
    }

    #[test]
    fn test_haptic_only_on_new_candidate() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 200.0));
        let pulses = |h: &Harness| {
            h.hooks
                .events()
                .iter()
                .filter(|e| **e == WheelEvent::Haptic(HapticPulse::Moved))
                .count()
        };

        h.controller.update_drag(Point::new(200.0, 100.0));
        assert_eq!(pulses(&h), 1);
        h.controller.update_drag(Point::new(205.0, 100.0));
        assert_eq!(pulses(&h), 1);
        h.controller.update_drag(Point::new(200.0, 200.0));
        assert_eq!(pulses(&h), 1);
        h.controller.update_drag(Point::new(300.0, 200.0));
        assert_eq!(pulses(&h), 2);
    }

    #[test]
    fn test_haptic_between_slots_sharing_an_id() {
        let same = |text: &str| Candidate::new("dup", text, 0.0);
        let mut h = Harness::new(vec![same("go"), same("go"), same("go"), same("go")]);
        h.open(Point::new(200.0, 200.0));

        h.controller.update_drag(Point::new(200.0, 100.0));
        h.controller.update_drag(Point::new(300.0, 200.0));
        let pulses = h
            .hooks
            .events()
            .iter()
            .filter(|e| **e == WheelEvent::Haptic(HapticPulse::Moved))
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn test_empty_list_opens_and_closes() {
        let mut h = Harness::new(Vec::new());
        h.open(Point::new(200.0, 200.0));
        assert!(h.last().is_on_screen());
        h.controller.update_drag(Point::new(200.0, 100.0));
        assert!(h.last().hovered.is_none());
        h.controller.release();
        assert!(h.hooks.selections().is_empty());
        assert_eq!(
            h.hooks.events(),
            vec![WheelEvent::Activated, WheelEvent::Hidden]
        );
    }

    #[test]
    fn test_disposed_controller_ignores_commands() {
        let mut h = Harness::new(five());
        h.open(Point::new(200.0, 100.0));
        let seen = h.notifications();
        let events = h.hooks.events().len();

        h.controller.dispose();
        h.controller.update_drag(Point::new(200.0, 100.0));
        h.controller.release();
        h.controller.hide();
        h.controller.update_words(Vec::new());

        assert!(h.controller.is_disposed());
        assert_eq!(h.notifications(), seen);
        assert_eq!(h.hooks.events().len(), events);
        assert_eq!(h.controller.phase(), Phase::Visible);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut h = Harness::new(five());
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let id = h.controller.subscribe(move |_| *c.borrow_mut() += 1);

        h.controller.activate(Point::new(200.0, 100.0));
        assert!(h.controller.unsubscribe(id));
        h.controller.show();

        assert_eq!(*count.borrow(), 1);
        assert!(!h.controller.unsubscribe(id));
    }
}
