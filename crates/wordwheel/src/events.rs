use crate::candidate::Candidate;
use crate::wheel::WheelHooks;
use async_channel::{Sender, TrySendError};
use strum::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum HapticPulse {
    /// The wheel just opened under the finger.
    Opened,
    /// The hover moved onto a different candidate.
    Moved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    Activated,
    Hidden,
    WordSelected(Candidate),
    Haptic(HapticPulse),
}

/// Hooks that forward every lifecycle event over a channel.
///
/// Sends never block: a full or closed channel drops the event with a warning.
pub struct ChannelHooks<E> {
    tx: Sender<E>,
}

impl<E> ChannelHooks<E>
where
    E: From<WheelEvent>,
{
    pub fn new(tx: Sender<E>) -> Self {
        Self { tx }
    }

    fn forward(&self, event: WheelEvent) {
        match self.tx.try_send(E::from(event)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::warn!("wheel event channel full, event dropped"),
            Err(TrySendError::Closed(_)) => log::warn!("wheel event channel closed"),
        }
    }
}

impl<E> WheelHooks for ChannelHooks<E>
where
    E: From<WheelEvent>,
{
    fn on_activated(&mut self) {
        self.forward(WheelEvent::Activated);
    }

    fn on_hidden(&mut self) {
        self.forward(WheelEvent::Hidden);
    }

    fn on_word_selected(&mut self, candidate: &Candidate) {
        self.forward(WheelEvent::WordSelected(candidate.clone()));
    }

    fn haptic(&mut self, pulse: HapticPulse) {
        self.forward(WheelEvent::Haptic(pulse));
    }
}
