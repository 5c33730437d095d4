use async_channel::Sender;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Identifies one scheduled activation. A fire is honoured only if its
/// token is still the one the adapter is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A one-shot timer the input adapter schedules activations on.
///
/// Implementations deliver a fire by handing the token back to
/// [`InputAdapter::on_timer`](super::InputAdapter::on_timer).
pub trait ActivationTimer {
    fn start(&mut self, token: TimerToken, delay: Duration);
    fn cancel(&mut self, token: TimerToken);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    token: TimerToken,
    remaining: Duration,
}

/// Timer advanced by the host's own clock.
#[derive(Debug, Default)]
pub struct ManualTimer {
    pending: Option<Pending>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    /// Moves time forward by `elapsed` and returns the token if it came due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<TimerToken> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        if pending.remaining.is_zero() {
            self.pending.take().map(|p| p.token)
        } else {
            None
        }
    }
}

impl ActivationTimer for ManualTimer {
    fn start(&mut self, token: TimerToken, delay: Duration) {
        self.pending = Some(Pending {
            token,
            remaining: delay,
        });
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.pending.is_some_and(|p| p.token == token) {
            self.pending = None;
        }
    }
}

/// Sleeps on a tokio runtime and posts the token back over a channel,
/// so the fire is handled on whichever thread drains the receiver.
pub struct TokioTimer<E> {
    handle: Handle,
    tx: Sender<E>,
    task: Option<(TimerToken, JoinHandle<()>)>,
}

impl<E> TokioTimer<E>
where
    E: From<TimerToken> + Send + 'static,
{
    pub fn new(handle: Handle, tx: Sender<E>) -> Self {
        Self {
            handle,
            tx,
            task: None,
        }
    }

    fn abort(&mut self) {
        if let Some((_, task)) = self.task.take() {
            task.abort();
        }
    }
}

impl<E> ActivationTimer for TokioTimer<E>
where
    E: From<TimerToken> + Send + 'static,
{
    fn start(&mut self, token: TimerToken, delay: Duration) {
        self.abort();
        let tx = self.tx.clone();
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(E::from(token)).await.is_err() {
                log::trace!("activation timer fired after receiver closed");
            }
        });
        self.task = Some((token, task));
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.task.as_ref().is_some_and(|(t, _)| *t == token) {
            self.abort();
        }
    }
}

impl<E> Drop for TokioTimer<E> {
    fn drop(&mut self) {
        if let Some((_, task)) = self.task.take() {
            task.abort();
        }
    }
}
