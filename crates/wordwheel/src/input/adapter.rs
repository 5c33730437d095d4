use super::scale::SurfaceScale;
use super::timer::{ActivationTimer, TimerToken};
use super::{PointerEvent, Propagation};
use crate::config::{ConfigError, WheelConfig};
use crate::events::HapticPulse;
use crate::wheel::{Controller, Point, Size, WheelHooks};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Hold {
    Idle,
    Pending { token: TimerToken, point: Point },
    Fired,
}

/// Turns raw pointer events into controller commands.
///
/// Owns the activation timer and the surface-to-logical rescale; the
/// interaction state itself stays inside the controller.
pub struct InputAdapter<T: ActivationTimer> {
    controller: Controller,
    timer: T,
    logical: Size,
    scale: SurfaceScale,
    hold: Hold,
    last_token: TimerToken,
}

impl<T: ActivationTimer> InputAdapter<T> {
    /// `logical` is the surface size the controller's config was laid out for.
    pub fn new(controller: Controller, timer: T, logical: Size) -> Self {
        Self {
            controller,
            timer,
            logical,
            scale: SurfaceScale::IDENTITY,
            hold: Hold::Idle,
            last_token: TimerToken::new(0),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn logical_size(&self) -> Size {
        self.logical
    }

    pub fn scale(&self) -> SurfaceScale {
        self.scale
    }

    /// True between the activation firing and the end of the touch.
    pub fn is_holding(&self) -> bool {
        self.hold == Hold::Fired
    }

    /// True while a touch is down that has fired or may still fire.
    pub fn is_touch_active(&self) -> bool {
        self.hold != Hold::Idle
    }

    /// Records the size the surface was actually measured at.
    pub fn set_surface_size(&mut self, measured: Size) {
        self.scale = SurfaceScale::between(self.logical, measured);
        log::debug!("surface {:?} -> logical {:?}, scale {:?}", measured, self.logical, self.scale);
    }

    pub fn handle(&mut self, event: PointerEvent) -> Propagation {
        if self.controller.is_disposed() {
            return Propagation::Proceed;
        }
        match event {
            PointerEvent::Down(p) => self.on_down(p),
            PointerEvent::Move(p) => self.on_move(p),
            PointerEvent::Up(_) => self.on_up(),
            PointerEvent::Cancel(_) => self.on_cancel(),
        }
    }

    /// Delivers a timer fire. Stale or cancelled tokens are ignored.
    pub fn on_timer(&mut self, token: TimerToken) {
        let point = match self.hold {
            Hold::Pending { token: pending, point } if pending == token => point,
            _ => {
                log::trace!("stale activation timer {:?} ignored", token);
                return;
            }
        };

        self.hold = Hold::Fired;
        self.controller.pulse(HapticPulse::Opened);
        self.controller.activate(point);
        self.controller.show();
    }

    /// Replaces the controller after a logical size change.
    ///
    /// The old timer is cancelled and the old controller disposed before
    /// the new one is built; subscribers must register again. The word
    /// list carries over.
    pub fn rebuild(
        &mut self,
        config: WheelConfig,
        logical: Size,
        hooks: impl WheelHooks + 'static,
    ) -> Result<(), ConfigError> {
        config.validate()?;

        self.cancel_timer();
        self.hold = Hold::Idle;
        let candidates = self.controller.state().candidates.clone();
        self.controller.dispose();

        self.controller = Controller::new(config, candidates, hooks)?;
        self.logical = logical;
        self.scale = SurfaceScale::IDENTITY;
        Ok(())
    }

    pub fn dispose(&mut self) {
        self.cancel_timer();
        self.hold = Hold::Idle;
        self.controller.dispose();
    }

    fn on_down(&mut self, point: Point) -> Propagation {
        self.cancel_timer();
        // lost up or a second pointer: the live hold ends without a selection
        if self.hold == Hold::Fired {
            log::debug!("touch down during a live hold, dismissing wheel");
            self.hold = Hold::Idle;
            self.controller.hide();
        }
        let token = self.last_token.next();
        self.last_token = token;
        self.hold = Hold::Pending {
            token,
            point: self.scale.apply(point),
        };
        self.timer
            .start(token, self.controller.config().activation_delay);
        Propagation::Proceed
    }

    fn on_move(&mut self, point: Point) -> Propagation {
        if self.hold != Hold::Fired {
            return Propagation::Proceed;
        }
        self.controller.update_drag(self.scale.apply(point));
        Propagation::Stop
    }

    fn on_up(&mut self) -> Propagation {
        self.cancel_timer();
        match std::mem::replace(&mut self.hold, Hold::Idle) {
            Hold::Fired => {
                self.controller.release();
                Propagation::Stop
            }
            _ => Propagation::Proceed,
        }
    }

    fn on_cancel(&mut self) -> Propagation {
        self.cancel_timer();
        match std::mem::replace(&mut self.hold, Hold::Idle) {
            Hold::Fired => {
                self.controller.hide();
                Propagation::Stop
            }
            _ => Propagation::Proceed,
        }
    }

    fn cancel_timer(&mut self) {
        if let Hold::Pending { token, .. } = self.hold {
            self.timer.cancel(token);
            self.hold = Hold::Idle;
        }
    }
}

impl<T: ActivationTimer> Drop for InputAdapter<T> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
