use wordwheel::WheelEvent;
use wordwheel::input::TimerToken;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Timer(TimerToken),
    Wheel(WheelEvent),
    SettingsReload,
}

impl From<TimerToken> for AppEvent {
    fn from(token: TimerToken) -> Self {
        AppEvent::Timer(token)
    }
}

impl From<WheelEvent> for AppEvent {
    fn from(event: WheelEvent) -> Self {
        AppEvent::Wheel(event)
    }
}
