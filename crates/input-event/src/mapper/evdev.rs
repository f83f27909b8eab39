impl From<crate::InputEvent> for evdev::InputEvent {
    fn from(value: crate::InputEvent) -> Self {
        evdev::InputEvent::new(evdev::EventType(value.event_type), value.code, value.value)
    }
}

impl From<evdev::InputEvent> for crate::InputEvent {
    fn from(value: evdev::InputEvent) -> Self {
        crate::InputEvent::new(value.event_type().0, value.code(), value.value())
    }
}
