use crate::device::EventSource;
use crate::event::{DeviceCoord, DeviceEvent};

/// Scripted event source: queued events are returned by the next `poll`.
#[derive(Debug, Default)]
pub struct VirtualDevice {
    name: String,
    events: Vec<DeviceEvent>,
}

impl VirtualDevice {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            events: Vec::new(),
        }
    }

    /// Inject a raw event.
    pub fn feed(&mut self, event: DeviceEvent) {
        self.events.push(event);
    }

    pub fn press_key(&mut self, code: u16) {
        self.feed(DeviceEvent::new(DeviceCoord::key(code), 1));
    }

    pub fn release_key(&mut self, code: u16) {
        self.feed(DeviceEvent::new(DeviceCoord::key(code), 0));
    }

    /// Convenience for stick motion; the sign of `value` picks the axis half.
    pub fn move_axis(&mut self, stick: u16, axis: u8, value: i32) {
        self.feed(DeviceEvent::new(DeviceCoord::stick_axis(stick, axis, value > 0), value));
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for VirtualDevice {
    fn poll(&mut self) -> Vec<DeviceEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
