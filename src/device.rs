use crate::event::DeviceEvent;

/// A producer of device events (platform layer, scripted input, replay).
pub trait EventSource {
    /// Drain every event that arrived since the last poll, oldest first.
    fn poll(&mut self) -> Vec<DeviceEvent>;
    fn name(&self) -> &str;
}
