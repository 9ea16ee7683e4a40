use crate::model::tutorial::StopPoint;

/// Optional host hooks. All methods are fire-and-forget and default to doing nothing.
pub trait HostCallbacks {
    /// The walkthrough started playing.
    fn on_start(&mut self) {}

    /// Playback reached its end.
    fn on_complete(&mut self) {}

    /// The viewer left the area at `area_index` (presentation order) of `stop`.
    fn on_step_advanced(&mut self, stop: &StopPoint, area_index: usize) {
        let _ = (stop, area_index);
    }
}

/// Callbacks that ignore every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCallbacks;

impl HostCallbacks for NoopCallbacks {}

impl<H: HostCallbacks + ?Sized> HostCallbacks for &mut H {
    fn on_start(&mut self) {
        (**self).on_start();
    }

    fn on_complete(&mut self) {
        (**self).on_complete();
    }

    fn on_step_advanced(&mut self, stop: &StopPoint, area_index: usize) {
        (**self).on_step_advanced(stop, area_index);
    }
}
