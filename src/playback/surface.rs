use crate::playback::source::SourceHandle;

/// The video element the walkthrough is layered on, treated as a black box.
///
/// Implementations forward their notifications to the player as [`SurfaceEvent`]s.
pub trait PlaybackSurface {
    /// Load a new source; duration becomes unknown until reported again.
    fn load(&mut self, source: &SourceHandle);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);
    /// Media duration in seconds, once known.
    fn duration(&self) -> Option<f64>;
    fn play(&mut self);
    fn pause(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Notifications emitted by a playback surface.
pub enum SurfaceEvent {
    /// Metadata arrived; duration in seconds.
    DurationKnown(f64),
    /// The current time moved.
    TimeUpdate(f64),
    /// Playback reached the end of the media.
    Ended,
    /// First frame decoded; natural frame size in pixels.
    Ready { width: u32, height: u32 },
}
