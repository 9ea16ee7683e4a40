use crate::playback::source::SourceHandle;
use crate::playback::surface::{PlaybackSurface, SurfaceEvent};

/// Deterministic, headless playback surface.
///
/// Time only moves when [`SimulatedSurface::advance`] is called, which makes it suitable for tests
/// and for driving sessions from the command line.
#[derive(Clone, Debug)]
pub struct SimulatedSurface {
    media_duration: f64,
    natural_size: (u32, u32),
    source: Option<String>,
    current_time: f64,
    duration_reported: bool,
    ready_reported: bool,
    playing: bool,
    ended: bool,
}

impl SimulatedSurface {
    /// A surface whose media lasts `duration` seconds at the given natural frame size.
    pub fn new(duration: f64, width: u32, height: u32) -> Self {
        Self {
            media_duration: duration.max(0.0),
            natural_size: (width, height),
            source: None,
            current_time: 0.0,
            duration_reported: false,
            ready_reported: false,
            playing: false,
            ended: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn loaded_url(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Advance the media clock by `dt` seconds and return the notifications a real element would
    /// have emitted over that span.
    pub fn advance(&mut self, dt: f64) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        if self.source.is_none() {
            return events;
        }
        if !self.duration_reported {
            self.duration_reported = true;
            events.push(SurfaceEvent::DurationKnown(self.media_duration));
        }
        if !self.ready_reported {
            self.ready_reported = true;
            let (width, height) = self.natural_size;
            events.push(SurfaceEvent::Ready { width, height });
        }
        if !self.playing || self.ended {
            return events;
        }

        self.current_time = (self.current_time + dt.max(0.0)).min(self.media_duration);
        events.push(SurfaceEvent::TimeUpdate(self.current_time));
        if self.current_time >= self.media_duration {
            self.ended = true;
            self.playing = false;
            events.push(SurfaceEvent::Ended);
        }
        events
    }
}

impl PlaybackSurface for SimulatedSurface {
    fn load(&mut self, source: &SourceHandle) {
        self.source = Some(source.url().to_owned());
        self.current_time = 0.0;
        self.duration_reported = false;
        self.ready_reported = false;
        self.playing = false;
        self.ended = false;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = time.clamp(0.0, self.media_duration);
        if self.current_time < self.media_duration {
            self.ended = false;
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration_reported.then_some(self.media_duration)
    }

    fn play(&mut self) {
        if self.source.is_some() && !self.ended {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}
