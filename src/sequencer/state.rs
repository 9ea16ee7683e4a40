#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
/// Coarse sequencer state derived from [`SessionState`].
pub enum Phase {
    /// Not started yet (or rewound by a replay).
    Idle,
    /// Playing with no stop point active.
    Playing,
    /// Paused on a stop point, showing an area.
    PausedAtStop {
        /// An acknowledgment is settling; further acknowledgments are ignored.
        closing: bool,
    },
    /// Playback reached its natural end.
    Finished,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Progress of one viewing session. Only the sequencer mutates it.
pub struct SessionState {
    pub started: bool,
    pub finished: bool,
    /// Cursor into the stop point list; never moves backwards within a run.
    pub next_stop_index: usize,
    /// Index of the stop point currently shown, if any.
    pub active_stop: Option<usize>,
    /// Presentation index (ascending `order`) of the area shown.
    pub active_area_index: usize,
    pub bubble_closing: bool,
    pub playing: bool,
    /// Displayed time cursor in seconds.
    pub current_time: f64,
    /// Media duration in seconds; 0 while unknown.
    pub duration: f64,
}

impl SessionState {
    /// Fresh state with every cursor at zero, for media of the given duration.
    pub fn initial(duration: f64) -> Self {
        Self {
            started: false,
            finished: false,
            next_stop_index: 0,
            active_stop: None,
            active_area_index: 0,
            bubble_closing: false,
            playing: false,
            current_time: 0.0,
            duration,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if !self.started {
            Phase::Idle
        } else if self.active_stop.is_some() {
            Phase::PausedAtStop {
                closing: self.bubble_closing,
            }
        } else {
            Phase::Playing
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial(0.0)
    }
}
