use std::sync::Arc;

use smallvec::{SmallVec, smallvec};

use crate::model::tutorial::{InteractionArea, StopPoint, TutorialData};
use crate::playback::monitor::{TickOutcome, observe_tick};
use crate::sequencer::state::SessionState;
use crate::sequencer::timer::SettleToken;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Inputs to the sequencer. Each variant has exactly one transition.
pub enum TourEvent {
    /// The viewer pressed start.
    Start,
    /// The playback surface reported a new current time.
    TimeUpdate(f64),
    /// The playback surface learned the media duration.
    DurationKnown(f64),
    /// The viewer acknowledged the area being shown.
    Acknowledge,
    /// The settle delay armed by an acknowledgment elapsed.
    SettleElapsed(SettleToken),
    /// Playback reached its natural end.
    Ended,
    /// Rewind to the beginning without playing.
    Replay,
    /// The video source or tutorial data was replaced. Stops and rewinds playback.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// Host-facing notifications.
pub enum Notification {
    /// Fired once when the walkthrough starts.
    Started,
    /// Fired when the viewer leaves an area; carries the state at acknowledgment time.
    StepAdvanced {
        /// Index of the active stop point.
        stop_index: usize,
        /// Presentation index of the area being left.
        area_index: usize,
    },
    /// Fired once per run when playback ends.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Side effects requested by a transition, in the order they must be applied.
pub enum Effect {
    /// Resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Move the playback cursor (seconds).
    Seek(f64),
    /// Arm the settle timer.
    ScheduleSettle(SettleToken),
    /// Drop any pending settle callback.
    CancelSettle,
    /// Deliver a host notification.
    Notify(Notification),
}

/// Effects produced by one transition.
pub type Effects = SmallVec<[Effect; 4]>;

/// Interaction sequencing state machine.
///
/// Owns the session state for one tutorial and advances it with [`Sequencer::handle`]. The
/// sequencer never touches the playback surface or the host directly; it returns [`Effects`] for
/// the caller to apply.
#[derive(Clone, Debug)]
pub struct Sequencer {
    data: Arc<TutorialData>,
    state: SessionState,
    generation: u64,
}

impl Sequencer {
    pub fn new(data: Arc<TutorialData>) -> Self {
        Self {
            data,
            state: SessionState::initial(0.0),
            generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tutorial(&self) -> &Arc<TutorialData> {
        &self.data
    }

    /// Session token; bumped by every reset, replay and end of playback.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_stop(&self) -> Option<&StopPoint> {
        self.data.stop_points.get(self.state.active_stop?)
    }

    /// The area being shown, in presentation order. `None` when nothing is active or the index
    /// does not resolve (malformed data).
    pub fn active_area(&self) -> Option<&InteractionArea> {
        self.active_stop()?.area_at(self.state.active_area_index)
    }

    /// Apply one event and return the effects it requests.
    pub fn handle(&mut self, event: TourEvent) -> Effects {
        match event {
            TourEvent::Start => self.start(),
            TourEvent::TimeUpdate(t) => self.time_update(t),
            TourEvent::DurationKnown(d) => self.duration_known(d),
            TourEvent::Acknowledge => self.acknowledge(),
            TourEvent::SettleElapsed(token) => self.settle(token),
            TourEvent::Ended => self.ended(),
            TourEvent::Replay => self.replay(),
            TourEvent::Reset => self.reset(),
        }
    }

    fn start(&mut self) -> Effects {
        if self.state.started {
            tracing::debug!("start ignored; session already started");
            return Effects::new();
        }
        self.state.started = true;
        self.state.playing = true;
        tracing::debug!("session started");
        smallvec![Effect::Play, Effect::Notify(Notification::Started)]
    }

    fn time_update(&mut self, time: f64) -> Effects {
        loop {
            match observe_tick(&self.state, &self.data.stop_points, time) {
                TickOutcome::Ignored => {
                    tracing::trace!(time, "time update ignored");
                    return Effects::new();
                }
                TickOutcome::Tracked => {
                    self.state.current_time = time;
                    return Effects::new();
                }
                TickOutcome::Crossed {
                    stop_index,
                    stop_time,
                } => {
                    if self.data.stop_points[stop_index].areas.is_empty() {
                        tracing::warn!(stop_index, "stop point has no areas; skipping");
                        self.state.next_stop_index += 1;
                        continue;
                    }
                    self.state.active_stop = Some(stop_index);
                    self.state.active_area_index = 0;
                    self.state.bubble_closing = false;
                    self.state.playing = false;
                    self.state.current_time = stop_time;
                    tracing::debug!(
                        stop_index,
                        stop_time,
                        overshoot = time - stop_time,
                        "stop point reached"
                    );
                    return smallvec![Effect::Pause, Effect::Seek(stop_time)];
                }
            }
        }
    }

    fn duration_known(&mut self, duration: f64) -> Effects {
        if duration.is_finite() && duration >= 0.0 {
            self.state.duration = duration;
        } else {
            tracing::warn!(duration, "ignoring invalid media duration");
        }
        Effects::new()
    }

    fn acknowledge(&mut self) -> Effects {
        let Some(stop_index) = self.state.active_stop else {
            tracing::debug!("acknowledge ignored; no active stop point");
            return Effects::new();
        };
        if self.state.bubble_closing {
            tracing::debug!("acknowledge ignored; previous acknowledgment still settling");
            return Effects::new();
        }
        let area_index = self.state.active_area_index;
        if self.active_area().is_none() {
            tracing::warn!(
                stop_index,
                area_index,
                "acknowledge ignored; active area does not resolve"
            );
            return Effects::new();
        }

        let notify = Effect::Notify(Notification::StepAdvanced {
            stop_index,
            area_index,
        });
        self.state.bubble_closing = true;
        tracing::debug!(stop_index, area_index, "area acknowledged");
        smallvec![
            notify,
            Effect::ScheduleSettle(SettleToken {
                generation: self.generation,
                stop_index,
                area_index,
            })
        ]
    }

    fn settle(&mut self, token: SettleToken) -> Effects {
        let current = token.generation == self.generation
            && self.state.active_stop == Some(token.stop_index)
            && self.state.active_area_index == token.area_index
            && self.state.bubble_closing;
        if !current {
            tracing::debug!(?token, generation = self.generation, "dropping stale settle callback");
            return Effects::new();
        }

        self.state.bubble_closing = false;
        let area_count = self.data.stop_points[token.stop_index].areas.len();
        if token.area_index + 1 < area_count {
            self.state.active_area_index += 1;
            tracing::debug!(
                stop_index = token.stop_index,
                area_index = self.state.active_area_index,
                "next area"
            );
            return Effects::new();
        }

        self.state.active_stop = None;
        self.state.active_area_index = 0;
        self.state.next_stop_index = token.stop_index + 1;
        self.state.playing = true;
        tracing::debug!(stop_index = token.stop_index, "stop point complete; resuming");
        smallvec![Effect::Play]
    }

    fn ended(&mut self) -> Effects {
        if self.state.finished {
            tracing::debug!("ended ignored; already finished");
            return Effects::new();
        }
        self.generation += 1;
        let state = &mut self.state;
        state.finished = true;
        state.playing = false;
        state.active_stop = None;
        state.active_area_index = 0;
        state.bubble_closing = false;
        if state.duration > 0.0 {
            state.current_time = state.duration;
        }
        tracing::debug!(
            unconsumed = self.data.stop_points.len().saturating_sub(state.next_stop_index),
            "playback ended"
        );
        smallvec![Effect::CancelSettle, Effect::Notify(Notification::Completed)]
    }

    fn replay(&mut self) -> Effects {
        self.generation += 1;
        self.state = SessionState::initial(self.state.duration);
        tracing::debug!(generation = self.generation, "replay");
        smallvec![Effect::CancelSettle, Effect::Pause, Effect::Seek(0.0)]
    }

    fn reset(&mut self) -> Effects {
        self.generation += 1;
        self.state = SessionState::initial(0.0);
        tracing::debug!(generation = self.generation, "session reset");
        smallvec![Effect::CancelSettle, Effect::Pause, Effect::Seek(0.0)]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/machine.rs"]
mod tests;
