use crate::model::tutorial::StopPoint;
use crate::sequencer::state::SessionState;

#[derive(Clone, Copy, Debug, PartialEq)]
/// What a single time-update means for the session.
pub(crate) enum TickOutcome {
    /// Not started, finished, or a stop point is already being shown.
    Ignored,
    /// Displayed time moves; no threshold crossed.
    Tracked,
    /// The time cursor reached the next scheduled stop point.
    Crossed { stop_index: usize, stop_time: f64 },
}

/// Compare a time-update against the next scheduled stop point.
///
/// Only the stop at `next_stop_index` is considered; stop times are authored in increasing order,
/// so the scan is forward-only.
pub(crate) fn observe_tick(state: &SessionState, stops: &[StopPoint], time: f64) -> TickOutcome {
    if !state.started || state.finished || state.active_stop.is_some() {
        return TickOutcome::Ignored;
    }
    match stops.get(state.next_stop_index) {
        Some(stop) if time >= stop.time => TickOutcome::Crossed {
            stop_index: state.next_stop_index,
            stop_time: stop.time,
        },
        _ => TickOutcome::Tracked,
    }
}
