#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// One contiguous stretch of the progress bar between two stop points.
pub struct TimelineSegment {
    /// Segment start in seconds.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Segment width as a percentage of the full duration.
    pub width_percent: f64,
    /// How much of the segment has been played, in `0..=100`.
    pub fill_percent: f64,
}

/// Fill percentage of `[start, end]` at `current`.
pub fn segment_fill(start: f64, end: f64, current: f64) -> f64 {
    if current < start {
        0.0
    } else if current >= end {
        100.0
    } else {
        (current - start) / (end - start) * 100.0
    }
}

/// Project stop times and the current playback time onto progress-bar segments.
///
/// Segments run `[previous stop, stop]` for each stop in order, starting at 0, plus a trailing
/// segment up to `duration` when the last stop comes before the end. Stops past `duration` are
/// clipped. An unknown (zero) duration yields no segments.
pub fn project_timeline(stop_times: &[f64], duration: f64, current: f64) -> Vec<TimelineSegment> {
    if !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(stop_times.len() + 1);
    let mut prev = 0.0;
    for &t in stop_times {
        if prev >= duration {
            break;
        }
        let end = t.min(duration);
        segments.push(segment(prev, end, duration, current));
        prev = end;
    }
    if prev < duration {
        segments.push(segment(prev, duration, duration, current));
    }
    segments
}

/// Stop positions as percentages of `duration`, for drawing markers. Stops past the end are
/// dropped.
pub fn stop_markers(stop_times: &[f64], duration: f64) -> Vec<f64> {
    if !duration.is_finite() || duration <= 0.0 {
        return Vec::new();
    }
    stop_times
        .iter()
        .filter(|&&t| t <= duration)
        .map(|&t| t / duration * 100.0)
        .collect()
}

fn segment(start: f64, end: f64, duration: f64, current: f64) -> TimelineSegment {
    TimelineSegment {
        start,
        end,
        width_percent: (end - start) / duration * 100.0,
        fill_percent: segment_fill(start, end, current),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/progress.rs"]
mod tests;
