use std::fmt;

use crate::foundation::core::{Rect, Size};
use crate::geometry::resolve::{HighlightShape, highlight_shape, resolve_anchor};
use crate::placement::cache::{BubbleState, PlacementCache};
use crate::sequencer::machine::Sequencer;
use crate::sequencer::state::Phase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why the walkthrough cannot be rendered.
pub enum Unavailable {
    /// No video source was provided.
    MissingSource,
    /// No tutorial data was provided.
    MissingTutorial,
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => write!(f, "no video source"),
            Self::MissingTutorial => write!(f, "no tutorial data"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// What the overlay layer should draw this frame.
pub enum OverlayView {
    /// Persistent placeholder; required inputs are missing.
    Unavailable(Unavailable),
    /// Waiting for the viewer to start.
    Idle,
    /// Playing, or the active area could not be resolved; draw nothing.
    Hidden,
    /// An area is being shown.
    Active(ActiveOverlay),
    /// Playback finished; offer a replay.
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
/// Render description of the area currently shown.
pub struct ActiveOverlay {
    pub stop_id: String,
    pub area_id: String,
    /// Presentation index of the area within its stop point.
    pub step: usize,
    pub step_count: usize,
    pub text: String,
    /// Pixel outline of the highlighted region; `None` for malformed geometry.
    pub highlight: Option<HighlightShape>,
    /// Pixel rect the bubble is anchored to.
    pub anchor: Rect,
    pub bubble: BubbleState,
    /// Draw the explicit "next" control.
    pub show_next_button: bool,
    /// Clicks on the region or the surrounding overlay acknowledge the area.
    pub click_to_advance: bool,
    /// An acknowledgment is settling.
    pub closing: bool,
    /// Bubble opacity; drops towards 0 during the exit transition.
    pub opacity: f64,
}

/// Project the sequencer's state into an overlay description for a container of the given size.
///
/// Syncs `placement` with the active area so the bubble is re-measured whenever its target or
/// text changes.
pub(crate) fn project_overlay(
    seq: &Sequencer,
    container: Size,
    placement: &mut PlacementCache,
    exit_opacity: f64,
) -> OverlayView {
    match seq.state().phase() {
        Phase::Idle => return OverlayView::Idle,
        Phase::Finished => return OverlayView::Finished,
        Phase::Playing => return OverlayView::Hidden,
        Phase::PausedAtStop { .. } => {}
    }

    let (Some(stop), Some(area)) = (seq.active_stop(), seq.active_area()) else {
        tracing::warn!(
            active_stop = ?seq.state().active_stop,
            area_index = seq.state().active_area_index,
            "active area does not resolve; rendering nothing"
        );
        placement.invalidate();
        return OverlayView::Hidden;
    };

    let anchor = resolve_anchor(area).to_pixels(container);
    let bubble = placement.sync(anchor, &area.text, container);
    let closing = seq.state().bubble_closing;

    OverlayView::Active(ActiveOverlay {
        stop_id: stop.id.clone(),
        area_id: area.id.clone(),
        step: seq.state().active_area_index,
        step_count: stop.areas.len(),
        text: area.text.clone(),
        highlight: highlight_shape(area, container),
        anchor,
        bubble,
        show_next_button: area.has_next_button,
        click_to_advance: !area.has_next_button,
        closing,
        opacity: if closing { exit_opacity } else { 1.0 },
    })
}
