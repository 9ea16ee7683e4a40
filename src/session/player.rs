use std::sync::Arc;
use std::time::Duration;

use crate::foundation::core::{AspectRatio, Point, Size};
use crate::foundation::error::TourResult;
use crate::geometry::resolve::highlight_shape;
use crate::model::tutorial::TutorialData;
use crate::overlay::view::{OverlayView, Unavailable, project_overlay};
use crate::placement::bubble::BubblePlacement;
use crate::placement::cache::PlacementCache;
use crate::playback::source::{BlobUrlRegistry, SourceHandle, SourceProvider, VideoSource};
use crate::playback::surface::{PlaybackSurface, SurfaceEvent};
use crate::sequencer::machine::{Effect, Effects, Notification, Sequencer, TourEvent};
use crate::sequencer::state::SessionState;
use crate::sequencer::timer::SettleTimer;
use crate::session::callbacks::{HostCallbacks, NoopCallbacks};
use crate::session::opts::SessionOpts;
use crate::timeline::progress::{TimelineSegment, project_timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of routing a pointer click through the overlay.
pub enum ClickOutcome {
    /// The click acknowledged the active area.
    Advanced {
        /// The click landed inside the highlighted region rather than the surrounding overlay.
        on_region: bool,
    },
    /// Nothing happened: no active area, a transition in flight, or the area requires its
    /// explicit "next" control.
    Ignored,
}

/// A walkthrough session bound to a playback surface.
///
/// The player owns the sequencer and applies its effects: it drives the surface, arms the settle
/// timer and notifies the host. The host forwards surface notifications with
/// [`TourPlayer::handle_surface_event`] and its clock with [`TourPlayer::advance_clock`].
pub struct TourPlayer<S, H = NoopCallbacks, P = BlobUrlRegistry>
where
    S: PlaybackSurface,
    H: HostCallbacks,
    P: SourceProvider,
{
    surface: S,
    callbacks: H,
    provider: P,
    opts: SessionOpts,

    source: Option<SourceHandle>,
    sequencer: Option<Sequencer>,
    timer: SettleTimer,
    placement: PlacementCache,
    aspect: Option<AspectRatio>,
    now: Duration,
}

impl<S: PlaybackSurface> TourPlayer<S> {
    /// A player with no host callbacks and an in-process blob registry.
    pub fn new(surface: S, opts: SessionOpts) -> Self {
        Self::with_parts(surface, NoopCallbacks, BlobUrlRegistry::new(), opts)
    }
}

impl<S, H, P> TourPlayer<S, H, P>
where
    S: PlaybackSurface,
    H: HostCallbacks,
    P: SourceProvider,
{
    pub fn with_parts(surface: S, callbacks: H, provider: P, opts: SessionOpts) -> Self {
        let timer = SettleTimer::new(opts.settle_delay());
        let placement = PlacementCache::new(opts.bubble_gap_px, opts.reserved);
        Self {
            surface,
            callbacks,
            provider,
            opts,
            source: None,
            sequencer: None,
            timer,
            placement,
            aspect: None,
            now: Duration::ZERO,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn callbacks(&self) -> &H {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut H {
        &mut self.callbacks
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Session state, when tutorial data is loaded.
    pub fn state(&self) -> Option<&SessionState> {
        self.sequencer.as_ref().map(Sequencer::state)
    }

    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    /// Why the walkthrough cannot run, if it cannot.
    pub fn unavailable(&self) -> Option<Unavailable> {
        if self.source.is_none() {
            Some(Unavailable::MissingSource)
        } else if self.sequencer.is_none() {
            Some(Unavailable::MissingTutorial)
        } else {
            None
        }
    }

    /// Replace the video source. Releases the previous handle and fully resets the session.
    #[tracing::instrument(skip(self, source), fields(has_source = source.is_some()))]
    pub fn load_source(&mut self, source: Option<VideoSource>) -> TourResult<()> {
        if let Some(prev) = self.source.take() {
            self.provider.release(prev);
        }
        self.aspect = None;
        self.reset_session();

        let Some(source) = source else {
            return Ok(());
        };
        let handle = self.provider.acquire(&source)?;
        self.surface.load(&handle);
        self.source = Some(handle);
        Ok(())
    }

    /// Replace the tutorial data. Fully resets the session and rewinds the surface.
    #[tracing::instrument(skip(self, data), fields(has_data = data.is_some()))]
    pub fn load_tutorial(&mut self, data: Option<TutorialData>) {
        self.reset_session();
        self.sequencer = data.map(|d| Sequencer::new(Arc::new(d)));
        // Metadata may have arrived before the tutorial did.
        if let Some(d) = self.surface.duration() {
            self.dispatch(TourEvent::DurationKnown(d));
        }
    }

    fn reset_session(&mut self) {
        self.placement.invalidate();
        self.dispatch(TourEvent::Reset);
        self.timer.cancel();
    }

    /// Start the walkthrough.
    pub fn start(&mut self) {
        self.dispatch(TourEvent::Start);
    }

    /// Rewind to the beginning; the viewer must start again.
    pub fn replay(&mut self) {
        self.placement.invalidate();
        self.dispatch(TourEvent::Replay);
    }

    /// Explicit acknowledgment ("next" control or keyboard).
    pub fn press_next(&mut self) {
        self.dispatch(TourEvent::Acknowledge);
    }

    /// Route a click at `point` (container pixels) through the overlay.
    pub fn click(&mut self, point: Point, container: Size) -> ClickOutcome {
        let Some(seq) = self.sequencer.as_ref() else {
            return ClickOutcome::Ignored;
        };
        if self.source.is_none() || seq.state().bubble_closing {
            return ClickOutcome::Ignored;
        }
        let Some(area) = seq.active_area() else {
            return ClickOutcome::Ignored;
        };
        if area.has_next_button {
            tracing::trace!(
                area = %area.id,
                "background click ignored; area needs its next control"
            );
            return ClickOutcome::Ignored;
        }
        let on_region = highlight_shape(area, container).is_some_and(|h| h.contains(point));
        self.dispatch(TourEvent::Acknowledge);
        ClickOutcome::Advanced { on_region }
    }

    /// Forward a notification from the playback surface.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::DurationKnown(d) => self.dispatch(TourEvent::DurationKnown(d)),
            SurfaceEvent::TimeUpdate(t) => self.dispatch(TourEvent::TimeUpdate(t)),
            SurfaceEvent::Ended => self.dispatch(TourEvent::Ended),
            SurfaceEvent::Ready { width, height } => match AspectRatio::new(width, height) {
                Ok(aspect) => self.aspect = Some(aspect),
                Err(e) => tracing::warn!(width, height, "ignoring ready notification: {e}"),
            },
        }
    }

    /// Advance the host clock, firing the settle callback when it is due.
    pub fn advance_clock(&mut self, now: Duration) {
        self.now = now;
        if let Some(token) = self.timer.poll(now) {
            self.dispatch(TourEvent::SettleElapsed(token));
        }
    }

    /// Natural aspect ratio, once the first frame was decoded.
    pub fn aspect(&self) -> Option<AspectRatio> {
        self.aspect
    }

    /// Frame size when the video is laid out `width` pixels wide (16:9 until the real ratio is
    /// known).
    pub fn frame_size_for_width(&self, width: f64) -> Size {
        self.aspect.unwrap_or_default().frame_size_for_width(width)
    }

    /// What the overlay should draw in a container of the given size.
    pub fn overlay(&mut self, container: Size) -> OverlayView {
        if let Some(reason) = self.unavailable() {
            return OverlayView::Unavailable(reason);
        }
        let Some(seq) = self.sequencer.as_ref() else {
            return OverlayView::Unavailable(Unavailable::MissingTutorial);
        };
        let exit_opacity = self.timer.elapsed(self.now).map_or(1.0, |elapsed| {
            self.opts
                .exit_ease
                .exit_opacity(elapsed, self.timer.delay())
        });
        project_overlay(seq, container, &mut self.placement, exit_opacity)
    }

    /// Report the bubble's measured size after layout; returns its placement.
    pub fn report_bubble_size(&mut self, size: Size) -> Option<BubblePlacement> {
        self.placement.report_measured(size)
    }

    /// Progress-bar segments for the current time.
    pub fn timeline(&self) -> Vec<TimelineSegment> {
        let Some(seq) = self.sequencer.as_ref() else {
            return Vec::new();
        };
        let state = seq.state();
        project_timeline(
            &seq.tutorial().stop_times(),
            state.duration,
            state.current_time,
        )
    }

    fn dispatch(&mut self, event: TourEvent) {
        if self.source.is_none() && !matches!(event, TourEvent::Reset) {
            tracing::trace!(?event, "no video source; event ignored");
            return;
        }
        let Some(seq) = self.sequencer.as_mut() else {
            tracing::trace!(?event, "no tutorial data; event ignored");
            return;
        };
        let effects = seq.handle(event);
        let data = Arc::clone(seq.tutorial());
        self.apply(effects, &data);
    }

    fn apply(&mut self, effects: Effects, data: &TutorialData) {
        for effect in effects {
            match effect {
                Effect::Play => self.surface.play(),
                Effect::Pause => self.surface.pause(),
                Effect::Seek(t) => self.surface.set_current_time(t),
                Effect::ScheduleSettle(token) => self.timer.schedule(self.now, token),
                Effect::CancelSettle => self.timer.cancel(),
                Effect::Notify(Notification::Started) => self.callbacks.on_start(),
                Effect::Notify(Notification::Completed) => self.callbacks.on_complete(),
                Effect::Notify(Notification::StepAdvanced {
                    stop_index,
                    area_index,
                }) => {
                    if let Some(stop) = data.stop_points.get(stop_index) {
                        self.callbacks.on_step_advanced(stop, area_index);
                    }
                }
            }
        }
    }
}

impl<S, H, P> Drop for TourPlayer<S, H, P>
where
    S: PlaybackSurface,
    H: HostCallbacks,
    P: SourceProvider,
{
    fn drop(&mut self) {
        if let Some(handle) = self.source.take() {
            self.provider.release(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/player.rs"]
mod tests;
