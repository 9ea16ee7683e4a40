//! vidtour drives interactive, JSON-described walkthroughs layered on top of video playback.
//!
//! Playback pauses at configured stop points; each stop highlights one or more regions of the
//! frame in turn, shows an annotation bubble next to the region, and waits for the viewer to
//! acknowledge before moving on.
//!
//! # Architecture
//!
//! 1. **Model**: [`TutorialData`] describes stop points and their interaction areas.
//! 2. **Sequencer**: [`Sequencer`] is a pure state machine; each [`TourEvent`] yields a list of
//!    [`Effect`]s (play, pause, seek, arm the settle timer, notify the host).
//! 3. **Geometry and placement**: [`resolve_area_rect`], [`resolve_anchor`] and [`place_bubble`]
//!    are pure functions of the area, the container size and the measured bubble size.
//! 4. **Session**: [`TourPlayer`] binds a sequencer to a [`PlaybackSurface`], applies effects,
//!    and projects the state into an [`OverlayView`] and a timeline.
//!
//! The crate never talks to a real video element: hosts implement [`PlaybackSurface`] and forward
//! its notifications. [`SimulatedSurface`] is a deterministic stand-in for tests and the CLI.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod geometry;
mod model;
mod overlay;
mod placement;
mod playback;
mod sequencer;
mod session;
mod timeline;

pub use animation::ease::Ease;
pub use foundation::core::{AspectRatio, BezPath, Ellipse, Point, Rect, Size, Vec2};
pub use foundation::error::{TourError, TourResult};
pub use geometry::resolve::{
    HighlightShape, PercentRect, highlight_shape, resolve_anchor, resolve_area_rect,
};
pub use model::tutorial::{
    AreaShape, BoundingBox, InteractionArea, POLYGON_POINTS, StopPoint, TutorialData,
};
pub use overlay::view::{ActiveOverlay, OverlayView, Unavailable};
pub use placement::bubble::{
    BubblePlacement, Clearance, DEFAULT_GAP_PX, Edges, Pointer, Side, place_bubble,
};
pub use placement::cache::{BubbleState, PlacementCache};
pub use playback::simulated::SimulatedSurface;
pub use playback::source::{BlobUrlRegistry, SourceHandle, SourceProvider, VideoSource};
pub use playback::surface::{PlaybackSurface, SurfaceEvent};
pub use sequencer::machine::{Effect, Effects, Notification, Sequencer, TourEvent};
pub use sequencer::state::{Phase, SessionState};
pub use sequencer::timer::{SettleTimer, SettleToken};
pub use session::callbacks::{HostCallbacks, NoopCallbacks};
pub use session::opts::SessionOpts;
pub use session::player::{ClickOutcome, TourPlayer};
pub use timeline::progress::{TimelineSegment, project_timeline, segment_fill, stop_markers};
