use super::*;
use crate::model::tutorial::{AreaShape, BoundingBox, InteractionArea, StopPoint};
use crate::placement::bubble::{Pointer, Side};
use crate::placement::cache::BubbleState;
use crate::playback::simulated::SimulatedSurface;
use crate::sequencer::state::Phase;

#[derive(Debug, Default)]
struct Recorder {
    log: Vec<String>,
}

impl HostCallbacks for Recorder {
    fn on_start(&mut self) {
        self.log.push("start".to_owned());
    }

    fn on_complete(&mut self) {
        self.log.push("complete".to_owned());
    }

    fn on_step_advanced(&mut self, stop: &StopPoint, area_index: usize) {
        self.log.push(format!("step {} {area_index}", stop.id));
    }
}

const CONTAINER: Size = Size::new(1000.0, 500.0);

fn box_area(id: &str, order: i64, has_next_button: bool, bb: BoundingBox) -> InteractionArea {
    InteractionArea {
        id: id.to_owned(),
        text: format!("about {id}"),
        order,
        has_next_button,
        shape: AreaShape::Box {
            bounding_box: Some(bb),
        },
    }
}

fn scenario_box() -> BoundingBox {
    BoundingBox {
        x: 0.05,
        y: 0.1,
        width: 0.2,
        height: 0.08,
    }
}

fn tutorial(stops: Vec<StopPoint>) -> TutorialData {
    TutorialData {
        version: "1".to_owned(),
        stop_points: stops,
    }
}

fn single_stop(has_next_button: bool) -> TutorialData {
    tutorial(vec![StopPoint {
        id: "intro".to_owned(),
        time: 5.0,
        areas: vec![box_area("a", 0, has_next_button, scenario_box())],
    }])
}

type Player<'a> = TourPlayer<SimulatedSurface, &'a mut Recorder, &'a mut BlobUrlRegistry>;

fn player<'a>(
    rec: &'a mut Recorder,
    reg: &'a mut BlobUrlRegistry,
    data: TutorialData,
) -> Player<'a> {
    let mut p = TourPlayer::with_parts(
        SimulatedSurface::new(20.0, 1920, 1080),
        rec,
        reg,
        SessionOpts::default(),
    );
    p.load_source(Some(VideoSource::Url("walkthrough.mp4".to_owned())))
        .unwrap();
    p.load_tutorial(Some(data));
    pump(&mut p, 0.0);
    p
}

/// Advance media by `dt` seconds and forward the surface's notifications.
fn pump(p: &mut Player<'_>, dt: f64) {
    for ev in p.surface_mut().advance(dt) {
        p.handle_surface_event(ev);
    }
}

fn run_until_paused(p: &mut Player<'_>, tick: f64) {
    for _ in 0..10_000 {
        pump(p, tick);
        if p.state().unwrap().active_stop.is_some() || p.state().unwrap().finished {
            return;
        }
    }
    panic!("never paused");
}

#[test]
fn box_stop_scenario_end_to_end() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let mut p = player(&mut rec, &mut reg, single_stop(true));
    assert_eq!(p.state().unwrap().duration, 20.0);
    assert_eq!(p.aspect(), Some(AspectRatio::new(1920, 1080).unwrap()));

    p.start();
    assert!(p.surface().is_playing());
    run_until_paused(&mut p, 0.3);

    assert!(!p.surface().is_playing());
    assert_eq!(p.surface().current_time(), 5.0);
    assert_eq!(p.state().unwrap().current_time, 5.0);
    assert_eq!(p.state().unwrap().active_area_index, 0);

    // The area needs its explicit control; overlay clicks are inert.
    assert_eq!(
        p.click(Point::new(100.0, 70.0), CONTAINER),
        ClickOutcome::Ignored
    );

    p.advance_clock(Duration::from_millis(1_000));
    p.press_next();
    assert_eq!(p.state().unwrap().phase(), Phase::PausedAtStop { closing: true });
    p.advance_clock(Duration::from_millis(1_299));
    assert!(!p.surface().is_playing());
    p.advance_clock(Duration::from_millis(1_300));
    assert!(p.surface().is_playing());
    assert_eq!(p.state().unwrap().phase(), Phase::Playing);

    drop(p);
    assert_eq!(rec.log, ["start", "step intro 0"]);
}

#[test]
fn click_to_advance_reports_region_hits() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let data = tutorial(vec![StopPoint {
        id: "s".to_owned(),
        time: 1.0,
        areas: vec![
            box_area("a", 0, false, scenario_box()),
            box_area("b", 1, false, scenario_box()),
        ],
    }]);
    let mut p = player(&mut rec, &mut reg, data);
    p.start();
    run_until_paused(&mut p, 0.5);

    // Inside the 50..250 x 50..90 box.
    assert_eq!(
        p.click(Point::new(100.0, 70.0), CONTAINER),
        ClickOutcome::Advanced { on_region: true }
    );
    // Rapid second click while settling.
    assert_eq!(
        p.click(Point::new(100.0, 70.0), CONTAINER),
        ClickOutcome::Ignored
    );
    p.advance_clock(Duration::from_secs(1));
    assert_eq!(p.state().unwrap().active_area_index, 1);

    assert_eq!(
        p.click(Point::new(900.0, 400.0), CONTAINER),
        ClickOutcome::Advanced { on_region: false }
    );
    p.advance_clock(Duration::from_secs(2));
    assert!(p.surface().is_playing());

    drop(p);
    assert_eq!(rec.log, ["start", "step s 0", "step s 1"]);
}

#[test]
fn missing_inputs_render_placeholder_and_ignore_events() {
    let mut p = TourPlayer::new(SimulatedSurface::new(5.0, 16, 9), SessionOpts::default());
    assert_eq!(
        p.overlay(CONTAINER),
        OverlayView::Unavailable(Unavailable::MissingSource)
    );

    p.load_source(Some(VideoSource::Url("v.mp4".to_owned())))
        .unwrap();
    assert_eq!(
        p.overlay(CONTAINER),
        OverlayView::Unavailable(Unavailable::MissingTutorial)
    );
    p.start();
    assert!(!p.surface().is_playing());
    assert!(p.timeline().is_empty());

    p.load_tutorial(Some(single_stop(false)));
    assert_eq!(p.overlay(CONTAINER), OverlayView::Idle);

    p.load_source(None).unwrap();
    p.start();
    assert_eq!(p.state().unwrap().phase(), Phase::Idle);
}

#[test]
fn blob_handles_are_released_on_replace_and_drop() {
    let mut reg = BlobUrlRegistry::new();
    let mut rec = Recorder::default();
    {
        let mut p = TourPlayer::with_parts(
            SimulatedSurface::new(5.0, 16, 9),
            &mut rec,
            &mut reg,
            SessionOpts::default(),
        );
        let bytes: Arc<[u8]> = Arc::from(&b"media"[..]);
        p.load_source(Some(VideoSource::Blob(Arc::clone(&bytes))))
            .unwrap();
        assert_eq!(p.provider().live_count(), 1);
        assert!(p.surface().loaded_url().unwrap().starts_with("blob:"));

        p.load_source(Some(VideoSource::Blob(bytes))).unwrap();
        assert_eq!(p.provider().live_count(), 1);
    }
    assert_eq!(reg.live_count(), 0);
}

#[test]
fn replacing_tutorial_drops_pending_settle() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let mut p = player(&mut rec, &mut reg, single_stop(true));
    p.start();
    run_until_paused(&mut p, 0.5);
    p.press_next();

    p.load_tutorial(Some(single_stop(true)));
    assert_eq!(p.state().unwrap(), &SessionState::initial(20.0));

    p.advance_clock(Duration::from_secs(10));
    assert_eq!(p.state().unwrap(), &SessionState::initial(20.0));
    assert_eq!(p.overlay(CONTAINER), OverlayView::Idle);
}

#[test]
fn overlay_measures_then_places_bubble() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let mut p = player(&mut rec, &mut reg, single_stop(true));
    assert_eq!(p.overlay(CONTAINER), OverlayView::Idle);
    p.start();
    assert_eq!(p.overlay(CONTAINER), OverlayView::Hidden);
    run_until_paused(&mut p, 0.5);

    let OverlayView::Active(active) = p.overlay(CONTAINER) else {
        panic!("expected an active overlay");
    };
    assert_eq!(active.bubble, BubbleState::Measuring);
    assert!(active.show_next_button);
    assert!(!active.click_to_advance);
    assert_eq!(active.step_count, 1);
    assert_eq!(active.opacity, 1.0);

    let placed = p.report_bubble_size(Size::new(240.0, 60.0)).unwrap();
    // Target centre sits in the left half with room on its right.
    assert_eq!(placed.side, Side::Right);
    assert_eq!(placed.pointer, Pointer::Left);

    let OverlayView::Active(active) = p.overlay(CONTAINER) else {
        panic!("expected an active overlay");
    };
    assert_eq!(active.bubble, BubbleState::Placed(placed));

    // A resize invalidates the measurement.
    let OverlayView::Active(active) = p.overlay(Size::new(800.0, 450.0)) else {
        panic!("expected an active overlay");
    };
    assert_eq!(active.bubble, BubbleState::Measuring);

    p.advance_clock(Duration::from_secs(1));
    p.press_next();
    p.advance_clock(Duration::from_millis(1_150));
    let OverlayView::Active(active) = p.overlay(CONTAINER) else {
        panic!("expected an active overlay while settling");
    };
    assert!(active.closing);
    assert!(active.opacity > 0.0 && active.opacity < 1.0);
}

#[test]
fn ended_with_unconsumed_stop_completes() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let data = tutorial(vec![StopPoint {
        id: "late".to_owned(),
        time: 19.5,
        areas: vec![box_area("a", 0, false, scenario_box())],
    }]);
    let mut p = player(&mut rec, &mut reg, data);
    p.start();
    pump(&mut p, 5.0);
    p.handle_surface_event(SurfaceEvent::Ended);
    p.handle_surface_event(SurfaceEvent::Ended);

    assert!(p.state().unwrap().finished);
    assert_eq!(p.state().unwrap().current_time, 20.0);
    assert_eq!(p.overlay(CONTAINER), OverlayView::Finished);

    let full: Vec<f64> = p.timeline().iter().map(|s| s.fill_percent).collect();
    assert_eq!(full, [100.0, 100.0]);

    p.replay();
    assert_eq!(p.surface().current_time(), 0.0);
    assert_eq!(p.state().unwrap(), &SessionState::initial(20.0));

    drop(p);
    assert_eq!(rec.log, ["start", "complete"]);
}

#[test]
fn replacing_tutorial_mid_playback_stops_and_rewinds() {
    let mut rec = Recorder::default();
    let mut reg = BlobUrlRegistry::new();
    let mut p = player(&mut rec, &mut reg, single_stop(true));
    p.start();
    pump(&mut p, 3.0);
    assert!(p.surface().is_playing());
    assert_eq!(p.surface().current_time(), 3.0);

    let replacement = tutorial(vec![StopPoint {
        id: "early".to_owned(),
        time: 1.0,
        areas: vec![box_area("a", 0, false, scenario_box())],
    }]);
    p.load_tutorial(Some(replacement));
    assert!(!p.surface().is_playing());
    assert_eq!(p.surface().current_time(), 0.0);
    assert_eq!(p.state().unwrap(), &SessionState::initial(20.0));

    // Idle until started again; the surface does not drift.
    pump(&mut p, 2.0);
    assert_eq!(p.surface().current_time(), 0.0);

    p.start();
    pump(&mut p, 0.5);
    assert_eq!(p.surface().current_time(), 0.5);
    assert_eq!(p.state().unwrap().active_stop, None);
    pump(&mut p, 0.5);
    assert_eq!(p.state().unwrap().active_stop, Some(0));
    assert_eq!(p.surface().current_time(), 1.0);
}
