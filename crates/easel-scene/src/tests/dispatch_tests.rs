use std::sync::{Arc, Mutex};

use easel_graphics::Size;

use crate::event::{TouchAction, TouchEvent};
use crate::policy::ViewPolicy;
use crate::scene::Scene;
use crate::view::{View, ViewId, Visibility};

type Log = Arc<Mutex<Vec<(char, TouchAction, f32, f32)>>>;

struct TouchSink {
    tag: char,
    log: Log,
    consume: bool,
}

impl ViewPolicy for TouchSink {
    fn on_touch(&mut self, event: &TouchEvent, _size: Size) -> bool {
        self.log
            .lock()
            .unwrap()
            .push((self.tag, event.action, event.x, event.y));
        self.consume
    }
}

fn sink(log: &Log, tag: char, consume: bool) -> TouchSink {
    TouchSink {
        tag,
        log: Arc::clone(log),
        consume,
    }
}

fn events_for(log: &Log, tag: char) -> Vec<(TouchAction, f32, f32)> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.0 == tag)
        .map(|entry| (entry.1, entry.2, entry.3))
        .collect()
}

/// Pane with two overlapping consuming children: `a` covers (0,0)-(100,100),
/// `b` covers (50,50)-(150,150) and paints on top of `a`.
fn overlapping_pair(log: &Log) -> (Scene, ViewId, ViewId, ViewId) {
    let mut scene = Scene::new();
    let pane = scene.insert(View::new());
    let a = scene.insert(View::with_policy(sink(log, 'a', true)));
    let b = scene.insert(View::with_policy(sink(log, 'b', true)));
    scene.add_view(pane, a, None);
    scene.add_view(pane, b, None);
    scene.layout(pane, 0, 0, 200, 200);
    scene.layout(a, 0, 0, 100, 100);
    scene.layout(b, 50, 50, 150, 150);
    (scene, pane, a, b)
}

#[test]
fn down_picks_the_topmost_child_under_the_point() {
    let log = Log::default();
    let (mut scene, pane, _a, b) = overlapping_pair(&log);

    assert!(scene.dispatch_touch(pane, TouchEvent::down(60.0, 60.0)));
    assert_eq!(scene.motion_target(pane), Some(b));
    assert_eq!(events_for(&log, 'b'), vec![(TouchAction::Down, 10.0, 10.0)]);
    assert!(events_for(&log, 'a').is_empty());
}

#[test]
fn captured_gestures_follow_the_target_outside_its_bounds() {
    let log = Log::default();
    let (mut scene, pane, _a, b) = overlapping_pair(&log);

    scene.dispatch_touch(pane, TouchEvent::down(60.0, 60.0));
    assert!(scene.dispatch_touch(pane, TouchEvent::moved(500.0, 500.0)));
    assert_eq!(scene.motion_target(pane), Some(b));
    assert_eq!(
        events_for(&log, 'b'),
        vec![
            (TouchAction::Down, 10.0, 10.0),
            (TouchAction::Move, 450.0, 450.0),
        ]
    );
}

#[test]
fn up_releases_the_capture() {
    let log = Log::default();
    let (mut scene, pane, _a, _b) = overlapping_pair(&log);

    scene.dispatch_touch(pane, TouchEvent::down(60.0, 60.0));
    assert!(scene.dispatch_touch(pane, TouchEvent::up(61.0, 61.0)));
    assert_eq!(scene.motion_target(pane), None);

    // With no target held, a move has nowhere to go.
    assert!(!scene.dispatch_touch(pane, TouchEvent::moved(60.0, 60.0)));
}

#[test]
fn a_fresh_down_cancels_the_held_target_first() {
    let log = Log::default();
    let (mut scene, pane, a, b) = overlapping_pair(&log);

    scene.dispatch_touch(pane, TouchEvent::down(60.0, 60.0));
    assert_eq!(scene.motion_target(pane), Some(b));

    assert!(scene.dispatch_touch(pane, TouchEvent::down(20.0, 20.0)));
    assert_eq!(scene.motion_target(pane), Some(a));
    assert_eq!(
        events_for(&log, 'b'),
        vec![
            (TouchAction::Down, 10.0, 10.0),
            (TouchAction::Cancel, -30.0, -30.0),
        ],
        "the cancel carries the new event's position"
    );
    assert_eq!(events_for(&log, 'a'), vec![(TouchAction::Down, 20.0, 20.0)]);
}

#[test]
fn invisible_children_are_transparent_to_hits() {
    let log = Log::default();
    let (mut scene, pane, a, b) = overlapping_pair(&log);
    scene.set_visibility(b, Visibility::Invisible);

    assert!(scene.dispatch_touch(pane, TouchEvent::down(60.0, 60.0)));
    assert_eq!(scene.motion_target(pane), Some(a));
    assert!(events_for(&log, 'b').is_empty());
}

#[test]
fn a_touch_listener_replaces_the_policy_handler() {
    let log = Log::default();
    let (mut scene, pane, a, _b) = overlapping_pair(&log);
    let listener_log: Arc<Mutex<Vec<TouchAction>>> = Arc::default();
    let listener_seen = Arc::clone(&listener_log);
    scene.set_on_touch(a, move |_id, event| {
        listener_seen.lock().unwrap().push(event.action);
        false
    });

    assert!(!scene.dispatch_touch(pane, TouchEvent::down(20.0, 20.0)));
    assert_eq!(*listener_log.lock().unwrap(), vec![TouchAction::Down]);
    assert!(
        events_for(&log, 'a').is_empty(),
        "the policy is not a fallback behind the listener"
    );
    assert_eq!(scene.motion_target(pane), None);
}

#[test]
fn an_invisible_view_refuses_its_own_events() {
    let log = Log::default();
    let mut scene = Scene::new();
    let view = scene.insert(View::with_policy(sink(&log, 'v', true)));
    scene.layout(view, 0, 0, 100, 100);
    scene.set_visibility(view, Visibility::Invisible);

    assert!(!scene.dispatch_touch(view, TouchEvent::down(10.0, 10.0)));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn scrolled_containers_hit_children_where_they_draw() {
    let log = Log::default();
    let mut scene = Scene::new();
    let pane = scene.insert(View::new());
    let child = scene.insert(View::with_policy(sink(&log, 'c', true)));
    scene.add_view(pane, child, None);
    scene.layout(pane, 0, 0, 200, 100);
    scene.layout(child, 50, 0, 150, 100);
    scene.set_scroll(pane, 30, 0);

    // Drawn span is now x in [20, 120).
    assert!(scene.dispatch_touch(pane, TouchEvent::down(25.0, 10.0)));
    assert_eq!(events_for(&log, 'c'), vec![(TouchAction::Down, 5.0, 10.0)]);

    scene.dispatch_touch(pane, TouchEvent::up(25.0, 10.0));
    assert!(
        !scene.dispatch_touch(pane, TouchEvent::down(130.0, 10.0)),
        "the unscrolled bounds no longer apply"
    );
}

#[test]
fn hit_testing_truncates_coordinates() {
    let log = Log::default();
    let mut scene = Scene::new();
    let pane = scene.insert(View::new());
    let child = scene.insert(View::with_policy(sink(&log, 'c', true)));
    scene.add_view(pane, child, None);
    scene.layout(pane, 0, 0, 200, 200);
    scene.layout(child, 0, 0, 100, 100);

    assert!(scene.dispatch_touch(pane, TouchEvent::down(99.9, 99.9)));
    scene.dispatch_touch(pane, TouchEvent::up(99.9, 99.9));
    assert!(!scene.dispatch_touch(pane, TouchEvent::down(100.0, 50.0)));
}

#[test]
fn capture_chains_through_nested_groups() {
    let log = Log::default();
    let mut scene = Scene::new();
    let pane = scene.insert(View::new());
    let group = scene.insert(View::new());
    let leaf = scene.insert(View::with_policy(sink(&log, 'l', true)));
    scene.add_view(pane, group, None);
    scene.add_view(group, leaf, None);
    scene.layout(pane, 0, 0, 200, 200);
    scene.layout(group, 20, 20, 180, 180);
    scene.layout(leaf, 10, 10, 60, 60);

    assert!(scene.dispatch_touch(pane, TouchEvent::down(35.0, 35.0)));
    assert_eq!(scene.motion_target(pane), Some(group));
    assert_eq!(scene.motion_target(group), Some(leaf));

    scene.dispatch_touch(pane, TouchEvent::moved(100.0, 100.0));
    assert_eq!(
        events_for(&log, 'l'),
        vec![
            (TouchAction::Down, 5.0, 5.0),
            (TouchAction::Move, 70.0, 70.0),
        ]
    );

    scene.dispatch_touch(pane, TouchEvent::up(100.0, 100.0));
    assert_eq!(scene.motion_target(pane), None);
    assert_eq!(scene.motion_target(group), None);
}
