use easel_animation::{AlphaAnimation, AnimationClock};
use easel_graphics::{Canvas, Color, SaveFlags};
use easel_testing::{CanvasOp, RecordingCanvas};
use easel_texture::{ColorTexture, FadeTexture, FADE_DURATION};

use crate::scene::Scene;
use crate::view::{View, ViewId, Visibility};

fn pane_scene(width: i32, height: i32) -> (Scene, ViewId) {
    let mut scene = Scene::new();
    let pane = scene.insert(View::new());
    scene.set_content_pane(Some(pane));
    scene.layout(pane, 0, 0, width, height);
    (scene, pane)
}

#[test]
fn background_fill_covers_the_view() {
    let (mut scene, _pane) = pane_scene(100, 50);
    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    assert_eq!(canvas.fills(), vec![(0.0, 0.0, 100.0, 50.0, Color::BLACK)]);
}

#[test]
fn children_draw_translated_in_insertion_order() {
    let (mut scene, pane) = pane_scene(200, 200);
    let first = scene.insert(View::new());
    let second = scene.insert(View::new());
    scene.add_view(pane, first, None);
    scene.add_view(pane, second, None);
    scene.layout(first, 10, 20, 60, 70);
    scene.layout(second, 50, 50, 150, 150);
    scene.set_background_color(first, Color::RED);
    scene.set_background_color(second, Color::BLUE);

    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    assert_eq!(
        canvas.fills(),
        vec![
            (0.0, 0.0, 200.0, 200.0, Color::BLACK),
            (10.0, 20.0, 50.0, 50.0, Color::RED),
            (50.0, 50.0, 100.0, 100.0, Color::BLUE),
        ]
    );
}

#[test]
fn the_child_loop_is_bracketed_by_a_full_save() {
    let (mut scene, pane) = pane_scene(100, 100);
    let child = scene.insert(View::new());
    scene.add_view(pane, child, None);
    scene.layout(child, 10, 20, 40, 50);

    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    let ops = canvas.ops();
    assert_eq!(ops[1], CanvasOp::Save(SaveFlags::ALL));
    assert_eq!(ops[2], CanvasOp::Translate(10.0, 20.0));
    assert_eq!(*ops.last().unwrap(), CanvasOp::Restore);
    assert_eq!(canvas.saves(), vec![SaveFlags::ALL]);
}

#[test]
fn invisible_children_are_skipped_unless_animated() {
    let (mut scene, pane) = pane_scene(100, 100);
    let child = scene.insert(View::new());
    scene.add_view(pane, child, None);
    scene.layout(child, 0, 0, 50, 50);
    scene.set_visibility(child, Visibility::Invisible);

    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    assert_eq!(canvas.fills().len(), 1, "only the pane background draws");

    scene.start_animation(child, Box::new(AlphaAnimation::new(0.0, 1.0, 100)));
    canvas.clear();
    scene.render(&mut canvas, 0);
    assert_eq!(
        canvas.fills().len(),
        2,
        "a running animation keeps the child in the frame"
    );
}

#[test]
fn a_child_animation_brackets_exactly_its_state() {
    let (mut scene, pane) = pane_scene(200, 200);
    let child = scene.insert(View::new());
    scene.add_view(pane, child, None);
    scene.layout(child, 0, 0, 100, 100);
    scene.set_background_color(child, Color::WHITE);
    scene.start_animation(child, Box::new(AlphaAnimation::new(0.0, 1.0, 100)));

    let requests = scene.frame_requests();
    let mut canvas = RecordingCanvas::new();

    // First frame latches the start time; alpha begins at the from value.
    requests.take_render();
    scene.render(&mut canvas, 50);
    assert_eq!(canvas.saves(), vec![SaveFlags::ALL, SaveFlags::ALPHA]);
    assert_eq!(canvas.fill_alphas(), vec![1.0, 0.0]);
    assert_eq!(canvas.alpha(), 1.0, "alpha is restored after the subtree");
    assert!(requests.render_requested());

    canvas.clear();
    requests.take_render();
    scene.render(&mut canvas, 100);
    assert_eq!(canvas.fill_alphas(), vec![1.0, 0.5]);
    assert!(requests.render_requested());
    assert!(scene.has_animation(child));

    // The completion frame applies the final value, then drops the slot.
    canvas.clear();
    requests.take_render();
    scene.render(&mut canvas, 150);
    assert_eq!(canvas.fill_alphas(), vec![1.0, 1.0]);
    assert!(!requests.render_requested());
    assert!(!scene.has_animation(child));
}

#[test]
fn a_background_texture_replaces_the_color_fill() {
    let (mut scene, pane) = pane_scene(80, 60);
    scene.set_background(
        pane,
        Some(Box::new(ColorTexture::with_size(Color::WHITE, 1, 1))),
    );

    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    assert_eq!(canvas.fills(), vec![(0.0, 0.0, 80.0, 60.0, Color::WHITE)]);
}

#[test]
fn a_fading_background_keeps_requesting_frames() {
    let clock = AnimationClock::manual();
    let (mut scene, pane) = pane_scene(80, 60);
    let fade = FadeTexture::new(
        Box::new(ColorTexture::with_size(Color::WHITE, 1, 1)),
        clock.clone(),
    );
    scene.set_background(pane, Some(Box::new(fade)));

    let requests = scene.frame_requests();
    let mut canvas = RecordingCanvas::new();

    requests.take_render();
    scene.render(&mut canvas, 0);
    assert_eq!(canvas.fill_alphas(), vec![0.0], "fade starts fully transparent");
    assert!(requests.render_requested());

    clock.advance(FADE_DURATION);
    canvas.clear();
    requests.take_render();
    scene.render(&mut canvas, 0);
    assert_eq!(canvas.fill_alphas(), vec![1.0]);
    assert!(!requests.render_requested());
}

#[test]
fn scroll_shifts_where_children_draw() {
    let (mut scene, pane) = pane_scene(200, 100);
    let child = scene.insert(View::new());
    scene.add_view(pane, child, None);
    scene.layout(child, 50, 0, 150, 100);
    scene.set_background_color(child, Color::RED);
    scene.set_scroll(pane, 30, 0);

    let mut canvas = RecordingCanvas::new();
    scene.render(&mut canvas, 0);
    assert_eq!(
        canvas.fills()[1],
        (20.0, 0.0, 100.0, 100.0, Color::RED),
        "children draw at bounds minus the parent scroll"
    );
}
