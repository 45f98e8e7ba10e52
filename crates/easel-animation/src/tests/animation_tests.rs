use super::*;

#[test]
fn starts_initialized_and_inactive() {
    let animation = Animation::new(100);
    assert_eq!(animation.state(), AnimationState::Initialized);
    assert!(!animation.is_active());
    assert_eq!(animation.progress(), 0.0);
}

#[test]
fn calculate_before_start_is_inert() {
    let mut animation = Animation::new(100);
    assert!(!animation.calculate(50));
    assert_eq!(animation.state(), AnimationState::Initialized);
    assert_eq!(animation.progress(), 0.0);
}

#[test]
fn start_time_latches_on_first_calculate() {
    let mut animation = Animation::new(100);
    animation.start();
    assert!(animation.calculate(1000));
    assert_eq!(animation.progress(), 0.0);
    assert!(animation.calculate(1050));
    assert_eq!(animation.progress(), 0.5);
}

#[test]
fn completion_is_exact_and_marks_ended() {
    let mut animation = Animation::new(100);
    animation.start();
    animation.start_at(0);
    assert!(animation.calculate(99));
    assert!(!animation.calculate(100));
    assert_eq!(animation.progress(), 1.0);
    assert_eq!(animation.state(), AnimationState::Ended);
}

#[test]
fn timestamps_before_start_yield_zero_progress() {
    let mut animation = Animation::new(100);
    animation.start();
    animation.start_at(500);
    assert!(animation.calculate(400));
    assert_eq!(animation.progress(), 0.0);
    assert_eq!(animation.state(), AnimationState::Started);
}

#[test]
fn progress_never_regresses() {
    let mut animation = Animation::new(100);
    animation.start();
    animation.start_at(0);
    animation.calculate(60);
    assert_eq!(animation.progress(), 0.6);
    animation.calculate(30);
    assert_eq!(animation.progress(), 0.6);
    animation.calculate(60);
    assert_eq!(animation.progress(), 0.6);
    animation.calculate(80);
    assert_eq!(animation.progress(), 0.8);
}

#[test]
fn start_at_only_latches_once() {
    let mut animation = Animation::new(100);
    animation.start();
    animation.calculate(200);
    animation.start_at(300);
    animation.calculate(250);
    assert_eq!(animation.progress(), 0.5);
}

#[test]
fn zero_duration_completes_on_first_drive() {
    let mut animation = Animation::new(0);
    animation.start();
    assert!(!animation.calculate(10));
    assert_eq!(animation.progress(), 1.0);
    assert_eq!(animation.state(), AnimationState::Ended);
}

#[test]
fn force_stop_ends_without_finishing() {
    let mut animation = Animation::new(100);
    animation.start();
    animation.start_at(0);
    animation.calculate(40);
    animation.force_stop();
    assert_eq!(animation.state(), AnimationState::Ended);
    assert_eq!(animation.progress(), 0.4);
    assert!(!animation.calculate(80));
    assert_eq!(animation.progress(), 0.4);
}

#[test]
fn ended_animation_can_be_restarted() {
    let mut animation = Animation::new(10);
    animation.start();
    animation.calculate(0);
    animation.calculate(10);
    assert_eq!(animation.state(), AnimationState::Ended);
    animation.start();
    assert!(animation.calculate(100));
    assert_eq!(animation.progress(), 0.0);
    assert_eq!(animation.state(), AnimationState::Started);
}

#[test]
fn easing_endpoints_are_fixed() {
    let easings = [
        Easing::Linear,
        Easing::Accelerate,
        Easing::Decelerate,
        Easing::AccelerateDecelerate,
    ];
    for easing in easings {
        assert!(easing.transform(0.0).abs() < 1e-6, "start for {easing:?}");
        assert!(
            (easing.transform(1.0) - 1.0).abs() < 1e-6,
            "end for {easing:?}"
        );
    }
}

#[test]
fn easing_midpoint_ordering() {
    let accelerate = Easing::Accelerate.transform(0.5);
    let linear = Easing::Linear.transform(0.5);
    let decelerate = Easing::Decelerate.transform(0.5);
    assert!(accelerate < linear);
    assert!(linear < decelerate);
    assert!((Easing::AccelerateDecelerate.transform(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn interpolated_progress_applies_easing() {
    let mut animation = Animation::new(100);
    animation.set_easing(Easing::Accelerate);
    animation.start();
    animation.start_at(0);
    animation.calculate(50);
    assert_eq!(animation.progress(), 0.5);
    assert_eq!(animation.interpolated_progress(), 0.25);
}
