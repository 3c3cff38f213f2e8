use super::*;
use crate::nav::input::KeySym;

fn playback() -> PlaybackState {
    PlaybackState::new(Canvas::new(720, 1280).unwrap(), 20, true)
}

fn nav() -> NavigationState {
    NavigationState::new(GestureConfig::default(), KeyBindings::default())
}

fn drag(nav: &mut NavigationState, pb: &PlaybackState, from: (i32, i32), to: (i32, i32)) {
    nav.handle(InputEvent::PointerDown { x: from.0, y: from.1 }, pb);
    nav.handle(InputEvent::PointerUp { x: to.0, y: to.1 }, pb);
}

#[test]
fn advance_cycles_back_to_start() {
    for len in 1..=7 {
        let mut pb = playback();
        pb.index = len / 2;
        let start = pb.index;
        for _ in 0..len {
            pb.index = pb.next_index(len).unwrap();
        }
        assert_eq!(pb.index, start, "len {len}");
    }
}

#[test]
fn wrap_at_both_ends() {
    let mut pb = playback();
    pb.index = 2;
    assert_eq!(pb.next_index(3), Some(0));
    pb.index = 0;
    assert_eq!(pb.prev_index(3), Some(2));
    assert_eq!(pb.next_index(0), None);
    assert_eq!(pb.prev_index(0), None);
}

#[test]
fn pointer_down_enters_dragging() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::PointerDown { x: 5, y: 600 }, &pb);
    assert_eq!(n.phase(), NavPhase::Dragging);
    assert_eq!(
        n.drag(),
        PointerDragState {
            down: true,
            start_x: 5,
            start_y: 600
        }
    );
}

#[test]
fn swipe_threshold_boundary() {
    let pb = playback();

    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (300, 501));
    assert!(n.take_intents().is_empty(), "dy = 99 must not navigate");
    assert_eq!(n.phase(), NavPhase::Idle);

    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (300, 500));
    assert_eq!(n.take_intents(), vec![Intent::Advance]);
    assert_eq!(n.phase(), NavPhase::TransitionPending);

    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (300, 700));
    assert_eq!(n.take_intents(), vec![Intent::Retreat]);
}

#[test]
fn small_movement_is_never_a_swipe() {
    let pb = playback();
    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (319, 619));
    assert!(n.take_intents().is_empty());
    drag(&mut n, &pb, (300, 600), (281, 581));
    assert!(n.take_intents().is_empty());
}

#[test]
fn tap_on_other_category_button_switches() {
    let pb = playback();
    let mut n = nav();
    n.register_buttons(vec![Rect::new(570, 20, 60, 30), Rect::new(640, 20, 60, 30)]);

    drag(&mut n, &pb, (650, 30), (655, 35));
    assert_eq!(n.take_intents(), vec![Intent::SwitchCategory(1)]);
    n.finish_transition();
    assert_eq!(n.phase(), NavPhase::Idle);

    // Current category: no intent.
    drag(&mut n, &pb, (580, 30), (580, 30));
    assert!(n.take_intents().is_empty());

    // Outside every button.
    drag(&mut n, &pb, (100, 30), (100, 30));
    assert!(n.take_intents().is_empty());
}

#[test]
fn tap_uses_release_position_for_hit_test() {
    let pb = playback();
    let mut n = nav();
    n.register_buttons(vec![Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]);
    // Pressed just outside button 1, released inside it, still within tap tolerance.
    drag(&mut n, &pb, (35, 5), (30, 5));
    assert_eq!(n.take_intents(), vec![Intent::SwitchCategory(1)]);
}

#[test]
fn ambiguous_drag_emits_nothing() {
    let pb = playback();
    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (400, 650));
    assert!(n.take_intents().is_empty());
    assert_eq!(n.phase(), NavPhase::Idle);
}

#[test]
fn pointer_up_without_down_is_ignored() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::PointerUp { x: 0, y: 0 }, &pb);
    assert!(n.take_intents().is_empty());
    assert_eq!(n.phase(), NavPhase::Idle);
}

#[test]
fn keys_resolve_through_the_table() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::Key(KeySym::Char('h')), &pb);
    assert_eq!(n.take_intents(), vec![Intent::ToggleUi]);
    assert_eq!(n.phase(), NavPhase::Idle);

    n.handle(InputEvent::Key(KeySym::ArrowDown), &pb);
    assert_eq!(n.take_intents(), vec![Intent::Advance]);
    assert_eq!(n.phase(), NavPhase::TransitionPending);
    n.finish_transition();
    assert_eq!(n.phase(), NavPhase::Idle);
}

#[test]
fn overwritten_navigation_key_leaves_phase_idle() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::Key(KeySym::Char('s')), &pb);
    n.handle(InputEvent::Key(KeySym::Char('h')), &pb);
    assert_eq!(n.take_intents(), vec![Intent::ToggleUi]);
    assert_eq!(n.phase(), NavPhase::Idle);

    drag(&mut n, &pb, (4, 120), (4, 0));
    assert_eq!(n.take_intents(), vec![Intent::Advance]);
}

#[test]
fn press_after_resolved_swipe_in_same_poll_starts_a_new_drag() {
    let pb = playback();
    let mut n = nav();
    drag(&mut n, &pb, (300, 600), (300, 400));
    n.handle(InputEvent::PointerDown { x: 10, y: 20 }, &pb);
    assert_eq!(n.phase(), NavPhase::Dragging);

    assert_eq!(n.take_intents(), vec![Intent::Advance]);
    assert_eq!(n.phase(), NavPhase::TransitionPending);
    n.finish_transition();
    assert_eq!(n.phase(), NavPhase::Dragging);

    n.handle(InputEvent::PointerUp { x: 10, y: 220 }, &pb);
    assert_eq!(n.take_intents(), vec![Intent::Retreat]);
}

#[test]
fn one_pointer_and_one_key_intent_per_poll() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::Key(KeySym::Char('h')), &pb);
    n.handle(InputEvent::Key(KeySym::Space), &pb);
    drag(&mut n, &pb, (300, 600), (300, 400));
    // Last key wins; the pointer intent is honored first.
    assert_eq!(n.take_intents(), vec![Intent::Advance, Intent::TogglePause]);
    assert!(n.take_intents().is_empty());
}

#[test]
fn close_request_quits() {
    let pb = playback();
    let mut n = nav();
    n.handle(InputEvent::CloseRequested, &pb);
    assert_eq!(n.take_intents(), vec![Intent::Quit]);
}

#[test]
fn gesture_thresholds_are_configurable() {
    let pb = playback();
    let mut n = NavigationState::new(
        GestureConfig {
            swipe_threshold_px: 40,
            tap_tolerance_px: 5,
        },
        KeyBindings::default(),
    );
    drag(&mut n, &pb, (0, 100), (0, 60));
    assert_eq!(n.take_intents(), vec![Intent::Advance]);
}
