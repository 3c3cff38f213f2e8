use super::*;
use crate::nav::input::KeySym;

#[test]
fn replays_batches_then_requests_close() {
    let mut p = ScriptedPresenter::new([
        vec![InputEvent::Key(KeySym::Space)],
        vec![],
    ]);
    let t = Duration::from_millis(33);
    assert_eq!(p.poll_input(t).unwrap(), vec![InputEvent::Key(KeySym::Space)]);
    assert!(p.poll_input(t).unwrap().is_empty());
    assert_eq!(p.remaining(), 0);
    assert_eq!(p.poll_input(t).unwrap(), vec![InputEvent::CloseRequested]);
    assert_eq!(p.poll_timeouts(), &[t, t, t]);
}

#[test]
fn records_frames_and_delays() {
    let mut p = ScriptedPresenter::new([]);
    p.present(&Frame::black(2, 2)).unwrap();
    p.present(&Frame::solid(2, 2, [1, 2, 3])).unwrap();
    p.delay(Duration::from_millis(16));
    assert_eq!(p.presented(), 2);
    assert_eq!(p.frames().len(), 2);
    assert_eq!(p.frames()[1].pixel(1, 1), [1, 2, 3]);
    assert_eq!(p.delays(), &[Duration::from_millis(16)]);
}

#[test]
fn discard_frames_only_counts() {
    let mut p = ScriptedPresenter::new([]).discard_frames();
    p.push_batch(vec![InputEvent::CloseRequested]);
    p.present(&Frame::black(2, 2)).unwrap();
    assert_eq!(p.presented(), 1);
    assert!(p.frames().is_empty());
    assert_eq!(p.remaining(), 1);
}
