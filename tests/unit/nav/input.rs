use super::*;

#[test]
fn default_table_covers_player_controls() {
    let keys = KeyBindings::default();
    assert_eq!(keys.lookup(KeySym::Char('s')), Some(Intent::Advance));
    assert_eq!(keys.lookup(KeySym::Char('S')), Some(Intent::Advance));
    assert_eq!(keys.lookup(KeySym::ArrowDown), Some(Intent::Advance));
    assert_eq!(keys.lookup(KeySym::Char('w')), Some(Intent::Retreat));
    assert_eq!(keys.lookup(KeySym::Char('W')), Some(Intent::Retreat));
    assert_eq!(keys.lookup(KeySym::ArrowUp), Some(Intent::Retreat));
    assert_eq!(keys.lookup(KeySym::Space), Some(Intent::TogglePause));
    assert_eq!(keys.lookup(KeySym::Char(' ')), Some(Intent::TogglePause));
    assert_eq!(keys.lookup(KeySym::Char('H')), Some(Intent::ToggleUi));
    assert_eq!(keys.lookup(KeySym::Char('Q')), Some(Intent::Quit));
}

#[test]
fn unbound_keys_resolve_to_nothing() {
    let keys = KeyBindings::default();
    assert_eq!(keys.lookup(KeySym::Char('x')), None);
    assert_eq!(keys.lookup(KeySym::ArrowLeft), None);
    assert_eq!(keys.lookup(KeySym::Escape), None);
    assert_eq!(keys.lookup(KeySym::Other), None);
}

#[test]
fn bind_replaces_previous_binding() {
    let mut keys = KeyBindings::default();
    keys.bind(KeySym::Char('Q'), Intent::ToggleUi);
    keys.bind(KeySym::Escape, Intent::Quit);
    assert_eq!(keys.lookup(KeySym::Char('q')), Some(Intent::ToggleUi));
    assert_eq!(keys.lookup(KeySym::Escape), Some(Intent::Quit));
    assert_eq!(
        keys.iter().filter(|(k, _)| *k == KeySym::Char('q')).count(),
        1
    );
}

#[test]
fn empty_table_binds_nothing() {
    assert_eq!(KeyBindings::empty().lookup(KeySym::Char('q')), None);
}
