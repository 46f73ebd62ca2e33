//! End-to-end playback: feed a whole generated trace through a fresh player
//! and check the final visual state matches the sort's real outcome.

use qsviz_core::{sort, validate_trace};
use qsviz_player::{frame, PlayerState};

#[test]
fn full_playback_lands_on_the_sorted_arrangement() {
    let input = vec![14, 3, 9, -2, 3, 21, 0, 7, -5, 11];
    let mut direct = input.clone();
    let trace = sort(&mut direct);
    validate_trace(&trace).unwrap();

    let mut player = PlayerState::new(&trace.input);
    for ev in &trace.events {
        player.apply(ev).unwrap();
    }

    assert_eq!(player.arrangement(), direct.as_slice());
    assert_eq!(player.applied(), trace.events.len());

    // Every partition is followed by a Prepare, and every opened depth by a
    // Collapse, so markers are gone and only the root window survives.
    assert_eq!(player.pointers().count(), 0);
    let windows: Vec<_> = player.windows().collect();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].0, 0);
}

#[test]
fn each_playback_gets_independent_state() {
    let mut v = vec![2, 1];
    let trace = sort(&mut v);

    let mut first = PlayerState::new(&trace.input);
    for ev in &trace.events {
        first.apply(ev).unwrap();
    }
    // A second run starts from the pristine input, not the first run's end.
    let second = PlayerState::new(&trace.input);
    assert_eq!(second.arrangement(), &[2, 1]);
    assert_eq!(second.applied(), 0);
    assert!(frame(&second).contains('2'));
}
