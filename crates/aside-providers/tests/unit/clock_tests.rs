//! Unit tests for clocks

use aside_domain::Clock;
use aside_providers::{ManualClock, SystemClock};
use std::time::Duration;

#[test]
fn test_manual_clock_reads_what_was_set() {
    let clock = ManualClock::at_secs(125);
    assert_eq!(clock.now_secs(), 125);

    clock.set_secs(180);
    assert_eq!(clock.now(), Duration::from_secs(180));
}

#[test]
fn test_manual_clock_clones_share_time() {
    let clock = ManualClock::at_secs(10);
    let other = clock.clone();

    clock.advance(Duration::from_millis(1500));

    assert_eq!(other.now(), Duration::from_millis(11_500));
    assert_eq!(other.now_secs(), 11);
}

#[test]
fn test_system_clock_is_after_epoch() {
    assert!(SystemClock.now_secs() > 1_600_000_000);
}
