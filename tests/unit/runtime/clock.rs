use super::*;

#[test]
fn rejects_bad_parameters() {
    assert!(TickClock::new(0.0, 4).is_err());
    assert!(TickClock::new(-1.0, 4).is_err());
    assert!(TickClock::new(0.1, 0).is_err());
    assert!(TickClock::new(0.1, 4).is_ok());
}

#[test]
fn accumulates_fractional_deltas() {
    let mut clock = TickClock::new(0.1, 10).unwrap();
    assert_eq!(clock.advance(0.04), 0);
    assert_eq!(clock.advance(0.04), 0);
    assert_eq!(clock.advance(0.04), 1);
}

#[test]
fn whole_multiples_run_multiple_ticks() {
    let mut clock = TickClock::new(0.1, 10).unwrap();
    assert_eq!(clock.advance(0.35), 3);
    // Remainder carries over (with a little slack for float error).
    assert_eq!(clock.advance(0.06), 1);
}

#[test]
fn backlog_is_capped_and_excess_dropped() {
    let mut clock = TickClock::new(0.1, 3).unwrap();
    assert_eq!(clock.advance(5.0), 3);
    // The dropped backlog must not burst out later.
    assert_eq!(clock.advance(0.0), 0);
    assert_eq!(clock.advance(0.1), 1);
}

#[test]
fn negative_deltas_are_ignored() {
    let mut clock = TickClock::new(0.1, 4).unwrap();
    assert_eq!(clock.advance(-5.0), 0);
    assert_eq!(clock.advance(0.1), 1);
}
