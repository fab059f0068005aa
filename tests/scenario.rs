//! A seeded session stepped tick by tick, checking the clock-driven
//! movement and the respawn cycle end to end.

use std::time::Duration;

use pi_snake::basic::{Cell, Point};
use pi_snake::config::Config;
use pi_snake::game::{DeathCause, Event, Game};

fn test_config() -> Config {
    Config::default()
        .grid(12, 8)
        .start_speed(Duration::from_millis(100))
        .min_speed(Duration::from_millis(10))
        .seed(Some(7))
}

fn no_deaths(events: &[Event]) -> bool {
    events.iter().all(|event| !matches!(event, Event::Died(_)))
}

#[test]
fn test_seeded_session_walks_into_the_wall() {
    let mut game = Game::new(test_config()).unwrap();

    // first tick adopts the clock and scatters all ten digits
    let events = game.update(Duration::ZERO, Point::default());
    assert!(events.is_empty());
    assert_eq!(game.items().cells().count(), 10);
    assert_eq!(game.snake().head(), Cell { x: 6, y: 4 });
    assert_eq!(game.sequence().expected(), 3);

    // steer down before the first move lands
    let events = game.update(Duration::from_millis(50), Point { x: 0., y: 10. });
    assert!(no_deaths(&events));
    assert_eq!(game.snake().head(), Cell { x: 6, y: 4 });

    // one cell per 100ms, straight toward the bottom wall
    for (now, y) in [(150, 5), (250, 6), (350, 7)] {
        let events = game.update(Duration::from_millis(now), Point::default());
        assert!(no_deaths(&events));
        assert_eq!(game.snake().head(), Cell { x: 6, y });
    }

    // row 8 is off a board of height 8
    let events = game.update(Duration::from_millis(450), Point::default());
    assert_eq!(events, vec![Event::Died(DeathCause::OutOfBounds)]);
    assert_eq!(game.snake().head(), Cell { x: 6, y: 4 });
    assert_eq!(game.items().cells().count(), 0);
    assert_eq!(game.score(), 0);

    // the replacement adopts the clock and the board repopulates
    let events = game.update(Duration::from_millis(500), Point::default());
    assert!(no_deaths(&events));
    assert_eq!(game.snake().head(), Cell { x: 6, y: 4 });
    assert_eq!(game.items().cells().count(), 10);
}

#[test]
fn test_same_seed_same_session() {
    let mut a = Game::new(test_config()).unwrap();
    let mut b = Game::new(test_config()).unwrap();

    let script = [
        (0, Point { x: 0., y: 0. }),
        (150, Point { x: 0., y: 10. }),
        (250, Point { x: 10., y: 0. }),
        (400, Point { x: 0., y: 0. }),
        (650, Point { x: 0., y: -10. }),
        (900, Point { x: 0., y: 0. }),
    ];

    for (now, delta) in script {
        let events_a = a.update(Duration::from_millis(now), delta);
        let events_b = b.update(Duration::from_millis(now), delta);
        assert_eq!(events_a, events_b);
    }

    assert_eq!(a.snake().head(), b.snake().head());
    assert_eq!(a.score(), b.score());
    assert_eq!(
        a.items().cells().collect::<Vec<_>>(),
        b.items().cells().collect::<Vec<_>>()
    );
}
