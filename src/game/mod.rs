use std::time::Duration;

use crate::basic::{board, Digit, GridDim, Point};
use crate::config::{Config, ConfigError};
use crate::item::ItemField;
use crate::sequence::DigitSequence;
use crate::snake::Snake;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeathCause {
    OutOfBounds,
    SelfCollision,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Collected { digit: Digit, matched: bool },
    Died(DeathCause),
}

/// One running session: a snake chasing the digits of pi on a board
///
/// Everything is driven by [`update`](Self::update); the host only
/// feeds it the clock and the accumulated input delta.
pub struct Game {
    config: Config,
    snake: Snake,
    items: ItemField,
    sequence: DigitSequence,
    score: u32,
    best: u32,
    last_growth: Option<Duration>,
}

impl Game {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            snake: Self::spawn_snake(&config),
            items: ItemField::new(config.seed),
            sequence: DigitSequence::default(),
            score: 0,
            best: 0,
            last_growth: None,
            config,
        })
    }

    fn spawn_snake(config: &Config) -> Snake {
        Snake::spawn(
            config.grid_dim(),
            config.start_len,
            config.start_speed,
            config.min_speed,
        )
    }

    /// Runs one tick: steer, move, resolve deaths and growth, then
    /// collect and replace items
    ///
    /// `now` is time since session start, `input_delta` the steering
    /// input accumulated since the last tick. On death the board is
    /// wiped and a fresh snake spawned; items reappear on the next
    /// tick.
    pub fn update(&mut self, now: Duration, input_delta: Point) -> Vec<Event> {
        let mut events = Vec::new();

        self.snake.steer(input_delta);
        self.snake.advance(now);

        if self.snake.is_out_of_bounds(self.grid_dim()) {
            events.push(Event::Died(DeathCause::OutOfBounds));
            self.respawn();
            return events;
        }
        if self.snake.is_collided_with_self() {
            events.push(Event::Died(DeathCause::SelfCollision));
            self.respawn();
            return events;
        }

        // passive growth, catching up if ticks were missed
        let mut last_growth = *self.last_growth.get_or_insert(now);
        while now.saturating_sub(last_growth) >= self.config.growth_interval {
            last_growth += self.config.growth_interval;
            self.snake.grow(self.config.growth_increment);
            self.snake.accelerate(self.config.acceleration);
        }
        self.last_growth = Some(last_growth);

        let head = self.snake.head();
        let occupied = board::occupied_cells(&mut self.snake);
        for digit in self.items.reconcile(self.grid_dim(), head, &occupied) {
            let matched = self.sequence.offer(digit);
            if matched {
                self.score += 1;
                self.best = self.best.max(self.score);
            }
            events.push(Event::Collected { digit, matched });
        }

        events
    }

    /// Starts the run over: fresh snake, empty board, sequence rewound;
    /// the best score survives
    pub fn respawn(&mut self) {
        self.snake = Self::spawn_snake(&self.config);
        self.items.clear();
        self.sequence.reset();
        self.score = 0;
        self.last_growth = None;
    }

    pub fn grid_dim(&self) -> GridDim {
        self.config.grid_dim()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn items(&self) -> &ItemField {
        &self.items
    }

    pub fn sequence(&self) -> &DigitSequence {
        &self.sequence
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic::Cell;

    fn test_config() -> Config {
        Config::default()
            .grid(8, 8)
            .start_speed(Duration::from_millis(100))
            .min_speed(Duration::from_millis(10))
            .seed(Some(3))
    }

    // park the snake on `cell` without advancing the clock
    fn teleport(snake: &mut Snake, cell: Cell) {
        snake.body.nodes = vec![cell; 2];
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Game::new(Config::default().grid(4, 4));
        assert!(matches!(result, Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn test_first_update_populates_items() {
        let mut game = Game::new(test_config()).unwrap();
        let events = game.update(Duration::ZERO, Point::default());

        assert!(events.is_empty());
        assert_eq!(game.items().cells().count(), 10);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Cell { x: 4, y: 4 });
    }

    #[test]
    fn test_collecting_digits_scores_matches_only() {
        let mut game = Game::new(test_config()).unwrap();
        game.update(Duration::ZERO, Point::default());

        // park the head on the digit 3, the one the sequence wants
        let target = game
            .items()
            .cells()
            .find(|&(digit, _)| digit == 3)
            .map(|(_, cell)| cell)
            .unwrap();
        teleport(game.snake_mut(), target);

        let events = game.update(Duration::ZERO, Point::default());
        assert_eq!(events, vec![Event::Collected { digit: 3, matched: true }]);
        assert_eq!(game.score(), 1);
        assert_eq!(game.best(), 1);
        assert_eq!(game.sequence().expected(), 1);

        // the collected digit is back on the board, off the head
        assert_eq!(game.items().cells().count(), 10);
        let replaced = game
            .items()
            .cells()
            .find(|&(digit, _)| digit == 3)
            .map(|(_, cell)| cell)
            .unwrap();
        assert_ne!(replaced, target);

        // a digit out of order is consumed but scores nothing
        let wrong = game
            .items()
            .cells()
            .find(|&(digit, _)| digit == 7)
            .map(|(_, cell)| cell)
            .unwrap();
        teleport(game.snake_mut(), wrong);

        let events = game.update(Duration::ZERO, Point::default());
        assert_eq!(events, vec![Event::Collected { digit: 7, matched: false }]);
        assert_eq!(game.score(), 1);
        assert_eq!(game.sequence().expected(), 1);
    }

    #[test]
    fn test_wall_death_resets_run_and_keeps_best() {
        let mut game = Game::new(test_config()).unwrap();
        game.update(Duration::ZERO, Point::default());

        // bank a point first so there is a best score to keep
        let target = game
            .items()
            .cells()
            .find(|&(digit, _)| digit == 3)
            .map(|(_, cell)| cell)
            .unwrap();
        teleport(game.snake_mut(), target);
        game.update(Duration::ZERO, Point::default());
        assert_eq!(game.score(), 1);

        // drive off the right edge
        teleport(game.snake_mut(), Cell { x: 7, y: 4 });
        let events = game.update(Duration::from_millis(100), Point::default());
        assert_eq!(events, vec![Event::Died(DeathCause::OutOfBounds)]);

        assert_eq!(game.snake().head(), Cell { x: 4, y: 4 });
        assert!(!game.snake().is_collided_with_self());
        assert_eq!(game.items().cells().count(), 0);
        assert_eq!(game.score(), 0);
        assert_eq!(game.best(), 1);
        assert_eq!(game.sequence().expected(), 3);

        // the board repopulates on the next tick
        game.update(Duration::from_millis(200), Point::default());
        assert_eq!(game.items().cells().count(), 10);
    }

    #[test]
    fn test_self_collision_death_respawns() {
        let mut game = Game::new(test_config()).unwrap();
        game.update(Duration::ZERO, Point::default());

        // a long snake boxed into its own side
        game.update(Duration::from_millis(200), Point { x: 0., y: 0. });
        game.snake_mut().grow(15);
        game.update(Duration::from_millis(400), Point { x: 0., y: 10. });
        game.update(Duration::from_millis(600), Point { x: -10., y: 0. });
        let events = game.update(Duration::from_millis(800), Point { x: 0., y: -10. });
        assert_eq!(events, vec![Event::Died(DeathCause::SelfCollision)]);
        assert_eq!(game.snake().head(), Cell { x: 4, y: 4 });
        assert!(!game.snake().is_collided_with_self());
    }

    #[test]
    fn test_growth_ticks_catch_up() {
        let config = Config::default()
            .start_speed(Duration::from_millis(300))
            .growth_interval(Duration::from_millis(1000))
            .seed(Some(3));
        let mut game = Game::new(config).unwrap();
        game.update(Duration::ZERO, Point::default());
        assert_eq!(game.snake().body.max_len, 5);

        // 2.1s covers two whole growth intervals
        game.update(Duration::from_millis(2100), Point::default());
        assert_eq!(game.snake().body.max_len, 9);
        assert_eq!(game.snake().speed, Duration::from_millis(290));

        // and the leftover 100ms carries into the next one
        game.update(Duration::from_millis(3000), Point::default());
        assert_eq!(game.snake().body.max_len, 11);
        assert_eq!(game.snake().speed, Duration::from_millis(285));
    }

    #[test]
    fn test_manual_respawn() {
        let mut game = Game::new(test_config()).unwrap();
        game.update(Duration::ZERO, Point::default());

        let target = game
            .items()
            .cells()
            .find(|&(digit, _)| digit == 3)
            .map(|(_, cell)| cell)
            .unwrap();
        teleport(game.snake_mut(), target);
        game.update(Duration::ZERO, Point::default());
        assert_eq!(game.score(), 1);

        game.respawn();
        assert_eq!(game.score(), 0);
        assert_eq!(game.best(), 1);
        assert_eq!(game.items().cells().count(), 0);
        assert_eq!(game.snake().head(), Cell { x: 4, y: 4 });
    }
}
