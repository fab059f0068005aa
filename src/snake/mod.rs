use std::time::Duration;

pub use body::{Body, Cells, MIN_STEER_DELTA};

use crate::basic::{Cell, Dir, GridDim, Point};

mod body;

pub struct Snake {
    pub body: Body,
    /// Time the head takes to advance by one cell
    pub speed: Duration,
    /// Floor below which [`accelerate`](Self::accelerate) will not push `speed`
    min_speed: Duration,
    /// Time of the last committed move, `None` until the first
    /// `advance` after a spawn
    last_move: Option<Duration>,
    collided: bool,
}

impl Snake {
    /// A fresh snake at the center of the board, heading right
    pub fn spawn(board_dim: GridDim, len: usize, speed: Duration, min_speed: Duration) -> Self {
        debug_assert!(min_speed <= speed);
        Self {
            body: Body::new(board_dim.center(), Dir::R, len),
            speed,
            min_speed,
            last_move: None,
            collided: false,
        }
    }

    pub fn head(&self) -> Cell {
        self.body.head()
    }

    pub fn steer(&mut self, delta: Point) {
        self.body.steer(delta);
    }

    /// Moves the head forward by however many whole cells the elapsed
    /// time covers
    ///
    /// `now` is time since simulation start. The first call after a
    /// spawn only records `now`, so a snake never jumps ahead no
    /// matter how late it is spawned. Landing on a body cell freezes
    /// the snake in place; a collided snake stays frozen until it is
    /// replaced by a fresh spawn.
    pub fn advance(&mut self, now: Duration) {
        if self.collided || self.speed.is_zero() {
            return;
        }

        let last_move = *self.last_move.get_or_insert(now);
        let whole_cells = (now.saturating_sub(last_move).as_millis() / self.speed.as_millis()) as isize;
        if whole_cells > 0 {
            let head = self.body.head().translate(self.body.dir, whole_cells);
            if self.body.contains(head) {
                self.collided = true;
            } else {
                self.body.nodes[0] = head;
                self.last_move = Some(now);
            }
        }
    }

    /// Raises the length budget; the body catches up one cell per move
    pub fn grow(&mut self, cells: usize) {
        self.body.max_len += cells;
    }

    /// Shortens the per-cell move time, clamped to the speed floor
    pub fn accelerate(&mut self, by: Duration) {
        self.speed = self.speed.saturating_sub(by).max(self.min_speed);
    }

    pub fn is_collided_with_self(&self) -> bool {
        self.collided
    }

    /// Whether the head has left the board; edge cells still count as in
    pub fn is_out_of_bounds(&self, board_dim: GridDim) -> bool {
        !board_dim.contains(self.head())
    }

    /// See [`Body::occupied_cells`]
    pub fn occupied_cells(&mut self) -> Cells {
        self.body.occupied_cells()
    }
}

#[test]
fn test_advance_by_whole_cells() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    assert_eq!(snake.head(), Cell { x: 5, y: 5 });

    // first call adopts the clock without moving
    snake.advance(Duration::ZERO);
    assert_eq!(snake.head(), Cell { x: 5, y: 5 });

    // 250ms at 100ms per cell covers 2 whole cells, the remainder waits
    snake.advance(Duration::from_millis(250));
    assert_eq!(snake.head(), Cell { x: 7, y: 5 });
    assert!(!snake.is_collided_with_self());

    // 50ms more still hasn't completed the third cell
    snake.advance(Duration::from_millis(300));
    assert_eq!(snake.head(), Cell { x: 7, y: 5 });

    snake.advance(Duration::from_millis(350));
    assert_eq!(snake.head(), Cell { x: 8, y: 5 });
}

#[test]
fn test_late_spawn_does_not_teleport() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );

    // a replacement spawned long into the session adopts the clock
    snake.advance(Duration::from_secs(100));
    assert_eq!(snake.head(), Cell { x: 5, y: 5 });

    snake.advance(Duration::from_secs(100) + Duration::from_millis(150));
    assert_eq!(snake.head(), Cell { x: 6, y: 5 });
}

#[test]
fn test_steer_records_turn() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.advance(Duration::ZERO);
    snake.advance(Duration::from_millis(100));
    assert_eq!(snake.head(), Cell { x: 6, y: 5 });

    snake.steer(Point { x: 0., y: 10. });
    assert_eq!(snake.body.dir, Dir::D);
    assert_eq!(snake.body.nodes.len(), 3);

    snake.advance(Duration::from_millis(200));
    assert_eq!(snake.head(), Cell { x: 6, y: 6 });
}

#[test]
fn test_growth_extends_body() {
    let board_dim = GridDim { x: 30, y: 20 };
    let mut snake = Snake::spawn(
        board_dim,
        2,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.advance(Duration::ZERO);

    for i in 1..=6u64 {
        snake.advance(Duration::from_millis(100 * i));
    }
    assert_eq!(snake.occupied_cells().count(), 2);

    snake.grow(3);
    for i in 7..=12u64 {
        snake.advance(Duration::from_millis(100 * i));
    }
    assert_eq!(snake.occupied_cells().count(), 5);
}

#[test]
fn test_self_collision_freezes() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        20,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.advance(Duration::ZERO);

    // trace a box: right 2, down 2, left 2, then head back up into the
    // cell the walk started from
    snake.advance(Duration::from_millis(200));
    assert_eq!(snake.head(), Cell { x: 7, y: 5 });
    snake.steer(Point { x: 0., y: 10. });

    snake.advance(Duration::from_millis(400));
    assert_eq!(snake.head(), Cell { x: 7, y: 7 });
    snake.steer(Point { x: -10., y: 0. });

    snake.advance(Duration::from_millis(600));
    assert_eq!(snake.head(), Cell { x: 5, y: 7 });
    snake.steer(Point { x: 0., y: -10. });

    // the landing cell (5, 5) is still part of the body
    snake.advance(Duration::from_millis(800));
    assert!(snake.is_collided_with_self());
    assert_eq!(snake.head(), Cell { x: 5, y: 7 });

    // frozen for good, even after a long wait
    snake.advance(Duration::from_secs(100));
    assert!(snake.is_collided_with_self());
    assert_eq!(snake.head(), Cell { x: 5, y: 7 });
}

#[test]
fn test_passing_near_body_is_not_a_collision() {
    let board_dim = GridDim { x: 20, y: 20 };
    let mut snake = Snake::spawn(
        board_dim,
        4,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.advance(Duration::ZERO);

    // only the landing cell is checked, driving alongside the body is fine
    snake.advance(Duration::from_millis(300));
    assert_eq!(snake.head(), Cell { x: 13, y: 10 });
    snake.steer(Point { x: 0., y: 10. });
    snake.advance(Duration::from_millis(400));
    snake.steer(Point { x: -10., y: 0. });
    snake.advance(Duration::from_millis(700));
    assert_eq!(snake.head(), Cell { x: 10, y: 11 });
    assert!(!snake.is_collided_with_self());
}

#[test]
fn test_out_of_bounds_edges() {
    let board_dim = GridDim { x: 10, y: 10 };

    let cases = [
        ((0, 0), false),
        ((9, 9), false),
        ((0, 9), false),
        ((-1, 5), true),
        ((10, 5), true),
        ((5, -1), true),
        ((5, 10), true),
    ];

    for &((x, y), out) in &cases {
        let mut snake = Snake::spawn(
            board_dim,
            5,
            Duration::from_millis(100),
            Duration::from_millis(10),
        );
        snake.body.nodes = vec![Cell { x, y }; 2];
        assert_eq!(snake.is_out_of_bounds(board_dim), out, "head <{}, {}>", x, y);
    }
}

#[test]
fn test_replacement_resets_state() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.grow(7);
    snake.accelerate(Duration::from_millis(30));
    assert_eq!(snake.body.max_len, 12);
    assert_eq!(snake.speed, Duration::from_millis(70));

    let replacement = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    assert_eq!(replacement.body.max_len, 5);
    assert_eq!(replacement.speed, Duration::from_millis(100));
    assert_eq!(replacement.head(), Cell { x: 5, y: 5 });
    assert!(!replacement.is_collided_with_self());
}

#[test]
fn test_accelerate_clamps_at_floor() {
    let board_dim = GridDim { x: 10, y: 10 };
    let mut snake = Snake::spawn(
        board_dim,
        5,
        Duration::from_millis(20),
        Duration::from_millis(10),
    );

    snake.accelerate(Duration::from_millis(5));
    assert_eq!(snake.speed, Duration::from_millis(15));

    snake.accelerate(Duration::from_millis(50));
    assert_eq!(snake.speed, Duration::from_millis(10));

    // still moves at the floor speed
    snake.advance(Duration::ZERO);
    snake.advance(Duration::from_millis(10));
    assert_eq!(snake.head(), Cell { x: 6, y: 5 });
}
