use rand::Rng;

use crate::basic::{Cell, GridDim};
use crate::snake::Snake;

/// All cells currently covered by the snake, head included,
/// sorted in board order and deduplicated
///
/// Walking the body trims stale nodes, hence the `&mut`.
pub fn occupied_cells(snake: &mut Snake) -> Vec<Cell> {
    // upper bound
    let max_occupied_cells = snake.body.max_len + 1;
    let mut occupied_cells = Vec::with_capacity(max_occupied_cells);
    occupied_cells.push(snake.head());
    occupied_cells.extend(snake.occupied_cells());
    occupied_cells.sort_unstable();
    occupied_cells.dedup();
    occupied_cells
}

pub fn random_cell(board_dim: GridDim, rng: &mut impl Rng) -> Cell {
    Cell {
        x: rng.gen_range(0..board_dim.x),
        y: rng.gen_range(0..board_dim.y),
    }
}

#[test]
fn test_occupied_cells_sorted_and_unique() {
    use crate::basic::Dir;
    use crate::snake::Body;
    use std::time::Duration;

    // a polyline that crosses itself emits some cells twice
    let mut snake = Snake::spawn(
        GridDim { x: 10, y: 10 },
        20,
        Duration::from_millis(100),
        Duration::from_millis(10),
    );
    snake.body = Body::new(Cell { x: 2, y: 2 }, Dir::U, 20);
    snake.body.nodes = vec![
        Cell { x: 2, y: 2 },
        Cell { x: 2, y: 5 },
        Cell { x: 5, y: 5 },
        Cell { x: 5, y: 3 },
        Cell { x: 2, y: 3 }, // crosses the first segment at <2, 3>
        Cell { x: 0, y: 3 },
    ];

    let cells = occupied_cells(&mut snake);

    assert!(cells.windows(2).all(|w| w[0] < w[1]));
    assert!(cells.contains(&snake.head()));
    assert!(cells.contains(&Cell { x: 2, y: 3 }));
}

#[test]
fn test_random_cell_in_bounds() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let board_dim = GridDim { x: 7, y: 3 };
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let cell = random_cell(board_dim, &mut rng);
        assert!(board_dim.contains(cell), "{:?} out of bounds", cell);
    }
}
