use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::basic::{board, Cell, Digit, GridDim};

pub const DIGIT_COUNT: usize = 10;

/// The collectible digits 0 through 9 and where they sit on the board
///
/// Each digit exists at most once. The field owns its rng so that a
/// seeded session replays the same placements.
pub struct ItemField {
    cells: [Option<Cell>; DIGIT_COUNT],
    rng: StdRng,
}

impl ItemField {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { cells: [None; DIGIT_COUNT], rng }
    }

    /// Collects every digit sitting under the head, then places the
    /// missing digits on cells free of the snake and of each other
    ///
    /// Returns the collected digits in ascending order. Placement
    /// draws random cells and retries on conflict, so it is skipped
    /// while the board has no free cell left.
    pub fn reconcile(&mut self, board_dim: GridDim, head: Cell, occupied: &[Cell]) -> Vec<Digit> {
        let mut collected = Vec::new();
        for (digit, cell) in self.cells.iter_mut().enumerate() {
            if *cell == Some(head) {
                *cell = None;
                collected.push(digit as Digit);
            }
        }

        // sorted so candidates can be checked and inserted by binary search
        let mut blocked = Vec::with_capacity(occupied.len() + DIGIT_COUNT + 1);
        blocked.push(head);
        blocked.extend_from_slice(occupied);
        blocked.extend(self.cells.iter().flatten().copied());
        blocked.sort_unstable();
        blocked.dedup();

        let board_cells = (board_dim.x * board_dim.y) as usize;
        for cell in self.cells.iter_mut() {
            if cell.is_some() {
                continue;
            }
            if blocked.len() >= board_cells {
                // board is full, placement resumes once cells free up
                break;
            }
            loop {
                let candidate = board::random_cell(board_dim, &mut self.rng);
                if let Err(idx) = blocked.binary_search(&candidate) {
                    blocked.insert(idx, candidate);
                    *cell = Some(candidate);
                    break;
                }
            }
        }

        collected
    }

    /// Digits currently on the board, in digit order
    pub fn cells(&self) -> impl Iterator<Item = (Digit, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(digit, cell)| cell.map(|cell| (digit as Digit, cell)))
    }

    pub fn clear(&mut self) {
        self.cells = [None; DIGIT_COUNT];
    }
}

#[test]
fn test_placement_fills_free_cells_and_terminates() {
    use itertools::Itertools;

    // 9 cells, head plus one body cell leaves 7 free for 10 digits
    let board_dim = GridDim { x: 3, y: 3 };
    let head = Cell { x: 1, y: 1 };
    let occupied = [Cell { x: 1, y: 2 }];

    let mut field = ItemField::new(Some(12));
    let collected = field.reconcile(board_dim, head, &occupied);
    assert!(collected.is_empty());

    let placed: Vec<Cell> = field.cells().map(|(_, cell)| cell).collect();
    assert_eq!(placed.len(), 7);
    assert!(placed.iter().all_unique());
    assert!(placed.iter().all(|&cell| board_dim.contains(cell)));
    assert!(!placed.contains(&head));
    assert!(!placed.contains(&occupied[0]));
}

#[test]
fn test_full_board_skips_placement() {
    let board_dim = GridDim { x: 2, y: 1 };
    let head = Cell { x: 0, y: 0 };
    let occupied = [Cell { x: 1, y: 0 }];

    let mut field = ItemField::new(Some(12));
    let collected = field.reconcile(board_dim, head, &occupied);
    assert!(collected.is_empty());
    assert_eq!(field.cells().count(), 0);
}

#[test]
fn test_collection_and_replacement() {
    let board_dim = GridDim { x: 5, y: 5 };
    let mut field = ItemField::new(Some(7));

    let collected = field.reconcile(board_dim, Cell { x: 2, y: 2 }, &[]);
    assert!(collected.is_empty());
    assert_eq!(field.cells().count(), 10);

    // walk the head onto the digit 3 and reconcile again
    let target = field
        .cells()
        .find(|&(digit, _)| digit == 3)
        .map(|(_, cell)| cell)
        .unwrap();
    let collected = field.reconcile(board_dim, target, &[]);
    assert_eq!(collected, vec![3]);

    // the digit came straight back somewhere off the head
    assert_eq!(field.cells().count(), 10);
    let replaced = field
        .cells()
        .find(|&(digit, _)| digit == 3)
        .map(|(_, cell)| cell)
        .unwrap();
    assert_ne!(replaced, target);
}

#[test]
fn test_seeded_runs_match() {
    let board_dim = GridDim { x: 8, y: 8 };
    let head = Cell { x: 4, y: 4 };

    let mut a = ItemField::new(Some(99));
    let mut b = ItemField::new(Some(99));
    a.reconcile(board_dim, head, &[]);
    b.reconcile(board_dim, head, &[]);

    assert_eq!(a.cells().collect::<Vec<_>>(), b.cells().collect::<Vec<_>>());
}

#[test]
fn test_clear_empties_the_field() {
    let board_dim = GridDim { x: 5, y: 5 };
    let mut field = ItemField::new(Some(7));
    field.reconcile(board_dim, Cell { x: 2, y: 2 }, &[]);
    assert_eq!(field.cells().count(), 10);

    field.clear();
    assert_eq!(field.cells().count(), 0);
}
