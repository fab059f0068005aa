use super::dir::Dir;
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
};
use Dir::*;

#[derive(Eq, PartialEq, Copy, Clone, Div, Add, Hash)]
pub struct Cell {
    pub x: isize,
    pub y: isize,
}

pub type GridDim = Cell;

impl Cell {
    #[must_use]
    pub fn translate(self, dir: Dir, dist: isize) -> Self {
        let mut new_pos = self;

        match dir {
            U => new_pos.y -= dist,
            D => new_pos.y += dist,
            L => new_pos.x -= dist,
            R => new_pos.x += dist,
        }

        new_pos
    }

    // O(1)
    pub fn manhattan_distance(self, other: Self) -> usize {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as usize
    }

    pub fn contains(self, pos: Self) -> bool {
        (0..self.x).contains(&pos.x) && (0..self.y).contains(&pos.y)
    }

    pub fn center(self) -> Self {
        self / 2
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// row-major so sorted occupancy vectors match the board's index order
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.y.cmp(&other.y) {
            Ordering::Equal => self.x.cmp(&other.x),
            ord => ord,
        }
    }
}

#[test]
fn test_manhattan_distance() {
    [
        ((0, 0), (0, 0), 0),
        ((0, 0), (0, 1), 1),
        ((0, 0), (1, 0), 1),
        ((0, 0), (0, 10), 10),
        ((0, 0), (0, -10), 10),
        ((0, 10), (0, 0), 10),
        ((0, -10), (0, 0), 10),
        ((1, 1), (2, 2), 2),
        ((1, 1), (3, 3), 4),
        ((-2, 5), (2, 5), 4),
    ]
    .iter()
    .for_each(|&((x1, y1), (x2, y2), d)| {
        let p1 = Cell { x: x1, y: y1 };
        let p2 = Cell { x: x2, y: y2 };
        assert_eq!(p1.manhattan_distance(p2), d);
    });
}

#[test]
fn test_contains() {
    let board_dim = GridDim { x: 10, y: 8 };
    [
        ((0, 0), true),
        ((9, 7), true),
        ((5, 5), true),
        ((-1, 0), false),
        ((0, -1), false),
        ((10, 7), false),
        ((9, 8), false),
    ]
    .iter()
    .for_each(|&((x, y), inside)| {
        assert_eq!(board_dim.contains(Cell { x, y }), inside, "<{}, {}>", x, y);
    });
}

#[test]
fn test_translate() {
    let start = Cell { x: 3, y: 3 };
    [
        (U, 2, (3, 1)),
        (D, 2, (3, 5)),
        (L, 3, (0, 3)),
        (R, 1, (4, 3)),
        (U, 0, (3, 3)),
    ]
    .iter()
    .for_each(|&(dir, dist, (x, y))| {
        assert_eq!(start.translate(dir, dist), Cell { x, y });
    });
}
