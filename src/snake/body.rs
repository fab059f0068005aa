use std::vec;

use crate::basic::{Axis, Cell, Dir, Point};
use Dir::*;

/// Minimum drag distance in input units before a steering hint is honored
pub const MIN_STEER_DELTA: isize = 5;

pub struct Body {
    /// Turning points of the body polyline, head first; consecutive
    /// nodes always share an axis
    pub nodes: Vec<Cell>,
    /// Direction the head is currently going
    pub dir: Dir,
    /// How many cells the body may span, independent of node count
    pub max_len: usize,
}

impl Body {
    pub fn new(head: Cell, dir: Dir, max_len: usize) -> Self {
        debug_assert!(max_len >= 1);
        // a fresh body is a head and a coincident tail
        Self { nodes: vec![head; 2], dir, max_len }
    }

    pub fn head(&self) -> Cell {
        self.nodes[0]
    }

    /// Interprets a per-tick input delta as a steering hint
    ///
    /// The dominant axis of the delta must strictly win over the other
    /// axis and reach [`MIN_STEER_DELTA`] to count; a hint along the
    /// current axis of travel is ignored, so reversals and repeated
    /// hints can never corrupt the polyline. A committed turn starts a
    /// new segment by duplicating the head node.
    pub fn steer(&mut self, delta: Point) {
        let abs_x = delta.x.abs() as isize;
        let abs_y = delta.y.abs() as isize;

        if abs_x >= MIN_STEER_DELTA && abs_x > abs_y {
            if self.dir.axis() == Axis::LR {
                return;
            }
            self.dir = if delta.x > 0. { R } else { L };
        } else if abs_y >= MIN_STEER_DELTA && abs_y > abs_x {
            if self.dir.axis() == Axis::UD {
                return;
            }
            self.dir = if delta.y > 0. { D } else { U };
        } else {
            // too small or no dominant axis
            return;
        }

        // the head continues from here on the new axis
        self.nodes.insert(0, self.nodes[0]);
    }

    /// Cells covered by the body, in order from just behind the head to
    /// the tail end; the head cell itself is not emitted
    ///
    /// Calling this also prunes the node list: nodes past the length
    /// budget are dropped and the boundary node is clipped so the
    /// polyline's total length lands exactly on the budget. The
    /// returned iterator walks a snapshot and is unaffected by later
    /// mutation.
    pub fn occupied_cells(&mut self) -> Cells {
        self.trim();
        let segments = self
            .nodes
            .windows(2)
            .map(|pair| {
                let (dir, len) = segment(pair[0], pair[1]);
                (pair[0], dir, len)
            })
            .filter(|&(_, _, len)| len > 0)
            .collect::<Vec<_>>();
        Cells { segments: segments.into_iter(), walk: None }
    }

    pub fn contains(&mut self, cell: Cell) -> bool {
        self.occupied_cells().any(|c| c == cell)
    }

    fn trim(&mut self) {
        let mut remaining = self.max_len as isize;
        for i in 1..self.nodes.len() {
            if remaining <= 0 {
                self.nodes.truncate(i);
                break;
            }
            let (dir, len) = segment(self.nodes[i - 1], self.nodes[i]);
            if len as isize > remaining {
                // clip to land exactly on the budget edge
                self.nodes[i] = self.nodes[i - 1].translate(dir, remaining);
                self.nodes.truncate(i + 1);
                break;
            }
            remaining -= len as isize;
        }
        debug_assert!(self.nodes.len() >= 2, "node list collapsed: {:?}", self.nodes);
    }
}

// direction and length of the axis-aligned segment between two nodes
fn segment(from: Cell, to: Cell) -> (Dir, usize) {
    debug_assert!(
        from.x == to.x || from.y == to.y,
        "diagonal segment {:?} -> {:?}",
        from,
        to
    );
    let dir = if from.x == to.x {
        if to.y > from.y {
            D
        } else {
            U
        }
    } else if to.x > from.x {
        R
    } else {
        L
    };
    (dir, from.manhattan_distance(to))
}

/// Finite walk over the body's cells, one cell per unit step along
/// each segment, excluding each segment's start and including its end
/// so shared joints come out exactly once
pub struct Cells {
    segments: vec::IntoIter<(Cell, Dir, usize)>,
    walk: Option<(Cell, Dir, usize)>,
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.walk {
                Some((pos, dir, left)) if *left > 0 => {
                    *pos = pos.translate(*dir, 1);
                    *left -= 1;
                    return Some(*pos);
                }
                _ => self.walk = Some(self.segments.next()?),
            }
        }
    }
}

#[test]
fn test_fresh_body_has_no_cells() {
    let mut body = Body::new(Cell { x: 5, y: 5 }, R, 5);
    assert_eq!(body.occupied_cells().count(), 0);
    assert_eq!(body.nodes.len(), 2);
}

#[test]
fn test_straight_emission() {
    let mut body = Body::new(Cell { x: 5, y: 2 }, R, 10);
    body.nodes = vec![Cell { x: 5, y: 2 }, Cell { x: 1, y: 2 }];

    let cells: Vec<_> = body.occupied_cells().collect();
    let expected = [(4, 2), (3, 2), (2, 2), (1, 2)].map(|(x, y)| Cell { x, y });
    assert_eq!(cells, expected);
}

#[test]
fn test_joint_emitted_once() {
    let mut body = Body::new(Cell { x: 2, y: 2 }, R, 10);
    body.nodes = vec![Cell { x: 2, y: 2 }, Cell { x: 0, y: 2 }, Cell { x: 0, y: 0 }];

    let cells: Vec<_> = body.occupied_cells().collect();
    let expected = [(1, 2), (0, 2), (0, 1), (0, 0)].map(|(x, y)| Cell { x, y });
    assert_eq!(cells, expected);
}

#[test]
fn test_trim_clips_and_persists() {
    let mut body = Body::new(Cell { x: 5, y: 0 }, R, 3);
    body.nodes = vec![Cell { x: 5, y: 0 }, Cell { x: 0, y: 0 }];

    let cells: Vec<_> = body.occupied_cells().collect();
    let expected = [(4, 0), (3, 0), (2, 0)].map(|(x, y)| Cell { x, y });
    assert_eq!(cells, expected);

    // the clipped tail node was written back
    assert_eq!(body.nodes, vec![Cell { x: 5, y: 0 }, Cell { x: 2, y: 0 }]);
}

#[test]
fn test_trim_discards_past_budget() {
    let mut body = Body::new(Cell { x: 5, y: 5 }, U, 4);
    body.nodes = vec![
        Cell { x: 5, y: 5 },
        Cell { x: 5, y: 8 },
        Cell { x: 2, y: 8 },
        Cell { x: 2, y: 9 },
    ];

    let cells: Vec<_> = body.occupied_cells().collect();
    let expected = [(5, 6), (5, 7), (5, 8), (4, 8)].map(|(x, y)| Cell { x, y });
    assert_eq!(cells, expected);
    assert_eq!(
        body.nodes,
        vec![Cell { x: 5, y: 5 }, Cell { x: 5, y: 8 }, Cell { x: 4, y: 8 }]
    );
}

#[test]
fn test_cell_count_never_exceeds_budget() {
    // polyline of total length 7
    let nodes = vec![
        Cell { x: 5, y: 5 },
        Cell { x: 5, y: 8 },
        Cell { x: 2, y: 8 },
        Cell { x: 2, y: 9 },
    ];

    for budget in 1..=9 {
        let mut body = Body::new(Cell { x: 5, y: 5 }, U, budget);
        body.nodes = nodes.clone();
        assert_eq!(body.occupied_cells().count(), budget.min(7), "budget {}", budget);
    }
}

#[test]
fn test_steer_classification() {
    // (delta, starting dir, expected dir, expected node count)
    let cases = [
        ((10., 0.), U, R, 3),
        ((-10., 0.), U, L, 3),
        ((0., 10.), R, D, 3),
        ((0., -10.), R, U, 3),
        ((10., 3.), U, R, 3),
        // both axes over the threshold, the strictly larger one wins
        ((10., 7.), U, R, 3),
        ((7., 10.), R, D, 3),
        ((5., 0.), U, R, 3),
        // below threshold, 4.9 truncates to 4
        ((4., 0.), U, U, 2),
        ((4.9, 0.), U, U, 2),
        // no dominant axis
        ((7., 7.), U, U, 2),
        ((0., 0.), U, U, 2),
        // hints along the current axis are ignored, including reversals
        ((10., 0.), R, R, 2),
        ((-10., 0.), R, R, 2),
        ((3., 10.), D, D, 2),
    ];

    for &((x, y), start, expected, node_count) in &cases {
        let mut body = Body::new(Cell { x: 5, y: 5 }, start, 5);
        body.steer(Point { x, y });
        assert_eq!(body.dir, expected, "delta ({}, {}) from {:?}", x, y, start);
        assert_eq!(body.nodes.len(), node_count, "delta ({}, {}) from {:?}", x, y, start);
        assert_eq!(body.head(), Cell { x: 5, y: 5 });
    }
}

#[test]
fn test_repeat_turn_on_same_axis_is_noop() {
    let mut body = Body::new(Cell { x: 5, y: 5 }, R, 5);

    body.steer(Point { x: 0., y: 10. });
    assert_eq!(body.dir, D);
    assert_eq!(body.nodes.len(), 3);

    // a second hint on the now-current axis must not stack another node
    body.steer(Point { x: 0., y: 20. });
    assert_eq!(body.dir, D);
    assert_eq!(body.nodes.len(), 3);

    body.steer(Point { x: 0., y: -20. });
    assert_eq!(body.dir, D);
    assert_eq!(body.nodes.len(), 3);

    // a perpendicular hint turns again
    body.steer(Point { x: 10., y: 0. });
    assert_eq!(body.dir, R);
    assert_eq!(body.nodes.len(), 4);
}
