use Dir::*;

// defined in clockwise order starting at U
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Dir {
    U = 0,
    R = 1,
    D = 2,
    L = 3,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis {
    UD, // |
    LR, // -
}

impl Dir {
    pub fn axis(self) -> Axis {
        use Axis::*;

        match self {
            U | D => UD,
            L | R => LR,
        }
    }
}

#[test]
fn test_axis() {
    let test_axes = [(U, Axis::UD), (D, Axis::UD), (L, Axis::LR), (R, Axis::LR)];

    for &(dir, axis) in &test_axes {
        assert_eq!(dir.axis(), axis);
    }
}
