use std::ops::Mul;

/// Per-tick steering input, a free 2D vector in input units
/// (dragged pixels, key impulses)
#[derive(Copy, Clone, Debug, Default, Add, AddAssign, Sub, SubAssign)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}
