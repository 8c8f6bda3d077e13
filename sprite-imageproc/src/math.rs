/// Displacement between two [`PointF`](crate::PointF)s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn from_xy(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Z component of the 3D cross product `self x other`.
    ///
    /// Positive if `other` turns clockwise from `self` in image coordinates
    /// (Y down), negative if it turns counter-clockwise and zero if the
    /// vectors are parallel.
    pub fn cross_product_norm(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl std::ops::Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::from_xy(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scale: f32) -> Vec2 {
        Vec2::from_xy(self.x * scale, self.y * scale)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, divisor: f32) -> Vec2 {
        Vec2::from_xy(self.x / divisor, self.y / divisor)
    }
}
