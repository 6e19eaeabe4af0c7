//! Mathematical types shared between the engine and the host.
//!
//! Surface coordinates: origin top-left, +y points down.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 2D Vector - surface positions, velocities
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// True when the point lies inside `[-margin, width + margin] x [-margin, height + margin]`.
    #[inline]
    #[must_use]
    pub fn within_bounds(self, width: f32, height: f32, margin: f32) -> bool {
        self.x >= -margin
            && self.x <= width + margin
            && self.y >= -margin
            && self.y <= height + margin
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);

        let sum = a + b;
        assert_eq!(sum, Vec2::new(4.0, 6.0));
        assert_eq!(b - a, Vec2::new(2.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));

        let mut c = a;
        c += b;
        assert_eq!(c, sum);
    }

    #[test]
    fn test_within_bounds_margin() {
        assert!(Vec2::new(-50.0, -50.0).within_bounds(100.0, 100.0, 50.0));
        assert!(Vec2::new(150.0, 150.0).within_bounds(100.0, 100.0, 50.0));
        assert!(!Vec2::new(-50.1, 10.0).within_bounds(100.0, 100.0, 50.0));
        assert!(!Vec2::new(10.0, 150.5).within_bounds(100.0, 100.0, 50.0));
    }

    #[test]
    fn test_vec2_bytemuck() {
        let v = Vec2::new(1.0, 2.0);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 8); // 2 * 4 bytes
    }
}
