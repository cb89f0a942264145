//! Geometric primitives that can be painted onto a grid.
//!
//! All coordinates are physical lengths, in the same unit as the grid's `dx`.

/// A region of the plane.
pub trait Shape {
    /// Whether the physical point `(x, y)` lies inside the shape.
    fn contains(&self, x: f64, y: f64) -> bool;
}

/// A filled disk. The boundary is part of the disk.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Circle {
    pub x_center: f64,
    pub y_center: f64,
    pub radius: f64,
}

impl Shape for Circle {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        distance(x - self.x_center, y - self.y_center) <= self.radius
    }
}

/// An axis-aligned rectangle with its lower corner at `(x, y)`. Bounds are
/// inclusive on both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Shape for Rectangle {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        self.x <= x && x <= self.x + self.width && self.y <= y && y <= self.y + self.height
    }
}

/// An annulus, `inner_radius < distance <= outer_radius`.
///
/// Rings with a shared radius tile without overlap, which is how layered
/// cavities are built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ring {
    pub x_center: f64,
    pub y_center: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Shape for Ring {
    #[inline]
    fn contains(&self, x: f64, y: f64) -> bool {
        let distance = distance(x - self.x_center, y - self.y_center);
        self.inner_radius < distance && distance <= self.outer_radius
    }
}

#[inline]
fn distance(delta_x: f64, delta_y: f64) -> f64 {
    f64::sqrt(delta_x * delta_x + delta_y * delta_y)
}
