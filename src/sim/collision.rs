//! Bounding-box overlap detection
//!
//! Knows nothing about players, shots or enemies: callers project their
//! entities to `Aabb`s and get back index pairs into the slices they passed.

use glam::Vec2;

/// Axis-aligned bounding box given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    pub fn from_size(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center, crate::half_size(width, height))
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Boxes overlap when they share interior area; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let diff = (self.center - other.center).abs();
        let combined = self.half + other.half;
        diff.x < combined.x && diff.y < combined.y
    }
}

/// Every (i, j) with `a[i]` overlapping `b[j]`, ordered by i then j
pub fn overlapping_pairs(a: &[Aabb], b: &[Aabb]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, box_a) in a.iter().enumerate() {
        for (j, box_b) in b.iter().enumerate() {
            if box_a.overlaps(box_b) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Indices of every box in `many` overlapping `one`
pub fn overlapping_with(one: &Aabb, many: &[Aabb]) -> Vec<usize> {
    many.iter()
        .enumerate()
        .filter(|(_, b)| one.overlaps(b))
        .map(|(i, _)| i)
        .collect()
}
