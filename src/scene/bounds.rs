use glam::Vec3;

/// Axis-aligned bounding box.
///
/// The empty box has `min = +inf` and `max = -inf`, so extending it by any
/// point yields that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// A box containing nothing.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box spanning the two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut bounds, point| {
            bounds.extend(point);
            bounds
        })
    }

    /// `true` when the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
            || self.min.y > self.max.y
            || self.min.z > self.max.z
    }

    /// Grow to include `point`.
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to include another box.
    pub fn union(&mut self, other: &Self) {
        if !other.is_empty() {
            self.extend(other.min);
            self.extend(other.max);
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Longest edge length.
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// The same box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(self.min + offset, self.max + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_has_no_size() {
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
        assert_eq!(Aabb::EMPTY.max_extent(), 0.0);
        assert_eq!(Aabb::EMPTY.translated(Vec3::ONE), Aabb::EMPTY);
    }

    #[test]
    fn from_points_spans_all_points() {
        let bounds = Aabb::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 2.5),
        ]);
        assert_eq!(bounds.min, Vec3::new(-3.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 2.5));
        assert_eq!(bounds.center(), Vec3::new(-1.0, 1.0, 1.25));
        assert_eq!(bounds.max_extent(), 6.0);
    }

    #[test]
    fn single_point_is_not_empty() {
        let bounds = Aabb::from_points([Vec3::ONE]);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.max_extent(), 0.0);
    }

    #[test]
    fn union_ignores_empty_boxes() {
        let mut bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        bounds.union(&Aabb::EMPTY);
        assert_eq!(bounds, Aabb::new(Vec3::ZERO, Vec3::ONE));
        bounds.union(&Aabb::new(Vec3::splat(-1.0), Vec3::ZERO));
        assert_eq!(bounds, Aabb::new(Vec3::splat(-1.0), Vec3::ONE));
    }

    #[test]
    fn translation_moves_both_corners() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE).translated(Vec3::Y);
        assert_eq!(bounds.min, Vec3::Y);
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 1.0));
    }
}
