//! Line primitives and the box-intersection predicate used for pruning.

use glam::DVec3;

use crate::octant::Octant;

/// Coordinate axis selector for face tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn of(self, v: DVec3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// The two axes spanning a face perpendicular to `self`.
    fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// An infinite line through `origin` along `dir`.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub origin: DVec3,
    pub dir: DVec3,
}

impl Line {
    pub fn new(origin: DVec3, dir: DVec3) -> Self {
        Self { origin, dir }
    }

    /// Line through two distinct points.
    pub fn through(a: DVec3, b: DVec3) -> Self {
        Self {
            origin: a,
            dir: b - a,
        }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to_point(&self, p: DVec3) -> f64 {
        self.dir.cross(p - self.origin).length() / self.dir.length()
    }

    /// Distance to another line.
    ///
    /// Skew pairs project the connecting vector onto the common normal;
    /// parallel pairs (zero cross product) reduce to the point distance of
    /// the other line's origin.
    pub fn distance_to_line(&self, other: &Line) -> f64 {
        let n = self.dir.cross(other.dir);
        if n == DVec3::ZERO {
            return self.distance_to_point(other.origin);
        }
        (n.dot(self.origin - other.origin) / n.length()).abs()
    }
}

/// Inclusive containment of `x` in `[a, b]`.
fn in_range(x: f64, a: f64, b: f64) -> bool {
    a <= x && x <= b
}

/// Whether `line` crosses the face of box `[min, max]` lying in the plane
/// where the `axis` coordinate equals `min[axis]`.
///
/// A line with no direction component along `axis` never crosses that
/// plane transversally and reports false; [`intersects_box`] reaches such
/// lines through the faces on the remaining axes.
pub fn intersects_face(line: &Line, min: DVec3, max: DVec3, axis: Axis) -> bool {
    let d = axis.of(line.dir);
    if d == 0.0 {
        return false;
    }
    let t = (axis.of(min) - axis.of(line.origin)) / d;
    let p = line.origin + line.dir * t;
    let (u, v) = axis.others();
    in_range(u.of(p), u.of(min), u.of(max)) && in_range(v.of(p), v.of(min), v.of(max))
}

/// Whether `line` meets the axis-aligned box `[min, max]`.
///
/// All six faces are tested. A line that meets the box must cross its
/// boundary, and every crossing lies on some face whose perpendicular axis
/// carries a nonzero direction component, so the per-face degenerate rule
/// drops nothing; a zero direction vector intersects nothing.
pub fn intersects_box(line: &Line, min: DVec3, max: DVec3) -> bool {
    intersects_face(line, min, max, Axis::X)
        || intersects_face(line, DVec3::new(max.x, min.y, min.z), max, Axis::X)
        || intersects_face(line, min, max, Axis::Y)
        || intersects_face(line, DVec3::new(min.x, max.y, min.z), max, Axis::Y)
        || intersects_face(line, min, max, Axis::Z)
        || intersects_face(line, DVec3::new(min.x, min.y, max.z), max, Axis::Z)
}

/// Pruning predicate: does `line` pass within `threshold` of `octant`?
///
/// Inflates the octant's bounds by `threshold` on every axis and tests box
/// intersection. Over-approximate: a miss proves no point of the octant
/// lies within `threshold` of the line, while a hit carries no guarantee.
pub fn neighborhood(line: &Line, octant: &Octant, threshold: f64) -> bool {
    let (min, max) = octant.aabb();
    let r = DVec3::splat(threshold);
    intersects_box(line, min - r, max + r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec3;

    #[test]
    fn point_distance() {
        let x_axis = Line::new(DVec3::ZERO, DVec3::X);
        assert_eq!(x_axis.distance_to_point(DVec3::new(10.0, 3.0, 4.0)), 5.0);
        assert_eq!(x_axis.distance_to_point(DVec3::new(-7.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn parallel_line_distance() {
        let a = Line::new(DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        let b = Line::new(DVec3::new(5.0, 3.0, 4.0), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(a.distance_to_line(&b), 5.0);
        assert_eq!(b.distance_to_line(&a), 5.0);
    }

    #[test]
    fn skew_line_distance() {
        // x axis and a y-parallel line lifted by 7.
        let a = Line::new(DVec3::ZERO, DVec3::X);
        let b = Line::new(DVec3::new(0.0, 0.0, 7.0), DVec3::Y);
        assert_eq!(a.distance_to_line(&b), 7.0);
    }

    #[test]
    fn coincident_lines_have_zero_distance() {
        let a = Line::through(DVec3::ZERO, DVec3::new(1.0, 1.0, 1.0));
        let b = Line::through(DVec3::new(2.0, 2.0, 2.0), DVec3::new(5.0, 5.0, 5.0));
        assert_eq!(a.distance_to_line(&b), 0.0);
    }

    #[test]
    fn face_test_solves_the_crossing_parameter() {
        let min = DVec3::ZERO;
        let max = DVec3::splat(2.0);
        // Diagonal through the box crosses the x = 0 face at the origin.
        let diag = Line::through(DVec3::ZERO, DVec3::splat(1.0));
        assert!(intersects_face(&diag, min, max, Axis::X));
        // A line aimed past the face corner misses it.
        let outside = Line::through(DVec3::new(-1.0, 5.0, 0.0), DVec3::new(0.0, 5.0, 0.0));
        assert!(!intersects_face(&outside, min, max, Axis::X));
    }

    #[test]
    fn face_test_rejects_degenerate_direction() {
        let in_plane = Line::new(DVec3::ZERO, DVec3::new(0.0, 1.0, 1.0));
        assert!(!intersects_face(&in_plane, DVec3::ZERO, DVec3::splat(2.0), Axis::X));
    }

    #[test]
    fn box_hit_through_the_diagonal() {
        let line = Line::through(DVec3::ZERO, DVec3::splat(1.0));
        assert!(intersects_box(&line, DVec3::ZERO, DVec3::splat(2.0)));
    }

    #[test]
    fn box_miss_for_displaced_diagonal() {
        // Parallel to the main diagonal but displaced well off the box.
        let line = Line::through(DVec3::new(5.0, 0.0, 0.0), DVec3::new(6.0, 1.0, 1.0));
        assert!(!intersects_box(&line, DVec3::ZERO, DVec3::splat(2.0)));
    }

    #[test]
    fn box_hit_for_axis_parallel_lines() {
        let min = DVec3::ZERO;
        let max = DVec3::splat(2.0);
        // One zero direction component: runs inside the z = 1 plane.
        let flat = Line::new(DVec3::new(-1.0, 1.0, 1.0), DVec3::new(1.0, 0.1, 0.0));
        assert!(intersects_box(&flat, min, max));
        // Two zero components: straight down the middle along z.
        let shaft = Line::new(DVec3::new(1.0, 1.0, -9.0), DVec3::Z);
        assert!(intersects_box(&shaft, min, max));
        // Same shaft moved outside the footprint.
        let outside = Line::new(DVec3::new(3.0, 1.0, -9.0), DVec3::Z);
        assert!(!intersects_box(&outside, min, max));
    }

    #[test]
    fn box_hit_through_the_far_face_only() {
        // Enters and leaves through the two z faces; the z = max face is
        // crossed on the way out.
        let line = Line::new(DVec3::new(1.0, 1.0, -1.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(intersects_box(&line, DVec3::ZERO, DVec3::splat(2.0)));
    }

    #[test]
    fn neighborhood_inflates_the_octant() {
        let octant = Octant::new(UVec3::new(4, 4, 4), 2);
        // A line passing one unit outside the octant face.
        let line = Line::new(DVec3::new(0.0, 3.0, 5.0), DVec3::X);
        assert!(!neighborhood(&line, &octant, 0.5));
        assert!(neighborhood(&line, &octant, 1.0));
        assert!(neighborhood(&line, &octant, 2.0));
    }
}
