use glam::DVec3;
use thiserror::Error;

/// Errors from tree construction and point insertion.
///
/// Geometric predicates and traversal steps never fail; invariant
/// violations inside the traversal are programming errors and panic
/// instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctreeError {
    /// A grid coordinate does not fit the 21-bit per-axis code budget.
    #[error("grid coordinate {value} exceeds the 21-bit Morton limit")]
    CoordinateRange { value: u32 },

    /// A point transforms to grid coordinates outside the bounding cube.
    /// Carries the offending world-space point; whether to skip, clamp,
    /// or abort is the caller's decision.
    #[error("point {point} lies outside the bounding cube")]
    OutOfBounds { point: DVec3 },

    /// Bounding box with zero or negative extent on some axis.
    #[error("degenerate bounds: {min} does not precede {max} on every axis")]
    DegenerateBounds { min: DVec3, max: DVec3 },

    /// The requested resolution pushes the grid past the per-axis
    /// coordinate budget.
    #[error("grid of 2^{log2_width} voxels per side exceeds the 21-bit coordinate budget")]
    ResolutionTooFine { log2_width: u32 },
}
