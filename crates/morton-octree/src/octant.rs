//! Axis-aligned cubic regions of the voxel grid.

use glam::{DVec3, UVec3};

/// A cube of the grid, identified by its minimum corner and edge length.
///
/// Octants are pure values computed on demand from their parent's bounds;
/// the tree stores no region objects. Subdivision from a power-of-two root
/// keeps every edge length a power of two, down to the edge-length-one
/// leaf voxels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Octant {
    min: UVec3,
    size: u32,
}

impl Octant {
    pub fn new(min: UVec3, size: u32) -> Self {
        Self { min, size }
    }

    /// Minimum corner, in grid coordinates.
    pub fn min(&self) -> UVec3 {
        self.min
    }

    /// Maximum corner (exclusive), in grid coordinates.
    pub fn max(&self) -> UVec3 {
        self.min + UVec3::splat(self.size)
    }

    /// Edge length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether this region is a single finest-resolution voxel.
    pub fn is_voxel(&self) -> bool {
        self.size <= 1
    }

    /// One of the eight half-size children.
    ///
    /// The index is itself a 3-bit Morton code — bit 0 selects the upper
    /// x half, bit 1 the upper y half, bit 2 the upper z half — so children
    /// visited in index order are also visited in key order.
    pub fn child(&self, index: u8) -> Octant {
        debug_assert!(index < 8, "child index {index} out of range");
        debug_assert!(self.size >= 2, "voxel-sized octant has no children");
        let half = self.size / 2;
        let offset = UVec3::new(
            u32::from(index) & 1,
            u32::from(index) >> 1 & 1,
            u32::from(index) >> 2 & 1,
        ) * half;
        Octant {
            min: self.min + offset,
            size: half,
        }
    }

    /// Floating-point bounds, for the geometric predicates.
    pub fn aabb(&self) -> (DVec3, DVec3) {
        (self.min.as_dvec3(), self.max().as_dvec3())
    }
}
