//! Sparse linear octree over a Morton-keyed ordered map.

use std::collections::BTreeMap;

use glam::{DVec3, UVec3};

use crate::base2;
use crate::error::OctreeError;
use crate::morton;
use crate::octant::Octant;

/// Bucket of points sharing one finest-resolution voxel.
///
/// Created on the first insert into the voxel and only ever appended to.
/// Points are kept in grid coordinates, untruncated.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    points: Vec<DVec3>,
}

impl Cell {
    // External pushes would detach the cell from its Morton key, so only
    // the tree may append.
    pub(crate) fn push(&mut self, p: DVec3) {
        self.points.push(p);
    }

    /// Points in insertion order.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sparse octree over a cubic power-of-two grid.
///
/// Occupied voxels are stored in an ordered map keyed by the Morton code of
/// their minimum corner. Because the codes follow the same recursive
/// subdivision as the octants themselves, subtree occupancy is a single
/// ordered range lookup rather than a walk over children.
#[derive(Clone, Debug)]
pub struct SparseOctree {
    origin: DVec3,
    resolution: u32,
    width: u32,
    cells: BTreeMap<u64, Cell>,
}

impl SparseOctree {
    /// Builds an empty tree covering `[min, max]` at `2^resolution_bits`
    /// grid cells per world unit.
    ///
    /// The cube is anchored at `min` floored to integer coordinates; its
    /// side is the longest bounding-box extent rounded up to a power of
    /// two, scaled by the resolution.
    pub fn new(resolution_bits: u8, min: DVec3, max: DVec3) -> Result<Self, OctreeError> {
        if !(min.x < max.x && min.y < max.y && min.z < max.z) {
            return Err(OctreeError::DegenerateBounds { min, max });
        }
        let origin = min.floor();
        let diagonal = max - origin;
        let longest = diagonal.max_element().ceil();
        if longest > f64::from(morton::COORD_LIMIT) {
            // Too wide for the coordinate budget at any resolution.
            return Err(OctreeError::ResolutionTooFine {
                log2_width: (longest.log2().ceil() as u32)
                    .saturating_add(u32::from(resolution_bits)),
            });
        }
        let longest = base2::ceil_pow2(longest as u32);
        let log2_width = base2::floor_log2(longest) + u32::from(resolution_bits);
        if log2_width > morton::COORD_BITS {
            return Err(OctreeError::ResolutionTooFine { log2_width });
        }
        let width = 1u32 << log2_width;
        let resolution = 1u32 << resolution_bits;
        log::debug!("bounding cube: origin {origin}, {width} voxels per side, {resolution} voxels per unit");
        Ok(Self {
            origin,
            resolution,
            width,
            cells: BTreeMap::new(),
        })
    }

    /// World to grid coordinates. Real-valued; truncation to a voxel
    /// happens only when a key is derived.
    pub fn transform(&self, p: DVec3) -> DVec3 {
        (p - self.origin) * f64::from(self.resolution)
    }

    /// Grid back to world coordinates, inverse of [`transform`].
    pub fn untransform(&self, g: DVec3) -> DVec3 {
        self.origin + g / f64::from(self.resolution)
    }

    /// Morton key of the voxel containing grid point `g`, if inside the cube.
    fn voxel_key(&self, g: DVec3) -> Option<u64> {
        let w = f64::from(self.width);
        let inside =
            g.x >= 0.0 && g.x < w && g.y >= 0.0 && g.y < w && g.z >= 0.0 && g.z < w;
        inside.then(|| morton::interleave(g.as_uvec3()))
    }

    /// Inserts one point, creating or extending its voxel's cell.
    ///
    /// Points outside the bounding cube are rejected; the error carries the
    /// offending point and the tree is left unchanged.
    pub fn add(&mut self, p: DVec3) -> Result<(), OctreeError> {
        let g = self.transform(p);
        let Some(key) = self.voxel_key(g) else {
            return Err(OctreeError::OutOfBounds { point: p });
        };
        self.cells.entry(key).or_default().push(g);
        Ok(())
    }

    /// Inserts points in sequence, stopping at the first failure.
    ///
    /// Returns how many points were inserted; on error, every point before
    /// the offending one remains stored.
    pub fn add_all<I>(&mut self, points: I) -> Result<usize, OctreeError>
    where
        I: IntoIterator<Item = DVec3>,
    {
        let mut inserted = 0;
        for p in points {
            self.add(p)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// True when no point has been inserted at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of occupied voxels.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no stored point lies inside `octant`.
    ///
    /// The codes of all voxels inside a subdivision-aligned cube form the
    /// contiguous range `[encode(min), encode(max - 1)]`, so one ordered
    /// lookup decides occupancy for the whole subtree.
    pub fn is_region_empty(&self, octant: &Octant) -> bool {
        let lo = morton::interleave(octant.min());
        let hi = morton::interleave(octant.max() - UVec3::ONE);
        self.cells.range(lo..=hi).next().is_none()
    }

    /// The cell stored for the exact voxel at `octant.min()`, if occupied.
    pub fn cell_at(&self, octant: &Octant) -> Option<&Cell> {
        self.cells.get(&morton::interleave(octant.min()))
    }

    /// The full grid cube.
    pub fn root_octant(&self) -> Octant {
        Octant::new(UVec3::ZERO, self.width)
    }

    /// Grid side length, in voxels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid cells per world unit.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// World-space anchor of the cube.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }
}
