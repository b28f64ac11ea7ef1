//! Morton (Z-order) coding of 3D grid coordinates.
//!
//! A Morton code interleaves the bits of three 21-bit coordinates into one
//! 63-bit key: bit `k` of x lands at code bit `3k`, of y at `3k + 1`, of z
//! at `3k + 2`. Interleaving follows the recursive octant subdivision of the
//! grid, so the codes of every axis-aligned power-of-two cube form one
//! contiguous numeric range.

use glam::UVec3;

use crate::error::OctreeError;

/// Bits of each coordinate that fit a 64-bit code.
pub const COORD_BITS: u32 = 21;

/// Exclusive upper bound on encodable coordinates.
pub const COORD_LIMIT: u32 = 1 << COORD_BITS;

/// Spreads the low 21 bits of `v` three positions apart.
fn spread(v: u32) -> u64 {
    let mut x = u64::from(v) & 0x001f_ffff;
    // x = ---- ---- ---- ---- ---- ---- ---- ---- ---- ---- ---4 3210 fedc ba98 7654 3210
    x = (x ^ (x << 16) ^ (x << 32)) & 0x001f_0000_ff00_00ff;
    // x = ---- ---- ---4 3210 ---- ---- ---- ---- fedc ba98 ---- ---- ---- ---- 7654 3210
    x = (x ^ (x << 8)) & 0x100f_00f0_0f00_f00f;
    x = (x ^ (x << 4)) & 0x10c3_0c30_c30c_30c3;
    x = (x ^ (x << 2)) & 0x1249_2492_4924_9249;
    x
}

/// Inverse of [`spread`]: gathers every third bit back into the low 21.
fn compact(v: u64) -> u32 {
    let mut x = v & 0x1249_2492_4924_9249;
    x = (x ^ (x >> 2)) & 0x10c3_0c30_c30c_30c3;
    x = (x ^ (x >> 4)) & 0x100f_00f0_0f00_f00f;
    x = (x ^ (x >> 8)) & 0x001f_0000_ff00_00ff;
    x = (x ^ (x >> 16) ^ (x >> 32)) & 0x001f_ffff;
    x as u32
}

/// Interleaves a grid coordinate into its Morton code.
///
/// Every component must be below [`COORD_LIMIT`]; negative values cast to
/// unsigned land above the limit and are rejected the same way.
pub fn encode(p: UVec3) -> Result<u64, OctreeError> {
    for value in [p.x, p.y, p.z] {
        if value >= COORD_LIMIT {
            return Err(OctreeError::CoordinateRange { value });
        }
    }
    Ok(interleave(p))
}

/// Interleave for coordinates already bounded by construction; components
/// at or above [`COORD_LIMIT`] are masked.
pub(crate) fn interleave(p: UVec3) -> u64 {
    spread(p.x) | spread(p.y) << 1 | spread(p.z) << 2
}

/// Recovers the grid coordinate of a Morton code.
pub fn decode(code: u64) -> UVec3 {
    UVec3::new(compact(code), compact(code >> 1), compact(code >> 2))
}
