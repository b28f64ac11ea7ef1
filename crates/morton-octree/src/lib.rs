//! Sparse (linear) octree over Morton-coded voxels, with a caller-driven
//! depth-first traversal for neighborhood queries on 3D point sets.
//!
//! Points are bucketed into the finest-resolution voxels of a power-of-two
//! cube and stored in an ordered map keyed by the Morton (Z-order) code of
//! their voxel. The codes follow the same recursive subdivision as the
//! octants themselves, so the codes inside any octant form one contiguous
//! range and subtree emptiness is a single ordered range lookup — no node
//! objects, no child pointers.
//!
//! Queries walk the occupied octants with [`Traversal`], an explicit-step
//! cursor: the caller tests each visited region with a geometric predicate
//! (such as [`neighborhood`]) and prunes whole subtrees by passing
//! `skip_descend = true` to the next step.
//!
//! # Example
//!
//! Collect the points lying within one world unit of a diagonal line:
//!
//! ```
//! use glam::DVec3;
//! use morton_octree::{neighborhood, Line, SparseOctree, Traversal};
//!
//! let mut tree = SparseOctree::new(2, DVec3::splat(-4.0), DVec3::splat(4.0))?;
//! tree.add(DVec3::new(0.5, 0.5, 0.5))?;
//! tree.add(DVec3::new(3.0, -3.0, 2.0))?;
//!
//! // The query runs in grid space: transform the line and scale the radius.
//! let line = Line::through(
//!     tree.transform(DVec3::splat(-4.0)),
//!     tree.transform(DVec3::splat(4.0)),
//! );
//! let radius = 1.0 * tree.resolution() as f64;
//!
//! let mut near = Vec::new();
//! let mut walk = Traversal::new(&tree);
//! let mut skip = false;
//! while walk.next(skip) {
//!     skip = !neighborhood(&line, walk.octant(), radius);
//!     if !skip && walk.is_leaf() {
//!         for &p in walk.cell().points() {
//!             if line.distance_to_point(p) <= radius {
//!                 near.push(tree.untransform(p));
//!             }
//!         }
//!     }
//! }
//! assert_eq!(near, [DVec3::new(0.5, 0.5, 0.5)]);
//! # Ok::<(), morton_octree::OctreeError>(())
//! ```

pub mod base2;
mod error;
pub mod geometry;
pub mod morton;
mod octant;
mod octree;
mod traverse;

pub use error::OctreeError;
pub use geometry::{intersects_box, intersects_face, neighborhood, Axis, Line};
pub use octant::Octant;
pub use octree::{Cell, SparseOctree};
pub use traverse::Traversal;
