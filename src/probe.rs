//! Line-neighborhood queries over an indexed point cloud.

use glam::DVec3;
use morton_octree::{neighborhood, Line, SparseOctree, Traversal};

/// Collects every stored point within `threshold` of the line through `a`
/// and `b`, returned in world coordinates.
///
/// Walks the occupied octants depth-first, pruning each subtree whose
/// threshold-inflated bounds the line misses; leaf cells that survive are
/// filtered by exact point-to-line distance. `a` and `b` must be distinct.
pub fn collect_near_line(tree: &SparseOctree, a: DVec3, b: DVec3, threshold: f64) -> Vec<DVec3> {
    // The tree stores grid-space points, so the query runs in grid space:
    // same transform for the line, radius scaled by the resolution.
    let line = Line::through(tree.transform(a), tree.transform(b));
    let radius = threshold * f64::from(tree.resolution());

    let mut hits = Vec::new();
    let mut pruned = 0u32;
    let mut walk = Traversal::new(tree);
    let mut skip = false;
    while walk.next(skip) {
        skip = !neighborhood(&line, walk.octant(), radius);
        if skip {
            pruned += 1;
            continue;
        }
        if !walk.is_leaf() {
            continue;
        }
        for &p in walk.cell().points() {
            if line.distance_to_point(p) <= radius {
                hits.push(tree.untransform(p));
            }
        }
    }
    log::debug!("{} hits, {pruned} subtrees pruned", hits.len());
    hits
}
