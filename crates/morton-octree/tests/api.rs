//! Public API integration tests for morton-octree.

use glam::{DVec3, UVec3};
use morton_octree::{intersects_box, morton, neighborhood, Line, Octant, SparseOctree, Traversal};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Brute-force occupancy oracle: grid voxels of inserted points.
fn voxels_of(points: &[DVec3], tree: &SparseOctree) -> Vec<UVec3> {
    points
        .iter()
        .map(|&p| tree.transform(p).as_uvec3())
        .collect()
}

fn octant_contains(octant: &Octant, voxel: UVec3) -> bool {
    let min = octant.min();
    let max = octant.max();
    (min.x..max.x).contains(&voxel.x)
        && (min.y..max.y).contains(&voxel.y)
        && (min.z..max.z).contains(&voxel.z)
}

#[test]
fn single_point_cloud_end_to_end() {
    let mut tree = SparseOctree::new(
        7,
        DVec3::new(-16.0, -16.0, -16.0),
        DVec3::new(16.0, 15.0, 16.0),
    )
    .unwrap();
    assert!(tree.is_empty());

    tree.add(DVec3::ZERO).unwrap();
    assert!(!tree.is_empty());

    let mut walk = Traversal::new(&tree);
    let mut leaf_points = Vec::new();
    while walk.next(false) {
        if walk.is_leaf() {
            leaf_points.extend_from_slice(walk.cell().points());
        }
    }
    assert_eq!(leaf_points, [tree.transform(DVec3::ZERO)]);
    assert_eq!(leaf_points, [DVec3::splat(2048.0)]);
}

#[test]
fn box_intersection_hit_and_miss() {
    let hit = Line::through(DVec3::ZERO, DVec3::splat(1.0));
    assert!(intersects_box(&hit, DVec3::ZERO, DVec3::splat(2.0)));

    // Same direction, displaced so it misses the box entirely.
    let miss = Line::through(DVec3::new(5.0, 0.0, 0.0), DVec3::new(6.0, 1.0, 1.0));
    assert!(!intersects_box(&miss, DVec3::ZERO, DVec3::splat(2.0)));
}

#[test]
fn traversal_prunes_subtrees_away_from_the_line() {
    let mut tree = SparseOctree::new(0, DVec3::ZERO, DVec3::splat(31.0)).unwrap();
    assert_eq!(tree.width(), 32);

    let near = DVec3::new(1.5, 1.5, 1.5); // on the main diagonal
    let far = DVec3::new(30.2, 2.0, 3.0);
    tree.add(near).unwrap();
    tree.add(far).unwrap();

    let line = Line::through(tree.transform(DVec3::ZERO), tree.transform(DVec3::splat(31.0)));
    let far_voxel = tree.transform(far).as_uvec3();

    let mut collected = Vec::new();
    let mut pruned_over_far = 0;
    let mut walk = Traversal::new(&tree);
    let mut skip = false;
    while walk.next(skip) {
        let octant = *walk.octant();
        skip = !neighborhood(&line, &octant, 0.0);
        if skip {
            // The far voxel must be cut off at every rejected ancestor.
            if octant_contains(&octant, far_voxel) {
                pruned_over_far += 1;
            }
            continue;
        }
        assert!(
            !octant.is_voxel() || octant.min() != far_voxel,
            "far voxel survived pruning"
        );
        if walk.is_leaf() {
            collected.extend_from_slice(walk.cell().points());
        }
    }

    assert_eq!(collected, [tree.transform(near)]);
    assert!(pruned_over_far > 0, "no ancestor of the far voxel was pruned");
}

#[test]
fn octant_codes_form_one_contiguous_range() {
    let octant = Octant::new(UVec3::new(4, 8, 0), 4);
    let lo = morton::encode(octant.min()).unwrap();
    let hi = morton::encode(octant.max() - UVec3::ONE).unwrap();

    for x in 0..16u32 {
        for y in 0..16u32 {
            for z in 0..16u32 {
                let voxel = UVec3::new(x, y, z);
                let code = morton::encode(voxel).unwrap();
                let inside = octant_contains(&octant, voxel);
                assert_eq!(
                    (lo..=hi).contains(&code),
                    inside,
                    "voxel {voxel} vs octant range"
                );
            }
        }
    }
}

#[test]
fn region_emptiness_agrees_with_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut tree = SparseOctree::new(0, DVec3::ZERO, DVec3::splat(63.0)).unwrap();
    assert_eq!(tree.width(), 64);

    let points: Vec<DVec3> = (0..200)
        .map(|_| {
            DVec3::new(
                rng.gen_range(0.0..64.0),
                rng.gen_range(0.0..64.0),
                rng.gen_range(0.0..64.0),
            )
        })
        .collect();
    assert_eq!(tree.add_all(points.iter().copied()).unwrap(), points.len());
    let voxels = voxels_of(&points, &tree);

    // Random subdivision-aligned octants at every depth.
    for _ in 0..2000 {
        let size = 64u32 >> rng.gen_range(0..=6u32);
        let cells = 64 / size;
        let min = UVec3::new(
            rng.gen_range(0..cells) * size,
            rng.gen_range(0..cells) * size,
            rng.gen_range(0..cells) * size,
        );
        let octant = Octant::new(min, size);
        let occupied = voxels.iter().any(|&v| octant_contains(&octant, v));
        assert_eq!(
            tree.is_region_empty(&octant),
            !occupied,
            "octant at {min} size {size}"
        );
    }
}

#[test]
fn traversal_visits_exactly_the_occupied_voxels() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut tree = SparseOctree::new(0, DVec3::ZERO, DVec3::splat(31.0)).unwrap();

    let points: Vec<DVec3> = (0..100)
        .map(|_| {
            DVec3::new(
                rng.gen_range(0.0..32.0),
                rng.gen_range(0.0..32.0),
                rng.gen_range(0.0..32.0),
            )
        })
        .collect();
    tree.add_all(points.iter().copied()).unwrap();

    let mut expected: Vec<UVec3> = voxels_of(&points, &tree);
    expected.sort_by_key(|&v| morton::encode(v).unwrap());
    expected.dedup();

    let mut seen = Vec::new();
    let mut walk = Traversal::new(&tree);
    while walk.next(false) {
        if walk.is_leaf() {
            assert!(!walk.cell().is_empty());
            seen.push(walk.octant().min());
        }
    }
    assert_eq!(seen, expected);
    assert_eq!(seen.len(), tree.len());
}
