use alloc::{vec, vec::Vec};

use hashbrown::HashMap;

use crate::{
    Ops, PositionGroups, StdOps,
    position_groups::{POSITION_PRECISION, PositionKey},
};

const P1: i32 = 73856093;
const P2: i32 = 19349663;

#[test]
fn spatial_hash_matches_prime_mixing() {
    let key = PositionKey([1, 2, 3]);
    assert_eq!(key.spatial_hash(), P1 ^ (2 * P2) ^ (3 * 83492791));
}

#[test]
fn spatial_hash_wraps_instead_of_overflowing() {
    let key = PositionKey([i32::MAX, i32::MIN, -1]);
    // Must not panic in debug builds.
    let _ = key.spatial_hash();

    let far = PositionKey::new::<StdOps>([1000., -1000., 1000.]);
    assert!(far.0[0] > 0 && far.0[1] < 0);
    let _ = far.spatial_hash();
}

#[test]
fn keys_saturate_out_of_range_positions() {
    let key = PositionKey::new::<StdOps>([f32::MAX, f32::MIN, f32::NAN]);
    assert_eq!(key.0, [i32::MAX, i32::MIN, 0]);
}

#[test]
fn colliding_hashes_stay_distinct() {
    // Find a cell `(x, 0, 0)` hashing identically to `(1, 1, 0)`.
    // `P1` is odd, so it has a multiplicative inverse modulo 2^32.
    let mut inverse = P1;
    for _ in 0..5 {
        inverse = inverse.wrapping_mul(2i32.wrapping_sub(P1.wrapping_mul(inverse)));
    }
    assert_eq!(P1.wrapping_mul(inverse), 1);

    let a = PositionKey([1, 1, 0]);
    let b = PositionKey([(P1 ^ P2).wrapping_mul(inverse), 0, 0]);
    assert_eq!(a.spatial_hash(), b.spatial_hash());
    assert_ne!(a, b);

    let mut map = HashMap::new();
    map.insert(a, 0);
    map.insert(b, 1);
    assert_eq!(map.len(), 2);
}

#[test]
fn rounding_straddles_cell_boundaries() {
    // 0.4 and 0.6 grid steps are closer than one step, but round apart.
    let groups = PositionGroups::build(&[
        [0., 0., 0.],
        [0.000004, 0., 0.],
        [0.000006, 0., 0.],
        [0.000014, 0., 0.],
    ]);

    assert_eq!(groups.num_groups(), 2);
    assert_eq!(groups.group(0), &[0, 1]);
    assert_eq!(groups.group(1), &[0, 1]);
    assert_eq!(groups.group(2), &[2, 3]);
    assert_eq!(groups.group(3), &[2, 3]);
}

#[test]
fn members_are_in_vertex_order() {
    let positions = [
        [1., 2., 3.],
        [0., 0., 0.],
        [1., 2., 3.],
        [5., 5., 5.],
        [0., 0., 0.],
        [1., 2., 3.],
    ];
    let groups = PositionGroups::build(&positions);

    assert_eq!(groups.len(), positions.len());
    assert_eq!(groups.num_groups(), 3);
    assert_eq!(
        groups.groups().collect::<Vec<_>>(),
        vec![&[0, 2, 5][..], &[1, 4][..], &[3][..]]
    );
    assert_eq!(groups.group_index(4), 1);
}

#[test]
fn empty_positions_have_no_groups() {
    let groups = PositionGroups::build(&[]);
    assert!(groups.is_empty());
    assert_eq!(groups.num_groups(), 0);
    assert_eq!(groups.groups().count(), 0);
}

#[test]
fn grouping_agrees_with_rounded_cells() {
    // A small lattice with spacing near the grid precision, so that some
    // neighbors merge and others do not.
    let positions = (0..6)
        .flat_map(|x| (0..6).map(move |y| [x as f32 * 0.000007, y as f32 * 0.3, 0.25]))
        .collect::<Vec<_>>();
    let groups = PositionGroups::build(&positions);

    let cell = |p: [f32; 3]| p.map(|c| StdOps::round_ties_even(c / POSITION_PRECISION) as i32);

    for (i, &a) in positions.iter().enumerate() {
        assert!(groups.group(i).contains(&(i as u32)));
        for (j, &b) in positions.iter().enumerate() {
            let same_cell = cell(a) == cell(b);
            let same_group = groups.group_index(i) == groups.group_index(j);
            assert_eq!(same_cell, same_group, "vertices {i} and {j}");
        }
    }
}
