//! Provides [`PositionGroups`]; an index from each vertex to every vertex which
//! occupies the same position.
//!
//! Positions are snapped onto a fixed grid with a spacing of
//! [`POSITION_PRECISION`] and bucketed by their grid cell.
//! No neighborhood search is performed: two positions only share a group if
//! they round to the _identical_ cell.
//! Positions which straddle a rounding boundary therefore land in separate
//! groups even when they are closer together than the grid spacing.

use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use hashbrown::HashMap;

use crate::Ops;

/// Grid spacing used to decide if two positions are the same.
pub(crate) const POSITION_PRECISION: f32 = 0.00001;

/// Large primes used to mix the three cell coordinates into a single hash.
const HASH_PRIMES: [i32; 3] = [73856093, 19349663, 83492791];

/// Grid cell a position rounds to.
///
/// Hashing uses the classic spatial hash of the cell coordinates, while
/// equality compares the coordinates themselves so distinct cells with a
/// colliding hash are never grouped together.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct PositionKey(pub(crate) [i32; 3]);

impl PositionKey {
    pub(crate) fn new<O: Ops>(position: [f32; 3]) -> Self {
        // `as` saturates for out-of-range values and maps `NaN` to zero.
        Self(position.map(|c| O::round_ties_even(c / POSITION_PRECISION) as i32))
    }

    /// `x * P1 ^ y * P2 ^ z * P3`, with wrapping multiplication.
    pub(crate) fn spatial_hash(&self) -> i32 {
        let [x, y, z] = self.0;
        x.wrapping_mul(HASH_PRIMES[0])
            ^ y.wrapping_mul(HASH_PRIMES[1])
            ^ z.wrapping_mul(HASH_PRIMES[2])
    }
}

impl Hash for PositionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spatial_hash().hash(state);
    }
}

/// Partition of a vertex buffer into groups of vertices sharing a position.
///
/// Every vertex belongs to exactly one group, and every group contains at least
/// one vertex.
/// Members of a group are stored in ascending vertex order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PositionGroups {
    /// Group index for each vertex.
    group_of: Vec<u32>,
    /// Start of each group within [`members`](PositionGroups::members), plus a
    /// trailing end offset.
    offsets: Vec<u32>,
    /// Vertex indices, ordered by group.
    members: Vec<u32>,
}

impl PositionGroups {
    /// Groups the provided `positions` using the standard library for rounding.
    #[cfg(feature = "std")]
    pub fn build(positions: &[[f32; 3]]) -> Self {
        Self::build_with::<crate::StdOps>(positions)
    }

    /// Groups the provided `positions` using `O` for rounding.
    ///
    /// # Panics
    ///
    /// Panics if there are more than [`u32::MAX`] positions.
    pub fn build_with<O: Ops>(positions: &[[f32; 3]]) -> Self {
        assert!(
            u32::try_from(positions.len()).is_ok(),
            "at most u32::MAX vertices can be grouped"
        );

        let mut groups = HashMap::<PositionKey, u32>::new();
        let mut sizes = Vec::<u32>::new();

        let group_of = positions
            .iter()
            .map(|&position| {
                let next = sizes.len() as u32;
                let group = *groups.entry(PositionKey::new::<O>(position)).or_insert(next);
                if group == next {
                    sizes.push(0);
                }
                sizes[group as usize] += 1;
                group
            })
            .collect::<Vec<_>>();

        // Prefix sum the group sizes into offsets, then scatter the vertices.
        let mut offsets = Vec::with_capacity(sizes.len() + 1);
        offsets.push(0);
        for size in &sizes {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + size);
        }

        let mut cursor = offsets[..sizes.len()].to_vec();
        let mut members = alloc::vec![0; positions.len()];
        for (vertex, &group) in group_of.iter().enumerate() {
            let slot = &mut cursor[group as usize];
            members[*slot as usize] = vertex as u32;
            *slot += 1;
        }

        Self {
            group_of,
            offsets,
            members,
        }
    }

    /// Returns the number of vertices which were grouped.
    #[inline]
    pub fn len(&self) -> usize {
        self.group_of.len()
    }

    /// Returns `true` if no vertices were grouped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.group_of.is_empty()
    }

    /// Returns the number of distinct positions.
    #[inline]
    pub fn num_groups(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns the index of the group `vertex` belongs to.
    /// Groups are numbered in order of their first member.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    #[inline]
    pub fn group_index(&self, vertex: usize) -> usize {
        self.group_of[vertex] as usize
    }

    /// Returns every vertex sharing a position with `vertex`, including `vertex`
    /// itself.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range.
    pub fn group(&self, vertex: usize) -> &[u32] {
        self.members_of(self.group_index(vertex))
    }

    /// Iterates over all groups, in order of their first member.
    pub fn groups(&self) -> impl ExactSizeIterator<Item = &[u32]> + '_ {
        (0..self.num_groups()).map(|group| self.members_of(group))
    }

    fn members_of(&self, group: usize) -> &[u32] {
        let start = self.offsets[group] as usize;
        let end = self.offsets[group + 1] as usize;
        &self.members[start..end]
    }
}
