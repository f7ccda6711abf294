//! Conversion between unit directions and the `[0, 1]` range expected by
//! texture coordinate channels.

/// Maps each component of `direction` from `[-1, 1]` onto `[0, 1]`.
///
/// This is the transform applied when
/// [`remap_to_unit_range`](crate::SmoothingConfig::remap_to_unit_range) is set.
#[inline]
pub fn encode_unit_range(direction: [f32; 3]) -> [f32; 3] {
    direction.map(|c| c * 0.5 + 0.5)
}

/// Inverse of [`encode_unit_range`], recovering a direction from a stored value.
#[inline]
pub fn decode_unit_range(value: [f32; 3]) -> [f32; 3] {
    value.map(|c| (c - 0.5) * 2.)
}
