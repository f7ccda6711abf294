use alloc::vec::Vec;

use crate::{
    Ops, PositionGroups, SmoothNormalsError, SmoothingConfig, encode_unit_range, math::Vec3,
};

/// Computes one smoothed normal per vertex of an existing [`PositionGroups`].
///
/// This allows the grouping to be shared between several passes over the same
/// positions, for example with different thresholds.
///
/// # Errors
///
/// Returns [`SmoothNormalsError::LengthMismatch`] if `normals` does not have one
/// entry per vertex in `groups`.
pub fn smooth_grouped_normals<O: Ops>(
    groups: &PositionGroups,
    normals: &[[f32; 3]],
    config: &SmoothingConfig,
) -> Result<Vec<[f32; 3]>, SmoothNormalsError> {
    if groups.len() != normals.len() {
        return Err(SmoothNormalsError::LengthMismatch {
            positions: groups.len(),
            normals: normals.len(),
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        vertices = groups.len(),
        groups = groups.num_groups(),
        angle_threshold = config.use_angle_threshold.then_some(config.angle_threshold),
        remap = config.remap_to_unit_range,
        "smoothing normals"
    );

    let smoothed = normals
        .iter()
        .enumerate()
        .map(|(vertex, &normal)| {
            let normal = Vec3::<O>::from(normal);

            let mut sum = Vec3::ZERO;
            for &other in groups.group(vertex) {
                let other = Vec3::from(normals[other as usize]);
                if admits(config, normal, other) {
                    sum += other;
                }
            }

            let sum = sum.normalized_or_zero();

            #[cfg(feature = "tracing")]
            if sum == Vec3::ZERO {
                tracing::trace!(vertex, "smoothed normal has zero length");
            }

            if config.remap_to_unit_range {
                encode_unit_range(sum.into())
            } else {
                sum.into()
            }
        })
        .collect();

    Ok(smoothed)
}

/// Returns `true` if `other` should be averaged into the normal of a vertex
/// whose own normal is `normal`.
fn admits<O: Ops>(config: &SmoothingConfig, normal: Vec3<O>, other: Vec3<O>) -> bool {
    !config.use_angle_threshold || normal.angle_between_degrees(other) <= config.angle_threshold
}
