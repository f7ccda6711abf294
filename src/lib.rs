//! Computes _smoothed_ vertex normals for 3D geometry in entirely safe and
//! idiomatic Rust, and encodes them for storage in a texture coordinate channel.
//!
//! The primary use is outline (inverted hull) and rim shading on meshes with hard
//! edges.
//! A flat-shaded mesh duplicates every vertex along a hard edge, giving each copy
//! the normal of its own face.
//! Extruding along those normals tears the hull apart at the seams.
//! Averaging the normals of all vertices which share a position produces a
//! direction that is identical for every copy, so the hull stays closed, while
//! the original normals remain untouched for lighting.
//!
//! # Usage
//!
//! As a preliminary step for `no_std` users, you must provide an implementation
//! for [`Ops`].
//! When the `std` feature is enabled, one is provided and automatically selected
//! as the default.
//!
//! The simplest entry point works directly on position and normal buffers:
//!
//! ```
//! # use bevy_smooth_normals::{SmoothingConfig, smooth_normals};
//! let positions = [[0., 0., 0.], [0., 0., 0.]];
//! let normals = [[1., 0., 0.], [0., 1., 0.]];
//!
//! let smoothed = smooth_normals(&positions, &normals, &SmoothingConfig::default())?;
//!
//! assert!((smoothed[0][0] - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
//! assert_eq!(smoothed[0], smoothed[1]);
//! # Ok::<(), bevy_smooth_normals::SmoothNormalsError>(())
//! ```
//!
//! Alternatively, implement [`Geometry`] for your mesh type and use
//! [`generate_smoothed_normals`], which reads the mesh and writes the result back
//! into the [configured channel](SmoothingConfig::channel).
//!
//! ```ignore
//! impl Geometry for MyMesh { /* ... */ }
//! ```
//!
//! # Description
//!
//! Smoothing happens in two steps:
//!
//! 1. Every vertex is assigned to a [group](PositionGroups) of vertices whose
//!    positions round to the same point on a fine grid.
//!    Only exact matches on that grid are grouped; there is no distance based
//!    search.
//! 2. For each vertex, the normals of its group are summed and the sum is
//!    normalized.
//!    With an [angle threshold](SmoothingConfig::angle_threshold), only normals
//!    within that many degrees of the vertex's own normal contribute, preserving
//!    hard edges which are sharper than the threshold.
//!
//! If the contributing normals cancel out, the result is the zero vector rather
//! than an error.
//! Optionally, results are [remapped](encode_unit_range) from `[-1, 1]` to
//! `[0, 1]` for channels which cannot store negative values.
//!
//! Every call is independent and recomputes the grouping from scratch.
//!
//! # Features
//!
//! ## `std` (default)
//!
//! Provides access to the standard library, allowing a default implementation
//! of [`Ops`] to be provided.
//! If you disable this feature, you will need to provide a type implementing
//! [`Ops`] as the `O` parameter in the [`Geometry`] trait and when calling the
//! `*_with` functions.
//!
//! ```
//! # use bevy_smooth_normals::Ops;
//! # struct LibmOps;
//! impl Ops for LibmOps {
//!     fn sqrt(x: f32) -> f32 {
//!         libm::sqrtf(x)
//!     }
//!
//!     fn acos(x: f32) -> f32 {
//!         libm::acos(x as f64) as f32
//!     }
//!
//!     fn round_ties_even(x: f32) -> f32 {
//!         libm::rintf(x)
//!     }
//! }
//! ```
//!
//! ## `tracing`
//!
//! Emits [`tracing`] events describing each smoothing pass.
//!
//! [`tracing`]: https://docs.rs/tracing

#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

mod config;
mod encoding;
mod math;
mod position_groups;
mod smoothing;

#[cfg(all(test, feature = "std"))]
mod tests;

use alloc::vec::Vec;

#[cfg(feature = "std")]
mod std {
    extern crate std;

    /// Implements [`Ops`](crate::Ops) using the standard library.
    /// This is the recommended default when the `std` feature is enabled.
    pub struct StdOps;

    impl crate::Ops for StdOps {
        #[inline]
        fn sqrt(x: f32) -> f32 {
            x.sqrt()
        }

        #[inline]
        fn acos(x: f32) -> f32 {
            // Using f64::acos for added precision.
            (x as f64).acos() as f32
        }

        #[inline]
        fn round_ties_even(x: f32) -> f32 {
            x.round_ties_even()
        }
    }
}

pub use config::{SmoothingConfig, UvChannel};
pub use encoding::{decode_unit_range, encode_unit_range};
pub use math::{Ops, angle_between};
pub use position_groups::PositionGroups;
pub use smoothing::smooth_grouped_normals;

#[cfg(feature = "std")]
pub use std::StdOps;

/// Computes one smoothed normal per vertex from aligned `positions` and
/// `normals`, using the standard library for math.
///
/// See [`smooth_normals_with`] for details.
#[cfg(feature = "std")]
pub fn smooth_normals(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    config: &SmoothingConfig,
) -> Result<Vec<[f32; 3]>, SmoothNormalsError> {
    smooth_normals_with::<StdOps>(positions, normals, config)
}

/// Computes one smoothed normal per vertex from aligned `positions` and
/// `normals`.
///
/// The returned buffer is index-aligned with the inputs.
/// [`channel`](SmoothingConfig::channel) is not used; writing the result
/// somewhere is left to the caller.
///
/// # Errors
///
/// Returns [`SmoothNormalsError::LengthMismatch`] if `positions` and `normals`
/// differ in length.
/// No work is done in that case.
pub fn smooth_normals_with<O: Ops>(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    config: &SmoothingConfig,
) -> Result<Vec<[f32; 3]>, SmoothNormalsError> {
    if positions.len() != normals.len() {
        return Err(SmoothNormalsError::LengthMismatch {
            positions: positions.len(),
            normals: normals.len(),
        });
    }

    let groups = PositionGroups::build_with::<O>(positions);
    smoothing::smooth_grouped_normals::<O>(&groups, normals, config)
}

/// Generates smoothed normals for the provided geometry and writes them to
/// [`config.channel`](SmoothingConfig::channel) using
/// [`Geometry::set_channel`].
pub fn generate_smoothed_normals<I, O>(
    geometry: &mut I,
    config: &SmoothingConfig,
) -> Result<SmoothingSummary, SmoothNormalsError>
where
    I: Geometry<O>,
    O: Ops,
{
    let vertices = geometry.num_vertices();
    let positions = (0..vertices)
        .map(|vert| geometry.position(vert))
        .collect::<Vec<_>>();
    let normals = (0..vertices)
        .map(|vert| geometry.normal(vert))
        .collect::<Vec<_>>();

    let groups = PositionGroups::build_with::<O>(&positions);
    let smoothed = smoothing::smooth_grouped_normals::<O>(&groups, &normals, config)?;

    let replaced_existing_channel = geometry.has_channel(config.channel);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        vertices,
        channel = %config.channel,
        replaced_existing_channel,
        "writing smoothed normals"
    );

    geometry.set_channel(config.channel, smoothed);

    Ok(SmoothingSummary {
        vertices,
        groups: groups.num_groups(),
        channel: config.channel,
        replaced_existing_channel,
    })
}

/// Provides an interface for reading vertex information from geometry, and writing
/// back out the smoothed normals.
///
/// Vertices are addressed by a contiguous index in `0..num_vertices()`.
///
/// Without the `std` feature, there is no default implementation for [`Ops`]
/// provided.
/// Instead, you must also provide a type implementing [`Ops`] using an alternative
/// math backend, such as [`libm`].
///
/// [`libm`]: https://docs.rs/libm
pub trait Geometry<
    #[cfg(not(feature = "std"))] O: Ops,
    #[cfg(feature = "std")] O: Ops = std::StdOps,
>
{
    /// Returns the number of vertices on the mesh to be processed.
    fn num_vertices(&self) -> usize;

    /// Returns the position of vertex number `vert`.
    fn position(&self, vert: usize) -> [f32; 3];

    /// Returns the normal of vertex number `vert`.
    fn normal(&self, vert: usize) -> [f32; 3];

    /// Returns `true` if `channel` already holds data which
    /// [`set_channel`](Geometry::set_channel) would replace.
    ///
    /// This only informs the returned [`SmoothingSummary`].
    fn has_channel(&self, _channel: UvChannel) -> bool {
        false
    }

    /// This function is used to return the smoothed normals to the application.
    /// `values` holds exactly one entry per vertex, in vertex order.
    fn set_channel(&mut self, channel: UvChannel, values: Vec<[f32; 3]>);
}

/// Describes a completed call to [`generate_smoothed_normals`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SmoothingSummary {
    vertices: usize,
    groups: usize,
    channel: UvChannel,
    replaced_existing_channel: bool,
}

impl SmoothingSummary {
    /// Returns the number of vertices which were smoothed.
    #[inline]
    pub const fn vertices(&self) -> usize {
        self.vertices
    }

    /// Returns the number of distinct positions found among the vertices.
    #[inline]
    pub const fn groups(&self) -> usize {
        self.groups
    }

    /// Returns the channel the results were written to.
    #[inline]
    pub const fn channel(&self) -> UvChannel {
        self.channel
    }

    /// Indicates if [`channel`](SmoothingSummary::channel) held data before it was
    /// written, according to [`Geometry::has_channel`].
    #[inline]
    pub const fn replaced_existing_channel(&self) -> bool {
        self.replaced_existing_channel
    }
}

/// Error returned when failing to smooth normals.
#[derive(Clone, PartialEq, Debug)]
// Reserving the right to introduce new error variants in the future.
#[non_exhaustive]
pub enum SmoothNormalsError {
    /// The position and normal buffers are not index-aligned.
    LengthMismatch {
        /// Number of positions provided.
        positions: usize,
        /// Number of normals provided.
        normals: usize,
    },
}

impl core::fmt::Display for SmoothNormalsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthMismatch { positions, normals } => write!(
                f,
                "expected one normal per position, found {positions} positions and {normals} normals"
            ),
        }
    }
}

impl core::error::Error for SmoothNormalsError {}
