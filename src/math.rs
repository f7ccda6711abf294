use core::{
    marker::PhantomData,
    ops::{Add, AddAssign, Mul},
};

/// Provides the math operations required by the smoothing algorithm but which
/// aren't included in Rust's [`core`] crate.
/// With the `std` feature enabled, a (default) implementation is provided.
pub trait Ops {
    /// Provides a [`sqrt`] implementation for [`f32`].
    ///
    /// [`sqrt`]: https://doc.rust-lang.org/stable/std/primitive.f32.html#method.sqrt
    // TODO: Provide default implementation if/when `core_float_math` is stable.
    //       See https://github.com/rust-lang/rust/issues/137578
    fn sqrt(x: f32) -> f32;

    /// Provides a [`acos`] implementation for [`f32`].
    ///
    /// [`acos`]: https://doc.rust-lang.org/stable/std/primitive.f32.html#method.acos
    fn acos(x: f32) -> f32;

    /// Provides a [`round_ties_even`] implementation for [`f32`].
    ///
    /// Halfway cases must round to the nearest even integer.
    /// Rounding halfway cases away from zero will bucket some positions
    /// differently.
    ///
    /// [`round_ties_even`]: https://doc.rust-lang.org/stable/std/primitive.f32.html#method.round_ties_even
    fn round_ties_even(x: f32) -> f32;
}

/// Vectors with a magnitude at or below this value normalize to zero.
const NORMALIZE_EPSILON: f32 = 1e-5;

/// Denominator below which [`angle_between`] treats either input as zero length.
const ANGLE_EPSILON: f32 = 1e-15;

pub(crate) struct Vec3<O: Ops> {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) z: f32,
    pub(crate) _phantom: PhantomData<O>,
}

impl<O: Ops> Copy for Vec3<O> {}

impl<O: Ops> Clone for Vec3<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: Ops> From<[f32; 3]> for Vec3<O> {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::ZERO
        }
    }
}

impl<O: Ops> From<Vec3<O>> for [f32; 3] {
    fn from(Vec3 { x, y, z, .. }: Vec3<O>) -> Self {
        [x, y, z]
    }
}

impl<O: Ops> Vec3<O> {
    pub(crate) const ZERO: Vec3<O> = Vec3::splat(0.);

    pub(crate) const fn splat(v: f32) -> Self {
        Vec3 {
            x: v,
            y: v,
            z: v,
            _phantom: PhantomData,
        }
    }

    pub(crate) fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub(crate) fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub(crate) fn length(self) -> f32 {
        O::sqrt(self.length_squared())
    }

    /// Returns this vector scaled to unit length, or [`ZERO`](Vec3::ZERO) if it
    /// is too short to have a meaningful direction.
    pub(crate) fn normalized_or_zero(self) -> Self {
        let this = if self.length_squared().is_infinite() {
            self.rescaled()
        } else {
            self
        };

        let length = this.length();
        if length > NORMALIZE_EPSILON {
            this * length.recip()
        } else {
            Self::ZERO
        }
    }

    /// Angle between `self` and `rhs` in degrees, in the range `[0, 180]`.
    pub(crate) fn angle_between_degrees(self, rhs: Self) -> f32 {
        let denominator = O::sqrt(self.length_squared() * rhs.length_squared());
        // `NaN` must not reach the threshold comparison.
        if denominator.is_nan() || denominator < ANGLE_EPSILON {
            return 0.;
        }

        let cos = if denominator.is_infinite() {
            // Long vectors overflow the product, so retry on copies with a
            // largest component of one.
            let (a, b) = (self.rescaled(), rhs.rescaled());
            a.dot(b) / O::sqrt(a.length_squared() * b.length_squared())
        } else {
            self.dot(rhs) / denominator
        };
        O::acos(cos.clamp(-1., 1.)).to_degrees()
    }

    /// Divides by the largest absolute component.
    fn rescaled(self) -> Self {
        let max = self.x.abs().max(self.y.abs()).max(self.z.abs());
        self * max.recip()
    }
}

impl<O: Ops> Add for Vec3<O> {
    type Output = Vec3<O>;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            _phantom: PhantomData,
        }
    }
}

impl<O: Ops> AddAssign for Vec3<O> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<O: Ops> Mul<f32> for Vec3<O> {
    type Output = Vec3<O>;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec3 {
            x: rhs * self.x,
            y: rhs * self.y,
            z: rhs * self.z,
            _phantom: PhantomData,
        }
    }
}

impl<O: Ops> PartialEq for Vec3<O> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

/// Returns the angle between `a` and `b` in degrees, in the range `[0, 180]`.
///
/// This is the comparison used by the angle threshold in
/// [`SmoothingConfig`](crate::SmoothingConfig), provided so callers can
/// predict which neighbors a vertex will be smoothed with.
/// If either vector has (nearly) zero length, the angle is `0`.
/// The result does not depend on the magnitudes otherwise, even for vectors
/// whose squared length does not fit in an [`f32`].
pub fn angle_between<O: Ops>(a: [f32; 3], b: [f32; 3]) -> f32 {
    Vec3::<O>::from(a).angle_between_degrees(b.into())
}
