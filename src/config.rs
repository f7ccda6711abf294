/// Identifies one of the eight auxiliary texture coordinate channels a mesh can
/// store per-vertex vectors in.
///
/// Internally this is a zero-based index in the range `0..=7`.
/// Editors typically present these channels as `UV1` through `UV8`, see
/// [`from_display_number`](UvChannel::from_display_number).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UvChannel(u8);

impl UvChannel {
    /// Number of available channels.
    pub const COUNT: usize = 8;

    /// Every channel, in ascending order.
    pub const ALL: [UvChannel; Self::COUNT] = [
        UvChannel(0),
        UvChannel(1),
        UvChannel(2),
        UvChannel(3),
        UvChannel(4),
        UvChannel(5),
        UvChannel(6),
        UvChannel(7),
    ];

    /// Returns the channel with the zero-based `index`, if it exists.
    #[inline]
    pub const fn new(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the channel with the zero-based `index`, clamping out-of-range
    /// values to the last channel.
    #[inline]
    pub const fn clamped(index: usize) -> Self {
        if index < Self::COUNT {
            Self(index as u8)
        } else {
            Self(Self::COUNT as u8 - 1)
        }
    }

    /// Returns the channel for a one-based `number` as shown to users
    /// (`1` is `UV1`, the first channel).
    /// Values outside of `1..=8` are clamped.
    #[inline]
    pub const fn from_display_number(number: i32) -> Self {
        if number < 1 {
            Self(0)
        } else {
            Self::clamped((number - 1) as usize)
        }
    }

    /// Returns the zero-based index of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the one-based number of this channel as shown to users.
    #[inline]
    pub const fn display_number(self) -> u8 {
        self.0 + 1
    }
}

impl Default for UvChannel {
    /// `UV5`, a channel rarely used by other tooling.
    fn default() -> Self {
        Self(4)
    }
}

impl core::fmt::Display for UvChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "UV{}", self.display_number())
    }
}

/// Parameters for a single smoothing pass.
///
/// ```
/// # use bevy_smooth_normals::{SmoothingConfig, UvChannel};
/// let config = SmoothingConfig::default()
///     .with_channel(UvChannel::from_display_number(3))
///     .with_angle_threshold(45.)
///     .with_remap_to_unit_range(true);
///
/// assert_eq!(config.channel.index(), 2);
/// assert!(config.use_angle_threshold);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SmoothingConfig {
    /// Channel the smoothed normals are intended for.
    /// The smoothing itself does not depend on this value; it is handed to
    /// [`Geometry::set_channel`](crate::Geometry::set_channel).
    pub channel: UvChannel,
    /// Store each component as `n * 0.5 + 0.5`, mapping `[-1, 1]` onto `[0, 1]`.
    pub remap_to_unit_range: bool,
    /// Only average neighbors whose normal is within
    /// [`angle_threshold`](SmoothingConfig::angle_threshold) of the vertex's own.
    pub use_angle_threshold: bool,
    /// Maximum angle, in degrees, between two normals for them to be averaged.
    /// The bound is inclusive.
    /// Ignored unless [`use_angle_threshold`](SmoothingConfig::use_angle_threshold)
    /// is set.
    pub angle_threshold: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            channel: UvChannel::default(),
            remap_to_unit_range: false,
            use_angle_threshold: false,
            angle_threshold: 60.,
        }
    }
}

impl SmoothingConfig {
    /// Sets the target [`channel`](SmoothingConfig::channel).
    #[inline]
    pub const fn with_channel(mut self, channel: UvChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Sets [`remap_to_unit_range`](SmoothingConfig::remap_to_unit_range).
    #[inline]
    pub const fn with_remap_to_unit_range(mut self, remap: bool) -> Self {
        self.remap_to_unit_range = remap;
        self
    }

    /// Enables the angle filter with the provided threshold in degrees.
    #[inline]
    pub const fn with_angle_threshold(mut self, degrees: f32) -> Self {
        self.use_angle_threshold = true;
        self.angle_threshold = degrees;
        self
    }

    /// Disables the angle filter, keeping the stored threshold.
    #[inline]
    pub const fn without_angle_threshold(mut self) -> Self {
        self.use_angle_threshold = false;
        self
    }
}
