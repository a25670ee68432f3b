//! Grid container and item type definitions.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>

use serde::{Deserialize, Serialize};

/// A `<length-percentage>` value, already resolved to CSS pixels where possible.
///
/// Percentages are stored as fractions (`50%` is `0.5`), the way cssparser
/// reports `unit_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LengthPercentage {
    /// Length in pixels
    Length(f32),
    /// Fraction of the percentage basis
    Percentage(f32),
}

impl LengthPercentage {
    /// Resolve against a percentage basis; `None` when the basis is indefinite.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(len) => Some(len),
            Self::Percentage(pct) => basis.map(|size| size * pct),
        }
    }

    /// Resolve, treating an unresolvable percentage as zero.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::Length(0.0)
    }
}

/// Represents a track size in the grid.
///
/// Spec: §7.2.1 Track Sizing Functions
/// <https://www.w3.org/TR/css-grid-2/#track-sizing>
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackBreadth {
    /// Length in pixels
    Length(f32),
    /// Percentage of the container's content size (as a fraction)
    Percentage(f32),
    /// Flex factor (fr units)
    Flex(f32),
    /// Minimum content size
    MinContent,
    /// Maximum content size
    MaxContent,
    /// Automatic sizing
    Auto,
}

impl TrackBreadth {
    /// Check if this breadth is intrinsic (depends on content).
    pub fn is_intrinsic(&self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent | Self::Auto)
    }

    /// Check if this breadth is flexible (uses fr units).
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::Flex(_))
    }

    /// Get the flex factor, or 0.0 if not flexible.
    pub fn flex_factor(&self) -> f32 {
        match self {
            Self::Flex(factor) => *factor,
            _ => 0.0,
        }
    }

    /// Resolve a fixed breadth to pixels.
    ///
    /// Returns `None` for intrinsic and flexible breadths and for percentages
    /// against an indefinite basis.
    pub fn fixed_size(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(len) => Some(*len),
            Self::Percentage(pct) => basis.map(|size| size * pct),
            _ => None,
        }
    }
}

/// Track sizing function.
///
/// Spec: §7.2.1 Track Sizing Functions
///
/// The `min` side of [`GridTrackSize::MinMax`] is never flexible; use
/// [`GridTrackSize::minmax`] to build one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridTrackSize {
    /// Single breadth (`100px`, `1fr`, `auto`, ...)
    Breadth(TrackBreadth),
    /// minmax(min, max)
    MinMax(TrackBreadth, TrackBreadth),
    /// fit-content(limit)
    FitContent(LengthPercentage),
}

impl GridTrackSize {
    /// The `auto` track sizing function.
    pub const AUTO: Self = Self::Breadth(TrackBreadth::Auto);

    /// Fixed pixel track.
    pub fn px(len: f32) -> Self {
        Self::Breadth(TrackBreadth::Length(len))
    }

    /// Flexible track.
    pub fn fr(factor: f32) -> Self {
        Self::Breadth(TrackBreadth::Flex(factor))
    }

    /// Build a `minmax()` track.
    ///
    /// A flexible minimum is invalid CSS; it degrades to `auto`, which is what a
    /// bare `<flex>` track uses as its minimum anyway.
    pub fn minmax(min: TrackBreadth, max: TrackBreadth) -> Self {
        let min = if min.is_flexible() {
            log::warn!(target: "css::grid::types", "minmax() with flexible minimum, using auto");
            TrackBreadth::Auto
        } else {
            min
        };
        Self::MinMax(min, max)
    }

    /// Get the minimum breadth for this track size.
    pub fn min_breadth(&self) -> TrackBreadth {
        match self {
            // A bare <flex> is minmax(auto, <flex>)
            Self::Breadth(TrackBreadth::Flex(_)) | Self::FitContent(_) => TrackBreadth::Auto,
            Self::Breadth(breadth) => *breadth,
            Self::MinMax(min, _) => *min,
        }
    }

    /// Get the maximum breadth for this track size.
    ///
    /// `fit-content()` reports `max-content`; its limit is applied separately
    /// through [`GridTrackSize::fit_content_limit`].
    pub fn max_breadth(&self) -> TrackBreadth {
        match self {
            Self::Breadth(breadth) => *breadth,
            Self::MinMax(_, max) => *max,
            Self::FitContent(_) => TrackBreadth::MaxContent,
        }
    }

    /// Resolved `fit-content()` argument, if this is a `fit-content()` track.
    pub fn fit_content_limit(&self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::FitContent(limit) => limit.resolve(basis),
            _ => None,
        }
    }

    /// Check if the max sizing function is flexible.
    pub fn is_flexible(&self) -> bool {
        self.max_breadth().is_flexible()
    }

    /// Flex factor of the max sizing function.
    pub fn flex_factor(&self) -> f32 {
        self.max_breadth().flex_factor()
    }

    /// Check if either sizing function depends on content.
    pub fn is_intrinsic(&self) -> bool {
        self.min_breadth().is_intrinsic()
            || self.max_breadth().is_intrinsic()
            || matches!(self, Self::FitContent(_))
    }
}

impl Default for GridTrackSize {
    fn default() -> Self {
        Self::AUTO
    }
}

/// Type of track list (explicit or implicit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackListType {
    /// Explicit tracks from grid-template-*
    Explicit,
    /// Explicit tracks produced by `repeat(auto-fit, ...)`; collapsible when empty
    AutoFit,
    /// Implicit tracks from grid-auto-*
    Implicit,
}

/// A track in the grid with its sizing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridTrack {
    /// Track sizing function
    pub size: GridTrackSize,
    /// Track type
    pub track_type: TrackListType,
}

impl GridTrack {
    /// Explicit track.
    pub fn explicit(size: GridTrackSize) -> Self {
        Self {
            size,
            track_type: TrackListType::Explicit,
        }
    }

    /// Implicit track.
    pub fn implicit(size: GridTrackSize) -> Self {
        Self {
            size,
            track_type: TrackListType::Implicit,
        }
    }
}

/// Auto-placement algorithm direction.
///
/// Spec: §8.5 Grid Item Placement Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridAutoFlow {
    /// Place items row by row
    #[default]
    Row,
    /// Place items column by column
    Column,
    /// Pack items densely (try to fill holes)
    RowDense,
    /// Pack items densely in columns
    ColumnDense,
}

impl GridAutoFlow {
    /// Whether holes earlier in the grid are back-filled.
    pub fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }

    /// The axis whose tracks the cursor walks along before wrapping.
    ///
    /// Row flow fills the columns of a row, then moves to the next row.
    pub fn primary_axis(self) -> GridAxis {
        match self {
            Self::Row | Self::RowDense => GridAxis::Column,
            Self::Column | Self::ColumnDense => GridAxis::Row,
        }
    }
}

/// Axis identifier.
///
/// `Column` is the axis along which column tracks are laid out (horizontal),
/// `Row` the axis of row tracks (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridAxis {
    /// Row tracks (block axis in horizontal writing mode)
    Row,
    /// Column tracks (inline axis in horizontal writing mode)
    Column,
}

impl GridAxis {
    /// The other axis.
    pub fn other(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

/// Space available to a box along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AvailableSpace {
    /// A definite size in pixels
    Definite(f32),
    /// Size under a min-content constraint
    MinContent,
    /// Size under a max-content constraint (also used for "indefinite")
    MaxContent,
}

impl AvailableSpace {
    /// The definite size, if any.
    pub fn definite(self) -> Option<f32> {
        match self {
            Self::Definite(size) => Some(size),
            Self::MinContent | Self::MaxContent => None,
        }
    }

    /// Check whether the space is definite.
    pub fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }
}

impl Default for AvailableSpace {
    fn default() -> Self {
        Self::MaxContent
    }
}

/// Per-side box edges (padding, border or margin) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
    /// Left edge
    pub left: f32,
}

impl Edges {
    /// Same value on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// `(start, end)` edges along an axis.
    pub fn axis(&self, axis: GridAxis) -> (f32, f32) {
        match axis {
            GridAxis::Column => (self.left, self.right),
            GridAxis::Row => (self.top, self.bottom),
        }
    }

    /// Sum of both edges along an axis.
    pub fn axis_sum(&self, axis: GridAxis) -> f32 {
        let (start, end) = self.axis(axis);
        start + end
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            top: self.top + other.top,
            right: self.right + other.right,
            bottom: self.bottom + other.bottom,
            left: self.left + other.left,
        }
    }
}

/// Alignment values for grid items.
///
/// Spec: §10 Alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridAlignment {
    /// Start alignment
    Start,
    /// End alignment
    End,
    /// Center alignment
    Center,
    /// Stretch to fill
    #[default]
    Stretch,
    /// Share a first baseline with the other items of the row
    Baseline,
    /// Share a last baseline with the other items of the row
    LastBaseline,
}

/// Content distribution of the tracks within the container.
///
/// Spec: §10.5 Aligning the Grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContentDistribution {
    /// Behaves as `stretch`
    #[default]
    Normal,
    /// Pack tracks at the start
    Start,
    /// Pack tracks at the end
    End,
    /// Center the tracks
    Center,
    /// Grow `auto` tracks to fill
    Stretch,
    /// Leftover space between tracks
    SpaceBetween,
    /// Half-size leftover space at the edges
    SpaceAround,
    /// Equal leftover space everywhere
    SpaceEvenly,
}

impl ContentDistribution {
    /// Whether `auto` tracks absorb leftover space.
    pub fn stretches(self) -> bool {
        matches!(self, Self::Normal | Self::Stretch)
    }
}
