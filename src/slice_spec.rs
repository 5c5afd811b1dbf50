use smallvec::SmallVec;

use std::fmt::{Display, Formatter};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::str::FromStr;

use crate::errors::{FormatError, FormatErrorKind};

/// Describes which part of one dimension to keep when slicing a view.
///
/// A spec is either a range (`start:stop:step`, any part of which may be
/// omitted) or an index, which picks a single position and removes the
/// dimension from the sliced view.
///
/// Specs are usually created by parsing slice notation:
///
/// ```
/// use ndview::SliceSpec;
///
/// let spec: SliceSpec = "1:8:2".parse().unwrap();
/// assert_eq!(spec, SliceSpec::range(Some(1), Some(8), 2));
/// assert_eq!(spec.to_string(), "1:8:2");
///
/// let index: SliceSpec = " 3 ".parse().unwrap();
/// assert_eq!(index, SliceSpec::index(3));
/// ```
///
/// Omitted bounds stay unspecified until the spec is applied to a dimension,
/// at which point they resolve to the start or end of that dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SliceSpec {
    start: Option<isize>,
    stop: Option<isize>,

    /// Private so this module can enforce the invariant that it is non-zero.
    step: isize,

    is_index: bool,
}

impl SliceSpec {
    /// Return a spec that keeps the full range of a dimension. Equivalent to
    /// parsing `":"`.
    #[inline]
    pub fn all() -> SliceSpec {
        SliceSpec {
            start: None,
            stop: None,
            step: 1,
            is_index: false,
        }
    }

    /// Return a spec that picks position `index` and removes the dimension.
    /// Equivalent to parsing the bare integer.
    #[inline]
    pub fn index(index: isize) -> SliceSpec {
        SliceSpec {
            start: Some(index),
            stop: Some(index),
            step: 1,
            is_index: true,
        }
    }

    /// Return a range spec.
    ///
    /// Panics if `step` is zero.
    #[inline]
    pub fn range(start: Option<isize>, stop: Option<isize>, step: isize) -> SliceSpec {
        assert!(step != 0, "Slice step cannot be 0");
        SliceSpec {
            start,
            stop,
            step,
            is_index: false,
        }
    }

    pub fn start(&self) -> Option<isize> {
        self.start
    }

    pub fn stop(&self) -> Option<isize> {
        self.stop
    }

    pub fn step(&self) -> isize {
        self.step
    }

    /// Return true if this spec reduces the dimension it is applied to.
    pub fn is_index(&self) -> bool {
        self.is_index
    }

    /// Resolve this spec against a dimension of size `dim_size`.
    ///
    /// Range bounds are never rejected. Negative bounds count back from the
    /// end of the dimension and the result is clamped into `[0, dim_size]`.
    /// Returns `None` if this is an index spec and the index is not in
    /// `[0, dim_size)`.
    pub fn resolve(&self, dim_size: usize) -> Option<AxisSlice> {
        let len = dim_size as isize;

        if self.is_index {
            let index = self.start.unwrap_or(0);
            if index < 0 || index >= len {
                return None;
            }
            return Some(AxisSlice {
                start: index as usize,
                stop: index as usize + 1,
                step: 1,
                is_index: true,
            });
        }

        let resolve_bound = |bound: isize| -> usize {
            let bound = if bound < 0 {
                bound.saturating_add(len)
            } else {
                bound
            };
            bound.clamp(0, len) as usize
        };

        Some(AxisSlice {
            start: self.start.map(resolve_bound).unwrap_or(0),
            stop: self.stop.map(resolve_bound).unwrap_or(dim_size),
            step: self.step,
            is_index: false,
        })
    }
}

impl Default for SliceSpec {
    fn default() -> SliceSpec {
        SliceSpec::all()
    }
}

/// Parse one numeric field. Empty fields are `None`.
fn parse_field(field: &str) -> Result<Option<isize>, FormatError> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let (negative, digits) = match trimmed.as_bytes()[0] {
        b'-' => (true, trimmed[1..].trim_start()),
        b'+' => (false, trimmed[1..].trim_start()),
        _ => (false, trimmed),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::new(trimmed, FormatErrorKind::InvalidNumber));
    }

    let value = if negative {
        format!("-{}", digits).parse::<isize>()
    } else {
        digits.parse::<isize>()
    };
    value
        .map(Some)
        .map_err(|_| FormatError::new(trimmed, FormatErrorKind::OutOfRange))
}

impl FromStr for SliceSpec {
    type Err = FormatError;

    /// Parse the notation for a single axis: `[start][:stop[:step]]` or a
    /// bare integer.
    fn from_str(s: &str) -> Result<SliceSpec, FormatError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FormatError::new(trimmed, FormatErrorKind::Empty));
        }

        let fields: SmallVec<[&str; 3]> = s.split(':').collect();
        match fields.as_slice() {
            [index] => match parse_field(index)? {
                Some(index) => Ok(SliceSpec::index(index)),
                None => Err(FormatError::new(trimmed, FormatErrorKind::Empty)),
            },
            [start, stop] => Ok(SliceSpec::range(parse_field(start)?, parse_field(stop)?, 1)),
            [start, stop, step] => {
                let start = parse_field(start)?;
                let stop = parse_field(stop)?;
                match parse_field(step)?.unwrap_or(1) {
                    0 => Err(FormatError::new(trimmed, FormatErrorKind::ZeroStep)),
                    step => Ok(SliceSpec::range(start, stop, step)),
                }
            }
            _ => Err(FormatError::new(trimmed, FormatErrorKind::TooManyFields)),
        }
    }
}

impl Display for SliceSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_index {
            return write!(f, "{}", self.start.unwrap_or(0));
        }
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        write!(f, ":")?;
        if let Some(stop) = self.stop {
            write!(f, "{}", stop)?;
        }
        if self.step != 1 {
            write!(f, ":{}", self.step)?;
        }
        Ok(())
    }
}

/// Dynamically sized array of [`SliceSpec`]s, which avoids allocating in the
/// common case where the length is small.
pub type DynSliceSpecs = SmallVec<[SliceSpec; 5]>;

/// Parse comma-separated slice notation into one spec per axis.
///
/// ```
/// use ndview::{parse_slices, SliceSpec};
///
/// let specs = parse_slices(":, 1:").unwrap();
/// assert_eq!(specs.as_slice(), [SliceSpec::all(), SliceSpec::range(Some(1), None, 1)]);
/// ```
pub fn parse_slices(notation: &str) -> Result<DynSliceSpecs, FormatError> {
    let trimmed = notation.trim();
    if trimmed.is_empty() {
        return Err(FormatError::new(trimmed, FormatErrorKind::Empty));
    }
    notation.split(',').map(|axis| axis.parse()).collect()
}

/// Format specs as comma-separated slice notation. This is the inverse of
/// [`parse_slices`].
pub fn format_slices(specs: &[SliceSpec]) -> String {
    let mut notation = String::new();
    for (i, spec) in specs.iter().enumerate() {
        if i > 0 {
            notation.push(',');
        }
        notation.push_str(&spec.to_string());
    }
    notation
}

// This conversion exists to avoid ambiguity when slicing with a numeric
// literal of unspecified type (eg. `view.slice_with((0, 0))`).
impl From<i32> for SliceSpec {
    #[inline]
    fn from(value: i32) -> Self {
        SliceSpec::index(value as isize)
    }
}

impl From<isize> for SliceSpec {
    #[inline]
    fn from(value: isize) -> Self {
        SliceSpec::index(value)
    }
}

impl From<usize> for SliceSpec {
    #[inline]
    fn from(value: usize) -> Self {
        SliceSpec::index(value as isize)
    }
}

/// Convert a range endpoint to `isize`, saturating endpoints that don't fit
/// towards their own sign. Either way the bound resolves to the same clamped
/// position as the original value.
fn range_bound<T: RangeBound>(bound: T) -> isize {
    let negative = bound < T::default();
    bound.try_into().unwrap_or(if negative { isize::MIN } else { isize::MAX })
}

/// Integer types usable as the endpoints of a Rust range slice.
pub trait RangeBound: TryInto<isize> + PartialOrd + Default + Copy {}

impl<T: TryInto<isize> + PartialOrd + Default + Copy> RangeBound for T {}

impl<T: RangeBound> From<Range<T>> for SliceSpec {
    fn from(r: Range<T>) -> SliceSpec {
        SliceSpec::range(Some(range_bound(r.start)), Some(range_bound(r.end)), 1)
    }
}

impl<T: RangeBound> From<RangeFrom<T>> for SliceSpec {
    fn from(r: RangeFrom<T>) -> SliceSpec {
        SliceSpec::range(Some(range_bound(r.start)), None, 1)
    }
}

impl<T: RangeBound> From<RangeTo<T>> for SliceSpec {
    fn from(r: RangeTo<T>) -> SliceSpec {
        SliceSpec::range(None, Some(range_bound(r.end)), 1)
    }
}

impl From<RangeFull> for SliceSpec {
    #[inline]
    fn from(_: RangeFull) -> SliceSpec {
        SliceSpec::all()
    }
}

/// Used to convert sequences of indices and/or ranges into a uniform
/// `[SliceSpec]` array that can be used to slice a view.
///
/// This trait is implemented for:
///
///  - Individual indices and ranges (types satisfying `Into<SliceSpec>`)
///  - Arrays of indices or ranges
///  - Tuples of indices and/or ranges
///  - `[SliceSpec]` slices
pub trait IntoSliceSpecs {
    type Array: AsRef<[SliceSpec]>;

    fn into_slice_specs(self) -> Self::Array;
}

impl<'a> IntoSliceSpecs for &'a [SliceSpec] {
    type Array = &'a [SliceSpec];

    fn into_slice_specs(self) -> &'a [SliceSpec] {
        self
    }
}

impl<const N: usize, T: Into<SliceSpec>> IntoSliceSpecs for [T; N] {
    type Array = [SliceSpec; N];

    fn into_slice_specs(self) -> [SliceSpec; N] {
        self.map(|x| x.into())
    }
}

impl<T: Into<SliceSpec>> IntoSliceSpecs for T {
    type Array = [SliceSpec; 1];

    fn into_slice_specs(self) -> [SliceSpec; 1] {
        [self.into()]
    }
}

impl<T1: Into<SliceSpec>> IntoSliceSpecs for (T1,) {
    type Array = [SliceSpec; 1];

    fn into_slice_specs(self) -> [SliceSpec; 1] {
        [self.0.into()]
    }
}

impl<T1: Into<SliceSpec>, T2: Into<SliceSpec>> IntoSliceSpecs for (T1, T2) {
    type Array = [SliceSpec; 2];

    fn into_slice_specs(self) -> [SliceSpec; 2] {
        [self.0.into(), self.1.into()]
    }
}

impl<T1: Into<SliceSpec>, T2: Into<SliceSpec>, T3: Into<SliceSpec>> IntoSliceSpecs
    for (T1, T2, T3)
{
    type Array = [SliceSpec; 3];

    fn into_slice_specs(self) -> [SliceSpec; 3] {
        [self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<T1: Into<SliceSpec>, T2: Into<SliceSpec>, T3: Into<SliceSpec>, T4: Into<SliceSpec>>
    IntoSliceSpecs for (T1, T2, T3, T4)
{
    type Array = [SliceSpec; 4];

    fn into_slice_specs(self) -> [SliceSpec; 4] {
        [self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// A [`SliceSpec`] resolved against a concrete dimension.
///
/// The selected positions are the half-open set `[start, stop)` of the parent
/// dimension, visited every `step` positions. The sign of `step` only chooses
/// the direction: a negative step starts from the last position in the set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AxisSlice {
    /// First position in `[0, dim_size]`.
    start: usize,

    /// End position (exclusive) in `[0, dim_size]`.
    stop: usize,

    step: isize,
    is_index: bool,
}

impl AxisSlice {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn stop(&self) -> usize {
        self.stop
    }

    pub fn step(&self) -> isize {
        self.step
    }

    pub fn is_index(&self) -> bool {
        self.is_index
    }

    /// Return the number of positions this slice selects. Index slices
    /// select exactly one.
    pub fn len(&self) -> usize {
        self.stop
            .saturating_sub(self.start)
            .div_ceil(self.step.unsigned_abs())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map a position local to the slice to a position in the parent
    /// dimension.
    ///
    /// Local position 0 is always the first element in the slice's own
    /// order, so for negative steps it maps to `stop - 1`.
    #[inline]
    pub fn project(&self, local: usize) -> usize {
        let anchor = if self.step > 0 {
            self.start as isize
        } else {
            self.stop as isize - 1
        };
        (anchor + local as isize * self.step) as usize
    }
}

impl IntoIterator for AxisSlice {
    type Item = usize;
    type IntoIter = AxisSliceIter;

    #[inline]
    fn into_iter(self) -> AxisSliceIter {
        AxisSliceIter {
            slice: self,
            next: 0,
            len: self.len(),
        }
    }
}

/// An iterator over the parent positions selected by an [`AxisSlice`].
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSliceIter {
    slice: AxisSlice,
    next: usize,
    len: usize,
}

impl Iterator for AxisSliceIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.next >= self.len {
            return None;
        }
        let pos = self.slice.project(self.next);
        self.next += 1;
        Some(pos)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AxisSliceIter {}
impl std::iter::FusedIterator for AxisSliceIter {}
