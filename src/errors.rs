//! Error types that are reported by slice parsing and view operations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// The reason a slice notation string could not be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// The notation, or a single-field index, was empty.
    Empty,

    /// An axis had more than three `:`-separated fields.
    TooManyFields,

    /// A field was not an optionally signed decimal integer.
    InvalidNumber,

    /// A field was an integer outside the range of `isize`.
    OutOfRange,

    /// The step field was zero.
    ZeroStep,
}

/// Error returned when slice notation is malformed.
///
/// `text` holds the substring that was rejected. Depending on the failure
/// this is a single field, a single axis or the whole input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatError {
    text: String,
    kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(text: &str, kind: FormatErrorKind) -> FormatError {
        FormatError {
            text: text.to_string(),
            kind,
        }
    }

    /// Return the substring of the input that caused the failure.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> FormatErrorKind {
        self.kind
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FormatErrorKind::Empty => write!(f, "empty slice notation \"{}\"", self.text),
            FormatErrorKind::TooManyFields => {
                write!(f, "slice \"{}\" has more than three fields", self.text)
            }
            FormatErrorKind::InvalidNumber => write!(f, "\"{}\" is not an integer", self.text),
            FormatErrorKind::OutOfRange => write!(f, "\"{}\" is out of range", self.text),
            FormatErrorKind::ZeroStep => write!(f, "slice \"{}\" has a step of zero", self.text),
        }
    }
}

impl Error for FormatError {}

/// Errors that can occur when creating, slicing, reshaping or indexing a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Slice notation could not be parsed.
    Format(FormatError),

    /// A reducing index or an element coordinate is outside the bounds of
    /// the axis it applies to.
    IndexOutOfRange {
        axis: usize,
        index: isize,
        size: usize,
    },

    /// More slices or coordinates were given than the view has dimensions.
    TooManyIndices { count: usize, ndim: usize },

    /// The element count of a new shape does not match the element count of
    /// the data it describes.
    ShapeMismatch { expected: usize, actual: usize },

    /// A view was requested from a container type that is not supported.
    /// `type_name` is the requested element type.
    UnsupportedSourceType { type_name: &'static str },

    /// The step of a generated range was not positive.
    InvalidStep { step: i32 },
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::Format(err) => write!(f, "{}", err),
            ViewError::IndexOutOfRange { axis, index, size } => write!(
                f,
                "index {} is out of bounds for axis {} with size {}",
                index, axis, size
            ),
            ViewError::TooManyIndices { count, ndim } => write!(
                f,
                "{} indices given for a view with {} dims",
                count, ndim
            ),
            ViewError::ShapeMismatch { expected, actual } => write!(
                f,
                "shape has {} elements but {} were expected",
                actual, expected
            ),
            ViewError::UnsupportedSourceType { type_name } => {
                write!(f, "cannot create a view of {} from this source type", type_name)
            }
            ViewError::InvalidStep { step } => write!(f, "step must be > 0, got {}", step),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ViewError::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for ViewError {
    fn from(err: FormatError) -> ViewError {
        ViewError::Format(err)
    }
}
