//! ndview provides strided, non-copying, multi-dimensional views over a single
//! shared buffer, with NumPy-style slice notation.
//!
//! # Views and shapes
//!
//! A [View] pairs a [Shape] with a handle to a [SharedBuffer]. A view created
//! from owned data (a _root_ view) has a dense, row-major [DenseShape]. Slicing
//! a view produces a new view whose [SlicedShape] projects coordinates into
//! the parent view's coordinate space. Views derived from views derived from
//! views all resolve to the same buffer, so a write through any of them is
//! visible through all of them.
//!
//! All shapes implement the [Layout] trait, which provides the dimension
//! count, size of each dimension and the mapping from coordinates to buffer
//! offsets. The preferred way to import it is via the prelude:
//!
//! ```
//! use ndview::prelude::*;
//! use ndview::View;
//!
//! let x = View::from_vec((0..10).collect());
//! let reversed = x.slice("::-1").unwrap();
//! assert_eq!(reversed.shape().len(), 10);
//!
//! reversed.set(&[0], 99).unwrap();
//! assert_eq!(x.get(&[9]).unwrap(), 99);
//! ```
//!
//! # Slice notation
//!
//! Each axis is sliced with `start:stop:step`, where any part may be omitted,
//! or with a bare integer, which selects one position and removes the axis.
//! Axes are separated by commas. Negative range bounds count back from the end
//! of the axis, and out of range bounds are clamped. See [SliceSpec].
//!
//! Slices can also be given as Rust ranges and integers using
//! [View::slice_with], eg. `view.slice_with((1.., 0))`.
//!
//! # Threading
//!
//! Views share their buffer via `Rc`, so they can't be sent to other threads.
//!
//! # Serialization
//!
//! Views can be serialized and deserialized using [serde](https://serde.rs)
//! if the `serde` feature is enabled. The serialized representation holds the
//! dims and the elements in row-major order:
//!
//! ```json
//! {
//!   "shape": [2, 2],
//!   "data": [0.5, 1.0, 1.5, 2.0]
//! }
//! ```

mod env;
pub mod errors;
mod impl_display;
#[cfg(feature = "serde")]
mod impl_serialize;
pub mod indices;
pub mod iterators;
pub mod layout;
pub mod shape;
pub mod slice_spec;
pub mod sliced_shape;
pub mod storage;
mod view;

#[cfg(test)]
mod test_util;

// Re-exports for convenience.
pub use errors::{FormatError, FormatErrorKind, ViewError};
pub use impl_display::FormatOptions;
pub use indices::{DynIndex, Indices, Offsets};
pub use layout::Layout;
pub use shape::{DenseShape, Shape};
pub use slice_spec::{format_slices, parse_slices, AxisSlice, IntoSliceSpecs, SliceSpec};
pub use sliced_shape::SlicedShape;
pub use storage::SharedBuffer;
pub use view::View;

/// This module provides a convenient way to import the most common traits
/// from this library via a glob import.
pub mod prelude {
    pub use super::{IntoSliceSpecs, Layout};
}
