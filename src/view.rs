use std::any::Any;

use crate::errors::ViewError;
use crate::indices::{Indices, Offsets};
use crate::iterators::Iter;
use crate::layout::Layout;
use crate::shape::{DenseShape, Shape};
use crate::slice_spec::{parse_slices, IntoSliceSpecs, SliceSpec};
use crate::sliced_shape::SlicedShape;
use crate::storage::SharedBuffer;

/// A multi-dimensional view of a shared buffer.
///
/// A view created from owned data (a *root* view) has a dense, row-major
/// [`Shape`]. Slicing a view creates a new view with a [`SlicedShape`] whose
/// coordinates project into the parent's, sharing the same buffer. Writes
/// through any view are visible through every other view of the buffer.
///
/// Cloning a view creates another handle to the same buffer. Use
/// [`to_vec`](View::to_vec) to copy the elements out.
///
/// ```
/// use ndview::View;
///
/// let x = View::from_data(&[3, 3], (0..9).collect()).unwrap();
/// let cols = x.slice(":, 1:").unwrap();
/// assert_eq!(cols.dims(), [3, 2]);
/// assert_eq!(cols, [1, 2, 4, 5, 7, 8]);
///
/// cols.set(&[0, 0], 10).unwrap();
/// assert_eq!(x.get(&[0, 1]).unwrap(), 10);
/// ```
pub struct View<T> {
    shape: Shape,
    buffer: SharedBuffer<T>,
}

/// Build the shape for `dims`, which must hold `expected` elements. A product
/// of dims that overflows is reported as `usize::MAX` elements.
fn dense_shape(dims: &[usize], expected: usize) -> Result<DenseShape, ViewError> {
    DenseShape::try_new(dims).ok_or(ViewError::ShapeMismatch {
        expected,
        actual: usize::MAX,
    })
}

impl<T> View<T> {
    /// Create a 1D root view which owns `data`.
    pub fn from_vec(data: Vec<T>) -> View<T> {
        View {
            shape: DenseShape::new(&[data.len()]).into(),
            buffer: SharedBuffer::new(data),
        }
    }

    /// Create a root view with the given dims which owns `data`.
    ///
    /// Returns [`ViewError::ShapeMismatch`] if the product of `dims` does not
    /// equal the length of `data`.
    pub fn from_data(dims: &[usize], data: Vec<T>) -> Result<View<T>, ViewError> {
        let shape = dense_shape(dims, data.len())?;
        View::with_shape(shape, data)
    }

    /// Create a root view with a prebuilt shape which owns `data`.
    pub fn with_shape(shape: DenseShape, data: Vec<T>) -> Result<View<T>, ViewError> {
        if shape.len() != data.len() {
            return Err(ViewError::ShapeMismatch {
                expected: data.len(),
                actual: shape.len(),
            });
        }
        Ok(View {
            shape: shape.into(),
            buffer: SharedBuffer::new(data),
        })
    }

    /// Create a 0D view containing a single value.
    pub fn scalar(value: T) -> View<T> {
        View {
            shape: DenseShape::scalar().into(),
            buffer: SharedBuffer::new(vec![value]),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Return the size of each dimension.
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Return the number of elements in the view. A 0D view has one
    /// element.
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Return true if this view was derived by slicing another view.
    pub fn is_sliced(&self) -> bool {
        self.shape.is_sliced()
    }

    /// Return the buffer this view reads and writes.
    pub fn buffer(&self) -> &SharedBuffer<T> {
        &self.buffer
    }

    /// Return true if `self` and `other` are views of the same buffer.
    pub fn shares_buffer_with(&self, other: &View<T>) -> bool {
        self.buffer.ptr_eq(&other.buffer)
    }

    /// Slice this view using comma-separated slice notation, eg. `"1:, ::-1"`.
    ///
    /// See [`SliceSpec`] for the syntax of each axis.
    pub fn slice(&self, notation: &str) -> Result<View<T>, ViewError> {
        let specs = parse_slices(notation)?;
        self.slice_specs(&specs)
    }

    /// Slice this view using indices and/or ranges, eg. `(1.., 2)`.
    pub fn slice_with<R: IntoSliceSpecs>(&self, specs: R) -> Result<View<T>, ViewError> {
        self.slice_specs(specs.into_slice_specs().as_ref())
    }

    /// Slice this view with one spec per leading axis. Axes without a spec
    /// are kept in full.
    pub fn slice_specs(&self, specs: &[SliceSpec]) -> Result<View<T>, ViewError> {
        let shape = SlicedShape::new(self.shape.clone(), specs)?;
        log::trace!(
            "slicing view of dims {} to {}",
            self.shape,
            shape.logical()
        );
        Ok(View {
            shape: shape.into(),
            buffer: self.buffer.clone(),
        })
    }

    /// Return a view of the `index`th entry along the first axis, with that
    /// axis removed.
    pub fn index_axis(&self, index: usize) -> Result<View<T>, ViewError> {
        let index = isize::try_from(index).map_err(|_| ViewError::IndexOutOfRange {
            axis: 0,
            index: isize::MAX,
            size: self.dims().first().copied().unwrap_or(0),
        })?;
        self.slice_specs(&[SliceSpec::index(index)])
    }

    /// Replace the element at `coords`.
    pub fn set(&self, coords: &[usize], value: T) -> Result<(), ViewError> {
        let offset = self.shape.try_offset(coords)?;
        if self.buffer.write(offset, value) {
            Ok(())
        } else {
            Err(self.offset_error(offset))
        }
    }

    /// Write `values` to consecutive buffer offsets, starting at the offset of
    /// the element at `coords`.
    ///
    /// The run follows the layout of the underlying buffer rather than the
    /// dims of this view, so for a sliced view it may cover elements outside
    /// the slice. Nothing is written if the run would extend past the end of
    /// the buffer.
    pub fn set_many(
        &self,
        coords: &[usize],
        values: impl IntoIterator<Item = T>,
    ) -> Result<(), ViewError> {
        let offset = self.shape.try_offset(coords)?;
        self.buffer.write_run(offset, values.into_iter().collect())
    }

    /// Return an iterator over the coordinates of every element, in row-major
    /// order.
    pub fn indices(&self) -> Indices {
        self.shape.indices()
    }

    /// Return an iterator over the buffer offsets of every element, in
    /// row-major order.
    pub fn offsets(&self) -> Offsets<'_, Shape> {
        self.shape.offsets()
    }

    fn offset_error(&self, offset: usize) -> ViewError {
        ViewError::IndexOutOfRange {
            axis: 0,
            index: offset.min(isize::MAX as usize) as isize,
            size: self.buffer.len(),
        }
    }
}

impl<T: Clone> View<T> {
    /// Return a copy of the element at `coords`.
    ///
    /// Fewer coordinates than dimensions address the first element along the
    /// remaining dimensions. A 0D view accepts `&[]` or `&[0]`.
    pub fn get(&self, coords: &[usize]) -> Result<T, ViewError> {
        let offset = self.shape.try_offset(coords)?;
        self.buffer
            .read(offset)
            .ok_or_else(|| self.offset_error(offset))
    }

    /// Return an iterator over copies of the elements, in row-major order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buffer, self.shape.offsets())
    }

    /// Copy the elements into a vector, in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer
            .with(|data| self.offsets().map(|offset| data[offset].clone()).collect())
    }

    /// Return a view of the same elements with different dims.
    ///
    /// A root view is reshaped in place, sharing its buffer. A sliced view
    /// has no dense layout to reinterpret, so its elements are first copied
    /// into a new buffer.
    pub fn reshape(&self, dims: &[usize]) -> Result<View<T>, ViewError> {
        let shape = dense_shape(dims, self.len())?;
        if shape.len() != self.len() {
            return Err(ViewError::ShapeMismatch {
                expected: self.len(),
                actual: shape.len(),
            });
        }

        match &self.shape {
            Shape::Dense(_) => Ok(View {
                shape: shape.into(),
                buffer: self.buffer.clone(),
            }),
            Shape::Sliced(_) => {
                log::debug!(
                    "copying {} elements to reshape sliced view {} to {}",
                    self.len(),
                    self.shape,
                    shape
                );
                View::with_shape(shape, self.to_vec())
            }
        }
    }
}

impl<T: Clone + 'static> View<T> {
    /// Create a view from a dynamically typed container.
    ///
    /// `source` may hold a `Vec<T>`, a `Box<[T]>` or a `View<T>`. Vectors and
    /// boxed slices take `shape`, or a 1D shape if `None`. A view source is
    /// returned as-is, or reshaped if `shape` is given.
    pub fn from_source(
        source: Box<dyn Any>,
        shape: Option<DenseShape>,
    ) -> Result<View<T>, ViewError> {
        let with_data = |data: Vec<T>| match shape.clone() {
            Some(shape) => View::with_shape(shape, data),
            None => Ok(View::from_vec(data)),
        };

        let source = match source.downcast::<Vec<T>>() {
            Ok(data) => return with_data(*data),
            Err(source) => source,
        };
        let source = match source.downcast::<Box<[T]>>() {
            Ok(data) => return with_data((*data).into_vec()),
            Err(source) => source,
        };
        match source.downcast::<View<T>>() {
            Ok(view) => match &shape {
                Some(shape) => view.reshape(shape.dims()),
                None => Ok(*view),
            },
            Err(_) => Err(ViewError::UnsupportedSourceType {
                type_name: std::any::type_name::<T>(),
            }),
        }
    }
}

impl View<i32> {
    /// Create a 1D view of the integers from `start` up to, but excluding,
    /// `stop`, every `step` values.
    ///
    /// If `stop < start` the bounds are swapped. Returns
    /// [`ViewError::InvalidStep`] if `step` is not positive.
    pub fn arange(start: i32, stop: i32, step: i32) -> Result<View<i32>, ViewError> {
        if step <= 0 {
            return Err(ViewError::InvalidStep { step });
        }
        let (start, stop) = if stop < start {
            (stop, start)
        } else {
            (start, stop)
        };
        Ok((start..stop).step_by(step as usize).collect())
    }
}

impl<T> Clone for View<T> {
    /// Create another view of the same buffer.
    fn clone(&self) -> View<T> {
        View {
            shape: self.shape.clone(),
            buffer: self.buffer.clone(),
        }
    }
}

impl<T: PartialEq> View<T> {
    fn elements_eq(&self, other: &[T]) -> bool {
        self.len() == other.len()
            && self
                .buffer
                .with(|data| self.offsets().zip(other).all(|(offset, x)| data[offset] == *x))
    }
}

impl<T: PartialEq> PartialEq for View<T> {
    fn eq(&self, other: &View<T>) -> bool {
        if self.dims() != other.dims() {
            return false;
        }
        self.buffer.with(|a| {
            other.buffer.with(|b| {
                self.offsets()
                    .zip(other.offsets())
                    .all(|(i, j)| a[i] == b[j])
            })
        })
    }
}

impl<T: PartialEq> PartialEq<[T]> for View<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.elements_eq(other)
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for View<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.elements_eq(other)
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for View<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.elements_eq(other)
    }
}

impl<T> From<Vec<T>> for View<T> {
    fn from(data: Vec<T>) -> View<T> {
        View::from_vec(data)
    }
}

impl<T> From<Box<[T]>> for View<T> {
    fn from(data: Box<[T]>) -> View<T> {
        View::from_vec(data.into_vec())
    }
}

impl<T, const N: usize> From<[T; N]> for View<T> {
    fn from(data: [T; N]) -> View<T> {
        View::from_vec(data.into())
    }
}

impl<T> FromIterator<T> for View<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> View<T> {
        View::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T: Clone> IntoIterator for &'a View<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
