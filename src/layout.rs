use crate::errors::ViewError;
use crate::indices::{Indices, Offsets};

/// Layouts describe the shape of a view, ie. the number of dimensions and
/// size of each, and the mapping between coordinates and offsets in the
/// backing buffer.
///
/// The implementations are [`DenseShape`](crate::DenseShape), for a
/// contiguous row-major buffer, [`SlicedShape`](crate::SlicedShape), which
/// projects coordinates through a parent layout, and
/// [`Shape`](crate::Shape), which dispatches to either.
pub trait Layout {
    /// Returns the size of each dimension.
    fn dims(&self) -> &[usize];

    /// Return the number of dimensions.
    fn ndim(&self) -> usize {
        self.dims().len()
    }

    /// Returns the number of elements. This is 1 for a scalar layout.
    fn len(&self) -> usize;

    /// Returns true if the layout has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the size of the dimension `dim`.
    fn size(&self, dim: usize) -> usize {
        self.dims()[dim]
    }

    /// Map coordinates to a buffer offset, without checking if they are valid
    /// for this layout.
    ///
    /// Fewer coordinates than dimensions address the leading dimensions, with
    /// the remaining coordinates taken to be zero.
    fn offset_unchecked(&self, coords: &[usize]) -> usize;

    /// Return the buffer offset of the element at `position` in the
    /// row-major order of this layout's logical dimensions.
    fn offset_at(&self, position: usize) -> usize;

    /// Check that `coords` address an element of this layout.
    ///
    /// A scalar layout accepts either no coordinate or a single coordinate of
    /// zero.
    fn check_coords(&self, coords: &[usize]) -> Result<(), ViewError> {
        let dims = self.dims();

        if dims.is_empty() {
            return match *coords {
                [] => Ok(()),
                [index] if index < self.len() => Ok(()),
                [index] => Err(ViewError::IndexOutOfRange {
                    axis: 0,
                    index: index as isize,
                    size: self.len(),
                }),
                _ => Err(ViewError::TooManyIndices {
                    count: coords.len(),
                    ndim: 0,
                }),
            };
        }

        if coords.len() > dims.len() {
            return Err(ViewError::TooManyIndices {
                count: coords.len(),
                ndim: dims.len(),
            });
        }

        for (axis, &size) in dims.iter().enumerate() {
            let index = coords.get(axis).copied().unwrap_or(0);
            if index >= size {
                return Err(ViewError::IndexOutOfRange {
                    axis,
                    index: index as isize,
                    size,
                });
            }
        }

        Ok(())
    }

    /// Map coordinates to a buffer offset, or return an error if they are out
    /// of bounds along any dimension.
    fn try_offset(&self, coords: &[usize]) -> Result<usize, ViewError> {
        self.check_coords(coords)?;
        Ok(self.offset_unchecked(coords))
    }

    /// Return an iterator over the buffer offsets of all elements, in
    /// row-major order of the logical dimensions.
    fn offsets(&self) -> Offsets<'_, Self>
    where
        Self: Sized,
    {
        Offsets::new(self)
    }

    /// Return an iterator over all valid coordinates in this layout.
    fn indices(&self) -> Indices {
        Indices::from_shape(self.dims())
    }
}
