use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::indices::DynIndex;
use crate::layout::Layout;
use crate::sliced_shape::SlicedShape;

/// Shape of a contiguous, row-major buffer.
///
/// The last dimension has a stride of 1 and each earlier dimension has a
/// stride equal to the product of the sizes of the dimensions after it. A
/// shape with no dimensions is a scalar, which has one element.
#[derive(Clone, Debug)]
pub struct DenseShape {
    dims: SmallVec<[usize; 5]>,
    strides: SmallVec<[usize; 5]>,
    size: usize,
}

impl DenseShape {
    /// Create a row-major shape with the given dimension sizes.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements, or any stride, overflows `usize`.
    /// Use [`try_new`](DenseShape::try_new) for dims that come from input.
    pub fn new(dims: &[usize]) -> DenseShape {
        match DenseShape::try_new(dims) {
            Some(shape) => shape,
            None => panic!("shape {:?} has too many elements", dims),
        }
    }

    /// Create a row-major shape with the given dimension sizes, or `None` if
    /// the number of elements, or any stride, overflows `usize`.
    pub fn try_new(dims: &[usize]) -> Option<DenseShape> {
        let mut strides: SmallVec<[usize; 5]> = SmallVec::from_elem(0, dims.len());
        let mut stride: usize = 1;
        for i in (0..dims.len()).rev() {
            strides[i] = stride;
            stride = stride.checked_mul(dims[i])?;
        }
        Some(DenseShape {
            dims: SmallVec::from_slice(dims),
            strides,
            size: stride,
        })
    }

    /// Create a shape with no dimensions and one element.
    pub fn scalar() -> DenseShape {
        DenseShape::new(&[])
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Map coordinates to a linear index.
    ///
    /// Coordinates are not bounds-checked. Fewer coordinates than dimensions
    /// address the leading dimensions. A scalar shape given one coordinate
    /// returns it unchanged.
    #[inline]
    pub fn index_of(&self, coords: &[usize]) -> usize {
        if self.dims.is_empty() {
            return coords.first().copied().unwrap_or(0);
        }
        coords
            .iter()
            .zip(self.strides.iter())
            .map(|(coord, stride)| coord * stride)
            .sum()
    }

    /// Map a linear index to coordinates. This is the inverse of
    /// [`index_of`](DenseShape::index_of) for indices less than the size.
    pub fn coords_of(&self, index: usize) -> DynIndex {
        if self.dims.len() == 1 {
            return SmallVec::from_elem(index, 1);
        }

        let mut remainder = index;
        self.strides
            .iter()
            .map(|&stride| {
                // Zero strides only occur in shapes with no elements.
                if stride == 0 {
                    return 0;
                }
                let coord = remainder / stride;
                remainder %= stride;
                coord
            })
            .collect()
    }
}

impl Layout for DenseShape {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn len(&self) -> usize {
        self.size
    }

    fn offset_unchecked(&self, coords: &[usize]) -> usize {
        self.index_of(coords)
    }

    #[inline]
    fn offset_at(&self, position: usize) -> usize {
        position
    }
}

impl PartialEq for DenseShape {
    fn eq(&self, other: &DenseShape) -> bool {
        self.dims == other.dims
    }
}

impl Eq for DenseShape {}

impl Hash for DenseShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims.hash(state);
    }
}

/// Format dims as a tuple, eg. `(2, 3)`, `(3,)` or `()`.
pub(crate) fn fmt_dims(dims: &[usize], f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, dim) in dims.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", dim)?;
    }
    if dims.len() == 1 {
        write!(f, ",")?;
    }
    write!(f, ")")
}

impl Display for DenseShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_dims(&self.dims, f)
    }
}

impl From<&[usize]> for DenseShape {
    fn from(dims: &[usize]) -> DenseShape {
        DenseShape::new(dims)
    }
}

impl<const N: usize> From<[usize; N]> for DenseShape {
    fn from(dims: [usize; N]) -> DenseShape {
        DenseShape::new(&dims)
    }
}

/// The layout of a view: either a dense root shape, or a slice of some other
/// shape.
///
/// Slices of slices nest through [`SlicedShape::parent`], so these two
/// variants describe views derived to any depth.
#[derive(Clone, Debug)]
pub enum Shape {
    Dense(DenseShape),
    Sliced(SlicedShape),
}

impl Shape {
    pub fn is_sliced(&self) -> bool {
        matches!(self, Shape::Sliced(_))
    }
}

impl Layout for Shape {
    fn dims(&self) -> &[usize] {
        match self {
            Shape::Dense(dense) => dense.dims(),
            Shape::Sliced(sliced) => sliced.dims(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Shape::Dense(dense) => dense.len(),
            Shape::Sliced(sliced) => sliced.len(),
        }
    }

    #[inline]
    fn offset_unchecked(&self, coords: &[usize]) -> usize {
        match self {
            Shape::Dense(dense) => dense.offset_unchecked(coords),
            Shape::Sliced(sliced) => sliced.offset_unchecked(coords),
        }
    }

    #[inline]
    fn offset_at(&self, position: usize) -> usize {
        match self {
            Shape::Dense(dense) => dense.offset_at(position),
            Shape::Sliced(sliced) => sliced.offset_at(position),
        }
    }
}

impl From<DenseShape> for Shape {
    fn from(shape: DenseShape) -> Shape {
        Shape::Dense(shape)
    }
}

impl From<SlicedShape> for Shape {
    fn from(shape: SlicedShape) -> Shape {
        Shape::Sliced(shape)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fmt_dims(self.dims(), f)
    }
}
