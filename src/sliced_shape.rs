use std::rc::Rc;

use smallvec::SmallVec;

use crate::errors::ViewError;
use crate::indices::DynIndex;
use crate::layout::Layout;
use crate::shape::{DenseShape, Shape};
use crate::slice_spec::{AxisSlice, DynSliceSpecs, SliceSpec};

/// Layout of a view that selects part of a parent layout.
///
/// Each parent axis is either kept as a (possibly strided or reversed) range,
/// or reduced to a single position by an index. Coordinates in the sliced
/// layout are projected into the parent's coordinate space, and from there
/// through any further levels of slicing down to the root buffer.
#[derive(Clone, Debug)]
pub struct SlicedShape {
    parent: Rc<Shape>,

    /// Specs that produced this shape, padded to one per parent axis.
    specs: DynSliceSpecs,

    /// One resolved slice per parent axis.
    slices: SmallVec<[AxisSlice; 5]>,

    /// Logical dims with reduced axes kept at length 1.
    unreduced: DenseShape,

    /// Dims of the non-reduced axes, in parent order.
    logical: DenseShape,
}

impl SlicedShape {
    /// Slice `parent` with one spec per leading parent axis. Axes without a
    /// spec are kept in full.
    pub fn new(parent: Shape, specs: &[SliceSpec]) -> Result<SlicedShape, ViewError> {
        let parent_dims = parent.dims();
        if specs.len() > parent_dims.len() {
            return Err(ViewError::TooManyIndices {
                count: specs.len(),
                ndim: parent_dims.len(),
            });
        }

        let mut padded = DynSliceSpecs::new();
        let mut slices = SmallVec::<[AxisSlice; 5]>::new();
        let mut unreduced_dims = SmallVec::<[usize; 5]>::new();
        let mut logical_dims = SmallVec::<[usize; 5]>::new();

        for (axis, &size) in parent_dims.iter().enumerate() {
            let spec = specs.get(axis).copied().unwrap_or_default();
            let slice = spec.resolve(size).ok_or(ViewError::IndexOutOfRange {
                axis,
                index: spec.start().unwrap_or(0),
                size,
            })?;

            if slice.is_index() {
                unreduced_dims.push(1);
            } else {
                unreduced_dims.push(slice.len());
                logical_dims.push(slice.len());
            }
            padded.push(spec);
            slices.push(slice);
        }

        Ok(SlicedShape {
            parent: Rc::new(parent),
            specs: padded,
            slices,
            unreduced: DenseShape::new(&unreduced_dims),
            logical: DenseShape::new(&logical_dims),
        })
    }

    /// Return the layout this shape projects into.
    pub fn parent(&self) -> &Shape {
        &self.parent
    }

    /// Return the specs used to create this shape, one per parent axis.
    pub fn specs(&self) -> &[SliceSpec] {
        &self.specs
    }

    pub fn slices(&self) -> &[AxisSlice] {
        &self.slices
    }

    pub fn logical(&self) -> &DenseShape {
        &self.logical
    }

    pub fn unreduced(&self) -> &DenseShape {
        &self.unreduced
    }

    /// Map coordinates in this layout to coordinates in the parent layout.
    ///
    /// `coords` may either have one entry per parent axis (the unreduced form,
    /// where reduced axes take coordinate 0) or one entry per logical axis,
    /// with missing trailing entries taken as 0.
    pub fn project(&self, coords: &[usize]) -> DynIndex {
        if coords.len() == self.slices.len() {
            return self
                .slices
                .iter()
                .zip(coords)
                .map(|(slice, &coord)| slice.project(coord))
                .collect();
        }

        let mut logical = coords.iter().copied();
        self.slices
            .iter()
            .map(|slice| {
                if slice.is_index() {
                    slice.start()
                } else {
                    slice.project(logical.next().unwrap_or(0))
                }
            })
            .collect()
    }

    /// Return the buffer offset of the element at `coords`. See
    /// [`project`](SlicedShape::project) for the accepted forms.
    #[inline]
    pub fn index_of(&self, coords: &[usize]) -> usize {
        self.parent.offset_unchecked(&self.project(coords))
    }
}

impl Layout for SlicedShape {
    fn dims(&self) -> &[usize] {
        self.logical.dims()
    }

    fn len(&self) -> usize {
        self.logical.len()
    }

    fn offset_unchecked(&self, coords: &[usize]) -> usize {
        self.index_of(coords)
    }

    fn offset_at(&self, position: usize) -> usize {
        if let [slice] = self.slices.as_slice() {
            return self.parent.offset_unchecked(&[slice.project(position)]);
        }
        self.index_of(&self.unreduced.coords_of(position))
    }
}
