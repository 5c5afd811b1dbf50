use std::iter::FusedIterator;

use smallvec::{smallvec, SmallVec};

use crate::layout::Layout;

/// The coordinate type used for views, whose rank is only known at runtime.
pub type DynIndex = SmallVec<[usize; 5]>;

/// Iterator over all coordinates of a shape, in row-major order.
///
/// The number of dimensions may be zero, in which case the iterator will yield
/// a single empty index. This is consistent with eg. `ndindex` in NumPy.
#[derive(Clone, Debug)]
pub struct Indices {
    /// End index (exclusive) along each dimension.
    end: DynIndex,

    next: Option<DynIndex>,

    /// Remaining iteration steps.
    steps: usize,
}

impl Indices {
    /// Return an iterator over all the indices where each dimension is between
    /// `0` and `shape[dim]`.
    pub fn from_shape(shape: &[usize]) -> Indices {
        let steps: usize = shape.iter().product();
        Indices {
            // An empty shape still yields one empty index.
            next: (steps > 0).then(|| smallvec![0; shape.len()]),
            end: shape.iter().copied().collect(),
            steps,
        }
    }
}

impl Iterator for Indices {
    type Item = DynIndex;

    /// Return the next index in the sequence, or `None` after all indices
    /// have been returned.
    fn next(&mut self) -> Option<DynIndex> {
        let current = self.next.take()?;
        self.steps -= 1;

        let mut next = current.clone();
        let mut has_next = false;
        for (&dim_end, index) in self.end.iter().zip(next.iter_mut()).rev() {
            *index += 1;
            if *index == dim_end {
                *index = 0;
            } else {
                has_next = true;
                break;
            }
        }
        self.next = has_next.then_some(next);

        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.steps, Some(self.steps))
    }
}

impl ExactSizeIterator for Indices {}
impl FusedIterator for Indices {}

/// Iterator over the buffer offsets of the elements in a layout, in row-major
/// order of the layout's logical dimensions.
///
/// The iterator is cheap to clone, so enumeration can be restarted from any
/// point.
#[derive(Debug)]
pub struct Offsets<'a, L: Layout> {
    layout: &'a L,
    position: usize,
    len: usize,
}

impl<'a, L: Layout> Offsets<'a, L> {
    pub fn new(layout: &'a L) -> Offsets<'a, L> {
        Offsets {
            layout,
            position: 0,
            len: layout.len(),
        }
    }
}

// Derived `Clone` would require `L: Clone`.
impl<L: Layout> Clone for Offsets<'_, L> {
    fn clone(&self) -> Self {
        Offsets {
            layout: self.layout,
            position: self.position,
            len: self.len,
        }
    }
}

impl<L: Layout> Iterator for Offsets<'_, L> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.position >= self.len {
            return None;
        }
        let offset = self.layout.offset_at(self.position);
        self.position += 1;
        Some(offset)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.position;
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<usize> {
        self.position = self.position.saturating_add(n).min(self.len);
        self.next()
    }
}

impl<L: Layout> ExactSizeIterator for Offsets<'_, L> {}
impl<L: Layout> FusedIterator for Offsets<'_, L> {}

#[cfg(test)]
mod tests {
    use super::{DynIndex, Indices};
    use crate::layout::Layout;
    use crate::shape::DenseShape;
    use crate::test_util::TestCases;

    #[test]
    fn test_indices() {
        #[derive(Debug)]
        struct Case<'a> {
            shape: &'a [usize],
            expected: Vec<&'a [usize]>,
        }

        let cases = [
            Case {
                shape: &[],
                expected: vec![&[]],
            },
            Case {
                shape: &[0],
                expected: vec![],
            },
            Case {
                shape: &[2, 0, 3],
                expected: vec![],
            },
            Case {
                shape: &[3],
                expected: vec![&[0], &[1], &[2]],
            },
            Case {
                shape: &[2, 2],
                expected: vec![&[0, 0], &[0, 1], &[1, 0], &[1, 1]],
            },
        ];

        cases.test_each(|case| {
            let iter = Indices::from_shape(case.shape);
            assert_eq!(iter.len(), case.expected.len());

            let actual: Vec<DynIndex> = iter.collect();
            let expected: Vec<DynIndex> = case
                .expected
                .iter()
                .map(|idx| idx.iter().copied().collect())
                .collect();
            assert_eq!(actual, expected);
        })
    }

    #[test]
    fn test_indices_size_hint() {
        let mut iter = Indices::from_shape(&[2, 3]);
        for remaining in (1..=6).rev() {
            assert_eq!(iter.size_hint(), (remaining, Some(remaining)));
            iter.next();
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_offsets_restart() {
        let shape = DenseShape::new(&[2, 3]);
        let mut offsets = shape.offsets();
        offsets.next();

        let rest = offsets.clone();
        assert_eq!(rest.len(), 5);
        assert_eq!(offsets.collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(rest.collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

        let mut offsets = shape.offsets();
        assert_eq!(offsets.nth(4), Some(4));
        assert_eq!(offsets.nth(4), None);
    }
}
