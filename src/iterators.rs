use std::iter::FusedIterator;

use crate::indices::Offsets;
use crate::shape::Shape;
use crate::storage::SharedBuffer;

/// Iterator over copies of the elements of a view, in row-major order.
///
/// Each step borrows the buffer only while reading one element, so the
/// buffer may be written through other views between steps.
pub struct Iter<'a, T> {
    buffer: &'a SharedBuffer<T>,
    offsets: Offsets<'a, Shape>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(buffer: &'a SharedBuffer<T>, offsets: Offsets<'a, Shape>) -> Iter<'a, T> {
        Iter { buffer, offsets }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            buffer: self.buffer,
            offsets: self.offsets.clone(),
        }
    }
}

impl<T: Clone> Iterator for Iter<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let offset = self.offsets.next()?;
        self.buffer.read(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<T> {
        let offset = self.offsets.nth(n)?;
        self.buffer.read(offset)
    }
}

impl<T: Clone> ExactSizeIterator for Iter<'_, T> {}
impl<T: Clone> FusedIterator for Iter<'_, T> {}
