use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::ViewError;

/// Reference-counted backing storage shared by a root view and every view
/// derived from it.
///
/// Cloning a `SharedBuffer` creates another handle to the same elements. The
/// elements are freed when the last handle is dropped.
///
/// Borrows of the underlying `Vec` only last for the duration of a single
/// method call, so handles held by different views never observe a
/// conflicting borrow.
pub struct SharedBuffer<T> {
    data: Rc<RefCell<Vec<T>>>,
}

impl<T> SharedBuffer<T> {
    pub fn new(data: Vec<T>) -> SharedBuffer<T> {
        SharedBuffer {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// Return the number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Return true if `self.len() == 0`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return true if `self` and `other` are handles to the same buffer.
    pub fn ptr_eq(&self, other: &SharedBuffer<T>) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Return the number of handles to this buffer.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    /// Call `f` with the buffer contents.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.data.borrow())
    }

    /// Replace the element at `offset`. Returns `false` if `offset` is out of
    /// bounds.
    pub fn write(&self, offset: usize, value: T) -> bool {
        match self.data.borrow_mut().get_mut(offset) {
            Some(elem) => {
                *elem = value;
                true
            }
            None => false,
        }
    }

    /// Write `values` to consecutive offsets starting at `offset`.
    ///
    /// Nothing is written if the run would extend past the end of the
    /// buffer.
    pub fn write_run(&self, offset: usize, values: Vec<T>) -> Result<(), ViewError> {
        let mut data = self.data.borrow_mut();
        let size = data.len();
        let end = offset.saturating_add(values.len());
        if end > size {
            return Err(ViewError::IndexOutOfRange {
                axis: 0,
                index: end.saturating_sub(1).min(isize::MAX as usize) as isize,
                size,
            });
        }
        for (elem, value) in data[offset..end].iter_mut().zip(values) {
            *elem = value;
        }
        Ok(())
    }
}

impl<T: Clone> SharedBuffer<T> {
    /// Return a copy of the element at `offset`, or `None` if `offset` is out
    /// of bounds.
    pub fn read(&self, offset: usize) -> Option<T> {
        self.data.borrow().get(offset).cloned()
    }
}

impl<T> Clone for SharedBuffer<T> {
    fn clone(&self) -> Self {
        SharedBuffer {
            data: Rc::clone(&self.data),
        }
    }
}

impl<T> From<Vec<T>> for SharedBuffer<T> {
    fn from(data: Vec<T>) -> SharedBuffer<T> {
        SharedBuffer::new(data)
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.try_borrow() {
            Ok(data) => f.debug_list().entries(data.iter()).finish(),
            Err(_) => write!(f, "<borrowed>"),
        }
    }
}
