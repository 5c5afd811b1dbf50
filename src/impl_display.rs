use std::fmt::{Debug, Display, Error, Formatter};
use std::sync::OnceLock;

use crate::env::{env_flag, env_usize};
use crate::indices::DynIndex;
use crate::layout::Layout;
use crate::view::View;

/// Configuration for printing the elements of a view.
///
/// The default options are read once from the environment:
///
/// - `NDVIEW_PRINT_FLAT`: print on a single line (default false)
/// - `NDVIEW_PRINT_MAX_ITEMS`: maximum number of entries to print along an
///   axis before eliding the middle with `...` (default 1000)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Print every axis on one line. Otherwise each entry along an outer axis
    /// starts a new line.
    pub flat: bool,

    /// Maximum number of entries to print along each axis.
    pub max_items: usize,
}

impl FormatOptions {
    /// Read options from the `NDVIEW_PRINT_*` environment variables.
    pub fn from_env() -> FormatOptions {
        FormatOptions {
            flat: env_flag("NDVIEW_PRINT_FLAT", false),
            max_items: env_usize("NDVIEW_PRINT_MAX_ITEMS", 1000),
        }
    }

    /// Return options which print everything on one line.
    pub fn flat() -> FormatOptions {
        FormatOptions {
            flat: true,
            ..FormatOptions::default()
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        static OPTIONS: OnceLock<FormatOptions> = OnceLock::new();
        *OPTIONS.get_or_init(FormatOptions::from_env)
    }
}

/// Entry in the formatted representation of an axis.
enum Entry {
    Index(usize),

    /// "..." used to elide long axes.
    Ellipsis,
}

/// Return the entries to print along an axis of size `len`.
fn axis_entries(len: usize, max_items: usize) -> impl Iterator<Item = Entry> {
    let elide = len > max_items;
    let head = if elide { max_items / 2 } else { len };
    let tail_start = if elide { len - (max_items - head) } else { len };

    (0..head)
        .map(Entry::Index)
        .chain(elide.then_some(Entry::Ellipsis))
        .chain((tail_start..len).map(Entry::Index))
}

/// Formats a view's elements as nested lists using `write_elem` for each
/// element.
struct FormatView<'a, T, W> {
    view: &'a View<T>,
    opts: FormatOptions,
    write_elem: W,
}

impl<T, W> FormatView<'_, T, W>
where
    W: Fn(&T, &mut Formatter<'_>) -> Result<(), Error>,
{
    fn write(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let shape = self.view.shape();
        self.view.buffer().with(|data| {
            if shape.ndim() == 0 {
                return (self.write_elem)(&data[shape.offset_at(0)], f);
            }
            let mut coords: DynIndex = DynIndex::from_elem(0, shape.ndim());
            self.write_axis(f, data, &mut coords, 0)
        })
    }

    fn write_axis(
        &self,
        f: &mut Formatter<'_>,
        data: &[T],
        coords: &mut DynIndex,
        depth: usize,
    ) -> Result<(), Error> {
        let shape = self.view.shape();
        let innermost = depth + 1 == shape.ndim();

        write!(f, "[")?;
        for (i, entry) in axis_entries(shape.size(depth), self.opts.max_items).enumerate() {
            if i > 0 {
                if innermost || self.opts.flat {
                    write!(f, ", ")?;
                } else {
                    write!(f, ",\n{}", " ".repeat(depth + 1))?;
                }
            }
            match entry {
                Entry::Ellipsis => write!(f, "...")?,
                Entry::Index(index) => {
                    coords[depth] = index;
                    if innermost {
                        let offset = shape.offset_unchecked(coords);
                        (self.write_elem)(&data[offset], f)?;
                    } else {
                        self.write_axis(f, data, coords, depth + 1)?;
                    }
                }
            }
        }
        coords[depth] = 0;
        write!(f, "]")
    }
}

impl<T: Display> View<T> {
    /// Format the elements as nested lists using the given options.
    ///
    /// ```
    /// use ndview::{FormatOptions, View};
    ///
    /// let x = View::arange(0, 4, 1).unwrap().reshape(&[2, 2]).unwrap();
    /// assert_eq!(x.to_string_with(&FormatOptions::flat()), "[[0, 1], [2, 3]]");
    /// ```
    pub fn to_string_with(&self, opts: &FormatOptions) -> String {
        DisplayWith(self, *opts).to_string()
    }
}

fn write_display<T: Display>(x: &T, f: &mut Formatter<'_>) -> Result<(), Error> {
    write!(f, "{}", x)
}

fn write_debug<T: Debug>(x: &T, f: &mut Formatter<'_>) -> Result<(), Error> {
    write!(f, "{:?}", x)
}

struct DisplayWith<'a, T>(&'a View<T>, FormatOptions);

impl<T: Display> Display for DisplayWith<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        FormatView {
            view: self.0,
            opts: self.1,
            write_elem: write_display::<T>,
        }
        .write(f)
    }
}

impl<T: Display> Display for View<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        Display::fmt(&DisplayWith(self, FormatOptions::default()), f)
    }
}

impl<T: Debug> Debug for View<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        FormatView {
            view: self,
            opts: FormatOptions::default(),
            write_elem: write_debug::<T>,
        }
        .write(f)?;
        write!(f, ", dims={}", self.shape())
    }
}
