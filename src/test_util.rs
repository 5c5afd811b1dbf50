//! Helpers shared by the crate's unit tests.

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

use crate::view::View;

/// Utility for creating parametrized (aka. table-driven) tests.
///
/// Create a `Debug` struct, conventionally named `Case`, holding the data for
/// one case, build a collection of cases and call `cases.test_each` with the
/// test function. All cases are run, catching panics, and the failures are
/// reported together.
///
/// Test cases and values captured by the test function must be unwind safe,
/// so views (which use interior mutability) should be created inside the
/// test function rather than stored in the case.
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call test function `test` with each test case in `self`, catching any
    /// panics, then panic with the details of any failing cases.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Variant of [`test_each`](TestCases::test_each) which passes test cases
    /// to the test function by value.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            if std::panic::catch_unwind(|| {
                test(&case);
            })
            .is_err()
            {
                failures.push(case);
            }
        }
        assert_eq!(
            failures.len(),
            0,
            "{} test cases failed: {:?}",
            failures.len(),
            failures
        );
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let test = &test;
            let case_str = format!("{:?}", case);

            if std::panic::catch_unwind(move || {
                test(case);
            })
            .is_err()
            {
                failures.push(case_str);
            }
        }
        assert_eq!(
            failures.len(),
            0,
            "{} test cases failed: {:?}",
            failures.len(),
            failures
        );
    }
}

/// Check that a view has the given dims and elements, in row-major order.
pub fn expect_view<T: Clone + Debug + PartialEq>(
    view: &View<T>,
    dims: &[usize],
    data: &[T],
) -> Result<(), String> {
    if view.dims() != dims {
        return Err(format!(
            "View has dims {:?}, expected {:?}",
            view.dims(),
            dims
        ));
    }
    let actual = view.to_vec();
    if actual != data {
        return Err(format!("View has elements {:?}, expected {:?}", actual, data));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::TestCases;

    #[test]
    fn test_test_cases_success() {
        #[derive(Debug)]
        struct Case {
            x: i32,
        }

        let cases = [Case { x: 1 }, Case { x: 2 }];
        cases.test_each(|case| assert!(case.x > 0));

        let cases = [Case { x: 3 }, Case { x: 4 }];
        cases.test_each_value(|case| assert!(case.x > 2));
    }

    #[test]
    #[should_panic(expected = "1 test cases failed: [Case { x: 2 }]")]
    fn test_test_cases_failure() {
        #[derive(Debug)]
        struct Case {
            x: i32,
        }

        let cases = [Case { x: 1 }, Case { x: 2 }];
        cases.test_each(|case| assert_eq!(case.x, 1));
    }
}
