use core::any::type_name;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Returned by the checked accessors of [`TidyPtr`](crate::TidyPtr) when the
/// pointer is null.
///
/// # Examples
///
/// ```
/// use tidy_ptr::{NullPtrError, TidyPtr};
///
/// let ptr = TidyPtr::<u32>::NULL;
/// let err: NullPtrError = unsafe { ptr.try_as_ref() }.unwrap_err();
///
/// assert_eq!(err.type_name(), "u32");
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("attempted to dereference a null `TidyPtr<{type_name}>`")]
pub struct NullPtrError {
    type_name: &'static str,
}

impl NullPtrError {
    #[inline]
    pub(crate) fn of<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
        }
    }

    /// The name of the pointee type that was dereferenced.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// -----------------------------------------------------------------------------
// Tests
