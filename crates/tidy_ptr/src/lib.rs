//! This crate provides [`TidyPtr<T>`], a not-very-smart pointer that is null
//! when moved-from.
//!
//! `TidyPtr` behaves like a raw pointer: it is `Copy`, it never owns or frees
//! its pointee, and dereferencing it is `unsafe`. The one difference is that
//! moving the address *out* of it (via [`take`](TidyPtr::take),
//! [`move_from`](TidyPtr::move_from) or [`replace`](TidyPtr::replace)) leaves
//! the source null, so code that hands a pointer over cannot accidentally keep
//! using the stale copy.
//!
//! **TidyPtr**
//!
//! [`TidyPtr<T>`] stores an `Option<NonNull<T>>` and has the same size as a
//! raw pointer. The null state is [`TidyPtr::NULL`].
//!
//! **Upcast**
//!
//! [`Upcast<T>`] marks pointee types whose pointers implicitly convert to a
//! pointer to `T`, e.g. a concrete type to a `dyn Trait` it implements. It
//! bounds [`TidyPtr::upcast_from`], so an unrelated conversion fails to build.
//! Use [`impl_upcast!`] to declare new conversions.
//!
//! **NullPtrError**
//!
//! [`NullPtrError`] is returned by the checked accessors
//! [`try_as_ref`](TidyPtr::try_as_ref) and [`try_as_mut`](TidyPtr::try_as_mut).
//!
//! # Examples
//!
//! ```
//! use tidy_ptr::TidyPtr;
//!
//! let mut x = 5;
//! let mut a = TidyPtr::from_mut(&mut x);
//!
//! let b = a.take();
//! assert!(a.is_null());
//! assert_eq!(unsafe { *b.as_ref() }, 5);
//! ```
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(any(test, feature = "std"))]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod cmp;
mod error;
mod tidy;
mod upcast;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::NullPtrError;
pub use tidy::{TidyPtr, swap};
pub use upcast::Upcast;
