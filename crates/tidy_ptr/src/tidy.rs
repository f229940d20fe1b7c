use core::ffi::c_void;
use core::fmt;
use core::ptr::{self, NonNull};

use crate::{NullPtrError, Upcast};

/// A non-owning pointer that is null when moved-from.
///
/// `TidyPtr<T>` is a raw pointer with a label on it. It is [`Copy`], it does
/// not own or free its pointee, and the lifetime of the pointee is entirely
/// up to the caller. Copying never changes the source:
///
/// ```
/// use tidy_ptr::TidyPtr;
///
/// let x = 7;
/// let a = TidyPtr::from_ref(&x);
/// let b = a;
///
/// assert_eq!(a.as_ptr(), &raw const x);
/// assert!(a == b);
/// ```
///
/// Moving the address out with [`take`](Self::take),
/// [`move_from`](Self::move_from) or [`replace`](Self::replace) leaves the
/// source null:
///
/// ```
/// use tidy_ptr::TidyPtr;
///
/// let x = 7;
/// let mut a = TidyPtr::from_ref(&x);
/// let mut b = TidyPtr::null();
///
/// b.move_from(&mut a);
///
/// assert!(a.is_null());
/// assert_eq!(b.as_ptr(), &raw const x);
/// ```
///
/// Moving a pointer into itself cannot be written:
///
/// ```compile_fail
/// use tidy_ptr::TidyPtr;
///
/// let x = 7;
/// let mut a = TidyPtr::from_ref(&x);
/// a.move_from(&mut a);
/// ```
///
/// # Comparison
///
/// Pointers compare by address. The pointee types must be related by
/// [`Upcast`], the same relation that allows converting one into the other:
///
/// ```compile_fail
/// use tidy_ptr::TidyPtr;
///
/// let x = 1u32;
/// let a = TidyPtr::from_ref(&x);
/// let b = a.cast::<f64>();
/// let _ = a == b;
/// ```
///
/// # Null dereference
///
/// Like a raw pointer, [`as_ref`](Self::as_ref) and [`as_mut`](Self::as_mut)
/// do not check for null. With `debug_assertions` and the `debug` feature
/// they panic instead. [`try_as_ref`](Self::try_as_ref) and
/// [`try_as_mut`](Self::try_as_mut) always check.
#[repr(transparent)]
pub struct TidyPtr<T: ?Sized>(pub(crate) Option<NonNull<T>>);

impl<T: ?Sized> TidyPtr<T> {
    /// The null pointer.
    pub const NULL: Self = Self(None);

    /// Creates a null pointer.
    #[inline(always)]
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Creates a pointer from an optional `NonNull`, `None` being null.
    #[inline(always)]
    pub const fn from_non_null(ptr: Option<NonNull<T>>) -> Self {
        Self(ptr)
    }

    /// Converts a reference to a `TidyPtr`.
    #[inline(always)]
    pub const fn from_ref(r: &T) -> Self {
        Self(Some(NonNull::from_ref(r)))
    }

    /// Converts a mutable reference to a `TidyPtr`.
    #[inline(always)]
    pub const fn from_mut(r: &mut T) -> Self {
        Self(Some(NonNull::from_mut(r)))
    }

    /// Creates a `TidyPtr<T>` holding the same address as `other`.
    ///
    /// Only compiles when `U: Upcast<T>`, see [`Upcast`]. `other` is copied,
    /// not moved, and keeps its address.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidy_ptr::TidyPtr;
    ///
    /// let arr = [1, 2, 3];
    /// let array = TidyPtr::from_ref(&arr);
    /// let slice = TidyPtr::<[i32]>::upcast_from(&array);
    ///
    /// assert!(slice == array);
    /// assert!(!array.is_null());
    /// ```
    #[inline]
    pub fn upcast_from<U>(other: &TidyPtr<U>) -> Self
    where
        U: ?Sized + Upcast<T>,
    {
        Self(other.0.map(U::upcast))
    }

    /// Converts `self` into a `TidyPtr<U>`, see [`upcast_from`](Self::upcast_from).
    #[inline]
    pub fn upcast<U: ?Sized>(self) -> TidyPtr<U>
    where
        T: Upcast<U>,
    {
        TidyPtr::upcast_from(&self)
    }

    /// Reinterprets the address as pointing to a `U`.
    ///
    /// Unlike [`upcast`](Self::upcast) there is no compatibility check; this
    /// is the same as [`pointer::cast`].
    #[inline(always)]
    pub const fn cast<U>(self) -> TidyPtr<U> {
        match self.0 {
            Some(ptr) => TidyPtr(Some(ptr.cast())),
            None => TidyPtr(None),
        }
    }

    /// Erases the pointee type, e.g. for handing the address to C.
    ///
    /// Every pointer converts, so this needs no [`Upcast`] bound.
    #[inline(always)]
    pub const fn erase(self) -> TidyPtr<c_void> {
        self.cast()
    }

    /// Returns the address as an optional `NonNull`, `None` being null.
    #[inline(always)]
    pub const fn as_non_null(&self) -> Option<NonNull<T>> {
        self.0
    }

    /// Returns `true` if the pointer is null.
    #[inline(always)]
    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns `true` if the pointer is not null.
    ///
    /// This is the explicit boolean conversion, also available as
    /// `bool::from(ptr)`.
    #[inline(always)]
    pub const fn is_non_null(&self) -> bool {
        self.0.is_some()
    }

    /// Overwrites the stored address. No validation is performed.
    #[inline(always)]
    pub fn set_non_null(&mut self, ptr: Option<NonNull<T>>) {
        self.0 = ptr;
    }

    /// Moves the address out, leaving `self` null.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidy_ptr::TidyPtr;
    ///
    /// let x = 1;
    /// let mut a = TidyPtr::from_ref(&x);
    /// let b = a.take();
    ///
    /// assert!(a.is_null());
    /// assert_eq!(b.as_ptr(), &raw const x);
    /// ```
    #[inline]
    #[must_use = "if you only want to clear the pointer, use `set_non_null(None)`"]
    pub fn take(&mut self) -> Self {
        Self(self.0.take())
    }

    /// Move-assigns `source` into `self`: `self` gets the address of
    /// `source` and `source` becomes null.
    #[inline]
    pub fn move_from(&mut self, source: &mut Self) {
        let ptr = source.0;
        self.0 = ptr;
        source.0 = None;
    }

    /// Stores `new` and moves the previous address out.
    #[inline]
    pub fn replace(&mut self, new: Self) -> Self {
        Self(core::mem::replace(&mut self.0, new.0))
    }

    /// Exchanges the addresses of `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.0, &mut other.0);
    }

    /// Returns a shared reference to the pointee.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null and
    /// [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
    /// for `'a`.
    ///
    /// # Panics
    ///
    /// With `debug_assertions` and the `debug` feature, panics if the pointer
    /// is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidy_ptr::TidyPtr;
    ///
    /// let s = String::from("tidy");
    /// let ptr = TidyPtr::from_ref(&s);
    ///
    /// assert_eq!(unsafe { ptr.as_ref() }.len(), 4);
    /// ```
    #[cfg_attr(all(debug_assertions, feature = "debug"), track_caller)]
    #[cfg_attr(not(all(debug_assertions, feature = "debug")), inline(always))]
    pub unsafe fn as_ref<'a>(&self) -> &'a T {
        self.debug_assert_non_null();
        // SAFETY: The caller guarantees the pointer is non-null and valid for `'a`.
        unsafe { self.0.unwrap_unchecked().as_ref() }
    }

    /// Returns a mutable reference to the pointee.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null and
    /// [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
    /// for `'a`, and no other reference to the pointee may be live.
    ///
    /// # Panics
    ///
    /// With `debug_assertions` and the `debug` feature, panics if the pointer
    /// is null.
    #[cfg_attr(all(debug_assertions, feature = "debug"), track_caller)]
    #[cfg_attr(not(all(debug_assertions, feature = "debug")), inline(always))]
    pub unsafe fn as_mut<'a>(&mut self) -> &'a mut T {
        self.debug_assert_non_null();
        // SAFETY: The caller guarantees the pointer is non-null, valid for `'a` and unaliased.
        unsafe { self.0.unwrap_unchecked().as_mut() }
    }

    /// Returns a shared reference to the pointee, or an error if null.
    ///
    /// # Safety
    ///
    /// If non-null, the pointer must be
    /// [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
    /// for `'a`.
    #[inline]
    pub unsafe fn try_as_ref<'a>(&self) -> Result<&'a T, NullPtrError> {
        match self.0 {
            // SAFETY: See `NonNull::as_ref`
            Some(ptr) => Ok(unsafe { ptr.as_ref() }),
            None => Err(Self::null_error()),
        }
    }

    /// Returns a mutable reference to the pointee, or an error if null.
    ///
    /// # Safety
    ///
    /// If non-null, the pointer must be
    /// [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion)
    /// for `'a`, and no other reference to the pointee may be live.
    #[inline]
    pub unsafe fn try_as_mut<'a>(&mut self) -> Result<&'a mut T, NullPtrError> {
        match self.0 {
            // SAFETY: See `NonNull::as_mut`
            Some(mut ptr) => Ok(unsafe { ptr.as_mut() }),
            None => Err(Self::null_error()),
        }
    }

    #[cold]
    fn null_error() -> NullPtrError {
        let err = NullPtrError::of::<T>();
        log::trace!("{err}");
        err
    }

    #[cfg_attr(all(debug_assertions, feature = "debug"), track_caller)]
    #[inline(always)]
    fn debug_assert_non_null(&self) {
        // debug_assert! would still evaluate the branch, so #[cfg] is needed.
        #[cfg(all(debug_assertions, feature = "debug"))]
        if self.0.is_none() {
            let err = NullPtrError::of::<T>();
            log::error!("{err}");
            panic!("{err}");
        }
    }
}

impl<T> TidyPtr<T> {
    /// Creates a pointer holding `ptr`, which may be null or dangling.
    ///
    /// # Examples
    ///
    /// ```
    /// use tidy_ptr::TidyPtr;
    ///
    /// let mut x = 0u32;
    /// let ptr = TidyPtr::new(&raw mut x);
    /// assert_eq!(ptr.get(), &raw mut x);
    ///
    /// let null = TidyPtr::new(core::ptr::null_mut::<u32>());
    /// assert!(null.is_null());
    /// ```
    #[inline(always)]
    pub const fn new(ptr: *mut T) -> Self {
        Self(NonNull::new(ptr))
    }

    /// Returns the stored address, null if the pointer is null.
    #[inline(always)]
    pub const fn get(&self) -> *mut T {
        match self.0 {
            Some(ptr) => ptr.as_ptr(),
            None => ptr::null_mut(),
        }
    }

    /// Acquires the underlying `*const` pointer.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.get().cast_const()
    }

    /// Overwrites the stored address with `ptr`, which may be null.
    #[inline(always)]
    pub fn set(&mut self, ptr: *mut T) {
        self.0 = NonNull::new(ptr);
    }
}

/// Exchanges the addresses held by `a` and `b`.
///
/// ```
/// use tidy_ptr::TidyPtr;
///
/// let (x, y) = (1, 2);
/// let mut a = TidyPtr::from_ref(&x);
/// let mut b = TidyPtr::from_ref(&y);
///
/// tidy_ptr::swap(&mut a, &mut b);
///
/// assert_eq!(a.as_ptr(), &raw const y);
/// assert_eq!(b.as_ptr(), &raw const x);
/// ```
#[inline]
pub fn swap<T: ?Sized>(a: &mut TidyPtr<T>, b: &mut TidyPtr<T>) {
    a.swap(b);
}

impl<T: ?Sized> Clone for TidyPtr<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for TidyPtr<T> {}

impl<T: ?Sized> Default for TidyPtr<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::NULL
    }
}

impl<T> From<*mut T> for TidyPtr<T> {
    #[inline(always)]
    fn from(value: *mut T) -> Self {
        Self::new(value)
    }
}

impl<T> From<*const T> for TidyPtr<T> {
    #[inline(always)]
    fn from(value: *const T) -> Self {
        Self::new(value.cast_mut())
    }
}

impl<T: ?Sized> From<NonNull<T>> for TidyPtr<T> {
    #[inline(always)]
    fn from(value: NonNull<T>) -> Self {
        Self(Some(value))
    }
}

impl<T: ?Sized> From<Option<NonNull<T>>> for TidyPtr<T> {
    #[inline(always)]
    fn from(value: Option<NonNull<T>>) -> Self {
        Self(value)
    }
}

impl<'a, T: ?Sized> From<&'a T> for TidyPtr<T> {
    #[inline]
    fn from(value: &'a T) -> Self {
        Self::from_ref(value)
    }
}

impl<'a, T: ?Sized> From<&'a mut T> for TidyPtr<T> {
    #[inline]
    fn from(value: &'a mut T) -> Self {
        Self::from_mut(value)
    }
}

impl<T: ?Sized> From<TidyPtr<T>> for bool {
    #[inline(always)]
    fn from(value: TidyPtr<T>) -> Self {
        value.is_non_null()
    }
}

impl<T: ?Sized> fmt::Pointer for TidyPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.addr(), f)
    }
}

impl<T: ?Sized> fmt::Debug for TidyPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ptr) => f.debug_tuple("TidyPtr").field(&ptr).finish(),
            None => f.write_str("TidyPtr(null)"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
