//! Address comparisons.
//!
//! Two pointers are equal when their addresses are equal. The right-hand
//! pointee type must [`Upcast`] to the left-hand one, so unrelated pointers do
//! not compare. Wide pointer metadata (slice lengths, vtables) is ignored.

use core::hash::{Hash, Hasher};
use core::ptr::{self, NonNull};

use crate::{TidyPtr, Upcast};

impl<T: ?Sized> TidyPtr<T> {
    /// The thin address, null if the pointer is null.
    #[inline(always)]
    pub(crate) const fn addr(&self) -> *const () {
        match self.0 {
            Some(ptr) => ptr.as_ptr().cast_const().cast(),
            None => ptr::null(),
        }
    }
}

impl<T: ?Sized, U: ?Sized + Upcast<T>> PartialEq<TidyPtr<U>> for TidyPtr<T> {
    #[inline]
    fn eq(&self, other: &TidyPtr<U>) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized> Eq for TidyPtr<T> {}

impl<T: ?Sized> Hash for TidyPtr<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

macro_rules! impl_raw_eq {
    ($($raw:tt),+) => {
        $(
            impl<T: ?Sized, U: ?Sized + Upcast<T>> PartialEq<*$raw U> for TidyPtr<T> {
                #[inline]
                fn eq(&self, other: &*$raw U) -> bool {
                    self.addr() == (*other as *const U).cast::<()>()
                }
            }

            impl<T: ?Sized + Upcast<U>, U: ?Sized> PartialEq<TidyPtr<U>> for *$raw T {
                #[inline]
                fn eq(&self, other: &TidyPtr<U>) -> bool {
                    other == self
                }
            }
        )+
    };
}

impl_raw_eq!(const, mut);

impl<T: ?Sized, U: ?Sized + Upcast<T>> PartialEq<NonNull<U>> for TidyPtr<T> {
    #[inline]
    fn eq(&self, other: &NonNull<U>) -> bool {
        self.addr() == other.as_ptr().cast_const().cast::<()>()
    }
}

impl<T: ?Sized + Upcast<U>, U: ?Sized> PartialEq<TidyPtr<U>> for NonNull<T> {
    #[inline]
    fn eq(&self, other: &TidyPtr<U>) -> bool {
        other == self
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::ptr::{self, NonNull};

    use crate::TidyPtr;

    #[test]
    fn eq_iff_same_address() {
        let (x, y) = (1_u32, 2_u32);
        let p = TidyPtr::from_ref(&x);
        let q = TidyPtr::from_ref(&x);
        let r = TidyPtr::from_ref(&y);

        assert!(p == q);
        assert!(q == p);
        assert!(p != r);
        assert_eq!(p == r, p.get() == r.get());
    }

    #[test]
    fn eq_across_related_pointee_types() {
        let arr = [1_u8, 2, 3, 4];
        let array = TidyPtr::from_ref(&arr);
        let slice = TidyPtr::<[u8]>::from_ref(&arr[..]);

        assert!(slice == array);
        assert!(slice == &raw const arr);
        assert!(slice == NonNull::from_ref(&arr));
        assert!(ptr::from_ref(&arr[..]) == array.upcast::<[u8]>());
        assert!(TidyPtr::<[u8]>::NULL == TidyPtr::<[u8; 4]>::NULL);
        assert!(slice != TidyPtr::<[u8; 4]>::NULL);
    }

    #[test]
    fn eq_with_raw() {
        let mut x = 1_u32;
        let raw = &raw mut x;
        let p = TidyPtr::new(raw);

        assert!(p == raw);
        assert!(raw == p);
        assert!(p == raw.cast_const());
        assert!(raw.cast_const() == p);
        assert!(p != ptr::null::<u32>());
        assert!(ptr::null_mut::<u32>() != p);

        let nn = NonNull::new(raw).unwrap();
        assert!(p == nn);
        assert!(nn == p);
    }

    #[test]
    fn eq_with_null() {
        let x = 1_u32;
        let bound = TidyPtr::from_ref(&x);
        let null = TidyPtr::<u32>::NULL;

        assert!(null == TidyPtr::<u32>::NULL);
        assert!(TidyPtr::<u32>::NULL == null);
        assert!(null == ptr::null::<u32>());
        assert!(ptr::null_mut::<u32>() == null);
        assert!(bound != TidyPtr::<u32>::NULL);
        assert!(ptr::null::<u32>() != bound);
    }

    #[test]
    fn wide_pointers_compare_by_address() {
        let arr = [1_u8, 2, 3, 4];
        let whole = TidyPtr::<[u8]>::from_ref(&arr[..]);
        let prefix = TidyPtr::<[u8]>::from_ref(&arr[..2]);

        assert!(whole == prefix);
    }

    #[test]
    fn hash_agrees_with_eq() {
        use std::collections::HashSet;

        let (x, y) = (1_i8, 2_i8);
        let mut set = HashSet::new();
        set.insert(TidyPtr::from_ref(&x));
        set.insert(TidyPtr::from_ref(&x));
        set.insert(TidyPtr::from_ref(&y));
        set.insert(TidyPtr::NULL);

        assert_eq!(set.len(), 3);
        assert!(set.contains(&TidyPtr::from_ref(&y)));
    }
}
