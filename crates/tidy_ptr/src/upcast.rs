use core::ptr::NonNull;

/// Marks `Self` as a pointee whose pointers implicitly convert to pointers
/// to `T`.
///
/// This is the bound behind [`TidyPtr::upcast_from`](crate::TidyPtr::upcast_from).
/// A `TidyPtr<U>` can only become a `TidyPtr<T>` when `U: Upcast<T>`, so
/// converting between unrelated pointee types is rejected at compile time.
/// The same bound governs which pointers compare with `==`.
///
/// Provided implementations:
/// - every `T` upcasts to itself;
/// - `[T; N]` upcasts to `[T]`.
///
/// Further conversions, typically concrete type to trait object, are declared
/// with [`impl_upcast!`](crate::impl_upcast). The generated body is a plain
/// unsizing coercion, so the compiler checks that the pair is valid.
///
/// # Examples
///
/// ```
/// use tidy_ptr::{TidyPtr, impl_upcast};
///
/// trait Shape {
///     fn area(&self) -> u32;
/// }
///
/// struct Square(u32);
///
/// impl Shape for Square {
///     fn area(&self) -> u32 { self.0 * self.0 }
/// }
///
/// impl_upcast!(Square => dyn Shape);
///
/// let square = Square(3);
/// let concrete = TidyPtr::from_ref(&square);
/// let shape: TidyPtr<dyn Shape> = concrete.upcast();
///
/// assert!(shape == concrete);
/// assert_eq!(unsafe { shape.as_ref() }.area(), 9);
/// ```
///
/// Unrelated pointee types do not convert:
///
/// ```compile_fail
/// use tidy_ptr::TidyPtr;
///
/// struct Base;
/// struct Unrelated;
///
/// let unrelated = TidyPtr::<Unrelated>::NULL;
/// let base = TidyPtr::<Base>::upcast_from(&unrelated);
/// ```
pub trait Upcast<T: ?Sized> {
    /// Converts the address, keeping it unchanged.
    fn upcast(ptr: NonNull<Self>) -> NonNull<T>;
}

impl<T: ?Sized> Upcast<T> for T {
    #[inline(always)]
    fn upcast(ptr: NonNull<T>) -> NonNull<T> {
        ptr
    }
}

impl<T, const N: usize> Upcast<[T]> for [T; N] {
    #[inline(always)]
    fn upcast(ptr: NonNull<[T; N]>) -> NonNull<[T]> {
        ptr
    }
}

/// Implements [`Upcast`] for `source => target` pairs.
///
/// Each `target` must be reachable from `source` by an unsizing coercion,
/// usually `Concrete => dyn Trait`. Anything else fails to compile.
///
/// # Examples
///
/// ```
/// use core::fmt::Debug;
/// use tidy_ptr::{TidyPtr, impl_upcast};
///
/// #[derive(Debug)]
/// struct Meters(f32);
///
/// impl_upcast! {
///     Meters => dyn Debug,
///     Meters => dyn Debug + Send,
/// }
///
/// let m = Meters(1.5);
/// let ptr = TidyPtr::<dyn Debug>::upcast_from(&TidyPtr::from_ref(&m));
/// assert!(!ptr.is_null());
/// ```
///
/// ```compile_fail
/// use tidy_ptr::impl_upcast;
///
/// trait Shape {}
/// struct Circle;
///
/// // `Circle` does not implement `Shape`.
/// impl_upcast!(Circle => dyn Shape);
/// ```
#[macro_export]
macro_rules! impl_upcast {
    ($($source:ty => $target:ty),+ $(,)?) => {
        $(
            impl $crate::Upcast<$target> for $source {
                #[inline(always)]
                fn upcast(
                    ptr: ::core::ptr::NonNull<Self>,
                ) -> ::core::ptr::NonNull<$target> {
                    ptr
                }
            }
        )+
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::fmt::Debug;
    use core::ptr::NonNull;

    use crate::{TidyPtr, Upcast};

    trait Named {
        fn name(&self) -> &'static str;
    }

    #[derive(Debug)]
    struct Cat;

    impl Named for Cat {
        fn name(&self) -> &'static str {
            "cat"
        }
    }

    crate::impl_upcast! {
        Cat => dyn Named,
        Cat => dyn Debug,
    }

    #[test]
    fn identity_keeps_address() {
        let mut x = 4_u64;
        let ptr = NonNull::from_mut(&mut x);
        assert_eq!(<u64 as Upcast<u64>>::upcast(ptr), ptr);
    }

    #[test]
    fn array_to_slice() {
        let arr = [1_u8, 2, 3];
        let array_ptr = TidyPtr::from_ref(&arr);
        let slice_ptr = TidyPtr::<[u8]>::upcast_from(&array_ptr);

        assert!(slice_ptr == array_ptr);
        let slice = unsafe { slice_ptr.as_ref() };
        assert_eq!(slice.len(), 3);
        assert_eq!(slice[2], 3);
    }

    #[test]
    fn concrete_to_dyn() {
        let cat = Cat;
        let concrete = TidyPtr::from_ref(&cat);

        let named: TidyPtr<dyn Named> = concrete.upcast();
        let debug: TidyPtr<dyn Debug> = concrete.upcast();

        assert!(named == concrete);
        assert!(debug == concrete);
        assert_eq!(unsafe { named.as_ref() }.name(), "cat");
    }

    #[test]
    fn upcast_leaves_source_untouched() {
        let cat = Cat;
        let concrete = TidyPtr::from_ref(&cat);
        let _named = TidyPtr::<dyn Named>::upcast_from(&concrete);

        assert_eq!(concrete.as_ptr(), &raw const cat);
    }

    #[test]
    fn upcast_null_stays_null() {
        let null = TidyPtr::<Cat>::NULL;
        let named = TidyPtr::<dyn Named>::upcast_from(&null);
        assert!(named.is_null());
    }
}
