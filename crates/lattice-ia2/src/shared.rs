//! Explicitly reference-counted handles for protocol objects.
//!
//! Clients hold protocol objects by reference count: each interface pointer
//! handed out is one reference, `AddRef` takes another and `Release` gives
//! one back. [`Shared`] models exactly that. Cloning is `AddRef`, dropping is
//! `Release`, and the release that brings the count to zero destroys the
//! object on the spot.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::ptr::NonNull;
use std::sync::atomic::{self, AtomicU32, Ordering};

struct SharedInner<T> {
    refs: AtomicU32,
    value: T,
}

/// A reference-counted protocol object.
///
/// The count starts at 1 for the handle returned by [`Shared::new`].
pub struct Shared<T> {
    ptr: NonNull<SharedInner<T>>,
    _marker: PhantomData<SharedInner<T>>,
}

// SAFETY: the count is atomic and the value is only ever shared immutably,
// so a `Shared<T>` is as thread-safe as `&T` plus moving `T` across threads.
unsafe impl<T: Send + Sync> Send for Shared<T> {}
// SAFETY: see above.
unsafe impl<T: Send + Sync> Sync for Shared<T> {}

impl<T> Shared<T> {
    /// Allocate a new object with a reference count of 1.
    pub fn new(value: T) -> Self {
        let inner = Box::new(SharedInner {
            refs: AtomicU32::new(1),
            value,
        });
        Self {
            ptr: NonNull::from(Box::leak(inner)),
            _marker: PhantomData,
        }
    }

    /// Current number of references.
    pub fn ref_count(this: &Self) -> u32 {
        this.inner().refs.load(Ordering::Acquire)
    }

    /// Whether two handles refer to the same allocation.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr == other.ptr
    }

    fn inner(&self) -> &SharedInner<T> {
        // SAFETY: the allocation lives while any handle, including `self`,
        // holds a reference.
        unsafe { self.ptr.as_ref() }
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        let old = self.inner().refs.fetch_add(1, Ordering::Relaxed);
        if old > u32::MAX / 2 {
            std::process::abort();
        }
        Self {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        if self.inner().refs.fetch_sub(1, Ordering::Release) != 1 {
            return;
        }
        atomic::fence(Ordering::Acquire);
        // SAFETY: this was the last reference, so nothing else can observe
        // the allocation; it came from `Box::leak` in `Shared::new`.
        unsafe { drop(Box::from_raw(self.ptr.as_ptr())) };
    }
}

impl<T> Deref for Shared<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner().value
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("refs", &Shared::ref_count(self))
            .field("value", &**self)
            .finish()
    }
}
