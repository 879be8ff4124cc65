//! Variable-length results handed to clients.
//!
//! Every array result goes through [`ClientArray::from_vec`]. On Windows the
//! storage comes from the COM task allocator, which is what clients free
//! with; elsewhere the global Rust allocator stands in. The client owns the
//! array and every element in it.
//!
//! An empty result is a null array with a count of 0. It is never a non-null
//! array of length zero.

use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};
use std::slice;

use crate::status::Payload;

/// An array allocated with the client allocator.
pub struct ClientArray<T> {
    ptr: Option<NonNull<T>>,
    len: usize,
}

// SAFETY: the array exclusively owns its elements.
unsafe impl<T: Send> Send for ClientArray<T> {}
// SAFETY: shared access only hands out `&[T]`.
unsafe impl<T: Sync> Sync for ClientArray<T> {}

impl<T> ClientArray<T> {
    /// The null array.
    pub const fn null() -> Self {
        Self { ptr: None, len: 0 }
    }

    /// Move `items` into a freshly allocated client array.
    ///
    /// An empty vector yields the null array without allocating.
    pub fn from_vec(items: Vec<T>) -> Self {
        let len = items.len();
        if len == 0 {
            return Self::null();
        }
        let ptr = alloc::allocate::<T>(len);
        for (i, item) in items.into_iter().enumerate() {
            // SAFETY: `ptr` has room for `len` elements and slot `i` is
            // uninitialized.
            unsafe { ptr.as_ptr().add(i).write(item) };
        }
        Self { ptr: Some(ptr), len }
    }

    /// Whether the array pointer is null.
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The raw array pointer; null for an empty result.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.map_or(ptr::null(), |p| p.as_ptr().cast_const())
    }

    /// The elements.
    pub fn as_slice(&self) -> &[T] {
        match self.ptr {
            // SAFETY: `len` elements were initialized in `from_vec`.
            Some(ptr) => unsafe { slice::from_raw_parts(ptr.as_ptr(), self.len) },
            None => &[],
        }
    }

    /// Take the elements back and free the array.
    pub fn into_vec(mut self) -> Vec<T> {
        let Some(ptr) = self.ptr.take() else {
            return Vec::new();
        };
        let len = mem::replace(&mut self.len, 0);
        let mut items = Vec::with_capacity(len);
        for i in 0..len {
            // SAFETY: each initialized element is read exactly once; the
            // array is freed below without dropping them again.
            items.push(unsafe { ptr.as_ptr().add(i).read() });
        }
        // SAFETY: `ptr` came from `alloc::allocate::<T>(len)`.
        unsafe { alloc::free(ptr, len) };
        items
    }
}

impl<T> Drop for ClientArray<T> {
    fn drop(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // SAFETY: `len` elements are initialized and owned by the array,
            // and `ptr` came from `alloc::allocate::<T>(len)`.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), self.len));
                alloc::free(ptr, self.len);
            }
        }
    }
}

impl<T> Default for ClientArray<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: fmt::Debug> fmt::Debug for ClientArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("ClientArray(null)")
        } else {
            f.debug_list().entries(self.as_slice()).finish()
        }
    }
}

impl<T> Payload for ClientArray<T> {
    fn has_data(&self) -> bool {
        !self.is_null()
    }
}

#[cfg(target_os = "windows")]
mod alloc {
    use std::alloc::{Layout, handle_alloc_error};
    use std::ffi::c_void;
    use std::ptr::NonNull;

    use windows::Win32::System::Com::{CoTaskMemAlloc, CoTaskMemFree};

    pub(super) fn allocate<T>(len: usize) -> NonNull<T> {
        let Ok(layout) = Layout::array::<T>(len) else {
            panic!("client array of {len} elements overflows");
        };
        // SAFETY: plain allocation call; the result is checked for null.
        let raw = unsafe { CoTaskMemAlloc(layout.size().max(1)) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    }

    pub(super) unsafe fn free<T>(ptr: NonNull<T>, _len: usize) {
        // SAFETY: the caller passes a pointer from `allocate`.
        unsafe { CoTaskMemFree(Some(ptr.as_ptr().cast_const().cast::<c_void>())) };
    }
}

#[cfg(not(target_os = "windows"))]
mod alloc {
    use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
    use std::ptr::NonNull;

    fn layout<T>(len: usize) -> Layout {
        match Layout::array::<T>(len) {
            Ok(layout) if layout.size() > 0 => layout,
            Ok(_) => Layout::new::<u8>(),
            Err(_) => panic!("client array of {len} elements overflows"),
        }
    }

    pub(super) fn allocate<T>(len: usize) -> NonNull<T> {
        let layout = layout::<T>(len);
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    }

    pub(super) unsafe fn free<T>(ptr: NonNull<T>, len: usize) {
        // SAFETY: the caller passes a pointer from `allocate::<T>(len)`.
        unsafe { dealloc(ptr.as_ptr().cast::<u8>(), layout::<T>(len)) };
    }
}
