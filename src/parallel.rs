//! Shared-buffer plumbing for the parallel draw path.

use std::cell::UnsafeCell;

use parking_lot::{Mutex, MutexGuard};

/// Cell granting shared mutable access to the render targets across
/// worker threads.
///
/// The rasterizer upholds the aliasing contract: depth and color commits
/// go through the tile locks, and the unlocked depth pre-test is re-run
/// under the lock before any write.
pub struct TrustedCell<T> {
    inner: UnsafeCell<T>,
}

impl<T> TrustedCell<T> {
    pub fn new(value: T) -> TrustedCell<T> {
        TrustedCell {
            inner: UnsafeCell::new(value),
        }
    }

    #[inline]
    pub fn as_ref(&self) -> &T {
        unsafe { &*self.inner.get() }
    }

    #[inline]
    #[allow(clippy::mut_from_ref)]
    pub fn as_mut(&self) -> &mut T {
        unsafe { &mut *self.inner.get() }
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

unsafe impl<T> Send for TrustedCell<T> {}

unsafe impl<T> Sync for TrustedCell<T> {}

/// Number of mutex buckets pixels hash into.
pub const TILE_BUCKETS: usize = 256;

/// A fixed pool of mutexes serializing read-modify-write of the depth and
/// color values at one pixel. Adjacent pixels hash to distinct buckets,
/// which bounds expected contention between workers shading nearby spans.
pub struct TileLocks {
    locks: Box<[Mutex<()>]>,
}

impl TileLocks {
    pub fn new() -> TileLocks {
        TileLocks {
            locks: (0..TILE_BUCKETS).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Locks the bucket owning pixel `(x, y)`.
    #[inline]
    pub fn lock(&self, x: usize, y: usize) -> MutexGuard<'_, ()> {
        self.locks[(x + y) & (TILE_BUCKETS - 1)].lock()
    }
}

impl Default for TileLocks {
    fn default() -> TileLocks {
        TileLocks::new()
    }
}
