//! Scoped Scratch Buffers
//!
//! Scanning a shape needs somewhere to put crossing points before the x
//! values are copied out. Buffers come from a small pool owned by the
//! current thread and go back to it when the guard is dropped, on every
//! exit path. Two threads never see the same buffer.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use glam::Vec2;

/// Buffers kept per thread once released
const MAX_POOLED : usize = 4;

thread_local! {
    static POOL: RefCell<Vec<Vec<Vec2>>> = RefCell::new(Vec::new());
}

/// Point buffer borrowed from the thread's pool
///
/// Dereferences to a zeroed `[Vec2]` of the requested length.
#[derive(Debug)]
pub struct ScratchBuffer {
    data: Vec<Vec2>,
}

impl ScratchBuffer {
    /// Take a buffer of `len` points from the pool, allocating if it is empty
    pub fn acquire(len: usize) -> Self {
        let mut data = POOL
            .try_with(|pool| pool.borrow_mut().pop())
            .ok()
            .flatten()
            .unwrap_or_default();
        data.clear();
        data.resize(len, Vec2::ZERO);
        Self { data }
    }
}

impl Deref for ScratchBuffer {
    type Target = [Vec2];
    fn deref(&self) -> &[Vec2] {
        &self.data
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut [Vec2] {
        &mut self.data
    }
}

impl Drop for ScratchBuffer {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        // The pool may already be gone while the thread shuts down
        let _ = POOL.try_with(|pool| {
            if let Ok(mut pool) = pool.try_borrow_mut() {
                if pool.len() < MAX_POOLED {
                    pool.push(data);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of idle buffers in the current thread's pool
    fn pooled() -> usize {
        POOL.with(|pool| pool.borrow().len())
    }

    #[test]
    fn returned_on_drop() {
        let before = pooled();
        {
            let mut a = ScratchBuffer::acquire(8);
            a[3] = Vec2::new(1.0, 2.0);
            assert_eq!(a.len(), 8);
        }
        assert_eq!(pooled(), before.max(1));
        let b = ScratchBuffer::acquire(5);
        assert_eq!(b.len(), 5);
        assert!(b.iter().all(|p| *p == Vec2::ZERO));
    }
    #[test]
    fn nested_buffers_are_distinct() {
        let mut a = ScratchBuffer::acquire(2);
        let mut b = ScratchBuffer::acquire(2);
        a[0] = Vec2::ONE;
        b[0] = Vec2::new(2.0, 2.0);
        assert_ne!(a[0], b[0]);
    }
}
