//! Scratch columns reused across alignments.
//!
//! Three H slots rotate between the roles "previous column" (load), "column
//! being written" (store) and "column where the best score was last seen"
//! (max). Roles are plain indices; a snapshot is just `max = store`, and the
//! next column is written to whichever slot holds neither of the others.

use crate::error::AlignError;
use crate::simd::Lane;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct SlotRoles {
    load: usize,
    store: usize,
    max: usize,
}

impl SlotRoles {
    const INITIAL: SlotRoles = SlotRoles { load: 0, store: 0, max: 2 };
}

#[inline(always)]
fn free_slot(a: usize, b: usize) -> usize {
    if a != 0 && b != 0 {
        0
    } else if a != 1 && b != 1 {
        1
    } else {
        2
    }
}

pub struct ResourcePool<T: Lane> {
    h: [Vec<T>; 3],
    e: Vec<T>,
    lanes: usize,
    capacity: usize,
    segment_len: usize,
    roles: SlotRoles,
}

impl<T: Lane> ResourcePool<T> {
    /// An empty pool for vectors of `lanes` lanes. Call [`ResourcePool::acquire`]
    /// before use.
    pub fn new(lanes: usize) -> Self {
        Self {
            h: [Vec::new(), Vec::new(), Vec::new()],
            e: Vec::new(),
            lanes: lanes.max(1),
            capacity: 0,
            segment_len: 0,
            roles: SlotRoles::INITIAL,
        }
    }

    pub fn with_capacity(max_query_len: usize, lanes: usize) -> Self {
        let mut pool = Self::new(lanes);
        pool.acquire(max_query_len);
        pool
    }

    /// Makes room for queries of up to `max_query_len` symbols. Never shrinks.
    pub fn acquire(&mut self, max_query_len: usize) {
        let segments = (max_query_len + self.lanes - 1) / self.lanes;
        if segments <= self.capacity {
            return;
        }

        let len = segments * self.lanes;
        for buf in self.h.iter_mut().chain(std::iter::once(&mut self.e)) {
            buf.resize(len, T::ZERO);
        }
        log::debug!(
            "Resource pool for {}-bit lanes grown from {} to {} segments",
            T::WIDTH.bits(),
            self.capacity,
            segments
        );
        self.capacity = segments;
    }

    /// Zeroes the first `segment_len` segments of every buffer and resets the
    /// slot roles. Never allocates.
    pub fn reset(&mut self, segment_len: usize) -> Result<(), AlignError> {
        if segment_len > self.capacity {
            return Err(AlignError::Capacity { requested: segment_len, capacity: self.capacity });
        }

        let len = segment_len * self.lanes;
        for buf in self.h.iter_mut().chain(std::iter::once(&mut self.e)) {
            buf[..len].fill(T::ZERO);
        }
        self.segment_len = segment_len;
        self.roles = SlotRoles::INITIAL;
        Ok(())
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Capacity in segments.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Longest query that fits without growing.
    pub fn max_query_len(&self) -> usize {
        self.capacity * self.lanes
    }

    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    pub fn size_in_bytes(&self) -> usize {
        4 * self.capacity * self.lanes * std::mem::size_of::<T>()
    }

    /// Start of a new column: the last written column becomes the one read.
    #[inline(always)]
    pub(crate) fn rotate(&mut self) {
        self.roles.load = self.roles.store;
        self.roles.store = free_slot(self.roles.load, self.roles.max);
    }

    /// Keep the column just written as the best-score column.
    #[inline(always)]
    pub(crate) fn snapshot_max(&mut self) {
        self.roles.max = self.roles.store;
    }

    #[inline(always)]
    pub(crate) fn prev_h(&self, seg: usize) -> &[T] {
        &self.h[self.roles.load][seg * self.lanes..]
    }

    #[inline(always)]
    pub(crate) fn cur_h(&self, seg: usize) -> &[T] {
        &self.h[self.roles.store][seg * self.lanes..]
    }

    #[inline(always)]
    pub(crate) fn cur_h_mut(&mut self, seg: usize) -> &mut [T] {
        &mut self.h[self.roles.store][seg * self.lanes..]
    }

    #[inline(always)]
    pub(crate) fn e(&self, seg: usize) -> &[T] {
        &self.e[seg * self.lanes..]
    }

    #[inline(always)]
    pub(crate) fn e_mut(&mut self, seg: usize) -> &mut [T] {
        &mut self.e[seg * self.lanes..]
    }

    /// H column saved at the last score improvement, striped like the profile.
    pub fn max_column(&self) -> &[T] {
        &self.h[self.roles.max][..self.segment_len * self.lanes]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_never_collide() {
        let mut pool = ResourcePool::<i16>::with_capacity(32, 8);
        pool.reset(4).unwrap();
        for step in 0..20 {
            pool.rotate();
            let r = pool.roles;
            assert_ne!(r.load, r.store);
            assert_ne!(r.max, r.store);
            if step % 3 == 0 {
                pool.snapshot_max();
                assert_eq!(pool.roles.max, pool.roles.store);
            }
        }
    }

    #[test]
    fn test_reset_zeroes_and_checks_capacity() {
        let mut pool = ResourcePool::<u8>::with_capacity(40, 16);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.max_query_len(), 48);

        pool.reset(3).unwrap();
        pool.rotate();
        pool.cur_h_mut(2)[..16].fill(9);
        pool.e_mut(0)[..16].fill(4);
        pool.snapshot_max();
        assert!(pool.max_column().contains(&9));

        pool.reset(2).unwrap();
        assert_eq!(pool.max_column().len(), 32);
        assert!(pool.max_column().iter().all(|&v| v == 0));
        assert!(pool.e(0)[..16].iter().all(|&v| v == 0));

        assert_eq!(pool.reset(4), Err(AlignError::Capacity { requested: 4, capacity: 3 }));
    }

    #[test]
    fn test_acquire_grows_only() {
        let mut pool = ResourcePool::<i32>::new(4);
        assert!(pool.reset(1).is_err());
        pool.acquire(10);
        assert_eq!(pool.capacity(), 3);
        pool.acquire(5);
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.size_in_bytes(), 4 * 3 * 4 * 4);
        assert!(pool.reset(3).is_ok());
    }
}
