//! Row identities and the sparse identity allocator.
//!
//! Every materialized row is stored in a slot of a sparse array and is known
//! by the index of that slot, its [`RowId`]. Ids stay stable for as long as
//! the row lives, so selection, focus and in-flight population callbacks can
//! hold on to them across structural changes. Released slots are reused by
//! later allocations; the array is only shrunk by an explicit [`compact`].
//!
//! [`compact`]: IdAllocator::compact

use std::fmt;

use serde::{Deserialize, Serialize};

use grove_core::logging::targets;

/// Stable identity of a row within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(usize);

impl RowId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The slot this id occupies in the container's identity array.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the identity array grows when no free slot is left.
///
/// Outside of a batch the array grows by a fixed `increment`. While redraw is
/// suppressed it grows by the factor `factor_num / factor_den`, so a bulk
/// insertion of `M` rows costs `O(log M)` growth operations instead of
/// `O(M / increment)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPolicy {
    /// Slots added per growth outside of a batch.
    pub increment: usize,
    /// Numerator of the batch growth factor.
    pub factor_num: usize,
    /// Denominator of the batch growth factor.
    pub factor_den: usize,
    /// Capacity of a fresh array, and the floor for compaction.
    pub initial_capacity: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            increment: 4,
            factor_num: 3,
            factor_den: 2,
            initial_capacity: 4,
        }
    }
}

impl GrowthPolicy {
    /// Set the fixed increment.
    pub fn with_increment(mut self, increment: usize) -> Self {
        self.increment = increment;
        self
    }

    /// Set the batch growth factor as a fraction.
    pub fn with_factor(mut self, num: usize, den: usize) -> Self {
        self.factor_num = num;
        self.factor_den = den;
        self
    }

    /// The array length after one growth step from `len`.
    pub fn grown_len(&self, len: usize, batched: bool) -> usize {
        let grown = if batched && self.factor_den > 0 {
            (len + 1) * self.factor_num / self.factor_den
        } else {
            len + self.increment
        };
        grown.max(len + 1)
    }

    fn floor(&self) -> usize {
        self.initial_capacity.max(1)
    }
}

/// Sparse slot array handing out [`RowId`]s.
#[derive(Debug, Clone)]
pub struct IdAllocator<T> {
    slots: Vec<Option<T>>,
    next_id: usize,
    live: usize,
    policy: GrowthPolicy,
    growths: usize,
}

impl<T> Default for IdAllocator<T> {
    fn default() -> Self {
        Self::new(GrowthPolicy::default())
    }
}

impl<T> IdAllocator<T> {
    /// Create an allocator with the policy's initial capacity.
    pub fn new(policy: GrowthPolicy) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(policy.floor(), || None);
        Self {
            slots,
            next_id: 0,
            live: 0,
            policy,
            growths: 0,
        }
    }

    /// The growth policy in use.
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// Store `value` in a free slot and return its id.
    ///
    /// The scan starts at the hint left by the previous allocation, wraps
    /// around once, and grows the array only when every slot is taken.
    pub fn allocate(&mut self, value: T, batched: bool) -> RowId {
        self.allocate_with(|_| value, batched)
    }

    /// Like [`allocate`](Self::allocate), building the value from its id.
    pub fn allocate_with<F>(&mut self, make: F, batched: bool) -> RowId
    where
        F: FnOnce(RowId) -> T,
    {
        let id = match self.find_free() {
            Some(id) => id,
            None => {
                let old_len = self.slots.len();
                let new_len = self.policy.grown_len(old_len, batched);
                self.slots.resize_with(new_len, || None);
                self.growths += 1;
                tracing::trace!(target: targets::IDS, old_len, new_len, batched, "grew identity array");
                old_len
            }
        };

        self.slots[id] = Some(make(RowId(id)));
        self.live += 1;
        self.next_id = id + 1;
        if self.next_id >= self.slots.len() {
            self.next_id = 0;
        }
        RowId(id)
    }

    fn find_free(&self) -> Option<usize> {
        let len = self.slots.len();
        let start = self.next_id.min(len);
        (start..len)
            .chain(0..start)
            .find(|&i| self.slots[i].is_none())
    }

    /// Empty the slot for `id`, returning its value.
    ///
    /// The array is never shrunk here.
    pub fn release(&mut self, id: RowId) -> Option<T> {
        let value = self.slots.get_mut(id.0)?.take();
        if value.is_some() {
            self.live -= 1;
        }
        value
    }

    /// Drop every value and return to the initial capacity.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.slots.resize_with(self.policy.floor(), || None);
        self.next_id = 0;
        self.live = 0;
    }

    /// Trim trailing empty slack.
    ///
    /// The array never shrinks below the initial capacity nor below the
    /// highest live id, rounded up to a multiple of four. Returns `true` if
    /// anything was trimmed.
    pub fn compact(&mut self) -> bool {
        let len = self.slots.len();
        if len <= self.policy.floor() || len - self.live <= 3 {
            return false;
        }

        let used = self
            .slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |highest| highest + 1);
        let target = used.div_ceil(4).saturating_mul(4).max(self.policy.floor());
        if target >= len {
            return false;
        }

        self.slots.truncate(target);
        self.slots.shrink_to_fit();
        if self.next_id >= target {
            self.next_id = 0;
        }
        tracing::debug!(target: targets::IDS, from = len, to = target, "compacted identity array");
        true
    }

    /// Borrow the value stored for `id`.
    pub fn get(&self, id: RowId) -> Option<&T> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutably borrow the value stored for `id`.
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Returns `true` if `id` refers to a live value.
    pub fn contains(&self, id: RowId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if no value is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Current length of the slot array.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of growth operations performed so far.
    pub fn growth_count(&self) -> usize {
        self.growths
    }

    /// Iterate over live values in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (RowId(i), value)))
    }

    /// Iterate mutably over live values in id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RowId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|value| (RowId(i), value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_allocate_unique_ids() {
        let mut ids = IdAllocator::default();
        let allocated: Vec<RowId> = (0..50).map(|i| ids.allocate(i, false)).collect();

        let unique: HashSet<RowId> = allocated.iter().copied().collect();
        assert_eq!(unique.len(), 50);
        assert_eq!(ids.len(), 50);
        for (n, id) in allocated.iter().enumerate() {
            assert_eq!(ids.get(*id), Some(&n));
        }
    }

    #[test]
    fn test_scan_starts_at_hint() {
        let mut ids = IdAllocator::default();
        let a = ids.allocate("a", false);
        let b = ids.allocate("b", false);
        let c = ids.allocate("c", false);
        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

        ids.release(a);
        // Hint is at 3, so the free slot at 3 wins over the released slot 0.
        let d = ids.allocate("d", false);
        assert_eq!(d.index(), 3);
        // Hint wrapped to 0, which is free again.
        let e = ids.allocate("e", false);
        assert_eq!(e, a);
    }

    #[test]
    fn test_released_id_is_reused() {
        let mut ids = IdAllocator::default();
        let held: Vec<RowId> = (0..10).map(|i| ids.allocate(i, false)).collect();
        let victim = held[4];
        assert_eq!(ids.release(victim), Some(4));
        assert!(!ids.contains(victim));

        let mut seen = false;
        for n in 0..20 {
            let id = ids.allocate(100 + n, false);
            if id == victim {
                seen = true;
                break;
            }
        }
        assert!(seen, "released id was never handed out again");
    }

    #[test]
    fn test_live_id_never_reused() {
        let mut ids = IdAllocator::default();
        let first = ids.allocate(0, false);
        for n in 1..40 {
            assert_ne!(ids.allocate(n, false), first);
        }
    }

    #[test]
    fn test_release_twice() {
        let mut ids = IdAllocator::default();
        let id = ids.allocate(1, false);
        assert_eq!(ids.release(id), Some(1));
        assert_eq!(ids.release(id), None);
        assert_eq!(ids.release(RowId::new(999)), None);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_fixed_increment_growth() {
        let mut ids = IdAllocator::default();
        for n in 0..100 {
            ids.allocate(n, false);
        }
        // 4 initial slots, +4 per growth.
        assert_eq!(ids.growth_count(), 24);
        assert_eq!(ids.capacity(), 100);
    }

    #[test]
    fn test_batched_growth_is_logarithmic() {
        let mut ids = IdAllocator::default();
        for n in 0..10_000 {
            ids.allocate(n, true);
        }
        assert!(
            ids.growth_count() <= 25,
            "expected O(log M) growths, got {}",
            ids.growth_count()
        );
        assert!(ids.capacity() >= 10_000);
    }

    #[test]
    fn test_custom_policy() {
        let policy = GrowthPolicy::default().with_increment(16).with_factor(2, 1);
        assert_eq!(policy.grown_len(16, false), 32);
        assert_eq!(policy.grown_len(16, true), 34);

        let degenerate = GrowthPolicy::default().with_increment(0).with_factor(1, 1);
        assert_eq!(degenerate.grown_len(8, false), 9);
        assert_eq!(degenerate.grown_len(8, true), 9);
    }

    #[test]
    fn test_compact_trims_trailing_slack() {
        let mut ids = IdAllocator::default();
        let all: Vec<RowId> = (0..40).map(|n| ids.allocate(n, true)).collect();
        let capacity = ids.capacity();
        assert!(capacity >= 40);

        for id in &all[6..] {
            ids.release(*id);
        }
        assert!(ids.compact());
        assert_eq!(ids.capacity(), 8);
        for id in &all[..6] {
            assert!(ids.contains(*id));
        }
        assert!(!ids.compact());
    }

    #[test]
    fn test_compact_respects_highest_live_id() {
        let mut ids = IdAllocator::default();
        let all: Vec<RowId> = (0..20).map(|n| ids.allocate(n, false)).collect();
        for id in &all[..18] {
            ids.release(*id);
        }
        // Slot 19 is still live, so nothing can be trimmed.
        assert!(!ids.compact());
        assert_eq!(ids.capacity(), 20);
    }

    #[test]
    fn test_reset() {
        let mut ids = IdAllocator::default();
        for n in 0..10 {
            ids.allocate(n, false);
        }
        ids.reset();
        assert!(ids.is_empty());
        assert_eq!(ids.capacity(), 4);
        assert_eq!(ids.allocate(0, false).index(), 0);
    }

    #[test]
    fn test_iter_skips_empty_slots() {
        let mut ids = IdAllocator::default();
        let a = ids.allocate('a', false);
        let b = ids.allocate('b', false);
        let c = ids.allocate('c', false);
        ids.release(b);

        let live: Vec<(RowId, char)> = ids.iter().map(|(id, v)| (id, *v)).collect();
        assert_eq!(live, vec![(a, 'a'), (c, 'c')]);

        for (_, value) in ids.iter_mut() {
            *value = value.to_ascii_uppercase();
        }
        assert_eq!(ids.get(c), Some(&'C'));
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::new(7).to_string(), "#7");
        assert_eq!(RowId::new(7).index(), 7);
    }
}
