use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{MovieId, RatingValue, MAX_RATING};

/// Sentinel index for "no slot"
const NIL: usize = usize::MAX;

/// One rating entry threaded into the recency list
#[derive(Debug)]
struct Slot {
    movie_id: MovieId,
    rating: RatingValue,
    prev: usize,
    next: usize,
}

/// Capacity-bounded rating store with least-recently-set eviction.
///
/// Holds one rating per movie, up to `capacity` entries. Setting a rating
/// for a movie already present refreshes its recency instead of duplicating
/// it; inserting beyond capacity evicts the entry least recently set.
/// Eviction order is strict set/update order with no randomness.
///
/// Backed by a slab of slots threaded into a doubly-linked recency list
/// plus an index map, so `set`, `get`, `remove` and eviction are all O(1)
/// amortized.
#[derive(Debug)]
pub struct RatingStore {
    capacity: usize,
    index: HashMap<MovieId, usize>,
    slots: Vec<Slot>,
    free: Vec<usize>,
    /// Most recently set entry
    head: usize,
    /// Least recently set entry, next in line for eviction
    tail: usize,
}

impl RatingStore {
    /// Creates an empty store holding at most `capacity` ratings
    pub fn new(capacity: usize) -> AppResult<Self> {
        if capacity == 0 {
            return Err(AppError::Configuration(
                "rating store capacity must be positive".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        })
    }

    /// Sets the rating for a movie.
    ///
    /// A rating of 0 removes the entry (no-op when absent). Ratings in
    /// 1..=5 insert or update, marking the entry as the newest; beyond
    /// capacity the oldest entry is evicted. Values above 5 are rejected
    /// and leave the store unchanged.
    pub fn set(&mut self, movie_id: MovieId, rating: RatingValue) -> AppResult<()> {
        if rating > MAX_RATING {
            return Err(AppError::InvalidRating(format!(
                "rating {} for movie {} is outside 0..={}",
                rating, movie_id, MAX_RATING
            )));
        }

        if rating == 0 {
            self.remove(movie_id);
            return Ok(());
        }

        if let Some(&slot) = self.index.get(&movie_id) {
            self.slots[slot].rating = rating;
            self.unlink(slot);
            self.push_front(slot);
            return Ok(());
        }

        if self.index.len() == self.capacity {
            self.evict_oldest();
        }

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Slot {
                    movie_id,
                    rating,
                    prev: NIL,
                    next: NIL,
                };
                slot
            }
            None => {
                self.slots.push(Slot {
                    movie_id,
                    rating,
                    prev: NIL,
                    next: NIL,
                });
                self.slots.len() - 1
            }
        };

        self.index.insert(movie_id, slot);
        self.push_front(slot);
        Ok(())
    }

    /// Returns the stored rating, or `None` when the movie is unrated
    pub fn get(&self, movie_id: MovieId) -> Option<RatingValue> {
        self.index.get(&movie_id).map(|&slot| self.slots[slot].rating)
    }

    /// Deletes the entry for a movie; no-op when absent
    pub fn remove(&mut self, movie_id: MovieId) {
        if let Some(slot) = self.index.remove(&movie_id) {
            self.unlink(slot);
            self.free.push(slot);
        }
    }

    /// Number of rated movies, always `<= capacity`
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empties the store; subsequent calls behave as on a fresh store
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Immutable copy of the current contents, keyed by movie
    pub fn snapshot(&self) -> HashMap<MovieId, RatingValue> {
        self.index
            .iter()
            .map(|(&movie_id, &slot)| (movie_id, self.slots[slot].rating))
            .collect()
    }

    /// Iterates entries newest first
    pub fn iter(&self) -> impl Iterator<Item = (MovieId, RatingValue)> + '_ {
        RecencyIter {
            store: self,
            cursor: self.head,
        }
    }

    fn evict_oldest(&mut self) {
        let tail = self.tail;
        if tail == NIL {
            return;
        }
        let movie_id = self.slots[tail].movie_id;
        self.index.remove(&movie_id);
        self.unlink(tail);
        self.free.push(tail);
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = NIL;
        self.slots[slot].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.slots[slot].prev = NIL;
        self.slots[slot].next = NIL;
    }
}

struct RecencyIter<'a> {
    store: &'a RatingStore,
    cursor: usize,
}

impl Iterator for RecencyIter<'_> {
    type Item = (MovieId, RatingValue);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let slot = &self.store.slots[self.cursor];
        self.cursor = slot.next;
        Some((slot.movie_id, slot.rating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &RatingStore) -> Vec<u32> {
        store.iter().map(|(id, _)| id.0).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = RatingStore::new(0);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_get_absent_is_none() {
        let store = RatingStore::new(3).unwrap();
        assert_eq!(store.get(MovieId(1)), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 4).unwrap();
        assert_eq!(store.get(MovieId(1)), Some(4));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_invariant_holds_after_every_set() {
        let mut store = RatingStore::new(3).unwrap();
        for id in 1..=20u32 {
            store.set(MovieId(id), 1 + (id % 5) as u8).unwrap();
            assert!(store.len() <= store.capacity());
        }
    }

    #[test]
    fn test_lru_eviction_drops_oldest() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 5).unwrap(); // A
        store.set(MovieId(2), 4).unwrap(); // B
        store.set(MovieId(3), 3).unwrap(); // C
        store.set(MovieId(4), 2).unwrap(); // D evicts A

        assert_eq!(store.get(MovieId(1)), None);
        assert_eq!(store.get(MovieId(2)), Some(4));
        assert_eq!(store.get(MovieId(3)), Some(3));
        assert_eq!(store.get(MovieId(4)), Some(2));
    }

    #[test]
    fn test_refresh_on_update_protects_entry() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 5).unwrap(); // A
        store.set(MovieId(2), 4).unwrap(); // B
        store.set(MovieId(3), 3).unwrap(); // C
        store.set(MovieId(1), 2).unwrap(); // refresh A
        store.set(MovieId(4), 1).unwrap(); // D evicts B, not A

        assert_eq!(store.get(MovieId(2)), None);
        assert_eq!(store.get(MovieId(1)), Some(2));
        assert_eq!(store.get(MovieId(3)), Some(3));
        assert_eq!(store.get(MovieId(4)), Some(1));
    }

    #[test]
    fn test_update_does_not_duplicate() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 3).unwrap();
        store.set(MovieId(1), 5).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(MovieId(1)), Some(5));
    }

    #[test]
    fn test_zero_rating_removes() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 3).unwrap();
        store.set(MovieId(1), 0).unwrap();
        assert_eq!(store.get(MovieId(1)), None);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_zero_rating_for_absent_is_noop() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(9), 0).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_rating_leaves_store_unchanged() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 3).unwrap();

        let result = store.set(MovieId(2), 6);
        assert!(matches!(result, Err(AppError::InvalidRating(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(MovieId(2)), None);
    }

    #[test]
    fn test_iteration_is_newest_first() {
        let mut store = RatingStore::new(5).unwrap();
        store.set(MovieId(1), 1).unwrap();
        store.set(MovieId(2), 2).unwrap();
        store.set(MovieId(3), 3).unwrap();
        assert_eq!(ids(&store), vec![3, 2, 1]);

        // refreshing 1 moves it to the front
        store.set(MovieId(1), 4).unwrap();
        assert_eq!(ids(&store), vec![1, 3, 2]);
    }

    #[test]
    fn test_remove_middle_entry_keeps_order() {
        let mut store = RatingStore::new(5).unwrap();
        store.set(MovieId(1), 1).unwrap();
        store.set(MovieId(2), 2).unwrap();
        store.set(MovieId(3), 3).unwrap();
        store.remove(MovieId(2));
        assert_eq!(ids(&store), vec![3, 1]);
    }

    #[test]
    fn test_clear_behaves_like_fresh_store() {
        let mut store = RatingStore::new(2).unwrap();
        store.set(MovieId(1), 5).unwrap();
        store.set(MovieId(2), 4).unwrap();
        store.clear();

        assert!(store.is_empty());
        assert_eq!(ids(&store), Vec::<u32>::new());

        store.set(MovieId(3), 3).unwrap();
        store.set(MovieId(4), 2).unwrap();
        store.set(MovieId(5), 1).unwrap();
        assert_eq!(ids(&store), vec![5, 4]);
    }

    #[test]
    fn test_snapshot_matches_contents() {
        let mut store = RatingStore::new(3).unwrap();
        store.set(MovieId(1), 5).unwrap();
        store.set(MovieId(2), 4).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&MovieId(1)), Some(&5));
        assert_eq!(snapshot.get(&MovieId(2)), Some(&4));
    }

    #[test]
    fn test_slot_reuse_after_removals() {
        let mut store = RatingStore::new(2).unwrap();
        for round in 0..10u32 {
            store.set(MovieId(round * 2), 1).unwrap();
            store.set(MovieId(round * 2 + 1), 2).unwrap();
            store.remove(MovieId(round * 2));
        }
        // slab never grows past capacity + freed slots being recycled
        assert!(store.slots.len() <= 3);
        assert_eq!(store.len(), 1);
    }
}
