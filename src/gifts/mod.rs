use serde::Serialize;

pub mod ids;

pub use ids::max_id;

pub type GiftId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GiftRecord {
    pub id: GiftId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    Add,
    Remove(GiftId),
}

/// Ordered gift records. Ids are pairwise distinct; insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GiftList {
    gifts: Vec<GiftRecord>,
}

impl GiftList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GiftRecord> {
        self.gifts.iter()
    }

    pub fn as_slice(&self) -> &[GiftRecord] {
        &self.gifts
    }

    pub fn ids(&self) -> impl Iterator<Item = GiftId> + '_ {
        self.gifts.iter().map(|gift| gift.id)
    }

    pub fn get(&self, id: GiftId) -> Option<&GiftRecord> {
        self.gifts.iter().find(|gift| gift.id == id)
    }

    pub fn position(&self, id: GiftId) -> Option<usize> {
        self.gifts.iter().position(|gift| gift.id == id)
    }

    /// `max_id + 1`; once that would overflow, the lowest unused positive id.
    pub fn next_id(&self) -> GiftId {
        max_id(self.ids())
            .checked_add(1)
            .unwrap_or_else(|| self.lowest_free_id())
    }

    fn lowest_free_id(&self) -> GiftId {
        (1..=GiftId::MAX)
            .find(|candidate| self.position(*candidate).is_none())
            .unwrap_or(GiftId::MIN)
    }

    pub fn add_gift(&mut self) -> GiftRecord {
        let gift = GiftRecord { id: self.next_id() };
        self.gifts.push(gift);
        tracing::debug!(gift_id = gift.id, total = self.gifts.len(), "gift added");
        gift
    }

    pub fn remove_gift(&mut self, id: GiftId) -> Option<GiftRecord> {
        let Some(idx) = self.position(id) else {
            tracing::debug!(gift_id = id, "remove ignored: no such gift");
            return None;
        };
        let removed = self.gifts.remove(idx);
        tracing::debug!(gift_id = id, total = self.gifts.len(), "gift removed");
        Some(removed)
    }

    pub fn apply(&mut self, action: &ListAction) {
        match action {
            ListAction::Add => {
                self.add_gift();
            }
            ListAction::Remove(id) => {
                self.remove_gift(*id);
            }
        }
    }
}

/// Next list state for `action`; `list` is left untouched.
pub fn reduce(list: &GiftList, action: &ListAction) -> GiftList {
    let mut next = list.clone();
    next.apply(action);
    next
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::{reduce, GiftList, GiftRecord, ListAction};

    fn ids(list: &GiftList) -> Vec<i64> {
        list.ids().collect()
    }

    #[test]
    fn starts_empty() {
        let list = GiftList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn first_add_allocates_id_one() {
        let list = reduce(&GiftList::new(), &ListAction::Add);
        assert_eq!(list.as_slice(), &[GiftRecord { id: 1 }]);
    }

    #[test]
    fn consecutive_adds_are_strictly_increasing() {
        let list = reduce(&GiftList::new(), &ListAction::Add);
        let list = reduce(&list, &ListAction::Add);
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let before = reduce(&GiftList::new(), &ListAction::Add);
        let after = reduce(&before, &ListAction::Remove(1));
        assert_eq!(ids(&before), vec![1]);
        assert!(after.is_empty());
    }

    #[test]
    fn add_then_remove_returns_to_empty() {
        let mut list = GiftList::new();
        let gift = list.add_gift();
        assert_eq!(gift.id, 1);
        assert_matches!(list.remove_gift(1), Some(GiftRecord { id: 1 }));
        assert!(list.is_empty());
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let mut list = GiftList::new();
        list.add_gift();
        list.add_gift();
        let snapshot = list.clone();
        assert_matches!(list.remove_gift(42), None);
        assert_eq!(list, snapshot);
        assert_eq!(reduce(&list, &ListAction::Remove(-1)), snapshot);
    }

    #[test]
    fn removal_preserves_order_of_remaining_gifts() {
        let mut list = GiftList::new();
        for _ in 0..4 {
            list.add_gift();
        }
        list.remove_gift(2);
        assert_eq!(ids(&list), vec![1, 3, 4]);
        // New ids stay above the current maximum, not in the gap.
        assert_eq!(list.add_gift().id, 5);
    }

    #[test]
    fn next_id_resets_after_full_clear() {
        let mut list = GiftList::new();
        list.add_gift();
        list.add_gift();
        list.remove_gift(1);
        list.remove_gift(2);
        assert_eq!(list.add_gift().id, 1);
    }

    #[test]
    fn removing_the_max_lets_its_id_be_allocated_again() {
        let mut list = GiftList::new();
        list.add_gift();
        list.add_gift();
        list.remove_gift(2);
        assert_eq!(list.add_gift().id, 2);
        assert_eq!(ids(&list), vec![1, 2]);
    }

    #[test]
    fn ids_stay_distinct_across_add_remove_cycles() {
        let mut list = GiftList::new();
        for round in 0..5 {
            list.add_gift();
            list.add_gift();
            list.remove_gift(round % 3 + 1);
        }
        let mut seen = ids(&list);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), list.len());
    }

    #[test]
    fn next_id_never_overflows_past_max() {
        let mut list = GiftList {
            gifts: vec![GiftRecord { id: 1 }, GiftRecord { id: i64::MAX }],
        };
        let gift = list.add_gift();
        assert_eq!(gift.id, 2);
        assert_eq!(ids(&list), vec![1, i64::MAX, 2]);
    }

    #[test]
    fn serializes_as_array_of_ids() {
        let mut list = GiftList::new();
        list.add_gift();
        list.add_gift();
        let json = serde_json::to_string(&list).expect("serialize");
        assert_eq!(json, r#"[{"id":1},{"id":2}]"#);
    }
}
