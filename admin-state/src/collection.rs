use payloads::Resource;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
struct Entry<R> {
    seq: u64,
    record: R,
}

/// Records keyed by identifier, with an insertion-ordered view.
///
/// Each id appears at most once. Replacing a record keeps its position;
/// inserting a new id places it after everything already present.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceCollection<R: Resource> {
    entries: HashMap<R::Id, Entry<R>>,
    order: BTreeMap<u64, R::Id>,
    next_seq: u64,
}

impl<R: Resource> Default for ResourceCollection<R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<R: Resource> ResourceCollection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with a freshly fetched list. A duplicate
    /// id later in the list overwrites the earlier record in place.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = R>) {
        self.entries.clear();
        self.order.clear();
        self.next_seq = 0;
        for record in records {
            self.upsert(record);
        }
    }

    /// Add a newly created record at the end. If the id is already present
    /// the stale entry is dropped first, so the record ends up last.
    pub fn push(&mut self, record: R) {
        self.remove(record.id());
        self.upsert(record);
    }

    /// Swap in a new version of an existing record, keeping its position.
    /// Returns false (and changes nothing) when the id is unknown.
    pub fn replace(&mut self, id: &R::Id, record: R) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        let new_id = record.id().clone();
        if let Some(old) = self.entries.remove(&new_id) {
            self.order.remove(&old.seq);
        }
        self.order.insert(entry.seq, new_id.clone());
        self.entries.insert(
            new_id,
            Entry {
                seq: entry.seq,
                record,
            },
        );
        true
    }

    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let entry = self.entries.remove(id)?;
        self.order.remove(&entry.seq);
        Some(entry.record)
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.entries.get(id).map(|entry| &entry.record)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in fetch/creation order.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.order
            .values()
            .filter_map(|id| self.entries.get(id).map(|entry| &entry.record))
    }

    pub fn to_vec(&self) -> Vec<R> {
        self.iter().cloned().collect()
    }

    fn upsert(&mut self, record: R) {
        let id = record.id().clone();
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.record = record;
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id.clone());
        self.entries.insert(id, Entry { seq, record });
    }
}

impl<R: Resource> FromIterator<R> for ResourceCollection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.replace_all(iter);
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::{Category, CategoryId};

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId(id.into()),
            name: name.into(),
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn names(collection: &ResourceCollection<Category>) -> Vec<String> {
        collection.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn push_appends_after_existing_entries() {
        let mut collection: ResourceCollection<Category> =
            [category("a", "Tools"), category("b", "Toys")]
                .into_iter()
                .collect();

        collection.push(category("c", "Books"));

        assert_eq!(names(&collection), ["Tools", "Toys", "Books"]);
    }

    #[test]
    fn push_of_known_id_keeps_a_single_entry() {
        let mut collection: ResourceCollection<Category> =
            [category("a", "Tools"), category("b", "Toys")]
                .into_iter()
                .collect();

        collection.push(category("a", "Hardware"));

        assert_eq!(collection.len(), 2);
        assert_eq!(names(&collection), ["Toys", "Hardware"]);
    }

    #[test]
    fn replace_keeps_position_and_length() {
        let mut collection: ResourceCollection<Category> = [
            category("a", "Tools"),
            category("b", "Toys"),
            category("c", "Books"),
        ]
        .into_iter()
        .collect();

        assert!(collection.replace(&CategoryId("b".into()), category("b", "Games")));

        assert_eq!(names(&collection), ["Tools", "Games", "Books"]);
        assert_eq!(
            collection.get(&CategoryId("b".into())).map(|c| c.name.as_str()),
            Some("Games")
        );
    }

    #[test]
    fn replace_of_unknown_id_changes_nothing() {
        let mut collection: ResourceCollection<Category> =
            [category("a", "Tools")].into_iter().collect();
        let before = collection.clone();

        assert!(!collection.replace(&CategoryId("z".into()), category("z", "Ghost")));

        assert_eq!(collection, before);
    }

    #[test]
    fn remove_keeps_relative_order_of_others() {
        let mut collection: ResourceCollection<Category> = [
            category("a", "Tools"),
            category("b", "Toys"),
            category("c", "Books"),
        ]
        .into_iter()
        .collect();

        let removed = collection.remove(&CategoryId("b".into()));

        assert_eq!(removed.map(|c| c.name), Some("Toys".to_string()));
        assert_eq!(names(&collection), ["Tools", "Books"]);
        assert!(collection.remove(&CategoryId("b".into())).is_none());
    }

    #[test]
    fn replace_all_collapses_duplicates() {
        let collection: ResourceCollection<Category> = [
            category("a", "Tools"),
            category("b", "Toys"),
            category("a", "Hardware"),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&collection), ["Hardware", "Toys"]);
    }
}
