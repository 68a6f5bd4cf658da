//! Dense integer indices for task identifiers.
//!
//! Task ids are interned in input order so that index order doubles as the
//! caller's declaration order, which the topological sort uses as its
//! tie-break.

use rustc_hash::FxHashMap;

/// Interned task index (u32 for compact storage and fast hashing).
pub type TaskIdx = u32;

/// Bidirectional map between task id strings and dense indices.
#[derive(Debug, Clone, Default)]
pub struct TaskIdInterner {
    to_idx: FxHashMap<String, TaskIdx>,
    from_idx: Vec<String>,
}

impl TaskIdInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern a new id. Returns `None` if the id was already interned.
    pub fn insert_new(&mut self, id: &str) -> Option<TaskIdx> {
        if self.to_idx.contains_key(id) {
            return None;
        }
        let idx = self.from_idx.len() as TaskIdx;
        self.from_idx.push(id.to_string());
        self.to_idx.insert(id.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<TaskIdx> {
        self.to_idx.get(id).copied()
    }

    /// The id for an index. Panics on an index this interner never issued.
    #[inline]
    pub fn name(&self, idx: TaskIdx) -> &str {
        &self.from_idx[idx as usize]
    }

    /// Ids in declaration order.
    pub fn names(&self) -> &[String] {
        &self.from_idx
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut interner = TaskIdInterner::with_capacity(4);

        let a = interner.insert_new("1.1").unwrap();
        let b = interner.insert_new("1.2").unwrap();

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(interner.get("1.2"), Some(b));
        assert_eq!(interner.get("missing"), None);
        assert_eq!(interner.name(a), "1.1");
        assert_eq!(interner.names(), &["1.1".to_string(), "1.2".to_string()]);
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut interner = TaskIdInterner::default();
        assert!(interner.insert_new("a").is_some());
        assert!(interner.insert_new("a").is_none());
        assert_eq!(interner.len(), 1);
    }
}
