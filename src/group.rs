//! Reassembles composite keys, indexes, and foreign keys from flat catalog rows.
//!
//! Catalog views return one row per (group, position) pair. Rows of a group may
//! arrive out of positional order, so members are stored sparsely by position and
//! flattened in ascending position order once every row has been consumed.

use std::collections::{BTreeMap, HashMap};

/// Groups in order of first encounter, each holding a header captured from its
/// first row and members keyed by ordinal position.
#[derive(Debug)]
pub struct PositionalGroups<H, M> {
    order: Vec<String>,
    groups: HashMap<String, Slot<H, M>>,
}

#[derive(Debug)]
struct Slot<H, M> {
    header: H,
    members: BTreeMap<i64, M>,
}

/// One reassembled group with its members in ascending position order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<H, M> {
    pub name: String,
    pub header: H,
    pub members: Vec<M>,
}

impl<H, M> PositionalGroups<H, M> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            groups: HashMap::new(),
        }
    }

    /// Place `member` at `position` within group `name`.
    ///
    /// `header` is only evaluated for the first row of a group. A repeated position
    /// replaces the earlier member.
    pub fn insert(&mut self, name: &str, position: i64, header: impl FnOnce() -> H, member: M) {
        let order = &mut self.order;
        let slot = self.groups.entry(name.to_string()).or_insert_with(|| {
            order.push(name.to_string());
            Slot {
                header: header(),
                members: BTreeMap::new(),
            }
        });
        if slot.members.insert(position, member).is_some() {
            tracing::warn!("Duplicate position {position} in `{name}`; keeping the last row");
        }
    }

    /// Flatten every group, keeping first-encounter order between groups.
    pub fn into_groups(mut self) -> Vec<Group<H, M>> {
        let mut out = Vec::with_capacity(self.order.len());
        for name in self.order {
            if let Some(slot) = self.groups.remove(&name) {
                out.push(Group {
                    name,
                    header: slot.header,
                    members: slot.members.into_values().collect(),
                });
            }
        }
        out
    }
}

impl<H, M> Default for PositionalGroups<H, M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(groups: &'a [Group<(), &'static str>]) -> Vec<&'a str> {
        groups.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_members_sorted_by_position() {
        let mut groups = PositionalGroups::new();
        groups.insert("pk", 2, || (), "b");
        groups.insert("pk", 3, || (), "c");
        groups.insert("pk", 1, || (), "a");

        let out = groups.into_groups();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].members, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_groups_keep_first_encounter_order() {
        let mut groups = PositionalGroups::new();
        groups.insert("uq_b", 1, || (), "x");
        groups.insert("uq_a", 1, || (), "y");
        groups.insert("uq_b", 2, || (), "z");

        let out = groups.into_groups();
        assert_eq!(names(&out), vec!["uq_b", "uq_a"]);
        assert_eq!(out[0].members, vec!["x", "z"]);
        assert_eq!(out[1].members, vec!["y"]);
    }

    #[test]
    fn test_header_taken_from_first_row() {
        let mut groups = PositionalGroups::new();
        let mut calls = 0;
        groups.insert(
            "idx",
            1,
            || {
                calls += 1;
                true
            },
            "a",
        );
        groups.insert("idx", 2, || false, "b");
        assert_eq!(calls, 1);

        let out = groups.into_groups();
        assert!(out[0].header);
    }

    #[test]
    fn test_sparse_positions_flatten_without_gaps() {
        let mut groups = PositionalGroups::new();
        groups.insert("fk", 10, || (), "late");
        groups.insert("fk", 4, || (), "early");

        let out = groups.into_groups();
        assert_eq!(out[0].members, vec!["early", "late"]);
    }

    #[test]
    fn test_duplicate_position_keeps_last() {
        let mut groups = PositionalGroups::new();
        groups.insert("pk", 1, || (), "first");
        groups.insert("pk", 1, || (), "second");

        let out = groups.into_groups();
        assert_eq!(out[0].members, vec!["second"]);
    }

    #[test]
    fn test_empty() {
        let groups: PositionalGroups<(), &str> = PositionalGroups::default();
        assert!(groups.into_groups().is_empty());
    }
}
