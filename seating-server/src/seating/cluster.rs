//! Affinity groups: guests joined transitively by positive links

use shared::models::{Connection, ConnectionType, Guest};
use std::collections::HashMap;

/// Array-backed union-find with path compression and union by rank
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    pub fn union(&mut self, left: usize, right: usize) -> usize {
        let mut left = self.find(left);
        let mut right = self.find(right);
        if left == right {
            return left;
        }
        let left_rank = self.rank[left];
        let right_rank = self.rank[right];
        if left_rank < right_rank {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if left_rank == right_rank {
            self.rank[left] = left_rank.saturating_add(1);
        }
        left
    }
}

/// Partition guests into affinity groups
///
/// Groups come out in order of their first member in `guests`, and members
/// keep that order, so the result depends only on the partition and never on
/// the order of `connections`. Links naming unknown guests are ignored.
pub fn build_affinity_groups(guests: &[Guest], connections: &[Connection]) -> Vec<Vec<i64>> {
    let index: HashMap<i64, usize> = guests.iter().enumerate().map(|(i, g)| (g.id, i)).collect();
    let mut set = DisjointSet::new(guests.len());

    for link in connections
        .iter()
        .filter(|c| c.kind == ConnectionType::Positive)
    {
        if let (Some(&a), Some(&b)) = (index.get(&link.guest_a), index.get(&link.guest_b)) {
            set.union(a, b);
        }
    }

    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<i64>> = Vec::new();
    for (i, guest) in guests.iter().enumerate() {
        let root = set.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(guest.id);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::super::context::fixtures::guest;
    use super::*;
    use shared::models::ConnectionType::{Negative, Neutral, Positive};

    fn guests(n: i64) -> Vec<Guest> {
        (1..=n).map(guest).collect()
    }

    fn links(pairs: &[(i64, i64, ConnectionType)]) -> Vec<Connection> {
        pairs
            .iter()
            .map(|&(a, b, kind)| Connection::new(a, b, kind))
            .collect()
    }

    #[test]
    fn test_disjoint_set_union_find() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1);
        set.union(3, 4);
        assert_eq!(set.find(0), set.find(1));
        assert_ne!(set.find(1), set.find(3));
        set.union(1, 4);
        assert_eq!(set.find(0), set.find(3));
        assert_ne!(set.find(2), set.find(0));
    }

    #[test]
    fn test_singletons_without_positive_links() {
        let groups = build_affinity_groups(
            &guests(3),
            &links(&[(1, 2, Neutral), (2, 3, Negative)]),
        );
        assert_eq!(groups, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_positive_links_are_transitive() {
        let groups = build_affinity_groups(
            &guests(4),
            &links(&[(1, 2, Positive), (2, 3, Positive)]),
        );
        assert_eq!(groups, vec![vec![1, 2, 3], vec![4]]);
    }

    #[test]
    fn test_partition_is_order_independent() {
        let g = guests(8);
        let base = links(&[
            (1, 5, Positive),
            (2, 3, Positive),
            (5, 7, Positive),
            (3, 8, Positive),
            (4, 6, Negative),
            (6, 7, Neutral),
        ]);
        let expected = build_affinity_groups(&g, &base);
        assert_eq!(expected, vec![vec![1, 5, 7], vec![2, 3, 8], vec![4], vec![6]]);

        let mut reversed = base.clone();
        reversed.reverse();
        assert_eq!(build_affinity_groups(&g, &reversed), expected);

        // every rotation yields the same partition
        for shift in 1..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert_eq!(build_affinity_groups(&g, &rotated), expected);
        }
    }

    #[test]
    fn test_links_to_unknown_guests_are_ignored() {
        let groups = build_affinity_groups(&guests(2), &links(&[(1, 99, Positive)]));
        assert_eq!(groups, vec![vec![1], vec![2]]);
    }
}
