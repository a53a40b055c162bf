//! Collapsing of duplicate finder hits
//!
//! One physical finder pattern passes verification at several adjacent
//! pixels. Both passes here treat two centers as the same pattern when
//! their squared pixel distance is below `threshold`, and keep the
//! earliest-discovered member of each group.

use crate::models::Cell;
use std::collections::HashMap;

/// How duplicate verified centers are collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupStrategy {
    /// Single forward pass; results depend on input order along chains
    Sequential,
    /// Connected components over the "near" relation; order-invariant grouping
    #[default]
    Clustered,
}

impl DedupStrategy {
    /// Run the selected strategy
    pub fn apply(self, points: &[Cell], threshold: f32) -> Vec<Cell> {
        match self {
            DedupStrategy::Sequential => suppress_neighbors(points, threshold),
            DedupStrategy::Clustered => cluster_centers(points, threshold),
        }
    }
}

fn is_near(a: &Cell, b: &Cell, threshold: f32) -> bool {
    (a.distance_squared(b) as f32) < threshold
}

/// Sequential neighbor suppression
///
/// Walks survivors in order and drops every later point near the current one.
/// A chain a~b~c where a and c are far apart keeps both a and c.
pub fn suppress_neighbors(points: &[Cell], threshold: f32) -> Vec<Cell> {
    let mut kept: Vec<Cell> = points.to_vec();
    let mut i = 0;
    while i < kept.len() {
        let anchor = kept[i];
        let tail: Vec<Cell> = kept
            .drain(i + 1..)
            .filter(|p| !is_near(&anchor, p, threshold))
            .collect();
        kept.extend(tail);
        i += 1;
    }
    kept
}

/// Order-invariant clustering of verified centers
///
/// Points are bucketed on a grid whose cell side is the match radius, so
/// only neighboring buckets are compared. Near pairs are joined with
/// union-find; each component is reported once, at the position of its
/// earliest member.
pub fn cluster_centers(points: &[Cell], threshold: f32) -> Vec<Cell> {
    if points.is_empty() {
        return Vec::new();
    }
    if threshold <= 0.0 {
        return points.to_vec();
    }

    let side = threshold.sqrt().ceil().max(1.0) as i32;
    let bucket_of = |c: &Cell| (c.row.div_euclid(side), c.col.div_euclid(side));

    let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
    for (idx, p) in points.iter().enumerate() {
        buckets.entry(bucket_of(p)).or_default().push(idx);
    }

    let mut sets = DisjointSet::new(points.len());
    for (idx, p) in points.iter().enumerate() {
        let (br, bc) = bucket_of(p);
        for dr in -1..=1 {
            for dc in -1..=1 {
                let Some(members) = buckets.get(&(br + dr, bc + dc)) else {
                    continue;
                };
                for &other in members {
                    if other > idx && is_near(p, &points[other], threshold) {
                        sets.union(idx, other);
                    }
                }
            }
        }
    }

    (0..points.len())
        .filter(|&idx| sets.find(idx) == idx)
        .map(|idx| points[idx])
        .collect()
}

/// Union-find whose root is always the smallest index in its set
struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, idx: usize) -> usize {
        let mut root = idx;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = idx;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(coords: &[(i32, i32)]) -> Vec<Cell> {
        coords.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_tight_cluster_keeps_first() {
        let points = cells(&[(10, 10), (11, 10), (10, 11), (9, 9), (11, 11)]);
        for strategy in [DedupStrategy::Sequential, DedupStrategy::Clustered] {
            assert_eq!(strategy.apply(&points, 10.0), cells(&[(10, 10)]));
        }
    }

    #[test]
    fn test_spread_points_unchanged() {
        let points = cells(&[(0, 0), (0, 40), (40, 0), (40, 40), (-20, 7)]);
        for strategy in [DedupStrategy::Sequential, DedupStrategy::Clustered] {
            assert_eq!(strategy.apply(&points, 10.0), points);
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // Squared distance 9 is not below 9
        let points = cells(&[(0, 0), (0, 3)]);
        assert_eq!(suppress_neighbors(&points, 9.0).len(), 2);
        assert_eq!(cluster_centers(&points, 9.0).len(), 2);
        assert_eq!(suppress_neighbors(&points, 9.5).len(), 1);
        assert_eq!(cluster_centers(&points, 9.5).len(), 1);
    }

    #[test]
    fn test_chain_handling_differs() {
        // a~b and b~c, but a and c are far apart (squared distances 4, 4, 16)
        let points = cells(&[(0, 0), (0, 2), (0, 4)]);
        assert_eq!(suppress_neighbors(&points, 5.0), cells(&[(0, 0), (0, 4)]));
        assert_eq!(cluster_centers(&points, 5.0), cells(&[(0, 0)]));
    }

    #[test]
    fn test_clustering_is_order_invariant() {
        let a = cells(&[(0, 0), (0, 2), (30, 30), (0, 4), (31, 30), (60, 0)]);
        let mut b = a.clone();
        b.reverse();

        let mut groups_a = cluster_centers(&a, 5.0).len();
        let mut groups_b = cluster_centers(&b, 5.0).len();
        assert_eq!(groups_a, 3);
        assert_eq!(groups_b, 3);

        // Sequential pass over the chain splits it differently depending on order
        groups_a = suppress_neighbors(&a, 5.0).len();
        groups_b = suppress_neighbors(&cells(&[(0, 2), (0, 0), (0, 4)]), 5.0).len();
        assert_eq!(groups_a, 4);
        assert_eq!(groups_b, 1);
    }

    #[test]
    fn test_empty_and_non_positive_threshold() {
        assert!(cluster_centers(&[], 4.0).is_empty());
        assert!(suppress_neighbors(&[], 4.0).is_empty());
        let points = cells(&[(1, 1), (1, 1)]);
        assert_eq!(cluster_centers(&points, 0.0), points);
        assert_eq!(suppress_neighbors(&points, 0.0), points);
    }
}
