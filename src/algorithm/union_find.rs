//! 并查集（不相交集合森林）
//!
//! 路径压缩 + 按秩合并。顶点在第一次被引用时加入，自成一个集合。

use crate::graph::VertexId;

/// 不相交集合森林
#[derive(Debug, Clone, Default)]
pub struct DisjointSetForest {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// 已加入的顶点
    seen: Vec<bool>,
    seen_count: usize,
    set_count: usize,
}

impl DisjointSetForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预先分配 `n` 个顶点的空间（不视为已加入）
    pub fn with_capacity(n: usize) -> Self {
        Self {
            parent: Vec::with_capacity(n),
            rank: Vec::with_capacity(n),
            seen: Vec::with_capacity(n),
            seen_count: 0,
            set_count: 0,
        }
    }

    fn admit(&mut self, v: VertexId) -> usize {
        let idx = v.index();
        if idx >= self.parent.len() {
            let start = self.parent.len();
            self.parent.extend(start..=idx);
            self.rank.resize(idx + 1, 0);
            self.seen.resize(idx + 1, false);
        }
        if !self.seen[idx] {
            self.seen[idx] = true;
            self.seen_count += 1;
            self.set_count += 1;
        }
        idx
    }

    /// 查找代表元
    pub fn find(&mut self, v: VertexId) -> VertexId {
        let mut node = self.admit(v);
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        VertexId::new(root)
    }

    /// 合并两个集合，已在同一集合时返回 false
    pub fn union(&mut self, u: VertexId, v: VertexId) -> bool {
        let mut left = self.find(u).index();
        let mut right = self.find(v).index();
        if left == right {
            return false;
        }

        if self.rank[left] < self.rank[right] {
            std::mem::swap(&mut left, &mut right);
        }
        self.parent[right] = left;
        if self.rank[left] == self.rank[right] {
            self.rank[left] = self.rank[left].saturating_add(1);
        }
        self.set_count -= 1;
        true
    }

    pub fn connected(&mut self, u: VertexId, v: VertexId) -> bool {
        self.find(u) == self.find(v)
    }

    /// 已加入的顶点数
    pub fn len(&self) -> usize {
        self.seen_count
    }

    pub fn is_empty(&self) -> bool {
        self.seen_count == 0
    }

    /// 当前集合数
    pub fn set_count(&self) -> usize {
        self.set_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn test_union_and_connected() {
        let mut forest = DisjointSetForest::new();

        assert!(!forest.connected(v(0), v(1)));
        assert!(forest.union(v(0), v(1)));
        assert!(forest.union(v(2), v(3)));
        assert!(forest.connected(v(1), v(0)));
        assert!(!forest.connected(v(1), v(3)));

        assert!(forest.union(v(1), v(3)));
        assert!(forest.connected(v(0), v(2)));
        assert!(!forest.union(v(0), v(3)));
    }

    #[test]
    fn test_lazy_admission() {
        let mut forest = DisjointSetForest::with_capacity(10);
        assert!(forest.is_empty());

        forest.find(v(5));
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.set_count(), 1);

        forest.union(v(2), v(5));
        assert_eq!(forest.len(), 2);
        assert_eq!(forest.set_count(), 1);

        forest.find(v(7));
        assert_eq!(forest.len(), 3);
        assert_eq!(forest.set_count(), 2);
    }

    #[test]
    fn test_equivalence_relation() {
        let mut forest = DisjointSetForest::new();
        let pairs = [(0, 1), (2, 3), (4, 5), (1, 2), (6, 6)];
        for (a, b) in pairs {
            forest.union(v(a), v(b));
        }

        // 自反、对称、传递
        for i in 0..7 {
            assert!(forest.connected(v(i), v(i)));
            for j in 0..7 {
                assert_eq!(forest.connected(v(i), v(j)), forest.connected(v(j), v(i)));
                for k in 0..7 {
                    if forest.connected(v(i), v(j)) && forest.connected(v(j), v(k)) {
                        assert!(forest.connected(v(i), v(k)));
                    }
                }
            }
        }
        assert_eq!(forest.set_count(), 3);
    }
}
