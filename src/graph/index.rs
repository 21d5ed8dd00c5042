//! 顶点索引
//!
//! 键到顶点 ID 的双向映射，ID 即键的插入序号

use crate::graph::vertex::VertexId;
use crate::types::VertexKey;
use indexmap::IndexSet;

/// 顶点索引
#[derive(Debug, Clone)]
pub struct VertexIndex<K> {
    /// 按首次引用顺序排列的键
    keys: IndexSet<K>,
}

impl<K: VertexKey> VertexIndex<K> {
    /// 创建新索引
    pub fn new() -> Self {
        Self {
            keys: IndexSet::new(),
        }
    }

    /// 查找键，不存在时分配新 ID
    ///
    /// 返回 ID 以及是否为新建
    pub fn get_or_insert(&mut self, key: K) -> (VertexId, bool) {
        let (idx, inserted) = self.keys.insert_full(key);
        (VertexId::new(idx), inserted)
    }

    /// 通过键查找顶点
    pub fn get(&self, key: &K) -> Option<VertexId> {
        self.keys.get_index_of(key).map(VertexId::new)
    }

    /// 通过顶点查找键
    pub fn key(&self, id: VertexId) -> Option<&K> {
        self.keys.get_index(id.index())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    pub fn contains_id(&self, id: VertexId) -> bool {
        id.index() < self.keys.len()
    }

    /// 获取顶点数量
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// 按 ID 顺序遍历 (ID, 键)
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &K)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, k)| (VertexId::new(i), k))
    }
}

impl<K: VertexKey> Default for VertexIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_ids_follow_insertion_order() {
        let mut index = VertexIndex::new();

        assert_eq!(index.get_or_insert("b"), (VertexId::new(0), true));
        assert_eq!(index.get_or_insert("a"), (VertexId::new(1), true));
        assert_eq!(index.get_or_insert("b"), (VertexId::new(0), false));

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&"a"), Some(VertexId::new(1)));
        assert_eq!(index.key(VertexId::new(0)), Some(&"b"));
        assert_eq!(index.key(VertexId::new(5)), None);
        assert!(!index.contains(&"c"));
    }
}
