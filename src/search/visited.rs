//! 持久化节点集合
//!
//! 以节点下标为键的 16 叉位图字典树，叶子是 64 位位图。插入只复制根到叶子的
//! 一条路径，其余子树与旧集合共享，因此每条路径可以廉价地携带自己访问过的节点。

use std::sync::Arc;

const LEAF_BITS: u32 = 6;
const BRANCH_BITS: u32 = 4;
const FANOUT: usize = 1 << BRANCH_BITS;

enum Trie {
    Leaf(u64),
    Branch([Option<Arc<Trie>>; FANOUT]),
}

#[derive(Clone, Default)]
pub(crate) struct NodeSet {
    root: Option<Arc<Trie>>,
    /// 分支层数，容量为 64 * 16^depth
    depth: u32,
}

impl NodeSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `depth` 层分支能否容纳 `id`
    fn fits(id: usize, depth: u32) -> bool {
        match 1usize.checked_shl(LEAF_BITS + BRANCH_BITS * depth) {
            Some(capacity) => id < capacity,
            None => true,
        }
    }

    fn slot(id: usize, level: u32) -> usize {
        (id >> (LEAF_BITS + BRANCH_BITS * (level - 1))) & (FANOUT - 1)
    }

    pub(crate) fn contains(&self, id: usize) -> bool {
        if !Self::fits(id, self.depth) {
            return false;
        }
        let mut current = self.root.as_deref();
        let mut level = self.depth;
        while let Some(trie) = current {
            match trie {
                Trie::Leaf(bits) => return bits & (1u64 << (id & 63)) != 0,
                Trie::Branch(children) => {
                    current = children[Self::slot(id, level)].as_deref();
                    level -= 1;
                }
            }
        }
        false
    }

    /// 返回包含 `id` 的新集合，原集合不变
    pub(crate) fn insert(&self, id: usize) -> Self {
        if self.contains(id) {
            return self.clone();
        }
        let mut root = self.root.clone();
        let mut depth = self.depth;
        while !Self::fits(id, depth) {
            // 旧根成为新根的第 0 个子树
            let mut children: [Option<Arc<Trie>>; FANOUT] = Default::default();
            children[0] = root.take();
            root = Some(Arc::new(Trie::Branch(children)));
            depth += 1;
        }
        Self {
            root: Some(Self::insert_at(root.as_ref(), depth, id)),
            depth,
        }
    }

    fn insert_at(node: Option<&Arc<Trie>>, level: u32, id: usize) -> Arc<Trie> {
        if level == 0 {
            let bits = match node.map(|n| &**n) {
                Some(Trie::Leaf(bits)) => *bits,
                _ => 0,
            };
            return Arc::new(Trie::Leaf(bits | (1u64 << (id & 63))));
        }
        let mut children = match node.map(|n| &**n) {
            Some(Trie::Branch(children)) => children.clone(),
            _ => Default::default(),
        };
        let slot = Self::slot(id, level);
        let child = Self::insert_at(children[slot].as_ref(), level - 1, id);
        children[slot] = Some(child);
        Arc::new(Trie::Branch(children))
    }
}
