use super::{NodeIdx, NodeStore};

/// Cache of the canonical empty node per level.
///
/// Must be cleared whenever the store is swept: the cached handles are not
/// GC roots, so a sweep may free the higher levels.
pub(crate) struct BlankNodes {
    data: Vec<NodeIdx>,
}

impl BlankNodes {
    pub(crate) fn new() -> Self {
        Self { data: vec![] }
    }

    pub(crate) fn get(&mut self, level: u32, store: &mut NodeStore) -> NodeIdx {
        let i = level as usize;
        let v = &mut self.data;
        while v.len() <= i {
            if let Some(&b) = v.last() {
                let l = v.len() as u32;
                v.push(store.find_or_create_inner(b, b, b, b, l));
            } else {
                v.push(store.find_or_create_leaf(false));
            }
        }
        v[i]
    }

    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}
