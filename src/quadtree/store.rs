use super::{NodeIdx, QuadNode};
use num_bigint::BigUint;

const INITIAL_BUCKETS: usize = 1 << 13;

/// Canonicalizing store for quadtree nodes.
///
/// Every distinct node has exactly one slot; structural lookups reduce to
/// handle comparisons on the (already canonical) children plus a level
/// check. Collisions are resolved by chaining through the nodes' intrusive
/// `chain` field, and the bucket array doubles at 3/4 load.
///
/// The store has a fixed node budget. Once it is exhausted the store is
/// `poisoned`: interning returns [`NodeIdx::NULL`] and allocates nothing
/// until a sweep frees space. Callers check the flag at phase boundaries
/// instead of threading a `Result` through the hot recursion.
pub(crate) struct NodeStore {
    /// slot 0 is reserved as the null sentinel
    nodes: Vec<QuadNode>,
    /// heads of the per-bucket chains; length is a power of two
    buckets: Vec<NodeIdx>,
    /// slots released by the last sweep, reused before the vector grows
    free: Vec<NodeIdx>,
    len: usize,
    max_nodes: usize,
    poisoned: bool,
    created_total: u64,
    leaf_dead: NodeIdx,
    leaf_alive: NodeIdx,
}

impl NodeStore {
    pub(crate) fn new(max_nodes: usize) -> Self {
        assert!(INITIAL_BUCKETS.is_power_of_two());
        let mut store = Self {
            nodes: vec![QuadNode::default()],
            buckets: vec![NodeIdx::NULL; INITIAL_BUCKETS],
            free: vec![],
            len: 0,
            max_nodes: max_nodes.max(16),
            poisoned: false,
            created_total: 0,
            leaf_dead: NodeIdx::NULL,
            leaf_alive: NodeIdx::NULL,
        };
        // The two leaf handles exist for the lifetime of the store; they
        // sit outside the bucket chains and every sweep pins them.
        store.leaf_dead = store.alloc(QuadNode {
            in_use: true,
            ..QuadNode::default()
        });
        store.leaf_alive = store.alloc(QuadNode {
            population: BigUint::from(1u8),
            alive: true,
            in_use: true,
            ..QuadNode::default()
        });
        store
    }

    #[inline]
    pub(crate) fn get(&self, idx: NodeIdx) -> &QuadNode {
        &self.nodes[idx.0 as usize]
    }

    pub(crate) fn set_memo(&mut self, idx: NodeIdx, memo: NodeIdx) {
        let n = &mut self.nodes[idx.0 as usize];
        debug_assert!(!n.has_memo || n.memo == memo);
        n.memo = memo;
        n.has_memo = true;
    }

    /// The canonical leaf handle for the given cell state.
    pub(crate) fn find_or_create_leaf(&self, alive: bool) -> NodeIdx {
        if alive {
            self.leaf_alive
        } else {
            self.leaf_dead
        }
    }

    /// The canonical inner node with the given children.
    ///
    /// All four children must be canonical handles of level `level - 1`;
    /// violating that is a programmer error and panics.
    pub(crate) fn find_or_create_inner(
        &mut self,
        nw: NodeIdx,
        ne: NodeIdx,
        sw: NodeIdx,
        se: NodeIdx,
        level: u32,
    ) -> NodeIdx {
        if self.poisoned {
            return NodeIdx::NULL;
        }
        assert!(level >= 1, "inner nodes start at level 1");
        debug_assert!(
            [nw, ne, sw, se]
                .iter()
                .all(|&c| self.get(c).in_use && self.get(c).level == level - 1),
            "children of a level-{} node must be canonical level-{} handles",
            level,
            level - 1
        );

        let hash = QuadNode::hash(level, nw, ne, sw, se);
        let bucket = hash & (self.buckets.len() - 1);
        let mut idx = self.buckets[bucket];
        while idx != NodeIdx::NULL {
            let n = self.get(idx);
            if n.level == level && n.nw == nw && n.ne == ne && n.sw == sw && n.se == se {
                return idx;
            }
            idx = n.chain;
        }

        if self.len >= self.max_nodes {
            self.poisoned = true;
            return NodeIdx::NULL;
        }

        let population = self.get(nw).population.clone()
            + &self.get(ne).population
            + &self.get(sw).population
            + &self.get(se).population;
        let node = QuadNode {
            nw,
            ne,
            sw,
            se,
            chain: self.buckets[bucket],
            memo: NodeIdx::NULL,
            level,
            alive: population != BigUint::ZERO,
            population,
            has_memo: false,
            in_use: true,
            marked: false,
        };
        let idx = self.alloc(node);
        self.buckets[bucket] = idx;
        if self.len > self.buckets.len() * 3 / 4 {
            self.rehash();
        }
        idx
    }

    fn alloc(&mut self, node: QuadNode) -> NodeIdx {
        self.len += 1;
        self.created_total += 1;
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx.0 as usize] = node;
                idx
            }
            None => {
                let idx = NodeIdx(u32::try_from(self.nodes.len()).expect("u32 is insufficient"));
                self.nodes.push(node);
                idx
            }
        }
    }

    fn rehash(&mut self) {
        let new_size = self.buckets.len() << 1;
        self.buckets = vec![NodeIdx::NULL; new_size];
        for i in 1..self.nodes.len() {
            let n = &self.nodes[i];
            if !n.in_use || n.level == 0 {
                continue;
            }
            let bucket = QuadNode::hash(n.level, n.nw, n.ne, n.sw, n.se) & (new_size - 1);
            self.nodes[i].chain = self.buckets[bucket];
            self.buckets[bucket] = NodeIdx(i as u32);
        }
    }

    /// Mark-and-sweep reclamation: retains exactly the transitive closure
    /// of `{nw, ne, sw, se, memo}` from the given roots and frees the rest.
    ///
    /// The memo edge is first-class here; dropping it would leave surviving
    /// nodes pointing at reclaimed successors. Sweeping clears poisoning.
    pub(crate) fn sweep<I: IntoIterator<Item = NodeIdx>>(&mut self, roots: I) {
        let mut stack: Vec<NodeIdx> = vec![self.leaf_dead, self.leaf_alive];
        stack.extend(roots);
        while let Some(idx) = stack.pop() {
            if idx == NodeIdx::NULL {
                continue;
            }
            let n = &mut self.nodes[idx.0 as usize];
            if n.marked || !n.in_use {
                continue;
            }
            n.marked = true;
            if n.level > 0 {
                stack.extend([n.nw, n.ne, n.sw, n.se]);
            }
            if n.has_memo {
                stack.push(n.memo);
            }
        }

        self.buckets.iter_mut().for_each(|b| *b = NodeIdx::NULL);
        self.free.clear();
        let mut live = 0;
        for i in 1..self.nodes.len() {
            if self.nodes[i].in_use && self.nodes[i].marked {
                self.nodes[i].marked = false;
                live += 1;
                if self.nodes[i].level > 0 {
                    let n = &self.nodes[i];
                    let bucket =
                        QuadNode::hash(n.level, n.nw, n.ne, n.sw, n.se) & (self.buckets.len() - 1);
                    self.nodes[i].chain = self.buckets[bucket];
                    self.buckets[bucket] = NodeIdx(i as u32);
                }
            } else {
                if self.nodes[i].in_use {
                    self.nodes[i] = QuadNode::default();
                }
                self.free.push(NodeIdx(i as u32));
            }
        }
        self.len = live;
        self.poisoned = false;
    }

    pub(crate) fn poisoned(&self) -> bool {
        self.poisoned
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn created_total(&self) -> u64 {
        self.created_total
    }

    pub(crate) fn bytes_total(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<QuadNode>()
            + self.buckets.capacity() * std::mem::size_of::<NodeIdx>()
            + self.free.capacity() * std::mem::size_of::<NodeIdx>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(store: &mut NodeStore, cells: [bool; 4]) -> NodeIdx {
        let [nw, ne, sw, se] = cells.map(|c| store.find_or_create_leaf(c));
        store.find_or_create_inner(nw, ne, sw, se, 1)
    }

    #[test]
    fn leaf_handles_are_constant() {
        let store = NodeStore::new(1 << 20);
        assert_eq!(store.find_or_create_leaf(true), store.find_or_create_leaf(true));
        assert_eq!(store.find_or_create_leaf(false), store.find_or_create_leaf(false));
        assert_ne!(store.find_or_create_leaf(true), store.find_or_create_leaf(false));
    }

    #[test]
    fn interning_is_canonical() {
        let mut store = NodeStore::new(1 << 20);
        let a = quad(&mut store, [true, false, false, true]);
        let b = quad(&mut store, [true, false, false, true]);
        assert_eq!(a, b);
        let c = quad(&mut store, [false, true, true, false]);
        assert_ne!(a, c, "rotated children must not collapse");
    }

    #[test]
    fn population_is_additive() {
        let mut store = NodeStore::new(1 << 20);
        let q1 = quad(&mut store, [true, true, false, false]);
        let q2 = quad(&mut store, [true, false, false, false]);
        let q3 = quad(&mut store, [false, false, false, false]);
        let parent = store.find_or_create_inner(q1, q2, q3, q1, 2);
        assert_eq!(store.get(parent).population, BigUint::from(5u8));
        assert!(store.get(parent).alive);
        assert!(!store.get(q3).alive);
    }

    #[test]
    fn sweep_retains_reachable_and_memo() {
        let mut store = NodeStore::new(1 << 20);
        let root = quad(&mut store, [true, true, true, false]);
        let successor = quad(&mut store, [false, true, false, false]);
        store.set_memo(root, successor);
        let garbage = quad(&mut store, [false, false, false, true]);

        let before = store.len();
        store.sweep([root]);
        assert_eq!(store.len(), before - 1);

        // survivors keep their identity and their memo
        let again = quad(&mut store, [true, true, true, false]);
        assert_eq!(again, root);
        assert!(store.get(root).has_memo);
        assert_eq!(store.get(root).memo, successor);

        // the freed slot is recycled for the next miss
        let fresh = quad(&mut store, [false, false, false, true]);
        assert_eq!(fresh, garbage);
    }

    #[test]
    fn exhaustion_poisons_and_sweep_recovers() {
        let mut store = NodeStore::new(16);
        let leaf = store.find_or_create_leaf(true);
        let mut tower = vec![store.find_or_create_inner(leaf, leaf, leaf, leaf, 1)];
        loop {
            let prev = *tower.last().unwrap();
            let level = store.get(prev).level + 1;
            let next = store.find_or_create_inner(prev, prev, prev, prev, level);
            if next == NodeIdx::NULL {
                break;
            }
            tower.push(next);
        }
        assert!(store.poisoned());

        store.sweep([tower[0]]);
        assert!(!store.poisoned());
        // two leaf handles plus the one retained inner node
        assert_eq!(store.len(), 3);
    }
}
