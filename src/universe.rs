use crate::config::{GcPolicy, UniverseConfig};
use crate::quadtree::{BlankNodes, NodeIdx, NodeStore, Pow2Table};
use anyhow::{anyhow, Result};
use num_bigint::{BigInt, BigUint};

/// The root never drops below this level; a level-3 root is the smallest
/// region the evolution recursion can be asked about after one expansion.
const MIN_LEVEL: u32 = 3;

/// An unbounded Game of Life board backed by a canonicalizing quadtree.
///
/// One universe owns one node store. Stepping advances exactly one
/// generation: the root is padded until every live cell has an empty ring
/// around it, evolved, shrunk back while the periphery is empty, and the
/// garbage collector runs when the configured policy asks for it.
///
/// Coordinates grow eastward in x and southward in y. Cell insertion is
/// bounded to `i64` coordinates; populations, the generation counter and
/// display coordinates are arbitrary-precision.
pub struct Universe {
    store: NodeStore,
    blanks: BlankNodes,
    pow2: Pow2Table,
    root: NodeIdx,
    generation: BigUint,
    origin_x: BigInt,
    origin_y: BigInt,
    gc_policy: GcPolicy,
    gens_since_gc: u64,
}

impl Universe {
    pub fn new() -> Self {
        Self::with_config(UniverseConfig::default())
    }

    pub fn with_config(config: UniverseConfig) -> Self {
        let mut store = NodeStore::new(config.max_nodes());
        let mut blanks = BlankNodes::new();
        let root = blanks.get(MIN_LEVEL, &mut store);
        Self {
            store,
            blanks,
            pow2: Pow2Table::new(config.pow2_table_levels),
            root,
            generation: BigUint::ZERO,
            origin_x: BigInt::ZERO,
            origin_y: BigInt::ZERO,
            gc_policy: config.gc_policy,
            gens_since_gc: 0,
        }
    }

    /// Sets one cell alive. Board setup API: call before stepping.
    pub fn set_cell_alive(&mut self, x: i64, y: i64) -> Result<()> {
        let (x, y) = (i128::from(x), i128::from(y));
        loop {
            let half = 1i128 << (self.level() - 1);
            if (-half..half).contains(&x) && (-half..half).contains(&y) {
                break;
            }
            self.expand();
            if self.store.poisoned() {
                return self.out_of_memory();
            }
        }
        let root = self.store.set_cell(self.root, x, y);
        if self.store.poisoned() {
            return self.out_of_memory();
        }
        self.root = root;
        Ok(())
    }

    /// Batch form of [`set_cell_alive`](Self::set_cell_alive).
    pub fn set_cells_alive<I: IntoIterator<Item = (i64, i64)>>(&mut self, cells: I) -> Result<()> {
        for (x, y) in cells {
            self.set_cell_alive(x, y)?;
        }
        Ok(())
    }

    /// Advances the universe by one generation.
    ///
    /// On failure (the node store hit its memory budget) the universe is
    /// left exactly as before the call: same root, same generation, same
    /// population. A sweep has already run, so retrying after raising the
    /// budget, or just accepting the error, are both fine.
    pub fn step(&mut self) -> Result<()> {
        if !self.store.get(self.root).alive {
            // nothing is born in an empty universe
            self.generation += 1u8;
            return Ok(());
        }
        while self.needs_expansion() {
            self.expand();
            if self.store.poisoned() {
                return self.out_of_memory();
            }
        }
        let evolved = self.store.evolve(self.root);
        if self.store.poisoned() {
            return self.out_of_memory();
        }
        self.root = evolved;
        self.compact();
        // evolving a level-3 root yields level 2; pad straight back
        while self.level() < MIN_LEVEL && !self.store.poisoned() {
            self.expand();
        }
        self.generation += 1u8;
        self.gens_since_gc += 1;
        let due = match self.gc_policy {
            GcPolicy::EveryGenerations(n) => self.gens_since_gc >= n,
            GcPolicy::NodeThreshold(t) => self.store.len() > t,
        };
        if due || self.store.poisoned() {
            self.collect_garbage();
        }
        Ok(())
    }

    /// Reclaims every node unreachable from the current root.
    ///
    /// Runs automatically according to the configured [`GcPolicy`]; public
    /// so hosts can force a sweep at a convenient moment (e.g. between
    /// frames).
    pub fn collect_garbage(&mut self) {
        self.store.sweep([self.root]);
        self.blanks.clear();
        self.gens_since_gc = 0;
    }

    pub fn generation(&self) -> BigUint {
        self.generation.clone()
    }

    pub fn population(&self) -> BigUint {
        self.store.get(self.root).population.clone()
    }

    /// The root covers a 2^level x 2^level region.
    pub fn level(&self) -> u32 {
        self.store.get(self.root).level
    }

    /// Live nodes currently in the store.
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Nodes materialized since the universe was created, including ones
    /// the garbage collector has since reclaimed.
    pub fn nodes_created(&self) -> u64 {
        self.store.created_total()
    }

    /// Approximate heap usage of the node store in bytes.
    pub fn bytes_total(&self) -> usize {
        self.store.bytes_total()
    }

    pub fn origin(&self) -> (&BigInt, &BigInt) {
        (&self.origin_x, &self.origin_y)
    }

    pub fn set_origin(&mut self, x: BigInt, y: BigInt) {
        self.origin_x = x;
        self.origin_y = y;
    }

    /// Every live cell, offset by the given origin. Complete and
    /// duplicate-free; order is unspecified.
    pub fn collect_display_list(
        &self,
        origin_x: &BigInt,
        origin_y: &BigInt,
    ) -> Vec<(BigInt, BigInt)> {
        let mut out = Vec::new();
        self.store
            .collect_cells(self.root, origin_x, origin_y, &self.pow2, &mut out);
        out
    }

    /// [`collect_display_list`](Self::collect_display_list) at the stored
    /// origin.
    pub fn display_list(&self) -> Vec<(BigInt, BigInt)> {
        self.collect_display_list(&self.origin_x, &self.origin_y)
    }

    /// True while a live cell could reach the root's border during
    /// evolution. Each quadrant must hold its whole population in the
    /// grand-sub-quadrant adjacent to the root center; anything else needs
    /// another ring of padding first.
    fn needs_expansion(&self) -> bool {
        let root = self.store.get(self.root);
        if root.level < MIN_LEVEL {
            return true;
        }
        let [nw, ne, sw, se] = root.children();
        let inner = [
            self.store.get(self.store.get(nw).se).se,
            self.store.get(self.store.get(ne).sw).sw,
            self.store.get(self.store.get(sw).ne).ne,
            self.store.get(self.store.get(se).nw).nw,
        ];
        root.children()
            .iter()
            .zip(inner)
            .any(|(&quad, center)| {
                self.store.get(quad).population != self.store.get(center).population
            })
    }

    /// Replaces the root with a node one level higher whose center is the
    /// old root and whose border is empty.
    fn expand(&mut self) {
        let level = self.level();
        let [nw, ne, sw, se] = self.store.get(self.root).children();
        let b = self.blanks.get(level - 1, &mut self.store);
        let nw = self.store.find_or_create_inner(b, b, b, nw, level);
        let ne = self.store.find_or_create_inner(b, b, ne, b, level);
        let sw = self.store.find_or_create_inner(b, sw, b, b, level);
        let se = self.store.find_or_create_inner(se, b, b, b, level);
        let root = self.store.find_or_create_inner(nw, ne, sw, se, level + 1);
        if !self.store.poisoned() {
            self.root = root;
        }
    }

    /// Shrinks the root to its center quarter while the 12 peripheral
    /// grand-sub-quadrants are empty, never dropping below `MIN_LEVEL`.
    fn compact(&mut self) {
        loop {
            let level = self.level();
            if level <= MIN_LEVEL {
                return;
            }
            let empty = self.blanks.get(level - 2, &mut self.store);
            let (peripheral_empty, center) = {
                let [nw, ne, sw, se] =
                    self.store.get(self.root).children().map(|q| self.store.get(q));
                let periphery = [
                    nw.nw, nw.ne, nw.sw, ne.nw, ne.ne, ne.se, sw.nw, sw.sw, sw.se, se.ne, se.sw,
                    se.se,
                ];
                (
                    periphery.iter().all(|&p| p == empty),
                    [nw.se, ne.sw, sw.ne, se.nw],
                )
            };
            if !peripheral_empty {
                return;
            }
            let [nw, ne, sw, se] = center;
            let root = self.store.find_or_create_inner(nw, ne, sw, se, level - 1);
            if self.store.poisoned() {
                return;
            }
            self.root = root;
        }
    }

    fn out_of_memory(&mut self) -> Result<()> {
        // drop whatever the failed attempt interned; the old root survives
        self.collect_garbage();
        Err(anyhow!(
            "node store exhausted its memory budget; raise mem_limit_mib or lower the gc threshold"
        ))
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}
