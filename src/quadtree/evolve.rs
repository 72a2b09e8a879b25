use super::{NodeIdx, NodeStore};

/// Conway's rule for one cell with `neighbors` live cells around it.
fn next_state(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

impl NodeStore {
    /// One-generation successor of `idx`: the canonical node one level down
    /// representing the center half-sized region advanced one step.
    ///
    /// Requires level >= 2; the stepper expands the root before asking.
    /// Results are memoized per node, and because nodes are canonical the
    /// memo is shared by every occurrence of the structure in the tree.
    pub(crate) fn evolve(&mut self, idx: NodeIdx) -> NodeIdx {
        if self.poisoned() {
            return NodeIdx::NULL;
        }
        let (level, alive, has_memo, memo, nw) = {
            let n = self.get(idx);
            (n.level, n.alive, n.has_memo, n.memo, n.nw)
        };
        assert!(level >= 2, "evolve requires a node of level >= 2");
        if has_memo {
            return memo;
        }
        let result = if !alive {
            // a dead region stays dead; its center is the empty node one level down
            nw
        } else if level == 2 {
            self.evolve_level2(idx)
        } else {
            self.evolve_level_n(idx)
        };
        if !self.poisoned() {
            self.set_memo(idx, result);
        }
        result
    }

    /// Base case: the four center cells of a 4x4 region each have their
    /// whole Moore neighborhood inside the region, so the rule applies
    /// directly and yields a level-1 node.
    fn evolve_level2(&mut self, idx: NodeIdx) -> NodeIdx {
        let cells = self.level2_cells(idx);
        let count = |cx: usize, cy: usize| -> u8 {
            let mut sum = 0;
            for y in cy - 1..=cy + 1 {
                for x in cx - 1..=cx + 1 {
                    if (x, y) != (cx, cy) && cells[y][x] {
                        sum += 1;
                    }
                }
            }
            sum
        };
        let mut next = [NodeIdx::NULL; 4];
        for (slot, (x, y)) in next.iter_mut().zip([(1, 1), (2, 1), (1, 2), (2, 2)]) {
            *slot = self.find_or_create_leaf(next_state(cells[y][x], count(x, y)));
        }
        let [nw, ne, sw, se] = next;
        self.find_or_create_inner(nw, ne, sw, se, 1)
    }

    /// Cells of a level-2 node as `cells[y][x]`, row 0 northmost.
    fn level2_cells(&self, idx: NodeIdx) -> [[bool; 4]; 4] {
        let node = self.get(idx);
        debug_assert_eq!(node.level, 2);
        let mut cells = [[false; 4]; 4];
        for (qi, &quad) in node.children().iter().enumerate() {
            let (qx, qy) = ((qi & 1) * 2, (qi >> 1) * 2);
            for (li, &leaf) in self.get(quad).children().iter().enumerate() {
                cells[qy + (li >> 1)][qx + (li & 1)] = self.get(leaf).alive;
            }
        }
        cells
    }

    /// Recursive case: nine overlapping regions two levels down are
    /// reassembled into four overlapping quarters, each evolved one step,
    /// and the four results form the successor.
    fn evolve_level_n(&mut self, idx: NodeIdx) -> NodeIdx {
        let level = self.get(idx).level;
        let nine = self.inner_regions(idx);
        let mut quarters = self.overlapping_quarters(&nine, level - 1);
        for q in quarters.iter_mut() {
            *q = self.evolve(*q);
        }
        let [nw, ne, sw, se] = quarters;
        self.find_or_create_inner(nw, ne, sw, se, level - 1)
    }

    /// The nine overlapping sub-regions of `idx`, each two levels down,
    /// laid out row-major: NW N NE / W C E / SW S SE.
    fn inner_regions(&mut self, idx: NodeIdx) -> [NodeIdx; 9] {
        let (level, quads) = {
            let n = self.get(idx);
            (n.level - 2, n.children())
        };
        let [[nwnw, nwne, nwsw, nwse], [nenw, nene, nesw, nese], [swnw, swne, swsw, swse], [senw, sene, sesw, sese]] =
            quads.map(|q| self.get(q).children());

        [
            [nwnw, nwne, nwsw, nwse],
            [nwne, nenw, nwse, nesw],
            [nenw, nene, nesw, nese],
            [nwsw, nwse, swnw, swne],
            [nwse, nesw, swne, senw],
            [nesw, nese, senw, sene],
            [swnw, swne, swsw, swse],
            [swne, senw, swse, sesw],
            [senw, sene, sesw, sese],
        ]
        .map(|[nw, ne, sw, se]| {
            let (nw, ne, sw, se) = (
                self.get(nw).se,
                self.get(ne).sw,
                self.get(sw).ne,
                self.get(se).nw,
            );
            self.find_or_create_inner(nw, ne, sw, se, level)
        })
    }

    fn overlapping_quarters(&mut self, nine: &[NodeIdx; 9], level: u32) -> [NodeIdx; 4] {
        [
            self.find_or_create_inner(nine[0], nine[1], nine[3], nine[4], level),
            self.find_or_create_inner(nine[1], nine[2], nine[4], nine[5], level),
            self.find_or_create_inner(nine[3], nine[4], nine[6], nine[7], level),
            self.find_or_create_inner(nine[4], nine[5], nine[7], nine[8], level),
        ]
    }
}
