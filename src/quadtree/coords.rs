use super::{NodeIdx, NodeStore};
use num_bigint::BigInt;

/// Precomputed big-integer powers of two for display-list arithmetic.
///
/// Lookups past the precomputed range still work; they just pay for a
/// fresh shift each time instead of a clone.
pub(crate) struct Pow2Table {
    table: Vec<BigInt>,
}

impl Pow2Table {
    pub(crate) fn new(levels: usize) -> Self {
        let mut table = Vec::with_capacity(levels);
        let mut value = BigInt::from(1);
        for _ in 0..levels {
            table.push(value.clone());
            value <<= 1;
        }
        Self { table }
    }

    pub(crate) fn get(&self, exp: u32) -> BigInt {
        match self.table.get(exp as usize) {
            Some(v) => v.clone(),
            None => BigInt::from(1) << exp,
        }
    }
}

impl NodeStore {
    /// Returns a new canonical root equal to `idx` with the cell at (x, y)
    /// forced alive. Coordinates are relative to the node's center, x
    /// growing eastward and y southward; the caller must already have
    /// expanded the node so that (x, y) falls inside its region.
    ///
    /// `i128` covers every offset reachable here: insertion coordinates
    /// are bounded to `i64` at ingestion, so the walk never starts above
    /// level 66.
    pub(crate) fn set_cell(&mut self, idx: NodeIdx, x: i128, y: i128) -> NodeIdx {
        if self.poisoned() {
            return NodeIdx::NULL;
        }
        let (level, children) = {
            let n = self.get(idx);
            (n.level, n.children())
        };
        if level == 0 {
            return self.find_or_create_leaf(true);
        }
        let half = 1i128 << (level - 1);
        debug_assert!((-half..half).contains(&x) && (-half..half).contains(&y));
        let offset = if level == 1 { 0 } else { 1i128 << (level - 2) };
        let [mut nw, mut ne, mut sw, mut se] = children;
        if x < 0 {
            if y < 0 {
                nw = self.set_cell(nw, x + offset, y + offset);
            } else {
                sw = self.set_cell(sw, x + offset, y - offset);
            }
        } else if y < 0 {
            ne = self.set_cell(ne, x - offset, y + offset);
        } else {
            se = self.set_cell(se, x - offset, y - offset);
        }
        self.find_or_create_inner(nw, ne, sw, se, level)
    }

    /// Appends the coordinates of every live cell under `idx`, taking
    /// (x, y) as the node's center in image space.
    ///
    /// Only populated children are descended into, so whole empty regions
    /// cost nothing. A level-1 node's four leaves occupy
    /// {origin - 1, origin} on each axis: the west/north side shifts by
    /// one, the east/south side not at all.
    pub(crate) fn collect_cells(
        &self,
        idx: NodeIdx,
        x: &BigInt,
        y: &BigInt,
        pow2: &Pow2Table,
        out: &mut Vec<(BigInt, BigInt)>,
    ) {
        let node = self.get(idx);
        if node.level == 0 {
            if node.alive {
                out.push((x.clone(), y.clone()));
            }
            return;
        }
        let (west, east, north, south) = if node.level == 1 {
            let one = BigInt::from(1);
            (x - &one, x.clone(), y - &one, y.clone())
        } else {
            let offset = pow2.get(node.level - 2);
            (x - &offset, x + &offset, y - &offset, y + &offset)
        };
        if self.get(node.nw).alive {
            self.collect_cells(node.nw, &west, &north, pow2, out);
        }
        if self.get(node.ne).alive {
            self.collect_cells(node.ne, &east, &north, pow2, out);
        }
        if self.get(node.sw).alive {
            self.collect_cells(node.sw, &west, &south, pow2, out);
        }
        if self.get(node.se).alive {
            self.collect_cells(node.se, &east, &south, pow2, out);
        }
    }
}
