use crate::quadtree::QuadNode;

/// When the universe runs its garbage collector.
///
/// Exactly one trigger is active per universe. A generational trigger keeps
/// per-step cost smooth (useful when every generation is rendered); a node
/// threshold lets the store run hotter between sweeps, which is faster for
/// headless simulation at the price of a larger peak footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GcPolicy {
    /// Sweep after this many generations.
    EveryGenerations(u64),
    /// Sweep whenever the store holds more than this many live nodes.
    NodeThreshold(usize),
}

impl Default for GcPolicy {
    fn default() -> Self {
        GcPolicy::NodeThreshold(100_000)
    }
}

/// Constructor parameters for [`Universe`](crate::Universe).
#[derive(Clone, Debug)]
pub struct UniverseConfig {
    pub gc_policy: GcPolicy,
    /// Upper bound on node-store memory, in MiB. Interning fails once the
    /// budget is exhausted; see [`Universe::step`](crate::Universe::step).
    pub mem_limit_mib: u32,
    /// How many powers of two to precompute for display-list arithmetic.
    /// Levels beyond the table still work, each lookup just pays for a
    /// fresh big-integer shift.
    pub pow2_table_levels: usize,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            gc_policy: GcPolicy::default(),
            mem_limit_mib: 256,
            pow2_table_levels: 68,
        }
    }
}

impl UniverseConfig {
    pub(crate) fn max_nodes(&self) -> usize {
        ((self.mem_limit_mib as u64) << 20) as usize / std::mem::size_of::<QuadNode>()
    }
}
