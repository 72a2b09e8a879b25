mod blank;
mod coords;
mod evolve;
mod node;
mod store;

pub(crate) use blank::BlankNodes;
pub(crate) use coords::Pow2Table;
pub(crate) use node::{NodeIdx, QuadNode};
pub(crate) use store::NodeStore;
