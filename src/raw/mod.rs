mod arena;
mod handle;
mod node;
mod raw_rank_tree;

pub(crate) use raw_rank_tree::{RawRankTree, TraversalStack};
