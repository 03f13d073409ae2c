pub mod ghost_list;
pub mod intrusive_list;
pub mod ordered_index;
#[cfg(feature = "concurrency")]
pub mod shard;
pub mod slot_arena;

pub use ghost_list::GhostList;
pub use intrusive_list::IntrusiveList;
pub use ordered_index::OrderedIndex;
#[cfg(feature = "concurrency")]
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
