//! In-memory implementations of the collaborators the retrieval engine consumes.
//!
//! - `flat`: exact squared-L2 nearest-neighbour index
//! - `id_map`: index position → chunk id, paired with an index
//! - `store`: chunk records keyed by id, loadable from JSON Lines
//!
//! None of these persist anything; they are filled once at startup and read
//! concurrently afterwards.

pub mod flat;
pub mod id_map;
pub mod store;

pub use flat::FlatL2Index;
pub use id_map::IdMap;
pub use store::MemoryChunkStore;
