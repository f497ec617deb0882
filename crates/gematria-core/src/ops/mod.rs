pub mod memory_store;
pub mod store;

pub use memory_store::MemoryEntryStore;
pub use store::{EntryStore, StoreHealth};
