// kidcatch_store: persistence for created games.
//
// Module overview:
// - `record.rs`:  `NewGame` (creator input) and `GameRecord` (stored form,
//                 counters, soft-delete marker), plus the player-facing view.
// - `store.rs`:   `GameStore` trait, the shared `GameTable` semantics, and
//                 the mutex-guarded `MemoryStore`.
// - `file.rs`:    `JsonFileStore`, the same table persisted to one JSON file
//                 with atomic temp-file replacement.
// - `error.rs`:   `StoreError`.
//
// Stores are `Send + Sync` and shared behind an `Arc<dyn GameStore>` by the
// server's worker threads.

pub mod error;
pub mod file;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use record::{GameRecord, NewGame};
pub use store::{GameStore, MemoryStore};
