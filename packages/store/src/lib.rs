pub mod config;
pub mod models;
pub mod session;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use config::ConsoleConfig;
pub use models::{AuthUser, Role};
pub use session::{AuthSession, KeyValueStore, SessionStore, AUTH_STORAGE_KEY};
