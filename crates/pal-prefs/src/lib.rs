//! Persisted package-manager preference for paldocs.
//!
//! Install commands are shown for npm, yarn and pnpm; the reader's choice
//! is remembered and shared by every command block:
//! - [`PackageManager`] is the choice itself (default `pnpm`)
//! - [`PackageCommands`] holds one command per manager
//! - [`PreferenceStore`] loads, persists and broadcasts the choice
//! - [`PreferenceBackend`] is the persistence seam, with [`MemoryBackend`]
//!   and [`FileBackend`] implementations
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pal_prefs::{MemoryBackend, PackageCommands, PackageManager, PreferenceStore};
//!
//! let store = PreferenceStore::new(Arc::new(MemoryBackend::new()));
//! store.load();
//! store.set(PackageManager::Yarn);
//!
//! let commands = PackageCommands::cli_installation();
//! assert_eq!(commands.command_for(store.get()), "yarn global add @paljs/cli");
//! ```

mod backend;
mod commands;
mod error;
mod manager;
mod store;

pub use backend::{FileBackend, MemoryBackend, PreferenceBackend};
pub use commands::PackageCommands;
pub use error::PreferenceError;
pub use manager::PackageManager;
pub use store::{PreferenceStore, STORAGE_KEY, Subscription};
