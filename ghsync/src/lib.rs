#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod inventory;
pub mod reconcile;
pub mod runner;
pub mod summary;
pub mod tree;
pub mod vcs;

pub use config::{
    read_git_config_user, resolve_base_dir, ConfigError, SyncConfig, SyncSettings, BASE_DIR_ENV,
};
pub use inventory::{
    enrich_with_parents, fetch_inventory, GitHubInventory, InventoryError, RemoteRepository,
    RepositoryInventory,
};
pub use reconcile::{select_clone_url, ReconcileError, Reconciler, SyncDecision};
pub use runner::{Runner, RunnerError};
pub use summary::{OperationKind, OperationResult, OperationStatus, RunSummary};
pub use tree::{LocalState, TreeError};
pub use vcs::{GitCli, VcsError, VcsExecutor, UPSTREAM_REMOTE};
