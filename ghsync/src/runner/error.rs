//! Runner error types.

/// Errors that abort a sync run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Authentication or listing errors.
    #[error(transparent)]
    Inventory(#[from] crate::inventory::InventoryError),

    /// Local tree errors.
    #[error(transparent)]
    Reconcile(#[from] crate::reconcile::ReconcileError),
}
