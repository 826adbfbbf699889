//! Environment error types.

/// Errors raised while building the environment pools.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentError {
    /// A pool was configured with no elements.
    #[error("{pool} pool must hold at least one element")]
    EmptyPool {
        /// Which pool was empty.
        pool: &'static str,
    },
}
