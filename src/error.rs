use crate::config::ConfigError;
use crate::dashboard::DashboardError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum VitalsError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("dashboard error: {0}")]
    Dashboard(#[from] DashboardError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
    #[error("failed to bind server: {0}")]
    Bind(#[from] warp::Error),
    #[error("server task failed: {0}")]
    Server(#[from] tokio::task::JoinError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
