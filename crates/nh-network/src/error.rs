//! Network-subsystem error type.

use thiserror::Error;

use nh_core::VertexId;

/// Errors produced by `nh-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("no path from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },

    #[error("vertex {0} not found in network")]
    VertexNotFound(VertexId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
