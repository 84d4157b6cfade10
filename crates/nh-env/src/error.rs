use nh_core::VertexId;
use nh_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    /// `restore_vertex` on a vertex that is not ill.  A caller logic error;
    /// never retried.
    #[error("invalid state: vertex {0} is not ill")]
    InvalidState(VertexId),

    #[error("vertex {0} is already ill")]
    AlreadyIll(VertexId),

    #[error("cannot infect {vertex}: {max} vertices already ill")]
    IllnessCapacity { vertex: VertexId, max: usize },

    #[error("factory location {0} is not in the network")]
    FactoryOutsideNetwork(VertexId),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

pub type EnvResult<T> = Result<T, EnvError>;
