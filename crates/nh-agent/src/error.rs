use nh_core::AgentId;
use nh_env::EnvError;
use nh_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    /// `act` or `update` ran without a preceding `perceive` this tick.
    #[error("{0} acted before perceiving")]
    NotPerceived(AgentId),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Env(#[from] EnvError),
}

pub type AgentResult<T> = Result<T, AgentError>;
