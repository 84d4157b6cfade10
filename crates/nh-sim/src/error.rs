use nh_agent::AgentError;
use nh_core::CoreError;
use nh_env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration; raised by `SimBuilder::build` before any tick.
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match navigator count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Config(msg) => SimError::Config(msg),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
