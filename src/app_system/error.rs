use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("{actor} actor task failed: {reason}")]
    ActorTaskFailed { actor: &'static str, reason: String },
    #[error(transparent)]
    Session(#[from] crate::checkout::SessionError),
}
