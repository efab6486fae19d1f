use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelerError {
    #[error("failed to create label window: {0}")]
    WindowCreation(String),

    #[error("work area watcher failed: {0}")]
    Watcher(String),
}
