use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue is empty")]
    Empty,
    #[error("failed to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },
}
