use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Missing, non-integer or otherwise malformed invocation.
    #[error("Usage: {program} n")]
    InvalidArgument { program: String },

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// A reader closing stdout early is not a failure of ours.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, CliError::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
