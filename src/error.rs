//! Error types for concatenation runs and secret generation

use std::io;
use std::path::PathBuf;
use std::str::Utf8Error;

use thiserror::Error;

/// Fatal errors that abort a concatenation run.
#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("cannot read root directory '{}': {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create output file '{}': {source}", path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write output file '{}': {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConcatError>;

/// A candidate file that could not be turned into text.
///
/// These never abort a run; the concatenator writes an inline annotation
/// in place of the file's marker block and moves on.
#[derive(Debug, Error)]
pub enum FileReadError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("invalid UTF-8: {0}")]
    Decode(#[from] Utf8Error),
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("operating system randomness unavailable: {0}")]
    Entropy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_error_messages() {
        let err = FileReadError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "denied");

        let bytes = [0x66, 0xFF];
        let utf8 = std::str::from_utf8(&bytes).unwrap_err();
        let err = FileReadError::from(utf8);
        assert!(err.to_string().starts_with("invalid UTF-8: "));
    }

    #[test]
    fn test_root_error_names_path() {
        let err = ConcatError::Root {
            path: PathBuf::from("./missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("./missing"), "got: {}", msg);
        assert!(msg.contains("No such file"), "got: {}", msg);
    }
}
