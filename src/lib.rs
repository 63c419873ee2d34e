//! treecat - concatenate a source tree into one annotated file, and mint
//! URL-safe session secrets

pub mod concat;
pub mod error;
pub mod secret;
pub mod summary;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use concat::{ConcatRequest, ExclusionSet, ExtensionFilter, Preset, concatenate};
pub use error::{ConcatError, FileReadError, SecretError};
pub use secret::{DEFAULT_SECRET_BYTES, generate_secret};
pub use summary::{ConcatSummary, print_summary, print_summary_json};
