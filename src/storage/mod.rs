pub mod json_backend;

use crate::activity::SponsorshipHistory;
use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Supplies the sponsorship history of one target account, wherever it
/// comes from.
pub trait SponsorshipSource: Send + Sync {
    fn load_history(&self) -> Result<SponsorshipHistory>;

    /// Short human-readable description of where the history comes from.
    fn describe(&self) -> String;
}

pub use json_backend::{
    load_document_from_path, save_document_to_path, JsonFileSource, SponsorshipDocument,
};
