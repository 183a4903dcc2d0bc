//! Errors surfaced to callers of the inventory core.
//!
//! Single-entity operations abort on the first error. Batch imports catch these per
//! item instead (see [`ImportReport`](crate::importer::ImportReport)).
//!
//! Missing ingredients and stock shortfalls during production are not errors; they
//! are reported as [`DeductionNote`](crate::costing::DeductionNote)s.

use crate::converter::ConversionError;
use crate::model::ProductId;
use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// A required field is missing or invalid.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The repository could not complete the call.
    #[error("Repository failure: {0}")]
    Transport(String),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Setting this recipe would make the product consume itself.
    #[error("Recipe of {product} reaches itself through {ingredient}")]
    CyclicRecipe {
        product: ProductId,
        ingredient: ProductId,
    },
}

impl From<RepositoryError> for InventoryError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(id) => InventoryError::NotFound(id),
            RepositoryError::Rejected(msg) => InventoryError::Validation(msg),
            RepositoryError::Transport(msg) => InventoryError::Transport(msg),
        }
    }
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;
