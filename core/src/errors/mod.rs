//! Collaborator error types and their translation into the API error taxonomy.

mod provider;
mod storage;
pub mod transform;


pub use provider::{IdentityError, MediaHostError};
pub use storage::{StorageError, StorageErrorCode, StorageResult};
pub use transform::{classify, Rule, RULES};

pub use pz_shared::errors::{ApiError, ApiResult, ErrorKind};
