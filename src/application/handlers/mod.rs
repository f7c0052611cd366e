//! Application command and query handlers.
//!
//! Each handler wires domain algorithms to ports and owns the mapping
//! from infrastructure errors to [`DomainError`].

pub mod get_profile;
pub mod merge_profile;
pub mod refine_profile;
pub mod reset_profile;

pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use merge_profile::{MergeProfileCommand, MergeProfileHandler, MAX_SAMPLES};
pub use refine_profile::{RefineProfileCommand, RefineProfileHandler, RefineProfileResult};
pub use reset_profile::{ResetProfileCommand, ResetProfileHandler};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{RateLimitError, StoreError};

pub(crate) fn storage_error(err: StoreError) -> DomainError {
    DomainError::new(ErrorCode::StorageError, err.to_string())
}

pub(crate) fn limiter_error(err: RateLimitError) -> DomainError {
    DomainError::new(ErrorCode::InternalError, err.to_string())
}
