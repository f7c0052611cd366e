//! HTTP handlers for the profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    GetProfileHandler, GetProfileQuery, MergeProfileCommand, MergeProfileHandler,
    RefineProfileCommand, RefineProfileHandler, ResetProfileCommand, ResetProfileHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

use super::dto::{ErrorResponse, MergeProfileRequest, RefineProfileRequest, RefineProfileResponse};

/// Shared handler state for the profile router.
#[derive(Clone)]
pub struct ProfileHandlers {
    merge: Arc<MergeProfileHandler>,
    refine: Arc<RefineProfileHandler>,
    get: Arc<GetProfileHandler>,
    reset: Arc<ResetProfileHandler>,
}

impl ProfileHandlers {
    pub fn new(
        merge: Arc<MergeProfileHandler>,
        refine: Arc<RefineProfileHandler>,
        get: Arc<GetProfileHandler>,
        reset: Arc<ResetProfileHandler>,
    ) -> Self {
        Self {
            merge,
            refine,
            get,
            reset,
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, Response> {
    UserId::new(raw).map_err(|reason| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(reason)),
        )
            .into_response()
    })
}

/// POST /api/profile/merge
pub async fn merge_profile(
    State(handlers): State<ProfileHandlers>,
    Json(req): Json<MergeProfileRequest>,
) -> Response {
    let user_id = match parse_user_id(&req.user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = MergeProfileCommand {
        user_id,
        samples: req.sources,
    };

    match handlers.merge.handle(cmd).await {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/profile/refine
pub async fn refine_profile(
    State(handlers): State<ProfileHandlers>,
    Json(req): Json<RefineProfileRequest>,
) -> Response {
    let user_id = match parse_user_id(&req.user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RefineProfileCommand {
        user_id,
        current_profile: req.current_profile,
        new_messages: req.new_messages,
    };

    match handlers.refine.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(RefineProfileResponse {
                updated_profile: result.profile,
                delta_report: result.delta,
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/profile/:user_id
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    Path(raw_user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetProfileQuery { user_id }).await {
        Ok(Some(profile)) => (StatusCode::OK, Json(profile)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(&raw_user_id)),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// DELETE /api/profile/:user_id
pub async fn reset_profile(
    State(handlers): State<ProfileHandlers>,
    Path(raw_user_id): Path<String>,
) -> Response {
    let user_id = match parse_user_id(&raw_user_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.reset.handle(ResetProfileCommand { user_id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Maps a domain error onto a status code and uniform error body.
fn domain_error_response(error: DomainError) -> Response {
    let status = match error.code() {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::ProfileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::AnalysisFailed | ErrorCode::StorageError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_maps_to_400() {
        let error = DomainError::validation("sources", "too many samples");
        let response = domain_error_response(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rate_limit_maps_to_429() {
        let response = domain_error_response(DomainError::rate_limited(10));
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = DomainError::new(ErrorCode::ProfileNotFound, "missing");
        let response = domain_error_response(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_error_maps_to_500() {
        let error = DomainError::new(ErrorCode::StorageError, "disk full");
        let response = domain_error_response(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
