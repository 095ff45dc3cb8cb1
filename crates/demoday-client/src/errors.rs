//! Collaborator error mapping
//!
//! The clients keep their own error types; workflows speak `AppError`.
//! Mapping lives here, at the bridge boundary, and follows the taxonomy:
//! no response → network, non-2xx → api (404 → not-found), everything
//! unexpected → internal.

use demoday_api::ApiError;
use demoday_app::errors::AppError;
use demoday_realtime::RealtimeError;

pub(crate) fn map_api_error(error: ApiError) -> AppError {
    match error {
        ApiError::Status {
            status_code: 404,
            ..
        } => AppError::not_found("resource"),
        ApiError::Status {
            status_code,
            message,
        } => AppError::api(status_code, message),
        ApiError::Transport(message) => AppError::network(message),
        ApiError::Decode(message) => AppError::internal("api decode", message),
        ApiError::InvalidRequest(message) => AppError::internal("api request", message),
    }
}

pub(crate) fn map_realtime_error(error: RealtimeError) -> AppError {
    match error {
        RealtimeError::Status {
            status: 404, ..
        } => AppError::not_found("collection"),
        RealtimeError::Status { status, message } => AppError::api(status, message),
        RealtimeError::Connect(message) | RealtimeError::Transport(message) => {
            AppError::network(message)
        }
        RealtimeError::Auth(message) => AppError::api(401, message),
        RealtimeError::Protocol(message) => AppError::internal("realtime protocol", message),
        RealtimeError::InvalidPath(message) => AppError::internal("realtime path", message),
        RealtimeError::Closed => AppError::network("realtime connection closed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_by_code() {
        let err = map_api_error(ApiError::Status {
            status_code: 404,
            message: "gone".to_string(),
        });
        assert!(matches!(err, AppError::NotFound { .. }));

        let err = map_api_error(ApiError::Status {
            status_code: 409,
            message: "conflict".to_string(),
        });
        assert!(matches!(err, AppError::Api { status_code: 409, .. }));
    }

    #[test]
    fn test_transport_maps_to_network() {
        let err = map_api_error(ApiError::Transport("dns failure".to_string()));
        assert!(matches!(err, AppError::Network { .. }));
        assert!(err.is_recoverable());
    }
}
