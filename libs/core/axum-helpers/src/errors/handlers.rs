use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{error_response, AppError, ErrorCode};

/// Fallback for requests that match no route.
///
/// Also used as the method-not-allowed fallback, so a known path with an
/// unsupported method is reported the same way.
pub async fn route_not_found() -> Response {
    tracing::info!(
        error_code = ErrorCode::RouteNotFound.code(),
        "No route matched the request"
    );
    error_response(
        StatusCode::NOT_FOUND,
        ErrorCode::RouteNotFound.default_message().to_string(),
        ErrorCode::RouteNotFound,
    )
}

/// Turns a handler panic into a 500 response carrying the panic message.
///
/// Meant for `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        ErrorCode::HandlerPanic.default_message().to_string()
    };

    tracing::error!(error_code = ErrorCode::HandlerPanic.code(), "Handler panicked");
    AppError::InternalServerError(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn message_of(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_route_not_found() {
        let response = route_not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(message_of(response).await, "Route not found");
    }

    #[tokio::test]
    async fn test_handle_panic_with_str_payload() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_of(response).await, "boom");
    }

    #[tokio::test]
    async fn test_handle_panic_with_string_payload() {
        let response = handle_panic(Box::new(String::from("formatted boom")));
        assert_eq!(message_of(response).await, "formatted boom");
    }

    #[tokio::test]
    async fn test_handle_panic_with_opaque_payload() {
        let response = handle_panic(Box::new(42_u8));
        assert_eq!(message_of(response).await, "Internal Server Error");
    }
}
