//! HTTP handlers and the mapping of service failures onto status codes.

use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub mod api;
pub mod preferences;

/// Registers every route of the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(api::api_v1_clients)
            .service(api::api_v1_client)
            .service(preferences::api_v1_get_theme)
            .service(preferences::api_v1_put_theme),
    );
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Converts a service failure into a JSON error response.
pub fn service_error_response(err: &ServiceError) -> HttpResponse {
    let mut builder = match err {
        ServiceError::NotFound => HttpResponse::NotFound(),
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::Table(_) => {
            HttpResponse::BadRequest()
        }
        ServiceError::Repository(repo) => match repo {
            RepositoryError::NetworkUnavailable(_) => HttpResponse::ServiceUnavailable(),
            RepositoryError::RemoteError { .. } => HttpResponse::BadGateway(),
            RepositoryError::ValidationError(_) => HttpResponse::BadRequest(),
            _ => HttpResponse::InternalServerError(),
        },
    };
    builder.json(json!({ "error": err.to_string() }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;
    use crate::table::TableError;
    use crate::table::column::ColumnKey;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Form("page".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Table(TableError::NotSortable(ColumnKey::Avatar)),
                StatusCode::BAD_REQUEST,
            ),
            (
                RepositoryError::NetworkUnavailable("offline".into()).into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RepositoryError::RemoteError {
                    status: 500,
                    message: "boom".into(),
                }
                .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                RepositoryError::TransformError("bad json".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(service_error_response(&err).status(), expected, "{err}");
        }
    }
}
