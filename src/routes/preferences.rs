use actix_web::{HttpResponse, Responder, get, put, web};
use log::error;

use crate::dto::api::ThemeResponse;
use crate::forms::preferences::ThemeForm;
use crate::repository::FileThemeStore;
use crate::routes::service_error_response;
use crate::services::preferences::{load_theme, save_theme};

#[get("/v1/preferences/theme")]
pub async fn api_v1_get_theme(store: web::Data<FileThemeStore>) -> impl Responder {
    match load_theme(store.get_ref()) {
        Ok(theme) => HttpResponse::Ok().json(ThemeResponse { theme }),
        Err(e) => {
            error!("Failed to load theme: {e}");
            service_error_response(&e)
        }
    }
}

#[put("/v1/preferences/theme")]
pub async fn api_v1_put_theme(
    form: web::Json<ThemeForm>,
    store: web::Data<FileThemeStore>,
) -> impl Responder {
    match save_theme(store.get_ref(), form.into_inner()) {
        Ok(theme) => HttpResponse::Ok().json(ThemeResponse { theme }),
        Err(e) => {
            error!("Failed to save theme: {e}");
            service_error_response(&e)
        }
    }
}
