use actix_web::{HttpResponse, Responder, get, web};
use log::error;

use crate::ClientCache;
use crate::forms::clients::ClientsQueryForm;
use crate::routes::service_error_response;
use crate::services::clients::{get_client_profile, list_clients};

#[get("/v1/clients")]
pub async fn api_v1_clients(
    params: web::Query<ClientsQueryForm>,
    cache: web::Data<ClientCache>,
) -> impl Responder {
    match list_clients(cache.get_ref(), params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Failed to list clients: {e}");
            service_error_response(&e)
        }
    }
}

/// Profile of one client from the page named by the query parameters.
#[get("/v1/clients/{client_id}")]
pub async fn api_v1_client(
    client_id: web::Path<String>,
    params: web::Query<ClientsQueryForm>,
    cache: web::Data<ClientCache>,
) -> impl Responder {
    let client_id = client_id.into_inner();
    match get_client_profile(cache.get_ref(), &client_id, params.into_inner()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => {
            error!("Failed to load client {client_id}: {e}");
            service_error_response(&e)
        }
    }
}
