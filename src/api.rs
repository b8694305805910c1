use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::proximity;
use crate::stops::StopStore;

/// Result size of the public nearest-stop surface.
const NEAREST_K: usize = 3;

#[derive(Debug, Deserialize)]
pub struct NearQuery {
    lat: f64,
    lon: f64,
}

#[get("/api/stops")]
pub async fn list_stops(store: web::Data<StopStore>) -> impl Responder {
    HttpResponse::Ok().json(store.list())
}

#[get("/api/near")]
pub async fn near(store: web::Data<StopStore>, query: web::Query<NearQuery>) -> impl Responder {
    match proximity::nearest(store.get_ref(), query.lat, query.lon, NEAREST_K) {
        Ok(stops) => HttpResponse::Ok().json(stops),
        Err(e) => {
            warn!(lat = query.lat, lon = query.lon, "rejected query: {e}");
            HttpResponse::BadRequest().json(json!({ "error": e.to_string() }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};

    use super::*;
    use crate::stops::default_seed;

    fn seeded_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut store = StopStore::new();
        store.seed(default_seed()).unwrap();

        App::new()
            .app_data(web::Data::new(store))
            .service(list_stops)
            .service(near)
    }

    #[actix_web::test]
    async fn stops_endpoint_lists_all() {
        let app = test::init_service(seeded_app()).await;
        let req = test::TestRequest::get().uri("/api/stops").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["name"], "Central Station");
    }

    #[actix_web::test]
    async fn near_endpoint_ranks_by_distance() {
        let app = test::init_service(seeded_app()).await;
        let req = test::TestRequest::get()
            .uri("/api/near?lat=45.508&lon=-73.553")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["name"], "Central Station");
        assert!(rows[0]["distance"].as_f64().unwrap() < 1e-6);
    }

    #[actix_web::test]
    async fn near_endpoint_rejects_out_of_range_point() {
        let app = test::init_service(seeded_app()).await;
        let req = test::TestRequest::get()
            .uri("/api/near?lat=120&lon=-73.553")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn near_endpoint_rejects_non_numeric_point() {
        let app = test::init_service(seeded_app()).await;
        let req = test::TestRequest::get()
            .uri("/api/near?lat=abc&lon=-73.553")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
