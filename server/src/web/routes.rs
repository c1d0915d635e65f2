// catalog_api/src/web/routes.rs

use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{category_handlers, product_handlers, token_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Shared by `main.rs` and the API tests.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
      AppError::Validation(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
      AppError::Validation(format!("Invalid path parameter: {}", err)).into()
    }))
    .service(
      web::scope("/api/v1")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/token")
            .route("/generate", web::post().to(token_handlers::generate_token_handler))
            .route("/info", web::post().to(token_handlers::token_info_handler)),
        )
        // Every category route requires a bearer token (see `BearerAuth`).
        .service(
          web::scope("/categories")
            .route("", web::get().to(category_handlers::list_categories_handler))
            .route("", web::post().to(category_handlers::create_category_handler))
            .route("/{id}", web::get().to(category_handlers::get_category_handler))
            .route("/{id}", web::put().to(category_handlers::update_category_handler))
            .route("/{id}", web::delete().to(category_handlers::delete_category_handler)),
        )
        .service(
          web::scope("/products")
            .route("", web::get().to(product_handlers::list_products_handler))
            .route("", web::post().to(product_handlers::create_product_handler))
            .route("/{id}", web::get().to(product_handlers::get_product_handler))
            .route("/{id}", web::put().to(product_handlers::update_product_handler))
            .route("/{id}", web::delete().to(product_handlers::delete_product_handler)),
        ),
    );
}
