// catalog_api/src/web/handlers/product_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use catalog_core::{CatalogError, CreateProduct, UpdateProduct};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::response::ApiResponse;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.products.get_all().await?;
  info!("Fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(ApiResponse::ok(products, "Products fetched successfully.")))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let product = app_state
    .products
    .get_by_id(id)
    .await?
    .ok_or_else(|| CatalogError::NotFound(format!("Product with ID {} not found", id)))?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok(product, "Product fetched successfully.")))
}

#[instrument(name = "handler::create_product", skip(app_state, body))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  body: web::Json<CreateProduct>,
) -> Result<HttpResponse, AppError> {
  let product = app_state.products.create(body.into_inner()).await?;
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, format!("/api/v1/products/{}", product.product.id)))
      .json(ApiResponse::ok(product, "Product created successfully.")),
  )
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: web::Json<UpdateProduct>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let input = body.into_inner();
  if input.id != id {
    return Err(AppError::Validation(format!(
      "The ID in the URL ({}) does not match the ID in the body ({})",
      id, input.id
    )));
  }

  let product = app_state.products.update(input).await?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok(product, "Product updated successfully.")))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.products.delete(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(ApiResponse::done("Product deleted successfully.")))
}
