// catalog_api/src/web/handlers/category_handlers.rs

use actix_web::{http::header, web, HttpResponse};
use catalog_core::{CatalogError, CreateCategory, UpdateCategory};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::BearerAuth;
use crate::web::response::ApiResponse;

#[instrument(name = "handler::list_categories", skip(_auth, app_state))]
pub async fn list_categories_handler(
  _auth: BearerAuth,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let categories = app_state.categories.get_all().await?;
  info!("Fetched {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(ApiResponse::ok(categories, "Categories fetched successfully.")))
}

#[instrument(name = "handler::get_category", skip(_auth, app_state, path), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  _auth: BearerAuth,
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let category = app_state
    .categories
    .get_by_id(id)
    .await?
    .ok_or_else(|| CatalogError::NotFound(format!("Category with ID {} not found", id)))?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok(category, "Category fetched successfully.")))
}

#[instrument(name = "handler::create_category", skip(_auth, app_state, body))]
pub async fn create_category_handler(
  _auth: BearerAuth,
  app_state: web::Data<AppState>,
  body: web::Json<CreateCategory>,
) -> Result<HttpResponse, AppError> {
  let category = app_state.categories.create(body.into_inner()).await?;
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, format!("/api/v1/categories/{}", category.id)))
      .json(ApiResponse::ok(category, "Category created successfully.")),
  )
}

#[instrument(name = "handler::update_category", skip(_auth, app_state, path, body), fields(category_id = %path.as_ref()))]
pub async fn update_category_handler(
  _auth: BearerAuth,
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: web::Json<UpdateCategory>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let input = body.into_inner();
  if input.id != id {
    return Err(AppError::Validation(format!(
      "The ID in the URL ({}) does not match the ID in the body ({})",
      id, input.id
    )));
  }

  let category = app_state.categories.update(input).await?;
  Ok(HttpResponse::Ok().json(ApiResponse::ok(category, "Category updated successfully.")))
}

#[instrument(name = "handler::delete_category", skip(_auth, app_state, path), fields(category_id = %path.as_ref()))]
pub async fn delete_category_handler(
  _auth: BearerAuth,
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state.categories.delete(path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(ApiResponse::done(
    "Category deleted successfully (its products were deleted too).",
  )))
}
