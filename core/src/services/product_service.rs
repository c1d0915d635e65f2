// catalog_core/src/services/product_service.rs

use crate::data::{Predicate, Store};
use crate::dto::{CreateProduct, ProductView, UpdateProduct};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductColumn, ProductRelation};

use chrono::Utc;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct ProductService {
  store: Store,
}

impl ProductService {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// The product with its category embedded, or `None` when absent.
  #[instrument(name = "product_service::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: i64) -> CatalogResult<Option<ProductView>> {
    let mut uow = self.store.unit_of_work();
    let found = uow
      .products
      .get_by_id(&mut uow.session, id, &[ProductRelation::Category])
      .await;
    uow.dispose().await;

    let view = found?.as_ref().map(ProductView::from);
    debug!(found = view.is_some(), "Product lookup finished.");
    Ok(view)
  }

  #[instrument(name = "product_service::get_all", skip(self), err(Display))]
  pub async fn get_all(&self) -> CatalogResult<Vec<ProductView>> {
    let mut uow = self.store.unit_of_work();
    let found = uow.products.get_all(&mut uow.session, &[ProductRelation::Category]).await;
    uow.dispose().await;

    Ok(found?.iter().map(ProductView::from).collect())
  }

  #[instrument(
    name = "product_service::create",
    skip(self, input),
    fields(name = %input.name, category_id = input.category_id),
    err(Display)
  )]
  pub async fn create(&self, input: CreateProduct) -> CatalogResult<ProductView> {
    let price = input.validate()?;

    let mut uow = self.store.unit_of_work();
    let product = uow
      .transaction(move |uow| {
        Box::pin(async move {
          let category = uow
            .categories
            .get_by_id(&mut uow.session, input.category_id, &[])
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Category with ID {} not found", input.category_id)))?;

          let name_taken = Predicate::eq(ProductColumn::Name, input.name.as_str());
          if uow.products.exists(&mut uow.session, &name_taken).await? {
            return Err(CatalogError::Conflict(format!(
              "A product named '{}' already exists",
              input.name
            )));
          }

          let mut product = Product::new(
            input.name,
            input.description,
            price,
            input.stock,
            input.category_id,
            Utc::now(),
          );
          uow.products.add(&mut uow.session, &mut product).await?;
          product.category = Some(Box::new(category));
          Ok(product)
        })
      })
      .await?;

    info!(product_id = product.id, "Product created.");
    Ok(ProductView::from(&product))
  }

  /// Full replacement. A change of category is checked against the store
  /// and the returned view embeds the new category.
  #[instrument(name = "product_service::update", skip(self, input), fields(product_id = input.id), err(Display))]
  pub async fn update(&self, input: UpdateProduct) -> CatalogResult<ProductView> {
    let price = input.validate()?;

    let mut uow = self.store.unit_of_work();
    let product = uow
      .transaction(move |uow| {
        Box::pin(async move {
          let mut product = uow
            .products
            .get_by_id(&mut uow.session, input.id, &[ProductRelation::Category])
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Product with ID {} not found", input.id)))?;

          if product.category_id != input.category_id {
            let category = uow
              .categories
              .get_by_id(&mut uow.session, input.category_id, &[])
              .await?
              .ok_or_else(|| CatalogError::NotFound(format!("Category with ID {} not found", input.category_id)))?;
            debug!(from = product.category_id, to = category.id, "Product moves to another category.");
            product.category = Some(Box::new(category));
          }

          let name_taken =
            Predicate::eq(ProductColumn::Name, input.name.as_str()).and_not_eq(ProductColumn::Id, input.id);
          if uow.products.exists(&mut uow.session, &name_taken).await? {
            return Err(CatalogError::Conflict(format!(
              "Another product named '{}' already exists",
              input.name
            )));
          }

          product.name = input.name;
          product.description = input.description;
          product.price = price;
          product.stock = input.stock;
          product.active = input.active;
          product.category_id = input.category_id;
          product.updated_at = Some(Utc::now());

          uow.products.update(&mut uow.session, &product).await?;
          Ok(product)
        })
      })
      .await?;

    info!("Product updated.");
    Ok(ProductView::from(&product))
  }

  #[instrument(name = "product_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: i64) -> CatalogResult<()> {
    let mut uow = self.store.unit_of_work();
    uow
      .transaction(move |uow| {
        Box::pin(async move {
          let product = uow
            .products
            .get_by_id(&mut uow.session, id, &[])
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Product with ID {} not found", id)))?;

          uow.products.delete(&mut uow.session, &product).await
        })
      })
      .await?;

    info!("Product deleted.");
    Ok(())
  }
}
