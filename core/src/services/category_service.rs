// catalog_core/src/services/category_service.rs

//! Category use cases. Each write runs in its own unit of work.

use crate::data::{Predicate, Store};
use crate::dto::{CategoryView, CreateCategory, UpdateCategory};
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CategoryColumn, CategoryRelation};

use chrono::Utc;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct CategoryService {
  store: Store,
}

impl CategoryService {
  pub fn new(store: Store) -> Self {
    Self { store }
  }

  /// The category with its products, or `None` when absent.
  #[instrument(name = "category_service::get_by_id", skip(self), err(Display))]
  pub async fn get_by_id(&self, id: i64) -> CatalogResult<Option<CategoryView>> {
    let mut uow = self.store.unit_of_work();
    let found = uow
      .categories
      .get_by_id(&mut uow.session, id, &[CategoryRelation::Products])
      .await;
    uow.dispose().await;

    let view = found?.as_ref().map(CategoryView::from);
    debug!(found = view.is_some(), "Category lookup finished.");
    Ok(view)
  }

  #[instrument(name = "category_service::get_all", skip(self), err(Display))]
  pub async fn get_all(&self) -> CatalogResult<Vec<CategoryView>> {
    let mut uow = self.store.unit_of_work();
    let found = uow.categories.get_all(&mut uow.session, &[CategoryRelation::Products]).await;
    uow.dispose().await;

    Ok(found?.iter().map(CategoryView::from).collect())
  }

  #[instrument(name = "category_service::create", skip(self, input), fields(name = %input.name), err(Display))]
  pub async fn create(&self, input: CreateCategory) -> CatalogResult<CategoryView> {
    input.validate()?;

    let mut uow = self.store.unit_of_work();
    let category = uow
      .transaction(move |uow| {
        Box::pin(async move {
          let name_taken = Predicate::eq(CategoryColumn::Name, input.name.as_str());
          if uow.categories.exists(&mut uow.session, &name_taken).await? {
            return Err(CatalogError::Conflict(format!(
              "A category named '{}' already exists",
              input.name
            )));
          }

          let mut category = Category::new(input.name, input.description, Utc::now());
          uow.categories.add(&mut uow.session, &mut category).await?;
          Ok(category)
        })
      })
      .await?;

    info!(category_id = category.id, "Category created.");
    Ok(CategoryView::from(&category))
  }

  #[instrument(name = "category_service::update", skip(self, input), fields(category_id = input.id), err(Display))]
  pub async fn update(&self, input: UpdateCategory) -> CatalogResult<CategoryView> {
    input.validate()?;

    let mut uow = self.store.unit_of_work();
    let category = uow
      .transaction(move |uow| {
        Box::pin(async move {
          let mut category = uow
            .categories
            .get_by_id(&mut uow.session, input.id, &[CategoryRelation::Products])
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Category with ID {} not found", input.id)))?;

          let name_taken =
            Predicate::eq(CategoryColumn::Name, input.name.as_str()).and_not_eq(CategoryColumn::Id, input.id);
          if uow.categories.exists(&mut uow.session, &name_taken).await? {
            return Err(CatalogError::Conflict(format!(
              "Another category named '{}' already exists",
              input.name
            )));
          }

          category.name = input.name;
          category.description = input.description;
          category.active = input.active;
          category.updated_at = Some(Utc::now());

          uow.categories.update(&mut uow.session, &category).await?;
          Ok(category)
        })
      })
      .await?;

    info!("Category updated.");
    Ok(CategoryView::from(&category))
  }

  /// Removes the category and, through the store cascade, all of its
  /// products. Either everything goes or nothing does.
  #[instrument(name = "category_service::delete", skip(self), err(Display))]
  pub async fn delete(&self, id: i64) -> CatalogResult<()> {
    let mut uow = self.store.unit_of_work();
    let removed_products = uow
      .transaction(move |uow| {
        Box::pin(async move {
          let category = uow
            .categories
            .get_by_id(&mut uow.session, id, &[CategoryRelation::Products])
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Category with ID {} not found", id)))?;

          uow.categories.delete(&mut uow.session, &category).await?;
          Ok::<_, CatalogError>(category.products.len())
        })
      })
      .await?;

    info!(removed_products, "Category deleted.");
    Ok(())
  }
}
