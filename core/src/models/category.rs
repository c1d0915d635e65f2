// catalog_core/src/models/category.rs

use crate::data::entity::{Column, Entity, Predicate, Value};
use crate::data::repository::Repository;
use crate::data::unit_of_work::Session;
use crate::error::CatalogResult;
use crate::models::product::{Product, ProductColumn};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
  /// Filled only when [`CategoryRelation::Products`] is requested.
  #[sqlx(skip)]
  pub products: Vec<Product>,
}

impl Category {
  /// A new, unsaved category. The id is assigned on insert.
  pub fn new(name: impl Into<String>, description: impl Into<String>, created_at: DateTime<Utc>) -> Self {
    Self {
      id: 0,
      name: name.into(),
      description: description.into(),
      active: true,
      created_at,
      updated_at: None,
      products: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
  Id,
  Name,
  Description,
  Active,
  CreatedAt,
  UpdatedAt,
}

impl Column for CategoryColumn {
  fn name(self) -> &'static str {
    match self {
      CategoryColumn::Id => "id",
      CategoryColumn::Name => "name",
      CategoryColumn::Description => "description",
      CategoryColumn::Active => "active",
      CategoryColumn::CreatedAt => "created_at",
      CategoryColumn::UpdatedAt => "updated_at",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRelation {
  Products,
}

#[async_trait]
impl Entity for Category {
  type Column = CategoryColumn;
  type Relation = CategoryRelation;

  const TABLE: &'static str = "categories";
  const ID: CategoryColumn = CategoryColumn::Id;

  fn id(&self) -> i64 {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = id;
  }

  fn insert_values(&self) -> Vec<(CategoryColumn, Value)> {
    vec![
      (CategoryColumn::Name, self.name.clone().into()),
      (CategoryColumn::Description, self.description.clone().into()),
      (CategoryColumn::Active, self.active.into()),
      (CategoryColumn::CreatedAt, self.created_at.into()),
      (CategoryColumn::UpdatedAt, self.updated_at.into()),
    ]
  }

  fn update_values(&self) -> Vec<(CategoryColumn, Value)> {
    vec![
      (CategoryColumn::Name, self.name.clone().into()),
      (CategoryColumn::Description, self.description.clone().into()),
      (CategoryColumn::Active, self.active.into()),
      (CategoryColumn::UpdatedAt, self.updated_at.into()),
    ]
  }

  async fn load_relations(session: &mut Session, rows: &mut [Self], relations: &[CategoryRelation]) -> CatalogResult<()> {
    if !relations.contains(&CategoryRelation::Products) {
      return Ok(());
    }

    let ids: Vec<i64> = rows.iter().map(|category| category.id).collect();
    let products = Repository::<Product>::new()
      .find(session, &Predicate::is_in(ProductColumn::CategoryId, ids), &[])
      .await?;

    let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
    for product in products {
      by_category.entry(product.category_id).or_default().push(product);
    }
    for category in rows.iter_mut() {
      category.products = by_category.remove(&category.id).unwrap_or_default();
    }
    Ok(())
  }
}
