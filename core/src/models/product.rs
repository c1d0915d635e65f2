// catalog_core/src/models/product.rs

use crate::data::entity::{Column, Entity, Predicate, Value};
use crate::data::repository::Repository;
use crate::data::unit_of_work::Session;
use crate::error::{CatalogError, CatalogResult};
use crate::models::category::{Category, CategoryColumn};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::FromRow;
use std::collections::{BTreeSet, HashMap};

/// A non-negative amount with two fractional digits, held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, sqlx::Type)]
#[sqlx(transparent)]
pub struct Price(i64);

impl Price {
  pub fn from_cents(cents: i64) -> CatalogResult<Self> {
    if cents < 0 {
      return Err(CatalogError::Invalid("Price cannot be negative".to_string()));
    }
    Ok(Self(cents))
  }

  pub fn cents(self) -> i64 {
    self.0
  }

  pub fn to_decimal(self) -> Decimal {
    Decimal::new(self.0, 2)
  }
}

impl TryFrom<Decimal> for Price {
  type Error = CatalogError;

  fn try_from(amount: Decimal) -> CatalogResult<Self> {
    if amount < Decimal::ZERO {
      return Err(CatalogError::Invalid("Price cannot be negative".to_string()));
    }
    if amount.normalize().scale() > 2 {
      return Err(CatalogError::Invalid("Price can have at most 2 decimal places".to_string()));
    }
    amount
      .checked_mul(Decimal::from(100))
      .and_then(|cents| cents.to_i64())
      .map(Self)
      .ok_or_else(|| CatalogError::Invalid(format!("Price {} is out of range", amount)))
  }
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  #[sqlx(rename = "price_cents")]
  pub price: Price,
  pub stock: i32,
  pub active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
  pub category_id: i64,
  /// Filled only when [`ProductRelation::Category`] is requested. The loaded
  /// category never carries its own products.
  #[sqlx(skip)]
  pub category: Option<Box<Category>>,
}

impl Product {
  /// A new, unsaved product. The id is assigned on insert.
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    price: Price,
    stock: i32,
    category_id: i64,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id: 0,
      name: name.into(),
      description: description.into(),
      price,
      stock,
      active: true,
      created_at,
      updated_at: None,
      category_id,
      category: None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
  Id,
  Name,
  Description,
  PriceCents,
  Stock,
  Active,
  CreatedAt,
  UpdatedAt,
  CategoryId,
}

impl Column for ProductColumn {
  fn name(self) -> &'static str {
    match self {
      ProductColumn::Id => "id",
      ProductColumn::Name => "name",
      ProductColumn::Description => "description",
      ProductColumn::PriceCents => "price_cents",
      ProductColumn::Stock => "stock",
      ProductColumn::Active => "active",
      ProductColumn::CreatedAt => "created_at",
      ProductColumn::UpdatedAt => "updated_at",
      ProductColumn::CategoryId => "category_id",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductRelation {
  Category,
}

#[async_trait]
impl Entity for Product {
  type Column = ProductColumn;
  type Relation = ProductRelation;

  const TABLE: &'static str = "products";
  const ID: ProductColumn = ProductColumn::Id;

  fn id(&self) -> i64 {
    self.id
  }

  fn assign_id(&mut self, id: i64) {
    self.id = id;
  }

  fn insert_values(&self) -> Vec<(ProductColumn, Value)> {
    let mut values = self.update_values();
    values.push((ProductColumn::CreatedAt, self.created_at.into()));
    values
  }

  fn update_values(&self) -> Vec<(ProductColumn, Value)> {
    vec![
      (ProductColumn::Name, self.name.clone().into()),
      (ProductColumn::Description, self.description.clone().into()),
      (ProductColumn::PriceCents, self.price.cents().into()),
      (ProductColumn::Stock, self.stock.into()),
      (ProductColumn::Active, self.active.into()),
      (ProductColumn::UpdatedAt, self.updated_at.into()),
      (ProductColumn::CategoryId, self.category_id.into()),
    ]
  }

  async fn load_relations(session: &mut Session, rows: &mut [Self], relations: &[ProductRelation]) -> CatalogResult<()> {
    if !relations.contains(&ProductRelation::Category) {
      return Ok(());
    }

    let ids: BTreeSet<i64> = rows.iter().map(|product| product.category_id).collect();
    let categories: HashMap<i64, Category> = Repository::<Category>::new()
      .find(session, &Predicate::is_in(CategoryColumn::Id, ids), &[])
      .await?
      .into_iter()
      .map(|category| (category.id, category))
      .collect();

    for product in rows.iter_mut() {
      product.category = categories.get(&product.category_id).cloned().map(Box::new);
    }
    Ok(())
  }
}
