// catalog_core/src/data/entity.rs

//! The contract a row type implements to be served by [`Repository`](super::repository::Repository),
//! plus the typed filter language used by `exists`/`find`.

use crate::data::unit_of_work::Session;
use crate::error::CatalogResult;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::{Encode, FromRow, Type};
use std::fmt::Debug;

pub(crate) type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;
pub(crate) type SqliteQueryAs<'q, O> = sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>;

/// A query builder that accepts positional binds.
pub(crate) trait BindTarget<'q>: Sized {
  fn push<T: 'q + Encode<'q, Sqlite> + Type<Sqlite>>(self, value: T) -> Self;
}

impl<'q> BindTarget<'q> for SqliteQuery<'q> {
  fn push<T: 'q + Encode<'q, Sqlite> + Type<Sqlite>>(self, value: T) -> Self {
    self.bind(value)
  }
}

impl<'q, O> BindTarget<'q> for SqliteQueryAs<'q, O> {
  fn push<T: 'q + Encode<'q, Sqlite> + Type<Sqlite>>(self, value: T) -> Self {
    self.bind(value)
  }
}

/// A column of an entity's table.
pub trait Column: Copy + Debug + Send + Sync + 'static {
  fn name(self) -> &'static str;
}

/// A row type with a store-assigned integer identifier.
#[async_trait]
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Debug + Send + Sync + Unpin + 'static {
  type Column: Column;
  /// Related entities that can be loaded eagerly alongside a fetch.
  type Relation: Copy + Debug + PartialEq + Send + Sync + 'static;

  const TABLE: &'static str;
  const ID: Self::Column;

  fn id(&self) -> i64;
  fn assign_id(&mut self, id: i64);

  /// Every column except the id, in insert order.
  fn insert_values(&self) -> Vec<(Self::Column, Value)>;

  /// Columns rewritten by a full-replace update. Never includes the id or
  /// creation timestamp.
  fn update_values(&self) -> Vec<(Self::Column, Value)>;

  /// Populates the requested relations on already-fetched rows.
  async fn load_relations(session: &mut Session, rows: &mut [Self], relations: &[Self::Relation]) -> CatalogResult<()>;
}

/// A bindable scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Integer(i64),
  Text(String),
  Bool(bool),
  Timestamp(Option<DateTime<Utc>>),
}

impl Value {
  pub(crate) fn bind_to<'q, Q: BindTarget<'q>>(&self, query: Q) -> Q {
    match self {
      Value::Integer(v) => query.push(*v),
      Value::Text(v) => query.push(v.clone()),
      Value::Bool(v) => query.push(*v),
      Value::Timestamp(v) => query.push(*v),
    }
  }
}

impl From<i64> for Value {
  fn from(v: i64) -> Self {
    Value::Integer(v)
  }
}

impl From<i32> for Value {
  fn from(v: i32) -> Self {
    Value::Integer(i64::from(v))
  }
}

impl From<&str> for Value {
  fn from(v: &str) -> Self {
    Value::Text(v.to_string())
  }
}

impl From<String> for Value {
  fn from(v: String) -> Self {
    Value::Text(v)
  }
}

impl From<bool> for Value {
  fn from(v: bool) -> Self {
    Value::Bool(v)
  }
}

impl From<DateTime<Utc>> for Value {
  fn from(v: DateTime<Utc>) -> Self {
    Value::Timestamp(Some(v))
  }
}

impl From<Option<DateTime<Utc>>> for Value {
  fn from(v: Option<DateTime<Utc>>) -> Self {
    Value::Timestamp(v)
  }
}

#[derive(Debug, Clone)]
enum Condition<C> {
  Eq(C, Value),
  NotEq(C, Value),
  In(C, Vec<Value>),
}

/// A conjunction of column conditions over one entity's table.
///
/// ```
/// use catalog_core::models::{Category, CategoryColumn};
/// use catalog_core::Predicate;
///
/// // "another category already uses this name"
/// let taken = Predicate::<Category>::eq(CategoryColumn::Name, "Beverages").and_not_eq(CategoryColumn::Id, 7);
/// assert_eq!(taken.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Predicate<E: Entity> {
  conditions: Vec<Condition<E::Column>>,
}

impl<E: Entity> Predicate<E> {
  /// Matches every row.
  pub fn all() -> Self {
    Self { conditions: Vec::new() }
  }

  pub fn eq(column: E::Column, value: impl Into<Value>) -> Self {
    Self::all().and_eq(column, value)
  }

  pub fn is_in<V: Into<Value>>(column: E::Column, values: impl IntoIterator<Item = V>) -> Self {
    Self::all().and_in(column, values)
  }

  pub fn and_eq(mut self, column: E::Column, value: impl Into<Value>) -> Self {
    self.conditions.push(Condition::Eq(column, value.into()));
    self
  }

  pub fn and_not_eq(mut self, column: E::Column, value: impl Into<Value>) -> Self {
    self.conditions.push(Condition::NotEq(column, value.into()));
    self
  }

  pub fn and_in<V: Into<Value>>(mut self, column: E::Column, values: impl IntoIterator<Item = V>) -> Self {
    self.conditions.push(Condition::In(column, values.into_iter().map(Into::into).collect()));
    self
  }

  pub fn len(&self) -> usize {
    self.conditions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.conditions.is_empty()
  }

  /// Renders the `WHERE` clause (empty when matching everything) and the
  /// values to bind, in placeholder order.
  pub(crate) fn to_sql(&self) -> (String, Vec<&Value>) {
    if self.conditions.is_empty() {
      return (String::new(), Vec::new());
    }

    let mut clauses = Vec::with_capacity(self.conditions.len());
    let mut binds = Vec::new();
    for condition in &self.conditions {
      match condition {
        Condition::Eq(column, value) => {
          clauses.push(format!("{} = ?", column.name()));
          binds.push(value);
        }
        Condition::NotEq(column, value) => {
          clauses.push(format!("{} <> ?", column.name()));
          binds.push(value);
        }
        Condition::In(_, values) if values.is_empty() => clauses.push("0 = 1".to_string()),
        Condition::In(column, values) => {
          let placeholders = vec!["?"; values.len()].join(", ");
          clauses.push(format!("{} IN ({})", column.name(), placeholders));
          binds.extend(values.iter());
        }
      }
    }
    (format!(" WHERE {}", clauses.join(" AND ")), binds)
  }
}
