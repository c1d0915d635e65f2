// catalog_core/src/data/repository.rs

//! Uniform CRUD and predicate queries over any [`Entity`].

use crate::data::entity::{Column, Entity, Predicate};
use crate::data::unit_of_work::Session;
use crate::error::{CatalogError, CatalogResult};

use sqlx::Row;
use std::fmt;
use std::marker::PhantomData;
use tracing::{event, Level};

/// Stateless data-access handle for one entity type.
///
/// Every operation takes the [`Session`] it runs in. Writes are staged in the
/// session's open transaction and become durable when the owning unit of work
/// commits.
pub struct Repository<E: Entity> {
  _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Repository<E> {
  pub fn new() -> Self {
    Self { _entity: PhantomData }
  }

  /// Fetches one row, eagerly loading the requested relations.
  pub async fn get_by_id(&self, session: &mut Session, id: i64, relations: &[E::Relation]) -> CatalogResult<Option<E>> {
    let mut rows = self.find(session, &Predicate::eq(E::ID, id), relations).await?;
    Ok(rows.pop())
  }

  pub async fn get_all(&self, session: &mut Session, relations: &[E::Relation]) -> CatalogResult<Vec<E>> {
    self.find(session, &Predicate::all(), relations).await
  }

  /// Rows matching `predicate`, ordered by id.
  pub async fn find(&self, session: &mut Session, predicate: &Predicate<E>, relations: &[E::Relation]) -> CatalogResult<Vec<E>> {
    let (where_clause, binds) = predicate.to_sql();
    let sql = format!("SELECT * FROM {}{} ORDER BY {}", E::TABLE, where_clause, E::ID.name());
    event!(Level::TRACE, table = E::TABLE, %sql, "Fetching rows.");

    let mut query = sqlx::query_as::<_, E>(&sql);
    for value in binds {
      query = value.bind_to(query);
    }
    let mut rows = query.fetch_all(session.connection().await?).await?;

    if !relations.is_empty() && !rows.is_empty() {
      E::load_relations(session, &mut rows, relations).await?;
    }
    Ok(rows)
  }

  /// Whether any row matches, without materialising rows.
  pub async fn exists(&self, session: &mut Session, predicate: &Predicate<E>) -> CatalogResult<bool> {
    let (where_clause, binds) = predicate.to_sql();
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {}{}) AS found", E::TABLE, where_clause);

    let mut query = sqlx::query(&sql);
    for value in binds {
      query = value.bind_to(query);
    }
    let row = query.fetch_one(session.connection().await?).await?;
    Ok(row.try_get::<i64, _>("found")? != 0)
  }

  pub async fn count(&self, session: &mut Session, predicate: &Predicate<E>) -> CatalogResult<i64> {
    let (where_clause, binds) = predicate.to_sql();
    let sql = format!("SELECT COUNT(*) AS total FROM {}{}", E::TABLE, where_clause);

    let mut query = sqlx::query(&sql);
    for value in binds {
      query = value.bind_to(query);
    }
    let row = query.fetch_one(session.connection().await?).await?;
    Ok(row.try_get::<i64, _>("total")?)
  }

  /// Stages an insert and assigns the store-generated id to `entity`.
  pub async fn add(&self, session: &mut Session, entity: &mut E) -> CatalogResult<()> {
    let values = entity.insert_values();
    let columns: Vec<&str> = values.iter().map(|(column, _)| column.name()).collect();
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!("INSERT INTO {} ({}) VALUES ({})", E::TABLE, columns.join(", "), placeholders);

    let mut query = sqlx::query(&sql);
    for (_, value) in &values {
      query = value.bind_to(query);
    }
    let result = query.execute(session.writer()?).await?;
    session.record_write(result.rows_affected());

    entity.assign_id(result.last_insert_rowid());
    event!(Level::DEBUG, table = E::TABLE, id = entity.id(), "Insert staged.");
    Ok(())
  }

  /// Stages a full replace of the entity's mutable columns.
  pub async fn update(&self, session: &mut Session, entity: &E) -> CatalogResult<()> {
    let values = entity.update_values();
    let assignments: Vec<String> = values.iter().map(|(column, _)| format!("{} = ?", column.name())).collect();
    let sql = format!("UPDATE {} SET {} WHERE {} = ?", E::TABLE, assignments.join(", "), E::ID.name());

    let mut query = sqlx::query(&sql);
    for (_, value) in &values {
      query = value.bind_to(query);
    }
    let result = query.bind(entity.id()).execute(session.writer()?).await?;
    if result.rows_affected() == 0 {
      return Err(CatalogError::NotFound(format!("{} row {} no longer exists", E::TABLE, entity.id())));
    }
    session.record_write(result.rows_affected());
    event!(Level::DEBUG, table = E::TABLE, id = entity.id(), "Update staged.");
    Ok(())
  }

  /// Stages a delete. Store-level cascades run in the same transaction.
  pub async fn delete(&self, session: &mut Session, entity: &E) -> CatalogResult<()> {
    let sql = format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::ID.name());
    let result = sqlx::query(&sql).bind(entity.id()).execute(session.writer()?).await?;
    if result.rows_affected() == 0 {
      return Err(CatalogError::NotFound(format!("{} row {} no longer exists", E::TABLE, entity.id())));
    }
    session.record_write(result.rows_affected());
    event!(Level::DEBUG, table = E::TABLE, id = entity.id(), "Delete staged.");
    Ok(())
  }
}

impl<E: Entity> Default for Repository<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: Entity> Clone for Repository<E> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<E: Entity> Copy for Repository<E> {}

impl<E: Entity> fmt::Debug for Repository<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Repository").field("table", &E::TABLE).finish()
  }
}
