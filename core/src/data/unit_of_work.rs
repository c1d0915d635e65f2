// catalog_core/src/data/unit_of_work.rs

//! Transaction coordination for the repositories.
//!
//! A [`UnitOfWork`] owns one [`Session`] (the transaction handle) and one
//! repository handle per entity. Repository calls take the session explicitly,
//! so the transaction that a read or write participates in is always visible
//! at the call site:
//!
//! ```text
//! uow.begin_transaction().await?;
//! let taken = uow.categories.exists(&mut uow.session, &predicate).await?;
//! uow.categories.add(&mut uow.session, &mut category).await?;
//! uow.commit().await?;
//! ```

use crate::data::repository::Repository;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Product};

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use sqlx::Transaction;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, instrument, warn};

const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

/// Boxed future returned by the closure given to [`UnitOfWork::transaction`].
pub type UowFuture<'a, T> = Pin<Box<dyn Future<Output = CatalogResult<T>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
  Idle,
  Active,
}

enum Handle {
  /// Nothing checked out from the pool.
  Released,
  /// A pooled connection used for reads outside a transaction.
  Connected(PoolConnection<Sqlite>),
  Active(Transaction<'static, Sqlite>),
}

/// The transaction handle passed into every repository call.
pub struct Session {
  pool: SqlitePool,
  handle: Handle,
  written: u64,
}

impl Session {
  fn new(pool: SqlitePool) -> Self {
    Self {
      pool,
      handle: Handle::Released,
      written: 0,
    }
  }

  pub fn state(&self) -> TransactionState {
    match self.handle {
      Handle::Active(_) => TransactionState::Active,
      Handle::Released | Handle::Connected(_) => TransactionState::Idle,
    }
  }

  /// Connection for reads: the open transaction when active, otherwise a
  /// pooled connection checked out on first use.
  pub(crate) async fn connection(&mut self) -> CatalogResult<&mut SqliteConnection> {
    if matches!(self.handle, Handle::Released) {
      let conn = self.pool.acquire().await?;
      self.handle = Handle::Connected(conn);
    }
    match &mut self.handle {
      Handle::Active(tx) => Ok(&mut **tx),
      Handle::Connected(conn) => Ok(&mut **conn),
      Handle::Released => Err(CatalogError::Internal("Session lost its connection while acquiring it".to_string())),
    }
  }

  /// Connection for writes. Writes outside a transaction would autocommit,
  /// so they are refused.
  pub(crate) fn writer(&mut self) -> CatalogResult<&mut SqliteConnection> {
    match &mut self.handle {
      Handle::Active(tx) => Ok(&mut **tx),
      _ => Err(CatalogError::TransactionState(
        "Writes require an active transaction; call begin_transaction first".to_string(),
      )),
    }
  }

  pub(crate) fn record_write(&mut self, rows: u64) {
    self.written += rows;
  }

  async fn begin(&mut self) -> CatalogResult<()> {
    if let Handle::Active(_) = self.handle {
      return Err(CatalogError::TransactionState(
        "A transaction is already active on this unit of work".to_string(),
      ));
    }
    // Hand any idle read connection back first; a single-connection pool
    // would otherwise wait on itself.
    self.handle = Handle::Released;
    // Take the write lock up front. A deferred BEGIN that reads first cannot
    // upgrade while another connection writes; SQLite fails it with BUSY
    // instead of waiting out the busy timeout.
    let tx = self.pool.begin_with(BEGIN_WRITE).await?;
    self.handle = Handle::Active(tx);
    self.written = 0;
    debug!("Transaction started.");
    Ok(())
  }

  fn take_written(&mut self) -> u64 {
    std::mem::take(&mut self.written)
  }

  async fn commit(&mut self) -> CatalogResult<()> {
    let tx = match std::mem::replace(&mut self.handle, Handle::Released) {
      Handle::Active(tx) => tx,
      other => {
        self.handle = other;
        return Err(CatalogError::TransactionState(
          "Commit requires an active transaction".to_string(),
        ));
      }
    };

    let flushed = self.take_written();
    match tx.commit().await {
      Ok(()) => {
        debug!(rows_written = flushed, "Transaction committed.");
        Ok(())
      }
      Err(err) => {
        // A failed commit drops the sqlx transaction, which rolls it back.
        warn!(error = %err, rows_discarded = flushed, "Commit failed; transaction rolled back.");
        Err(err.into())
      }
    }
  }

  async fn rollback(&mut self) -> CatalogResult<()> {
    let previous = std::mem::replace(&mut self.handle, Handle::Released);
    let discarded = self.take_written();
    match previous {
      Handle::Active(tx) => {
        tx.rollback().await?;
        debug!(rows_discarded = discarded, "Transaction rolled back.");
        Ok(())
      }
      Handle::Connected(_) | Handle::Released => Ok(()),
    }
  }
}

impl Drop for Session {
  fn drop(&mut self) {
    if let Handle::Active(_) = self.handle {
      warn!("Session dropped with an active transaction; rolling back.");
    }
  }
}

/// Coordinates repository operations inside a single transaction boundary.
///
/// Repository handles are built once in [`UnitOfWork::new`] and share the
/// same [`Session`].
pub struct UnitOfWork {
  pub categories: Repository<Category>,
  pub products: Repository<Product>,
  pub session: Session,
}

impl UnitOfWork {
  pub fn new(pool: SqlitePool) -> Self {
    Self {
      categories: Repository::new(),
      products: Repository::new(),
      session: Session::new(pool),
    }
  }

  pub fn state(&self) -> TransactionState {
    self.session.state()
  }

  /// Opens a transaction. Fails fast when one is already active.
  pub async fn begin_transaction(&mut self) -> CatalogResult<()> {
    self.session.begin().await
  }

  /// Rows written by staged repository operations since the previous call.
  ///
  /// Staged statements already run inside the open transaction, so this only
  /// reports; durability still waits for [`commit`](Self::commit).
  pub async fn save_changes(&mut self) -> CatalogResult<u64> {
    Ok(self.session.take_written())
  }

  /// Flushes and commits. Afterwards the unit of work is idle whether or not
  /// the commit succeeded.
  pub async fn commit(&mut self) -> CatalogResult<()> {
    self.session.commit().await
  }

  /// Reverts the active transaction, if any, and releases its connection.
  pub async fn rollback(&mut self) -> CatalogResult<()> {
    self.session.rollback().await
  }

  /// Runs `work` inside a transaction: commit on `Ok`, rollback on `Err`.
  /// The error from `work` is returned unchanged.
  #[instrument(name = "unit_of_work::transaction", skip_all, err(Display))]
  pub async fn transaction<T, F>(&mut self, work: F) -> CatalogResult<T>
  where
    T: Send,
    F: for<'u> FnOnce(&'u mut UnitOfWork) -> UowFuture<'u, T>,
  {
    self.begin_transaction().await?;
    match work(self).await {
      Ok(value) => {
        self.commit().await?;
        Ok(value)
      }
      Err(err) => {
        if let Err(rollback_err) = self.rollback().await {
          warn!(error = %rollback_err, "Rollback after a failed unit of work also failed.");
        }
        Err(err)
      }
    }
  }

  /// Releases the transaction (rolling it back if still active) and the
  /// connection. Safe to call when no transaction was ever begun.
  pub async fn dispose(mut self) {
    if let Err(err) = self.session.rollback().await {
      warn!(error = %err, "Rollback during unit of work disposal failed.");
    }
  }
}
