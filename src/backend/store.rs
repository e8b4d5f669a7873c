//! # Pumpkin table
//!
//! Row storage behind the ingestion and moderation rules.
//!
//! ## Columns
//!
//! - `id`: assigned on insert, ascending from 1
//! - `img`: the submitted data URL
//! - `visible`: false until an administrator approves the row
//! - `user_id` / `user_ip`: who submitted it, used for the quota counts
//! - `created_at`: RFC 3339 UTC timestamp
//!
//! The hosted deployment keeps these rows in a managed database. [`MemoryStore`]
//! is the in-process stand-in used for offline mode and tests; it is not durable.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PumpkinRow {
    pub id: i64,
    pub img: String,
    pub visible: bool,
    pub user_id: String,
    pub user_ip: String,
    pub created_at: String,
}

/// Columns supplied by the caller on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPumpkin {
    pub img: String,
    pub visible: bool,
    pub user_id: String,
    pub user_ip: String,
    pub created_at: String,
}

/// Equality filter on a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Id(i64),
    Visible(bool),
    UserId(String),
    UserIp(String),
}

impl Filter {
    pub fn matches(&self, row: &PumpkinRow) -> bool {
        match self {
            Filter::Id(id) => row.id == *id,
            Filter::Visible(visible) => row.visible == *visible,
            Filter::UserId(user_id) => row.user_id == *user_id,
            Filter::UserIp(user_ip) => row.user_ip == *user_ip,
        }
    }
}

/// Insert/update/delete/select over the pumpkin table.
///
/// Mutations return the rows they touched.
pub trait PumpkinStore: Send + Sync {
    fn insert(&self, row: NewPumpkin) -> Result<PumpkinRow, StoreError>;

    fn update_visible(&self, filter: &Filter, visible: bool) -> Result<Vec<PumpkinRow>, StoreError>;

    fn delete(&self, filter: &Filter) -> Result<Vec<PumpkinRow>, StoreError>;

    /// Rows matching `filter`, newest (highest id) first
    fn select(&self, filter: &Filter) -> Result<Vec<PumpkinRow>, StoreError>;

    /// Exact number of rows matching `filter`
    fn count(&self, filter: &Filter) -> Result<usize, StoreError>;
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<PumpkinRow>,
    next_id: i64,
}

/// Volatile table held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PumpkinStore for MemoryStore {
    fn insert(&self, row: NewPumpkin) -> Result<PumpkinRow, StoreError> {
        let mut table = self.table.lock();
        table.next_id += 1;
        let row = PumpkinRow {
            id: table.next_id,
            img: row.img,
            visible: row.visible,
            user_id: row.user_id,
            user_ip: row.user_ip,
            created_at: row.created_at,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    fn update_visible(&self, filter: &Filter, visible: bool) -> Result<Vec<PumpkinRow>, StoreError> {
        let mut table = self.table.lock();
        let updated = table
            .rows
            .iter_mut()
            .filter(|row| filter.matches(row))
            .map(|row| {
                row.visible = visible;
                row.clone()
            })
            .collect();
        Ok(updated)
    }

    fn delete(&self, filter: &Filter) -> Result<Vec<PumpkinRow>, StoreError> {
        let mut table = self.table.lock();
        let (removed, kept) = std::mem::take(&mut table.rows)
            .into_iter()
            .partition(|row| filter.matches(row));
        table.rows = kept;
        Ok(removed)
    }

    fn select(&self, filter: &Filter) -> Result<Vec<PumpkinRow>, StoreError> {
        let table = self.table.lock();
        let mut rows: Vec<PumpkinRow> = table.rows.iter().filter(|row| filter.matches(row)).cloned().collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.id));
        Ok(rows)
    }

    fn count(&self, filter: &Filter) -> Result<usize, StoreError> {
        let table = self.table.lock();
        Ok(table.rows.iter().filter(|row| filter.matches(row)).count())
    }
}
