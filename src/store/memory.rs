// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{error::AppError, models::row::header_cells, store::RowStore};

/// Row store kept in process memory. The header row is always present.
#[derive(Debug)]
pub struct MemoryRowStore {
    rows: RwLock<Vec<Vec<String>>>,
}

impl MemoryRowStore {
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Store preloaded with data rows (header excluded).
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        let mut all = vec![header_cells()];
        all.extend(rows);
        Self {
            rows: RwLock::new(all),
        }
    }

    fn check_index(len: usize, row_index: usize) -> Result<(), AppError> {
        if row_index == 0 || row_index >= len {
            return Err(AppError::NotFound(format!("Row {} not found", row_index)));
        }
        Ok(())
    }
}

impl Default for MemoryRowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>, AppError> {
        Ok(self.rows.read().await.clone())
    }

    async fn append_row(&self, cells: Vec<String>) -> Result<(), AppError> {
        self.rows.write().await.push(cells);
        Ok(())
    }

    async fn update_row(&self, row_index: usize, cells: Vec<String>) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        Self::check_index(rows.len(), row_index)?;
        rows[row_index] = cells;
        Ok(())
    }

    async fn delete_row(&self, row_index: usize) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        Self::check_index(rows.len(), row_index)?;
        rows.remove(row_index);
        Ok(())
    }
}
