// src/store/mod.rs

pub mod memory;
pub mod sheets;

use async_trait::async_trait;

use crate::error::AppError;

pub use memory::MemoryRowStore;
pub use sheets::SheetsClient;

/// A spreadsheet used as a table of quiz attempts.
///
/// Row indexes are 0-based positions in the sheet; index 0 is the header.
/// Failures are reported as `AppError::Transport`. Nothing is retried.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Every row of the sheet, header included.
    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>, AppError>;

    async fn append_row(&self, cells: Vec<String>) -> Result<(), AppError>;

    /// Overwrites the row at `row_index`, starting at the first column.
    async fn update_row(&self, row_index: usize, cells: Vec<String>) -> Result<(), AppError>;

    async fn delete_row(&self, row_index: usize) -> Result<(), AppError>;
}
