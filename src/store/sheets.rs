// src/store/sheets.rs

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{config::SheetsConfig, error::AppError, store::RowStore};

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    /// Omitted by the API when the sheet is empty.
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ValuesBody {
    values: Vec<Vec<String>>,
}

/// Client for the spreadsheet-as-a-database HTTP API.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    config: SheetsConfig,
}

impl SheetsClient {
    pub fn new(config: SheetsConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// `{base}/{integration}/{segments...}`
    fn endpoint<I>(&self, segments: I) -> Result<Url, AppError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::InternalServerError(format!(
                    "Sheets base URL cannot have a path: {}",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .push(&self.config.integration_id)
            .extend(segments);
        Ok(url)
    }

    fn values_endpoint(&self, range: &str) -> Result<Url, AppError> {
        self.endpoint([self.config.spreadsheet_id.as_str(), "values", range])
    }
}

#[async_trait]
impl RowStore for SheetsClient {
    async fn fetch_all_rows(&self) -> Result<Vec<Vec<String>>, AppError> {
        let url = self.values_endpoint(&self.config.sheet_name)?;
        tracing::debug!("Fetching rows from {}", url);

        let response: ValuesResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!("Fetched {} rows", response.values.len());
        Ok(response.values)
    }

    async fn append_row(&self, cells: Vec<String>) -> Result<(), AppError> {
        let url = self.values_endpoint(&format!("{}:append", self.config.sheet_name))?;

        self.http
            .post(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
                ("includeValuesInResponse", "true"),
            ])
            .json(&ValuesBody {
                values: vec![cells],
            })
            .send()
            .await?
            .error_for_status()?;

        tracing::info!("Appended row to sheet '{}'", self.config.sheet_name);
        Ok(())
    }

    async fn update_row(&self, row_index: usize, cells: Vec<String>) -> Result<(), AppError> {
        // A1 notation is 1-based
        let range = format!("{}!A{}", self.config.sheet_name, row_index + 1);
        let url = self.values_endpoint(&range)?;

        self.http
            .put(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("includeValuesInResponse", "true"),
            ])
            .json(&ValuesBody {
                values: vec![cells],
            })
            .send()
            .await?
            .error_for_status()?;

        tracing::info!("Updated sheet row {}", row_index);
        Ok(())
    }

    async fn delete_row(&self, row_index: usize) -> Result<(), AppError> {
        let url = self.endpoint([format!("{}:batchUpdate", self.config.spreadsheet_id)])?;
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": self.config.sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row_index,
                        "endIndex": row_index + 1,
                    }
                }
            }]
        });

        self.http
            .post(url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        tracing::info!("Deleted sheet row {}", row_index);
        Ok(())
    }
}
