//! Remote Inspection Store
//!
//! HTTP key-value table in the PostgREST dialect: rows of `(id, data, updated_at)`,
//! authenticated with an api key sent both as `apikey` and as a bearer token.

use async_trait::async_trait;
use inspection_checklist::Inspection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::traits::{InspectionStore, SaveOutcome, SaveSource};
use crate::domain::{StoreError, StoreResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

#[derive(Serialize)]
struct UpsertRow<'a> {
    id: &'a str,
    data: &'a Inspection,
    updated_at: String,
}

#[derive(Deserialize)]
struct DataRow {
    data: serde_json::Value,
}

impl RemoteStore {
    pub fn new(base_url: &str, api_key: &str, table: &str) -> StoreResult<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        })
    }

    pub fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::RemoteStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl InspectionStore for RemoteStore {
    async fn save(&self, id: &str, inspection: &Inspection) -> StoreResult<SaveOutcome> {
        let row = UpsertRow {
            id,
            data: inspection,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row);
        let response = self.authorized(request).send().await?;
        Self::check(response).await?;

        log::debug!("saved inspection {} to {}", id, self.table);
        Ok(SaveOutcome::saved(SaveSource::Remote))
    }

    async fn load(&self, id: &str) -> StoreResult<Option<Inspection>> {
        let filter = format!("eq.{}", id);
        let request = self
            .client
            .get(self.table_url())
            .query(&[("id", filter.as_str()), ("select", "data")]);
        let response = self.authorized(request).send().await?;
        let rows: Vec<DataRow> = Self::check(response).await?.json().await?;

        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        match serde_json::from_value(row.data) {
            Ok(inspection) => Ok(Some(inspection)),
            Err(e) => {
                log::warn!("remote inspection {} is malformed: {}", id, e);
                Ok(None)
            }
        }
    }
}
