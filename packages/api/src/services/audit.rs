//! `/audit` endpoints (admin only).

use serde::Serialize;

use crate::client::{ApiClient, Page};
use crate::error::Result;
use crate::models::{AuditLog, AuditQuery, AuditStats};

pub struct AuditService<'a> {
    pub(crate) client: &'a ApiClient,
}

#[derive(Serialize)]
struct DaysQuery {
    days: u32,
}

impl AuditService<'_> {
    pub async fn list(&self, query: &AuditQuery) -> Result<Vec<AuditLog>> {
        self.client.get_json("/audit", query).await
    }

    /// Counts over the last `days` days.
    pub async fn stats(&self, days: u32) -> Result<AuditStats> {
        self.client
            .get_json("/audit/stats", &DaysQuery { days })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<AuditLog> {
        self.client.get(&format!("/audit/{id}")).await
    }

    pub async fn by_user(&self, user_id: i64, page: Page) -> Result<Vec<AuditLog>> {
        self.client
            .get_json(&format!("/audit/user/{user_id}"), &page)
            .await
    }
}
