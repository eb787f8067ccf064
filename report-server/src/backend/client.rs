//! Backend REST client
//!
//! Read-only client for the hosted backend's PostgREST-style API. Row
//! filters are expressed as query parameters (`created_at=gte.…`,
//! `order_id=in.(…)`); the API key travels both as `apikey` and as a
//! bearer token.
//!
//! Snapshots are cached per period with a short TTL. This is a performance
//! optimization only, never a correctness mechanism: identical inputs
//! produce identical reports with or without the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use shared::error::{AppError, AppResult};
use shared::models::{InventoryItem, MenuItem, Order, OrderItem};

use crate::core::Config;
use crate::reporting::Period;

use super::ReportSnapshot;

/// Maximum ids per `in.(…)` filter before the request is chunked
const IN_FILTER_CHUNK: usize = 100;

#[derive(Clone)]
struct CachedSnapshot {
    fetched_at: Instant,
    snapshot: Arc<ReportSnapshot>,
}

/// Read-only client for the hosted backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
    snapshot_ttl: Duration,
    cache: Arc<DashMap<String, CachedSnapshot>>,
}

impl std::fmt::Debug for CachedSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSnapshot")
            .field("fetched_at", &self.fetched_at)
            .finish()
    }
}

impl BackendClient {
    /// Create a client from the server configuration
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
            api_key: config.backend_api_key.clone(),
            snapshot_ttl: Duration::from_secs(config.snapshot_cache_ttl_secs),
            cache: Arc::new(DashMap::new()),
        }
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .client
            .get(&url)
            .query(&query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("{} fetch failed: {}", table, e)))?;

        Self::handle_response(table, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        table: &str,
        response: reqwest::Response,
    ) -> AppResult<Vec<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::NOT_FOUND => Err(AppError::not_found(table.to_string())),
                _ => Err(AppError::upstream(format!(
                    "{} fetch returned {}: {}",
                    table, status, text
                ))),
            };
        }

        response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("{} decode failed: {}", table, e)))
    }

    /// Orders created inside the period (half-open UTC range filter;
    /// the in-memory period filter re-checks the same day boundaries)
    pub async fn fetch_orders(&self, period: &Period) -> AppResult<Vec<Order>> {
        let (start, end) = period.utc_range();
        self.fetch_rows(
            "orders",
            &[
                ("created_at", format!("gte.{}", start.to_rfc3339())),
                ("created_at", format!("lt.{}", end.to_rfc3339())),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    /// Order lines for the given orders, chunked to keep URLs bounded
    pub async fn fetch_order_items(&self, order_ids: &[String]) -> AppResult<Vec<OrderItem>> {
        let mut items = Vec::new();
        for chunk in order_ids.chunks(IN_FILTER_CHUNK) {
            let quoted: Vec<String> = chunk.iter().map(|id| format!("\"{}\"", id)).collect();
            let filter = format!("in.({})", quoted.join(","));
            let mut batch: Vec<OrderItem> = self
                .fetch_rows("order_items", &[("order_id", filter)])
                .await?;
            items.append(&mut batch);
        }
        Ok(items)
    }

    pub async fn fetch_menu_items(&self) -> AppResult<Vec<MenuItem>> {
        self.fetch_rows("menu_items", &[]).await
    }

    pub async fn fetch_inventory(&self) -> AppResult<Vec<InventoryItem>> {
        self.fetch_rows("inventory_items", &[]).await
    }

    /// Fetch everything a report needs for one period.
    ///
    /// Served from the per-period cache when a fresh enough snapshot
    /// exists.
    pub async fn fetch_snapshot(&self, period: &Period) -> AppResult<Arc<ReportSnapshot>> {
        let cache_key = format!("{}..{}", period.start, period.end);

        if let Some(cached) = self.cache.get(&cache_key) {
            if cached.fetched_at.elapsed() < self.snapshot_ttl {
                tracing::debug!(period = %cache_key, "Serving report snapshot from cache");
                return Ok(cached.snapshot.clone());
            }
        }

        let orders = self.fetch_orders(period).await?;
        let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
        let order_items = if order_ids.is_empty() {
            vec![]
        } else {
            self.fetch_order_items(&order_ids).await?
        };
        let menu_items = self.fetch_menu_items().await?;
        let inventory = self.fetch_inventory().await?;

        tracing::debug!(
            period = %cache_key,
            orders = orders.len(),
            order_items = order_items.len(),
            menu_items = menu_items.len(),
            inventory = inventory.len(),
            "Fetched report snapshot"
        );

        let snapshot = Arc::new(ReportSnapshot {
            orders,
            order_items,
            menu_items,
            inventory,
        });

        self.cache
            .retain(|_, v| v.fetched_at.elapsed() < self.snapshot_ttl);
        self.cache.insert(
            cache_key,
            CachedSnapshot {
                fetched_at: Instant::now(),
                snapshot: snapshot.clone(),
            },
        );

        Ok(snapshot)
    }
}
