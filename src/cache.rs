use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Invoice;

/// In-process cache of invoice listings, keyed by the path that serves them.
/// A mutation revalidates its path, which empties the entry; the next read of
/// that listing goes back to the database.
#[derive(Clone, Default)]
pub struct ListingCache {
    inner: Arc<RwLock<HashMap<String, Vec<Invoice>>>>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &str) -> Option<Vec<Invoice>> {
        self.inner.read().await.get(path).cloned()
    }

    pub async fn put(&self, path: &str, rows: Vec<Invoice>) {
        self.inner.write().await.insert(path.to_string(), rows);
    }

    /// Mark the listing at `path` stale.
    pub async fn revalidate(&self, path: &str) {
        if self.inner.write().await.remove(path).is_some() {
            tracing::debug!(path, "listing cache revalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    fn invoice(customer_id: &str) -> Invoice {
        Invoice {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            amount: 1000,
            status: "pending".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn put_then_get_returns_rows() {
        let cache = ListingCache::new();
        assert!(cache.get("/dashboard/invoices").await.is_none());

        cache.put("/dashboard/invoices", vec![invoice("c1")]).await;
        let rows = cache.get("/dashboard/invoices").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].customer_id, "c1");
    }

    #[tokio::test]
    async fn revalidate_empties_only_its_path() {
        let cache = ListingCache::new();
        cache.put("/dashboard/invoices", vec![invoice("c1")]).await;
        cache.put("/dashboard/customers", vec![invoice("c2")]).await;

        cache.revalidate("/dashboard/invoices").await;

        assert!(cache.get("/dashboard/invoices").await.is_none());
        assert!(cache.get("/dashboard/customers").await.is_some());
    }

    #[tokio::test]
    async fn revalidating_a_cold_path_is_a_no_op() {
        let cache = ListingCache::new();
        cache.revalidate("/dashboard/invoices").await;
        assert!(cache.get("/dashboard/invoices").await.is_none());
    }
}
