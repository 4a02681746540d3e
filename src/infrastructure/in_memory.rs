use crate::domain::billing::{ConsumeResult, SkuDetailsResult, SkuType, response_code};
use crate::domain::ports::{BillingListenerRef, BillingWrapper};
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Items and purchases served by an [`InMemoryBillingWrapper`].
///
/// Item records use the backend's JSON layout (`productId`, `title`,
/// `description`, `price`, ...).
#[derive(Debug, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub inapp: Vec<Value>,
    #[serde(default)]
    pub subs: Vec<Value>,
    /// Purchase tokens owned by the user.
    #[serde(default)]
    pub purchases: Vec<String>,
}

impl Catalog {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }
}

/// A billing backend holding its catalog in memory.
///
/// Always connected. Shared state sits behind `Arc<RwLock<_>>` so clones
/// serve the same catalog.
#[derive(Default, Clone)]
pub struct InMemoryBillingWrapper {
    items: Arc<RwLock<HashMap<SkuType, Vec<Value>>>>,
    /// Purchase token to acknowledged flag.
    purchases: Arc<RwLock<HashMap<String, bool>>>,
    connected: Arc<AtomicBool>,
    listener: Option<BillingListenerRef>,
}

impl InMemoryBillingWrapper {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: Catalog) -> Self {
        let items = HashMap::from([
            (SkuType::InApp, catalog.inapp),
            (SkuType::Subs, catalog.subs),
        ]);
        let purchases = catalog
            .purchases
            .into_iter()
            .map(|token| (token, false))
            .collect();

        Self {
            items: Arc::new(RwLock::new(items)),
            purchases: Arc::new(RwLock::new(purchases)),
            ..Self::default()
        }
    }

    pub fn with_listener(mut self, listener: BillingListenerRef) -> Self {
        self.listener = Some(listener);
        self
    }

    pub async fn add_item(&self, sku_type: SkuType, record: Value) {
        let mut items = self.items.write().await;
        items.entry(sku_type).or_default().push(record);
    }

    pub async fn add_purchase(&self, purchase_token: &str) {
        let mut purchases = self.purchases.write().await;
        purchases.insert(purchase_token.to_string(), false);
    }

    /// `None` if the token is not owned (never bought, or consumed).
    pub async fn is_acknowledged(&self, purchase_token: &str) -> Option<bool> {
        let purchases = self.purchases.read().await;
        purchases.get(purchase_token).copied()
    }
}

#[async_trait]
impl BillingWrapper for InMemoryBillingWrapper {
    async fn connect(&self) -> bool {
        if !self.connected.swap(true, Ordering::SeqCst)
            && let Some(listener) = &self.listener
        {
            listener.on_connected();
        }
        true
    }

    async fn query_sku_details(&self, sku_type: SkuType, skus: Vec<String>) -> SkuDetailsResult {
        log::debug!("Querying {} details for {:?}", sku_type, skus);
        let items = self.items.read().await;
        let records = items
            .get(&sku_type)
            .into_iter()
            .flatten()
            .filter(|record| {
                record
                    .get("productId")
                    .and_then(Value::as_str)
                    .is_some_and(|id| skus.iter().any(|sku| sku == id))
            })
            .map(ToString::to_string)
            .collect();
        SkuDetailsResult::ok(records)
    }

    async fn acknowledge(&self, purchase_token: String) -> i32 {
        let mut purchases = self.purchases.write().await;
        match purchases.get_mut(&purchase_token) {
            Some(acknowledged) => {
                *acknowledged = true;
                response_code::OK
            }
            None => response_code::ITEM_NOT_OWNED,
        }
    }

    async fn consume(&self, purchase_token: String) -> ConsumeResult {
        let mut purchases = self.purchases.write().await;
        let response_code = match purchases.remove(&purchase_token) {
            Some(_) => response_code::OK,
            None => response_code::ITEM_NOT_OWNED,
        };
        ConsumeResult {
            response_code,
            purchase_token,
        }
    }
}
