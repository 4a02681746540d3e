use super::billing::{ConsumeResult, SkuDetailsResult, SkuType};
use super::bundle::Bundle;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Connection to the purchasing backend.
///
/// Every operation resolves exactly once with the backend's response code.
#[async_trait]
pub trait BillingWrapper: Send + Sync {
    /// Resolves once the backend connection is usable, `false` if it could
    /// not be established.
    async fn connect(&self) -> bool;
    async fn query_sku_details(&self, sku_type: SkuType, skus: Vec<String>) -> SkuDetailsResult;
    async fn acknowledge(&self, purchase_token: String) -> i32;
    async fn consume(&self, purchase_token: String) -> ConsumeResult;
}

/// Lifecycle notifications emitted by a [`BillingWrapper`].
pub trait BillingListener: Send + Sync {
    fn on_connected(&self);
    fn on_disconnected(&self);
    fn on_purchase_flow_complete(&self, result: i32);
}

/// Delivery channel back to the process that issued a command.
///
/// An error means the remote endpoint is gone.
pub trait RemoteCallback: Send + Sync {
    fn run_extra_callback(&self, callback_name: &str, args: Bundle) -> Result<()>;
}

pub type BillingWrapperRef = Arc<dyn BillingWrapper>;
pub type BillingListenerRef = Arc<dyn BillingListener>;
pub type RemoteCallbackRef = Arc<dyn RemoteCallback>;
