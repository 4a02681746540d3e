use async_trait::async_trait;
use playbilling::domain::billing::{ConsumeResult, SkuDetailsResult, SkuType, response_code};
use playbilling::domain::ports::{BillingListenerRef, BillingWrapper};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::timeout;

const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Default, Clone)]
struct Requests {
    queried: Vec<(SkuType, Vec<String>)>,
    acknowledge_token: Option<String>,
    consume_token: Option<String>,
}

impl Requests {
    fn queried_for(&self, sku_type: SkuType) -> Option<&Vec<String>> {
        self.queried
            .iter()
            .find(|(queried, _)| *queried == sku_type)
            .map(|(_, skus)| skus)
    }
}

/// Billing backend driven by the test.
///
/// Every operation blocks until the test triggers its result, so connection,
/// queries and purchase updates can be completed one by one and in any order.
/// A triggered result stays in place and also answers later requests.
pub struct MockBillingWrapper {
    listener: Option<BillingListenerRef>,
    connected: watch::Sender<bool>,
    in_app_details: watch::Sender<Option<SkuDetailsResult>>,
    subs_details: watch::Sender<Option<SkuDetailsResult>>,
    acknowledge_result: watch::Sender<Option<i32>>,
    consume_result: watch::Sender<Option<ConsumeResult>>,
    requests: watch::Sender<Requests>,
}

impl Default for MockBillingWrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBillingWrapper {
    pub fn new() -> Self {
        Self {
            listener: None,
            connected: watch::channel(false).0,
            in_app_details: watch::channel(None).0,
            subs_details: watch::channel(None).0,
            acknowledge_result: watch::channel(None).0,
            consume_result: watch::channel(None).0,
            requests: watch::channel(Requests::default()).0,
        }
    }

    pub fn with_listener(mut self, listener: BillingListenerRef) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn trigger_connected(&self) {
        self.connected.send_replace(true);
        if let Some(listener) = &self.listener {
            listener.on_connected();
        }
    }

    pub fn trigger_disconnected(&self) {
        self.connected.send_replace(false);
        if let Some(listener) = &self.listener {
            listener.on_disconnected();
        }
    }

    pub fn trigger_purchase_flow_complete(&self, result: i32) {
        if let Some(listener) = &self.listener {
            listener.on_purchase_flow_complete(result);
        }
    }

    pub fn trigger_on_got_in_app_sku_details(&self, records: Vec<String>) {
        self.in_app_details.send_replace(Some(SkuDetailsResult::ok(records)));
    }

    pub fn trigger_on_got_subs_sku_details(&self, records: Vec<String>) {
        self.subs_details.send_replace(Some(SkuDetailsResult::ok(records)));
    }

    pub fn trigger_sku_details_failure(&self, sku_type: SkuType, code: i32) {
        self.details_slot(sku_type)
            .send_replace(Some(SkuDetailsResult::failed(code)));
    }

    pub fn trigger_acknowledge(&self, code: i32) {
        self.acknowledge_result.send_replace(Some(code));
    }

    pub fn trigger_consume(&self, code: i32, purchase_token: &str) {
        self.consume_result.send_replace(Some(ConsumeResult {
            response_code: code,
            purchase_token: purchase_token.to_string(),
        }));
    }

    /// Waits until both one-time and subscription details were requested.
    pub async fn wait_for_query_sku_details(&self) -> bool {
        let mut rx = self.requests.subscribe();
        let queried = rx.wait_for(|requests| {
            requests.queried_for(SkuType::InApp).is_some()
                && requests.queried_for(SkuType::Subs).is_some()
        });
        timeout(WAIT_TIMEOUT, queried)
            .await
            .is_ok_and(|result| result.is_ok())
    }

    pub async fn wait_for_acknowledge_token(&self) -> Option<String> {
        let mut rx = self.requests.subscribe();
        match timeout(WAIT_TIMEOUT, rx.wait_for(|r| r.acknowledge_token.is_some())).await {
            Ok(Ok(requests)) => requests.acknowledge_token.clone(),
            _ => None,
        }
    }

    pub async fn wait_for_consume_token(&self) -> Option<String> {
        let mut rx = self.requests.subscribe();
        match timeout(WAIT_TIMEOUT, rx.wait_for(|r| r.consume_token.is_some())).await {
            Ok(Ok(requests)) => requests.consume_token.clone(),
            _ => None,
        }
    }

    /// Item ids of the first query of the given kind, if any was made.
    pub fn queried_item_ids(&self, sku_type: SkuType) -> Option<Vec<String>> {
        self.requests.borrow().queried_for(sku_type).cloned()
    }

    pub fn acknowledge_token(&self) -> Option<String> {
        self.requests.borrow().acknowledge_token.clone()
    }

    pub fn consume_token(&self) -> Option<String> {
        self.requests.borrow().consume_token.clone()
    }

    fn details_slot(&self, sku_type: SkuType) -> &watch::Sender<Option<SkuDetailsResult>> {
        match sku_type {
            SkuType::InApp => &self.in_app_details,
            SkuType::Subs => &self.subs_details,
        }
    }
}

#[async_trait]
impl BillingWrapper for MockBillingWrapper {
    async fn connect(&self) -> bool {
        let mut rx = self.connected.subscribe();
        rx.wait_for(|connected| *connected).await.is_ok()
    }

    async fn query_sku_details(&self, sku_type: SkuType, skus: Vec<String>) -> SkuDetailsResult {
        self.requests
            .send_modify(|requests| requests.queried.push((sku_type, skus)));

        let mut rx = self.details_slot(sku_type).subscribe();
        rx.wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|result| result.clone())
            .unwrap_or_else(|| SkuDetailsResult::failed(response_code::ERROR))
    }

    async fn acknowledge(&self, purchase_token: String) -> i32 {
        self.requests
            .send_modify(|requests| requests.acknowledge_token = Some(purchase_token));

        let mut rx = self.acknowledge_result.subscribe();
        rx.wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|code| *code)
            .unwrap_or(response_code::ERROR)
    }

    async fn consume(&self, purchase_token: String) -> ConsumeResult {
        self.requests
            .send_modify(|requests| requests.consume_token = Some(purchase_token.clone()));

        let mut rx = self.consume_result.subscribe();
        rx.wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|result| result.clone())
            .unwrap_or(ConsumeResult {
                response_code: response_code::ERROR,
                purchase_token,
            })
    }
}
