pub mod mock;

use async_trait::async_trait;
use mock::MockBillingWrapper;
use playbilling::application::callback::DigitalGoodsCallback;
use playbilling::application::handler::DigitalGoodsRequestHandler;
use playbilling::domain::billing::{ConsumeResult, SkuDetailsResult, SkuType, response_code};
use playbilling::domain::bundle::Bundle;
use playbilling::domain::ports::BillingWrapper;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

pub const SKU_DETAILS: &str = r#"{
    "productId": "id1",
    "title": "My item",
    "description": "Some description.",
    "price": "123.45 GBP"
}"#;

pub fn setup() -> (Arc<MockBillingWrapper>, DigitalGoodsRequestHandler) {
    let wrapper = Arc::new(MockBillingWrapper::new());
    let handler = DigitalGoodsRequestHandler::new(wrapper.clone(), Handle::current());
    (wrapper, handler)
}

pub fn recording_callback() -> (DigitalGoodsCallback, mpsc::UnboundedReceiver<(String, Bundle)>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let callback: DigitalGoodsCallback = Arc::new(move |name: &str, args: Bundle| {
        sender.send((name.to_string(), args)).unwrap();
    });
    (callback, receiver)
}

pub async fn next_response(
    responses: &mut mpsc::UnboundedReceiver<(String, Bundle)>,
) -> (String, Bundle) {
    tokio::time::timeout(Duration::from_secs(5), responses.recv())
        .await
        .expect("callback was not triggered")
        .expect("callback was dropped")
}

pub async fn assert_no_more_responses(responses: &mut mpsc::UnboundedReceiver<(String, Bundle)>) {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert!(responses.try_recv().is_err(), "callback triggered more than once");
}

/// Backend that only counts how often it is used.
#[derive(Default)]
pub struct CountingBillingWrapper {
    refuse_connection: bool,
    connects: AtomicUsize,
    operations: AtomicUsize,
}

impl CountingBillingWrapper {
    /// A backend whose connection can never be established.
    pub fn disconnected() -> Self {
        Self {
            refuse_connection: true,
            ..Self::default()
        }
    }

    /// Every call, connection attempts included.
    pub fn calls(&self) -> usize {
        self.connects() + self.operations()
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Queries, acknowledgements and consumptions.
    pub fn operations(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BillingWrapper for CountingBillingWrapper {
    async fn connect(&self) -> bool {
        self.connects.fetch_add(1, Ordering::SeqCst);
        !self.refuse_connection
    }

    async fn query_sku_details(&self, _sku_type: SkuType, _skus: Vec<String>) -> SkuDetailsResult {
        self.operations.fetch_add(1, Ordering::SeqCst);
        SkuDetailsResult::ok(Vec::new())
    }

    async fn acknowledge(&self, _purchase_token: String) -> i32 {
        self.operations.fetch_add(1, Ordering::SeqCst);
        response_code::OK
    }

    async fn consume(&self, purchase_token: String) -> ConsumeResult {
        self.operations.fetch_add(1, Ordering::SeqCst);
        ConsumeResult {
            response_code: response_code::OK,
            purchase_token,
        }
    }
}
