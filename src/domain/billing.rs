use std::fmt;

/// Response codes reported by the billing backend.
pub mod response_code {
    pub const SERVICE_TIMEOUT: i32 = -3;
    pub const FEATURE_NOT_SUPPORTED: i32 = -2;
    pub const SERVICE_DISCONNECTED: i32 = -1;
    pub const OK: i32 = 0;
    pub const USER_CANCELED: i32 = 1;
    pub const SERVICE_UNAVAILABLE: i32 = 2;
    pub const BILLING_UNAVAILABLE: i32 = 3;
    pub const ITEM_UNAVAILABLE: i32 = 4;
    pub const DEVELOPER_ERROR: i32 = 5;
    pub const ERROR: i32 = 6;
    pub const ITEM_ALREADY_OWNED: i32 = 7;
    pub const ITEM_NOT_OWNED: i32 = 8;
}

/// Kind of item queried from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkuType {
    /// One-time purchases.
    InApp,
    /// Subscriptions.
    Subs,
}

impl fmt::Display for SkuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkuType::InApp => write!(f, "inapp"),
            SkuType::Subs => write!(f, "subs"),
        }
    }
}

/// Result of an item details query: the backend's response code and the
/// matching records, each a JSON document as produced by the backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkuDetailsResult {
    pub response_code: i32,
    pub records: Vec<String>,
}

impl SkuDetailsResult {
    pub fn ok(records: Vec<String>) -> Self {
        Self {
            response_code: response_code::OK,
            records,
        }
    }

    pub fn failed(response_code: i32) -> Self {
        Self {
            response_code,
            records: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumeResult {
    pub response_code: i32,
    pub purchase_token: String,
}
