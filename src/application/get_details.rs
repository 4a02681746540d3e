use super::callback::DigitalGoodsCallback;
use crate::domain::billing::{SkuDetailsResult, SkuType, response_code};
use crate::domain::bundle::Bundle;
use crate::domain::item_details::ItemDetails;
use crate::domain::ports::BillingWrapperRef;
use crate::error::Result;

pub const COMMAND_NAME: &str = "getDetails";

const PARAM_GET_DETAILS_ITEM_IDS: &str = "getDetails.itemIds";

pub const RESPONSE_GET_DETAILS: &str = "getDetails";
pub const RESPONSE_GET_DETAILS_RESPONSE_CODE: &str = "getDetails.responseCode";
pub const RESPONSE_GET_DETAILS_DETAILS_LIST: &str = "getDetails.detailsList";

/// Looks up item details for both one-time purchases and subscriptions.
pub struct GetDetailsCall {
    item_ids: Vec<String>,
    callback: DigitalGoodsCallback,
}

impl GetDetailsCall {
    /// Builds the call from its arguments, `None` if they are incomplete.
    pub fn create(args: &Bundle, callback: DigitalGoodsCallback) -> Option<Self> {
        match args.get_string_array(PARAM_GET_DETAILS_ITEM_IDS) {
            Ok(item_ids) => Some(Self {
                item_ids: item_ids.to_vec(),
                callback,
            }),
            Err(e) => {
                log::debug!("Rejecting {}: {}", COMMAND_NAME, e);
                None
            }
        }
    }

    pub fn create_bundle_for_testing(item_ids: &[&str]) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_string_array(
            PARAM_GET_DETAILS_ITEM_IDS,
            item_ids.iter().map(|id| id.to_string()).collect(),
        );
        bundle
    }

    pub fn item_ids(&self) -> &[String] {
        &self.item_ids
    }

    pub async fn call(self, wrapper: BillingWrapperRef) {
        if !wrapper.connect().await {
            self.respond(response_code::SERVICE_DISCONNECTED, Vec::new());
            return;
        }

        let (in_app, subs) = tokio::join!(
            wrapper.query_sku_details(SkuType::InApp, self.item_ids.clone()),
            wrapper.query_sku_details(SkuType::Subs, self.item_ids.clone()),
        );

        let (code, details) = merge_results(in_app, subs);
        self.respond(code, details);
    }

    fn respond(&self, code: i32, details: Vec<ItemDetails>) {
        (self.callback)(RESPONSE_GET_DETAILS, create_response_bundle(code, &details));
    }
}

/// Combines both queries into one response code and list.
///
/// Records that fail to parse are dropped and turn an otherwise successful
/// response into `ERROR`.
fn merge_results(in_app: SkuDetailsResult, subs: SkuDetailsResult) -> (i32, Vec<ItemDetails>) {
    let mut code = [in_app.response_code, subs.response_code]
        .into_iter()
        .find(|code| *code != response_code::OK)
        .unwrap_or(response_code::OK);

    let mut details = Vec::new();
    for record in in_app.records.iter().chain(subs.records.iter()) {
        match ItemDetails::from_sku_details(record) {
            Ok(item) => details.push(item),
            Err(e) => {
                log::warn!("Skipping malformed item details: {}", e);
                if code == response_code::OK {
                    code = response_code::ERROR;
                }
            }
        }
    }
    (code, details)
}

pub fn create_response_bundle(code: i32, details: &[ItemDetails]) -> Bundle {
    let mut bundle = Bundle::new();
    bundle.put_int(RESPONSE_GET_DETAILS_RESPONSE_CODE, code);
    bundle.put_bundle_array(
        RESPONSE_GET_DETAILS_DETAILS_LIST,
        details.iter().map(ItemDetails::to_bundle).collect(),
    );
    bundle
}

/// Reads the details list back out of a response bundle.
pub fn parse_response_bundle(bundle: &Bundle) -> Result<(i32, Vec<ItemDetails>)> {
    let code = bundle.get_int(RESPONSE_GET_DETAILS_RESPONSE_CODE)?;
    let details = bundle
        .get_bundle_array(RESPONSE_GET_DETAILS_DETAILS_LIST)?
        .iter()
        .map(ItemDetails::from_bundle)
        .collect::<Result<Vec<_>>>()?;
    Ok((code, details))
}
