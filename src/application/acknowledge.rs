use super::callback::DigitalGoodsCallback;
use crate::domain::billing::response_code;
use crate::domain::bundle::Bundle;
use crate::domain::ports::BillingWrapperRef;
use crate::error::Result;

pub const COMMAND_NAME: &str = "acknowledge";

const PARAM_ACKNOWLEDGE_PURCHASE_TOKEN: &str = "acknowledge.purchaseToken";
const PARAM_ACKNOWLEDGE_MAKE_AVAILABLE_AGAIN: &str = "acknowledge.makeAvailableAgain";

pub const RESPONSE_ACKNOWLEDGE: &str = "acknowledge";
pub const RESPONSE_ACKNOWLEDGE_RESPONSE_CODE: &str = "acknowledge.responseCode";

/// Acknowledges a purchase, or consumes it when it should not be made
/// available again.
pub struct AcknowledgeCall {
    purchase_token: String,
    make_available_again: bool,
    callback: DigitalGoodsCallback,
}

impl AcknowledgeCall {
    pub fn create(args: &Bundle, callback: DigitalGoodsCallback) -> Option<Self> {
        match Self::parse_args(args) {
            Ok((purchase_token, make_available_again)) => Some(Self {
                purchase_token,
                make_available_again,
                callback,
            }),
            Err(e) => {
                log::debug!("Rejecting {}: {}", COMMAND_NAME, e);
                None
            }
        }
    }

    fn parse_args(args: &Bundle) -> Result<(String, bool)> {
        let token = args.get_string(PARAM_ACKNOWLEDGE_PURCHASE_TOKEN)?;
        let make_available_again = args.get_bool(PARAM_ACKNOWLEDGE_MAKE_AVAILABLE_AGAIN)?;
        Ok((token.to_string(), make_available_again))
    }

    pub fn create_bundle_for_testing(purchase_token: &str, make_available_again: bool) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_string(PARAM_ACKNOWLEDGE_PURCHASE_TOKEN, purchase_token);
        bundle.put_bool(PARAM_ACKNOWLEDGE_MAKE_AVAILABLE_AGAIN, make_available_again);
        bundle
    }

    pub async fn call(self, wrapper: BillingWrapperRef) {
        let code = if !wrapper.connect().await {
            response_code::SERVICE_DISCONNECTED
        } else if self.make_available_again {
            wrapper.acknowledge(self.purchase_token.clone()).await
        } else {
            wrapper.consume(self.purchase_token.clone()).await.response_code
        };

        (self.callback)(RESPONSE_ACKNOWLEDGE, create_response_bundle(code));
    }
}

pub fn create_response_bundle(code: i32) -> Bundle {
    let mut bundle = Bundle::new();
    bundle.put_int(RESPONSE_ACKNOWLEDGE_RESPONSE_CODE, code);
    bundle
}
