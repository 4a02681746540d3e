use super::bundle::Bundle;
use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

const ITEM_DETAILS_ID: &str = "id";
const ITEM_DETAILS_TITLE: &str = "title";
const ITEM_DETAILS_DESC: &str = "description";
const ITEM_DETAILS_VALUE: &str = "value";
const ITEM_DETAILS_CURRENCY: &str = "currency";

/// Details of a purchasable item, as reported back to the web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Price magnitude, e.g. `"123.45"`.
    pub value: String,
    /// ISO 4217 currency code, e.g. `"GBP"`.
    pub currency: String,
}

/// Item record as produced by the billing backend.
#[derive(Debug, Deserialize)]
struct SkuRecord {
    #[serde(rename = "productId")]
    product_id: String,
    title: String,
    #[serde(default)]
    description: String,
    price: String,
    price_currency_code: Option<String>,
    price_amount_micros: Option<i64>,
}

impl ItemDetails {
    /// Parses a backend item record (a JSON document).
    ///
    /// The price is either combined (`"123.45 GBP"` or `"GBP 123.45"`) or
    /// split across `price`/`price_amount_micros` and `price_currency_code`.
    pub fn from_sku_details(json: &str) -> Result<Self> {
        let record: SkuRecord = serde_json::from_str(json)?;
        let (value, currency) = match record.price_currency_code {
            Some(currency) => {
                let amount = match record.price_amount_micros {
                    Some(micros) if micros < 0 => {
                        return Err(BillingError::MalformedPrice(micros.to_string()));
                    }
                    Some(micros) => Decimal::new(micros, 6).normalize(),
                    None => parse_amount(&record.price)?,
                };
                (amount, parse_currency(&currency)?)
            }
            None => split_price(&record.price)?,
        };

        Ok(Self {
            id: record.product_id,
            title: record.title,
            description: record.description,
            value: value.to_string(),
            currency,
        })
    }

    pub fn from_bundle(bundle: &Bundle) -> Result<Self> {
        Ok(Self {
            id: bundle.get_string(ITEM_DETAILS_ID)?.to_string(),
            title: bundle.get_string(ITEM_DETAILS_TITLE)?.to_string(),
            description: bundle.get_string(ITEM_DETAILS_DESC)?.to_string(),
            value: bundle.get_string(ITEM_DETAILS_VALUE)?.to_string(),
            currency: bundle.get_string(ITEM_DETAILS_CURRENCY)?.to_string(),
        })
    }

    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.put_string(ITEM_DETAILS_ID, self.id.as_str());
        bundle.put_string(ITEM_DETAILS_TITLE, self.title.as_str());
        bundle.put_string(ITEM_DETAILS_DESC, self.description.as_str());
        bundle.put_string(ITEM_DETAILS_VALUE, self.value.as_str());
        bundle.put_string(ITEM_DETAILS_CURRENCY, self.currency.as_str());
        bundle
    }
}

fn split_price(price: &str) -> Result<(Decimal, String)> {
    let parts: Vec<&str> = price.split_whitespace().collect();
    match parts.as_slice() {
        [amount, currency] if is_currency_code(currency) => {
            Ok((parse_amount(amount)?, currency.to_string()))
        }
        [currency, amount] if is_currency_code(currency) => {
            Ok((parse_amount(amount)?, currency.to_string()))
        }
        _ => Err(BillingError::MalformedPrice(price.to_string())),
    }
}

fn parse_amount(amount: &str) -> Result<Decimal> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|_| BillingError::MalformedPrice(amount.to_string()))?;
    if value.is_sign_negative() {
        return Err(BillingError::MalformedPrice(amount.to_string()));
    }
    Ok(value)
}

fn parse_currency(currency: &str) -> Result<String> {
    let currency = currency.trim();
    if is_currency_code(currency) {
        Ok(currency.to_string())
    } else {
        Err(BillingError::MalformedPrice(currency.to_string()))
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}
