//! Known shapes of processor JSON.
//!
//! The processor has moved fields between API versions, so each value is
//! looked up through an ordered list of JSON pointers and the first non-empty
//! string wins. Keep these lists short; every entry is a shape we have seen.

use serde_json::Value;

use super::status::DonationStatus;

/// Checkout URL locations in a create-payment response, most specific first.
pub const CHECKOUT_URL_POINTERS: [&str; 5] = [
    "/checkout_url",
    "/response/payment/url",
    "/payment/url",
    "/payment/payment_url",
    "/payment_url",
];

/// Invoice number locations in a callback body.
pub const INVOICE_NUMBER_POINTERS: [&str; 2] = ["/order/invoice_number", "/invoice_number"];

/// Status locations in a callback body.
pub const STATUS_POINTERS: [&str; 2] = ["/transaction/status", "/status"];

/// Returns the first non-empty string found at any of `pointers`.
pub fn first_string<'a>(body: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .filter_map(|pointer| body.pointer(pointer))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
}

pub fn extract_checkout_url(body: &Value) -> Option<&str> {
    first_string(body, &CHECKOUT_URL_POINTERS)
}

/// Invoice and status reported by a callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackNotification {
    pub invoice_number: Option<String>,
    /// Status text exactly as reported, `UNKNOWN` when absent.
    pub reported_status: String,
    pub status: DonationStatus,
}

pub fn extract_notification(body: &Value) -> CallbackNotification {
    let reported_status = first_string(body, &STATUS_POINTERS)
        .unwrap_or(DonationStatus::Unknown.as_str())
        .to_string();

    CallbackNotification {
        invoice_number: first_string(body, &INVOICE_NUMBER_POINTERS).map(str::to_string),
        status: DonationStatus::from_processor(&reported_status),
        reported_status,
    }
}
