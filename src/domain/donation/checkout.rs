//! Checkout request body sent to the payment processor.

use serde::{Deserialize, Serialize};

use super::record::DonationDraft;

/// Where the processor sends the donor and its callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    pub success_url: String,
    pub failed_url: String,
    pub callback_url: String,
}

/// Installation-wide knobs for the checkout body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadOptions {
    pub currency: Option<String>,
    /// Minutes the donor has to complete payment.
    pub payment_due_date: u32,
    /// Tag stored in `metadata.project`.
    pub project: String,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            currency: None,
            payment_due_date: 60,
            project: "TOA Cares".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPayload {
    pub order: OrderSection,
    pub payment: PaymentSection,
    pub customer: CustomerSection,
    pub metadata: MetadataSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSection {
    pub amount: i64,
    pub invoice_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub line_items: Vec<LineItem>,
    pub failed_url: String,
    pub success_url: String,
    pub callback_url: String,
    pub auto_redirect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSection {
    pub payment_due_date: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSection {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSection {
    pub donation_frequency: String,
    pub project: String,
}

impl CheckoutPayload {
    pub fn for_donation(
        draft: &DonationDraft,
        urls: &RedirectUrls,
        options: &PayloadOptions,
    ) -> Self {
        let amount = draft.amount.value();
        Self {
            order: OrderSection {
                amount,
                invoice_number: draft.invoice_number.to_string(),
                currency: options.currency.clone(),
                line_items: vec![LineItem {
                    name: "Donation".to_string(),
                    price: amount,
                    quantity: 1,
                }],
                failed_url: urls.failed_url.clone(),
                success_url: urls.success_url.clone(),
                callback_url: urls.callback_url.clone(),
                auto_redirect: true,
            },
            payment: PaymentSection {
                payment_due_date: options.payment_due_date,
            },
            customer: CustomerSection {
                name: draft.donor.name_or_default().to_string(),
                email: draft.donor.email_or_default().to_string(),
                phone: draft.donor.phone_or_default().to_string(),
            },
            metadata: MetadataSection {
                donation_frequency: draft.frequency.clone(),
                project: options.project.clone(),
            },
        }
    }

    /// Serializes once; these exact bytes are signed and sent.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
