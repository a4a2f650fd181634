//! Donation module - records, invoice numbers, status lifecycle, and the
//! processor request/response shapes.

mod checkout;
mod errors;
mod invoice;
mod record;
mod response_shapes;
mod status;

pub use checkout::{
    CheckoutPayload, CustomerSection, LineItem, MetadataSection, OrderSection, PayloadOptions,
    PaymentSection, RedirectUrls,
};
pub use errors::DonationError;
pub use invoice::{InvoiceNumber, InvoiceNumberGenerator, MAX_INVOICE_NUMBER_LEN};
pub use record::{
    Amount, DonationDraft, DonationRecord, DonorInfo, RawAmount, DEFAULT_DONOR_EMAIL,
    DEFAULT_DONOR_NAME, DEFAULT_DONOR_PHONE, DEFAULT_FREQUENCY,
};
pub use response_shapes::{
    extract_checkout_url, extract_notification, first_string, CallbackNotification,
    CHECKOUT_URL_POINTERS, INVOICE_NUMBER_POINTERS, STATUS_POINTERS,
};
pub use status::DonationStatus;
