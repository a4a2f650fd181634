//! Port error conversions into `DonationError`.

use crate::domain::donation::DonationError;
use crate::ports::{AuditLogError, GatewayError, LedgerError};

impl From<GatewayError> for DonationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidResponse { raw, .. } => {
                DonationError::contract_violation(serde_json::Value::String(raw))
            }
            other => {
                let status = other.status();
                DonationError::upstream_unavailable(other.to_string(), status)
            }
        }
    }
}

impl From<LedgerError> for DonationError {
    fn from(err: LedgerError) -> Self {
        DonationError::infrastructure(err.to_string())
    }
}

impl From<AuditLogError> for DonationError {
    fn from(err: AuditLogError) -> Self {
        DonationError::infrastructure(err.to_string())
    }
}
