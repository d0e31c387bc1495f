use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A server-computed reversal associated with one payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(rename = "refundID", default)]
    pub refund_id: Option<String>,
    #[serde(rename = "paymentID")]
    pub payment_id: String,
    /// Computed by the backend; never supplied by this client.
    pub amount: f64,
    pub refund_date: NaiveDate,
}

/// Refund request payload. Deliberately carries no amount: the backend
/// computes it and the front-end only displays the result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    #[serde(rename = "refundID")]
    pub refund_id: Option<String>,
    #[serde(rename = "paymentID")]
    pub payment_id: String,
    pub refund_date: NaiveDate,
}
