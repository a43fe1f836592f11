use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::SplitBillError;
use crate::core::models::{Address, Amount, Bill, BillIndex, BillStatus, Creditor};

#[derive(Deserialize, ToSchema)]
pub struct CreateBillRequest {
    pub names: Vec<String>,
    pub addresses: Vec<String>,
    /// Owed amounts in minor units, as decimal strings.
    #[schema(example = json!(["100", "50", "50"]))]
    pub amounts: Vec<String>,
    /// Defaults to the first participant.
    pub creditor: Option<CreditorRequest>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CreditorRequest {
    Pot,
    /// Address of the participant who fronted the bill.
    Participant(String),
}

/// Parsed form of a [`CreateBillRequest`], ready for the service.
pub struct NewBill {
    pub names: Vec<String>,
    pub addresses: Vec<Address>,
    pub amounts: Vec<Amount>,
    pub creditor: Creditor,
}

impl CreateBillRequest {
    pub fn parse(self) -> Result<NewBill, SplitBillError> {
        let addresses = self
            .addresses
            .iter()
            .map(|a| Address::parse(a))
            .collect::<Result<Vec<_>, _>>()?;
        let amounts = self
            .amounts
            .iter()
            .map(|a| Amount::parse(a))
            .collect::<Result<Vec<_>, _>>()?;
        let creditor = match self.creditor {
            None => Creditor::default(),
            Some(CreditorRequest::Pot) => Creditor::Pot,
            Some(CreditorRequest::Participant(raw)) => {
                Creditor::participant_with_address(&addresses, &Address::parse(&raw)?)?
            }
        };
        Ok(NewBill {
            names: self.names,
            addresses,
            amounts,
            creditor,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct CreateBillResponse {
    pub bill_index: BillIndex,
}

#[derive(Deserialize, ToSchema)]
pub struct PayShareRequest {
    pub payer_address: String,
    #[schema(example = "50")]
    pub amount_sent: String,
}

#[derive(Serialize, ToSchema)]
pub struct BillCountResponse {
    pub count: u64,
}

/// Column-oriented view of a bill, one entry per participant in each list.
#[derive(Serialize, ToSchema)]
pub struct BillResponse {
    pub index: BillIndex,
    pub names: Vec<String>,
    pub addresses: Vec<Address>,
    pub amounts: Vec<Amount>,
    pub paid_flags: Vec<bool>,
    pub total: Amount,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
    pub status: BillStatus,
    pub creditor: Creditor,
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        let total = bill.total();
        let status = bill.status();
        let mut names = Vec::with_capacity(bill.shares.len());
        let mut addresses = Vec::with_capacity(bill.shares.len());
        let mut amounts = Vec::with_capacity(bill.shares.len());
        let mut paid_flags = Vec::with_capacity(bill.shares.len());
        for share in bill.shares {
            names.push(share.name);
            addresses.push(share.address);
            amounts.push(share.amount);
            paid_flags.push(share.paid);
        }
        BillResponse {
            index: bill.index,
            names,
            addresses,
            amounts,
            paid_flags,
            total,
            created_at: bill.created_at,
            status,
            creditor: bill.creditor,
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for SplitBillError to implement IntoResponse
pub struct ApiError(pub SplitBillError);

impl From<SplitBillError> for ApiError {
    fn from(err: SplitBillError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SplitBillError::InvalidBill(_)
            | SplitBillError::InvalidAmount(_)
            | SplitBillError::InvalidInput(_, _)
            | SplitBillError::AmountMismatch { .. } => StatusCode::BAD_REQUEST,
            SplitBillError::DuplicateParticipant(_) | SplitBillError::AlreadyPaid(_) => StatusCode::CONFLICT,
            SplitBillError::BillNotFound(_) => StatusCode::NOT_FOUND,
            SplitBillError::UnauthorizedPayer(_) => StatusCode::FORBIDDEN,
            SplitBillError::SettlementInvariant(_)
            | SplitBillError::StorageError(_)
            | SplitBillError::LoggingError(_)
            | SplitBillError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match self.0 {
            SplitBillError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            other => other.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: SplitBillError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(status_of(SplitBillError::BillNotFound(4)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(SplitBillError::AlreadyPaid("0xA".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SplitBillError::UnauthorizedPayer("0xA".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(SplitBillError::AmountMismatch {
                expected: "2".to_string(),
                sent: "1".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SplitBillError::SettlementInvariant("bug".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn parses_create_request_with_participant_creditor() {
        let request: CreateBillRequest = serde_json::from_value(serde_json::json!({
            "names": ["A", "B"],
            "addresses": ["0xAA", "0xBB"],
            "amounts": ["100", "50"],
            "creditor": { "participant": "0xbb" }
        }))
        .unwrap();

        let bill = request.parse().unwrap();
        assert_eq!(bill.creditor, Creditor::Participant(1));
        assert_eq!(bill.amounts, vec![Amount::new(100), Amount::new(50)]);
    }

    #[test]
    fn negative_amount_is_an_amount_error() {
        let request: CreateBillRequest = serde_json::from_value(serde_json::json!({
            "names": ["A", "B"],
            "addresses": ["0xAA", "0xBB"],
            "amounts": ["100", "-50"],
            "creditor": "pot"
        }))
        .unwrap();

        assert!(matches!(request.parse(), Err(SplitBillError::InvalidAmount(_))));
    }
}
