use crate::{
    api::models::*,
    core::{
        models::{Address, Amount, AppLog, BillAudit, BillIndex, SettlementLine},
        services::SplitBillService,
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

pub type AppService = SplitBillService<InMemoryLogging, InMemoryStorage>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/bills", post(create_bill).get(list_bills))
        .route("/bills/count", get(get_bill_count))
        .route("/bills/{bill_index}", get(get_bill))
        .route("/bills/{bill_index}/payments", post(pay_share))
        .route("/bills/{bill_index}/settlements", get(calculate_settlements))
        .route("/bills/{bill_index}/audits", get(get_bill_audits))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill created", body = CreateBillResponse),
        (status = 400, description = "Invalid participants, amounts or names", body = ErrorResponse),
        (status = 409, description = "Duplicate participant address", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn create_bill(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<CreateBillResponse>), ApiError> {
    let bill = req.parse()?;
    let bill_index = service
        .create_bill_with_creditor(bill.names, bill.addresses, bill.amounts, bill.creditor)
        .await?;
    Ok((StatusCode::CREATED, Json(CreateBillResponse { bill_index })))
}

#[utoipa::path(
    get,
    path = "/api/bills",
    responses(
        (status = 200, description = "All bills in creation order", body = Vec<BillResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_bills(State(service): State<Arc<AppService>>) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let bills = service.list_bills().await?;
    Ok(Json(bills.into_iter().map(BillResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/bills/count",
    responses(
        (status = 200, description = "Number of bills in the ledger", body = BillCountResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_bill_count(
    State(service): State<Arc<AppService>>,
) -> Result<Json<BillCountResponse>, ApiError> {
    let count = service.get_bill_count().await?;
    Ok(Json(BillCountResponse { count }))
}

#[utoipa::path(
    get,
    path = "/api/bills/{bill_index}",
    params(
        ("bill_index" = u64, Path, description = "Index of the bill")
    ),
    responses(
        (status = 200, description = "Bill retrieved", body = BillResponse),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_bill(
    State(service): State<Arc<AppService>>,
    Path(bill_index): Path<BillIndex>,
) -> Result<Json<BillResponse>, ApiError> {
    let bill = service.get_bill(bill_index).await?;
    Ok(Json(bill.into()))
}

#[utoipa::path(
    post,
    path = "/api/bills/{bill_index}/payments",
    request_body = PayShareRequest,
    params(
        ("bill_index" = u64, Path, description = "Index of the bill")
    ),
    responses(
        (status = 200, description = "Payment recorded"),
        (status = 400, description = "Amount does not match the owed share", body = ErrorResponse),
        (status = 403, description = "Payer has no share in the bill", body = ErrorResponse),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 409, description = "Share already paid", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn pay_share(
    State(service): State<Arc<AppService>>,
    Path(bill_index): Path<BillIndex>,
    Json(req): Json<PayShareRequest>,
) -> Result<StatusCode, ApiError> {
    let payer = Address::parse(&req.payer_address)?;
    let amount_sent = Amount::parse(&req.amount_sent)?;
    service.pay_share(bill_index, &payer, amount_sent).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/bills/{bill_index}/settlements",
    params(
        ("bill_index" = u64, Path, description = "Index of the bill")
    ),
    responses(
        (status = 200, description = "Outstanding transfers, in payment order", body = Vec<SettlementLine>),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn calculate_settlements(
    State(service): State<Arc<AppService>>,
    Path(bill_index): Path<BillIndex>,
) -> Result<Json<Vec<SettlementLine>>, ApiError> {
    let lines = service.settlement_summary(bill_index).await?;
    Ok(Json(lines))
}

#[utoipa::path(
    get,
    path = "/api/bills/{bill_index}/audits",
    params(
        ("bill_index" = u64, Path, description = "Index of the bill")
    ),
    responses(
        (status = 200, description = "Audit trail of the bill", body = Vec<BillAudit>),
        (status = 404, description = "Bill not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_bill_audits(
    State(service): State<Arc<AppService>>,
    Path(bill_index): Path<BillIndex>,
) -> Result<Json<Vec<BillAudit>>, ApiError> {
    let audits = service.get_bill_audits(bill_index).await?;
    Ok(Json(audits))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application log", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}
