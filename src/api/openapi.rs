use utoipa::OpenApi;

use crate::{
    api::models::{
        BillCountResponse, BillResponse, CreateBillRequest, CreateBillResponse, CreditorRequest, ErrorResponse,
        PayShareRequest,
    },
    core::models::{Address, Amount, AppLog, BillAudit, BillStatus, Creditor, SettlementLine, Transfer},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_bill,
        super::handlers::list_bills,
        super::handlers::get_bill_count,
        super::handlers::get_bill,
        super::handlers::pay_share,
        super::handlers::calculate_settlements,
        super::handlers::get_bill_audits,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateBillRequest,
        CreditorRequest,
        CreateBillResponse,
        PayShareRequest,
        BillCountResponse,
        BillResponse,
        ErrorResponse,
        Address,
        Amount,
        Creditor,
        BillStatus,
        Transfer,
        SettlementLine,
        AppLog,
        BillAudit
    )),
    info(
        title = "SplitBill API",
        description = "API for splitting bills between participants and settling outstanding shares",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
