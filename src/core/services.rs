use crate::core::constants::{
    BILL_CREATED, BILL_SETTLED, EVENT_FEED_CAPACITY, MAX_PARTICIPANTS, PAYMENT_RECORDED, PAYMENT_REJECTED,
    SETTLEMENTS_CALCULATED,
};
use crate::core::errors::SplitBillError;
use crate::core::models::{
    Address, Amount, AppLog, Bill, BillAudit, BillDraft, BillIndex, Creditor, LedgerEvent, SettlementLine,
    Transfer,
};
use crate::core::settlement;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use futures::future::try_join_all;
use serde_json::json;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub struct SplitBillService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    events: broadcast::Sender<LedgerEvent>,
    pot_address: Address,
    max_participants: usize,
}

impl<L: LoggingService, S: Storage> SplitBillService<L, S> {
    pub fn new(storage: S, logging: L, pot_address: Address) -> Self {
        let (events, _) = broadcast::channel(EVENT_FEED_CAPACITY);
        SplitBillService {
            storage,
            logging,
            events,
            pot_address,
            max_participants: MAX_PARTICIPANTS,
        }
    }

    pub fn with_max_participants(mut self, max_participants: usize) -> Self {
        self.max_participants = max_participants;
        self
    }

    pub fn pot_address(&self) -> &Address {
        &self.pot_address
    }

    /// Feed of ledger mutations, for observers such as UI refreshers.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    async fn log_and_audit(
        &self,
        bill_index: Option<BillIndex>,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) -> Result<(), SplitBillError> {
        self.logging.log_action(action, details.clone(), actor).await?;
        if let Some(index) = bill_index {
            self.storage
                .save_bill_audit(BillAudit {
                    id: Uuid::new_v4().to_string(),
                    bill_index: index,
                    action: action.to_string(),
                    actor: actor.map(String::from),
                    details,
                    timestamp: Utc::now(),
                })
                .await?;
        }
        Ok(())
    }

    /// Audits something that already happened, a committed change or a
    /// rejected attempt. Failures are logged instead of returned.
    async fn record_audit(
        &self,
        bill_index: BillIndex,
        action: &str,
        details: serde_json::Value,
        actor: Option<&str>,
    ) {
        if let Err(err) = self.log_and_audit(Some(bill_index), action, details, actor).await {
            error!("Could not audit {} on bill {}: {}", action, bill_index, err);
        }
    }

    fn publish(&self, event: LedgerEvent) {
        // Err only means nobody is subscribed.
        if self.events.send(event).is_err() {
            debug!("No subscribers for ledger event");
        }
    }

    /// Creates a bill whose first participant fronted the money.
    pub async fn create_bill(
        &self,
        names: Vec<String>,
        addresses: Vec<Address>,
        amounts: Vec<Amount>,
    ) -> Result<BillIndex, SplitBillError> {
        self.create_bill_with_creditor(names, addresses, amounts, Creditor::default())
            .await
    }

    pub async fn create_bill_with_creditor(
        &self,
        names: Vec<String>,
        addresses: Vec<Address>,
        amounts: Vec<Amount>,
        creditor: Creditor,
    ) -> Result<BillIndex, SplitBillError> {
        let draft = BillDraft::new(names, addresses, amounts, creditor, self.max_participants)
            .and_then(|draft| draft.excluding_pot(&self.pot_address))
            .inspect_err(|e| warn!("Rejected bill: {}", e))?;
        let bill = self.storage.append_bill(draft).await?;
        let total = bill.total();
        info!(
            "Created bill {} with {} participants, total {}",
            bill.index,
            bill.shares.len(),
            total
        );

        self.record_audit(
            bill.index,
            BILL_CREATED,
            json!({
                "bill_index": bill.index,
                "names": bill.shares.iter().map(|s| s.name.clone()).collect::<Vec<_>>(),
                "addresses": bill.shares.iter().map(|s| s.address.to_string()).collect::<Vec<_>>(),
                "amounts": bill.shares.iter().map(|s| s.amount.to_string()).collect::<Vec<_>>(),
                "creditor": bill.creditor,
                "total": total,
            }),
            None,
        )
        .await;

        self.publish(LedgerEvent::BillCreated {
            bill_index: bill.index,
            participants: bill.shares.len(),
            total,
        });
        Ok(bill.index)
    }

    /// Records that `payer` sent exactly their owed amount.
    ///
    /// `payer` must already be authenticated by the caller.
    pub async fn pay_share(
        &self,
        bill_index: BillIndex,
        payer: &Address,
        amount_sent: Amount,
    ) -> Result<(), SplitBillError> {
        let bill = match self.storage.record_payment(bill_index, payer, amount_sent).await {
            Ok(bill) => bill,
            Err(err) => {
                warn!("Payment by {} on bill {} rejected: {}", payer, bill_index, err);
                if !matches!(err, SplitBillError::BillNotFound(_)) {
                    self.record_audit(
                        bill_index,
                        PAYMENT_REJECTED,
                        json!({
                            "bill_index": bill_index,
                            "payer": payer.to_string(),
                            "amount_sent": amount_sent,
                            "reason": err.to_string(),
                        }),
                        Some(payer.as_str()),
                    )
                    .await;
                }
                return Err(err);
            }
        };

        let fully_settled = bill.is_fully_settled();
        info!(
            "Recorded payment of {} by {} on bill {}",
            amount_sent, payer, bill_index
        );

        self.record_audit(
            bill_index,
            PAYMENT_RECORDED,
            json!({
                "bill_index": bill_index,
                "payer": payer.to_string(),
                "amount": amount_sent,
                "status": bill.status(),
            }),
            Some(payer.as_str()),
        )
        .await;
        if fully_settled {
            info!("Bill {} is fully settled", bill_index);
            self.record_audit(
                bill_index,
                BILL_SETTLED,
                json!({ "bill_index": bill_index, "total": bill.total() }),
                Some(payer.as_str()),
            )
            .await;
        }

        self.publish(LedgerEvent::PaymentRecorded {
            bill_index,
            payer: payer.clone(),
            amount: amount_sent,
            fully_settled,
        });
        Ok(())
    }

    pub async fn get_bill(&self, bill_index: BillIndex) -> Result<Bill, SplitBillError> {
        self.storage
            .get_bill(bill_index)
            .await?
            .ok_or(SplitBillError::BillNotFound(bill_index))
    }

    pub async fn get_bill_count(&self) -> Result<u64, SplitBillError> {
        self.storage.bill_count().await
    }

    /// Every bill in ledger order.
    pub async fn list_bills(&self) -> Result<Vec<Bill>, SplitBillError> {
        let count = self.storage.bill_count().await?;
        try_join_all((0..count).map(|index| self.get_bill(index))).await
    }

    async fn settle_snapshot(&self, bill_index: BillIndex) -> Result<(Bill, Vec<Transfer>), SplitBillError> {
        let bill = self.get_bill(bill_index).await?;
        let transfers = settlement::calculate_settlements(&bill, &self.pot_address).inspect_err(|e| {
            error!("Settlement of bill {} failed: {}", bill_index, e);
        })?;
        debug!(
            "Bill {} settles with {} transfers",
            bill_index,
            transfers.len()
        );

        self.logging
            .log_action(
                SETTLEMENTS_CALCULATED,
                json!({ "bill_index": bill_index, "transfers": transfers.len() }),
                None,
            )
            .await?;
        Ok((bill, transfers))
    }

    /// Transfers that would clear every unpaid share of the bill.
    pub async fn calculate_settlements(&self, bill_index: BillIndex) -> Result<Vec<Transfer>, SplitBillError> {
        let (_, transfers) = self.settle_snapshot(bill_index).await?;
        Ok(transfers)
    }

    /// Same as [`Self::calculate_settlements`], with participant names resolved
    /// from the same snapshot.
    pub async fn settlement_summary(&self, bill_index: BillIndex) -> Result<Vec<SettlementLine>, SplitBillError> {
        let (bill, transfers) = self.settle_snapshot(bill_index).await?;
        Ok(transfers
            .into_iter()
            .map(|t| SettlementLine {
                from_name: bill.display_name(&t.from),
                to_name: bill.display_name(&t.to),
                from: t.from,
                to: t.to,
                amount: t.amount,
            })
            .collect())
    }

    pub async fn get_bill_audits(&self, bill_index: BillIndex) -> Result<Vec<BillAudit>, SplitBillError> {
        self.get_bill(bill_index).await?;
        self.storage.get_bill_audits(bill_index).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, SplitBillError> {
        self.logging.get_logs().await
    }
}
