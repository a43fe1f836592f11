use super::address::Address;
use super::amount::Amount;
use crate::core::constants::{MAX_NAME_LENGTH, MIN_PARTICIPANTS};
use crate::core::errors::SplitBillError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

pub type BillIndex = u64;

/// Who collects the money owed on a bill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Creditor {
    /// The participant at this position fronted the bill. Their own share is
    /// self-owed and counts as paid from the start.
    Participant(usize),
    /// The bill itself collects every share, at the configured pot address.
    Pot,
}

impl Default for Creditor {
    fn default() -> Self {
        Creditor::Participant(0)
    }
}

impl Creditor {
    /// Resolves a participant creditor by address against a bill's addresses.
    pub fn participant_with_address(
        addresses: &[Address],
        creditor: &Address,
    ) -> Result<Self, SplitBillError> {
        addresses
            .iter()
            .position(|a| a == creditor)
            .map(Creditor::Participant)
            .ok_or_else(|| {
                SplitBillError::InvalidBill(format!("creditor {} is not a participant", creditor))
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    Created,
    PartiallyPaid,
    FullySettled,
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BillStatus::Created => "CREATED",
            BillStatus::PartiallyPaid => "PARTIALLY_PAID",
            BillStatus::FullySettled => "FULLY_SETTLED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Share {
    pub name: String,
    pub address: Address,
    pub amount: Amount,
    pub paid: bool,
}

/// A validated bill that has not been given a ledger index yet.
#[derive(Clone, Debug)]
pub struct BillDraft {
    shares: Vec<Share>,
    creditor: Creditor,
}

impl BillDraft {
    pub fn new(
        names: Vec<String>,
        addresses: Vec<Address>,
        amounts: Vec<Amount>,
        creditor: Creditor,
        max_participants: usize,
    ) -> Result<Self, SplitBillError> {
        if names.len() != addresses.len() || names.len() != amounts.len() {
            return Err(SplitBillError::InvalidBill(format!(
                "participant count mismatch: {} names, {} addresses, {} amounts",
                names.len(),
                addresses.len(),
                amounts.len()
            )));
        }
        if names.len() < MIN_PARTICIPANTS {
            return Err(SplitBillError::InvalidBill(format!(
                "fewer than {} participants",
                MIN_PARTICIPANTS
            )));
        }
        if names.len() > max_participants {
            return Err(SplitBillError::InvalidBill(format!(
                "more than {} participants",
                max_participants
            )));
        }

        for name in &names {
            validate_name(name)?;
        }

        for (name, amount) in names.iter().zip(&amounts) {
            if amount.is_zero() {
                return Err(SplitBillError::InvalidAmount(format!(
                    "share of {} must be greater than 0",
                    name
                )));
            }
        }
        // Balances are netted as i128, so the total has to fit there.
        match Amount::checked_sum(amounts.iter().copied()) {
            Some(total) if total.minor_units() <= i128::MAX as u128 => {}
            _ => {
                return Err(SplitBillError::InvalidAmount(
                    "bill total is out of range".to_string(),
                ));
            }
        }

        let mut seen = HashSet::with_capacity(addresses.len());
        for address in &addresses {
            if !seen.insert(address.canonical()) {
                return Err(SplitBillError::DuplicateParticipant(address.to_string()));
            }
        }

        if let Creditor::Participant(position) = creditor {
            if position >= names.len() {
                return Err(SplitBillError::InvalidBill(format!(
                    "creditor position {} is out of range",
                    position
                )));
            }
        }

        let shares = names
            .into_iter()
            .zip(addresses)
            .zip(amounts)
            .enumerate()
            .map(|(position, ((name, address), amount))| Share {
                name: name.trim().to_string(),
                address,
                amount,
                paid: creditor == Creditor::Participant(position),
            })
            .collect();

        Ok(BillDraft { shares, creditor })
    }

    /// Rejects a pot bill that lists the pot address as one of its participants.
    pub fn excluding_pot(self, pot_address: &Address) -> Result<Self, SplitBillError> {
        if self.creditor == Creditor::Pot {
            if let Some(share) = self.shares.iter().find(|s| s.address == *pot_address) {
                return Err(SplitBillError::InvalidBill(format!(
                    "participant {} uses the pot address",
                    share.address
                )));
            }
        }
        Ok(self)
    }

    pub fn into_bill(self, index: BillIndex, created_at: DateTime<Utc>) -> Bill {
        Bill {
            index,
            shares: self.shares,
            creditor: self.creditor,
            created_at,
        }
    }
}

fn validate_name(name: &str) -> Result<(), SplitBillError> {
    if name.trim().is_empty() {
        return Err(SplitBillError::invalid_input(
            "name",
            "Invalid name",
            "name cannot be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(SplitBillError::invalid_input(
            "name",
            "name Too Long",
            format!("name cannot exceed {} characters", MAX_NAME_LENGTH),
        ));
    }
    if name.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
        return Err(SplitBillError::invalid_input(
            "name",
            "Invalid name",
            "name contains invalid characters",
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub index: BillIndex,
    pub shares: Vec<Share>,
    pub creditor: Creditor,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn total(&self) -> Amount {
        // Checked at creation; cannot overflow.
        Amount::checked_sum(self.shares.iter().map(|s| s.amount)).unwrap_or(Amount::ZERO)
    }

    pub fn status(&self) -> BillStatus {
        if self.shares.iter().all(|s| s.paid) {
            return BillStatus::FullySettled;
        }
        let any_debtor_paid = self
            .shares
            .iter()
            .enumerate()
            .any(|(position, s)| s.paid && !self.is_creditor(position));
        if any_debtor_paid {
            BillStatus::PartiallyPaid
        } else {
            BillStatus::Created
        }
    }

    pub fn is_fully_settled(&self) -> bool {
        self.status() == BillStatus::FullySettled
    }

    pub fn is_creditor(&self, position: usize) -> bool {
        self.creditor == Creditor::Participant(position)
    }

    pub fn position_of(&self, address: &Address) -> Option<usize> {
        self.shares.iter().position(|s| s.address == *address)
    }

    pub fn name_of(&self, address: &Address) -> Option<&str> {
        self.position_of(address)
            .map(|position| self.shares[position].name.as_str())
    }

    /// Participant name for `address`, or the address itself when it is not
    /// on the bill.
    pub fn display_name(&self, address: &Address) -> String {
        self.name_of(address)
            .map(str::to_string)
            .unwrap_or_else(|| address.to_string())
    }

    /// Marks the payer's share as paid. Nothing changes on error.
    pub fn record_payment(
        &mut self,
        payer: &Address,
        amount_sent: Amount,
    ) -> Result<&Share, SplitBillError> {
        let position = self
            .position_of(payer)
            .ok_or_else(|| SplitBillError::UnauthorizedPayer(payer.to_string()))?;
        let share = &mut self.shares[position];
        if share.paid {
            return Err(SplitBillError::AlreadyPaid(share.address.to_string()));
        }
        if share.amount != amount_sent {
            return Err(SplitBillError::AmountMismatch {
                expected: share.amount.to_string(),
                sent: amount_sent.to_string(),
            });
        }
        share.paid = true;
        Ok(&*share)
    }
}
