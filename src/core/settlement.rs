//! Settlement engine.
//!
//! Pure functions over a bill snapshot: no IO, no state. Every party gets an
//! explicit signed balance (positive owes, negative is owed) and the largest
//! remaining debtor is repeatedly matched with the largest remaining creditor.

use crate::core::errors::SplitBillError;
use crate::core::models::{Address, Amount, Bill, Creditor, Transfer};
use std::cmp::Reverse;

/// Signed outstanding position of one party.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetBalance {
    pub address: Address,
    pub balance: i128,
}

/// Net balances for the unpaid shares of `bill`, in participant order.
///
/// Each unpaid share owes its amount to the bill's creditor. A pot creditor
/// is appended after all participants.
pub fn net_balances(bill: &Bill, pot_address: &Address) -> Result<Vec<NetBalance>, SplitBillError> {
    let mut balances: Vec<NetBalance> = bill
        .shares
        .iter()
        .map(|share| NetBalance {
            address: share.address.clone(),
            balance: 0,
        })
        .collect();

    let mut owed_to_creditor: i128 = 0;
    for (position, share) in bill.shares.iter().enumerate() {
        if share.paid || bill.is_creditor(position) {
            continue;
        }
        let amount = to_signed(share.amount)?;
        balances[position].balance = amount;
        owed_to_creditor = owed_to_creditor
            .checked_add(amount)
            .ok_or_else(|| SplitBillError::SettlementInvariant("outstanding total overflows".to_string()))?;
    }

    match bill.creditor {
        Creditor::Participant(position) => balances[position].balance -= owed_to_creditor,
        Creditor::Pot => {
            if bill.position_of(pot_address).is_some() {
                return Err(SplitBillError::SettlementInvariant(format!(
                    "pot address {} is also a participant",
                    pot_address
                )));
            }
            balances.push(NetBalance {
                address: pot_address.clone(),
                balance: -owed_to_creditor,
            });
        }
    }

    Ok(balances)
}

/// Outstanding transfers for `bill`. Empty once every share is paid.
pub fn calculate_settlements(bill: &Bill, pot_address: &Address) -> Result<Vec<Transfer>, SplitBillError> {
    settle(&net_balances(bill, pot_address)?)
}

/// Greedy netting over arbitrary signed balances that sum to zero.
///
/// Ties on magnitude go to the party listed first, so the output is fully
/// determined by the input order.
pub fn settle(balances: &[NetBalance]) -> Result<Vec<Transfer>, SplitBillError> {
    let net = balances.iter().try_fold(0i128, |acc, b| acc.checked_add(b.balance));
    match net {
        Some(0) => {}
        Some(n) => {
            return Err(SplitBillError::SettlementInvariant(format!(
                "balances sum to {} instead of 0",
                n
            )));
        }
        None => {
            return Err(SplitBillError::SettlementInvariant(
                "balance sum overflows".to_string(),
            ));
        }
    }

    // (input position, remaining magnitude)
    let mut debtors: Vec<(usize, i128)> = Vec::new();
    let mut creditors: Vec<(usize, i128)> = Vec::new();
    for (position, b) in balances.iter().enumerate() {
        if b.balance > 0 {
            debtors.push((position, b.balance));
        } else if b.balance < 0 {
            let magnitude = b.balance.checked_neg().ok_or_else(|| {
                SplitBillError::SettlementInvariant(format!("balance of {} out of range", b.address))
            })?;
            creditors.push((position, magnitude));
        }
    }

    let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());
    while let (Some(d), Some(c)) = (largest(&debtors), largest(&creditors)) {
        let (debtor, owes) = debtors[d];
        let (creditor, owed) = creditors[c];
        let amount = owes.min(owed);

        let owes_left = remainder(owes, amount, &balances[debtor].address)?;
        let owed_left = remainder(owed, amount, &balances[creditor].address)?;

        transfers.push(Transfer {
            from: balances[debtor].address.clone(),
            to: balances[creditor].address.clone(),
            amount: to_amount(amount)?,
        });

        if owes_left == 0 {
            debtors.remove(d);
        } else {
            debtors[d].1 = owes_left;
        }
        if owed_left == 0 {
            creditors.remove(c);
        } else {
            creditors[c].1 = owed_left;
        }
    }

    if !debtors.is_empty() || !creditors.is_empty() {
        return Err(SplitBillError::SettlementInvariant(format!(
            "{} debtors and {} creditors left unmatched",
            debtors.len(),
            creditors.len()
        )));
    }

    Ok(transfers)
}

fn largest(entries: &[(usize, i128)]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .min_by_key(|(_, (position, remaining))| (Reverse(*remaining), *position))
        .map(|(i, _)| i)
}

fn remainder(balance: i128, amount: i128, address: &Address) -> Result<i128, SplitBillError> {
    match balance.checked_sub(amount) {
        Some(left) if left >= 0 => Ok(left),
        _ => Err(SplitBillError::SettlementInvariant(format!(
            "balance of {} would go negative",
            address
        ))),
    }
}

fn to_signed(amount: Amount) -> Result<i128, SplitBillError> {
    i128::try_from(amount.minor_units())
        .map_err(|_| SplitBillError::SettlementInvariant(format!("amount {} out of range", amount)))
}

fn to_amount(value: i128) -> Result<Amount, SplitBillError> {
    u128::try_from(value)
        .map(Amount::new)
        .map_err(|_| SplitBillError::SettlementInvariant(format!("negative transfer {}", value)))
}
