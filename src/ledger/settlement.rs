//! Debt simplification
//!
//! Greedy matching of the largest debtor against the largest creditor. The
//! result settles every balance with at most `debtors + creditors - 1`
//! transfers; it is not guaranteed to be the global minimum.

use serde::Serialize;

use super::balances::Balance;
use crate::models::{MemberId, Money};

/// A proposed payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimplifiedDebt {
    pub from: MemberId,
    pub from_name: String,
    pub to: MemberId,
    pub to_name: String,
    pub amount: Money,
}

/// Reduce a set of balances to an ordered list of transfers
///
/// Members with a zero balance are skipped. Debtors are visited from the
/// most negative balance up, creditors from the most positive down; ties
/// keep their input order. If the balances do not sum to zero the
/// unmatched remainder is dropped.
pub fn simplify_debts(balances: &[Balance]) -> Vec<SimplifiedDebt> {
    let mut debtors: Vec<(&Balance, Money)> = balances
        .iter()
        .filter(|b| b.balance.is_negative())
        .map(|b| (b, b.balance))
        .collect();
    let mut creditors: Vec<(&Balance, Money)> = balances
        .iter()
        .filter(|b| b.balance.is_positive())
        .map(|b| (b, b.balance))
        .collect();

    debtors.sort_by_key(|(_, remaining)| *remaining);
    creditors.sort_by_key(|(_, remaining)| std::cmp::Reverse(*remaining));

    let mut debts = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let (debtor, owed) = debtors[i];
        let (creditor, due) = creditors[j];
        let amount = (-owed).min(due);

        if amount.is_positive() {
            debts.push(SimplifiedDebt {
                from: debtor.member_id,
                from_name: debtor.name.clone(),
                to: creditor.member_id,
                to_name: creditor.name.clone(),
                amount,
            });
        }

        debtors[i].1 += amount;
        creditors[j].1 -= amount;

        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    if i < debtors.len() || j < creditors.len() {
        tracing::warn!(
            unmatched_debtors = debtors.len() - i,
            unmatched_creditors = creditors.len() - j,
            "balances do not net to zero, leftover dropped"
        );
    }

    tracing::debug!(
        debtor_count = debtors.len(),
        creditor_count = creditors.len(),
        transfer_count = debts.len(),
        "simplified debts"
    );

    debts
}
