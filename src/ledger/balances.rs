//! Balance accumulation
//!
//! Folds a group's expense history into one net balance per member. A
//! positive balance means the group owes the member money; a negative one
//! means the member owes the group.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Expense, Member, MemberId, Money};

/// Net position of one member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub member_id: MemberId,
    pub name: String,
    pub balance: Money,
}

/// Compute every member's net balance from the expense history
///
/// The payer is credited the full total and each split debits its member.
/// Payers or split members that are no longer in `members` are skipped.
/// The output follows the order of `members`.
pub fn calculate_balances(members: &[Member], expenses: &[Expense]) -> Vec<Balance> {
    // Widened so a long history of large expenses cannot overflow
    let mut totals: HashMap<MemberId, i128> = members.iter().map(|m| (m.id, 0)).collect();

    for expense in expenses {
        match totals.get_mut(&expense.paid_by) {
            Some(total) => *total += i128::from(expense.amount.cents()),
            None => tracing::debug!(
                expense = %expense.id,
                payer = %expense.paid_by,
                "payer is not a current member, credit skipped"
            ),
        }

        for split in &expense.splits {
            match totals.get_mut(&split.member_id) {
                Some(total) => *total -= i128::from(split.amount.cents()),
                None => tracing::debug!(
                    expense = %expense.id,
                    member = %split.member_id,
                    "split member is not a current member, debit skipped"
                ),
            }
        }
    }

    members
        .iter()
        .map(|m| Balance {
            member_id: m.id,
            name: m.name.clone(),
            balance: clamp_to_money(m.id, totals.get(&m.id).copied().unwrap_or_default()),
        })
        .collect()
}

fn clamp_to_money(member_id: MemberId, total: i128) -> Money {
    match i64::try_from(total) {
        Ok(cents) => Money::from_cents(cents),
        Err(_) => {
            tracing::warn!(member = %member_id, total, "balance out of range, clamped");
            // Symmetric so a clamped debt can still be negated
            let clamped = total.clamp(-i128::from(i64::MAX), i128::from(i64::MAX));
            Money::from_cents(i64::try_from(clamped).unwrap_or_default())
        }
    }
}
