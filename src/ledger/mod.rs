//! Ledger engine
//!
//! Pure computations over a group's members and expenses: the split
//! allocator runs when an expense is written, while balances and settlement
//! are derived on every read. Nothing here touches storage.

pub mod allocator;
pub mod balances;
pub mod settlement;

use serde::Serialize;

use crate::models::{Expense, Member};

pub use allocator::{allocate_splits, AllocationError, SplitDirective, SplitMode};
pub use balances::{calculate_balances, Balance};
pub use settlement::{simplify_debts, SimplifiedDebt};

/// Derived financial state of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub balances: Vec<Balance>,
    pub debts: Vec<SimplifiedDebt>,
}

impl LedgerSummary {
    /// Whether nobody owes anything
    pub fn is_settled(&self) -> bool {
        self.debts.is_empty()
    }
}

/// Compute balances and the settlement plan in one pass
pub fn summarize(members: &[Member], expenses: &[Expense]) -> LedgerSummary {
    let balances = calculate_balances(members, expenses);
    let debts = simplify_debts(&balances);
    LedgerSummary { balances, debts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{member_ids, MemberId, Money};

    #[test]
    fn test_summarize_three_way_dinner() {
        let members: Vec<Member> = ["A", "B", "C"]
            .iter()
            .map(|n| Member::new(MemberId::new(), *n))
            .collect();
        let ids = member_ids(&members);
        let splits =
            allocate_splits(Money::from_cents(12000), &ids, &SplitDirective::Equal).unwrap();
        let expense = Expense::new("Dinner", Money::from_cents(12000), ids[0], ids[0], splits);

        let summary = summarize(&members, &[expense]);

        assert!(!summary.is_settled());
        assert_eq!(summary.debts.len(), 2);
        assert!(summary.debts.iter().all(|d| d.to == ids[0]));
        assert!(summary
            .debts
            .iter()
            .all(|d| d.amount == Money::from_cents(4000)));
    }

    #[test]
    fn test_summarize_empty_group_is_settled() {
        let members = vec![Member::new(MemberId::new(), "Solo")];
        let summary = summarize(&members, &[]);
        assert!(summary.is_settled());
        assert_eq!(summary.balances.len(), 1);
    }
}
