//! Balance and settlement formatting

use crate::ledger::{Balance, SimplifiedDebt};
use crate::models::Money;

/// Balances within this many minor units of zero read as settled
const SETTLED_THRESHOLD: Money = Money::from_cents(10);

/// How a balance is described next to the amount
pub fn balance_status(balance: Money) -> &'static str {
    if balance > SETTLED_THRESHOLD {
        "is owed"
    } else if balance < -SETTLED_THRESHOLD {
        "owes"
    } else {
        "settled"
    }
}

/// Format an amount with an explicit `+` for positive values
fn signed(amount: Money, symbol: &str) -> String {
    if amount.is_positive() {
        format!("+{}", amount.format_with_symbol(symbol))
    } else {
        amount.format_with_symbol(symbol)
    }
}

/// Format balances as a table, largest creditor first
pub fn format_balances(balances: &[Balance], symbol: &str) -> String {
    if balances.is_empty() {
        return "No members.".to_string();
    }

    let mut sorted: Vec<&Balance> = balances.iter().collect();
    sorted.sort_by(|a, b| b.balance.cmp(&a.balance));

    let name_width = sorted
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}  {}\n",
        "Member",
        "Balance",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}  {:-<7}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for balance in sorted {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}  {}\n",
            balance.name,
            signed(balance.balance, symbol),
            balance_status(balance.balance),
            name_width = name_width,
        ));
    }

    output
}

/// Format the settlement plan, one transfer per line
pub fn format_settlement(debts: &[SimplifiedDebt], symbol: &str) -> String {
    if debts.is_empty() {
        return "All Settled Up!\nEveryone is even. Nothing to settle.\n".to_string();
    }

    let from_width = debts
        .iter()
        .map(|d| d.from_name.chars().count())
        .max()
        .unwrap_or(0);
    let to_width = debts
        .iter()
        .map(|d| d.to_name.chars().count())
        .max()
        .unwrap_or(0);

    debts
        .iter()
        .map(|d| {
            format!(
                "{:<from_width$}  pays  {:<to_width$}  {}\n",
                d.from_name,
                d.to_name,
                d.amount.format_with_symbol(symbol),
                from_width = from_width,
                to_width = to_width,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberId;

    fn balance(name: &str, cents: i64) -> Balance {
        Balance {
            member_id: MemberId::new(),
            name: name.into(),
            balance: Money::from_cents(cents),
        }
    }

    #[test]
    fn test_balance_status_thresholds() {
        assert_eq!(balance_status(Money::from_cents(11)), "is owed");
        assert_eq!(balance_status(Money::from_cents(10)), "settled");
        assert_eq!(balance_status(Money::zero()), "settled");
        assert_eq!(balance_status(Money::from_cents(-10)), "settled");
        assert_eq!(balance_status(Money::from_cents(-11)), "owes");
    }

    #[test]
    fn test_format_balances_sorted_descending() {
        let balances = vec![
            balance("Ravi", -4000),
            balance("Asha", 8000),
            balance("Meera", -4000),
        ];
        let output = format_balances(&balances, "₹");
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[2].starts_with("Asha"));
        assert!(lines[2].contains("+₹80.00"));
        assert!(lines[2].ends_with("is owed"));
        assert!(lines[3].starts_with("Ravi"));
        assert!(lines[3].contains("-₹40.00"));
        assert!(lines[3].ends_with("owes"));
    }

    #[test]
    fn test_format_settlement() {
        let debts = vec![SimplifiedDebt {
            from: MemberId::new(),
            from_name: "Ravi".into(),
            to: MemberId::new(),
            to_name: "Asha".into(),
            amount: Money::from_cents(4000),
        }];

        assert_eq!(format_settlement(&debts, "₹"), "Ravi  pays  Asha  ₹40.00\n");
    }

    #[test]
    fn test_empty_settlement() {
        let output = format_settlement(&[], "₹");
        assert!(output.starts_with("All Settled Up!"));
        assert!(output.contains("Nothing to settle."));
    }
}
