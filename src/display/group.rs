//! Group display formatting

use crate::models::{Group, Member, Money};
use crate::services::GroupSummary;

use super::ledger::{format_balances, format_settlement};

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "You are not in any groups yet.".to_string();
    }

    let name_width = groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<6}  {:>7}  {:>8}  {}\n",
        "Name",
        "Invite",
        "Members",
        "Expenses",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<6}  {:->7}  {:->8}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for group in groups {
        output.push_str(&format!(
            "{:<name_width$}  {:<6}  {:>7}  {:>8}  {}\n",
            group.name,
            group.invite_code,
            group.member_ids.len(),
            group.expenses.len(),
            group.id,
            name_width = name_width,
        ));
    }

    output
}

/// Format members, one per line
pub fn format_member_list(members: &[Member]) -> String {
    members
        .iter()
        .map(|m| format!("  {}  ({})\n", m.name, m.id))
        .collect()
}

/// Format a group overview: members, balances and the settlement plan
pub fn format_group_details(summary: &GroupSummary, symbol: &str) -> String {
    let group = &summary.group;
    let total_spent = group
        .expenses
        .iter()
        .try_fold(Money::zero(), |acc, e| acc.checked_add(e.amount))
        .map_or_else(
            || "more than can be shown".to_string(),
            |total| total.format_with_symbol(symbol),
        );

    let mut output = String::new();
    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:          {}\n", group.id));
    output.push_str(&format!("  Invite code: {}\n", group.invite_code));
    output.push_str(&format!(
        "  Created:     {}\n",
        group.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Expenses:    {} totalling {}\n",
        group.expenses.len(),
        total_spent
    ));

    output.push_str("\nMembers:\n");
    output.push_str(&format_member_list(&summary.members));

    output.push_str("\nBalances:\n");
    output.push_str(&format_balances(&summary.ledger.balances, symbol));

    output.push_str("\nSettle up:\n");
    output.push_str(&format_settlement(&summary.ledger.debts, symbol));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger;
    use crate::models::{Expense, MemberId, Split};

    #[test]
    fn test_empty_group_list() {
        assert_eq!(format_group_list(&[]), "You are not in any groups yet.");
    }

    #[test]
    fn test_group_list_shows_invite_code() {
        let mut group = Group::new("Flatmates", MemberId::new());
        group.invite_code = "AB12CD".into();

        let output = format_group_list(&[group]);
        assert!(output.contains("Flatmates"));
        assert!(output.contains("AB12CD"));
    }

    #[test]
    fn test_group_details_for_new_group() {
        let member = Member::new(MemberId::new(), "Asha");
        let group = Group::new("Flatmates", member.id);
        let members = vec![member];
        let summary = GroupSummary {
            ledger: ledger::summarize(&members, &group.expenses),
            group,
            members,
        };

        let output = format_group_details(&summary, "₹");
        assert!(output.contains("Group: Flatmates"));
        assert!(output.contains("0 totalling ₹0.00"));
        assert!(output.contains("Asha"));
        assert!(output.contains("All Settled Up!"));
    }

    #[test]
    fn test_group_details_with_oversized_history() {
        let asha = Member::new(MemberId::new(), "Asha");
        let ravi = Member::new(MemberId::new(), "Ravi");
        let mut group = Group::new("Flatmates", asha.id);
        group.add_member(ravi.id);

        let amount = Money::parse("90000000000000000").unwrap();
        for _ in 0..2 {
            group.expenses.push(Expense::new(
                "Yacht",
                amount,
                asha.id,
                asha.id,
                vec![Split::new(ravi.id, amount)],
            ));
        }

        let members = vec![asha, ravi];
        let summary = GroupSummary {
            ledger: ledger::summarize(&members, &group.expenses),
            group,
            members,
        };

        let output = format_group_details(&summary, "₹");
        assert!(output.contains("2 totalling more than can be shown"));
        assert!(output.contains("Ravi  pays  Asha"));
    }
}
