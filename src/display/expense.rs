//! Expense display formatting

use crate::models::{Expense, Member, MemberId};

fn member_name(members: &[Member], id: MemberId) -> String {
    members
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], members: &[Member], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses yet.".to_string();
    }

    let desc_width = expenses
        .iter()
        .map(|e| e.description.chars().count())
        .max()
        .unwrap_or(11)
        .clamp(11, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {}\n",
        "ID",
        "Date",
        "Description",
        "Amount",
        "Paid by",
        desc_width = desc_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<desc_width$}  {:->12}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width,
    ));

    for expense in expenses {
        let description: String = expense.description.chars().take(desc_width).collect();
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<desc_width$}  {:>12}  {}\n",
            expense.id.to_string(),
            expense.created_at.format("%Y-%m-%d").to_string(),
            description,
            expense.amount.format_with_symbol(symbol),
            member_name(members, expense.paid_by),
            desc_width = desc_width,
        ));
    }

    output
}

/// Format one expense with its splits and comments
pub fn format_expense_details(expense: &Expense, members: &[Member], symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.description));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Paid by:  {}\n",
        member_name(members, expense.paid_by)
    ));
    output.push_str(&format!(
        "  Added by: {}\n",
        member_name(members, expense.author_id)
    ));
    output.push_str(&format!(
        "  Created:  {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output.push_str("\nSplit:\n");
    for split in &expense.splits {
        output.push_str(&format!(
            "  {} owes {}\n",
            member_name(members, split.member_id),
            split.amount.format_with_symbol(symbol)
        ));
    }

    if !expense.comments.is_empty() {
        output.push_str("\nComments:\n");
        for comment in &expense.comments {
            output.push_str(&format!(
                "  [{}] {}: {}\n",
                comment.created_at.format("%Y-%m-%d %H:%M"),
                comment.author_name,
                comment.text
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Comment, Money, Split, User};

    fn sample() -> (Vec<Member>, Expense) {
        let members = vec![
            Member::new(MemberId::new(), "Asha"),
            Member::new(MemberId::new(), "Ravi"),
        ];
        let expense = Expense::new(
            "Dinner",
            Money::from_cents(1001),
            members[0].id,
            members[0].id,
            vec![
                Split::new(members[0].id, Money::from_cents(501)),
                Split::new(members[1].id, Money::from_cents(500)),
            ],
        );
        (members, expense)
    }

    #[test]
    fn test_expense_list() {
        let (members, expense) = sample();
        let output = format_expense_list(&[expense], &members, "₹");

        assert!(output.contains("Dinner"));
        assert!(output.contains("₹10.01"));
        assert!(output.contains("Asha"));
        assert_eq!(format_expense_list(&[], &members, "₹"), "No expenses yet.");
    }

    #[test]
    fn test_expense_details_with_comment() {
        let (members, mut expense) = sample();
        let ravi = User::new("Ravi", "ravi@example.com");
        expense.comments.push(Comment::new(&ravi, "Thanks!"));

        let output = format_expense_details(&expense, &members, "₹");
        assert!(output.contains("Asha owes ₹5.01"));
        assert!(output.contains("Ravi owes ₹5.00"));
        assert!(output.contains("Ravi: Thanks!"));
    }

    #[test]
    fn test_unknown_member_falls_back_to_id() {
        let (_, expense) = sample();
        let output = format_expense_details(&expense, &[], "₹");
        assert!(output.contains(&format!("Paid by:  {}", expense.paid_by)));
    }
}
