//! Expense service
//!
//! Adding, editing and deleting expenses and commenting on them. Splits
//! are computed by the ledger allocator before anything is persisted; a
//! rejected allocation leaves the group untouched.

use crate::audit::EntityType;
use crate::error::{GroupSplitError, GroupSplitResult};
use crate::ledger::{allocate_splits, SplitDirective};
use crate::models::expense::{validate_amount, validate_description};
use crate::models::{Comment, Expense, ExpenseId, Group, GroupId, MemberId, Money};
use crate::storage::Storage;

use super::group::GroupService;
use super::user::UserService;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Everything needed to write an expense
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub directive: SplitDirective,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense authored by the current user
    pub fn add(&self, group_id: GroupId, input: ExpenseInput) -> GroupSplitResult<Expense> {
        let user = UserService::new(self.storage).require_user()?;
        let mut group = GroupService::new(self.storage).get_for_member(&user, group_id)?;

        let description = input.description.trim().to_string();
        validate_description(&description)?;
        validate_amount(input.amount)?;
        ensure_payer_is_member(&group, input.paid_by)?;

        let splits = allocate_splits(input.amount, &group.member_ids, &input.directive)?;
        let expense = Expense::new(description, input.amount, input.paid_by, user.id, splits);

        group.expenses.push(expense.clone());
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;
        tracing::info!(
            group = %group_id,
            expense = %expense.id,
            amount = expense.amount.cents(),
            mode = %input.directive.mode(),
            "added expense"
        );

        Ok(expense)
    }

    /// Replace an expense with recomputed splits
    ///
    /// Only the author may edit. The id, author, creation time and comments
    /// are kept.
    pub fn edit(
        &self,
        group_id: GroupId,
        expense_id: ExpenseId,
        input: ExpenseInput,
    ) -> GroupSplitResult<Expense> {
        let user = UserService::new(self.storage).require_user()?;
        let mut group = GroupService::new(self.storage).get_for_member(&user, group_id)?;

        let before = group
            .find_expense(expense_id)
            .filter(|e| e.is_authored_by(user.id))
            .cloned()
            .ok_or_else(|| {
                GroupSplitError::PermissionDenied(
                    "Expense not found or you do not have permission to edit it.".into(),
                )
            })?;

        let description = input.description.trim().to_string();
        validate_description(&description)?;
        validate_amount(input.amount)?;
        ensure_payer_is_member(&group, input.paid_by)?;

        let splits = allocate_splits(input.amount, &group.member_ids, &input.directive)?;
        let updated = Expense {
            description,
            amount: input.amount,
            paid_by: input.paid_by,
            splits,
            ..before.clone()
        };

        if let Some(slot) = group.find_expense_mut(expense_id) {
            *slot = updated.clone();
        }
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_update(
            EntityType::Expense,
            updated.id.to_string(),
            Some(updated.description.clone()),
            &before,
            &updated,
        )?;
        tracing::info!(group = %group_id, expense = %expense_id, "edited expense");

        Ok(updated)
    }

    /// Delete an expense authored by the current user
    ///
    /// Deleting an expense that does not exist is a no-op and returns `None`.
    pub fn delete(
        &self,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> GroupSplitResult<Option<Expense>> {
        let user = UserService::new(self.storage).require_user()?;
        let mut group = GroupService::new(self.storage).get_for_member(&user, group_id)?;

        match group.find_expense(expense_id) {
            None => {
                tracing::debug!(group = %group_id, expense = %expense_id, "nothing to delete");
                return Ok(None);
            }
            Some(expense) if !expense.is_authored_by(user.id) => {
                return Err(GroupSplitError::PermissionDenied(
                    "You do not have permission to delete this expense.".into(),
                ));
            }
            Some(_) => {}
        }

        let removed = group.remove_expense(expense_id);
        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        if let Some(expense) = &removed {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.description.clone()),
                expense,
            )?;
            tracing::info!(group = %group_id, expense = %expense_id, "deleted expense");
        }

        Ok(removed)
    }

    /// Append a comment from the current user
    pub fn add_comment(
        &self,
        group_id: GroupId,
        expense_id: ExpenseId,
        text: &str,
    ) -> GroupSplitResult<Comment> {
        let user = UserService::new(self.storage).require_user()?;

        let text = text.trim();
        if text.is_empty() {
            return Err(GroupSplitError::Validation("Comment cannot be empty.".into()));
        }

        let mut group = GroupService::new(self.storage).get_for_member(&user, group_id)?;
        let comment = Comment::new(&user, text);

        let expense = group
            .find_expense_mut(expense_id)
            .ok_or_else(|| GroupSplitError::expense_not_found(expense_id.to_string()))?;
        expense.comments.push(comment.clone());

        self.storage.groups.upsert(group)?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Comment,
            comment.id.to_string(),
            Some(format!("on {}", expense_id)),
            &comment,
        )?;
        tracing::info!(expense = %expense_id, comment = %comment.id, "added comment");

        Ok(comment)
    }

    /// A group's expenses, newest first
    pub fn list(&self, group: &Group) -> Vec<Expense> {
        let mut expenses = group.expenses.clone();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses
    }

    /// Find an expense in a group by full ID or displayed short ID
    pub fn find(group: &Group, identifier: &str) -> GroupSplitResult<Expense> {
        let wanted = identifier.trim();
        let mut matches = group.expenses.iter().filter(|e| e.id.matches(wanted));

        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense.clone()),
            (Some(_), Some(_)) => Err(GroupSplitError::Validation(format!(
                "Expense id '{}' is ambiguous; use more characters.",
                wanted
            ))),
            (None, _) => Err(GroupSplitError::expense_not_found(wanted)),
        }
    }
}

fn ensure_payer_is_member(group: &Group, paid_by: MemberId) -> GroupSplitResult<()> {
    if group.has_member(paid_by) {
        Ok(())
    } else {
        Err(GroupSplitError::member_not_found(paid_by.to_string()))
    }
}
