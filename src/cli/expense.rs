//! Expense CLI commands
//!
//! Resolves group, member and expense references typed by the user, turns
//! the split flags into a [`SplitDirective`] and hands off to the service.

use std::str::FromStr;

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{GroupSplitError, GroupSplitResult};
use crate::ledger::{SplitDirective, SplitMode};
use crate::models::{Expense, Member, Money};
use crate::services::{ExpenseInput, ExpenseService, GroupService, UserService};
use crate::storage::Storage;

/// How to divide an expense
#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// Split mode (equal, selective, custom)
    #[arg(short, long)]
    pub split: Option<String>,
    /// Members sharing a selective split (repeat or comma-separate)
    #[arg(short, long = "with", value_delimiter = ',')]
    pub with: Vec<String>,
    /// Custom share as MEMBER=AMOUNT (repeatable)
    #[arg(long = "share", value_name = "MEMBER=AMOUNT")]
    pub share: Vec<String>,
}

impl SplitArgs {
    fn is_empty(&self) -> bool {
        self.split.is_none() && self.with.is_empty() && self.share.is_empty()
    }

    /// The requested mode; `--share` implies custom and `--with` selective
    fn mode(&self, default: SplitMode) -> GroupSplitResult<SplitMode> {
        if let Some(split) = &self.split {
            return Ok(SplitMode::from_str(split)?);
        }
        if !self.share.is_empty() {
            Ok(SplitMode::Custom)
        } else if !self.with.is_empty() {
            Ok(SplitMode::Selective)
        } else {
            Ok(default)
        }
    }

    fn directive(&self, default: SplitMode, members: &[Member]) -> GroupSplitResult<SplitDirective> {
        let mode = self.mode(default)?;
        if mode != SplitMode::Selective && !self.with.is_empty() {
            return Err(GroupSplitError::Validation(format!(
                "--with only applies to selective splits, not {}.",
                mode
            )));
        }
        if mode != SplitMode::Custom && !self.share.is_empty() {
            return Err(GroupSplitError::Validation(format!(
                "--share only applies to custom splits, not {}.",
                mode
            )));
        }

        match mode {
            SplitMode::Equal => Ok(SplitDirective::Equal),
            SplitMode::Selective => {
                let selected = self
                    .with
                    .iter()
                    .map(|name| GroupService::find_member(members, name).map(|m| m.id))
                    .collect::<GroupSplitResult<Vec<_>>>()?;
                Ok(SplitDirective::SelectiveEqual(selected))
            }
            SplitMode::Custom => {
                let shares = self
                    .share
                    .iter()
                    .map(|raw| {
                        let (name, amount) = parse_share(raw)?;
                        let member = GroupService::find_member(members, name)?;
                        Ok((member.id, amount))
                    })
                    .collect::<GroupSplitResult<Vec<_>>>()?;
                Ok(SplitDirective::custom_from_raw(shares))
            }
        }
    }
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense to a group
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "250.00" or "250")
        amount: String,
        /// Member who paid (defaults to you)
        #[arg(short, long)]
        paid_by: Option<String>,
        #[command(flatten)]
        split: SplitArgs,
    },
    /// Edit an expense you added
    Edit {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New payer
        #[arg(short, long)]
        paid_by: Option<String>,
        #[command(flatten)]
        split: SplitArgs,
    },
    /// Delete an expense you added
    Delete {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
    /// List a group's expenses, newest first
    List {
        /// Group name or ID
        group: String,
    },
    /// Show an expense with its splits and comments
    Show {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
    /// Comment on an expense
    Comment {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
        /// Comment text
        text: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> GroupSplitResult<()> {
    let groups = GroupService::new(storage);
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            split,
        } => {
            let group = groups.find(&group)?;
            let members = groups.members(&group)?;

            let amount = parse_amount(&amount)?;
            let paid_by = match paid_by {
                Some(name) => GroupService::find_member(&members, &name)?.id,
                None => UserService::new(storage).require_user()?.id,
            };
            let directive = split.directive(settings.default_split_mode, &members)?;

            let expense = service.add(
                group.id,
                ExpenseInput {
                    description,
                    amount,
                    paid_by,
                    directive,
                },
            )?;

            println!(
                "Added expense: {} ({})",
                expense.description,
                expense.amount.format_with_symbol(symbol)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Edit {
            group,
            expense,
            description,
            amount,
            paid_by,
            split,
        } => {
            let group = groups.find(&group)?;
            let members = groups.members(&group)?;
            let existing = ExpenseService::find(&group, &expense)?;

            if description.is_none() && amount.is_none() && paid_by.is_none() && split.is_empty()
            {
                println!("No changes specified. Use --description, --amount, --paid-by or split options.");
                return Ok(());
            }

            let amount = amount.as_deref().map(parse_amount).transpose()?;
            let paid_by = paid_by
                .map(|name| GroupService::find_member(&members, &name).map(|m| m.id))
                .transpose()?;

            let directive = match amount {
                Some(new_amount) if new_amount != existing.amount => {
                    split.directive(settings.default_split_mode, &members)?
                }
                _ if split.is_empty() => existing_shares(&existing),
                _ => split.directive(settings.default_split_mode, &members)?,
            };

            let updated = service.edit(
                group.id,
                existing.id,
                ExpenseInput {
                    description: description.unwrap_or_else(|| existing.description.clone()),
                    amount: amount.unwrap_or(existing.amount),
                    paid_by: paid_by.unwrap_or(existing.paid_by),
                    directive,
                },
            )?;

            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { group, expense } => {
            let group = groups.find(&group)?;
            let found = ExpenseService::find(&group, &expense)?;

            if let Some(removed) = service.delete(group.id, found.id)? {
                println!("Deleted expense: {}", removed.description);
            }
        }

        ExpenseCommands::List { group } => {
            let group = groups.find(&group)?;
            let members = groups.members(&group)?;
            print!(
                "{}",
                format_expense_list(&service.list(&group), &members, symbol)
            );
        }

        ExpenseCommands::Show { group, expense } => {
            let group = groups.find(&group)?;
            let members = groups.members(&group)?;
            let found = ExpenseService::find(&group, &expense)?;
            print!("{}", format_expense_details(&found, &members, symbol));
        }

        ExpenseCommands::Comment {
            group,
            expense,
            text,
        } => {
            let group = groups.find(&group)?;
            let found = ExpenseService::find(&group, &expense)?;
            service.add_comment(group.id, found.id, &text)?;
            println!("Comment added to {}.", found.description);
        }
    }

    Ok(())
}

/// Parse a user-entered amount
fn parse_amount(raw: &str) -> GroupSplitResult<Money> {
    Money::parse(raw).map_err(|e| {
        GroupSplitError::Validation(format!(
            "Invalid amount: '{}'. Use a format like '250.00' or '250'. Error: {}",
            raw, e
        ))
    })
}

/// Split `MEMBER=AMOUNT` into its parts
fn parse_share(raw: &str) -> GroupSplitResult<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, amount)| (name.trim(), amount.trim()))
        .ok_or_else(|| {
            GroupSplitError::Validation(format!(
                "Invalid share '{}'. Expected MEMBER=AMOUNT.",
                raw
            ))
        })
}

/// Keep an expense's current split when only its text or payer changes
fn existing_shares(expense: &Expense) -> SplitDirective {
    SplitDirective::Custom(
        expense
            .splits
            .iter()
            .map(|split| (split.member_id, split.amount))
            .collect(),
    )
}
