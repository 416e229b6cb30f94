//! Group CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_balances, format_group_details, format_group_list, format_member_list,
    format_settlement,
};
use crate::error::GroupSplitResult;
use crate::services::GroupService;
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group; you become its first member
    Create {
        /// Group name
        name: String,
    },
    /// Join a group with its invite code
    Join {
        /// Six-character invite code
        invite_code: String,
    },
    /// List your groups
    List,
    /// Show a group with members, balances and how to settle up
    Show {
        /// Group name or ID
        group: String,
    },
    /// Show each member's net balance
    Balances {
        /// Group name or ID
        group: String,
    },
    /// Show the payments that settle the group
    Settle {
        /// Group name or ID
        group: String,
    },
    /// List group members
    Members {
        /// Group name or ID
        group: String,
    },
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> GroupSplitResult<()> {
    let service = GroupService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GroupCommands::Create { name } => {
            let group = service.create(&name)?;
            println!("Created group: {}", group.name);
            println!("  Invite code: {}", group.invite_code);
            println!("  ID: {}", group.id);
        }

        GroupCommands::Join { invite_code } => {
            let outcome = service.join(&invite_code)?;
            if outcome.joined {
                println!("Joined group: {}", outcome.group.name);
            } else {
                println!("You are already a member of {}.", outcome.group.name);
            }
        }

        GroupCommands::List => {
            let groups = service.list_for_current_user()?;
            print!("{}", format_group_list(&groups));
        }

        GroupCommands::Show { group } => {
            let found = service.find(&group)?;
            let summary = service.summary(&found)?;
            print!("{}", format_group_details(&summary, symbol));
        }

        GroupCommands::Balances { group } => {
            let found = service.find(&group)?;
            let summary = service.summary(&found)?;
            print!("{}", format_balances(&summary.ledger.balances, symbol));
        }

        GroupCommands::Settle { group } => {
            let found = service.find(&group)?;
            let summary = service.summary(&found)?;
            print!("{}", format_settlement(&summary.ledger.debts, symbol));
        }

        GroupCommands::Members { group } => {
            let found = service.find(&group)?;
            let members = service.members(&found)?;
            println!("{} ({} members)", found.name, members.len());
            print!("{}", format_member_list(&members));
        }
    }

    Ok(())
}
