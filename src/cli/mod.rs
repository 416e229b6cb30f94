//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod group;
pub mod user;

pub use expense::{handle_expense_command, ExpenseCommands, SplitArgs};
pub use group::{handle_group_command, GroupCommands};
pub use user::{handle_user_command, UserCommands};
