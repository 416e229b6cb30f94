//! Display formatting for terminal output
//!
//! Plain-text tables and detail views. Amounts are printed with the
//! currency symbol from the user's settings.

pub mod expense;
pub mod group;
pub mod ledger;

pub use expense::{format_expense_details, format_expense_list};
pub use group::{format_group_details, format_group_list, format_member_list};
pub use ledger::{balance_status, format_balances, format_settlement};
