//! Session CLI commands
//!
//! `login`, `logout` and `whoami` sit at the top level of the command tree.

use clap::Subcommand;

use crate::error::GroupSplitResult;
use crate::services::UserService;
use crate::storage::Storage;

/// Identity commands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Log in, registering on first use
    Login {
        /// E-mail address
        #[arg(short, long)]
        email: String,
        /// Display name (used when registering)
        #[arg(short, long)]
        name: String,
    },
    /// End the current session
    Logout,
    /// Show who is logged in
    Whoami,
}

/// Handle an identity command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> GroupSplitResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Login { email, name } => {
            let outcome = service.login(&email, &name)?;
            if outcome.registered {
                println!("Welcome, {}! Your account has been created.", outcome.user.name);
            } else {
                println!("Logged in as {}.", outcome.user.name);
            }
        }

        UserCommands::Logout => match service.logout()? {
            Some(user) => println!("Logged out {}.", user.name),
            None => println!("Nobody is logged in."),
        },

        UserCommands::Whoami => match service.current_user()? {
            Some(user) => {
                println!("{}", user.name);
                println!("  Email: {}", user.email);
                println!("  ID:    {}", user.id);
            }
            None => println!("Not logged in. Run 'groupsplit login' to start."),
        },
    }

    Ok(())
}
