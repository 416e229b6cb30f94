use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use groupsplit::cli::{
    handle_expense_command, handle_group_command, handle_user_command, ExpenseCommands,
    GroupCommands, UserCommands,
};
use groupsplit::config::{paths::GroupSplitPaths, settings::Settings};
use groupsplit::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "GROUPSPLIT_LOG";

#[derive(Parser)]
#[command(
    name = "groupsplit",
    version,
    about = "Split shared expenses and settle up with the fewest payments",
    long_about = "groupsplit tracks shared expenses inside small groups. Record who \
                  paid and how each expense is divided; groupsplit keeps everyone's \
                  balance and suggests the payments that settle the group."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    User(UserCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(GroupCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = GroupSplitPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?.with_audit(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Group(cmd)) => {
            handle_group_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing groupsplit at: {}", paths.base_dir().display());
            groupsplit::storage::init::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'groupsplit login --email <email> --name <name>' to get started.");
        }
        Some(Commands::Config) => {
            println!("groupsplit Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Default split mode: {}", settings.default_split_mode);
            println!("  Audit enabled:      {}", settings.audit_enabled);
        }
        None => {
            println!("groupsplit - split shared expenses and settle up");
            println!();
            println!("Run 'groupsplit --help' for usage information.");
        }
    }

    Ok(())
}
