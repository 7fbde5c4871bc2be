use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_auth_command, handle_config_command, handle_expense_command, handle_profile_command,
    handle_summary_command, AppContext, AuthCommands, ConfigCommands, ExpenseCommands,
    ProfileCommands, SummaryArgs,
};
use expense_tracker::display::format_about;
use expense_tracker::logging;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track your expenses from the terminal",
    long_about = "Record expenses, see this month's total and search your spending \
                  history. Data lives in your own hosted backend project."
)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, register, sign out
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// This month's total plus a filtered list
    Summary(SummaryArgs),

    /// View or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// About this application
    About,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut ctx = AppContext::load()?;

    match cli.command {
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd).await?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd).await?,
        Some(Commands::Summary(args)) => handle_summary_command(&ctx, args).await?,
        Some(Commands::Profile(cmd)) => handle_profile_command(&ctx, cmd).await?,
        Some(Commands::Config(cmd)) => {
            handle_config_command(&ctx.paths, &mut ctx.settings, cmd)?
        }
        Some(Commands::About) => print!("{}", format_about()),
        None => {
            println!("Expense Tracker - track your spending from the terminal");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses auth login' to sign in.");
        }
    }

    Ok(())
}
