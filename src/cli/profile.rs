//! Profile commands

use clap::Subcommand;

use super::AppContext;
use crate::display::format_profile;
use crate::error::TrackerResult;
use crate::services::ProfileService;
use crate::storage::RepositoryProvider;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,
    /// Change your display name
    Rename {
        /// First and last name
        #[arg(required = true, num_args = 1..)]
        full_name: Vec<String>,
    },
}

/// Handle a profile command
pub async fn handle_profile_command(ctx: &AppContext, cmd: ProfileCommands) -> TrackerResult<()> {
    let (backend, session) = ctx.require_session().await?;
    let repo = backend.repositories.profiles(&session);
    let service = ProfileService::new(repo.as_ref());

    match cmd {
        ProfileCommands::Show => {
            let profile = service.load(&session).await?;
            print!("{}", format_profile(&profile));
        }
        ProfileCommands::Rename { full_name } => {
            let profile = service.rename(&session, &full_name.join(" ")).await?;
            println!("Profile updated: {}", profile.display_name());
        }
    }

    Ok(())
}
