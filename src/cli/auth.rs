//! Sign-in, sign-up and sign-out commands

use clap::Subcommand;

use super::{prompt_line, prompt_secret, AppContext};
use crate::auth::SignUpOutcome;
use crate::error::TrackerResult;
use crate::validation::{RegistrationForm, SignInForm};

/// Auth subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with e-mail and password
    Login {
        /// E-mail address (prompted if omitted)
        #[arg(short, long, env = "EXPENSE_TRACKER_EMAIL")]
        email: Option<String>,
    },
    /// Create a new account
    Register,
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Status,
}

/// Handle an auth command
pub async fn handle_auth_command(ctx: &AppContext, cmd: AuthCommands) -> TrackerResult<()> {
    match cmd {
        AuthCommands::Login { email } => {
            let email = match email {
                Some(email) => email,
                None => prompt_line("Email: ")?,
            };
            let form = SignInForm {
                email,
                password: prompt_secret("Password: ")?,
            };

            let backend = ctx.backend()?;
            let session = ctx.session_service(&backend).sign_in(&form).await?;
            println!("Signed in as {}", session.user.email);
        }

        AuthCommands::Register => {
            let form = RegistrationForm {
                full_name: prompt_line("Full name: ")?,
                email: prompt_line("Email: ")?,
                password: prompt_secret("Password: ")?,
                password_confirmation: prompt_secret("Confirm password: ")?,
            };

            let backend = ctx.backend()?;
            match ctx.session_service(&backend).sign_up(&form).await? {
                SignUpOutcome::SignedIn(session) => {
                    println!("Account created. Signed in as {}", session.user.email);
                }
                SignUpOutcome::ConfirmationRequired(user) => {
                    println!("Account created for {}.", user.email);
                    println!("Check your inbox to confirm the address, then run 'expenses auth login'.");
                }
            }
        }

        AuthCommands::Logout => {
            if !ctx.sessions.exists() {
                println!("Not signed in.");
                return Ok(());
            }
            let backend = ctx.backend()?;
            ctx.session_service(&backend).sign_out().await?;
            println!("Signed out.");
        }

        AuthCommands::Status => {
            if !ctx.sessions.exists() {
                println!("Not signed in.");
                return Ok(());
            }
            let backend = ctx.backend()?;
            let (session, user) = ctx.session_service(&backend).verified_user().await?;
            println!("Signed in as {}", user.email);
            if let Some(name) = &user.user_metadata.full_name {
                println!("Name:          {}", name);
            }
            println!(
                "Session until: {}",
                session.expires_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
    }

    Ok(())
}
