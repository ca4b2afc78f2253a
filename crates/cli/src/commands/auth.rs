//! Account commands.

use clap::Subcommand;

use shopfront_storefront::error::Result;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::KeyValueStore;
use shopfront_storefront::validation::{LoginForm, RegisterForm};

use crate::output;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Repeat the password
        #[arg(short, long)]
        confirm: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

pub async fn run<S: KeyValueStore + Clone>(
    state: &mut AppState<S>,
    action: AuthAction,
) -> Result<()> {
    match action {
        AuthAction::Login { email, password } => {
            let form = LoginForm { email, password };
            let session = state.auth_mut().login(&form).await?;
            output::done(format!("Welcome back, {}", session.user.first_name()));
        }
        AuthAction::Register {
            name,
            email,
            password,
            confirm,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password: confirm,
            };
            let session = state.auth_mut().register(&form).await?;
            output::done(format!("Welcome, {}", session.user.first_name()));
        }
        AuthAction::Logout => {
            state.auth_mut().logout().await;
            output::done("Signed out");
        }
        AuthAction::Whoami => match state.auth().session() {
            Some(session) => {
                output::line(format!("{} <{}>", session.user.name, session.user.email));
            }
            None => output::line("Not signed in."),
        },
    }
    Ok(())
}
