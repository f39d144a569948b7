use notas_core::credentials::{validate_login, validate_registration};

use crate::cli::AuthCommands;
use crate::commands::common::GlobalOptions;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global: &GlobalOptions) -> Result<(), CliError> {
    match command {
        AuthCommands::Login { email, password } => {
            let email = email.trim();
            validate_login(email, &password)?;

            let session = global.open_session()?;
            session.client.login(email, &password).await?;
            println!(
                "Signed in profile '{}' as {email}",
                session.profile_name
            );
            Ok(())
        }
        AuthCommands::Register {
            email,
            password,
            confirm,
        } => {
            let email = email.trim();
            validate_registration(email, &password, &confirm)?;

            let session = global.open_session()?;
            session.client.register(email, &password).await?;
            println!("Registered {email}. Sign in with `notas auth login --email {email}`.");
            Ok(())
        }
        AuthCommands::Status => {
            let session = global.open_session()?;
            if session.client.token().is_some() {
                println!(
                    "Profile '{}' is signed in ({})",
                    session.profile_name,
                    session.client.base_url()
                );
            } else {
                println!("Profile '{}' is not signed in.", session.profile_name);
            }
            Ok(())
        }
        AuthCommands::Logout => {
            let session = global.open_session()?;
            session.client.logout();
            println!("Signed out profile '{}'", session.profile_name);
            Ok(())
        }
    }
}
