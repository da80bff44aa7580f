//! Auth commands: login, signup, logout.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};

use chatgate_core::controller::{Notice, NoticeLevel};
use chatgate_types::error::ControllerError;

use crate::state::{AppState, ConcreteController};

/// Wrong-password retries offered before giving up.
const MAX_LOGIN_ATTEMPTS: usize = 3;

/// `chatgate login`
pub async fn login(state: &AppState, email: Option<String>, json: bool) -> Result<()> {
    let mut controller = state.controller.lock().await;
    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    let notices = controller.login(&email, &password).await?;

    if json {
        let out = serde_json::json!({
            "view": controller.view(),
            "email": controller.email(),
            "notices": notices,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_notices(&notices);
    }
    Ok(())
}

/// `chatgate signup`
pub async fn signup(state: &AppState, email: Option<String>, json: bool) -> Result<()> {
    let controller = state.controller.lock().await;
    let email = match email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;
    let confirm = Password::new().with_prompt("Confirm password").interact()?;

    let outcome = controller.signup(&email, &password, &confirm).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Account created for {}",
        style("✓").green().bold(),
        style(outcome.email.as_deref().unwrap_or(&email)).cyan()
    );
    if outcome.confirmation_required {
        println!(
            "  {}",
            style("Check your inbox and confirm your email, then run `chatgate login`.").dim()
        );
    } else {
        println!("  {}", style("You can now run `chatgate login`.").dim());
    }
    println!();
    Ok(())
}

/// `chatgate logout`
pub async fn logout(state: &AppState, json: bool) -> Result<()> {
    let notices = state.controller.lock().await.logout().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "notices": notices }))?);
    } else {
        print_notices(&notices);
    }
    Ok(())
}

/// Prompt for credentials until login succeeds.
///
/// Returns `false` when the user ran out of attempts. Errors other than
/// bad credentials or invalid input end the prompt immediately.
pub async fn prompt_login(controller: &mut ConcreteController) -> Result<bool> {
    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let email = prompt_email()?;
        let password = Password::new().with_prompt("Password").interact()?;

        match controller.login(&email, &password).await {
            Ok(notices) => {
                print_notices(&notices);
                return Ok(true);
            }
            Err(e) if is_retryable(&e) => {
                println!("\n  {} {e}", style("✗").red().bold());
                if attempt < MAX_LOGIN_ATTEMPTS {
                    println!("  {}\n", style("Try again.").dim());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(false)
}

fn is_retryable(err: &ControllerError) -> bool {
    use chatgate_types::error::AuthError;
    matches!(
        err,
        ControllerError::Auth(
            AuthError::InvalidCredentials | AuthError::MissingField(_) | AuthError::Rejected { .. }
        )
    )
}

fn prompt_email() -> Result<String> {
    Ok(Input::<String>::new().with_prompt("Email").interact_text()?)
}

/// Print notices with a level marker.
pub fn print_notices(notices: &[Notice]) {
    println!();
    for notice in notices {
        let marker = match notice.level {
            NoticeLevel::Info => style("✓").green().bold(),
            NoticeLevel::Warning => style("!").yellow().bold(),
            NoticeLevel::Error => style("✗").red().bold(),
        };
        println!("  {marker} {}", notice.message);
    }
    println!();
}
