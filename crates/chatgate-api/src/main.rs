//! chatgate CLI and browser front-end entry point.
//!
//! Binary name: `chatgate`
//!
//! Parses CLI arguments, loads configuration and secrets, then dispatches to
//! the command handler or starts the local web server.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use chatgate_core::controller::View;
use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,chatgate=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chatgate", &mut std::io::stdout());
        return Ok(());
    }

    // Missing or empty secrets end the process here.
    let state = AppState::init(cli.data_dir.clone()).await?;

    match cli.command {
        Commands::Login { email } => cli::auth::login(&state, email, cli.json).await?,
        Commands::Signup { email } => cli::auth::signup(&state, email, cli.json).await?,
        Commands::Logout => cli::auth::logout(&state, cli.json).await?,
        Commands::Status => cli::status::status(&state, cli.json).await?,
        Commands::Chat => cli::chat::loop_runner::run_chat_loop(&state).await?,

        Commands::Serve { port, host } => {
            let view = state.controller.lock().await.restore().await;
            tracing::info!(%view, "initial view");

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} chatgate listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if view == View::Chat {
                    println!("  {}", console::style("Restored saved session.").dim());
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
