//! weweb-upload - publish a WeWeb object or section from its project directory.
//!
//! Reads `package.json`, makes sure the developer has a valid session, then
//! uploads `dist/front.js` and `dist/manager.js` through presigned URLs.

mod prompt;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use weweb_upload_core::utils::format_size;
use weweb_upload_core::{run, ApiClient, Config, PreferenceStore, PublishEvent, BUILD_ARTIFACTS};

use prompt::TerminalPrompt;

const USAGE: &str = "\
Usage: weweb-upload [--logout | --help]

Run from a WeWeb object or section project after building it.

Options:
  --logout   Forget the cached login token
  --help     Show this message

Environment:
  WEWEB_API_URL               Control plane base URL
  WEWEB_UPLOAD_PREF_PATH      Preference file location
  WEWEB_PROJECT_DIR           Project directory (default: current directory)
  WEWEB_REQUEST_TIMEOUT_SECS  HTTP timeout in seconds (default: none)
  RUST_LOG                    Log filter (default: warn)";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Publish,
    Logout,
    Help,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [] => Some(Command::Publish),
        [flag] if flag == "--logout" => Some(Command::Logout),
        [flag] if flag == "--help" || flag == "-h" => Some(Command::Help),
        _ => None,
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Some(command) => command,
        None => {
            eprintln!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
    };

    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::from_env()?;
    let store = PreferenceStore::new(config.preference_path.clone());

    if command == Command::Logout {
        return Ok(if logout(&store) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let api = ApiClient::new(&config.api_url, config.request_timeout)?;
    info!(api_url = %config.api_url, "weweb-upload starting");

    let result = run(
        &api,
        &TerminalPrompt,
        &store,
        api.base_url(),
        &config.project_dir,
        BUILD_ARTIFACTS,
        print_event,
    )
    .await;

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            debug!(error = ?e, "Publish aborted");
            println!("Error : {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Drop the cached token. Returns `false` if the file could not be updated.
fn logout(store: &PreferenceStore) -> bool {
    let mut pref = store.load();
    if pref.token().is_none() {
        println!("-- Not logged in --");
        return true;
    }

    pref.clear_token();
    if store.save(&pref) {
        println!("-- Logged out --");
        true
    } else {
        println!("Error : could not update {}", store.path().display());
        false
    }
}

fn print_event(event: &PublishEvent) {
    match event {
        PublishEvent::Started { kind, name } => println!("-- Upload {} {} --", kind, name),
        PublishEvent::LoggedIn => println!("-- Credentials ok --"),
        PublishEvent::Uploaded { filename, bytes } => {
            println!("-- {} upload ok ({}) --", filename, format_size(*bytes));
        }
        PublishEvent::Completed { .. } => println!("-- UPLOAD DONE --"),
    }
}
