//! Error display for the CLI.

use colored::Colorize;
use fleetcap_provider::{ApplyError, ProviderError};

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(apply_err) = err.downcast_ref::<ApplyError>() {
        eprintln!("\nCause: {}", apply_err.source);
        if !apply_err.applied.is_empty() {
            eprintln!(
                "Already applied before the failure: {}",
                apply_err.applied.join(", ")
            );
        }
        print_provider_hint(&apply_err.source);
        return;
    }

    if let Some(provider_err) = err.downcast_ref::<ProviderError>() {
        print_provider_hint(provider_err);
    }
}

fn print_provider_hint(err: &ProviderError) {
    match err {
        ProviderError::Api { status: 401, .. } => {
            eprintln!(
                "\n{}",
                "Hint: Your token may be missing or expired. Run `fleetcap auth login`.".yellow()
            );
        }
        ProviderError::Api { status: 403, .. } => {
            eprintln!(
                "\n{}",
                "Hint: You may not have permission for this operation.".yellow()
            );
        }
        ProviderError::Api {
            request_id: Some(request_id),
            ..
        } => {
            eprintln!("\nRequest ID: {}", request_id);
        }
        ProviderError::Network(_) => {
            eprintln!(
                "\n{}",
                "Hint: Check your network connection and API endpoint.".yellow()
            );
        }
        _ => {}
    }
}
