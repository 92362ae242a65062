use colored::*;

use crate::export::{ExportError, Relocation, size_in_mib};

/// Prints the heading of a pipeline step, preceded by a blank line.
pub fn step(message: &str) {
    println!("\n{}", message.bold());
}

/// Prints a completed step.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an indented detail line under the previous message.
pub fn detail(message: &str) {
    println!("  {}", message);
}

/// Prints a non-fatal warning with a follow-up suggestion.
pub fn warning(message: &str, suggestion: &str) {
    println!("\n{} {}", "⚠".yellow(), message.yellow());
    println!("{}", suggestion);
}

/// Prints a fatal error and its remediation hint.
pub fn failure(err: &ExportError) {
    match err {
        ExportError::LibraryUnavailable { python, detail } => {
            println!("{} {}", "✗".red(), "Ultralytics not installed".red());
            println!("  {} ({})", detail.dimmed(), python.display());
        }
        _ => println!("\n{} {}", "✗".red(), format!("Error: {}", err).red()),
    }
    println!("\n{}", err.hint());
}

/// Prints the outcome of the relocation step.
pub fn relocation(relocation: &Relocation, stem: &str) {
    match relocation {
        Relocation::Moved { destination, bytes } => {
            println!("\n{} Model saved to: {}", "✓".green(), destination.display());
            detail(&format!("Size: {} MB", size_in_mib(*bytes)));
        }
        Relocation::Missing { expected } => warning(
            &format!("Could not find exported model at {}", expected.display()),
            &format!("Check the {}_saved_model directory", stem),
        ),
    }
}
