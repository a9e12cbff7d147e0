//! Terminal notification channel

use colored::Colorize;
use msync_core::Notifier;

/// Prints synchronization results as they happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        println!("{} {message}", "OK".green().bold());
    }

    fn error(&self, message: &str) {
        eprintln!("{}: {message}", "error".red().bold());
    }
}
