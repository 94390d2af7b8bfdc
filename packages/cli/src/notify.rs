//! Terminal user notifications.

use aigis_datasets::Notifier;
use console::style;

/// Prints alerts to stderr, highlighted so they stand out from log output.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {message}", style("error:").red().bold());
    }
}
