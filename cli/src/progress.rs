use std::io::{self, Write};

use vacancy_collector::collect::ProgressObserver;

const BAR_WIDTH: usize = 100;

/// Redraws a `█`/`░` progress bar on the current terminal line after each
/// collected vacancy.
pub struct TextProgress {
    out: io::Stdout,
}

impl TextProgress {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl ProgressObserver for TextProgress {
    fn on_item(&mut self, processed: usize, total: usize) {
        let line = render_bar(processed, total);
        let _ = write!(self.out, "\r{}", line);
        let _ = self.out.flush();
    }
}

fn render_bar(processed: usize, total: usize) -> String {
    let percent = if total == 0 {
        100.0
    } else {
        100.0 * processed as f64 / total as f64
    };
    let filled = (percent as usize).min(BAR_WIDTH);
    let bar = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
    format!(" {} / {} |{}| {:.1}%", processed, total, bar, percent)
}
