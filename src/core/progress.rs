//! Download progress reporting.
//!
//! The download loop is the only writer of the byte counter; a separate
//! display task polls it on a fixed interval and redraws a single line.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const REFRESH_INTERVAL: Duration = Duration::from_millis(250);

const SPINNER_FRAMES: &[&str] = &["\\", "|", "/", "-", "✓"];

pub struct ProgressReporter {
    written: Arc<AtomicU64>,
    done: Arc<AtomicBool>,
    display: JoinHandle<ProgressBar>,
    /// Stdout is not a terminal; print the start and end lines plainly.
    echo: bool,
}

impl ProgressReporter {
    /// Start drawing to stdout, alongside the other status lines.
    pub fn start(label: impl Into<String>, total: Option<u64>) -> Self {
        let label = label.into();
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        let echo = bar.is_hidden();
        if echo {
            println!("{label}");
        }

        let mut reporter = Self::with_bar(bar, label, total);
        reporter.echo = echo;
        reporter
    }

    pub fn hidden(label: impl Into<String>, total: Option<u64>) -> Self {
        Self::with_bar(ProgressBar::hidden(), label, total)
    }

    pub fn with_bar(bar: ProgressBar, label: impl Into<String>, total: Option<u64>) -> Self {
        bar.set_style(spinner_style());

        let written = Arc::new(AtomicU64::new(0));
        let done = Arc::new(AtomicBool::new(false));
        let display = tokio::spawn(display_loop(
            bar,
            label.into(),
            total,
            Arc::clone(&written),
            Arc::clone(&done),
        ));

        Self {
            written,
            done,
            display,
            echo: false,
        }
    }

    pub fn advance(&self, bytes: u64) {
        self.written.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    /// Stop the display and leave `message` on the line.
    pub async fn finish(self, message: impl Into<String>) -> u64 {
        let message = message.into();
        let written = self.written();
        let echo = self.echo;
        if let Some(bar) = self.stop().await {
            if echo {
                println!("{} {message}", SPINNER_FRAMES[SPINNER_FRAMES.len() - 1]);
            }
            bar.finish_with_message(message);
        }
        written
    }

    /// Stop the display, keeping the last progress line as it was.
    pub async fn abandon(self) -> u64 {
        let written = self.written();
        if let Some(bar) = self.stop().await {
            bar.abandon();
        }
        written
    }

    async fn stop(self) -> Option<ProgressBar> {
        self.done.store(true, Ordering::Relaxed);
        match self.display.await {
            Ok(bar) => Some(bar),
            Err(e) => {
                log::warn!("progress display task failed: {e}");
                None
            }
        }
    }
}

async fn display_loop(
    bar: ProgressBar,
    label: String,
    total: Option<u64>,
    written: Arc<AtomicU64>,
    done: Arc<AtomicBool>,
) -> ProgressBar {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let current = written.load(Ordering::Relaxed);
        bar.set_message(render_line(&label, current, total));
        bar.tick();

        let reached_total = total.is_some_and(|total| current >= total);
        if reached_total || done.load(Ordering::Relaxed) {
            break;
        }
    }

    bar
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(SPINNER_FRAMES)
}

/// `<label> (<pct>% | <MB>MB)`, or just the megabytes when the size is unknown.
pub fn render_line(label: &str, written: u64, total: Option<u64>) -> String {
    match percent(written, total) {
        Some(pct) => format!("{label} ({pct}% | {}MB)", format_megabytes(written)),
        None => format!("{label} ({}MB)", format_megabytes(written)),
    }
}

/// Truncated percentage; `None` without a usable total.
pub fn percent(written: u64, total: Option<u64>) -> Option<u64> {
    match total {
        Some(total) if total > 0 => Some((u128::from(written) * 100 / u128::from(total)) as u64),
        _ => None,
    }
}

/// Whole megabytes with en-US thousands separators.
pub fn format_megabytes(bytes: u64) -> String {
    group_thousands(bytes / 1_024 / 1_024)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
