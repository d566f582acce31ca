//! Colorful console output for learner events.
//!
//! Provides a custom `tracing` layer that formats MRCD events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (MRCD start/pass/end, pairs added, inconsistency)
//! - **WARN**: Pass limit reached
//! - **DEBUG**: Skipped searches and ignored settings
//! - **TRACE**: Individual comparisons and RCD strata

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the learner console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `otforge_ranking=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let default = "otforge_ranking=info"
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(LearnerConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

fn print_banner() {
    let banner = format!("OTForge v{} - Optimality Theory ranking engine", VERSION);
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats learner events with colors.
pub struct LearnerConsoleLayer;

impl<S: Subscriber> Layer<S> for LearnerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("otforge_ranking") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    winner: Option<String>,
    loser: Option<String>,
    input: Option<String>,
    erc: Option<String>,
    winners: Option<u64>,
    prior_ercs: Option<u64>,
    constraints: Option<u64>,
    pass_limit: Option<u64>,
    pass: Option<u64>,
    passes: Option<u64>,
    pairs: Option<u64>,
    ercs: Option<u64>,
    searches: Option<u64>,
    duration_ms: Option<u64>,
    hit_rate: Option<f64>,
    consistent: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "winner" => self.winner = Some(s),
            "loser" => self.loser = Some(s),
            "input" => self.input = Some(s),
            "erc" => self.erc = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "winners" => self.winners = Some(value),
            "prior_ercs" => self.prior_ercs = Some(value),
            "constraints" => self.constraints = Some(value),
            "pass_limit" => self.pass_limit = Some(value),
            "pass" => self.pass = Some(value),
            "passes" => self.passes = Some(value),
            "pairs" => self.pairs = Some(value),
            "ercs" => self.ercs = Some(value),
            "searches" => self.searches = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "hit_rate" {
            self.hit_rate = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "consistent" {
            self.consistent = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "winner" => self.winner = Some(value.to_string()),
            "loser" => self.loser = Some(value.to_string()),
            "input" => self.input = Some(value.to_string()),
            "erc" => self.erc = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "mrcd_start" => format_mrcd_start(v),
        "mrcd_pass" => format_mrcd_pass(v),
        "mrcd_end" => format_mrcd_end(v),
        "pair_added" => format_pair_added(v),
        "inconsistency_detected" => format_inconsistency(v),
        "pass_limit_reached" if level <= Level::WARN => format_pass_limit(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_mrcd_start(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} MRCD │ {} winners │ {} prior ERCs │ {} constraints",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.winners).bright_yellow(),
        count(v.prior_ercs).bright_yellow(),
        count(v.constraints).bright_yellow(),
    );

    if let Some(limit) = v.pass_limit.filter(|l| *l > 0) {
        output.push_str(&format!(
            " │ {} pass limit",
            limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_mrcd_pass(v: &EventVisitor) -> String {
    format!(
        "{} {} Pass {:>4} │ {} new pairs │ {} ERCs │ {}",
        format_elapsed(),
        "↻".bright_blue(),
        count(v.pass).white().bold(),
        count(v.pairs).bright_magenta().bold(),
        count(v.ercs).white(),
        format_consistency(v.consistent.unwrap_or(true)),
    )
}

fn format_pair_added(v: &EventVisitor) -> String {
    format!(
        "{} {} /{}/ {} ≻ {} │ {}",
        format_elapsed(),
        "+".bright_green(),
        v.input.as_deref().unwrap_or("?"),
        v.winner.as_deref().unwrap_or("?").bright_white().bold(),
        v.loser.as_deref().unwrap_or("?"),
        v.erc.as_deref().unwrap_or("").bright_black(),
    )
}

fn format_inconsistency(v: &EventVisitor) -> String {
    format!(
        "{} {} Inconsistent at /{}/ → {} │ {} ERCs",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.input.as_deref().unwrap_or("?"),
        v.winner.as_deref().unwrap_or("?").bright_red(),
        count(v.ercs),
    )
}

fn format_pass_limit(v: &EventVisitor) -> String {
    format!(
        "{} {} Pass limit reached after {} passes │ {} pairs",
        format_elapsed(),
        "!".bright_yellow().bold(),
        count(v.passes).yellow(),
        count(v.pairs),
    )
}

fn format_mrcd_end(v: &EventVisitor) -> String {
    format!(
        "{} {} MRCD complete │ {} passes │ {} pairs │ {} searches ({:.0}% hits) │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        count(v.passes).white(),
        count(v.pairs).bright_magenta().bold(),
        count(v.searches).white(),
        v.hit_rate.unwrap_or(0.0) * 100.0,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_consistency(v.consistent.unwrap_or(true)),
    )
}

fn format_consistency(consistent: bool) -> String {
    if consistent {
        "CONSISTENT".bright_green().bold().to_string()
    } else {
        "INCONSISTENT".bright_red().bold().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
