use std::fmt;
use std::sync::{OnceLock, RwLock};

use colored::Colorize;

use alpha_core::{AccountStatus, RosterBackupInfo};
use alpha_domain::{AccountSummary, DailyEntry, Displayable, Roster};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

static COLOR_ENABLED: OnceLock<RwLock<bool>> = OnceLock::new();

pub fn set_color_enabled(enabled: bool) {
    let lock = COLOR_ENABLED.get_or_init(|| RwLock::new(true));
    if let Ok(mut guard) = lock.write() {
        *guard = enabled;
    }
}

fn color_enabled() -> bool {
    COLOR_ENABLED
        .get_or_init(|| RwLock::new(true))
        .read()
        .map(|guard| *guard)
        .unwrap_or(true)
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Warning => format!("WARNING: {text}"),
        MessageKind::Error => format!("ERROR: {text}"),
        _ => text,
    };

    if !color_enabled() {
        return base;
    }

    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

fn format_days(days: Option<u32>) -> String {
    match days {
        Some(0) => "reached".into(),
        Some(days) => format!("{} days", days),
        None => "--".into(),
    }
}

fn format_progress(progress: Option<f64>) -> String {
    match progress {
        Some(value) => format!("{:.0}%", value),
        None => "--".into(),
    }
}

/// Prints the history table (newest first) for the current account.
pub fn render_history(history: &[DailyEntry]) {
    println!("{:<4} {:<12} {:>8} {:>12}", "#", "DATE", "POINTS", "CUMULATIVE");
    for (index, day) in history.iter().enumerate() {
        let marker = if index == 0 { " (today)" } else { "" };
        println!(
            "{:<4} {:<12} {:>8} {:>12}{}",
            index, day.date, day.points, day.cumulative_points, marker
        );
    }
}

/// Prints the account list with the current selection marked.
pub fn render_accounts(roster: &Roster, current_id: &str) {
    for account in &roster.accounts {
        let marker = if account.id == current_id { "*" } else { " " };
        println!("{} {}  [{}]", marker, account.display_label(), account.id);
    }
}

/// Prints the current account header: today, total, target, projection.
pub fn render_status(name: &str, status: &AccountStatus) {
    let target = match status.target_points {
        Some(target) => format!("{}/{}", status.total_points, target),
        None => "no target".into(),
    };
    println!(
        "{}  today {}  total {}  target {}  progress {}  eta {}",
        name,
        status.today_points,
        status.total_points,
        target,
        format_progress(status.progress_percentage),
        format_days(status.days_to_target),
    );
}

/// Prints the all-accounts overview table.
pub fn render_overview(rows: &[AccountSummary]) {
    println!(
        "{:<20} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "ACCOUNT", "TOTAL", "TARGET", "PROGRESS", "REMAINING", "ETA"
    );
    for row in rows {
        let target = row
            .target_points
            .map(|value| value.to_string())
            .unwrap_or_else(|| "--".into());
        let remaining = row
            .points_to_target
            .map(|value| value.to_string())
            .unwrap_or_else(|| "--".into());
        println!(
            "{:<20} {:>8} {:>8} {:>10} {:>10} {:>10}",
            row.name,
            row.total_points,
            target,
            format_progress(row.progress_percentage),
            remaining,
            format_days(row.days_to_target),
        );
    }
}

/// Prints the backup list, newest first.
pub fn render_backups(backups: &[RosterBackupInfo]) {
    if backups.is_empty() {
        info("no backups yet");
        return;
    }
    for backup in backups {
        println!("{}  {}", backup.id, backup.path.display());
    }
}
