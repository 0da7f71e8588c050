use colored::Colorize;
use domain::{FortuneIssue, FortuneRecord, HistoryLedger};

pub fn history_heading(count: usize) -> String {
    format!("History ({count})")
}

pub fn format_record(record: &FortuneRecord) -> String {
    format!(
        "{}  {}\n  Q: {}\n  A: {}",
        shared::utils::format_date(record.created_at),
        record.mode.short_label(),
        record.question,
        record.answer
    )
}

/// Plain-text listing, newest first, optionally capped.
pub fn format_history(history: &HistoryLedger, limit: Option<usize>) -> String {
    if history.is_empty() {
        return "No fortunes yet. Ask the Magic 8-Ball something!".to_string();
    }
    let shown = limit.unwrap_or(history.len());
    let mut out = history_heading(history.len());
    for record in history.all().take(shown) {
        out.push_str("\n\n");
        out.push_str(&format_record(record));
    }
    out
}

pub fn print_answer(answer: &str) {
    println!("\n  {}\n", answer.bold().cyan());
}

pub fn print_issue(issue: FortuneIssue) {
    let headline = match issue {
        FortuneIssue::NoApiKey => issue.headline().yellow().bold(),
        FortuneIssue::RateLimit | FortuneIssue::ApiError => issue.headline().red().bold(),
    };
    eprintln!("{headline}");
    eprintln!("{}", issue.detail().dimmed());
}
