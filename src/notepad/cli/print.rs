use chrono::{DateTime, Utc};
use colored::Colorize;
use notepad::api::{CmdMessage, MessageLevel, PageSummary};
use notepad::model::PageStatus;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 24;
const ACTIVE_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_pages(
    pages: &[PageSummary],
    char_count: Option<usize>,
    saved_at: Option<DateTime<Utc>>,
) {
    for page in pages {
        let active = page.status == PageStatus::Active;
        let marker = if active { ACTIVE_MARKER } else { " " };
        let idx = format!("{}.", page.id);

        let name = truncate_to_width(&page.name, NAME_WIDTH);
        let padding = NAME_WIDTH.saturating_sub(name.width());
        let chars = format!("{} chars", page.chars);

        if active {
            println!(
                "{} {:>4} {}{} {}",
                marker.green(),
                idx.yellow(),
                name.bold(),
                " ".repeat(padding),
                chars.dimmed()
            );
        } else {
            println!(
                "{} {:>4} {}{} {}",
                marker,
                idx,
                name,
                " ".repeat(padding),
                chars.dimmed()
            );
        }
    }

    println!();
    let count = char_count.unwrap_or(0);
    let saved = match saved_at {
        Some(at) => format_time_ago(at),
        None => "never".to_string(),
    };
    println!(
        "{}",
        format!(
            "{} page(s), {} characters. Last saved: {}",
            pages.len(),
            count,
            saved
        )
        .dimmed()
    );
}

pub(super) fn print_page(name: &str, body: &str) {
    println!("{}", name.bold());
    println!("--------------------------------");
    println!("{}", body);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each.
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }
}
