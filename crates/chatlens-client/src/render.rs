//! Terminal rendering of the dashboard.
//!
//! Produces the same panels as the web page: controls, then Key Topics,
//! Sentiment by Author and Response Time Patterns, or the empty-state hint
//! when nothing has been analyzed yet.

use std::fmt::Write;

use chatlens_shared::constants::APP_NAME;

use crate::presentation::{
    confidence_percent, sentiment_badge, sentiment_color, sorted_response_times, BadgeVariant,
    ColorClass,
};
use crate::state::ViewState;

const ANSI_RESET: &str = "\x1b[0m";
const ANSI_BOLD: &str = "\x1b[1m";

const EMPTY_HINT: &str = "Load sample data and run analysis to see insights";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit ANSI colors.
    pub color: bool,
}

struct Cell {
    text: String,
    color: Option<ColorClass>,
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, color: None }
    }
}

/// Render the whole dashboard as text.
pub fn render(state: &ViewState, opts: RenderOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", emphasize(APP_NAME, opts));
    let _ = writeln!(
        out,
        "Analyze Slack-like messages for topics, sentiment, and response patterns"
    );
    out.push('\n');
    out.push_str(&controls(state));
    out.push('\n');

    if !state.has_insights {
        let _ = writeln!(out, "{EMPTY_HINT}");
        return out;
    }

    out.push_str(&topics_panel(state, opts));
    out.push('\n');
    out.push_str(&sentiment_panel(state, opts));
    out.push('\n');
    out.push_str(&response_time_panel(state, opts));
    out
}

fn controls(state: &ViewState) -> String {
    let load = button(
        if state.loading { "Loading..." } else { "Load Sample Data" },
        state.can_load_sample(),
    );
    let analyze = button(
        if state.analyzing { "Analyzing..." } else { "Run Analysis" },
        state.can_run_analysis(),
    );

    let mut line = format!("{load} {analyze}");
    if state.message_count > 0 {
        let _ = write!(line, "  {} messages loaded", state.message_count);
    }
    line.push('\n');
    line
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("[{label}] (disabled)")
    }
}

fn topics_panel(state: &ViewState, opts: RenderOptions) -> String {
    let mut out = heading("Key Topics", opts);
    for topic in &state.topics {
        let _ = writeln!(out, "{}  ({} msgs)", emphasize(&topic.name, opts), topic.message_count);
        if !topic.description.is_empty() {
            let _ = writeln!(out, "  {}", topic.description);
        }
        if !topic.channels.is_empty() {
            let badges: Vec<String> = topic
                .channels
                .iter()
                .map(|ch| badge(ch, BadgeVariant::Outline))
                .collect();
            let _ = writeln!(out, "  {}", badges.join(" "));
        }
    }
    out
}

fn sentiment_panel(state: &ViewState, opts: RenderOptions) -> String {
    let rows = state
        .sentiments
        .iter()
        .map(|s| {
            vec![
                Cell::from(s.author.clone()),
                Cell {
                    text: badge(s.overall_sentiment.as_str(), sentiment_badge(&s.overall_sentiment)),
                    color: Some(sentiment_color(&s.overall_sentiment)),
                },
                Cell::from(confidence_percent(s.confidence)),
                Cell::from(s.summary.clone()),
            ]
        })
        .collect();

    let mut out = heading("Sentiment by Author", opts);
    out.push_str(&table(&["Author", "Sentiment", "Confidence", "Summary"], rows, opts));
    out
}

fn response_time_panel(state: &ViewState, opts: RenderOptions) -> String {
    let rows = sorted_response_times(&state.response_times)
        .into_iter()
        .map(|(author, rt)| {
            vec![
                Cell::from(author.to_string()),
                Cell::from(rt.avg_response_minutes.to_string()),
                Cell::from(rt.min_response_minutes.to_string()),
                Cell::from(rt.max_response_minutes.to_string()),
                Cell::from(rt.total_responses.to_string()),
            ]
        })
        .collect();

    let mut out = heading("Response Time Patterns", opts);
    out.push_str(&table(
        &["Author", "Avg (min)", "Min (min)", "Max (min)", "Responses"],
        rows,
        opts,
    ));
    out
}

fn heading(title: &str, opts: RenderOptions) -> String {
    let title = emphasize(title, opts);
    format!("== {title} ==\n")
}

/// Badges render as bracketed labels; destructive ones are marked with `!`.
fn badge(label: &str, variant: BadgeVariant) -> String {
    match variant {
        BadgeVariant::Destructive => format!("[!{label}]"),
        _ => format!("[{label}]"),
    }
}

fn emphasize(text: &str, opts: RenderOptions) -> String {
    if opts.color {
        format!("{ANSI_BOLD}{text}{ANSI_RESET}")
    } else {
        text.to_string()
    }
}

fn table(headers: &[&str], rows: Vec<Vec<Cell>>, opts: RenderOptions) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.text.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(h, *w))
        .collect();
    let header = header.join("  ");
    let header = header.trim_end();
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| {
                let padded = pad(&cell.text, *w);
                match cell.color {
                    Some(color) if opts.color => format!("{}{padded}{ANSI_RESET}", color.ansi()),
                    _ => padded,
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
