//! Pure display derivations for the dashboard panels.

use chatlens_shared::{ResponseTime, ResponseTimes, SentimentLabel};

/// Text emphasis used for a sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    EmphasisPositive,
    EmphasisNegative,
    Muted,
}

impl ColorClass {
    /// ANSI SGR sequence used by the terminal renderer.
    pub fn ansi(self) -> &'static str {
        match self {
            Self::EmphasisPositive => "\x1b[32m",
            Self::EmphasisNegative => "\x1b[31m",
            Self::Muted => "\x1b[2m",
        }
    }
}

/// Badge style wrapping a sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

pub fn sentiment_color(label: &SentimentLabel) -> ColorClass {
    match label {
        SentimentLabel::Positive => ColorClass::EmphasisPositive,
        SentimentLabel::Negative => ColorClass::EmphasisNegative,
        _ => ColorClass::Muted,
    }
}

pub fn sentiment_badge(label: &SentimentLabel) -> BadgeVariant {
    match label {
        SentimentLabel::Positive => BadgeVariant::Default,
        SentimentLabel::Negative => BadgeVariant::Destructive,
        _ => BadgeVariant::Secondary,
    }
}

/// Response-time rows ordered by ascending average.
///
/// The sort is stable, so equal averages keep the mapping's order.
pub fn sorted_response_times(times: &ResponseTimes) -> Vec<(&str, &ResponseTime)> {
    let mut rows: Vec<(&str, &ResponseTime)> = times
        .iter()
        .map(|(author, stats)| (author.as_str(), stats))
        .collect();
    rows.sort_by(|(_, a), (_, b)| a.avg_response_minutes.total_cmp(&b.avg_response_minutes));
    rows
}

/// Confidence in `[0, 1]` as a whole percentage, e.g. `0.876` -> `"88%"`.
pub fn confidence_percent(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}
