// ABOUTME: Numbered-list detection and normalization for chat replies
// ABOUTME: Best-effort text transforms; pattern-based, not a parser
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! Response text formatting.
//!
//! Two transforms share the `<digits>.` marker convention:
//!
//! - [`ensure_numbered_format`] runs server-side after a successful model
//!   call and re-segments long unstructured prose into a numbered list.
//! - [`parse_numbered_list`] is the presentation-side split used to render
//!   structured bullet points from reply text.
//!
//! Both are purely textual. Decimal numbers, prices, or abbreviations can
//! trigger a mis-split; callers must treat the output as best-effort
//! presentation, never as parsed structure.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Replies at or below this length are returned untouched
const RESEGMENT_MIN_LEN: usize = 100;

/// Lazily compiled `<digits>.` marker pattern
fn list_marker_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.").ok()).as_ref()
}

/// A reply decomposed into introductory prose and ordered list items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    /// Introductory prose before the first marker, if any
    pub intro: Option<String>,
    /// List items in order; render with a sequential index
    pub items: Vec<String>,
}

/// Detect and split a numbered list out of reply text
///
/// Detection looks for the literal markers `1.` or `2.`. When present, the
/// text is split on every `<digits>.` marker: the first non-empty segment is
/// the intro, each following segment one item. Returns `None` when no marker
/// is present — render the text verbatim.
#[must_use]
pub fn parse_numbered_list(text: &str) -> Option<FormattedMessage> {
    if !text.contains("1.") && !text.contains("2.") {
        return None;
    }

    let pattern = list_marker_pattern()?;

    let mut segments = pattern
        .split(text)
        .map(str::trim)
        .filter(|segment| !segment.is_empty());

    let intro = segments.next().map(ToOwned::to_owned);
    let items: Vec<String> = segments.map(ToOwned::to_owned).collect();

    Some(FormattedMessage { intro, items })
}

/// Re-segment a long unstructured reply into a numbered list
///
/// Applies only when the text has no list markup yet (no `1.`, no `•`) and
/// exceeds the length threshold. Splits on sentence boundaries (period plus
/// space); the first sentence becomes an introductory line and the rest are
/// numbered, each given a trailing period if it lost one in the split.
/// Anything else is returned unchanged.
#[must_use]
pub fn ensure_numbered_format(text: &str) -> Cow<'_, str> {
    if text.contains("1.") || text.contains('•') || text.len() <= RESEGMENT_MIN_LEN {
        return Cow::Borrowed(text);
    }

    let sentences: Vec<&str> = text
        .split(". ")
        .filter(|sentence| !sentence.trim().is_empty())
        .collect();
    if sentences.len() <= 2 {
        return Cow::Borrowed(text);
    }

    let intro = format!("{}.", sentences[0]);
    let points = sentences[1..]
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let point = point.trim();
            let number = index + 1;
            if point.ends_with('.') {
                format!("{number}. {point}")
            } else {
                format!("{number}. {point}.")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    Cow::Owned(format!("{intro}\n\n{points}"))
}
