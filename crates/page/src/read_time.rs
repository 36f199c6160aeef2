// ABOUTME: Read-time estimation for blog posts from the text of .post-content.
// ABOUTME: Counts whitespace-separated words and rounds minutes up, never below one.

use std::fmt;

use dom_query::Document;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::dom;

pub const POST_CONTENT: &str = ".post-content";
const DISPLAY: &str = "#read-time";

/// Average adult reading speed.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadTime {
    pub words: usize,
    pub minutes: u32,
}

impl fmt::Display for ReadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min read", self.minutes)
    }
}

/// Estimates the read time of plain text.
pub fn estimate_text(text: &str, words_per_minute: u32) -> ReadTime {
    let words = text.split_whitespace().count();
    let wpm = words_per_minute.max(1) as usize;
    let minutes = words.div_ceil(wpm).max(1);
    ReadTime {
        words,
        minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}

/// Estimates the read time of the post in an HTML page, if it has one.
pub fn estimate_html(html: &str, words_per_minute: u32) -> Option<ReadTime> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse(POST_CONTENT).ok()?;
    let post = doc.select(&selector).next()?;
    let text = post.text().collect::<Vec<_>>().join(" ");
    Some(estimate_text(&text, words_per_minute))
}

/// Writes the estimate into `#read-time`. Does nothing unless the page has both the post and the display.
pub fn apply_read_time(doc: &Document, words_per_minute: u32) -> Option<ReadTime> {
    let display = dom::find(doc, DISPLAY)?;
    let post = dom::find(doc, POST_CONTENT)?.first();
    let estimate = estimate_text(&dom::spaced_text(&post), words_per_minute);
    dom::set_text(&display, &estimate.to_string());
    Some(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(estimate_text(&text, 200), ReadTime { words: 201, minutes: 2 });
        let text = "word ".repeat(200);
        assert_eq!(estimate_text(&text, 200).minutes, 1);
    }

    #[test]
    fn test_empty_post_reads_as_one_minute() {
        assert_eq!(estimate_text("   ", 200), ReadTime { words: 0, minutes: 1 });
    }

    #[test]
    fn test_zero_wpm_does_not_divide_by_zero() {
        assert_eq!(estimate_text("a b c", 0).minutes, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(ReadTime { words: 900, minutes: 5 }.to_string(), "5 min read");
    }

    #[test]
    fn test_estimate_html_counts_across_tags() {
        let html = r#"<html><body><h1>Title here</h1>
            <div class="post-content"><p>one two</p><p>three<br>four</p></div></body></html>"#;
        let got = estimate_html(html, 200).unwrap();
        assert_eq!(got.words, 4);
    }

    #[test]
    fn test_apply_needs_display() {
        let doc = Document::from(r#"<html><body><div class="post-content">hi</div></body></html>"#);
        assert_eq!(apply_read_time(&doc, 200), None);

        let doc = Document::from(
            r#"<html><body><span id="read-time"></span><div class="post-content">hi</div></body></html>"#,
        );
        assert_eq!(apply_read_time(&doc, 200), Some(ReadTime { words: 1, minutes: 1 }));
        assert_eq!(dom::text_of(&dom::find(&doc, DISPLAY).unwrap()), "1 min read");
    }

    #[test]
    fn test_apply_counts_like_estimate_html() {
        let html = r#"<html><body><span id="read-time"></span>
            <div class="post-content"><p>one two</p><p>three<br>four</p></div>
            <div class="post-content"><p>ignored second post</p></div></body></html>"#;
        let doc = Document::from(html);
        let applied = apply_read_time(&doc, 200).unwrap();
        assert_eq!(applied.words, 4);
        assert_eq!(Some(applied), estimate_html(html, 200));
    }
}
