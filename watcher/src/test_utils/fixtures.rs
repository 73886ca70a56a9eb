//! Test fixtures
//!
//! Factory functions for feed entries and thread pages in each markup shape
//! the extractor understands.

use crate::domain::entities::FeedEntry;

/// Create a feed entry for thread `n`
pub fn test_entry(n: u32) -> FeedEntry {
    FeedEntry::new(
        format!("https://forum.example/thread/{}", n),
        None,
        Some(format!("Thread number {}", n)),
    )
}

/// Thread page in the current forum template: one table row per post, the
/// author in the left panel and the body in `td.content .message`
pub fn structured_thread_html(posts: &[(&str, &str)]) -> String {
    let rows: String = posts
        .iter()
        .map(|(author, content)| {
            format!(
                r#"<tr class="post">
  <td class="left-panel"><div class="mini-profile"><a class="user-link" href="/user/{author}">{author}</a></div></td>
  <td class="content"><article><div class="message">{content}</div></article></td>
</tr>"#
            )
        })
        .collect();

    format!(
        r#"<html><head><title>Thread</title></head><body>
<table class="posts">{rows}</table>
</body></html>"#
    )
}

/// Thread page in the old table layout: "Post by X on <date>" header, a
/// "Back to Top" link, then the body, all in one cell
pub fn legacy_thread_html(posts: &[(&str, &str)]) -> String {
    let rows: String = posts
        .iter()
        .map(|(author, content)| {
            format!(
                r##"<tr><td class="windowbg">
  <span>Post by <a href="/profile/{author}">{author}</a> on Jan 1, 2024, 10:00am</span>
  <a href="#top">Back to Top</a>
  <div>{content}</div>
</td></tr>"##
            )
        })
        .collect();

    format!(r#"<html><body><table>{rows}</table></body></html>"#)
}

/// Page with message bodies but none of the table structure
pub fn bare_body_thread_html(contents: &[&str]) -> String {
    let bodies: String = contents
        .iter()
        .map(|content| format!(r#"<section><div class="message">{content}</div></section>"#))
        .collect();

    format!(r#"<html><body>{bodies}</body></html>"#)
}
