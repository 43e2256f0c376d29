// src/util/text.rs
use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<.*?>").unwrap())
}

/// Remove HTML tags from card text.
///
/// Every shortest `<...>` run is dropped. Entities are left encoded and a `>`
/// inside an attribute value ends the tag early; card fronts are short enough
/// that this has never mattered.
///
/// # Examples
///
/// ```
/// use ankinotify::util::text::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<b>日本語</b> test"), "日本語 test");
/// ```
pub fn strip_html_tags(html: &str) -> String {
    tag_regex().replace_all(html, "").into_owned()
}
