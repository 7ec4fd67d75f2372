//! Label text normalization.
//!
//! yFiles stores rich-text labels as HTML fragments, often wrapped in CDATA
//! and sprinkled with entities and zero-width characters. [`clean_label_text`]
//! reduces such a fragment to the plain text a reader sees.

use std::sync::LazyLock;

use regex::Regex;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// U+FEFF, left behind by some rich-text editors.
const ZERO_WIDTH_NO_BREAK_SPACE: char = '\u{feff}';

/// Opening, closing and self-closing paragraph, bold, italic and list tags.
static FORMATTING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|b|strong|i|em|ul|ol|li)(?:\s[^<>]*)?/?>")
        .expect("formatting tag pattern is valid")
});

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br(?:\s[^<>]*)?/?>").expect("line break pattern is valid"));

/// Normalize raw label text to plain text.
///
/// In order:
/// 1. strips CDATA markers,
/// 2. decodes HTML character references (named, decimal and hex),
/// 3. drops U+FEFF,
/// 4. removes paragraph, bold, italic and list tag markers while keeping the
///    text between them, and turns `<br>` into whitespace,
/// 5. collapses whitespace runs to a single space and trims both ends.
///
/// Steps 1 to 4 repeat until nothing changes, so markers split by other
/// markers (`<<b>p>`) and references escaped more than once (`&amp;lt;`)
/// do not survive. Malformed fragments are left as they are.
///
/// Applying the function to its own output changes nothing.
///
/// # Examples
///
/// ```
/// # use graphml_slim::text::clean_label_text;
/// let raw = "<p>Hello</p> <strong>World</strong> &amp;";
/// assert_eq!(clean_label_text(Some(raw)), "Hello World &");
/// assert_eq!(clean_label_text(None), "");
/// ```
pub fn clean_label_text(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return String::new();
    };

    let mut text = raw.to_string();
    loop {
        let stripped = strip_cdata_markers(&text);
        let stripped: String = htmlize::unescape(stripped.as_str())
            .chars()
            .filter(|c| *c != ZERO_WIDTH_NO_BREAK_SPACE)
            .collect();
        let stripped = LINE_BREAK.replace_all(&stripped, " ");
        let stripped = FORMATTING_TAG.replace_all(&stripped, "").into_owned();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn strip_cdata_markers(text: &str) -> String {
    text.replace(CDATA_OPEN, "").replace(CDATA_CLOSE, "")
}
