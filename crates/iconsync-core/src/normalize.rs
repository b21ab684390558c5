//! Content normalizer: raw SVG markup to a color-parameterized fragment.
//!
//! Strips the wrapping `<svg ...>`/`</svg>` tags, replaces every `fill`
//! attribute value with `COLOR_PLACEHOLDER`, and removes line breaks. Input
//! without a wrapping tag is not an error; it is returned unchanged.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Substituted with the caller's color by the generated render functions.
pub const COLOR_PLACEHOLDER: &str = "${color}";

static SVG_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?svg\b[^>]*>").expect("valid svg tag regex"));

static FILL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<lead>\s)fill\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid fill regex")
});

/// Rewrite `raw` into a single-line template fragment.
pub fn normalize(raw: &str) -> String {
    if !has_wrapper(raw) {
        return raw.to_string();
    }
    let inner = SVG_TAG.replace_all(raw, "");
    let filled = FILL_ATTR.replace_all(&inner, |caps: &Captures| {
        format!("{}fill=\"{}\"", &caps["lead"], COLOR_PLACEHOLDER)
    });
    filled.replace(['\r', '\n'], "")
}

/// True if `raw` has a wrapping tag to strip. Lets callers flag malformed assets.
pub fn has_wrapper(raw: &str) -> bool {
    SVG_TAG.is_match(raw)
}
