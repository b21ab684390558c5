//! Display-name normalization for generated symbols.

/// Normalizes a raw asset display name to PascalCase.
///
/// - Splits on `-` and `_`
/// - Uppercases the first character of each segment, keeps the rest as is
/// - Drops characters that cannot appear in an identifier (spaces, `/`, `.`, ...)
///
/// The result may start with a digit; generated symbols are always prefixed.
pub fn normalize_name(raw: &str) -> String {
    raw.split(['-', '_']).map(capitalize).collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars().filter(|c| c.is_alphanumeric());
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
