//! Module generator: normalized fragments to one TypeScript module.
//!
//! Output is a pure function of the *set* of inputs: entries are sorted by
//! name (then fragment) before emission, so upstream ordering and fetch
//! completion order never show up in the artifact.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::normalize::COLOR_PLACEHOLDER;

/// Prefix of every generated function name.
pub const SYMBOL_PREFIX: &str = "Icon";

const HEADER: &str = "// This file is generated by iconsync. Do not edit by hand.\n";

/// One normalized icon ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSource {
    /// Normalized (PascalCase) name, without prefix.
    pub name: String,
    /// Template fragment containing the color placeholder.
    pub fragment: String,
}

impl IconSource {
    pub fn new(name: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fragment: fragment.into(),
        }
    }
}

/// A fully assembled module, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// `(symbol, declaration source)` in emission order.
    pub functions: Vec<(String, String)>,
    /// Name of the registry constant.
    pub registry_name: String,
}

impl GeneratedModule {
    /// Symbols in the registry, in order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|(symbol, _)| symbol.as_str())
    }

    /// Render the module text.
    pub fn render(&self) -> String {
        let mut out = String::from(HEADER);
        for (_, source) in &self.functions {
            out.push('\n');
            out.push_str(source);
        }
        let _ = write!(
            out,
            "\nexport const {}: Record<string, (color: string) => string> = {{\n",
            self.registry_name
        );
        for symbol in self.symbols() {
            let _ = writeln!(out, "  {},", symbol);
        }
        out.push_str("};\n");
        out
    }
}

/// Sort, deduplicate and assemble `icons` into the module for `collection`.
///
/// When several icons share a name the last one in sort order is kept; the
/// caller is expected to have reported the collision already.
pub fn build_module(mut icons: Vec<IconSource>, collection: &str) -> GeneratedModule {
    icons.sort_by(|a, b| (&a.name, &a.fragment).cmp(&(&b.name, &b.fragment)));

    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    for icon in icons {
        if let Some(previous) = by_name.insert(icon.name.clone(), icon.fragment) {
            tracing::debug!(name = %icon.name, dropped_len = previous.len(), "duplicate icon name, keeping last");
        }
    }

    let functions = by_name
        .into_iter()
        .map(|(name, fragment)| {
            let symbol = format!("{}{}", SYMBOL_PREFIX, name);
            let source = format!(
                "export const {} = (color: string) =>\n  `{}`;\n",
                symbol,
                escape_template(&fragment)
            );
            (symbol, source)
        })
        .collect();

    GeneratedModule {
        functions,
        registry_name: registry_name(collection),
    }
}

/// Render the module for `collection` from `icons`.
pub fn generate(icons: Vec<IconSource>, collection: &str) -> String {
    build_module(icons, collection).render()
}

/// `toggle` -> `toggleIconSet`, `Media-Controls` -> `mediaControlsIconSet`.
pub fn registry_name(collection: &str) -> String {
    let mut ident = String::new();
    for segment in collection
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
    {
        let lower = segment.to_lowercase();
        if ident.is_empty() {
            ident.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                ident.extend(first.to_uppercase());
                ident.push_str(chars.as_str());
            }
        }
    }
    format!("{}{}Set", ident, SYMBOL_PREFIX)
}

/// Escape a fragment for a template literal; only the color placeholder stays live.
fn escape_template(fragment: &str) -> String {
    fragment
        .split(COLOR_PLACEHOLDER)
        .map(|part| {
            part.replace('\\', "\\\\")
                .replace('`', "\\`")
                .replace("${", "\\${")
        })
        .collect::<Vec<_>>()
        .join(COLOR_PLACEHOLDER)
}
