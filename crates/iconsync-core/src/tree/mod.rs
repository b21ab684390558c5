//! Asset tree: the nested container/leaf structure that locates icon
//! definitions inside a design document, and the extractor that flattens it.

mod extract;
mod node;

pub use extract::{extract, extract_icons, ExtractedIcon, IconMap};
pub use node::{AssetNode, NodeKind};
