//! Flatten an asset tree into `identifier -> normalized name`.

use std::collections::BTreeMap;

use crate::error::PipelineError;
use crate::naming::normalize_name;

use super::node::{AssetNode, NodeKind};

/// Asset identifier to normalized display name.
pub type IconMap = BTreeMap<String, String>;

/// One icon found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIcon {
    pub id: String,
    pub name: String,
}

/// Walks every child of `root` and records each leaf-instance.
///
/// Containers are descended into; `Other` nodes are skipped with their subtree.
/// On identifier collision the container's entry wins over a direct leaf. Fails with
/// `EmptyResult` when nothing was found.
pub fn extract(root: &AssetNode) -> Result<IconMap, PipelineError> {
    let mut icons = IconMap::new();
    collect(root, &mut icons);
    if icons.is_empty() {
        return Err(PipelineError::EmptyResult {
            root: root.id.clone(),
        });
    }
    Ok(icons)
}

/// Like `extract`, returned as a list ordered by identifier.
pub fn extract_icons(root: &AssetNode) -> Result<Vec<ExtractedIcon>, PipelineError> {
    Ok(extract(root)?
        .into_iter()
        .map(|(id, name)| ExtractedIcon { id, name })
        .collect())
}

/// Records a node's own leaf-instances first, then merges its containers, so a
/// duplicate id nested in a container overrides a direct child.
fn collect(node: &AssetNode, icons: &mut IconMap) {
    for child in node.children.iter().filter(|c| c.kind == NodeKind::LeafInstance) {
        icons.insert(child.id.clone(), normalize_name(&child.name));
    }
    for child in node.children.iter().filter(|c| c.kind == NodeKind::Container) {
        collect(child, icons);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn two_level_tree() {
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![AssetNode::container(
                "0:2",
                "arrows",
                vec![
                    AssetNode::leaf("0:3", "arrow-left"),
                    AssetNode::leaf("0:4", "arrow_right"),
                ],
            )],
        );
        let icons = extract(&root).unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons["0:3"], "ArrowLeft");
        assert_eq!(icons["0:4"], "ArrowRight");
    }

    #[test]
    fn other_nodes_and_their_children_skipped() {
        let mut group = AssetNode::other("0:5", "group");
        group.children.push(AssetNode::leaf("0:6", "inside-group"));
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![group, AssetNode::leaf("0:7", "home")],
        );
        let icons = extract(&root).unwrap();
        assert_eq!(icons.len(), 1);
        assert!(icons.contains_key("0:7"));
    }

    #[test]
    fn root_itself_is_not_an_icon() {
        let root = AssetNode::leaf("0:1", "lonely");
        match extract(&root) {
            Err(PipelineError::EmptyResult { root }) => assert_eq!(root, "0:1"),
            other => panic!("expected EmptyResult, got {:?}", other),
        }
    }

    #[test]
    fn no_leaves_is_empty_result() {
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![
                AssetNode::container("0:2", "empty", vec![]),
                AssetNode::other("0:3", "label"),
            ],
        );
        assert!(matches!(
            extract(&root),
            Err(PipelineError::EmptyResult { .. })
        ));
    }

    #[test]
    fn nested_duplicate_overrides_direct_leaf() {
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![
                AssetNode::leaf("0:2", "old-name"),
                AssetNode::container("0:3", "row", vec![AssetNode::leaf("0:2", "new-name")]),
            ],
        );
        let icons = extract(&root).unwrap();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons["0:2"], "NewName");
    }

    #[test]
    fn nested_duplicate_wins_regardless_of_document_order() {
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![
                AssetNode::container("0:3", "row", vec![AssetNode::leaf("0:2", "nested")]),
                AssetNode::leaf("0:2", "flat"),
            ],
        );
        let icons = extract(&root).unwrap();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons["0:2"], "Nested");
    }

    #[test]
    fn extract_icons_is_ordered_by_id() {
        let root = AssetNode::container(
            "0:1",
            "icons",
            vec![AssetNode::leaf("0:9", "b"), AssetNode::leaf("0:2", "a")],
        );
        let icons = extract_icons(&root).unwrap();
        let ids: Vec<&str> = icons.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["0:2", "0:9"]);
    }

    /// Random trees with unique ids; `Other` subtrees may hide leaves.
    fn arb_children(depth: u32) -> BoxedStrategy<Vec<(u8, Vec<AssetNode>)>> {
        let leafish = (0u8..3, Just(Vec::new()));
        if depth == 0 {
            return prop::collection::vec(leafish, 0..6).boxed();
        }
        let nested = (Just(3u8), arb_children(depth - 1).prop_map(build_children));
        prop::collection::vec(prop_oneof![3 => leafish, 1 => nested], 0..6).boxed()
    }

    fn build_children(shapes: Vec<(u8, Vec<AssetNode>)>) -> Vec<AssetNode> {
        shapes
            .into_iter()
            .map(|(tag, children)| match tag {
                0 | 1 => AssetNode::leaf("", "icon-name"),
                2 => {
                    let mut n = AssetNode::other("", "text");
                    n.children.push(AssetNode::leaf("", "hidden"));
                    n
                }
                _ => AssetNode::container("", "frame", children),
            })
            .collect()
    }

    fn assign_ids(node: &mut AssetNode, next: &mut usize) {
        node.id = format!("1:{}", *next);
        *next += 1;
        for child in &mut node.children {
            assign_ids(child, next);
        }
    }

    proptest! {
        #[test]
        fn every_leaf_visited_once(shapes in arb_children(4)) {
            let mut root = AssetNode::container("", "root", build_children(shapes));
            let mut next = 0;
            assign_ids(&mut root, &mut next);
            let expected = root.leaf_count();
            match extract(&root) {
                Ok(icons) => prop_assert_eq!(icons.len(), expected),
                Err(PipelineError::EmptyResult { .. }) => prop_assert_eq!(expected, 0),
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
