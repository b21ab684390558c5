//! Document tree nodes as the extractor sees them.

/// Role of a node for icon extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Holds further nodes; traversed.
    Container,
    /// One concrete icon.
    LeafInstance,
    /// Anything else; skipped along with its subtree.
    Other,
}

impl NodeKind {
    /// Map the design API's node `type` string to a kind.
    pub fn from_api_type(node_type: &str) -> Self {
        match node_type {
            "FRAME" => NodeKind::Container,
            "INSTANCE" => NodeKind::LeafInstance,
            _ => NodeKind::Other,
        }
    }
}

/// A node in the source document tree. `children` is only populated for containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    pub fn container(
        id: impl Into<String>,
        name: impl Into<String>,
        children: Vec<AssetNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Container,
            children,
        }
    }

    pub fn leaf(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::LeafInstance,
            children: Vec::new(),
        }
    }

    pub fn other(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: NodeKind::Other,
            children: Vec::new(),
        }
    }

    /// Number of leaf-instance nodes reachable through containers below this node.
    pub fn leaf_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child.kind {
                NodeKind::LeafInstance => 1,
                NodeKind::Container => child.leaf_count(),
                NodeKind::Other => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_types_map_to_kinds() {
        assert_eq!(NodeKind::from_api_type("FRAME"), NodeKind::Container);
        assert_eq!(NodeKind::from_api_type("INSTANCE"), NodeKind::LeafInstance);
        assert_eq!(NodeKind::from_api_type("COMPONENT"), NodeKind::Other);
        assert_eq!(NodeKind::from_api_type("TEXT"), NodeKind::Other);
    }

    #[test]
    fn leaf_count_skips_other_subtrees() {
        let mut other = AssetNode::other("9:9", "notes");
        other.children.push(AssetNode::leaf("9:10", "hidden"));
        let root = AssetNode::container(
            "1:1",
            "root",
            vec![
                AssetNode::leaf("1:2", "a"),
                AssetNode::container("1:3", "row", vec![AssetNode::leaf("1:4", "b")]),
                other,
            ],
        );
        assert_eq!(root.leaf_count(), 2);
    }
}
