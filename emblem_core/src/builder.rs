use crate::ast::Document;
use crate::ast::Node;

/// Index of a node in a [`DocumentBuilder`]. Indices are only meaningful for
/// the builder that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
	/// The synthetic document root.
	pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug)]
struct Entry {
	/// `None` for the root.
	node: Option<Node>,
	children: Vec<NodeId>,
}

/// Arena used while parsing. The indentation stack refers to nodes by
/// [`NodeId`] and never owns them; ownership is only established when the
/// arena is frozen into a [`Document`].
#[derive(Debug)]
pub struct DocumentBuilder {
	entries: Vec<Entry>,
}

impl Default for DocumentBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl DocumentBuilder {
	pub fn new() -> Self {
		Self {
			entries: vec![Entry {
				node: None,
				children: vec![],
			}],
		}
	}

	/// Append `node` as the last child of `parent`.
	pub fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
		let id = NodeId(self.entries.len());
		self.entries.push(Entry {
			node: Some(node),
			children: vec![],
		});
		self.entries[parent.0].children.push(id);
		id
	}

	pub fn get(&self, id: NodeId) -> Option<&Node> {
		self.entries.get(id.0).and_then(|entry| entry.node.as_ref())
	}

	pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.entries
			.get_mut(id.0)
			.and_then(|entry| entry.node.as_mut())
	}

	/// Freeze the arena into an owned tree.
	pub fn finish(self) -> Document {
		let mut nodes = Vec::with_capacity(self.entries.len());
		let mut children = Vec::with_capacity(self.entries.len());
		for entry in self.entries {
			nodes.push(entry.node);
			children.push(entry.children);
		}

		let top_level = std::mem::take(&mut children[NodeId::ROOT.0]);

		Document {
			children: top_level
				.into_iter()
				.filter_map(|id| assemble(id, &mut nodes, &mut children))
				.collect(),
		}
	}
}

fn assemble(id: NodeId, nodes: &mut [Option<Node>], children: &mut [Vec<NodeId>]) -> Option<Node> {
	let mut node = nodes[id.0].take()?;
	let child_ids = std::mem::take(&mut children[id.0]);

	if let Node::Tag(tag) = &mut node {
		tag.children = child_ids
			.into_iter()
			.filter_map(|child| assemble(child, nodes, children))
			.collect();
	}

	Some(node)
}
