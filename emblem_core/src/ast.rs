use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

/// The synthetic root of a compiled template. It owns the top-level nodes in
/// source order and dereferences to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
pub struct Document {
	#[deref]
	#[deref_mut]
	pub children: Vec<Node>,
}

/// A node of the template tree. Every node except the document root has
/// exactly one owning parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[allow(variant_size_differences)]
pub enum Node {
	/// An HTML element or a mustache helper.
	Tag(Tag),
	/// Text introduced by `|`. Each segment is one physical line.
	Literal { segments: Vec<String> },
	/// A line starting with `<`, copied verbatim.
	Passthrough { raw: String },
	/// Inline content.
	Text { value: String },
	/// Text introduced by `'` that always ends with a space.
	TrailingMarker { value: String },
}

impl Node {
	/// Whether lines nested under this node continue its text instead of
	/// creating child nodes.
	pub fn is_text_bearing(&self) -> bool {
		!matches!(self, Node::Tag(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	pub name: String,
	pub kind: TagKind,
	/// Attributes in output order. Always empty for mustache tags.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<Attribute>,
	/// The argument expression of a mustache tag, e.g. `foo` in `each foo`.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub arguments: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<Node>,
}

impl Tag {
	pub fn element(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: TagKind::Element,
			attributes: vec![],
			arguments: String::new(),
			children: vec![],
		}
	}

	pub fn mustache(name: impl Into<String>, arguments: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			kind: TagKind::Mustache,
			attributes: vec![],
			arguments: arguments.into(),
			children: vec![],
		}
	}

	/// Look up an attribute value by name.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|attribute| attribute.name == name)
			.map(|attribute| attribute.value.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum TagKind {
	/// Compiles to `<name …>…</name>`.
	Element,
	/// Compiles to `{{#name args}}…{{/name}}`, or `{{name args}}` when the
	/// tag has no children.
	Mustache,
}

impl std::fmt::Display for TagKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Element => write!(f, "element"),
			Self::Mustache => write!(f, "mustache"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
	pub name: String,
	pub value: String,
}

impl Attribute {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}
