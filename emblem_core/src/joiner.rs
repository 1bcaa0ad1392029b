//! Whitespace rules for text that spans several source lines.
//!
//! Sibling nodes are never separated: adjacent `|` lines, raw markup lines
//! and text concatenate directly in the output. Only continuation lines,
//! nested under a text-bearing node, are joined with a separator.

use serde::Deserialize;
use serde::Serialize;

use crate::ast::Node;

/// The separator placed between a line of wrapped text and its continuation.
///
/// ```toml
/// [compile]
/// line_join = "newline"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum LineJoin {
	/// Collapse the line break into a single space.
	#[default]
	Space,
	/// Keep the line break.
	Newline,
}

impl LineJoin {
	pub fn separator(self) -> &'static str {
		match self {
			Self::Space => " ",
			Self::Newline => "\n",
		}
	}
}

impl std::fmt::Display for LineJoin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Space => write!(f, "space"),
			Self::Newline => write!(f, "newline"),
		}
	}
}

impl std::str::FromStr for LineJoin {
	type Err = String;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value {
			"space" => Ok(Self::Space),
			"newline" => Ok(Self::Newline),
			other => Err(format!("unknown line join policy `{other}`")),
		}
	}
}

/// The separator between the segments of a `|` literal. Literals never gain
/// a newline, whatever the configured policy.
pub const LITERAL_SEPARATOR: &str = " ";

/// Append a continuation line to a text-bearing node.
///
/// Returns `false` when the node does not carry text.
pub fn continue_text(node: &mut Node, line: &str, policy: LineJoin) -> bool {
	match node {
		Node::Literal { segments } => {
			segments.push(line.to_string());
		}
		Node::Passthrough { raw: value }
		| Node::Text { value }
		| Node::TrailingMarker { value } => {
			join_into(value, line, policy.separator());
		}
		Node::Tag(_) => return false,
	}

	true
}

/// Join the segments of a literal for output.
pub fn join_literal(segments: &[String]) -> String {
	segments.join(LITERAL_SEPARATOR)
}

fn join_into(value: &mut String, line: &str, separator: &str) {
	if !value.is_empty() {
		value.push_str(separator);
	}
	value.push_str(line);
}
