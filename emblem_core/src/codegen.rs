//! Serialization of a [`Document`] into HTML with mustache expressions.
//!
//! No whitespace is inserted between nodes; all spacing in the output comes
//! from the text itself, continuation joins and trailing markers.

use crate::ast::Document;
use crate::ast::Node;
use crate::ast::Tag;
use crate::ast::TagKind;
use crate::joiner::join_literal;

/// Render a document as a single string.
pub fn generate(document: &Document) -> String {
	let mut output = String::new();

	for node in document.iter() {
		write_node(&mut output, node);
	}

	output
}

fn write_node(output: &mut String, node: &Node) {
	match node {
		Node::Tag(tag) => write_tag(output, tag),
		Node::Literal { segments } => output.push_str(&join_literal(segments)),
		Node::Passthrough { raw } => output.push_str(raw),
		Node::Text { value } => output.push_str(value),
		Node::TrailingMarker { value } => {
			output.push_str(value);
			output.push(' ');
		}
	}
}

fn write_children(output: &mut String, tag: &Tag) {
	for child in &tag.children {
		write_node(output, child);
	}
}

fn write_tag(output: &mut String, tag: &Tag) {
	match tag.kind {
		TagKind::Element => {
			output.push('<');
			output.push_str(&tag.name);
			for attribute in &tag.attributes {
				output.push(' ');
				output.push_str(&attribute.name);
				output.push_str("=\"");
				output.push_str(&attribute.value);
				output.push('"');
			}
			output.push('>');
			write_children(output, tag);
			output.push_str("</");
			output.push_str(&tag.name);
			output.push('>');
		}
		TagKind::Mustache if tag.children.is_empty() => {
			output.push_str("{{");
			write_mustache_head(output, tag);
			output.push_str("}}");
		}
		TagKind::Mustache => {
			output.push_str("{{#");
			write_mustache_head(output, tag);
			output.push_str("}}");
			write_children(output, tag);
			output.push_str("{{/");
			output.push_str(&tag.name);
			output.push_str("}}");
		}
	}
}

fn write_mustache_head(output: &mut String, tag: &Tag) {
	output.push_str(&tag.name);
	if !tag.arguments.is_empty() {
		output.push(' ');
		output.push_str(&tag.arguments);
	}
}
