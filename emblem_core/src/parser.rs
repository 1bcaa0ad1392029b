use crate::ast::Document;
use crate::ast::Node;
use crate::builder::DocumentBuilder;
use crate::builder::NodeId;
use crate::classify::LineKind;
use crate::classify::classify;
use crate::config::CompileOptions;
use crate::error::EmblemResult;
use crate::html::ElementSet;
use crate::joiner::continue_text;
use crate::preprocess::Line;
use crate::preprocess::normalize_line_endings;
use crate::preprocess::preprocess;
use crate::resolver::IndentationResolver;

/// How the next line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// The line is classified and creates a new node.
	Structure,
	/// The line continues the text of its parent.
	Text,
}

/// State shared by every line of a single parse.
#[derive(Debug)]
pub struct ParseContext<'a> {
	pub options: &'a CompileOptions,
	pub elements: ElementSet,
	pub mode: Mode,
}

impl<'a> ParseContext<'a> {
	pub fn new(options: &'a CompileOptions) -> Self {
		Self {
			options,
			elements: options.element_set(),
			mode: Mode::Structure,
		}
	}
}

/// Parse emblem source into a [`Document`].
///
/// Fails with an [`IndentationError`](crate::IndentationError) on the first
/// dedent that does not line up with an open indentation level.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse(source: &str, options: &CompileOptions) -> EmblemResult<Document> {
	let normalized = normalize_line_endings(source);
	let lines = preprocess(&normalized);
	tracing::debug!(lines = lines.len(), "preprocessed source");

	let mut context = ParseContext::new(options);
	let mut builder = DocumentBuilder::new();
	let mut resolver = IndentationResolver::new();
	let mut anchor = NodeId::ROOT;

	for line in &lines {
		let parent = resolver.resolve(line, anchor, &normalized)?;
		anchor = place_line(&mut context, &mut builder, parent, line);
	}

	Ok(builder.finish())
}

/// Attach `line` under `parent` and return the node that deeper lines should
/// attach to.
fn place_line(
	context: &mut ParseContext<'_>,
	builder: &mut DocumentBuilder,
	parent: NodeId,
	line: &Line,
) -> NodeId {
	context.mode = match builder.get(parent) {
		Some(node) if node.is_text_bearing() => Mode::Text,
		_ => Mode::Structure,
	};

	if context.mode == Mode::Text {
		if let Some(node) = builder.get_mut(parent) {
			continue_text(node, &line.content, context.options.line_join);
		}

		return parent;
	}

	match classify(&line.content, &context.elements) {
		LineKind::Literal(text) => {
			builder.push(
				parent,
				Node::Literal {
					segments: vec![text],
				},
			)
		}
		LineKind::TrailingMarker(value) => builder.push(parent, Node::TrailingMarker { value }),
		LineKind::Passthrough(raw) => builder.push(parent, Node::Passthrough { raw }),
		LineKind::Text(value) => builder.push(parent, Node::Text { value }),
		LineKind::Mustache(tag) => builder.push(parent, Node::Tag(tag)),
		LineKind::Element { tag, text } => {
			let id = builder.push(parent, Node::Tag(tag));

			// Inline text becomes the anchor so deeper lines wrap onto it.
			match text {
				Some(value) => builder.push(id, Node::Text { value }),
				None => id,
			}
		}
	}
}
