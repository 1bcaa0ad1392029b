//! The indentation stack that turns a flat list of lines into a tree.

use miette::SourceSpan;

use crate::IndentationError;
use crate::builder::NodeId;
use crate::preprocess::Line;

/// An open indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentationFrame {
	/// Indentation width shared by every line at this level.
	pub width: usize,
	/// The node that lines at this level are attached to.
	pub parent: NodeId,
}

/// The stack of open indentation levels, innermost last. Widths strictly
/// increase from the bottom of the stack to the top.
#[derive(Debug, Default)]
pub struct IndentationResolver {
	frames: Vec<IndentationFrame>,
}

impl IndentationResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Resolve the node that `line` is attached to.
	///
	/// `anchor` is the node that lines indented deeper than the previous line
	/// attach to. `source` is the normalized source, used for diagnostics.
	pub fn resolve(
		&mut self,
		line: &Line,
		anchor: NodeId,
		source: &str,
	) -> Result<NodeId, IndentationError> {
		let Some(top) = self.frames.last().copied() else {
			// The first line sets the baseline, whatever its width.
			self.push(line, NodeId::ROOT);
			return Ok(NodeId::ROOT);
		};

		if line.indent > top.width {
			self.push(line, anchor);
			return Ok(anchor);
		}

		if line.indent == top.width {
			return Ok(top.parent);
		}

		let open_widths = self.widths();
		while self
			.frames
			.last()
			.is_some_and(|frame| frame.width > line.indent)
		{
			self.frames.pop();
		}

		match self.frames.last() {
			Some(frame) if frame.width == line.indent => {
				tracing::trace!(line = line.number, width = line.indent, "dedent");
				Ok(frame.parent)
			}
			_ => {
				tracing::debug!(
					line = line.number,
					width = line.indent,
					?open_widths,
					"half dedent"
				);
				let span = SourceSpan::from((line.offset, line.content.len()));
				Err(IndentationError::new(
					source,
					line.number,
					line.indent,
					open_widths,
					span,
				))
			}
		}
	}

	/// Widths of the open levels, outermost first.
	pub fn widths(&self) -> Vec<usize> {
		self.frames.iter().map(|frame| frame.width).collect()
	}

	fn push(&mut self, line: &Line, parent: NodeId) {
		tracing::trace!(line = line.number, width = line.indent, "indent");
		self.frames.push(IndentationFrame {
			width: line.indent,
			parent,
		});
	}
}
