//! Source preprocessing: line ending normalization and blank line removal.

use std::borrow::Cow;

/// A non-blank physical line of emblem source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	/// Count of leading spaces and tabs. Tabs count as a single column.
	pub indent: usize,
	/// The line with leading and trailing spaces and tabs removed. Other
	/// whitespace, such as a non-breaking space, is content.
	pub content: String,
	/// 1-indexed physical line number.
	pub number: usize,
	/// Byte offset of the first content character in the normalized source.
	pub offset: usize,
}

/// Normalize CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(content: &str) -> Cow<'_, str> {
	if content.contains('\r') {
		Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
	} else {
		Cow::Borrowed(content)
	}
}

/// Split normalized source into its non-blank lines.
///
/// Blank and whitespace-only lines are separators only and are never
/// materialized, so leading noise before the first real line does not affect
/// indentation. The first real line sets its own baseline.
pub fn preprocess(normalized: &str) -> Vec<Line> {
	let mut lines = Vec::new();
	let mut offset = 0;

	for (index, raw) in normalized.split('\n').enumerate() {
		let line_start = offset;
		offset += raw.len() + 1;

		let trimmed_start = raw.trim_start_matches(is_indent_char);
		let content = trimmed_start.trim_end_matches(is_indent_char);
		if content.is_empty() {
			continue;
		}

		let leading = raw.len() - trimmed_start.len();

		lines.push(Line {
			// Indentation characters are single bytes.
			indent: leading,
			content: content.to_string(),
			number: index + 1,
			offset: line_start + leading,
		});
	}

	lines
}

fn is_indent_char(c: char) -> bool {
	matches!(c, ' ' | '\t')
}
