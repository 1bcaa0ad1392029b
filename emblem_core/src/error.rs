use miette::Diagnostic;
use miette::NamedSource;
use miette::SourceSpan;
use thiserror::Error;

/// The default name given to sources that were not read from a file.
pub const ANONYMOUS_SOURCE: &str = "<input>";

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EmblemError {
	#[error(transparent)]
	#[diagnostic(code(emblem::io_error))]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	#[diagnostic(transparent)]
	Indentation(#[from] IndentationError),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(emblem::config_parse),
		help("check that emblem.toml is valid TOML with [compile], [output] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(emblem::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

/// A dedent whose width matches no open indentation level ("half dedent").
///
/// This is the only structural error the compiler produces. It aborts the
/// whole compilation; no partial output is ever returned.
#[derive(Debug, Diagnostic, Error)]
#[error("inconsistent dedent on line {line}: column {width} does not match any open indentation level")]
#[diagnostic(code(emblem::half_dedent))]
pub struct IndentationError {
	/// 1-indexed line number of the offending line.
	pub line: usize,
	/// Indentation width of the offending line.
	pub width: usize,
	/// Widths of the indentation levels that were open when the line was
	/// read, outermost first.
	pub open_widths: Vec<usize>,
	#[help]
	advice: String,
	text: String,
	#[source_code]
	source_code: NamedSource<String>,
	#[label("dedent does not line up with an enclosing block")]
	span: SourceSpan,
}

impl IndentationError {
	pub(crate) fn new(
		source: &str,
		line: usize,
		width: usize,
		open_widths: Vec<usize>,
		span: SourceSpan,
	) -> Self {
		let columns = open_widths
			.iter()
			.map(ToString::to_string)
			.collect::<Vec<_>>()
			.join(", ");
		let advice = format!("indent this line to one of the open columns: {columns}");

		Self {
			line,
			width,
			open_widths,
			advice,
			text: source.to_string(),
			source_code: NamedSource::new(ANONYMOUS_SOURCE, source.to_string()),
			span,
		}
	}

	/// The line number of the dedent that failed.
	pub fn line(&self) -> usize {
		self.line
	}

	/// Attach a file name to the source shown in rendered diagnostics.
	#[must_use]
	pub fn with_file_name(mut self, name: impl AsRef<str>) -> Self {
		self.source_code = NamedSource::new(name, self.text.clone());
		self
	}
}

pub type EmblemResult<T> = Result<T, EmblemError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
