//! `emblem_core` compiles emblem templates, a terse indentation-sensitive
//! markup, into flat HTML interleaved with mustache expressions that any
//! Handlebars-compatible engine can render.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Emblem source
//!   → Preprocessor (normalizes line endings, drops blank lines)
//!   → Indentation resolver (maps each line to its parent node, rejects half dedents)
//!   → Classifier + lexer (turns a line into an element, mustache, literal, raw markup or text)
//!   → Joiner (appends continuation lines to text-bearing nodes)
//!   → Code generator (serializes the tree without inserted whitespace)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `emblem.toml`.
//! - [`project`]: Directory walking that discovers templates and their output paths.
//! - [`tokens`]: Tokens of an element line.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = emblem_core::compile(".navigation\n  p Hello\n#main\n  | hi").unwrap();
//!
//! assert_eq!(
//! 	html,
//! 	r#"<div class="navigation"><p>Hello</p></div><div id="main">hi</div>"#
//! );
//! ```
//!
//! Projects are compiled through a [`ProjectContext`]:
//!
//! ```rust,no_run
//! use emblem_core::project::scan_project_with_config;
//! use emblem_core::{build_project, write_outputs};
//! use std::path::Path;
//!
//! let ctx = scan_project_with_config(Path::new(".")).unwrap();
//! let build = build_project(&ctx).unwrap();
//! write_outputs(&build).unwrap();
//! ```

pub use ast::*;
pub use codegen::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use html::*;
pub use joiner::LineJoin;
pub use lexer::tokenize;
pub use parser::*;
pub use project::*;

mod ast;
pub(crate) mod builder;
pub(crate) mod classify;
mod codegen;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod html;
pub(crate) mod joiner;
pub(crate) mod lexer;
mod parser;
pub(crate) mod preprocess;
pub mod project;
pub(crate) mod resolver;
pub mod tokens;

/// Compile emblem source with the default [`CompileOptions`].
pub fn compile(source: impl AsRef<str>) -> EmblemResult<String> {
	compile_with_options(source, &CompileOptions::default())
}

/// Compile emblem source into a single HTML and mustache string.
///
/// Compilation is all or nothing: the first
/// [`IndentationError`] aborts it and no partial output is produced.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile_with_options(
	source: impl AsRef<str>,
	options: &CompileOptions,
) -> EmblemResult<String> {
	let document = parse(source.as_ref(), options)?;
	Ok(generate(&document))
}
