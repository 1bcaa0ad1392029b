use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::EmblemError;
use crate::EmblemResult;
use crate::IndentationError;
use crate::compile_with_options;
use crate::project::ProjectContext;

/// Whether a compiled template differs from what is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputStatus {
	/// No compiled file exists yet.
	Missing,
	/// The compiled file exists with different content.
	Changed,
	/// The compiled file is up to date.
	Fresh,
}

/// A template and its compiled content.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledFile {
	pub source: PathBuf,
	pub output: PathBuf,
	pub content: String,
	pub status: OutputStatus,
}

impl CompiledFile {
	pub fn is_stale(&self) -> bool {
		self.status != OutputStatus::Fresh
	}

	/// The content currently on disk, if any.
	pub fn current_content(&self) -> Option<String> {
		std::fs::read_to_string(&self.output).ok()
	}
}

/// A template that failed to compile. Failures are collected instead of
/// aborting so that every broken template is reported at once.
#[derive(Debug)]
pub struct CompileFailure {
	pub file: PathBuf,
	pub error: IndentationError,
}

/// Result of compiling every template in a project.
#[derive(Debug, Default)]
pub struct BuildResult {
	pub outputs: Vec<CompiledFile>,
	pub failures: Vec<CompileFailure>,
}

impl BuildResult {
	/// Outputs that would change on disk.
	pub fn stale(&self) -> impl Iterator<Item = &CompiledFile> {
		self.outputs.iter().filter(|file| file.is_stale())
	}

	pub fn stale_count(&self) -> usize {
		self.stale().count()
	}

	pub fn has_failures(&self) -> bool {
		!self.failures.is_empty()
	}
}

/// Result of checking a project for stale compiled templates.
#[derive(Debug)]
pub struct CheckResult {
	/// Compiled files that are missing or out of date.
	pub stale: Vec<CompiledFile>,
	pub failures: Vec<CompileFailure>,
}

impl CheckResult {
	/// Returns true if every output is up to date and every template
	/// compiled.
	pub fn is_ok(&self) -> bool {
		self.stale.is_empty() && self.failures.is_empty()
	}

	pub fn has_failures(&self) -> bool {
		!self.failures.is_empty()
	}
}

/// Compile every template in the project without touching the disk.
pub fn build_project(ctx: &ProjectContext) -> EmblemResult<BuildResult> {
	let mut result = BuildResult::default();

	for file in &ctx.sources {
		let source = std::fs::read_to_string(&file.source)?;

		match compile_with_options(&source, &ctx.options) {
			Ok(content) => {
				let status = output_status(&file.output, &content);
				tracing::debug!(source = %file.source.display(), ?status, "compiled template");
				result.outputs.push(CompiledFile {
					source: file.source.clone(),
					output: file.output.clone(),
					content,
					status,
				});
			}
			Err(EmblemError::Indentation(error)) => {
				let name = display_path(&ctx.root, &file.source);
				tracing::debug!(source = %name, line = error.line(), "template failed to compile");
				result.failures.push(CompileFailure {
					file: file.source.clone(),
					error: error.with_file_name(name),
				});
			}
			Err(error) => return Err(error),
		}
	}

	Ok(result)
}

/// Check whether all compiled templates in the project are up to date.
pub fn check_project(ctx: &ProjectContext) -> EmblemResult<CheckResult> {
	let build = build_project(ctx)?;

	Ok(CheckResult {
		stale: build
			.outputs
			.into_iter()
			.filter(CompiledFile::is_stale)
			.collect(),
		failures: build.failures,
	})
}

/// Write every stale output to disk, creating parent directories as needed.
/// Returns the number of files written.
pub fn write_outputs(build: &BuildResult) -> EmblemResult<usize> {
	let mut written = 0;

	for file in build.stale() {
		if let Some(parent) = file.output.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&file.output, &file.content)?;
		written += 1;
	}

	Ok(written)
}

/// A path relative to the project root for display.
pub fn display_path(root: &Path, path: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn output_status(output: &Path, expected: &str) -> OutputStatus {
	match std::fs::read_to_string(output) {
		Ok(current) if current == expected => OutputStatus::Fresh,
		Ok(_) => OutputStatus::Changed,
		Err(_) => OutputStatus::Missing,
	}
}
