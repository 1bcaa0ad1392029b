use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Serialize;

use crate::EmblemError;
use crate::EmblemResult;
use crate::config::CONFIG_FILE_CANDIDATES;
use crate::config::CompileOptions;
use crate::config::EmblemConfig;
use crate::config::OutputConfig;
use crate::config::SOURCE_EXTENSION;

/// Options for controlling how a project is scanned.
///
/// Use [`ScanOptions::default()`] for sensible defaults or
/// [`ScanOptions::from_config`] to construct from an [`EmblemConfig`].
#[derive(Debug, Clone)]
pub struct ScanOptions {
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
	/// Extra files to compile regardless of their extension.
	pub include_set: GlobSet,
	/// Whether to disable `.gitignore` integration.
	pub disable_gitignore: bool,
	/// Where compiled files are placed.
	pub output: OutputConfig,
}

impl Default for ScanOptions {
	fn default() -> Self {
		Self {
			exclude_patterns: Vec::new(),
			include_set: GlobSet::empty(),
			disable_gitignore: false,
			output: OutputConfig::default(),
		}
	}
}

impl ScanOptions {
	/// Construct [`ScanOptions`] from an [`EmblemConfig`].
	pub fn from_config(config: Option<&EmblemConfig>) -> Self {
		let exclude_patterns = config
			.map(|c| c.exclude.patterns.clone())
			.unwrap_or_default();
		let include_patterns = config.map(|c| &c.include.patterns[..]).unwrap_or_default();
		let disable_gitignore = config.is_some_and(|c| c.disable_gitignore);
		let output = config.map(|c| c.output.clone()).unwrap_or_default();

		Self {
			exclude_patterns,
			include_set: build_glob_set(include_patterns),
			disable_gitignore,
			output,
		}
	}
}

/// A template discovered in the project and the path it compiles to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
	pub source: PathBuf,
	pub output: PathBuf,
}

/// A scanned project together with the options used to compile it.
///
/// This is the main entry point returned by [`scan_project_with_config`] and
/// consumed by [`build_project`](crate::build_project) and
/// [`check_project`](crate::check_project).
#[derive(Debug)]
pub struct ProjectContext {
	pub root: PathBuf,
	/// Sources in deterministic (sorted) order.
	pub sources: Vec<SourceFile>,
	pub options: CompileOptions,
}

/// Discover every template under `root`.
///
/// Hidden directories, `node_modules`, `target` and nested projects are never
/// entered. Gitignored and excluded paths are skipped, although an include
/// glob still reaches gitignored files. A directory reached twice through
/// symlinks is scanned under both paths. Only a symlink leading back into one
/// of its own ancestors is an error.
pub fn scan_project(root: &Path, options: &ScanOptions) -> EmblemResult<Vec<SourceFile>> {
	let gitignore = if options.disable_gitignore {
		Gitignore::empty()
	} else {
		build_gitignore(root)
	};
	let mut walker = ProjectWalker {
		root,
		gitignore,
		exclude: build_exclude_matcher(root, &options.exclude_patterns)?,
		include_set: &options.include_set,
		ancestors: Vec::new(),
		files: Vec::new(),
	};
	walker.walk(root, false)?;

	let mut files = walker.files;
	files.sort();
	files.dedup();

	let sources = files
		.into_iter()
		.filter_map(|source| {
			let output = output_path(root, &source, &options.output);
			// A file that would compile onto itself is never a template.
			(output != source).then_some(SourceFile { source, output })
		})
		.collect::<Vec<_>>();

	tracing::debug!(count = sources.len(), root = %root.display(), "discovered templates");

	Ok(sources)
}

/// Scan a project with config: loads the discovered project config and scans
/// with the options it describes.
pub fn scan_project_with_config(root: &Path) -> EmblemResult<ProjectContext> {
	let config = EmblemConfig::load(root)?;
	let options = ScanOptions::from_config(config.as_ref());
	let sources = scan_project(root, &options)?;

	Ok(ProjectContext {
		root: root.to_path_buf(),
		sources,
		options: config.map(|c| c.compile).unwrap_or_default(),
	})
}

/// The path a template compiles to.
///
/// Without an output directory the compiled file sits next to its source.
/// With one, the source tree is mirrored below it.
pub fn output_path(root: &Path, source: &Path, output: &OutputConfig) -> PathBuf {
	let placed = match (&output.dir, source.strip_prefix(root)) {
		(Some(dir), Ok(relative)) => root.join(dir).join(relative),
		_ => source.to_path_buf(),
	};

	placed.with_extension(&output.extension)
}

/// Check if a file is an emblem template.
pub fn is_template_file(path: &Path) -> bool {
	path.extension()
		.and_then(|e| e.to_str())
		.is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Build a `GlobSet` from a list of glob pattern strings.
fn build_glob_set(patterns: &[String]) -> GlobSet {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		match Glob::new(pattern) {
			Ok(glob) => {
				builder.add(glob);
			}
			Err(e) => tracing::warn!(%pattern, error = %e, "ignoring invalid include pattern"),
		}
	}
	builder.build().unwrap_or_else(|_| GlobSet::empty())
}

/// Build a `Gitignore` matcher from exclude patterns specified in
/// `emblem.toml` `[exclude]`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> EmblemResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			EmblemError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| EmblemError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

/// Build a `Gitignore` matcher from the project's `.gitignore` file (if any).
fn build_gitignore(root: &Path) -> Gitignore {
	let mut builder = GitignoreBuilder::new(root);
	let gitignore_path = root.join(".gitignore");
	if gitignore_path.exists() {
		if let Some(e) = builder.add(&gitignore_path) {
			tracing::warn!(path = %gitignore_path.display(), error = %e, "failed to read .gitignore");
		}
	}
	builder.build().unwrap_or_else(|_| Gitignore::empty())
}

struct ProjectWalker<'a> {
	root: &'a Path,
	gitignore: Gitignore,
	exclude: Gitignore,
	include_set: &'a GlobSet,
	/// Canonical paths of the directories currently being walked.
	ancestors: Vec<PathBuf>,
	files: Vec<PathBuf>,
}

impl ProjectWalker<'_> {
	/// Walk `dir`. Inside a gitignored directory only include globs match.
	fn walk(&mut self, dir: &Path, gitignored: bool) -> EmblemResult<()> {
		if !dir.is_dir() {
			return Ok(());
		}

		let canonical = dir.canonicalize()?;
		if self.ancestors.contains(&canonical) {
			return Err(EmblemError::SymlinkCycle {
				path: dir.display().to_string(),
			});
		}

		tracing::trace!(dir = %dir.display(), "scanning directory");
		self.ancestors.push(canonical);
		let result = self.walk_entries(dir, gitignored);
		self.ancestors.pop();

		result
	}

	fn walk_entries(&mut self, dir: &Path, gitignored: bool) -> EmblemResult<()> {
		let mut entries = std::fs::read_dir(dir)?
			.map(|entry| entry.map(|e| e.path()))
			.collect::<Result<Vec<_>, _>>()?;
		entries.sort();

		for path in entries {
			let skipped = path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(is_ignored_entry_name);
			let is_dir = path.is_dir();
			if skipped || self.exclude.matched(&path, is_dir).is_ignore() {
				continue;
			}

			let gitignored = gitignored || self.gitignore.matched(&path, is_dir).is_ignore();

			if is_dir {
				// Nested projects are compiled on their own.
				if has_project_config(&path) {
					continue;
				}

				if gitignored && self.include_set.is_empty() {
					continue;
				}

				self.walk(&path, gitignored)?;
			} else if (!gitignored && is_template_file(&path)) || self.is_included(&path) {
				self.files.push(path);
			}
		}

		Ok(())
	}

	fn is_included(&self, path: &Path) -> bool {
		path.strip_prefix(self.root)
			.is_ok_and(|relative| self.include_set.is_match(relative))
	}
}

fn is_ignored_entry_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn has_project_config(dir: &Path) -> bool {
	CONFIG_FILE_CANDIDATES
		.iter()
		.any(|candidate| dir.join(candidate).is_file())
}
