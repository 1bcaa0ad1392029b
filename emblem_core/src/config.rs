use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::EmblemError;
use crate::EmblemResult;
use crate::html::ElementSet;
use crate::joiner::LineJoin;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["emblem.toml", ".emblem.toml", ".config/emblem.toml"];

/// File extension of emblem templates.
pub const SOURCE_EXTENSION: &str = "emblem";

/// Extension given to compiled templates unless `[output] extension` is set.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "hbs";

/// Configuration loaded from an `emblem.toml` file.
///
/// ```toml
/// [compile]
/// line_join = "space"
/// elements = ["my-widget"]
///
/// [output]
/// extension = "hbs"
/// dir = "dist/templates"
///
/// [exclude]
/// patterns = ["vendor/", "*.draft.emblem"]
///
/// [include]
/// patterns = ["legacy/**/*.em"]
///
/// disable_gitignore = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct EmblemConfig {
	/// Options passed to the compiler for every template in the project.
	#[serde(default)]
	pub compile: CompileOptions,
	/// Where compiled templates are written.
	#[serde(default)]
	pub output: OutputConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Additional glob patterns to compile.
	#[serde(default)]
	pub include: IncludeConfig,
	/// When true, `.gitignore` files are not used for filtering. Use
	/// `[exclude]` patterns instead.
	#[serde(default)]
	pub disable_gitignore: bool,
}

/// Options that change how a single template compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
	/// How wrapped text, raw markup and trailing-space text join their
	/// continuation lines.
	#[serde(default)]
	pub line_join: LineJoin,
	/// Extra words to treat as element names, e.g. custom elements.
	#[serde(default)]
	pub elements: Vec<String>,
}

impl CompileOptions {
	#[must_use]
	pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
		self.line_join = line_join;
		self
	}

	#[must_use]
	pub fn with_elements<I, S>(mut self, elements: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.elements.extend(elements.into_iter().map(Into::into));
		self
	}

	/// The element names recognized with these options.
	pub fn element_set(&self) -> ElementSet {
		ElementSet::new(&self.elements)
	}
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
	/// Extension of compiled files, without the leading dot.
	#[serde(default = "default_output_extension")]
	pub extension: String,
	/// Directory, relative to the project root, that mirrors the source tree.
	/// When unset, compiled files are written next to their sources.
	#[serde(default)]
	pub dir: Option<PathBuf>,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			extension: default_output_extension(),
			dir: None,
		}
	}
}

fn default_output_extension() -> String {
	DEFAULT_OUTPUT_EXTENSION.to_string()
}

/// Configuration for excluding files from compilation.
///
/// Patterns follow gitignore syntax and are applied on top of any `.gitignore`
/// rules (unless `disable_gitignore` is set).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	/// Examples: `"build/"`, `"*.draft.emblem"`, `"!keep.emblem"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// Configuration for compiling files that lack the `.emblem` extension.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeConfig {
	/// Glob patterns relative to the project root.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl EmblemConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> EmblemResult<Option<EmblemConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> EmblemResult<EmblemConfig> {
		toml::from_str(content).map_err(|e| EmblemError::ConfigParse(e.to_string()))
	}
}
