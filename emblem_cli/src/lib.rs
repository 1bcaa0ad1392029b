use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use emblem_core::LineJoin;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Compile indentation-sensitive emblem templates into handlebars.",
	long_about = "emblem compiles a terse, whitespace-structured template language into flat HTML \
	              with mustache blocks, ready for any handlebars-compatible engine.\n\nQuick \
	              start:\n  emblem init     Create emblem.toml and a sample template\n  emblem \
	              build    Compile every template in the project\n  emblem check    Verify \
	              compiled templates are up to date\n  emblem compile  Compile a single file or \
	              stdin"
)]
pub struct EmblemCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize emblem in a project by creating `emblem.toml`.
	///
	/// Also creates a sample `hello.emblem` template. Existing files are left
	/// untouched.
	Init,
	/// Compile a single template and print the result.
	///
	/// Reads from stdin when no file is given or the file is `-`. Compile
	/// options from the project's `emblem.toml` apply unless overridden.
	Compile {
		/// The template to compile.
		file: Option<PathBuf>,

		/// Write the compiled template to this file instead of stdout.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// How wrapped text joins its continuation lines.
		#[arg(long, value_enum)]
		line_join: Option<LineJoinArg>,
	},
	/// Print the parsed syntax tree of a template.
	Ast {
		/// The template to parse. Reads from stdin when omitted or `-`.
		file: Option<PathBuf>,

		#[arg(long, value_enum, default_value_t = AstFormat::Json)]
		format: AstFormat,
	},
	/// Compile every template in the project and write the outputs.
	///
	/// Only outputs whose content changed are written. Templates that fail
	/// to compile are reported and make the command exit with a non-zero
	/// status after the remaining outputs are written.
	Build {
		/// Preview which files would be written without touching the disk.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that all compiled templates are up to date.
	///
	/// Exits with a non-zero status code if any output is missing or stale,
	/// or if any template fails to compile. Ideal for CI pipelines.
	Check {
		/// Show a unified diff for each stale output.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output, `json` for programmatic consumption, or `github` for
		/// GitHub Actions annotations.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
	/// GitHub Actions annotation format.
	Github,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AstFormat {
	Json,
	Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LineJoinArg {
	/// Collapse line breaks into a single space.
	Space,
	/// Keep line breaks.
	Newline,
}

impl From<LineJoinArg> for LineJoin {
	fn from(value: LineJoinArg) -> Self {
		match value {
			LineJoinArg::Space => LineJoin::Space,
			LineJoinArg::Newline => LineJoin::Newline,
		}
	}
}
