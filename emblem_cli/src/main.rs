use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use emblem_cli::AstFormat;
use emblem_cli::Commands;
use emblem_cli::EmblemCli;
use emblem_cli::LineJoinArg;
use emblem_cli::OutputFormat;
use emblem_core::ANONYMOUS_SOURCE;
use emblem_core::CheckResult;
use emblem_core::CompileFailure;
use emblem_core::CompileOptions;
use emblem_core::EmblemConfig;
use emblem_core::EmblemError;
use emblem_core::build_project;
use emblem_core::check_project;
use emblem_core::compile_with_options;
use emblem_core::display_path;
use emblem_core::parse;
use emblem_core::project::scan_project_with_config;
use emblem_core::write_outputs;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "EMBLEM_LOG";

const SAMPLE_CONFIG: &str = "# emblem configuration\n\n# How wrapped text joins its continuation \
                             lines: \"space\" or \"newline\".\n# [compile]\n# line_join = \
                             \"space\"\n# elements = [\"my-widget\"]\n\n# Where compiled \
                             templates are written. By default they sit next to their \
                             sources.\n# [output]\n# extension = \"hbs\"\n# dir = \
                             \"dist/templates\"\n\n# Gitignore-style patterns to skip.\n# \
                             [exclude]\n# patterns = [\"vendor/\"]\n";

const SAMPLE_TEMPLATE: &str = "section.greeting\n  h1 Hello from emblem!\n  if user\n    p \
                               Welcome back, {{user.name}}.\n";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = EmblemCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Compile {
			file,
			output,
			line_join,
		}) => run_compile(&args, file.as_deref(), output.as_deref(), *line_join),
		Some(Commands::Ast { file, format }) => run_ast(&args, file.as_deref(), *format),
		Some(Commands::Build { dry_run }) => run_build(&args, *dry_run),
		Some(Commands::Check { diff, format }) => run_check(&args, *diff, *format),
		None => {
			eprintln!("No subcommand specified. Run `emblem --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Core errors carry codes, help text and source labels.
		match e.downcast::<EmblemError>() {
			Ok(emblem_err) => {
				let report: miette::Report = (*emblem_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init()
		.ok();
}

fn resolve_root(args: &EmblemCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run_init(args: &EmblemCli) -> CliResult<()> {
	let root = resolve_root(args);
	let config_path = root.join("emblem.toml");
	let template_path = root.join("hello.emblem");

	if let Some(existing) = EmblemConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
	} else {
		std::fs::write(&config_path, SAMPLE_CONFIG)?;
		println!("Created emblem.toml");
	}

	if template_path.exists() {
		println!("Template file already exists: {}", template_path.display());
		return Ok(());
	}

	std::fs::write(&template_path, SAMPLE_TEMPLATE)?;
	println!("Created template file: {}", template_path.display());
	println!();
	println!("{}", colored!("Next steps:", bold));
	println!("  1. Edit {} or add more *.emblem files", template_path.display());
	println!("  2. Run `emblem build` to compile them");
	println!("  3. Run `emblem check` in CI to keep outputs fresh");

	Ok(())
}

/// Read a template from a file, or from stdin for `None` and `-`.
fn read_source(file: Option<&Path>) -> CliResult<(String, String)> {
	match file {
		Some(path) if path != Path::new("-") => {
			let source = std::fs::read_to_string(path).map_err(EmblemError::from)?;
			Ok((source, path.display().to_string()))
		}
		_ => {
			let mut source = String::new();
			std::io::stdin()
				.read_to_string(&mut source)
				.map_err(EmblemError::from)?;
			Ok((source, ANONYMOUS_SOURCE.to_string()))
		}
	}
}

/// Compile options from the project config, if one exists.
fn project_options(args: &EmblemCli) -> CliResult<CompileOptions> {
	let root = resolve_root(args);
	let config = EmblemConfig::load(&root)?;
	Ok(config.map(|c| c.compile).unwrap_or_default())
}

/// Attach the file name to indentation errors so reports point at the file.
fn with_file_name(error: EmblemError, name: &str) -> EmblemError {
	match error {
		EmblemError::Indentation(error) => EmblemError::Indentation(error.with_file_name(name)),
		other => other,
	}
}

fn run_compile(
	args: &EmblemCli,
	file: Option<&Path>,
	output: Option<&Path>,
	line_join: Option<LineJoinArg>,
) -> CliResult<()> {
	let mut options = project_options(args)?;
	if let Some(line_join) = line_join {
		options = options.with_line_join(line_join.into());
	}

	let (source, name) = read_source(file)?;
	let html = compile_with_options(&source, &options).map_err(|e| with_file_name(e, &name))?;

	match output {
		Some(path) => {
			if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
				std::fs::create_dir_all(parent).map_err(EmblemError::from)?;
			}
			std::fs::write(path, &html).map_err(EmblemError::from)?;
			if args.verbose {
				eprintln!("Wrote {}", path.display());
			}
		}
		None => println!("{html}"),
	}

	Ok(())
}

fn run_ast(args: &EmblemCli, file: Option<&Path>, format: AstFormat) -> CliResult<()> {
	let options = project_options(args)?;
	let (source, name) = read_source(file)?;
	let document = parse(&source, &options).map_err(|e| with_file_name(e, &name))?;

	let rendered = match format {
		AstFormat::Json => serde_json::to_string_pretty(&document)?,
		AstFormat::Yaml => serde_yaml_ng::to_string(&document)?,
	};
	println!("{}", rendered.trim_end());

	Ok(())
}

fn run_build(args: &EmblemCli, dry_run: bool) -> CliResult<()> {
	let root = resolve_root(args);
	let ctx = scan_project_with_config(&root)?;
	let build = build_project(&ctx)?;
	let stale_count = build.stale_count();

	if stale_count == 0 {
		println!("All compiled templates are already up to date.");
	} else if dry_run {
		println!("Dry run: would write {stale_count} file(s):");
		for file in build.stale() {
			println!("  {}", display_path(&root, &file.output));
		}
	} else {
		let written = write_outputs(&build)?;
		println!(
			"Compiled {written} template(s) from {} source(s).",
			build.outputs.len()
		);

		if args.verbose {
			for file in build.stale() {
				println!("  {}", display_path(&root, &file.output));
			}
		}
	}

	if build.has_failures() {
		let count = build.failures.len();
		report_failures(build.failures);
		eprintln!("{}", colored!(format!("{count} template(s) failed to compile."), red));
		process::exit(1);
	}

	Ok(())
}

fn report_failures(failures: Vec<CompileFailure>) {
	for failure in failures {
		let report = miette::Report::new(failure.error);
		eprintln!("{report:?}");
	}
}

#[derive(Serialize)]
struct CheckReport {
	ok: bool,
	stale: Vec<StaleReport>,
	errors: Vec<ErrorReport>,
}

#[derive(Serialize)]
struct StaleReport {
	source: String,
	output: String,
	status: emblem_core::OutputStatus,
}

#[derive(Serialize)]
struct ErrorReport {
	file: String,
	line: usize,
	message: String,
}

fn run_check(args: &EmblemCli, show_diff: bool, format: OutputFormat) -> CliResult<()> {
	let root = resolve_root(args);
	let ctx = scan_project_with_config(&root)?;
	let result = check_project(&ctx)?;

	if result.is_ok() {
		match format {
			OutputFormat::Json => {
				println!("{{\"ok\":true,\"stale\":[],\"errors\":[]}}");
			}
			OutputFormat::Github => {
				println!("All compiled templates are up to date.");
			}
			OutputFormat::Text => {
				println!("Check passed: all compiled templates are up to date.");
			}
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			let report = CheckReport {
				ok: false,
				stale: result
					.stale
					.iter()
					.map(|file| {
						StaleReport {
							source: display_path(&root, &file.source),
							output: display_path(&root, &file.output),
							status: file.status,
						}
					})
					.collect(),
				errors: result
					.failures
					.iter()
					.map(|failure| {
						ErrorReport {
							file: display_path(&root, &failure.file),
							line: failure.error.line(),
							message: failure.error.to_string(),
						}
					})
					.collect(),
			};
			println!("{}", serde_json::to_string(&report)?);
		}
		OutputFormat::Github => {
			for failure in &result.failures {
				println!(
					"::error file={},line={}::{}",
					display_path(&root, &failure.file),
					failure.error.line(),
					failure.error
				);
			}
			for file in &result.stale {
				println!(
					"::warning file={}::Compiled template `{}` is out of date",
					display_path(&root, &file.source),
					display_path(&root, &file.output)
				);
			}
			eprintln!("{}", check_summary(&result));
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!("  compile errors: {}", result.failures.len());
			eprintln!("  stale outputs: {}", result.stale.len());

			if !result.stale.is_empty() {
				eprintln!();
				eprintln!("Stale outputs:");
				for file in &result.stale {
					eprintln!(
						"  {} (from {})",
						display_path(&root, &file.output),
						display_path(&root, &file.source)
					);

					if show_diff {
						let current = file.current_content().unwrap_or_default();
						print_diff(&current, &file.content);
					}
				}
			}

			let summary = check_summary(&result);
			if result.has_failures() {
				eprintln!();
				report_failures(result.failures);
			}

			eprintln!();
			eprintln!("{summary}");
		}
	}

	process::exit(1);
}

fn check_summary(result: &CheckResult) -> String {
	let mut parts = Vec::new();
	if !result.failures.is_empty() {
		parts.push(format!("{} compile error(s)", result.failures.len()));
	}
	if !result.stale.is_empty() {
		parts.push(format!(
			"{} compiled template(s) are out of date",
			result.stale.len()
		));
	}
	format!("{}. Run `emblem build` to fix.", parts.join(" and "))
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprintln!("  {}", colored!(format!("-{}", change.value().trim_end()), red));
			}
			ChangeTag::Insert => {
				eprintln!("  {}", colored!(format!("+{}", change.value().trim_end()), green));
			}
			ChangeTag::Equal => {
				eprintln!("   {}", change.value().trim_end());
			}
		}
	}
}
