mod common;

use clap::Parser;
use emblem_cli::AstFormat;
use emblem_cli::Commands;
use emblem_cli::EmblemCli;
use emblem_cli::LineJoinArg;
use emblem_core::AnyEmptyResult;
use rstest::rstest;
use similar_asserts::assert_eq;

#[rstest]
#[case::literal("| hello there", "hello there\n")]
#[case::shorthands(
	".navigation\n  p Hello\n#main\n  | hi",
	"<div class=\"navigation\"><p>Hello</p></div><div id=\"main\">hi</div>\n"
)]
#[case::mustache_block("each foo\n  p\n  span", "{{#each foo}}<p></p><span></span>{{/each}}\n")]
fn compile_from_stdin(#[case] source: &str, #[case] expected: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let output = common::emblem_cmd()
		.arg("compile")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(source)
		.output()?;

	assert!(output.status.success());
	assert_eq!(String::from_utf8(output.stdout)?, expected);

	Ok(())
}

#[test]
fn compile_file_to_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = tmp.path().join("page.emblem");
	let output = tmp.path().join("out/page.hbs");
	std::fs::write(&source, "p Hello\n  world")?;

	common::emblem_cmd()
		.arg("compile")
		.arg(&source)
		.arg("--output")
		.arg(&output)
		.arg("--line-join")
		.arg("newline")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&output)?, "<p>Hello\nworld</p>");

	Ok(())
}

#[test]
fn compile_uses_project_elements() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("emblem.toml"),
		"[compile]\nelements = [\"x-card\"]\n",
	)?;

	common::emblem_cmd()
		.arg("compile")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("x-card Hi")
		.assert()
		.success()
		.stdout("<x-card>Hi</x-card>\n");

	Ok(())
}

#[test]
fn compile_reports_half_dedent() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = tmp.path().join("broken.emblem");
	std::fs::write(&source, "p\n    span This is ok\n  span This aint\n")?;

	common::emblem_cmd()
		.arg("compile")
		.arg(&source)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stdout("")
		.stderr(predicates::str::contains("emblem::half_dedent"))
		.stderr(predicates::str::contains("line 3"));

	Ok(())
}

#[test]
fn compile_missing_file_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::emblem_cmd()
		.arg("compile")
		.arg(tmp.path().join("missing.emblem"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("emblem::io_error"));

	Ok(())
}

#[test]
fn ast_prints_json() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let output = common::emblem_cmd()
		.arg("ast")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("p.intro Hello")
		.output()?;

	assert!(output.status.success());
	let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["children"][0]["type"], "tag");
	assert_eq!(value["children"][0]["name"], "p");
	assert_eq!(value["children"][0]["attributes"][0]["value"], "intro");
	assert_eq!(value["children"][0]["children"][0]["value"], "Hello");

	Ok(())
}

#[test]
fn ast_prints_yaml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::emblem_cmd()
		.arg("ast")
		.arg("--format")
		.arg("yaml")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin("| hi")
		.assert()
		.success()
		.stdout(predicates::str::contains("type: literal"))
		.stdout(predicates::str::contains("- hi"));

	Ok(())
}

#[test]
fn compile_arguments_parse() {
	let cli = EmblemCli::parse_from(["emblem", "compile", "page.emblem", "--line-join", "newline"]);
	match cli.command {
		Some(Commands::Compile {
			file,
			output,
			line_join,
		}) => {
			assert_eq!(file, Some("page.emblem".into()));
			assert_eq!(output, None);
			assert_eq!(line_join, Some(LineJoinArg::Newline));
		}
		_ => panic!("expected Compile command"),
	}

	let cli = EmblemCli::parse_from(["emblem", "ast"]);
	match cli.command {
		Some(Commands::Ast { file, format }) => {
			assert!(file.is_none());
			assert!(matches!(format, AstFormat::Json));
		}
		_ => panic!("expected Ast command"),
	}
}

#[test]
fn no_subcommand_exits_with_usage_hint() {
	common::emblem_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("emblem --help"));
}
