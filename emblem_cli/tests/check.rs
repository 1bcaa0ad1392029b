mod common;

use clap::Parser;
use emblem_cli::Commands;
use emblem_cli::EmblemCli;
use emblem_cli::OutputFormat;
use emblem_core::AnyEmptyResult;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("page.hbs"), "<p>Hello</p>")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_fails_when_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("page.hbs"), "<p>Goodbye</p>")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed."))
		.stderr(predicates::str::contains("page.hbs (from page.emblem)"))
		.stderr(predicates::str::contains("Run `emblem build` to fix."));

	Ok(())
}

#[test]
fn check_fails_when_output_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("stale outputs: 1"));

	Ok(())
}

#[test]
fn check_with_diff() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("page.hbs"), "<p>Goodbye</p>")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("-<p>Goodbye</p>"))
		.stderr(predicates::str::contains("+<p>Hello</p>"));

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("broken.emblem"), "p\n    span\n  span")?;

	let output = common::emblem_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["ok"], false);
	assert_eq!(value["stale"][0]["source"], "page.emblem");
	assert_eq!(value["stale"][0]["output"], "page.hbs");
	assert_eq!(value["stale"][0]["status"], "missing");
	assert_eq!(value["errors"][0]["file"], "broken.emblem");
	assert_eq!(value["errors"][0]["line"], 3);

	Ok(())
}

#[test]
fn check_json_report() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("broken.emblem"), "p\n    span\n  span")?;

	let output = common::emblem_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	insta::assert_snapshot!(
		String::from_utf8(output.stdout)?,
		@r#"{"ok":false,"stale":[{"source":"page.emblem","output":"page.hbs","status":"missing"}],"errors":[{"file":"broken.emblem","line":3,"message":"inconsistent dedent on line 3: column 2 does not match any open indentation level"}]}"#
	);

	Ok(())
}

#[test]
fn check_github_annotations() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("broken.emblem"), "p\n    span\n  span")?;

	let output = common::emblem_cmd()
		.arg("check")
		.arg("--format")
		.arg("github")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	insta::assert_snapshot!(String::from_utf8(output.stdout)?, @r"
	::error file=broken.emblem,line=3::inconsistent dedent on line 3: column 2 does not match any open indentation level
	::warning file=page.emblem::Compiled template `page.hbs` is out of date
	");

	Ok(())
}

#[test]
fn check_json_output_when_ok() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let output = common::emblem_cmd()
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["ok"], true);

	Ok(())
}

#[test]
fn check_github_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.emblem"), "p Hello")?;
	std::fs::write(tmp.path().join("broken.emblem"), "p\n    span\n  span")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--format")
		.arg("github")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains(
			"::error file=broken.emblem,line=3::inconsistent dedent",
		))
		.stdout(predicates::str::contains(
			"::warning file=page.emblem::Compiled template `page.hbs` is out of date",
		));

	Ok(())
}

#[test]
fn check_reports_compile_errors() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("broken.emblem"), "p\n    span\n  span")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("emblem::half_dedent"))
		.stderr(predicates::str::contains("broken.emblem"))
		.stderr(predicates::str::contains("1 compile error(s)"));

	Ok(())
}

#[test]
fn check_rejects_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("emblem.toml"), "[compile\n")?;

	common::emblem_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("emblem::config_parse"));

	Ok(())
}

#[test]
fn check_arguments_parse() {
	let cli = EmblemCli::parse_from(["emblem", "check", "--diff", "--format", "github"]);
	match cli.command {
		Some(Commands::Check { diff, format }) => {
			assert!(diff);
			assert!(matches!(format, OutputFormat::Github));
		}
		_ => panic!("expected Check command"),
	}

	let cli = EmblemCli::parse_from(["emblem", "check"]);
	match cli.command {
		Some(Commands::Check { diff, format }) => {
			assert!(!diff);
			assert!(matches!(format, OutputFormat::Text));
		}
		_ => panic!("expected Check command"),
	}
}
