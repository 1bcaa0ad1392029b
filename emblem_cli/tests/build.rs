mod common;

use emblem_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use similar_asserts::assert_eq;

#[test]
fn build_writes_outputs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("index.emblem"), "ul\n  each items\n    li {{this}}")?;
	std::fs::create_dir_all(tmp.path().join("partials"))?;
	std::fs::write(tmp.path().join("partials/nav.emblem"), "nav.main\n  | Home")?;

	common::emblem_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Compiled 2 template(s)"));

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("index.hbs"))?,
		"<ul>{{#each items}}<li>{{this}}</li>{{/each}}</ul>"
	);
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("partials/nav.hbs"))?,
		"<nav class=\"main\">Home</nav>"
	);

	common::emblem_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already up to date"));

	Ok(())
}

#[test]
fn build_dry_run_does_not_write() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("index.emblem"), "p Hi")?;

	common::emblem_cmd()
		.arg("build")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would write 1 file(s):"))
		.stdout(predicates::str::contains("index.hbs"));

	assert!(!tmp.path().join("index.hbs").exists());

	Ok(())
}

#[test]
fn build_into_output_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("emblem.toml"),
		"[output]\ndir = \"dist\"\nextension = \"handlebars\"\n",
	)?;
	std::fs::create_dir_all(tmp.path().join("pages"))?;
	std::fs::write(tmp.path().join("pages/home.emblem"), "h1 Home")?;

	common::emblem_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("dist/pages/home.handlebars"))?,
		"<h1>Home</h1>"
	);

	Ok(())
}

#[test]
fn build_continues_past_failures() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("good.emblem"), "p Fine")?;
	std::fs::write(tmp.path().join("bad.emblem"), "p\n    span\n  span")?;

	common::emblem_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("bad.emblem").and(predicates::str::contains(
			"1 template(s) failed to compile.",
		)));

	assert!(tmp.path().join("good.hbs").exists());
	assert!(!tmp.path().join("bad.hbs").exists());

	Ok(())
}
