mod common;

use emblem_core::AnyEmptyResult;
use emblem_core::EmblemConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::emblem_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created emblem.toml"))
		.stdout(predicates::str::contains("Created template file"));

	let config_content = std::fs::read_to_string(tmp.path().join("emblem.toml"))?;
	assert!(config_content.contains("[compile]"));
	assert!(config_content.contains("[output]"));
	assert!(EmblemConfig::from_toml(&config_content).is_ok());

	let template = std::fs::read_to_string(tmp.path().join("hello.emblem"))?;
	assert!(emblem_core::compile(&template).is_ok());

	Ok(())
}

#[test]
fn init_then_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::emblem_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::emblem_cmd()
		.arg("build")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let compiled = std::fs::read_to_string(tmp.path().join("hello.hbs"))?;
	assert_eq!(
		compiled,
		"<section class=\"greeting\"><h1>Hello from emblem!</h1>{{#if user}}<p>Welcome back, \
		 {{user.name}}.</p>{{/if}}</section>"
	);

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join(".emblem.toml");
	std::fs::write(&config_path, "existing config")?;
	let template_path = tmp.path().join("hello.emblem");
	std::fs::write(&template_path, "existing template")?;

	common::emblem_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");
	assert_eq!(std::fs::read_to_string(&template_path)?, "existing template");
	assert!(!tmp.path().join("emblem.toml").exists());

	Ok(())
}
