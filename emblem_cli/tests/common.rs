use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn emblem_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("emblem"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("EMBLEM_LOG");
	cmd
}
