//! Print an aligned report of the runtime and compile-time environment.
use std::sync::LazyLock;

use bracefill::{fallback, map_value, DisplayFormatter, Env, Template};

static STATIC_ENV: &[(&str, &str)] = {
	&[
		("CARGO", env!("CARGO")),
		("CARGO_PKG_VERSION", env!("CARGO_PKG_VERSION")),
		("CARGO_PKG_NAME", env!("CARGO_PKG_NAME")),
		("CARGO_PKG_DESCRIPTION", env!("CARGO_PKG_DESCRIPTION")),
		("CARGO_PKG_AUTHORS", env!("CARGO_PKG_AUTHORS")),
		("CARGO_CRATE_NAME", env!("CARGO_CRATE_NAME")),
	]
};

static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
	Template::from_str(
		r#"
Hello {USER}!

Here is some information about the current environment:

{{CARGO}}                 | {CARGO,-40} |
{{CARGO_PKG_NAME}}        | {CARGO_PKG_NAME,-40} |
{{CARGO_PKG_VERSION}}     | {CARGO_PKG_VERSION,40} |
{{CARGO_PKG_DESCRIPTION}} | {CARGO_PKG_DESCRIPTION,-40} |
{{CARGO_PKG_AUTHORS}}     | {CARGO_PKG_AUTHORS,-40} |
{{CARGO_CRATE_NAME}}      | {CARGO_CRATE_NAME,-40} |
{{PATH}}                  | {PATH,-40} |
"#,
	)
	.unwrap()
});

pub fn main() {
	println!("Filling using Env:");
	println!(
		"{}",
		TEMPLATE
			.fill(&Env, &DisplayFormatter)
			.expect_err("Env doesn't know anything about compile-time variables")
	);
	println!();

	println!("Filling using STATIC_ENV:");
	println!(
		"{}",
		TEMPLATE
			.fill(STATIC_ENV, &DisplayFormatter)
			.expect_err("STATIC_ENV doesn't know anything about runtime variables.")
	);
	println!();

	println!("Filling using Env, falling back to STATIC_ENV:");

	let merged = fallback(
		Env,
		// `Env` gives `String`s, but `STATIC_ENV` gives `&&str` references.
		// Bring them to the same type so `fallback` can combine the maps.
		map_value(STATIC_ENV, |value| (*value).to_owned()),
	);
	println!("{}", TEMPLATE.fill(&merged, &DisplayFormatter).unwrap());
}
