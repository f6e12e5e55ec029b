use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Directive for a `-v` count. `RUST_LOG` wins when set.
fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		// Unsupported drag destinations are logged at error level.
		0 => "error",
		1 => "warn,ua2=debug,ua2_runtime=debug",
		_ => "trace",
	}
}

pub fn init_logging(verbosity: u8) {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.with_target(verbosity > 1)
		.compact()
		.init();
}
