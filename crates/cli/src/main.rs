mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::output::{CommandResult, OutputFormat};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	match commands::dispatch(cli).await {
		Ok(data) => output::print_result(&CommandResult::success(command, data), format),
		Err(err) => {
			let cmd_error = err.to_command_error();
			output::print_error_stderr(&cmd_error);
			if format == OutputFormat::Json {
				output::print_result(&CommandResult::<()>::failure(command, cmd_error), format);
			}
			std::process::exit(1);
		}
	}
}
