//! Result envelope printed by every command.
//!
//! ```json
//! { "ok": true, "command": "attr", "data": "android.widget.Button" }
//! { "ok": false, "command": "attr", "error": { "code": "UNSUPPORTED_ATTRIBUTE", "message": "..." } }
//! ```

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Pretty-printed JSON envelope
	#[default]
	Json,
	/// Data only, one value per line
	Text,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
}

impl<T: Serialize> CommandResult<T> {
	pub fn success(command: &str, data: T) -> Self {
		Self {
			ok: true,
			command: command.to_string(),
			data: Some(data),
			error: None,
		}
	}

	pub fn failure(command: &str, error: CommandError) -> Self {
		Self {
			ok: false,
			command: command.to_string(),
			data: None,
			error: Some(error),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// Attribute name is not in the registry
	UnsupportedAttribute,
	/// The addressed element does not exist
	ElementNotFound,
	/// A native call failed or hit a stale node
	NativeFailure,
	/// Bad flag value or malformed JSON argument
	InvalidInput,
	/// Hierarchy or settings file could not be read
	IoError,
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			ErrorCode::UnsupportedAttribute => "UNSUPPORTED_ATTRIBUTE",
			ErrorCode::ElementNotFound => "ELEMENT_NOT_FOUND",
			ErrorCode::NativeFailure => "NATIVE_FAILURE",
			ErrorCode::InvalidInput => "INVALID_INPUT",
			ErrorCode::IoError => "IO_ERROR",
			ErrorCode::InternalError => "INTERNAL_ERROR",
		};
		f.write_str(name)
	}
}

pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => print_result_text(result),
	}
}

fn print_result_text<T: Serialize>(result: &CommandResult<T>) {
	let mut stdout = io::stdout().lock();
	if let Some(error) = &result.error {
		let _ = writeln!(stdout, "Error [{}]: {}", error.code, error.message);
		return;
	}
	let Some(data) = &result.data else { return };
	match serde_json::to_value(data) {
		Ok(serde_json::Value::Null) => {}
		Ok(serde_json::Value::String(s)) => {
			let _ = writeln!(stdout, "{s}");
		}
		Ok(serde_json::Value::Array(items)) => {
			for item in items {
				let _ = writeln!(stdout, "{item}");
			}
		}
		Ok(other) => {
			let _ = writeln!(stdout, "{other}");
		}
		Err(_) => {}
	}
}

pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn success_omits_error() {
		let json = serde_json::to_value(CommandResult::success("attr", "Button")).unwrap();
		assert_eq!(json["ok"], true);
		assert_eq!(json["data"], "Button");
		assert!(json.get("error").is_none());
	}

	#[test]
	fn failure_uses_screaming_codes() {
		let error = CommandError {
			code: ErrorCode::UnsupportedAttribute,
			message: "nope".into(),
		};
		let json = serde_json::to_value(CommandResult::<()>::failure("attr", error)).unwrap();
		assert_eq!(json["ok"], false);
		assert_eq!(json["error"]["code"], "UNSUPPORTED_ATTRIBUTE");
		assert!(json.get("data").is_none());
	}
}
