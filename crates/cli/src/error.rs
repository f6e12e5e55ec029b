use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("no element at {0}")]
	ElementNotFound(String),

	#[error("no hierarchy dump given; pass --hierarchy or set UA2_HIERARCHY")]
	MissingHierarchy,

	#[error(transparent)]
	Element(#[from] ua2::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	pub fn to_command_error(&self) -> CommandError {
		let (code, message) = match self {
			CliError::InvalidInput(msg) => (ErrorCode::InvalidInput, msg.clone()),
			CliError::ElementNotFound(_) => (ErrorCode::ElementNotFound, self.to_string()),
			CliError::MissingHierarchy => (ErrorCode::InvalidInput, self.to_string()),
			CliError::Element(err) => (element_code(err), err.to_string()),
			CliError::Io(err) => (ErrorCode::IoError, err.to_string()),
			CliError::Json(err) => (ErrorCode::InvalidInput, format!("JSON error: {err}")),
			// Keep the whole context chain; the root cause is usually the useful part.
			CliError::Anyhow(err) => match err.downcast_ref::<ua2::Error>() {
				Some(inner) => (element_code(inner), format!("{err:#}")),
				None => (ErrorCode::InternalError, format!("{err:#}")),
			},
		};
		CommandError { code, message }
	}
}

fn element_code(err: &ua2::Error) -> ErrorCode {
	match err {
		ua2::Error::UnsupportedAttribute { .. } => ErrorCode::UnsupportedAttribute,
		ua2::Error::Native { .. } | ua2::Error::StaleHandle(_) => ErrorCode::NativeFailure,
		ua2::Error::Io(_) => ErrorCode::IoError,
		ua2::Error::UnsupportedDragTarget(_)
		| ua2::Error::InvalidCoordinates { .. }
		| ua2::Error::InvalidArgument(_)
		| ua2::Error::Json(_) => ErrorCode::InvalidInput,
	}
}

#[cfg(test)]
mod tests {
	use anyhow::Context;

	use super::*;

	#[test]
	fn unsupported_attribute_keeps_its_code() {
		let err = CliError::from(ua2::Error::UnsupportedAttribute {
			name: "colour".into(),
			supported: vec!["text"],
		});
		assert_eq!(err.to_command_error().code, ErrorCode::UnsupportedAttribute);
	}

	#[test]
	fn contextual_load_errors_keep_the_chain() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err: anyhow::Error = Err::<(), _>(ua2::Error::from(io))
			.context("failed to load hierarchy dump.json")
			.unwrap_err();
		let cmd = CliError::from(err).to_command_error();
		assert_eq!(cmd.code, ErrorCode::IoError);
		assert!(cmd.message.starts_with("failed to load hierarchy dump.json: "));
		assert!(cmd.message.contains("gone"));
	}
}
