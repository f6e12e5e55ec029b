//! Error types for the element layer.

use thiserror::Error;

/// Result type alias for element operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by element operations and their native collaborators.
///
/// "No match" is never an error: searches return [`None`] or an empty
/// [`Vec`] for that.
#[derive(Debug, Error)]
pub enum Error {
	/// Attribute name is not part of the attribute registry.
	#[error(
		"'{name}' attribute is unknown for the element. Only the following attributes are supported: {}",
		supported.join(", ")
	)]
	UnsupportedAttribute {
		name: String,
		supported: Vec<&'static str>,
	},

	/// The underlying platform call failed.
	#[error("Native {operation} failed: {message}")]
	Native {
		/// Native call that failed (e.g., "drag", "findObject")
		operation: &'static str,
		message: String,
	},

	/// The node behind a handle no longer exists in the tree.
	#[error("Stale element: {0}")]
	StaleHandle(String),

	/// Drag destination cannot yield a center point.
	#[error("Unsupported drag target: {0}. Destination should be either a live-view or a selector-replay handle")]
	UnsupportedDragTarget(String),

	/// Point cannot be mapped onto the display.
	#[error("Invalid coordinates ({x}, {y}): {reason}")]
	InvalidCoordinates { x: i32, y: i32, reason: String },

	/// Invalid argument provided to method.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Shorthand for [`Error::Native`].
	pub fn native(operation: &'static str, message: impl Into<String>) -> Self {
		Error::Native {
			operation,
			message: message.into(),
		}
	}

	/// Returns true if the platform call itself failed, including stale handles.
	pub fn is_native_failure(&self) -> bool {
		matches!(self, Error::Native { .. } | Error::StaleHandle(_))
	}

	/// Returns true if the handle's node has disappeared.
	pub fn is_stale(&self) -> bool {
		matches!(self, Error::StaleHandle(_))
	}
}
