//! Element-layer settings.
//!
//! Settings are read from a JSON file. [`ElementSettings::from_env`] looks
//! the file up through the `UA2_SETTINGS` environment variable and falls back
//! to defaults when it is unset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Schema version for settings files.
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable holding the path of a settings file.
pub const SETTINGS_ENV: &str = "UA2_SETTINGS";

/// Tunables shared by every element created from one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementSettings {
	pub schema: u32,
	/// Upper bound on `instance` enumeration when collecting replay children.
	pub max_child_instances: usize,
	/// Touch padding reported inside the `contentSize` attribute.
	pub touch_padding: i32,
	/// Whether synthesized selectors pin the node's bounds.
	pub synthesize_bounds: bool,
}

impl Default for ElementSettings {
	fn default() -> Self {
		Self {
			schema: SCHEMA_VERSION,
			max_child_instances: 1000,
			touch_padding: 0,
			synthesize_bounds: false,
		}
	}
}

impl ElementSettings {
	/// Reads settings from a JSON file. Missing keys keep their defaults.
	///
	/// A file written for another schema version is rejected with
	/// [`Error::InvalidArgument`].
	pub fn load(path: &Path) -> Result<Self> {
		let json = std::fs::read_to_string(path)?;
		let settings: Self = serde_json::from_str(&json)?;
		if settings.schema != SCHEMA_VERSION {
			return Err(Error::InvalidArgument(format!(
				"settings file {} has schema {}, expected {SCHEMA_VERSION}",
				path.display(),
				settings.schema
			)));
		}
		debug!(path = %path.display(), ?settings, "loaded element settings");
		Ok(settings)
	}

	/// Loads the file named by `UA2_SETTINGS`, or returns defaults.
	pub fn from_env() -> Result<Self> {
		match std::env::var_os(SETTINGS_ENV) {
			Some(path) => Self::load(Path::new(&path)),
			None => Ok(Self::default()),
		}
	}
}
