//! The locator strategy that produced an element.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Locator an element was found with, kept for diagnostics and re-query.
///
/// Serializes as `{"using": <strategy>, "value": <selector>}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "using", content = "value")]
pub enum By {
	#[serde(rename = "id")]
	Id(String),
	#[serde(rename = "accessibility id")]
	AccessibilityId(String),
	#[serde(rename = "class name")]
	ClassName(String),
	#[serde(rename = "xpath")]
	XPath(String),
	#[serde(rename = "-android uiautomator")]
	AndroidUiAutomator(String),
}

impl By {
	/// Strategy name as it appears on the wire.
	pub fn strategy(&self) -> &'static str {
		match self {
			By::Id(_) => "id",
			By::AccessibilityId(_) => "accessibility id",
			By::ClassName(_) => "class name",
			By::XPath(_) => "xpath",
			By::AndroidUiAutomator(_) => "-android uiautomator",
		}
	}

	pub fn value(&self) -> &str {
		match self {
			By::Id(v)
			| By::AccessibilityId(v)
			| By::ClassName(v)
			| By::XPath(v)
			| By::AndroidUiAutomator(v) => v,
		}
	}
}

impl fmt::Display for By {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "By.{}: {}", self.strategy(), self.value())
	}
}
