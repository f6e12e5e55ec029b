//! Attribute registry.
//!
//! [`AttributeKind`] is the closed set of names accepted by
//! [`AndroidElement::get_attribute`](crate::AndroidElement::get_attribute).
//! Names are parsed before any native call, so an unknown name never touches
//! the device. Each element variant maps every kind to an
//! [`AttributeValue`] with an exhaustive `match`.

use std::fmt;
use std::str::FromStr;

use ua2_protocol::{ContentSize, Rect, SelectionRange};

use crate::{Error, Result};

/// Queryable element attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
	Text,
	ContentDesc,
	Class,
	ResourceId,
	ContentSize,
	Enabled,
	Checkable,
	Checked,
	Clickable,
	Focusable,
	Focused,
	LongClickable,
	Scrollable,
	Selected,
	Displayed,
	Password,
	Bounds,
	Package,
	SelectionStart,
	SelectionEnd,
}

impl AttributeKind {
	pub const ALL: [AttributeKind; 20] = [
		AttributeKind::Text,
		AttributeKind::ContentDesc,
		AttributeKind::Class,
		AttributeKind::ResourceId,
		AttributeKind::ContentSize,
		AttributeKind::Enabled,
		AttributeKind::Checkable,
		AttributeKind::Checked,
		AttributeKind::Clickable,
		AttributeKind::Focusable,
		AttributeKind::Focused,
		AttributeKind::LongClickable,
		AttributeKind::Scrollable,
		AttributeKind::Selected,
		AttributeKind::Displayed,
		AttributeKind::Password,
		AttributeKind::Bounds,
		AttributeKind::Package,
		AttributeKind::SelectionStart,
		AttributeKind::SelectionEnd,
	];

	/// Canonical attribute name.
	pub fn name(&self) -> &'static str {
		match self {
			AttributeKind::Text => "text",
			AttributeKind::ContentDesc => "content-desc",
			AttributeKind::Class => "class",
			AttributeKind::ResourceId => "resource-id",
			AttributeKind::ContentSize => "contentSize",
			AttributeKind::Enabled => "enabled",
			AttributeKind::Checkable => "checkable",
			AttributeKind::Checked => "checked",
			AttributeKind::Clickable => "clickable",
			AttributeKind::Focusable => "focusable",
			AttributeKind::Focused => "focused",
			AttributeKind::LongClickable => "long-clickable",
			AttributeKind::Scrollable => "scrollable",
			AttributeKind::Selected => "selected",
			AttributeKind::Displayed => "displayed",
			AttributeKind::Password => "password",
			AttributeKind::Bounds => "bounds",
			AttributeKind::Package => "package",
			AttributeKind::SelectionStart => "selection-start",
			AttributeKind::SelectionEnd => "selection-end",
		}
	}

	/// Alternative spellings accepted by [`FromStr`].
	fn aliases(&self) -> &'static [&'static str] {
		match self {
			AttributeKind::Text => &["name"],
			AttributeKind::ContentDesc => &["contentDescription"],
			AttributeKind::Class => &["className"],
			AttributeKind::ResourceId => &["resourceId"],
			AttributeKind::ContentSize => &["content-size"],
			AttributeKind::LongClickable => &["longClickable"],
			AttributeKind::Package => &["packageName"],
			AttributeKind::SelectionStart => &["selectionStart"],
			AttributeKind::SelectionEnd => &["selectionEnd"],
			_ => &[],
		}
	}

	/// Canonical names of every kind, in registry order.
	pub fn supported_names() -> Vec<&'static str> {
		Self::ALL.iter().map(AttributeKind::name).collect()
	}
}

impl fmt::Display for AttributeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

fn normalize(name: &str) -> String {
	name.trim().to_ascii_lowercase().replace('_', "-")
}

impl FromStr for AttributeKind {
	type Err = Error;

	/// Case-insensitive; `_` and `-` are interchangeable.
	fn from_str(name: &str) -> Result<Self> {
		let wanted = normalize(name);
		Self::ALL
			.into_iter()
			.find(|kind| {
				normalize(kind.name()) == wanted || kind.aliases().iter().any(|alias| normalize(alias) == wanted)
			})
			.ok_or_else(|| Error::UnsupportedAttribute {
				name: name.to_string(),
				supported: Self::supported_names(),
			})
	}
}

/// Raw result of one attribute extraction, before string serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
	/// The node has no value for this attribute.
	Absent,
	Text(String),
	Flag(bool),
	Number(i32),
	Bounds(Rect),
	ContentSize(ContentSize),
}

impl AttributeValue {
	/// Wraps an optional string, mapping [`None`] to [`AttributeValue::Absent`].
	pub fn text(value: Option<String>) -> Self {
		value.map_or(AttributeValue::Absent, AttributeValue::Text)
	}

	/// Canonical string form. [`AttributeValue::Absent`] becomes [`None`].
	pub fn into_string(self) -> Result<Option<String>> {
		Ok(match self {
			AttributeValue::Absent => None,
			AttributeValue::Text(text) => Some(text),
			AttributeValue::Flag(flag) => Some(flag.to_string()),
			AttributeValue::Number(n) => Some(n.to_string()),
			AttributeValue::Bounds(rect) => Some(rect.to_short_string()),
			AttributeValue::ContentSize(size) => Some(serde_json::to_string(&size)?),
		})
	}
}

/// Projects one bound of a selection range.
///
/// Only [`AttributeKind::SelectionEnd`] selects the upper bound; any other
/// kind reads the lower one.
pub(crate) fn selection_bound(selection: Option<SelectionRange>, kind: AttributeKind) -> AttributeValue {
	match selection {
		None => AttributeValue::Absent,
		Some(range) if kind == AttributeKind::SelectionEnd => AttributeValue::Number(range.end()),
		Some(range) => AttributeValue::Number(range.start()),
	}
}

/// TEXT of a node: the current value of a range widget, else its text.
pub(crate) fn text_value(text: Option<String>, range_value: Option<f64>) -> AttributeValue {
	match range_value {
		Some(value) => AttributeValue::Text(format!("{value:?}")),
		None => AttributeValue::text(text),
	}
}
