//! Node snapshots produced by the accessibility bridge.
//!
//! A [`NodeInfo`] is a point-in-time copy of a node's accessibility
//! properties. The tree behind it changes asynchronously, so a snapshot is
//! only meaningful for the call that produced it.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Boolean state exposed by every accessibility node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateFlag {
	Checkable,
	Checked,
	Clickable,
	Enabled,
	Focusable,
	Focused,
	LongClickable,
	Scrollable,
	Selected,
}

impl StateFlag {
	/// Every flag, in declaration order.
	pub const ALL: [StateFlag; 9] = [
		StateFlag::Checkable,
		StateFlag::Checked,
		StateFlag::Clickable,
		StateFlag::Enabled,
		StateFlag::Focusable,
		StateFlag::Focused,
		StateFlag::LongClickable,
		StateFlag::Scrollable,
		StateFlag::Selected,
	];

	pub fn name(&self) -> &'static str {
		match self {
			StateFlag::Checkable => "checkable",
			StateFlag::Checked => "checked",
			StateFlag::Clickable => "clickable",
			StateFlag::Enabled => "enabled",
			StateFlag::Focusable => "focusable",
			StateFlag::Focused => "focused",
			StateFlag::LongClickable => "longClickable",
			StateFlag::Scrollable => "scrollable",
			StateFlag::Selected => "selected",
		}
	}
}

/// The full set of [`StateFlag`] values of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeState {
	pub checkable: bool,
	pub checked: bool,
	pub clickable: bool,
	pub enabled: bool,
	pub focusable: bool,
	pub focused: bool,
	pub long_clickable: bool,
	pub scrollable: bool,
	pub selected: bool,
}

impl NodeState {
	pub fn get(&self, flag: StateFlag) -> bool {
		match flag {
			StateFlag::Checkable => self.checkable,
			StateFlag::Checked => self.checked,
			StateFlag::Clickable => self.clickable,
			StateFlag::Enabled => self.enabled,
			StateFlag::Focusable => self.focusable,
			StateFlag::Focused => self.focused,
			StateFlag::LongClickable => self.long_clickable,
			StateFlag::Scrollable => self.scrollable,
			StateFlag::Selected => self.selected,
		}
	}

	pub fn set(&mut self, flag: StateFlag, value: bool) {
		let slot = match flag {
			StateFlag::Checkable => &mut self.checkable,
			StateFlag::Checked => &mut self.checked,
			StateFlag::Clickable => &mut self.clickable,
			StateFlag::Enabled => &mut self.enabled,
			StateFlag::Focusable => &mut self.focusable,
			StateFlag::Focused => &mut self.focused,
			StateFlag::LongClickable => &mut self.long_clickable,
			StateFlag::Scrollable => &mut self.scrollable,
			StateFlag::Selected => &mut self.selected,
		};
		*slot = value;
	}

	/// Builder-style [`set`](Self::set).
	pub fn with(mut self, flag: StateFlag, value: bool) -> Self {
		self.set(flag, value);
		self
	}
}

/// Text selection of an editable node. `start <= end` always holds.
///
/// Deserialization goes through [`SelectionRange::from_raw`], so a backwards
/// pair is normalized and negative offsets are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelection")]
pub struct SelectionRange {
	start: i32,
	end: i32,
}

/// Selection offsets as they appear on the wire, before normalization.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawSelection {
	start: i32,
	end: i32,
}

impl TryFrom<RawSelection> for SelectionRange {
	type Error = String;

	fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
		Self::from_raw(raw.start, raw.end)
			.ok_or_else(|| format!("negative selection offsets [{}, {}]", raw.start, raw.end))
	}
}

/// A serialized selection with negative offsets means "no selection".
fn deserialize_selection<'de, D>(deserializer: D) -> Result<Option<SelectionRange>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let raw = Option::<RawSelection>::deserialize(deserializer)?;
	Ok(raw.and_then(|raw| SelectionRange::from_raw(raw.start, raw.end)))
}

impl SelectionRange {
	/// Builds a range from the raw selection offsets reported by the platform.
	///
	/// Negative offsets mean "no selection" and yield [`None`]. A backwards
	/// selection (anchor after focus) is normalized so that `start <= end`.
	pub fn from_raw(start: i32, end: i32) -> Option<Self> {
		if start < 0 || end < 0 {
			return None;
		}
		Some(Self {
			start: start.min(end),
			end: start.max(end),
		})
	}

	pub fn start(&self) -> i32 {
		self.start
	}

	pub fn end(&self) -> i32 {
		self.end
	}
}

/// Normalized, read-only snapshot of one accessibility node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeInfo {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content_desc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub resource_id: Option<String>,
	/// Package of the process that owns the window.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub package_name: Option<String>,
	pub bounds: Rect,
	pub visible: bool,
	pub password: bool,
	pub state: NodeState,
	#[serde(skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_selection")]
	pub selection: Option<SelectionRange>,
	/// Current value of a range widget (progress bar, seek bar).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub range_value: Option<f64>,
}

/// Scroll-aware size report returned for the `contentSize` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSize {
	pub width: i32,
	pub height: i32,
	pub top: i32,
	pub left: i32,
	pub scrollable_offset: i32,
	pub touch_padding: i32,
}

impl ContentSize {
	pub fn from_bounds(bounds: Rect, touch_padding: i32) -> Self {
		Self {
			width: bounds.width(),
			height: bounds.height(),
			top: bounds.top,
			left: bounds.left,
			scrollable_offset: 0,
			touch_padding,
		}
	}
}
