//! Selector descriptors for the two native search APIs.
//!
//! The platform exposes two search entry points that do not understand each
//! other's queries:
//!
//! - [`LiveSelector`] is evaluated by a live-view handle against its subtree.
//! - [`ReplaySelector`] is replayed against the current tree every time the
//!   resulting handle is used, and supports `instance` addressing.
//!
//! [`SelectorDescriptor`] tags a query with the kind it targets so callers can
//! route it without inspecting the payload.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::node::StateFlag;

/// Which native search API a selector targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
	Live,
	Replay,
}

impl fmt::Display for SelectorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			SelectorKind::Live => "live",
			SelectorKind::Replay => "replay",
		})
	}
}

/// Node predicates shared by both selector kinds. Unset fields match anything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeCriteria {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text_contains: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content_desc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub resource_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub package_name: Option<String>,
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub state: BTreeMap<StateFlag, bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bounds: Option<Rect>,
}

impl NodeCriteria {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn class_name(mut self, value: impl Into<String>) -> Self {
		self.class_name = Some(value.into());
		self
	}

	pub fn text(mut self, value: impl Into<String>) -> Self {
		self.text = Some(value.into());
		self
	}

	pub fn text_contains(mut self, value: impl Into<String>) -> Self {
		self.text_contains = Some(value.into());
		self
	}

	pub fn content_desc(mut self, value: impl Into<String>) -> Self {
		self.content_desc = Some(value.into());
		self
	}

	pub fn resource_id(mut self, value: impl Into<String>) -> Self {
		self.resource_id = Some(value.into());
		self
	}

	pub fn package_name(mut self, value: impl Into<String>) -> Self {
		self.package_name = Some(value.into());
		self
	}

	pub fn state(mut self, flag: StateFlag, value: bool) -> Self {
		self.state.insert(flag, value);
		self
	}

	pub fn bounds(mut self, value: Rect) -> Self {
		self.bounds = Some(value);
		self
	}

	/// Returns `true` when no predicate is set.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// Query understood by a live-view handle's subtree search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSelector {
	#[serde(flatten)]
	pub criteria: NodeCriteria,
	/// Maximum depth below the searching node, `None` for unlimited.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_depth: Option<u32>,
}

impl LiveSelector {
	pub fn new(criteria: NodeCriteria) -> Self {
		Self {
			criteria,
			max_depth: None,
		}
	}

	pub fn max_depth(mut self, depth: u32) -> Self {
		self.max_depth = Some(depth);
		self
	}
}

/// Query replayed against the tree each time the resulting handle is used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaySelector {
	#[serde(flatten)]
	pub criteria: NodeCriteria,
	/// Zero-based index among all matches, in traversal order.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub instance: Option<usize>,
}

impl ReplaySelector {
	pub fn new(criteria: NodeCriteria) -> Self {
		Self {
			criteria,
			instance: None,
		}
	}

	/// Returns a copy addressing the `n`-th match.
	pub fn instance(&self, n: usize) -> Self {
		Self {
			criteria: self.criteria.clone(),
			instance: Some(n),
		}
	}
}

/// A search request tagged with the native API that understands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorDescriptor {
	Live(LiveSelector),
	Replay(ReplaySelector),
}

impl SelectorDescriptor {
	pub fn kind(&self) -> SelectorKind {
		match self {
			SelectorDescriptor::Live(_) => SelectorKind::Live,
			SelectorDescriptor::Replay(_) => SelectorKind::Replay,
		}
	}

	pub fn criteria(&self) -> &NodeCriteria {
		match self {
			SelectorDescriptor::Live(s) => &s.criteria,
			SelectorDescriptor::Replay(s) => &s.criteria,
		}
	}
}

impl From<LiveSelector> for SelectorDescriptor {
	fn from(selector: LiveSelector) -> Self {
		SelectorDescriptor::Live(selector)
	}
}

impl From<ReplaySelector> for SelectorDescriptor {
	fn from(selector: ReplaySelector) -> Self {
		SelectorDescriptor::Replay(selector)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn descriptor_is_externally_tagged_by_kind() {
		let descriptor: SelectorDescriptor = serde_json::from_str(
			r#"{"replay":{"className":"android.widget.TextView","instance":2,"state":{"enabled":true}}}"#,
		)
		.unwrap();
		assert_eq!(descriptor.kind(), SelectorKind::Replay);
		let SelectorDescriptor::Replay(selector) = descriptor else {
			panic!("expected replay selector");
		};
		assert_eq!(selector.instance, Some(2));
		assert_eq!(selector.criteria.state.get(&StateFlag::Enabled), Some(&true));
	}

	#[test]
	fn instance_keeps_criteria() {
		let selector = ReplaySelector::new(NodeCriteria::new().text("OK"));
		let third = selector.instance(3);
		assert_eq!(third.criteria, selector.criteria);
		assert_eq!(third.instance, Some(3));
		assert_eq!(selector.instance, None);
	}

	#[test]
	fn empty_criteria() {
		assert!(NodeCriteria::new().is_empty());
		assert!(!NodeCriteria::new().resource_id("id/ok").is_empty());
	}
}
