//! In-memory accessibility hierarchy.
//!
//! [`MemoryTree`] holds a mutable node tree (usually loaded from a JSON
//! hierarchy dump) and hands out handles of both native kinds over it:
//!
//! - [`MemoryLiveHandle`] pins one node.
//! - [`MemoryReplayHandle`] re-runs its selector chain on every call.
//!
//! [`MemoryDevice`] implements [`DeviceSearch`](crate::DeviceSearch) and
//! [`AccessibilityBridge`](crate::AccessibilityBridge) over the same tree.
//! Every gesture, text clear and device search is recorded as a
//! [`NativeAction`] for later assertion.
//!
//! Searches walk the tree depth-first in pre-order; when several nodes match,
//! the first one visited wins.
//!
//! # Example
//!
//! ```ignore
//! use ua2_runtime::memory::{MemoryTree, NodeSpec};
//!
//! let tree = MemoryTree::new(
//!     NodeSpec::new("android.widget.FrameLayout")
//!         .bounds(Rect::new(0, 0, 1080, 1920))
//!         .child(NodeSpec::new("android.widget.Button").text("OK")),
//! );
//! let button = tree.find_first(&NodeCriteria::new().text("OK")).unwrap();
//! let handle = tree.live(button);
//! ```

mod device;
mod handles;
mod matcher;
#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use ua2_protocol::{NodeCriteria, NodeInfo, NodeState, Point, Rect, SelectionRange, SelectorKind};

pub use device::MemoryDevice;
pub use handles::{MemoryLiveHandle, MemoryReplayHandle};

use crate::error::{Error, Result};

/// Index of a node inside a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Native call recorded by a [`MemoryTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeAction {
	/// A drag gesture was issued from `node` to `to`.
	Drag { node: NodeId, to: Point, steps: u32 },
	/// Text of `node` was cleared.
	Clear { node: NodeId },
	/// A top-level device search was performed.
	DeviceSearch { kind: SelectorKind, found: bool },
}

/// One node of a hierarchy dump, with its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub class_name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content_desc: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub resource_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub package_name: Option<String>,
	#[serde(default)]
	pub bounds: Rect,
	#[serde(default = "default_visible")]
	pub visible: bool,
	#[serde(default)]
	pub password: bool,
	#[serde(default)]
	pub state: NodeState,
	/// Raw `[start, end]` selection offsets; negative means no selection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub selection: Option<[i32; 2]>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub range_value: Option<f64>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<NodeSpec>,
}

fn default_visible() -> bool {
	true
}

impl NodeSpec {
	/// Creates a visible, enabled node of the given class.
	pub fn new(class_name: impl Into<String>) -> Self {
		Self {
			class_name: Some(class_name.into()),
			text: None,
			content_desc: None,
			resource_id: None,
			package_name: None,
			bounds: Rect::default(),
			visible: true,
			password: false,
			state: NodeState {
				enabled: true,
				..NodeState::default()
			},
			selection: None,
			range_value: None,
			children: Vec::new(),
		}
	}

	pub fn text(mut self, value: impl Into<String>) -> Self {
		self.text = Some(value.into());
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

	pub fn bounds(mut self, value: Rect) -> Self {
		self.bounds = value;
		self
	}

	pub fn visible(mut self, value: bool) -> Self {
		self.visible = value;
		self
	}

	pub fn password(mut self, value: bool) -> Self {
		self.password = value;
		self
	}

	pub fn state(mut self, state: NodeState) -> Self {
		self.state = state;
		self
	}

	pub fn selection(mut self, start: i32, end: i32) -> Self {
		self.selection = Some([start, end]);
		self
	}

	pub fn range_value(mut self, value: f64) -> Self {
		self.range_value = Some(value);
		self
	}

	pub fn child(mut self, child: NodeSpec) -> Self {
		self.children.push(child);
		self
	}

	fn to_info(&self, inherited_package: Option<&str>) -> NodeInfo {
		NodeInfo {
			class_name: self.class_name.clone(),
			text: self.text.clone(),
			content_desc: self.content_desc.clone(),
			resource_id: self.resource_id.clone(),
			package_name: self
				.package_name
				.clone()
				.or_else(|| inherited_package.map(str::to_string)),
			bounds: self.bounds,
			visible: self.visible,
			password: self.password,
			state: self.state,
			selection: self.selection.and_then(|[start, end]| SelectionRange::from_raw(start, end)),
			range_value: self.range_value,
		}
	}
}

struct Slot {
	info: NodeInfo,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
	detached: bool,
}

/// Mutable accessibility tree shared by every handle created from it.
pub struct MemoryTree {
	slots: RwLock<Vec<Slot>>,
	actions: Mutex<Vec<NativeAction>>,
}

impl MemoryTree {
	/// Builds a tree rooted at `root`. Children inherit their parent's package.
	pub fn new(root: NodeSpec) -> Arc<Self> {
		let mut slots = Vec::new();
		push_spec(&mut slots, &root, None);
		Arc::new(Self {
			slots: RwLock::new(slots),
			actions: Mutex::new(Vec::new()),
		})
	}

	/// Parses a JSON hierarchy dump.
	pub fn from_json(json: &str) -> Result<Arc<Self>> {
		let root: NodeSpec = serde_json::from_str(json)?;
		Ok(Self::new(root))
	}

	/// Reads a JSON hierarchy dump from disk.
	pub fn load(path: &Path) -> Result<Arc<Self>> {
		let json = std::fs::read_to_string(path)?;
		Self::from_json(&json)
	}

	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// Resolves a path of child indices starting at the root.
	pub fn node_at(&self, path: &[usize]) -> Option<NodeId> {
		let slots = self.slots.read();
		let mut current = NodeId(0);
		for &index in path {
			current = *slots.get(current.0)?.children.get(index)?;
		}
		(!slots[current.0].detached).then_some(current)
	}

	/// Snapshot of `id`, or [`Error::StaleHandle`] if it was removed.
	pub fn node_info(&self, id: NodeId) -> Result<NodeInfo> {
		let slots = self.slots.read();
		match slots.get(id.0) {
			Some(slot) if !slot.detached => Ok(slot.info.clone()),
			_ => Err(stale(id)),
		}
	}

	/// Bounds of `id` clipped by every ancestor.
	pub fn visible_bounds(&self, id: NodeId) -> Result<Rect> {
		let slots = self.slots.read();
		let slot = slots.get(id.0).filter(|s| !s.detached).ok_or_else(|| stale(id))?;
		let mut visible = slot.info.bounds;
		let mut parent = slot.parent;
		while let Some(p) = parent {
			let ancestor = &slots[p.0];
			visible = match visible.intersect(&ancestor.info.bounds) {
				Some(rect) => rect,
				None => return Ok(Rect::new(visible.left, visible.top, visible.left, visible.top)),
			};
			parent = ancestor.parent;
		}
		Ok(visible)
	}

	/// First node in the whole tree matching `criteria`.
	pub fn find_first(&self, criteria: &NodeCriteria) -> Option<NodeId> {
		self.find_all(None, criteria, None).into_iter().next()
	}

	/// Nodes matching `criteria` in pre-order.
	///
	/// With a `scope`, only strict descendants of the scope are considered and
	/// `max_depth` limits how far below it the search goes. Without a scope the
	/// root itself is a candidate.
	pub fn find_all(
		&self,
		scope: Option<NodeId>,
		criteria: &NodeCriteria,
		max_depth: Option<u32>,
	) -> Vec<NodeId> {
		let slots = self.slots.read();
		let mut stack: Vec<(NodeId, u32)> = match scope {
			Some(id) => match slots.get(id.0) {
				Some(slot) if !slot.detached => slot.children.iter().rev().map(|c| (*c, 1)).collect(),
				_ => return Vec::new(),
			},
			None => vec![(NodeId(0), 0)],
		};

		let mut found = Vec::new();
		while let Some((id, depth)) = stack.pop() {
			let slot = &slots[id.0];
			if slot.detached {
				continue;
			}
			if matcher::matches(criteria, &slot.info) {
				found.push(id);
			}
			if max_depth.is_none_or(|max| depth < max) {
				stack.extend(slot.children.iter().rev().map(|c| (*c, depth + 1)));
			}
		}
		found
	}

	/// Applies `update` to the node's properties.
	pub fn update(&self, id: NodeId, update: impl FnOnce(&mut NodeInfo)) -> Result<()> {
		let mut slots = self.slots.write();
		match slots.get_mut(id.0) {
			Some(slot) if !slot.detached => {
				update(&mut slot.info);
				Ok(())
			}
			_ => Err(stale(id)),
		}
	}

	/// Removes `id` and its subtree. Handles pinned to them become stale.
	pub fn remove(&self, id: NodeId) {
		let mut slots = self.slots.write();
		let mut pending = vec![id];
		while let Some(current) = pending.pop() {
			if let Some(slot) = slots.get_mut(current.0) {
				slot.detached = true;
				pending.extend(slot.children.iter().copied());
			}
		}
	}

	/// Live-view handle pinned to `id`.
	pub fn live(self: &Arc<Self>, id: NodeId) -> Arc<MemoryLiveHandle> {
		Arc::new(MemoryLiveHandle::new(Arc::clone(self), id))
	}

	/// Top-level selector-replay handle.
	pub fn replay(self: &Arc<Self>, selector: ua2_protocol::ReplaySelector) -> Arc<MemoryReplayHandle> {
		Arc::new(MemoryReplayHandle::new(Arc::clone(self), selector))
	}

	/// Returns all recorded actions.
	pub fn actions(&self) -> Vec<NativeAction> {
		self.actions.lock().clone()
	}

	/// Returns only the recorded drag gestures.
	pub fn drags(&self) -> Vec<NativeAction> {
		self.actions
			.lock()
			.iter()
			.filter(|a| matches!(a, NativeAction::Drag { .. }))
			.cloned()
			.collect()
	}

	pub fn clear_actions(&self) {
		self.actions.lock().clear();
	}

	pub(crate) fn record(&self, action: NativeAction) {
		self.actions.lock().push(action);
	}
}

fn push_spec(slots: &mut Vec<Slot>, spec: &NodeSpec, parent: Option<NodeId>) -> NodeId {
	let inherited = parent.and_then(|p| slots[p.0].info.package_name.clone());
	let id = NodeId(slots.len());
	slots.push(Slot {
		info: spec.to_info(inherited.as_deref()),
		parent,
		children: Vec::new(),
		detached: false,
	});
	for child in &spec.children {
		let child_id = push_spec(slots, child, Some(id));
		slots[id.0].children.push(child_id);
	}
	id
}

pub(crate) fn stale(id: NodeId) -> Error {
	Error::StaleHandle(format!("node {} is no longer attached to the hierarchy", id.0))
}
