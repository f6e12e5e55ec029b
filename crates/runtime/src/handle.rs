//! Native handle contracts.
//!
//! The platform hands out two kinds of element handles that cannot stand in
//! for each other:
//!
//! - [`LiveHandle`] points at a concrete node. It answers attribute queries
//!   and gestures directly but only accepts [`LiveSelector`] for descendant
//!   search.
//! - [`ReplayHandle`] is a selector that gets replayed against the current
//!   tree on every call. It accepts [`ReplaySelector`] for descendant search
//!   but has no resource-name or visible-center accessors.
//!
//! Both traits are object safe and downcastable so that backends (such as the
//! accessibility bridge) can recover their concrete handle type.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use downcast_rs::{DowncastSync, impl_downcast};
use ua2_protocol::{LiveSelector, Point, Rect, ReplaySelector, SelectorKind, StateFlag};

use crate::error::Result;

/// Handle to a node in the live view hierarchy.
#[async_trait]
pub trait LiveHandle: DowncastSync {
	/// Short description used in logs.
	fn describe(&self) -> String;

	async fn text(&self) -> Result<Option<String>>;

	async fn content_description(&self) -> Result<Option<String>>;

	async fn class_name(&self) -> Result<Option<String>>;

	/// Fully qualified view id, e.g. `com.example:id/submit`.
	async fn resource_name(&self) -> Result<Option<String>>;

	async fn state(&self, flag: StateFlag) -> Result<bool>;

	async fn bounds(&self) -> Result<Rect>;

	/// Center of the part of the node not clipped by its ancestors.
	async fn visible_center(&self) -> Result<Point>;

	async fn clear(&self) -> Result<()>;

	/// First descendant matching `selector`, in traversal order.
	async fn find_object(&self, selector: &LiveSelector) -> Result<Option<Arc<dyn LiveHandle>>>;

	/// Every descendant matching `selector`, in traversal order.
	async fn find_objects(&self, selector: &LiveSelector) -> Result<Vec<Arc<dyn LiveHandle>>>;

	/// Drags this node to `dest` in device-absolute pixels.
	async fn drag(&self, dest: Point, steps: u32) -> Result<()>;
}

impl_downcast!(sync LiveHandle);

/// Handle re-resolved from a selector description on every call.
#[async_trait]
pub trait ReplayHandle: DowncastSync {
	/// The selector this handle replays.
	fn selector(&self) -> &ReplaySelector;

	/// Builds a descendant handle. Nothing is resolved until the child is used.
	fn child(&self, selector: &ReplaySelector) -> Arc<dyn ReplayHandle>;

	/// Returns `true` if the selector currently resolves to a node.
	async fn exists(&self) -> Result<bool>;

	async fn text(&self) -> Result<Option<String>>;

	async fn content_description(&self) -> Result<Option<String>>;

	async fn class_name(&self) -> Result<Option<String>>;

	async fn state(&self, flag: StateFlag) -> Result<bool>;

	async fn bounds(&self) -> Result<Rect>;

	async fn clear_text_field(&self) -> Result<()>;

	/// Drags the resolved node to `dest`. Returns the platform's success flag.
	async fn drag_to(&self, dest: Point, steps: u32) -> Result<bool>;
}

impl_downcast!(sync ReplayHandle);

/// A native handle of either kind.
#[derive(Clone)]
pub enum NativeHandle {
	Live(Arc<dyn LiveHandle>),
	Replay(Arc<dyn ReplayHandle>),
}

impl NativeHandle {
	/// The selector kind this handle's search API understands.
	pub fn kind(&self) -> SelectorKind {
		match self {
			NativeHandle::Live(_) => SelectorKind::Live,
			NativeHandle::Replay(_) => SelectorKind::Replay,
		}
	}

	pub fn as_live(&self) -> Option<&Arc<dyn LiveHandle>> {
		match self {
			NativeHandle::Live(handle) => Some(handle),
			NativeHandle::Replay(_) => None,
		}
	}

	pub fn as_replay(&self) -> Option<&Arc<dyn ReplayHandle>> {
		match self {
			NativeHandle::Replay(handle) => Some(handle),
			NativeHandle::Live(_) => None,
		}
	}
}

impl fmt::Debug for NativeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NativeHandle::Live(handle) => f.debug_tuple("Live").field(&handle.describe()).finish(),
			NativeHandle::Replay(handle) => f.debug_tuple("Replay").field(handle.selector()).finish(),
		}
	}
}
