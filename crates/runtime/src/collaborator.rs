//! Services the element layer consumes but does not implement.
//!
//! Elements receive these as trait objects so that tests and offline tools
//! can substitute their own backends.

use async_trait::async_trait;
use ua2_protocol::{LiveSelector, NodeInfo, Point, ReplaySelector, SelectorDescriptor};

use crate::error::Result;
use crate::handle::NativeHandle;

/// Converts a native handle of either kind into a [`NodeInfo`] snapshot.
///
/// Must not fail for a handle whose node still exists. The snapshot is never
/// cached by callers.
pub trait AccessibilityBridge: Send + Sync {
	fn node_info(&self, handle: &NativeHandle) -> Result<NodeInfo>;
}

/// Device-wide search from the top of the tree.
#[async_trait]
pub trait DeviceSearch: Send + Sync {
	/// Returns the first node matching `selector`, or [`None`].
	///
	/// The returned handle kind follows the selector kind, but callers must
	/// not rely on it.
	async fn find_object(&self, selector: &SelectorDescriptor) -> Result<Option<NativeHandle>>;
}

/// Builds selectors that re-locate a node from its snapshot.
///
/// Uniqueness is best effort: several nodes may share every synthesized
/// property, in which case the device search decides which one is found.
pub trait SelectorSynthesis: Send + Sync {
	fn to_replay_selector(&self, node: &NodeInfo) -> ReplaySelector;

	fn to_live_selector(&self, node: &NodeInfo) -> LiveSelector;
}

/// Maps logical (reported) coordinates to device-absolute pixels.
pub trait CoordinateMapper: Send + Sync {
	fn to_device_absolute(&self, point: Point) -> Result<Point>;
}
