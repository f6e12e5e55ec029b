use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;
use ua2_protocol::{NodeInfo, SelectorDescriptor};

use super::{MemoryLiveHandle, MemoryReplayHandle, MemoryTree, NativeAction};
use crate::collaborator::{AccessibilityBridge, DeviceSearch};
use crate::error::{Error, Result};
use crate::handle::NativeHandle;

/// Device search and node bridge over a [`MemoryTree`].
#[derive(Clone)]
pub struct MemoryDevice {
	tree: Arc<MemoryTree>,
}

impl MemoryDevice {
	pub fn new(tree: Arc<MemoryTree>) -> Self {
		Self { tree }
	}

	pub fn tree(&self) -> &Arc<MemoryTree> {
		&self.tree
	}
}

#[async_trait]
impl DeviceSearch for MemoryDevice {
	async fn find_object(&self, selector: &SelectorDescriptor) -> Result<Option<NativeHandle>> {
		let found = match selector {
			SelectorDescriptor::Live(live) => self
				.tree
				.find_all(None, &live.criteria, live.max_depth)
				.first()
				.map(|id| NativeHandle::Live(self.tree.live(*id))),
			SelectorDescriptor::Replay(replay) => {
				let handle = self.tree.replay(replay.clone());
				handle.resolve().map(|_| NativeHandle::Replay(handle))
			}
		};
		trace!(kind = %selector.kind(), found = found.is_some(), "device search");
		self.tree.record(NativeAction::DeviceSearch {
			kind: selector.kind(),
			found: found.is_some(),
		});
		Ok(found)
	}
}

impl AccessibilityBridge for MemoryDevice {
	fn node_info(&self, handle: &NativeHandle) -> Result<NodeInfo> {
		let node = match handle {
			NativeHandle::Live(live) => live
				.downcast_ref::<MemoryLiveHandle>()
				.map(MemoryLiveHandle::node)
				.ok_or_else(|| foreign(&live.describe()))?,
			NativeHandle::Replay(replay) => {
				replay
					.downcast_ref::<MemoryReplayHandle>()
					.ok_or_else(|| foreign("replay handle"))?
					.resolved()?
			}
		};
		self.tree.node_info(node)
	}
}

fn foreign(what: &str) -> Error {
	Error::InvalidArgument(format!("{what} was not created by this hierarchy"))
}
