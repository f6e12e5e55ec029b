use std::sync::Arc;

use async_trait::async_trait;
use ua2_protocol::{LiveSelector, Point, Rect, ReplaySelector, StateFlag};

use super::{MemoryTree, NativeAction, NodeId};
use crate::error::{Error, Result};
use crate::handle::{LiveHandle, ReplayHandle};

/// [`LiveHandle`] pinned to one node of a [`MemoryTree`].
pub struct MemoryLiveHandle {
	tree: Arc<MemoryTree>,
	node: NodeId,
}

impl MemoryLiveHandle {
	pub(crate) fn new(tree: Arc<MemoryTree>, node: NodeId) -> Self {
		Self { tree, node }
	}

	pub fn node(&self) -> NodeId {
		self.node
	}
}

#[async_trait]
impl LiveHandle for MemoryLiveHandle {
	fn describe(&self) -> String {
		format!("live node {}", self.node.0)
	}

	async fn text(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.node)?.text)
	}

	async fn content_description(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.node)?.content_desc)
	}

	async fn class_name(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.node)?.class_name)
	}

	async fn resource_name(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.node)?.resource_id)
	}

	async fn state(&self, flag: StateFlag) -> Result<bool> {
		Ok(self.tree.node_info(self.node)?.state.get(flag))
	}

	async fn bounds(&self) -> Result<Rect> {
		Ok(self.tree.node_info(self.node)?.bounds)
	}

	async fn visible_center(&self) -> Result<Point> {
		Ok(self.tree.visible_bounds(self.node)?.center())
	}

	async fn clear(&self) -> Result<()> {
		self.tree.update(self.node, |info| info.text = None)?;
		self.tree.record(NativeAction::Clear { node: self.node });
		Ok(())
	}

	async fn find_object(&self, selector: &LiveSelector) -> Result<Option<Arc<dyn LiveHandle>>> {
		Ok(self.find_objects(selector).await?.into_iter().next())
	}

	async fn find_objects(&self, selector: &LiveSelector) -> Result<Vec<Arc<dyn LiveHandle>>> {
		// Searching from a removed node is a native failure, not an empty result.
		self.tree.node_info(self.node)?;
		Ok(self
			.tree
			.find_all(Some(self.node), &selector.criteria, selector.max_depth)
			.into_iter()
			.map(|id| self.tree.live(id) as Arc<dyn LiveHandle>)
			.collect())
	}

	async fn drag(&self, dest: Point, steps: u32) -> Result<()> {
		self.tree.node_info(self.node)?;
		self.tree.record(NativeAction::Drag {
			node: self.node,
			to: dest,
			steps,
		});
		Ok(())
	}
}

/// [`ReplayHandle`] that re-resolves its selector chain against a [`MemoryTree`].
#[derive(Clone)]
pub struct MemoryReplayHandle {
	tree: Arc<MemoryTree>,
	parent: Option<Arc<MemoryReplayHandle>>,
	selector: ReplaySelector,
}

impl MemoryReplayHandle {
	pub(crate) fn new(tree: Arc<MemoryTree>, selector: ReplaySelector) -> Self {
		Self {
			tree,
			parent: None,
			selector,
		}
	}

	/// Node the selector chain currently resolves to.
	pub fn resolve(&self) -> Option<NodeId> {
		let scope = match &self.parent {
			Some(parent) => Some(parent.resolve()?),
			None => None,
		};
		self.tree
			.find_all(scope, &self.selector.criteria, None)
			.get(self.selector.instance.unwrap_or(0))
			.copied()
	}

	pub(crate) fn resolved(&self) -> Result<NodeId> {
		self.resolve().ok_or_else(|| {
			Error::StaleHandle(format!("no node matches replay selector {:?}", self.selector))
		})
	}
}

#[async_trait]
impl ReplayHandle for MemoryReplayHandle {
	fn selector(&self) -> &ReplaySelector {
		&self.selector
	}

	fn child(&self, selector: &ReplaySelector) -> Arc<dyn ReplayHandle> {
		Arc::new(MemoryReplayHandle {
			tree: Arc::clone(&self.tree),
			parent: Some(Arc::new(self.clone())),
			selector: selector.clone(),
		})
	}

	async fn exists(&self) -> Result<bool> {
		Ok(self.resolve().is_some())
	}

	async fn text(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.resolved()?)?.text)
	}

	async fn content_description(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.resolved()?)?.content_desc)
	}

	async fn class_name(&self) -> Result<Option<String>> {
		Ok(self.tree.node_info(self.resolved()?)?.class_name)
	}

	async fn state(&self, flag: StateFlag) -> Result<bool> {
		Ok(self.tree.node_info(self.resolved()?)?.state.get(flag))
	}

	async fn bounds(&self) -> Result<Rect> {
		Ok(self.tree.node_info(self.resolved()?)?.bounds)
	}

	async fn clear_text_field(&self) -> Result<()> {
		let node = self.resolved()?;
		self.tree.update(node, |info| info.text = None)?;
		self.tree.record(NativeAction::Clear { node });
		Ok(())
	}

	async fn drag_to(&self, dest: Point, steps: u32) -> Result<bool> {
		let node = self.resolved()?;
		self.tree.record(NativeAction::Drag { node, to: dest, steps });
		Ok(true)
	}
}
