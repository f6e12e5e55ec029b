use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use ua2_protocol::{By, ContentSize, NodeInfo, Point, ReplaySelector, SelectorDescriptor, StateFlag};
use ua2_runtime::{NativeHandle, ReplayHandle};

use super::{AndroidElement, Element, ElementOrigin, LiveViewElement};
use crate::attribute::{self, AttributeKind, AttributeValue};
use crate::context::ElementContext;
use crate::drag::{self, DragTarget};
use crate::{Result, resolver};

/// Element backed by a [`ReplayHandle`].
///
/// The handle has no resource-name accessor, so resource id joins the
/// attributes read from the accessibility bridge. Live selectors are answered
/// by re-locating this node as a live handle.
#[derive(Clone)]
pub struct SelectorReplayElement {
	handle: Arc<dyn ReplayHandle>,
	origin: ElementOrigin,
	id: Option<String>,
	ctx: Arc<ElementContext>,
}

impl SelectorReplayElement {
	pub fn new(handle: Arc<dyn ReplayHandle>, origin: ElementOrigin, ctx: Arc<ElementContext>) -> Self {
		Self {
			handle,
			origin,
			id: None,
			ctx,
		}
	}

	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	pub fn handle(&self) -> &Arc<dyn ReplayHandle> {
		&self.handle
	}

	fn node_info(&self) -> Result<NodeInfo> {
		self.ctx.bridge().node_info(&self.native())
	}

	async fn flag(&self, flag: StateFlag) -> Result<AttributeValue> {
		Ok(AttributeValue::Flag(self.handle.state(flag).await?))
	}

	/// Child handle for `selector`, if it currently resolves.
	async fn existing_child(&self, selector: &ReplaySelector) -> Result<Option<Arc<dyn ReplayHandle>>> {
		let child = self.handle.child(selector);
		let exists = child.exists().await?;
		Ok(exists.then_some(child))
	}

	fn wrap(&self, handle: Arc<dyn ReplayHandle>, origin: ElementOrigin) -> Element {
		Element::Replay(SelectorReplayElement::new(handle, origin, Arc::clone(&self.ctx)))
	}

	async fn as_live(&self) -> Option<LiveViewElement> {
		let handle = resolver::relocate_as_live(&self.ctx, &self.native()).await?;
		Some(LiveViewElement::new(handle, self.origin.clone(), Arc::clone(&self.ctx)))
	}

	async fn drag_native(&self, dest: Point, steps: u32) -> Result<bool> {
		debug!(selector = ?self.handle.selector(), %dest, steps, "drag");
		self.handle.drag_to(dest, steps).await
	}
}

#[async_trait]
impl AndroidElement for SelectorReplayElement {
	fn origin(&self) -> &ElementOrigin {
		&self.origin
	}

	fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	fn native(&self) -> NativeHandle {
		NativeHandle::Replay(Arc::clone(&self.handle))
	}

	async fn name(&self) -> Result<Option<String>> {
		self.handle.content_description().await
	}

	async fn content_desc(&self) -> Result<Option<String>> {
		self.handle.content_description().await
	}

	async fn attribute_value(&self, kind: AttributeKind) -> Result<AttributeValue> {
		Ok(match kind {
			AttributeKind::Text => {
				let text = self.handle.text().await?;
				attribute::text_value(text, self.node_info()?.range_value)
			}
			AttributeKind::ContentDesc => AttributeValue::text(self.handle.content_description().await?),
			AttributeKind::Class => AttributeValue::text(self.handle.class_name().await?),
			AttributeKind::ResourceId => AttributeValue::text(self.node_info()?.resource_id),
			AttributeKind::ContentSize => AttributeValue::ContentSize(ContentSize::from_bounds(
				self.handle.bounds().await?,
				self.ctx.settings().touch_padding,
			)),
			AttributeKind::Enabled => self.flag(StateFlag::Enabled).await?,
			AttributeKind::Checkable => self.flag(StateFlag::Checkable).await?,
			AttributeKind::Checked => self.flag(StateFlag::Checked).await?,
			AttributeKind::Clickable => self.flag(StateFlag::Clickable).await?,
			AttributeKind::Focusable => self.flag(StateFlag::Focusable).await?,
			AttributeKind::Focused => self.flag(StateFlag::Focused).await?,
			AttributeKind::LongClickable => self.flag(StateFlag::LongClickable).await?,
			AttributeKind::Scrollable => self.flag(StateFlag::Scrollable).await?,
			AttributeKind::Selected => self.flag(StateFlag::Selected).await?,
			AttributeKind::Displayed => AttributeValue::Flag(self.node_info()?.visible),
			AttributeKind::Password => AttributeValue::Flag(self.node_info()?.password),
			AttributeKind::Bounds => AttributeValue::Bounds(self.handle.bounds().await?),
			AttributeKind::Package => AttributeValue::text(self.node_info()?.package_name),
			AttributeKind::SelectionStart | AttributeKind::SelectionEnd => {
				attribute::selection_bound(self.node_info()?.selection, kind)
			}
		})
	}

	async fn clear(&self) -> Result<()> {
		self.handle.clear_text_field().await
	}

	async fn get_child(&self, selector: &SelectorDescriptor) -> Result<Option<Element>> {
		match selector {
			SelectorDescriptor::Replay(replay) => Ok(self
				.existing_child(replay)
				.await?
				.map(|child| self.wrap(child, self.origin.single_child()))),
			SelectorDescriptor::Live(_) => match self.as_live().await {
				Some(anchor) => anchor.get_child(selector).await,
				None => Ok(None),
			},
		}
	}

	/// Replay children are collected by enumerating `instance(0..)` until a
	/// child stops resolving, capped by `maxChildInstances`. A selector that
	/// already pins an instance yields at most that one child.
	async fn get_children(&self, selector: &SelectorDescriptor, by: &By) -> Result<Vec<Element>> {
		let replay = match selector {
			SelectorDescriptor::Replay(replay) => replay,
			SelectorDescriptor::Live(_) => {
				return match self.as_live().await {
					Some(anchor) => anchor.get_children(selector, by).await,
					None => Ok(Vec::new()),
				};
			}
		};

		if replay.instance.is_some() {
			return Ok(self
				.existing_child(replay)
				.await?
				.map(|child| self.wrap(child, self.origin.multi_child(by)))
				.into_iter()
				.collect());
		}

		let mut children = Vec::new();
		for instance in 0..self.ctx.settings().max_child_instances {
			match self.existing_child(&replay.instance(instance)).await? {
				Some(child) => children.push(self.wrap(child, self.origin.multi_child(by))),
				None => break,
			}
		}
		Ok(children)
	}

	async fn drag_to(&self, target: &DragTarget, steps: u32) -> Result<bool> {
		match drag::destination(target).await? {
			Some(dest) => self.drag_native(dest, steps).await,
			None => Ok(false),
		}
	}

	async fn drag_to_point(&self, x: i32, y: i32, steps: u32) -> Result<bool> {
		let dest = self.ctx.coordinates().to_device_absolute(Point::new(x, y))?;
		self.drag_native(dest, steps).await
	}
}
