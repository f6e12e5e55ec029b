use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use ua2_protocol::{By, ContentSize, NodeInfo, Point, SelectorDescriptor, StateFlag};
use ua2_runtime::{LiveHandle, NativeHandle};

use super::{AndroidElement, Element, ElementOrigin, SelectorReplayElement};
use crate::attribute::{self, AttributeKind, AttributeValue};
use crate::context::ElementContext;
use crate::drag::{self, DragTarget};
use crate::{Result, resolver};

/// Element backed by a [`LiveHandle`].
///
/// Attributes come straight from the handle; visibility, password, package,
/// selection and range values come from the accessibility bridge. Replay
/// selectors are answered by re-locating this node as a replay handle.
#[derive(Clone)]
pub struct LiveViewElement {
	handle: Arc<dyn LiveHandle>,
	origin: ElementOrigin,
	id: Option<String>,
	ctx: Arc<ElementContext>,
}

impl LiveViewElement {
	pub fn new(handle: Arc<dyn LiveHandle>, origin: ElementOrigin, ctx: Arc<ElementContext>) -> Self {
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

	pub fn handle(&self) -> &Arc<dyn LiveHandle> {
		&self.handle
	}

	fn node_info(&self) -> Result<NodeInfo> {
		self.ctx.bridge().node_info(&self.native())
	}

	async fn flag(&self, flag: StateFlag) -> Result<AttributeValue> {
		Ok(AttributeValue::Flag(self.handle.state(flag).await?))
	}

	fn wrap(&self, handle: Arc<dyn LiveHandle>, origin: ElementOrigin) -> Element {
		Element::Live(LiveViewElement::new(handle, origin, Arc::clone(&self.ctx)))
	}

	async fn as_replay(&self) -> Option<SelectorReplayElement> {
		let handle = resolver::relocate_as_replay(&self.ctx, &self.native()).await?;
		Some(SelectorReplayElement::new(handle, self.origin.clone(), Arc::clone(&self.ctx)))
	}

	async fn drag_native(&self, dest: Point, steps: u32) -> Result<bool> {
		debug!(element = %self.handle.describe(), %dest, steps, "drag");
		self.handle.drag(dest, steps).await?;
		Ok(true)
	}
}

#[async_trait]
impl AndroidElement for LiveViewElement {
	fn origin(&self) -> &ElementOrigin {
		&self.origin
	}

	fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	fn native(&self) -> NativeHandle {
		NativeHandle::Live(Arc::clone(&self.handle))
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
			AttributeKind::ResourceId => AttributeValue::text(self.handle.resource_name().await?),
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
		self.handle.clear().await
	}

	async fn get_child(&self, selector: &SelectorDescriptor) -> Result<Option<Element>> {
		match selector {
			SelectorDescriptor::Live(live) => Ok(self
				.handle
				.find_object(live)
				.await?
				.map(|found| self.wrap(found, self.origin.single_child()))),
			SelectorDescriptor::Replay(_) => match self.as_replay().await {
				Some(anchor) => anchor.get_child(selector).await,
				None => Ok(None),
			},
		}
	}

	async fn get_children(&self, selector: &SelectorDescriptor, by: &By) -> Result<Vec<Element>> {
		match selector {
			SelectorDescriptor::Live(live) => Ok(self
				.handle
				.find_objects(live)
				.await?
				.into_iter()
				.map(|found| self.wrap(found, self.origin.multi_child(by)))
				.collect()),
			SelectorDescriptor::Replay(_) => match self.as_replay().await {
				Some(anchor) => anchor.get_children(selector, by).await,
				None => Ok(Vec::new()),
			},
		}
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
