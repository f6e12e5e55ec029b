//! The element contract and its two variants.
//!
//! Callers hold an [`Element`] without knowing which native handle kind
//! backs it. Every operation of [`AndroidElement`] is answered by the
//! variant, natively where the handle allows it and through the
//! [`ElementContext`] collaborators otherwise.

mod live;
mod replay;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;
use ua2_protocol::{By, SelectorDescriptor, SelectorKind};
use ua2_runtime::NativeHandle;

pub use live::LiveViewElement;
pub use replay::SelectorReplayElement;

use crate::attribute::{AttributeKind, AttributeValue};
use crate::context::ElementContext;
use crate::drag::DragTarget;
use crate::Result;

/// How an element was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOrigin {
	/// Whether the element came from a single-element search.
	pub is_single_match: bool,
	/// Locator that produced the element.
	pub by: By,
	/// Context (e.g. web-view frame) the lookup ran in.
	pub context_id: Option<String>,
}

impl ElementOrigin {
	pub fn new(is_single_match: bool, by: By) -> Self {
		Self {
			is_single_match,
			by,
			context_id: None,
		}
	}

	pub fn with_context(mut self, context_id: impl Into<String>) -> Self {
		self.context_id = Some(context_id.into());
		self
	}

	/// Origin of a child returned by `get_child`.
	pub(crate) fn single_child(&self) -> Self {
		Self {
			is_single_match: true,
			by: self.by.clone(),
			context_id: self.context_id.clone(),
		}
	}

	/// Origin of children returned by `get_children`.
	pub(crate) fn multi_child(&self, by: &By) -> Self {
		Self {
			is_single_match: false,
			by: by.clone(),
			context_id: self.context_id.clone(),
		}
	}
}

/// Uniform contract over both native handle kinds.
#[async_trait]
pub trait AndroidElement: Send + Sync {
	fn origin(&self) -> &ElementOrigin;

	/// Caller-assigned element id, if any.
	fn id(&self) -> Option<&str>;

	fn native(&self) -> NativeHandle;

	/// Accessible name. This is the content description.
	async fn name(&self) -> Result<Option<String>>;

	async fn content_desc(&self) -> Result<Option<String>>;

	/// Extracts `kind` from the native handle or the node snapshot.
	async fn attribute_value(&self, kind: AttributeKind) -> Result<AttributeValue>;

	/// Looks up an attribute by name and returns its canonical string form.
	///
	/// Fails with [`Error::UnsupportedAttribute`](crate::Error::UnsupportedAttribute)
	/// before touching the device when `name` is unknown. A missing value is
	/// `Ok(None)`.
	async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
		let kind: AttributeKind = name.parse()?;
		trace!(attribute = %kind, "dispatching attribute lookup");
		self.attribute_value(kind).await?.into_string()
	}

	async fn clear(&self) -> Result<()>;

	/// First descendant matching `selector`, or `None`.
	async fn get_child(&self, selector: &SelectorDescriptor) -> Result<Option<Element>>;

	/// Every descendant matching `selector`. `by` is recorded on the results.
	async fn get_children(&self, selector: &SelectorDescriptor, by: &By) -> Result<Vec<Element>>;

	/// Drags this element onto `target`.
	///
	/// Returns `false` without a native call when `target` cannot yield a
	/// center point.
	async fn drag_to(&self, target: &DragTarget, steps: u32) -> Result<bool>;

	/// Drags this element to a point given in logical coordinates.
	async fn drag_to_point(&self, x: i32, y: i32, steps: u32) -> Result<bool>;
}

/// An element of either variant.
#[derive(Clone)]
pub enum Element {
	Live(LiveViewElement),
	Replay(SelectorReplayElement),
}

impl Element {
	/// Wraps a native handle in the matching variant.
	pub fn from_native(handle: NativeHandle, origin: ElementOrigin, ctx: Arc<ElementContext>) -> Self {
		match handle {
			NativeHandle::Live(handle) => Element::Live(LiveViewElement::new(handle, origin, ctx)),
			NativeHandle::Replay(handle) => Element::Replay(SelectorReplayElement::new(handle, origin, ctx)),
		}
	}

	/// Native kind backing this element. Never changes.
	pub fn kind(&self) -> SelectorKind {
		match self {
			Element::Live(_) => SelectorKind::Live,
			Element::Replay(_) => SelectorKind::Replay,
		}
	}

	pub fn with_id(self, id: impl Into<String>) -> Self {
		match self {
			Element::Live(element) => Element::Live(element.with_id(id)),
			Element::Replay(element) => Element::Replay(element.with_id(id)),
		}
	}

	/// This element as a drag destination.
	pub fn drag_target(&self) -> DragTarget {
		DragTarget::from(self.native())
	}
}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Element")
			.field("native", &self.native())
			.field("origin", self.origin())
			.field("id", &self.id())
			.finish()
	}
}

#[async_trait]
impl AndroidElement for Element {
	fn origin(&self) -> &ElementOrigin {
		match self {
			Element::Live(e) => e.origin(),
			Element::Replay(e) => e.origin(),
		}
	}

	fn id(&self) -> Option<&str> {
		match self {
			Element::Live(e) => e.id(),
			Element::Replay(e) => e.id(),
		}
	}

	fn native(&self) -> NativeHandle {
		match self {
			Element::Live(e) => e.native(),
			Element::Replay(e) => e.native(),
		}
	}

	async fn name(&self) -> Result<Option<String>> {
		match self {
			Element::Live(e) => e.name().await,
			Element::Replay(e) => e.name().await,
		}
	}

	async fn content_desc(&self) -> Result<Option<String>> {
		match self {
			Element::Live(e) => e.content_desc().await,
			Element::Replay(e) => e.content_desc().await,
		}
	}

	async fn attribute_value(&self, kind: AttributeKind) -> Result<AttributeValue> {
		match self {
			Element::Live(e) => e.attribute_value(kind).await,
			Element::Replay(e) => e.attribute_value(kind).await,
		}
	}

	async fn clear(&self) -> Result<()> {
		match self {
			Element::Live(e) => e.clear().await,
			Element::Replay(e) => e.clear().await,
		}
	}

	async fn get_child(&self, selector: &SelectorDescriptor) -> Result<Option<Element>> {
		match self {
			Element::Live(e) => e.get_child(selector).await,
			Element::Replay(e) => e.get_child(selector).await,
		}
	}

	async fn get_children(&self, selector: &SelectorDescriptor, by: &By) -> Result<Vec<Element>> {
		match self {
			Element::Live(e) => e.get_children(selector, by).await,
			Element::Replay(e) => e.get_children(selector, by).await,
		}
	}

	async fn drag_to(&self, target: &DragTarget, steps: u32) -> Result<bool> {
		match self {
			Element::Live(e) => e.drag_to(target, steps).await,
			Element::Replay(e) => e.drag_to(target, steps).await,
		}
	}

	async fn drag_to_point(&self, x: i32, y: i32, steps: u32) -> Result<bool> {
		match self {
			Element::Live(e) => e.drag_to_point(x, y, steps).await,
			Element::Replay(e) => e.drag_to_point(x, y, steps).await,
		}
	}
}

#[cfg(test)]
mod tests {
	use ua2_protocol::{LiveSelector, NodeCriteria, Rect};
	use ua2_runtime::memory::{MemoryTree, NodeSpec};

	use super::*;

	fn element() -> (Arc<MemoryTree>, Element) {
		let tree = MemoryTree::new(
			NodeSpec::new("android.webkit.WebView")
				.bounds(Rect::new(0, 0, 100, 100))
				.child(NodeSpec::new("android.view.View").text("a"))
				.child(NodeSpec::new("android.view.View").text("b")),
		);
		let ctx = ElementContext::memory(Arc::clone(&tree)).build();
		let origin = ElementOrigin::new(true, By::ClassName("android.webkit.WebView".into())).with_context("WEBVIEW_1");
		let element = Element::from_native(NativeHandle::Live(tree.live(tree.root())), origin, ctx);
		(tree, element)
	}

	#[tokio::test]
	async fn children_inherit_context_and_record_locator() {
		let (_tree, element) = element();
		let views = SelectorDescriptor::Live(LiveSelector::new(NodeCriteria::new().class_name("android.view.View")));

		let child = element.get_child(&views).await.unwrap().unwrap();
		assert_eq!(child.origin().context_id.as_deref(), Some("WEBVIEW_1"));
		assert!(child.origin().is_single_match);
		assert_eq!(child.origin().by, element.origin().by);

		let by = By::XPath("//android.view.View".into());
		let all = element.get_children(&views, &by).await.unwrap();
		assert_eq!(all.len(), 2);
		assert!(all.iter().all(|e| !e.origin().is_single_match && e.origin().by == by));
		assert!(all.iter().all(|e| e.origin().context_id.as_deref() == Some("WEBVIEW_1")));
	}

	#[test]
	fn id_is_assigned_once_and_kind_is_fixed() {
		let (_tree, element) = element();
		assert_eq!(element.id(), None);
		let element = element.with_id("el-7");
		assert_eq!(element.id(), Some("el-7"));
		assert_eq!(element.kind(), SelectorKind::Live);
		assert!(matches!(element.drag_target(), DragTarget::Live(_)));
	}
}
