#![allow(dead_code)]

use std::sync::Arc;

use ua2::memory::{MemoryTree, NodeSpec};
use ua2::{By, Element, ElementContext, ElementOrigin, NativeHandle, NodeCriteria, Rect, ReplaySelector};

pub const PACKAGE: &str = "com.example.shop";

/// Shopping list screen:
///
/// ```text
/// [0]     list     LinearLayout
/// [0,0]     row    LinearLayout  (title "Apples", checkbox)
/// [0,1]     row    LinearLayout  (title "Bananas", checkbox)
/// [1]     query    EditText      selection 3..1
/// [2]     volume   SeekBar       range value 40
/// [3]     cart     Button        partly off screen
/// ```
pub fn shop() -> Arc<MemoryTree> {
	MemoryTree::new(
		NodeSpec::new("android.widget.FrameLayout")
			.package_name(PACKAGE)
			.bounds(Rect::new(0, 0, 1080, 1920))
			.child(
				NodeSpec::new("android.widget.LinearLayout")
					.resource_id("com.example.shop:id/list")
					.bounds(Rect::new(0, 100, 1080, 1500))
					.child(row("Apples", Rect::new(0, 100, 1080, 300)))
					.child(row("Bananas", Rect::new(0, 300, 1080, 500))),
			)
			.child(
				NodeSpec::new("android.widget.EditText")
					.resource_id("com.example.shop:id/query")
					.text("apples")
					.selection(3, 1)
					.bounds(Rect::new(0, 1500, 1080, 1600)),
			)
			.child(
				NodeSpec::new("android.widget.SeekBar")
					.resource_id("com.example.shop:id/volume")
					.range_value(40.0)
					.bounds(Rect::new(0, 1600, 1080, 1700)),
			)
			.child(
				NodeSpec::new("android.widget.Button")
					.resource_id("com.example.shop:id/cart")
					.content_desc("Cart")
					.bounds(Rect::new(900, 1800, 1200, 2000)),
			),
	)
}

fn row(title: &str, bounds: Rect) -> NodeSpec {
	NodeSpec::new("android.widget.LinearLayout")
		.resource_id("com.example.shop:id/row")
		.bounds(bounds)
		.child(
			NodeSpec::new("android.widget.TextView")
				.resource_id("com.example.shop:id/title")
				.text(title)
				.bounds(Rect::new(bounds.left, bounds.top, 900, bounds.bottom)),
		)
		.child(
			NodeSpec::new("android.widget.CheckBox")
				.resource_id("com.example.shop:id/pick")
				.bounds(Rect::new(900, bounds.top, 1080, bounds.bottom)),
		)
}

pub fn origin() -> ElementOrigin {
	ElementOrigin::new(true, By::Id("com.example.shop:id/list".into()))
}

/// Live-view element at `path`, over a default memory context.
pub fn live_at(tree: &Arc<MemoryTree>, path: &[usize]) -> Element {
	live_in(ElementContext::memory(Arc::clone(tree)).build(), tree, path)
}

pub fn live_in(ctx: Arc<ElementContext>, tree: &Arc<MemoryTree>, path: &[usize]) -> Element {
	let node = tree.node_at(path).expect("fixture path");
	Element::from_native(NativeHandle::Live(tree.live(node)), origin(), ctx)
}

/// Selector-replay element for `criteria`, over a default memory context.
pub fn replay_of(tree: &Arc<MemoryTree>, criteria: NodeCriteria) -> Element {
	replay_in(ElementContext::memory(Arc::clone(tree)).build(), tree, criteria)
}

pub fn replay_in(ctx: Arc<ElementContext>, tree: &Arc<MemoryTree>, criteria: NodeCriteria) -> Element {
	Element::from_native(NativeHandle::Replay(tree.replay(ReplaySelector::new(criteria))), origin(), ctx)
}

pub fn titles() -> ReplaySelector {
	ReplaySelector::new(NodeCriteria::new().class_name("android.widget.TextView"))
}
