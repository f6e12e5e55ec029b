//! ua2: one element contract over two incompatible native handle kinds
//!
//! The platform accessibility API hands out live-view handles (direct
//! attribute access, live selectors only) and selector-replay handles
//! (replay selectors only, fewer accessors). This crate wraps both behind
//! [`AndroidElement`] and reconciles the differences:
//!
//! - **Attributes**: [`AttributeKind`] is parsed up front and dispatched
//!   through an exhaustive match per variant
//! - **Descendant search**: a selector of the other kind re-locates the
//!   element through the device search and runs there
//! - **Drag**: destinations of either kind yield a center point, logical
//!   points go through the [`CoordinateMapper`](ua2_runtime::CoordinateMapper)
//!
//! # Example
//!
//! ```ignore
//! use ua2::{AndroidElement, By, Element, ElementContext, ElementOrigin};
//! use ua2::memory::MemoryTree;
//!
//! let tree = MemoryTree::load("hierarchy.json".as_ref())?;
//! let ctx = ElementContext::memory(tree.clone()).build();
//! let root = Element::from_native(
//!     NativeHandle::Live(tree.live(tree.root())),
//!     ElementOrigin::new(true, By::Id("root".into())),
//!     ctx,
//! );
//! let class = root.get_attribute("class").await?;
//! ```

pub mod attribute;
pub mod context;
pub mod coordinates;
pub mod drag;
pub mod element;
mod resolver;
pub mod settings;
pub mod synthesis;

pub use attribute::{AttributeKind, AttributeValue};
pub use context::{ElementContext, ElementContextBuilder};
pub use coordinates::{IdentityCoordinates, ScaledCoordinates};
pub use drag::DragTarget;
pub use element::{AndroidElement, Element, ElementOrigin, LiveViewElement, SelectorReplayElement};
pub use settings::ElementSettings;
pub use synthesis::NodeSelectorSynthesizer;
pub use ua2_protocol::{
	By, LiveSelector, NodeCriteria, NodeInfo, NodeState, Point, Rect, ReplaySelector, SelectorDescriptor,
	SelectorKind, StateFlag,
};
pub use ua2_runtime::{CoordinateMapper, Error, LiveHandle, NativeHandle, ReplayHandle, Result, memory};
