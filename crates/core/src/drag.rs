//! Drag destinations.

use std::fmt;
use std::sync::Arc;

use tracing::error;
use ua2_protocol::Point;
use ua2_runtime::{LiveHandle, NativeHandle, ReplayHandle};

use crate::{Error, Result};

/// Anything a drag gesture can be aimed at.
///
/// A live-view destination is hit at its visible center, a selector-replay
/// destination at the center of its bounds. Points are device-absolute and
/// are not passed through the coordinate mapper.
#[derive(Clone)]
pub enum DragTarget {
	Live(Arc<dyn LiveHandle>),
	Replay(Arc<dyn ReplayHandle>),
	/// A destination that cannot yield a center point, named for diagnostics.
	Unsupported(String),
}

impl DragTarget {
	/// Center point of the destination.
	pub async fn center(&self) -> Result<Point> {
		match self {
			DragTarget::Live(handle) => handle.visible_center().await,
			DragTarget::Replay(handle) => Ok(handle.bounds().await?.center()),
			DragTarget::Unsupported(what) => Err(Error::UnsupportedDragTarget(what.clone())),
		}
	}
}

impl From<NativeHandle> for DragTarget {
	fn from(handle: NativeHandle) -> Self {
		match handle {
			NativeHandle::Live(handle) => DragTarget::Live(handle),
			NativeHandle::Replay(handle) => DragTarget::Replay(handle),
		}
	}
}

impl fmt::Debug for DragTarget {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DragTarget::Live(handle) => f.debug_tuple("Live").field(&handle.describe()).finish(),
			DragTarget::Replay(handle) => f.debug_tuple("Replay").field(handle.selector()).finish(),
			DragTarget::Unsupported(what) => f.debug_tuple("Unsupported").field(what).finish(),
		}
	}
}

/// Resolves the drop point, or `None` for an unsupported destination.
///
/// Native failures while reading the destination propagate.
pub(crate) async fn destination(target: &DragTarget) -> Result<Option<Point>> {
	match target.center().await {
		Ok(point) => Ok(Some(point)),
		Err(err @ Error::UnsupportedDragTarget(_)) => {
			error!("{err}");
			Ok(None)
		}
		Err(err) => Err(err),
	}
}
