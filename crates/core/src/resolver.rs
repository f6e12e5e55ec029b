//! Cross-variant descendant resolution.
//!
//! A live-view handle cannot run a replay selector and a selector-replay
//! handle cannot run a live selector. When an element is asked to search with
//! the other kind, it re-locates itself as a handle of that kind:
//!
//! 1. snapshot the element through the accessibility bridge,
//! 2. synthesize a top-level selector of the wanted kind from the snapshot,
//! 3. run it through the device search,
//! 4. accept the result only if it has the wanted kind.
//!
//! Any failure along the way is reported as "no match". When the synthesized
//! selector matches several nodes the device search picks the first one in
//! traversal order.

use std::sync::Arc;

use tracing::{debug, warn};
use ua2_protocol::{SelectorDescriptor, SelectorKind};
use ua2_runtime::{LiveHandle, NativeHandle, ReplayHandle};

use crate::context::ElementContext;

/// Re-locates `source` as a handle of kind `target`.
pub(crate) async fn relocate(
	ctx: &ElementContext,
	source: &NativeHandle,
	target: SelectorKind,
) -> Option<NativeHandle> {
	let info = match ctx.bridge().node_info(source) {
		Ok(info) => info,
		Err(err) => {
			warn!(?source, error = %err, "cannot snapshot element for {target} search");
			return None;
		}
	};

	let selector = match target {
		SelectorKind::Live => SelectorDescriptor::Live(ctx.synthesis().to_live_selector(&info)),
		SelectorKind::Replay => SelectorDescriptor::Replay(ctx.synthesis().to_replay_selector(&info)),
	};
	debug!(from = %source.kind(), to = %target, ?selector, "re-locating element through device search");

	match ctx.device().find_object(&selector).await {
		Ok(Some(found)) if found.kind() == target => Some(found),
		Ok(Some(found)) => {
			warn!(expected = %target, got = %found.kind(), "device search returned the wrong handle kind");
			None
		}
		Ok(None) => {
			debug!(to = %target, "synthesized selector matched nothing");
			None
		}
		Err(err) => {
			warn!(error = %err, "device search failed while re-locating element");
			None
		}
	}
}

pub(crate) async fn relocate_as_replay(
	ctx: &ElementContext,
	source: &NativeHandle,
) -> Option<Arc<dyn ReplayHandle>> {
	relocate(ctx, source, SelectorKind::Replay)
		.await
		.and_then(|handle| handle.as_replay().cloned())
}

pub(crate) async fn relocate_as_live(
	ctx: &ElementContext,
	source: &NativeHandle,
) -> Option<Arc<dyn LiveHandle>> {
	relocate(ctx, source, SelectorKind::Live)
		.await
		.and_then(|handle| handle.as_live().cloned())
}
