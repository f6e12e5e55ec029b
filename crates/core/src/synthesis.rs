//! Default selector synthesis from node snapshots.

use ua2_protocol::{LiveSelector, NodeCriteria, NodeInfo, ReplaySelector, StateFlag};
use ua2_runtime::SelectorSynthesis;

/// Pins every identifying property of a node: class, text, content
/// description, resource id, package and all state flags, plus the bounds
/// when `include_bounds` is set.
///
/// Identical siblings still produce identical selectors; the device search
/// then returns the first one in traversal order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSelectorSynthesizer {
	include_bounds: bool,
}

impl NodeSelectorSynthesizer {
	pub fn new(include_bounds: bool) -> Self {
		Self { include_bounds }
	}

	fn criteria(&self, node: &NodeInfo) -> NodeCriteria {
		let mut criteria = NodeCriteria {
			class_name: node.class_name.clone(),
			text: node.text.clone(),
			content_desc: node.content_desc.clone(),
			resource_id: node.resource_id.clone(),
			package_name: node.package_name.clone(),
			..NodeCriteria::default()
		};
		for flag in StateFlag::ALL {
			criteria.state.insert(flag, node.state.get(flag));
		}
		if self.include_bounds {
			criteria.bounds = Some(node.bounds);
		}
		criteria
	}
}

impl SelectorSynthesis for NodeSelectorSynthesizer {
	fn to_replay_selector(&self, node: &NodeInfo) -> ReplaySelector {
		ReplaySelector::new(self.criteria(node))
	}

	fn to_live_selector(&self, node: &NodeInfo) -> LiveSelector {
		LiveSelector::new(self.criteria(node))
	}
}

#[cfg(test)]
mod tests {
	use ua2_protocol::Rect;

	use super::*;

	fn node() -> NodeInfo {
		let mut node = NodeInfo {
			class_name: Some("android.widget.CheckBox".into()),
			resource_id: Some("app:id/remember".into()),
			package_name: Some("app".into()),
			bounds: Rect::new(0, 0, 40, 40),
			..NodeInfo::default()
		};
		node.state.checkable = true;
		node
	}

	#[test]
	fn pins_identity_and_every_flag() {
		let selector = NodeSelectorSynthesizer::default().to_replay_selector(&node());
		assert_eq!(selector.criteria.class_name.as_deref(), Some("android.widget.CheckBox"));
		assert_eq!(selector.criteria.resource_id.as_deref(), Some("app:id/remember"));
		assert_eq!(selector.criteria.text, None);
		assert_eq!(selector.criteria.state.len(), StateFlag::ALL.len());
		assert_eq!(selector.criteria.state[&StateFlag::Checkable], true);
		assert_eq!(selector.criteria.state[&StateFlag::Checked], false);
		assert_eq!(selector.criteria.bounds, None);
		assert_eq!(selector.instance, None);
	}

	#[test]
	fn bounds_only_when_requested() {
		let live = NodeSelectorSynthesizer::new(true).to_live_selector(&node());
		assert_eq!(live.criteria.bounds, Some(Rect::new(0, 0, 40, 40)));
		assert_eq!(live.max_depth, None);
	}
}
