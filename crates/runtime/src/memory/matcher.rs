use ua2_protocol::{NodeCriteria, NodeInfo};

fn same(expected: &Option<String>, actual: &Option<String>) -> bool {
	expected
		.as_deref()
		.is_none_or(|e| actual.as_deref() == Some(e))
}

pub(crate) fn matches(criteria: &NodeCriteria, info: &NodeInfo) -> bool {
	same(&criteria.class_name, &info.class_name)
		&& same(&criteria.text, &info.text)
		&& same(&criteria.content_desc, &info.content_desc)
		&& same(&criteria.resource_id, &info.resource_id)
		&& same(&criteria.package_name, &info.package_name)
		&& criteria
			.text_contains
			.as_deref()
			.is_none_or(|needle| info.text.as_deref().is_some_and(|t| t.contains(needle)))
		&& criteria
			.state
			.iter()
			.all(|(flag, expected)| info.state.get(*flag) == *expected)
		&& criteria.bounds.is_none_or(|b| b == info.bounds)
}

#[cfg(test)]
mod tests {
	use ua2_protocol::{Rect, StateFlag};

	use super::*;

	fn button() -> NodeInfo {
		let mut info = NodeInfo {
			class_name: Some("android.widget.Button".into()),
			text: Some("Sign in".into()),
			resource_id: Some("app:id/sign_in".into()),
			bounds: Rect::new(0, 0, 100, 50),
			..NodeInfo::default()
		};
		info.state.enabled = true;
		info
	}

	#[test]
	fn empty_criteria_match_everything() {
		assert!(matches(&NodeCriteria::new(), &button()));
		assert!(matches(&NodeCriteria::new(), &NodeInfo::default()));
	}

	#[test]
	fn every_set_field_must_match() {
		let criteria = NodeCriteria::new()
			.class_name("android.widget.Button")
			.resource_id("app:id/sign_in");
		assert!(matches(&criteria, &button()));
		assert!(!matches(&criteria.clone().text("Sign out"), &button()));
	}

	#[test]
	fn text_contains_requires_text() {
		assert!(matches(&NodeCriteria::new().text_contains("gn i"), &button()));
		assert!(!matches(&NodeCriteria::new().text_contains("x"), &NodeInfo::default()));
	}

	#[test]
	fn state_and_bounds() {
		assert!(matches(&NodeCriteria::new().state(StateFlag::Enabled, true), &button()));
		assert!(!matches(&NodeCriteria::new().state(StateFlag::Checked, true), &button()));
		assert!(!matches(&NodeCriteria::new().bounds(Rect::new(0, 0, 1, 1)), &button()));
	}
}
