use ua2_protocol::{LiveSelector, NodeCriteria, ReplaySelector, SelectorDescriptor, StateFlag};

use super::*;
use crate::collaborator::{AccessibilityBridge, DeviceSearch};
use crate::handle::{LiveHandle, NativeHandle, ReplayHandle};

fn login_screen() -> Arc<MemoryTree> {
	MemoryTree::new(
		NodeSpec::new("android.widget.FrameLayout")
			.package_name("com.example.login")
			.bounds(Rect::new(0, 0, 1080, 1920))
			.child(
				NodeSpec::new("android.widget.LinearLayout")
					.resource_id("com.example.login:id/form")
					.bounds(Rect::new(0, 200, 1080, 1200))
					.child(
						NodeSpec::new("android.widget.EditText")
							.resource_id("com.example.login:id/user")
							.text("alice")
							.selection(5, 1)
							.bounds(Rect::new(40, 240, 1040, 340)),
					)
					.child(
						NodeSpec::new("android.widget.EditText")
							.resource_id("com.example.login:id/pass")
							.password(true)
							.bounds(Rect::new(40, 360, 1040, 460)),
					)
					.child(
						NodeSpec::new("android.widget.Button")
							.text("Sign in")
							.bounds(Rect::new(900, 1100, 1300, 1300)),
					),
			),
	)
}

fn edit_texts() -> NodeCriteria {
	NodeCriteria::new().class_name("android.widget.EditText")
}

#[test]
fn children_inherit_package_and_parse_selection() {
	let tree = login_screen();
	let user = tree.node_at(&[0, 0]).unwrap();
	let info = tree.node_info(user).unwrap();
	assert_eq!(info.package_name.as_deref(), Some("com.example.login"));
	let selection = info.selection.unwrap();
	assert_eq!((selection.start(), selection.end()), (1, 5));
}

#[test]
fn search_is_preorder_and_scoped() {
	let tree = login_screen();
	let all = tree.find_all(None, &edit_texts(), None);
	assert_eq!(all, vec![NodeId(2), NodeId(3)]);

	let form = tree.node_at(&[0]).unwrap();
	assert!(tree.find_all(Some(form), &NodeCriteria::new().resource_id("com.example.login:id/form"), None).is_empty());
	assert_eq!(tree.find_all(Some(tree.root()), &edit_texts(), Some(1)), Vec::<NodeId>::new());
	assert_eq!(tree.find_all(Some(tree.root()), &edit_texts(), Some(2)).len(), 2);
}

#[test]
fn visible_bounds_are_clipped_by_ancestors() {
	let tree = login_screen();
	let button = tree.find_first(&NodeCriteria::new().text("Sign in")).unwrap();
	assert_eq!(tree.visible_bounds(button).unwrap(), Rect::new(900, 1100, 1080, 1200));
}

#[test]
fn json_dump_defaults_to_visible() {
	let tree = MemoryTree::from_json(
		r#"{"className":"android.widget.FrameLayout","children":[{"className":"android.view.View","text":"hi"}]}"#,
	)
	.unwrap();
	let view = tree.node_at(&[0]).unwrap();
	assert!(tree.node_info(view).unwrap().visible);
	assert!(tree.node_at(&[3]).is_none());
}

#[test]
fn load_reads_dump_from_disk() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("hierarchy.json");
	std::fs::write(&path, r#"{"className":"android.widget.FrameLayout"}"#).unwrap();
	let tree = MemoryTree::load(&path).unwrap();
	assert_eq!(
		tree.node_info(tree.root()).unwrap().class_name.as_deref(),
		Some("android.widget.FrameLayout")
	);
}

#[tokio::test]
async fn live_handle_goes_stale_after_removal() {
	let tree = login_screen();
	let user = tree.node_at(&[0, 0]).unwrap();
	let handle = tree.live(user);
	assert_eq!(handle.text().await.unwrap().as_deref(), Some("alice"));

	tree.remove(tree.node_at(&[0]).unwrap());
	let err = handle.text().await.unwrap_err();
	assert!(err.is_stale());
}

#[tokio::test]
async fn live_find_objects_excludes_self() {
	let tree = login_screen();
	let form = tree.live(tree.node_at(&[0]).unwrap());
	let found = form.find_objects(&LiveSelector::new(edit_texts())).await.unwrap();
	assert_eq!(found.len(), 2);
	let none = form
		.find_object(&LiveSelector::new(NodeCriteria::new().class_name("android.widget.LinearLayout")))
		.await
		.unwrap();
	assert!(none.is_none());
}

#[tokio::test]
async fn replay_handle_re_resolves_on_every_call() {
	let tree = login_screen();
	let handle = tree.replay(ReplaySelector::new(NodeCriteria::new().text("Sign in")));
	assert!(handle.exists().await.unwrap());

	let button = handle.resolve().unwrap();
	tree.update(button, |info| info.text = Some("Log in".into())).unwrap();
	assert!(!handle.exists().await.unwrap());
	assert!(handle.bounds().await.unwrap_err().is_stale());
}

#[tokio::test]
async fn replay_child_honours_instance() {
	let tree = login_screen();
	let form = tree.replay(ReplaySelector::new(
		NodeCriteria::new().resource_id("com.example.login:id/form"),
	));
	let second = form.child(&ReplaySelector::new(edit_texts()).instance(1));
	assert!(second.state(StateFlag::Enabled).await.unwrap());
	assert_eq!(second.bounds().await.unwrap(), Rect::new(40, 360, 1040, 460));
	assert!(!form.child(&ReplaySelector::new(edit_texts()).instance(2)).exists().await.unwrap());
}

#[tokio::test]
async fn device_search_records_and_bridges() {
	let tree = login_screen();
	let device = MemoryDevice::new(Arc::clone(&tree));

	let selector = SelectorDescriptor::Replay(ReplaySelector::new(edit_texts()));
	let found = device.find_object(&selector).await.unwrap().unwrap();
	assert!(matches!(found, NativeHandle::Replay(_)));
	let info = device.node_info(&found).unwrap();
	assert_eq!(info.resource_id.as_deref(), Some("com.example.login:id/user"));

	let missing = SelectorDescriptor::Live(LiveSelector::new(NodeCriteria::new().text("nope")));
	assert!(device.find_object(&missing).await.unwrap().is_none());

	assert_eq!(
		tree.actions(),
		vec![
			NativeAction::DeviceSearch {
				kind: SelectorKind::Replay,
				found: true
			},
			NativeAction::DeviceSearch {
				kind: SelectorKind::Live,
				found: false
			},
		]
	);
}

#[tokio::test]
async fn clear_and_drag_are_recorded() {
	let tree = login_screen();
	let user = tree.node_at(&[0, 0]).unwrap();
	let handle = tree.live(user);
	handle.clear().await.unwrap();
	handle.drag(Point::new(10, 20), 5).await.unwrap();

	assert_eq!(tree.node_info(user).unwrap().text, None);
	assert_eq!(
		tree.drags(),
		vec![NativeAction::Drag {
			node: user,
			to: Point::new(10, 20),
			steps: 5
		}]
	);
	tree.clear_actions();
	assert!(tree.actions().is_empty());
}
