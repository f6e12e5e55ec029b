//! End-to-end runs of the `ua2` binary over a hierarchy dump.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{Value, json};

fn ua2_binary() -> PathBuf {
	PathBuf::from(env!("CARGO_BIN_EXE_ua2"))
}

fn write_dump(dir: &Path) -> PathBuf {
	let dump = json!({
		"className": "android.widget.FrameLayout",
		"packageName": "com.example.notes",
		"bounds": { "left": 0, "top": 0, "right": 1080, "bottom": 1920 },
		"children": [
			{
				"className": "android.widget.ListView",
				"resourceId": "com.example.notes:id/notes",
				"bounds": { "left": 0, "top": 0, "right": 1080, "bottom": 1000 },
				"children": [
					{ "className": "android.widget.TextView", "text": "Groceries",
					  "bounds": { "left": 0, "top": 0, "right": 1080, "bottom": 100 } },
					{ "className": "android.widget.TextView", "text": "Taxes",
					  "bounds": { "left": 0, "top": 100, "right": 1080, "bottom": 200 } }
				]
			},
			{
				"className": "android.widget.EditText",
				"resourceId": "com.example.notes:id/title",
				"text": "Draft",
				"selection": [4, 2],
				"bounds": { "left": 0, "top": 1000, "right": 1080, "bottom": 1100 }
			}
		]
	});
	let path = dir.join("hierarchy.json");
	std::fs::write(&path, dump.to_string()).unwrap();
	path
}

fn run(dump: &Path, args: &[&str]) -> (bool, Value, String) {
	let output = Command::new(ua2_binary())
		.env_remove("UA2_SETTINGS")
		.env_remove("RUST_LOG")
		.arg("--hierarchy")
		.arg(dump)
		.args(args)
		.output()
		.expect("failed to execute ua2");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| json!({ "raw": stdout }));
	(output.status.success(), parsed, stderr)
}

#[test]
fn attr_reads_selection_from_live_element() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let (ok, json, _) = run(&dump, &["attr", "--at", "1", "selection-start"]);
	assert!(ok);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "attr");
	assert_eq!(json["data"], "2");

	let (_, json, _) = run(&dump, &["attr", "--at", "1", "package"]);
	assert_eq!(json["data"], "com.example.notes");
}

#[test]
fn unknown_attribute_fails_with_code() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let (ok, json, stderr) = run(&dump, &["attr", "--at", "1", "colour"]);
	assert!(!ok);
	assert_eq!(json["ok"], false);
	assert_eq!(json["error"]["code"], "UNSUPPORTED_ATTRIBUTE");
	assert!(stderr.contains("UNSUPPORTED_ATTRIBUTE"));
}

#[test]
fn replay_children_of_live_element() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let selector = json!({ "replay": { "className": "android.widget.TextView" } }).to_string();
	let (ok, json, _) = run(&dump, &["children", "--at", "0", "--selector", &selector]);
	assert!(ok, "children failed: {json}");
	let items = json["data"].as_array().unwrap();
	assert_eq!(items.len(), 2);
	assert_eq!(items[0]["kind"], "replay");
	assert_eq!(items[0]["text"], "Groceries");
	assert_eq!(items[1]["bounds"], "[0,100][1080,200]");
}

#[test]
fn missing_child_is_null_not_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let selector = json!({ "live": { "text": "Holidays" } }).to_string();
	let (ok, json, _) = run(&dump, &["child", "--replay", r#"{"resourceId":"com.example.notes:id/notes"}"#, "--selector", &selector]);
	assert!(ok);
	assert_eq!(json["data"], Value::Null);
}

#[test]
fn drag_to_point_applies_scale() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let (ok, json, _) = run(&dump, &["drag", "--at", "0.0", "--to-point", "100,200", "--steps", "10", "--scale", "2"]);
	assert!(ok, "drag failed: {json}");
	assert_eq!(json["data"]["performed"], true);
	assert_eq!(json["data"]["gestures"], json!([{ "node": 2, "to": { "x": 200, "y": 400 }, "steps": 10 }]));
}

#[test]
fn missing_element_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let dump = write_dump(dir.path());

	let (ok, json, _) = run(&dump, &["attr", "--at", "5.5", "text"]);
	assert!(!ok);
	assert_eq!(json["error"]["code"], "ELEMENT_NOT_FOUND");
}

#[test]
fn drag_to_point_without_root_bounds() {
	let dir = tempfile::tempdir().unwrap();
	let dump = dir.path().join("boundless.json");
	let tree = json!({
		"className": "android.widget.FrameLayout",
		"children": [{ "className": "android.widget.ImageView", "resourceId": "app:id/photo" }]
	});
	std::fs::write(&dump, tree.to_string()).unwrap();

	let (ok, json, _) = run(&dump, &["drag", "--at", "0", "--to-point", "300,40"]);
	assert!(ok, "drag failed: {json}");
	assert_eq!(json["data"]["gestures"][0]["to"], json!({ "x": 300, "y": 40 }));

	let (ok, json, _) = run(&dump, &["drag", "--at", "0", "--to-point", "300,40", "--scale", "2"]);
	assert!(!ok);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
}
