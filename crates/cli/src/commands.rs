use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use ua2::memory::{MemoryTree, NativeAction, NodeId};
use ua2::{
	AndroidElement, By, CoordinateMapper, DragTarget, Element, ElementContext, ElementOrigin, ElementSettings,
	IdentityCoordinates, NativeHandle, NodeCriteria, Point, Rect, ReplayHandle, ReplaySelector, ScaledCoordinates,
	SelectorDescriptor,
};

use crate::cli::{AttrArgs, Cli, Commands, DragArgs, ElementArgs, SearchArgs};
use crate::error::{CliError, Result};

/// Everything a command needs: the loaded tree and the element context over it.
struct Session {
	tree: Arc<MemoryTree>,
	ctx: Arc<ElementContext>,
}

impl Session {
	fn open(hierarchy: &Path, settings: ElementSettings, scale: f64) -> Result<Self> {
		let tree = MemoryTree::load(hierarchy)
			.with_context(|| format!("failed to load hierarchy {}", hierarchy.display()))?;
		let display_bounds = tree.node_info(tree.root())?.bounds;
		let ctx = ElementContext::memory(Arc::clone(&tree))
			.settings(settings)
			.coordinates(coordinate_mapper(display_bounds, scale)?)
			.build();
		debug!(path = %hierarchy.display(), display = %display_bounds, "hierarchy loaded");
		Ok(Self { tree, ctx })
	}

	async fn element(&self, args: &ElementArgs) -> Result<Element> {
		match (&args.at, &args.replay) {
			(Some(path), _) => self.element_at(path),
			(None, Some(criteria)) => self.replay_element(criteria).await,
			(None, None) => Err(CliError::InvalidInput("either --at or --replay is required".into())),
		}
	}

	fn element_at(&self, path: &str) -> Result<Element> {
		let indices = parse_path(path)?;
		let node = self
			.tree
			.node_at(&indices)
			.ok_or_else(|| CliError::ElementNotFound(format!("path {path}")))?;
		let origin = ElementOrigin::new(true, By::XPath(xpath_for(&indices)));
		Ok(Element::from_native(
			NativeHandle::Live(self.tree.live(node)),
			origin,
			Arc::clone(&self.ctx),
		))
	}

	async fn replay_element(&self, criteria: &str) -> Result<Element> {
		let criteria: NodeCriteria = serde_json::from_str(criteria)?;
		let handle = self.tree.replay(ReplaySelector::new(criteria));
		if handle.resolve().is_none() {
			return Err(CliError::ElementNotFound(format!("replay selector {:?}", handle.selector())));
		}
		let origin = ElementOrigin::new(true, By::AndroidUiAutomator(serde_json::to_string(handle.selector())?));
		Ok(Element::from_native(NativeHandle::Replay(handle), origin, Arc::clone(&self.ctx)))
	}
}

/// Runs the parsed command and returns its `data` payload.
pub async fn dispatch(cli: Cli) -> Result<Value> {
	let hierarchy = cli.hierarchy.as_deref().ok_or(CliError::MissingHierarchy)?;
	let settings = match &cli.settings {
		Some(path) => ElementSettings::load(path)?,
		None => ElementSettings::from_env()?,
	};
	let scale = match &cli.command {
		Commands::Drag(args) => args.scale,
		_ => 1.0,
	};
	let session = Session::open(hierarchy, settings, scale)?;

	match &cli.command {
		Commands::Attr(args) => attr(&session, args).await,
		Commands::Child(args) => child(&session, args).await,
		Commands::Children(args) => children(&session, args).await,
		Commands::Drag(args) => drag(&session, args).await,
	}
}

async fn attr(session: &Session, args: &AttrArgs) -> Result<Value> {
	let element = session.element(&args.element).await?;
	let value = element.get_attribute(&args.name).await?;
	Ok(serde_json::to_value(value)?)
}

async fn child(session: &Session, args: &SearchArgs) -> Result<Value> {
	let element = session.element(&args.element).await?;
	let selector: SelectorDescriptor = serde_json::from_str(&args.selector)?;
	match element.get_child(&selector).await? {
		Some(found) => Ok(serde_json::to_value(ElementSummary::read(&found).await?)?),
		None => Ok(Value::Null),
	}
}

async fn children(session: &Session, args: &SearchArgs) -> Result<Value> {
	let element = session.element(&args.element).await?;
	let selector: SelectorDescriptor = serde_json::from_str(&args.selector)?;
	let by = match &args.by {
		Some(json) => serde_json::from_str(json)?,
		None => element.origin().by.clone(),
	};
	let found = element.get_children(&selector, &by).await?;
	info!(count = found.len(), kind = %selector.kind(), "children found");

	let mut summaries = Vec::with_capacity(found.len());
	for element in &found {
		summaries.push(ElementSummary::read(element).await?);
	}
	Ok(serde_json::to_value(summaries)?)
}

async fn drag(session: &Session, args: &DragArgs) -> Result<Value> {
	let element = session.element(&args.element).await?;
	let performed = match (&args.to_point, &args.to_at, &args.to_replay) {
		(Some(point), _, _) => {
			let point = parse_point(point)?;
			element.drag_to_point(point.x, point.y, args.steps).await?
		}
		(None, Some(path), _) => {
			let target = session.element_at(path)?.drag_target();
			element.drag_to(&target, args.steps).await?
		}
		(None, None, Some(criteria)) => {
			let target: DragTarget = session.replay_element(criteria).await?.drag_target();
			element.drag_to(&target, args.steps).await?
		}
		(None, None, None) => {
			return Err(CliError::InvalidInput(
				"one of --to-point, --to-at or --to-replay is required".into(),
			));
		}
	};

	let gestures: Vec<DragRecord> = session
		.tree
		.drags()
		.into_iter()
		.filter_map(|action| match action {
			NativeAction::Drag { node, to, steps } => Some(DragRecord { node, to, steps }),
			_ => None,
		})
		.collect();
	Ok(serde_json::json!({ "performed": performed, "gestures": gestures }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementSummary {
	kind: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	class: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	resource_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	text: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	content_desc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	bounds: Option<String>,
}

impl ElementSummary {
	async fn read(element: &Element) -> Result<Self> {
		Ok(Self {
			kind: element.kind().to_string(),
			class: element.get_attribute("class").await?,
			resource_id: element.get_attribute("resource-id").await?,
			text: element.get_attribute("text").await?,
			content_desc: element.content_desc().await?,
			bounds: element.get_attribute("bounds").await?,
		})
	}
}

#[derive(Debug, Serialize)]
struct DragRecord {
	node: NodeId,
	to: Point,
	steps: u32,
}

/// Mapper for `--to-point`. The root bounds act as the display; a dump whose
/// root has no bounds only supports unscaled points.
fn coordinate_mapper(display: Rect, scale: f64) -> Result<Arc<dyn CoordinateMapper>> {
	if !display.is_empty() {
		return Ok(Arc::new(ScaledCoordinates::uniform(display, scale)));
	}
	if scale != 1.0 {
		return Err(CliError::InvalidInput(format!(
			"--scale {scale} needs a display size, but the hierarchy root has no bounds"
		)));
	}
	debug!("hierarchy root has no bounds, points pass through unscaled");
	Ok(Arc::new(IdentityCoordinates))
}

/// Parses `0.2.1` into child indices. `root` and the empty string address the root.
fn parse_path(path: &str) -> Result<Vec<usize>> {
	let path = path.trim();
	if path.is_empty() || path == "root" {
		return Ok(Vec::new());
	}
	path.split('.')
		.map(|part| {
			part.trim()
				.parse::<usize>()
				.map_err(|_| CliError::InvalidInput(format!("bad path segment '{part}' in '{path}'")))
		})
		.collect()
}

fn xpath_for(indices: &[usize]) -> String {
	let mut xpath = String::from("/*");
	for index in indices {
		xpath.push_str(&format!("/*[{}]", index + 1));
	}
	xpath
}

fn parse_point(point: &str) -> Result<Point> {
	let invalid = || CliError::InvalidInput(format!("expected X,Y but got '{point}'"));
	let (x, y) = point.split_once(',').ok_or_else(invalid)?;
	let x = x.trim().parse().map_err(|_| invalid())?;
	let y = y.trim().parse().map_err(|_| invalid())?;
	Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paths_parse_to_child_indices() {
		assert_eq!(parse_path("root").unwrap(), Vec::<usize>::new());
		assert_eq!(parse_path("0.2.1").unwrap(), vec![0, 2, 1]);
		assert!(matches!(parse_path("0.x"), Err(CliError::InvalidInput(_))));
	}

	#[test]
	fn xpath_is_one_based() {
		assert_eq!(xpath_for(&[]), "/*");
		assert_eq!(xpath_for(&[0, 2]), "/*/*[1]/*[3]");
	}

	#[test]
	fn boundless_root_maps_points_unchanged() {
		let mapper = coordinate_mapper(Rect::default(), 1.0).unwrap();
		assert_eq!(mapper.to_device_absolute(Point::new(5000, 7)).unwrap(), Point::new(5000, 7));
		assert!(matches!(coordinate_mapper(Rect::default(), 2.0), Err(CliError::InvalidInput(_))));

		let scaled = coordinate_mapper(Rect::new(0, 0, 100, 100), 2.0).unwrap();
		assert_eq!(scaled.to_device_absolute(Point::new(10, 20)).unwrap(), Point::new(20, 40));
	}

	#[test]
	fn points_parse_with_spaces() {
		assert_eq!(parse_point("10, -4").unwrap(), Point::new(10, -4));
		assert!(parse_point("10").is_err());
		assert!(parse_point("a,b").is_err());
	}
}
