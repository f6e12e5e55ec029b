use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Inspect and drive elements of a recorded accessibility hierarchy.
#[derive(Parser, Debug)]
#[command(name = "ua2")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v debug for the element layer, -vv trace)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// JSON hierarchy dump to load
	#[arg(long, global = true, value_name = "FILE", env = "UA2_HIERARCHY")]
	pub hierarchy: Option<PathBuf>,

	/// Element settings file (defaults to $UA2_SETTINGS, then built-in defaults)
	#[arg(long, global = true, value_name = "FILE")]
	pub settings: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Read one attribute of an element.
	Attr(AttrArgs),
	/// Find the first descendant matching a selector.
	Child(SearchArgs),
	/// Find every descendant matching a selector.
	Children(SearchArgs),
	/// Drag an element to a point or onto another element.
	Drag(DragArgs),
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Attr(_) => "attr",
			Commands::Child(_) => "child",
			Commands::Children(_) => "children",
			Commands::Drag(_) => "drag",
		}
	}
}

/// Addresses the element a command acts on.
///
/// `--at` pins a node by its child-index path and yields a live-view element;
/// `--replay` takes node criteria and yields a selector-replay element.
#[derive(Args, Debug, Clone)]
pub struct ElementArgs {
	/// Dot-separated child indices from the root, e.g. `0.2.1` (`root` for the root)
	#[arg(long, value_name = "PATH", conflicts_with = "replay", required_unless_present = "replay")]
	pub at: Option<String>,

	/// Node criteria as JSON, e.g. `{"resourceId": "app:id/list"}`
	#[arg(long, value_name = "JSON")]
	pub replay: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct AttrArgs {
	#[command(flatten)]
	pub element: ElementArgs,

	/// Attribute name (e.g. text, resource-id, bounds)
	#[arg(value_name = "NAME")]
	pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
	#[command(flatten)]
	pub element: ElementArgs,

	/// Kind-tagged selector as JSON, e.g. `{"replay": {"className": "android.widget.TextView"}}`
	#[arg(long, value_name = "JSON")]
	pub selector: String,

	/// Locator recorded on the results, as `{"using": ..., "value": ...}`
	#[arg(long, value_name = "JSON")]
	pub by: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DragArgs {
	#[command(flatten)]
	pub element: ElementArgs,

	/// Logical destination point `X,Y`
	#[arg(long, value_name = "X,Y", conflicts_with_all = ["to_at", "to_replay"])]
	pub to_point: Option<String>,

	/// Destination element by child-index path
	#[arg(long, value_name = "PATH", conflicts_with = "to_replay")]
	pub to_at: Option<String>,

	/// Destination element by node criteria JSON
	#[arg(long, value_name = "JSON")]
	pub to_replay: Option<String>,

	/// Gesture granularity
	#[arg(long, default_value_t = 10)]
	pub steps: u32,

	/// Logical-to-device scale factor applied to `--to-point`
	#[arg(long, default_value_t = 1.0)]
	pub scale: f64,
}
