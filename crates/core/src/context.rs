//! Collaborators shared by every element of one session.

use std::sync::Arc;

use ua2_runtime::memory::{MemoryDevice, MemoryTree};
use ua2_runtime::{AccessibilityBridge, CoordinateMapper, DeviceSearch, SelectorSynthesis};

use crate::coordinates::IdentityCoordinates;
use crate::settings::ElementSettings;
use crate::synthesis::NodeSelectorSynthesizer;

/// The services an element needs beyond its own native handle.
///
/// Elements hold this behind an [`Arc`]; the device search in particular is
/// never reached through a global.
pub struct ElementContext {
	device: Arc<dyn DeviceSearch>,
	bridge: Arc<dyn AccessibilityBridge>,
	synthesis: Arc<dyn SelectorSynthesis>,
	coordinates: Arc<dyn CoordinateMapper>,
	settings: ElementSettings,
}

impl ElementContext {
	/// Starts a builder from the two collaborators that have no default.
	pub fn builder(
		device: Arc<dyn DeviceSearch>,
		bridge: Arc<dyn AccessibilityBridge>,
	) -> ElementContextBuilder {
		ElementContextBuilder {
			device,
			bridge,
			synthesis: None,
			coordinates: None,
			settings: ElementSettings::default(),
		}
	}

	/// Builder wired to an in-memory hierarchy for both device search and bridge.
	pub fn memory(tree: Arc<MemoryTree>) -> ElementContextBuilder {
		let device = Arc::new(MemoryDevice::new(tree));
		Self::builder(device.clone(), device)
	}

	pub fn device(&self) -> &dyn DeviceSearch {
		self.device.as_ref()
	}

	pub fn bridge(&self) -> &dyn AccessibilityBridge {
		self.bridge.as_ref()
	}

	pub fn synthesis(&self) -> &dyn SelectorSynthesis {
		self.synthesis.as_ref()
	}

	pub fn coordinates(&self) -> &dyn CoordinateMapper {
		self.coordinates.as_ref()
	}

	pub fn settings(&self) -> &ElementSettings {
		&self.settings
	}
}

/// Builder for [`ElementContext`].
pub struct ElementContextBuilder {
	device: Arc<dyn DeviceSearch>,
	bridge: Arc<dyn AccessibilityBridge>,
	synthesis: Option<Arc<dyn SelectorSynthesis>>,
	coordinates: Option<Arc<dyn CoordinateMapper>>,
	settings: ElementSettings,
}

impl ElementContextBuilder {
	/// Overrides the selector synthesizer (default: [`NodeSelectorSynthesizer`]).
	pub fn synthesis(mut self, synthesis: Arc<dyn SelectorSynthesis>) -> Self {
		self.synthesis = Some(synthesis);
		self
	}

	/// Overrides the coordinate mapper (default: [`IdentityCoordinates`]).
	pub fn coordinates(mut self, coordinates: Arc<dyn CoordinateMapper>) -> Self {
		self.coordinates = Some(coordinates);
		self
	}

	pub fn settings(mut self, settings: ElementSettings) -> Self {
		self.settings = settings;
		self
	}

	pub fn build(self) -> Arc<ElementContext> {
		let synthesis = self.synthesis.unwrap_or_else(|| {
			Arc::new(NodeSelectorSynthesizer::new(self.settings.synthesize_bounds)) as Arc<dyn SelectorSynthesis>
		});
		let coordinates = self
			.coordinates
			.unwrap_or_else(|| Arc::new(IdentityCoordinates) as Arc<dyn CoordinateMapper>);
		Arc::new(ElementContext {
			device: self.device,
			bridge: self.bridge,
			synthesis,
			coordinates,
			settings: self.settings,
		})
	}
}
