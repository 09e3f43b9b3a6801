//! JSON atom scene.
//!
//! ```json
//! {
//!   "templates": { "C": { "color": [0.5, 0.5, 0.5], "radius": 1.7 } },
//!   "atoms": [ { "element": "C", "position": [0.0, 1.0, 2.0] } ]
//! }
//! ```
//!
//! Atom array order assigns stable indices. Template ids follow the
//! symbols' sorted order.

use anyhow::{Context, Result};
use atom_kdtree::{AtomRecord, AtomTemplate, TemplateId};
use glam::Vec3;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Scene {
	pub templates: BTreeMap<String, TemplateDef>,
	pub atoms: Vec<AtomDef>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateDef {
	pub color: [f32; 3],
	pub radius: f32,
}

#[derive(Debug, Deserialize)]
pub struct AtomDef {
	pub element: String,
	pub position: [f32; 3],
}

/// Scene converted to library types.
pub struct ResolvedScene {
	pub templates: Vec<AtomTemplate>,
	pub atoms: Vec<AtomRecord>,
}

impl Scene {
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read scene file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid scene: {}", path.display()))
	}

	pub fn parse(content: &str) -> Result<Self> {
		serde_json::from_str(content).context("Failed to parse scene JSON")
	}

	/// Assign template ids and stable indices.
	pub fn resolve(&self) -> Result<ResolvedScene> {
		if self.templates.len() > TemplateId::MAX as usize + 1 {
			anyhow::bail!("Too many templates: {}", self.templates.len());
		}

		let ids: BTreeMap<&str, TemplateId> = self
			.templates
			.keys()
			.enumerate()
			.map(|(id, symbol)| (symbol.as_str(), id as TemplateId))
			.collect();
		let templates: Vec<AtomTemplate> = self
			.templates
			.values()
			.map(|t| AtomTemplate::new(Vec3::from_array(t.color), t.radius))
			.collect();

		let atoms = self
			.atoms
			.iter()
			.enumerate()
			.map(|(index, atom)| {
				let id = *ids.get(atom.element.as_str()).with_context(|| {
					format!("Atom {} has unknown element '{}'", index, atom.element)
				})?;
				Ok(AtomRecord::from_template(
					Vec3::from_array(atom.position),
					id,
					&templates[id as usize],
					index as u32,
				))
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(ResolvedScene { templates, atoms })
	}
}
