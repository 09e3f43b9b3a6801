//! Scene to GPU buffers.

use anyhow::{Context, Result};
use atom_kdtree::{gpu_atoms, AtomMaterial, BuildConfig, FlatNode, GpuAtom, KdTree};
use serde::Serialize;
use std::path::Path;

use crate::scene::ResolvedScene;

pub const NODES_FILE: &str = "nodes.bin";
pub const ATOMS_FILE: &str = "atoms.bin";
pub const SUMMARY_FILE: &str = "summary.json";

/// Written alongside the buffers as `summary.json`.
#[derive(Debug, Serialize)]
pub struct Summary {
	pub atoms: usize,
	pub templates: usize,
	pub nodes: usize,
	pub leaves: usize,
	pub branches: usize,
	pub leaves_with_child: usize,
	pub pass_throughs: usize,
	pub atom_slots: usize,
	pub duplicate_slots: usize,
	pub straddling: usize,
	pub fallback_splits: usize,
	pub max_depth: u32,
	pub node_stride: usize,
	pub atom_stride: usize,
	pub bounds_min: [f32; 3],
	pub bounds_max: [f32; 3],
}

/// Build, flatten and write every output file into `output_dir`.
pub fn bake(
	scene: ResolvedScene,
	build: &BuildConfig,
	material: AtomMaterial,
	output_dir: &Path,
) -> Result<Summary> {
	let template_count = scene.templates.len();
	let tree = KdTree::build_with_config(scene.atoms, build).context("Tree construction failed")?;
	let flat = tree.flatten().context("Flattening failed")?;
	let table = gpu_atoms(tree.atoms(), &scene.templates, material)
		.context("Building atom table failed")?;

	let stats = tree.stats();
	let bounds = tree.bounds();
	let summary = Summary {
		atoms: tree.atoms().len(),
		templates: template_count,
		nodes: flat.len(),
		leaves: stats.leaves,
		branches: stats.branches,
		leaves_with_child: stats.leaves_with_child,
		pass_throughs: stats.pass_throughs,
		atom_slots: stats.atom_slots,
		duplicate_slots: stats.duplicate_slots(tree.atoms().len()),
		straddling: stats.straddling,
		fallback_splits: stats.fallback_splits,
		max_depth: stats.max_depth,
		node_stride: std::mem::size_of::<FlatNode>(),
		atom_stride: std::mem::size_of::<GpuAtom>(),
		bounds_min: bounds.min.to_array(),
		bounds_max: bounds.max.to_array(),
	};

	std::fs::create_dir_all(output_dir)
		.with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;
	write_file(&output_dir.join(NODES_FILE), flat.as_bytes())?;
	write_file(&output_dir.join(ATOMS_FILE), bytemuck::cast_slice(&table))?;
	let json = serde_json::to_vec_pretty(&summary).context("Serializing summary")?;
	write_file(&output_dir.join(SUMMARY_FILE), &json)?;

	Ok(summary)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
	std::fs::write(path, bytes).with_context(|| format!("Failed to write: {}", path.display()))?;
	log::info!("  wrote {} ({} bytes)", path.display(), bytes.len());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scene::Scene;
	use std::path::PathBuf;

	fn scratch_dir(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("kdtree_bake_{}_{}", name, std::process::id()));
		let _ = std::fs::remove_dir_all(&dir);
		dir
	}

	fn chain_scene(count: usize) -> ResolvedScene {
		let atoms: Vec<String> = (0..count)
			.map(|i| format!(r#"{{ "element": "C", "position": [{}, 0, 0] }}"#, i * 4))
			.collect();
		let json = format!(
			r#"{{ "templates": {{ "C": {{ "color": [0.5, 0.5, 0.5], "radius": 1.7 }} }}, "atoms": [{}] }}"#,
			atoms.join(",")
		);
		Scene::parse(&json).unwrap().resolve().unwrap()
	}

	#[test]
	fn test_bake_writes_buffers() {
		let dir = scratch_dir("buffers");
		let summary = bake(
			chain_scene(25),
			&BuildConfig::default(),
			AtomMaterial::default(),
			&dir,
		)
		.unwrap();

		let nodes = std::fs::read(dir.join(NODES_FILE)).unwrap();
		let atoms = std::fs::read(dir.join(ATOMS_FILE)).unwrap();
		assert_eq!(nodes.len(), summary.nodes * 80);
		assert_eq!(atoms.len(), 25 * 48);
		assert_eq!(summary.atoms, 25);
		assert_eq!(summary.node_stride, 80);
		assert_eq!(summary.atom_stride, 48);

		let root: FlatNode = bytemuck::pod_read_unaligned(&nodes[..80]);
		assert_eq!(root.box_min, [-1.7, -1.7, -1.7, 0.0]);

		let json: serde_json::Value =
			serde_json::from_slice(&std::fs::read(dir.join(SUMMARY_FILE)).unwrap()).unwrap();
		assert_eq!(json["atoms"], 25);
		assert_eq!(json["nodes"], summary.nodes);
		assert_eq!(json["pass_throughs"], summary.pass_throughs);
		// A chain crosses every Y and Z plane, which must not duplicate it
		assert!(summary.atom_slots <= 2 * 25);

		let _ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn test_strict_bake_reports_degenerate_input() {
		let json = format!(
			r#"{{ "templates": {{ "C": {{ "color": [1, 1, 1], "radius": 1.0 }} }}, "atoms": [{}] }}"#,
			vec![r#"{ "element": "C", "position": [1, 1, 1] }"#; 20].join(",")
		);
		let scene = Scene::parse(&json).unwrap().resolve().unwrap();
		let dir = scratch_dir("strict");

		let err = bake(scene, &BuildConfig::STRICT, AtomMaterial::default(), &dir).unwrap_err();
		assert!(format!("{:#}", err).contains("could not be separated"));
		assert!(!dir.join(NODES_FILE).exists());
	}
}
