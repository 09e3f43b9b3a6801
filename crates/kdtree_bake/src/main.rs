//! Atom scene baker.
//!
//! Builds the k-d tree for a molecular scene offline and writes the buffers
//! a raytracing shader binds:
//! - nodes.bin: flat tree nodes, 80 bytes each, root first
//! - atoms.bin: atom records, 48 bytes each, by stable index
//! - summary.json: counts, strides and scene bounds

mod bake;
mod config;
mod scene;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use config::Config;
use scene::Scene;

/// Atom scene baker for GPU raytracing.
#[derive(Parser, Debug)]
#[command(name = "kdtree_bake")]
#[command(about = "Bakes an atom scene into flat k-d tree and atom buffers")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Output directory (default: `output_dir` from the config).
	#[arg(short, long)]
	out: Option<PathBuf>,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	// Paths in the config are relative to the config file
	let base_dir = args.config.parent().unwrap_or(Path::new(".")).to_path_buf();

	log::info!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;

	let scene_path = base_dir.join(&config.scene);
	log::info!("Loading scene from: {}", scene_path.display());
	let scene = Scene::load(&scene_path)?.resolve()?;
	log::info!(
		"Baking {} atoms with {} templates",
		scene.atoms.len(),
		scene.templates.len()
	);

	let output_dir = args.out.unwrap_or_else(|| base_dir.join(&config.output_dir));
	let summary = bake::bake(
		scene,
		&config.build.build_config(),
		config.material.material(),
		&output_dir,
	)?;

	log::info!(
		"{} nodes ({} leaves, {} leaves with child, {} branches, {} pass-through), depth {}",
		summary.nodes,
		summary.leaves,
		summary.leaves_with_child,
		summary.branches,
		summary.pass_throughs,
		summary.max_depth
	);
	log::info!(
		"{} straddling splits, {} duplicated atom slots, {} median fallbacks",
		summary.straddling,
		summary.duplicate_slots,
		summary.fallback_splits
	);
	log::info!("Done! Output written to: {}", output_dir.display());

	Ok(())
}
