//! Configuration parsing for tree baking.

use anyhow::{Context, Result};
use atom_kdtree::{AtomMaterial, BuildConfig, DegenerateFallback};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for a bake.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Scene JSON, relative to the config file.
	pub scene: PathBuf,
	/// Output directory, relative to the config file.
	#[serde(default = "default_output_dir")]
	pub output_dir: PathBuf,
	#[serde(default)]
	pub build: BuildSection,
	#[serde(default)]
	pub material: MaterialSection,
}

/// `[build]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSection {
	pub max_depth: u32,
	pub fallback: Fallback,
	pub parallel: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
	#[default]
	MedianSplit,
	Error,
}

/// `[material]` table, shared by every atom.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaterialSection {
	pub transparency: f32,
	pub reflection: f32,
}

fn default_output_dir() -> PathBuf {
	PathBuf::from("baked")
}

impl Default for BuildSection {
	fn default() -> Self {
		let defaults = BuildConfig::default();
		Self {
			max_depth: defaults.max_depth,
			fallback: Fallback::default(),
			parallel: defaults.parallel,
		}
	}
}

impl BuildSection {
	pub fn build_config(&self) -> BuildConfig {
		BuildConfig {
			max_depth: self.max_depth,
			fallback: match self.fallback {
				Fallback::MedianSplit => DegenerateFallback::MedianSplit,
				Fallback::Error => DegenerateFallback::Error,
			},
			..BuildConfig::DEFAULT.with_parallel(self.parallel)
		}
	}
}

impl MaterialSection {
	pub fn material(&self) -> AtomMaterial {
		AtomMaterial {
			transparency: self.transparency,
			reflection: self.reflection,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;

		for (name, value) in [
			("transparency", config.material.transparency),
			("reflection", config.material.reflection),
		] {
			if !(0.0..=1.0).contains(&value) {
				anyhow::bail!("material.{} must be within 0.0-1.0, got {}", name, value);
			}
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_minimal_config_uses_defaults() {
		let config = Config::parse(r#"scene = "scene.json""#).unwrap();
		assert_eq!(config.scene, PathBuf::from("scene.json"));
		assert_eq!(config.output_dir, PathBuf::from("baked"));
		assert_eq!(config.build.build_config(), BuildConfig::default());
		assert_eq!(config.material.material(), AtomMaterial::default());
	}

	#[test]
	fn test_full_config() {
		let config = Config::parse(
			r#"
			scene = "protein.json"
			output_dir = "out"

			[build]
			max_depth = 40
			fallback = "error"
			parallel = true

			[material]
			transparency = 0.2
			reflection = 0.6
			"#,
		)
		.unwrap();

		let build = config.build.build_config();
		assert_eq!(build.max_depth, 40);
		assert_eq!(build.fallback, DegenerateFallback::Error);
		assert!(build.parallel);
		assert_eq!(config.material.material().reflection, 0.6);
	}

	#[test]
	fn test_material_out_of_range() {
		let err = Config::parse(
			r#"
			scene = "s.json"
			[material]
			reflection = 1.5
			"#,
		)
		.unwrap_err();
		assert!(err.to_string().contains("reflection"));
	}

	#[test]
	fn test_unknown_fallback_rejected() {
		let result = Config::parse(
			r#"
			scene = "s.json"
			[build]
			fallback = "give_up"
			"#,
		);
		assert!(result.is_err());
	}
}
