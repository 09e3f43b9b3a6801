//! Axis-aligned bounding box over atom spheres.

use glam::{Vec3, Vec4};

/// Single-precision axis-aligned bounding box.
///
/// Boxes in the tree bound full spheres, not just atom centers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
	/// Minimum corner (inclusive).
	pub min: Vec3,
	/// Maximum corner (inclusive).
	pub max: Vec3,
}

impl Aabb3 {
	/// Empty box: `min` at +inf and `max` at -inf, so any inclusion replaces it.
	pub const EMPTY: Self = Self {
		min: Vec3::splat(f32::INFINITY),
		max: Vec3::splat(f32::NEG_INFINITY),
	};

	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: Vec3, max: Vec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	/// Box bounding a sphere.
	#[inline]
	pub fn from_sphere(center: Vec3, radius: f32) -> Self {
		Self {
			min: center - Vec3::splat(radius),
			max: center + Vec3::splat(radius),
		}
	}

	/// Build from the `xyz` part of two vec4 corners (flat node format).
	#[inline]
	pub fn from_vec4(min: Vec4, max: Vec4) -> Self {
		Self {
			min: min.truncate(),
			max: max.truncate(),
		}
	}

	/// Whether nothing has been included yet.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
	}

	/// Grow to include a sphere.
	#[inline]
	pub fn include_sphere(&mut self, center: Vec3, radius: f32) {
		self.min = self.min.min(center - Vec3::splat(radius));
		self.max = self.max.max(center + Vec3::splat(radius));
	}

	/// Smallest box containing both.
	#[inline]
	pub fn union(&self, other: &Aabb3) -> Aabb3 {
		Self {
			min: self.min.min(other.min),
			max: self.max.max(other.max),
		}
	}

	/// Copy of this box with one axis replaced by `[min, max]`.
	#[inline]
	pub fn with_axis(&self, axis: usize, min: f32, max: f32) -> Aabb3 {
		let mut out = *self;
		out.min[axis] = min;
		out.max[axis] = max;
		out
	}

	/// Midpoint along one axis.
	#[inline]
	pub fn axis_center(&self, axis: usize) -> f32 {
		(self.min[axis] + self.max[axis]) * 0.5
	}

	/// Check if this AABB overlaps with another.
	///
	/// Two AABBs overlap if they share any interior or boundary points.
	#[inline]
	pub fn overlaps(&self, other: &Aabb3) -> bool {
		self.min.x <= other.max.x
			&& self.max.x >= other.min.x
			&& self.min.y <= other.max.y
			&& self.max.y >= other.min.y
			&& self.min.z <= other.max.z
			&& self.max.z >= other.min.z
	}

	/// Check if this AABB contains a point.
	#[inline]
	pub fn contains_point(&self, point: Vec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Check if `other` lies entirely inside this AABB (boundaries included).
	#[inline]
	pub fn contains_aabb(&self, other: &Aabb3) -> bool {
		self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
	}

	/// Entry and exit distances of a ray through the box (slab test).
	///
	/// `inv_dir` is the component-wise reciprocal of the ray direction.
	/// Returns `None` when the ray misses or the box lies entirely behind
	/// the origin.
	#[inline]
	pub fn ray_interval(&self, origin: Vec3, inv_dir: Vec3) -> Option<(f32, f32)> {
		let t0 = (self.min - origin) * inv_dir;
		let t1 = (self.max - origin) * inv_dir;
		let t_near = t0.min(t1).max_element();
		let t_far = t0.max(t1).min_element();
		if t_near <= t_far && t_far >= 0.0 {
			Some((t_near.max(0.0), t_far))
		} else {
			None
		}
	}

	/// Get the size of the AABB (max - min).
	#[inline]
	pub fn size(&self) -> Vec3 {
		self.max - self.min
	}

	/// Get the center of the AABB.
	#[inline]
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}
}

impl Default for Aabb3 {
	fn default() -> Self {
		Self::EMPTY
	}
}
