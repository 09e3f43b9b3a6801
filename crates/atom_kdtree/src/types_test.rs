use super::*;

fn atom(x: f32, r: f32, index: u32) -> AtomRecord {
  AtomRecord::new(Vec3::new(x, 0.0, 0.0), r, index)
}

#[test]
fn test_axis_extents() {
  let a = AtomRecord::new(Vec3::new(1.0, 2.0, 3.0), 0.5, 0);
  assert_eq!(a.axis_min(0), 0.5);
  assert_eq!(a.axis_max(0), 1.5);
  assert_eq!(a.axis_min(2), 2.5);
  assert_eq!(a.axis_max(1), 2.5);
}

#[test]
fn test_from_template_copies_radius() {
  let carbon = AtomTemplate::new(Vec3::new(0.5, 0.5, 0.5), 1.7);
  let a = AtomRecord::from_template(Vec3::ZERO, 3, &carbon, 7);
  assert_eq!(a.radius, 1.7);
  assert_eq!(a.template, 3);
  assert_eq!(a.index, 7);
}

#[test]
fn test_bounds_cover_sphere() {
  let a = AtomRecord::new(Vec3::new(1.0, 1.0, 1.0), 2.0, 0);
  let b = a.bounds();
  assert_eq!(b.min, Vec3::splat(-1.0));
  assert_eq!(b.max, Vec3::splat(3.0));
}

#[test]
fn test_contains_point() {
  let a = AtomRecord::new(Vec3::ZERO, 1.0, 0);
  assert!(a.contains_point(Vec3::new(0.5, 0.5, 0.0)));
  assert!(a.contains_point(Vec3::new(1.0, 0.0, 0.0)));
  assert!(!a.contains_point(Vec3::new(0.8, 0.8, 0.0)));
}

#[test]
fn test_validate_accepts_permutation() {
  let atoms = vec![atom(0.0, 1.0, 2), atom(1.0, 1.0, 0), atom(2.0, 0.0, 1)];
  assert_eq!(validate_atoms(&atoms), Ok(()));
}

#[test]
fn test_validate_empty() {
  assert_eq!(validate_atoms(&[]), Err(KdTreeError::EmptyInput));
}

#[test]
fn test_validate_non_finite_position() {
  let atoms = vec![AtomRecord::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, 0)];
  assert_eq!(
    validate_atoms(&atoms),
    Err(KdTreeError::NonFinitePosition { index: 0 })
  );
}

#[test]
fn test_validate_negative_radius() {
  let atoms = vec![atom(0.0, -1.0, 0)];
  assert!(matches!(
    validate_atoms(&atoms),
    Err(KdTreeError::InvalidRadius { index: 0, .. })
  ));
}

#[test]
fn test_validate_zero_radius_is_accepted() {
  let atoms = vec![atom(0.0, 0.0, 0)];
  assert_eq!(validate_atoms(&atoms), Ok(()));
}

#[test]
fn test_validate_index_out_of_range() {
  let atoms = vec![atom(0.0, 1.0, 0), atom(1.0, 1.0, 5)];
  assert_eq!(
    validate_atoms(&atoms),
    Err(KdTreeError::IndexOutOfRange { index: 5, count: 2 })
  );
}

#[test]
fn test_validate_duplicate_index() {
  let atoms = vec![atom(0.0, 1.0, 1), atom(1.0, 1.0, 1)];
  assert_eq!(
    validate_atoms(&atoms),
    Err(KdTreeError::DuplicateIndex { index: 1 })
  );
}
