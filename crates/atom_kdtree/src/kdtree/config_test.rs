use super::*;

#[test]
fn test_default_config() {
  let config = BuildConfig::default();
  assert_eq!(config.max_depth, 64);
  assert_eq!(config.fallback, DegenerateFallback::MedianSplit);
  assert!(!config.parallel, "canonical build is sequential");
}

#[test]
fn test_strict_only_changes_fallback() {
  let strict = BuildConfig::STRICT;
  assert_eq!(strict.fallback, DegenerateFallback::Error);
  assert_eq!(strict.max_depth, BuildConfig::DEFAULT.max_depth);
  assert_eq!(strict.parallel, BuildConfig::DEFAULT.parallel);
}

#[test]
fn test_should_fork_requires_parallel() {
  let config = BuildConfig {
    parallel_threshold: 100,
    ..Default::default()
  };
  assert!(!config.should_fork(1_000_000));

  let config = config.with_parallel(true);
  assert!(!config.should_fork(99));
  assert!(config.should_fork(100));
}
