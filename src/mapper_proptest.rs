//! Property-based tests for path filtering, mapping and annotation stripping.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::config::SyncConfig;
    use crate::filter::PathFilter;
    use crate::mapper::PathMapper;
    use crate::transform::ContentTransformer;
    use proptest::prelude::*;
    use std::path::Path;

    // ============================================================================
    // PathMapper property tests
    // ============================================================================

    proptest! {
        /// Property: mapping is deterministic (same input = same output)
        #[test]
        fn map_is_deterministic(rest in "[a-zA-Z0-9_/.]{0,40}") {
            let config = SyncConfig::default();
            let mapper = PathMapper::new(&config, Path::new("/checkout"));
            let path = format!("/trunk/weka/{}", rest);
            prop_assert_eq!(mapper.map(&path), mapper.map(&path));
        }

        /// Property: every target is relative to the downstream root and free
        /// of the test-reference token
        #[test]
        fn map_target_is_dot_relative(rest in "[a-v/]{0,20}(wekarefs)?[a-v/]{0,20}") {
            let config = SyncConfig::default();
            let mapper = PathMapper::new(&config, Path::new("/checkout"));
            let path = format!("/trunk/weka/src/{}", rest);
            let mapping = mapper.map(&path).unwrap();
            prop_assert!(mapping.target_relative.starts_with("./src/"));
            prop_assert!(!mapping.target_relative.contains("wekarefs"));
        }

        /// Property: the source keeps everything below the container segment
        #[test]
        fn map_source_ends_with_path_below_container(rest in "[a-zA-Z0-9_/.]{0,40}") {
            let config = SyncConfig::default();
            let mapper = PathMapper::new(&config, Path::new("/checkout"));
            let path = format!("/trunk/weka/{}", rest);
            let mapping = mapper.map(&path).unwrap();
            let source = mapping.source_absolute.to_string_lossy().into_owned();
            prop_assert_eq!(source, format!("/checkout/weka/{}", rest));
        }
    }

    // ============================================================================
    // PathFilter property tests
    // ============================================================================

    proptest! {
        /// Property: paths outside the upstream prefix are never included
        #[test]
        fn filter_never_includes_outside_prefix(path in "/[a-z]{1,10}/[a-z/]{0,30}") {
            prop_assume!(!path.starts_with("/trunk/weka/"));
            let config = SyncConfig::default();
            let filter = PathFilter::new(&config);
            prop_assert!(!filter.classify(&path).is_included());
        }

        /// Property: anything below a blacklisted prefix is excluded
        #[test]
        fn filter_excludes_below_blacklisted_prefix(
            idx in 0usize..12,
            rest in "[a-zA-Z0-9/]{0,30}",
        ) {
            let config = SyncConfig::default();
            let prefixes: Vec<&String> = config.rules.prefixes.iter().collect();
            let prefix = prefixes[idx % prefixes.len()];
            let filter = PathFilter::new(&config);
            let path = format!("{}{}", prefix, rest);
            prop_assert!(!filter.classify(&path).is_included());
        }
    }

    // ============================================================================
    // ContentTransformer property tests
    // ============================================================================

    proptest! {
        /// Property: text without markers passes through byte-identical
        #[test]
        fn transform_without_markers_is_identity(text in "[a-zA-Z0-9 (){};\n]{0,200}") {
            let config = SyncConfig::default();
            let transformer = ContentTransformer::new(&config.annotations);
            prop_assert!(!transformer.requires_transform(&text));
            prop_assert_eq!(transformer.transform(&text).text, text);
        }

        /// Property: a single-line marker removes exactly its own line
        #[test]
        fn transform_removes_single_marker_line(
            before in prop::collection::vec("[a-z ;]{0,20}", 0..10),
            after in prop::collection::vec("[a-z ;]{0,20}", 0..10),
        ) {
            let config = SyncConfig::default();
            let transformer = ContentTransformer::new(&config.annotations);
            let mut lines = before.clone();
            lines.push("  @ProgrammaticProperty".to_string());
            lines.extend(after.iter().cloned());
            let input = lines.join("\n") + "\n";

            let mut expected_lines = before;
            expected_lines.extend(after);
            let expected = if expected_lines.is_empty() {
                String::new()
            } else {
                expected_lines.join("\n") + "\n"
            };

            let filtered = transformer.transform(&input);
            prop_assert_eq!(filtered.text, expected);
            prop_assert_eq!(filtered.removed_lines, 1);
        }
    }
}
