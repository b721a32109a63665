//! Property-based tests for the decomposition core.
//!
//! Note: The decompose module already has example-based tests for filename
//! splitting. This module focuses on invariants that should hold for any
//! generated path: decomposition shape, derivation purity, and the
//! relative-path relation.

use proptest::prelude::*;

use super::decompose::ParseOptions;
use super::{Overrides, PathValue, ASCENT};

// Strategy for generating path-like strings
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..8).prop_map(|parts| format!("/{}", parts.join("/")))
}

fn filename_strategy() -> impl Strategy<Value = String> {
    (segment_strategy(), prop::option::of("[a-z0-9]{1,5}")).prop_map(|(base, ext)| match ext {
        Some(ext) => format!("{base}.{ext}"),
        None => base,
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_shrink_iters: 10000,
        .. ProptestConfig::default()
    })]

    // Parsing a canonical absolute string round-trips exactly
    #[test]
    fn parse_round_trips_canonical_strings(s in absolute_path_strategy()) {
        let v = ParseOptions::file().parse(&s).unwrap();
        prop_assert_eq!(v.path_str(), s);
    }

    // filename is absent iff base is absent
    #[test]
    fn filename_absent_iff_base_absent(s in absolute_path_strategy()) {
        let file = ParseOptions::file().parse(&s).unwrap();
        prop_assert_eq!(file.filename().is_none(), file.base().is_none());

        let dir = ParseOptions::dir().parse(&s).unwrap();
        prop_assert!(dir.base().is_none());
        prop_assert!(dir.filename().is_none());
    }

    // ext present implies base present, non-empty, dot-free
    #[test]
    fn ext_invariants(dir in absolute_path_strategy(), name in filename_strategy()) {
        let v = ParseOptions::file().parse(&format!("{dir}/{name}")).unwrap();
        if let Some(ext) = v.ext() {
            prop_assert!(v.base().is_some());
            prop_assert!(!ext.is_empty());
            prop_assert!(!ext.contains('.'));
        }
    }

    // Recomposing the filename and re-splitting is idempotent
    #[test]
    fn filename_split_idempotent(dir in absolute_path_strategy(), name in filename_strategy()) {
        let v = ParseOptions::file().parse(&format!("{dir}/{name}")).unwrap();
        if let Some(filename) = v.filename() {
            let again = v.with(&Overrides::new().filename(filename)).unwrap();
            prop_assert_eq!(again.base(), v.base());
            prop_assert_eq!(again.ext(), v.ext());
        }
    }

    // Stored segments never contain a separator
    #[test]
    fn segments_fully_split(s in absolute_path_strategy()) {
        let v = ParseOptions::file().parse(&s).unwrap();
        for seg in v.dirs() {
            prop_assert!(!seg.contains('/'));
            prop_assert!(!seg.is_empty());
        }
    }

    // with() never mutates the receiver
    #[test]
    fn with_is_pure(s in absolute_path_strategy(), ext in "[a-z]{1,4}") {
        let v = ParseOptions::file().parse(&s).unwrap();
        let before = v.path_str();
        let _ = v.with(&Overrides::new().ext(ext));
        let _ = v.with(&Overrides::new().dir("/elsewhere"));
        prop_assert_eq!(v.path_str(), before);
    }

    // Anchoring the relative result back on the anchor reaches the target
    #[test]
    fn relative_to_rejoins(target in absolute_path_strategy(), anchor in absolute_path_strategy()) {
        let target = ParseOptions::file().parse(&target).unwrap();
        let anchor = ParseOptions::dir().parse(&anchor).unwrap();
        let rel = target.relative_to(&anchor);

        let rejoined = anchor.join(&rel.path_str());
        // Ascent never outnumbers the anchor's depth, so the join succeeds
        // and lands exactly on the target.
        prop_assert!(rejoined.is_ok());
        prop_assert_eq!(rejoined.unwrap().path_str(), target.path_str());
    }

    // Ascent count never exceeds the anchor's depth
    #[test]
    fn relative_to_bounded_ascent(target in absolute_path_strategy(), anchor in absolute_path_strategy()) {
        let target = ParseOptions::dir().parse(&target).unwrap();
        let anchor = ParseOptions::dir().parse(&anchor).unwrap();
        let rel = target.relative_to(&anchor);

        let ascents = rel.dirs().iter().take_while(|d| d.as_str() == ASCENT).count();
        prop_assert!(ascents <= anchor.dirs().len());
    }

    // parent_of is transitive along constructed descendants
    #[test]
    fn parent_of_transitive(base in absolute_path_strategy(), d1 in 1..4usize, d2 in 1..4usize) {
        let base = ParseOptions::dir().parse(&base).unwrap();
        let mid_path = (0..d1).map(|i| format!("sub{i}")).collect::<Vec<_>>().join("/");
        let mid = base.join(&format!("{mid_path}/")).unwrap();
        let leaf_path = (0..d2).map(|i| format!("deep{i}")).collect::<Vec<_>>().join("/");
        let leaf = mid.join(&format!("{leaf_path}/")).unwrap();

        prop_assert!(base.parent_of(&mid));
        prop_assert!(mid.parent_of(&leaf));
        prop_assert!(base.parent_of(&leaf));
        prop_assert!(leaf.child_of(&base));
    }
}
