//! Integration tests for the pure decomposition core.
//!
//! This test suite verifies that:
//! - Parsing round-trips canonical strings and resolves dot components
//! - Filename splitting follows the last-dot rule, dotfiles included
//! - Derivation via `with` is pure and applies overrides independently
//! - The relative-path algorithm produces the documented sequences
//! - Structural relations (parent/child, ordering) behave as documented
//!
//! Nothing here touches the filesystem beyond the current-directory read
//! used by unanchored parsing.

use pathform::{NodeKind, Overrides, ParseOptions, PathValue, Relativity};

// =============================================================================
// Parsing and decomposition
// =============================================================================

#[test]
fn test_parse_round_trip_canonical() {
    for raw in ["/a/b/c.txt", "/one.gz", "/deep/er/and/deep.er.still"] {
        let v = PathValue::from_file(raw).unwrap();
        assert_eq!(v.path_str(), raw, "round-trip of {raw}");
    }
}

#[test]
fn test_parse_canonicalizes_dots() {
    let v = PathValue::from_file("/a/./b/../c/out.log").unwrap();
    assert_eq!(v.path_str(), "/a/c/out.log");
    assert!(v.dirs().iter().all(|d| d != "." && d != ".."));
}

#[test]
fn test_archive_tar_gz_split() {
    let v = PathValue::from_file("/srv/archive.tar.gz").unwrap();
    assert_eq!(v.base(), Some("archive.tar"));
    assert_eq!(v.ext(), Some("gz"));
}

#[test]
fn test_dotfile_has_no_extension() {
    let v = PathValue::from_file("/home/alice/.bashrc").unwrap();
    assert_eq!(v.base(), Some(".bashrc"));
    assert_eq!(v.ext(), None);
}

#[test]
fn test_trailing_separator_beats_file_hint() {
    let v = ParseOptions::new()
        .kind(NodeKind::File)
        .parse("/opt/tools/")
        .unwrap();
    assert!(v.base().is_none());
    assert_eq!(v.dirs(), ["opt", "tools"]);
}

#[test]
fn test_empty_input_rejected() {
    let err = PathValue::parse("").unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_escaping_root_rejected() {
    assert!(PathValue::from_dir("/a/../../b").is_err());
}

// =============================================================================
// Derivation
// =============================================================================

#[test]
fn test_ext_normalization_equivalence() {
    let v = PathValue::from_file("/srv/dump.sql").unwrap();
    let dotted = v.with(&Overrides::new().ext(".gz")).unwrap();
    let bare = v.with(&Overrides::new().ext("gz")).unwrap();
    assert_eq!(dotted, bare);
    assert_eq!(dotted.path_str(), "/srv/dump.gz");

    let cleared = v.with(&Overrides::new().ext("")).unwrap();
    assert!(cleared.ext().is_none());
}

#[test]
fn test_with_purity_snapshot() {
    let v = PathValue::from_file("/srv/dump.sql").unwrap();
    let snapshot = (
        v.dirs().to_vec(),
        v.base().map(String::from),
        v.ext().map(String::from),
    );

    let _ = v.with(&Overrides::new().dirs(["x"]).base("y").ext("z"));
    let _ = v.with(&Overrides::new().path("/entirely/else.where"));

    assert_eq!(v.dirs(), snapshot.0);
    assert_eq!(v.base(), snapshot.1.as_deref());
    assert_eq!(v.ext(), snapshot.2.as_deref());
}

#[test]
fn test_overrides_apply_independently() {
    let v = PathValue::from_file("/data/in/frame.png").unwrap();

    let only_ext = v.with(&Overrides::new().ext("webp")).unwrap();
    assert_eq!(only_ext.dirs(), v.dirs());
    assert_eq!(only_ext.base(), v.base());

    let only_dir = v.with(&Overrides::new().dir("/data/out")).unwrap();
    assert_eq!(only_dir.filename(), v.filename());
    assert_eq!(only_dir.dirs(), ["data", "out"]);
}

#[test]
fn test_ext_override_on_directory_fails_fast() {
    let d = PathValue::from_dir("/data/in").unwrap();
    let err = d.with(&Overrides::new().ext("gz")).unwrap_err();
    assert!(err.is_invalid_input());
}

// =============================================================================
// Relative paths
// =============================================================================

#[test]
fn test_relative_to_sibling_branch() {
    let target = PathValue::from_dir("/usr/local/lib/pkg").unwrap();
    let anchor = PathValue::from_dir("/usr/local/bin").unwrap();
    assert_eq!(target.relative_to(&anchor).dirs(), ["..", "lib", "pkg"]);
}

#[test]
fn test_relative_to_no_common_prefix() {
    let target = PathValue::from_dir("/c/d/e").unwrap();
    let anchor = PathValue::from_dir("/a/b").unwrap();
    assert_eq!(
        target.relative_to(&anchor).dirs(),
        ["..", "..", "c", "d", "e"]
    );
}

#[test]
fn test_relative_result_is_tagged_relative() {
    let target = PathValue::from_file("/a/b/x.txt").unwrap();
    let anchor = PathValue::from_dir("/a").unwrap();
    let rel = target.relative_to(&anchor);
    assert_eq!(rel.relativity(), Relativity::Relative);
    assert_eq!(rel.path_str(), "b/x.txt");
    assert_eq!(rel.base(), Some("x"));
    assert_eq!(rel.ext(), Some("txt"));
}

#[test]
fn test_relative_against_cwd() {
    let cwd = std::env::current_dir().unwrap();
    let target = PathValue::from_file(&format!("{}/sub/file.txt", cwd.display())).unwrap();
    let rel = target.relative().unwrap();
    assert_eq!(rel.path_str(), "sub/file.txt");
}

// =============================================================================
// Structural relations
// =============================================================================

#[test]
fn test_parent_child_relation() {
    let etc = PathValue::from_dir("/etc").unwrap();
    let ssh = PathValue::from_dir("/etc/ssh").unwrap();
    let etc2 = PathValue::from_dir("/etc2/ssh").unwrap();

    assert!(etc.parent_of(&ssh));
    assert!(!etc.parent_of(&etc2));
    assert!(ssh.child_of(&etc));
    assert!(!etc2.child_of(&etc));
}

#[test]
fn test_ordering_by_path_string() {
    let mut values = vec![
        PathValue::from_file("/b/z.txt").unwrap(),
        PathValue::from_file("/a/z.txt").unwrap(),
        PathValue::from_dir("/a").unwrap(),
    ];
    values.sort();
    let strings: Vec<_> = values.iter().map(PathValue::path_str).collect();
    assert_eq!(strings, ["/a", "/a/z.txt", "/b/z.txt"]);
}

#[test]
fn test_join_then_relative_inverts() {
    let anchor = PathValue::from_dir("/projects/app").unwrap();
    let target = PathValue::from_file("/projects/lib/src/core.rs").unwrap();

    let rel = target.relative_to(&anchor);
    let rejoined = anchor.join(&rel.path_str()).unwrap();
    assert_eq!(rejoined, target);
}
