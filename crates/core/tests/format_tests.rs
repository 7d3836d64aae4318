// Integration tests for the box text format and the file helpers.
// Run with: cargo test -p boxkv-core --test format_tests

use boxkv_core::{file, Settings, SkipReason, StoreError};
use proptest::prelude::*;

const REFERENCE: &str = "\
#network
host 127.0.0.1
port 8080
--comment, ignored
#flags
enabled 1
";

// -------------------------------------------------------------------------
// Reference document
// -------------------------------------------------------------------------

#[test]
fn reference_document_reads_two_boxes() {
    let mut settings = Settings::new();
    settings.read(REFERENCE.as_bytes()).unwrap();

    let network = settings.get("network").expect("network box");
    let pairs: Vec<(&str, &str)> = network.pairs().map(|p| (p.name(), p.as_str())).collect();
    assert_eq!(pairs, vec![("host", "127.0.0.1"), ("port", "8080")]);

    assert!(settings.section("flags").entry("enabled").as_bool());
    assert_eq!(settings.section("network").entry("port").as_i32(), 8080);
}

#[test]
fn reference_document_writes_canonical_form() {
    let mut settings = Settings::new();
    settings.read(REFERENCE.as_bytes()).unwrap();

    assert_eq!(
        settings.to_string(),
        "\n#network\nhost 127.0.0.1\nport 8080\n\n#flags\nenabled 1\n"
    );
}

#[test]
fn malformed_lines_do_not_disturb_neighbours() {
    let input = "\
stray line
#a
one 1
garbage
-- note
two 2
#b
three 3
";
    let mut settings = Settings::new();
    let report = settings.read(input.as_bytes()).unwrap();

    assert_eq!(settings.get("a").unwrap().len(), 2);
    assert_eq!(settings.value("b", "three").unwrap().as_u32(), 3);

    let reasons: Vec<(usize, SkipReason)> =
        report.skipped.iter().map(|s| (s.line, s.reason)).collect();
    assert_eq!(
        reasons,
        vec![
            (1, SkipReason::OutsideBox),
            (4, SkipReason::MissingDelimiter),
            (5, SkipReason::Separator),
        ]
    );
}

#[test]
fn programmatic_boxes_follow_read_boxes() {
    let mut settings = Settings::new();
    settings.read(REFERENCE.as_bytes()).unwrap();
    settings.section("added").entry("k").set("v");
    settings.section("network").entry("proto").set("tcp");

    let names: Vec<&str> = settings.sections().map(|s| s.name()).collect();
    assert_eq!(names, vec!["network", "flags", "added"]);
    assert!(settings.to_string().contains("port 8080\nproto tcp\n"));
}

// -------------------------------------------------------------------------
// File helpers
// -------------------------------------------------------------------------

#[test]
fn save_then_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/app.box");

    let mut settings = Settings::new();
    settings.section("window").entry("width").set(1280u32);
    settings.section("window").entry("fullscreen").set(true);

    file::save(&settings, &path).unwrap();
    let (loaded, report) = file::load(&path).unwrap();

    assert_eq!(loaded, settings);
    assert!(report.is_clean());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "\n#window\nwidth 1280\nfullscreen 1\n"
    );
}

#[test]
fn load_into_overlays_existing_tree() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overlay.box");
    std::fs::write(&path, "#a\nk file\n").unwrap();

    let mut settings = Settings::new();
    settings.section("a").entry("k").set("memory");
    settings.section("a").entry("keep").set("yes");
    file::load_into(&mut settings, &path).unwrap();

    assert_eq!(settings.value("a", "k").unwrap().as_str(), "file");
    assert_eq!(settings.value("a", "keep").unwrap().as_str(), "yes");
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.box");

    match file::load(&path) {
        Err(StoreError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// -------------------------------------------------------------------------
// Properties
// -------------------------------------------------------------------------

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.]{0,8}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,16}"
}

fn tree_strategy() -> impl Strategy<Value = Vec<(String, Vec<(String, String)>)>> {
    prop::collection::vec(
        (
            name_strategy(),
            prop::collection::vec((name_strategy(), value_strategy()), 0..5),
        ),
        0..5,
    )
}

fn build(tree: &[(String, Vec<(String, String)>)]) -> Settings {
    let mut settings = Settings::new();
    for (section, pairs) in tree {
        let section = settings.section(section);
        for (name, value) in pairs {
            section.entry(name).set(value);
        }
    }
    settings
}

proptest! {
    #[test]
    fn prop_write_read_roundtrip(tree in tree_strategy()) {
        let original = build(&tree);

        let mut bytes = Vec::new();
        original.write(&mut bytes).unwrap();

        let mut copy = Settings::new();
        let report = copy.read(bytes.as_slice()).unwrap();

        prop_assert_eq!(&copy, &original);
        prop_assert!(report.is_clean());
    }

    #[test]
    fn prop_write_is_idempotent(tree in tree_strategy()) {
        let settings = build(&tree);

        let mut first = Vec::new();
        let mut second = Vec::new();
        settings.write(&mut first).unwrap();
        settings.write(&mut second).unwrap();

        prop_assert_eq!(first, second);
    }
}
