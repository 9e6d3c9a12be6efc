//! Unit tests for the directory classifiers.

use super::*;
use crate::publisher::PublishTargets;
use crate::subsets::SubsetKind;
use crate::test_utils::{AIR_VERSION, RecordingStore, SDK_VERSION, SdkTree};
use rstest::{fixture, rstest};
use std::io::Read as _;
use tempfile::TempDir;

struct Outcome {
    result: Result<()>,
    store: RecordingStore,
    subsets: Subsets,
}

impl Outcome {
    fn names(&self, kind: SubsetKind) -> Vec<String> {
        self.subsets
            .members(kind)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

fn run_with<F>(tree: &SdkTree, versions: &VersionSet, scan: F) -> Outcome
where
    F: FnOnce(&mut RunContext<'_>) -> Result<()>,
{
    let store = RecordingStore::new();
    let targets = PublishTargets::install(Box::new(store.clone()));
    let scratch = TempDir::new().expect("scratch dir");
    let scratch_root = Utf8PathBuf::try_from(scratch.path().to_path_buf()).expect("utf8");
    let pom = scratch_root.join("generated.pom");
    let payload = scratch_root.join("payload.tmp");
    let layout = SdkLayout::new(tree.root().to_owned(), None);

    let mut ctx = RunContext::new(&layout, versions, Publisher::new(&targets, &pom), &payload);
    let result = scan(&mut ctx);
    let (_, subsets) = ctx.into_parts();
    Outcome {
        result,
        store,
        subsets,
    }
}

fn run<F>(tree: &SdkTree, scan: F) -> Outcome
where
    F: FnOnce(&mut RunContext<'_>) -> Result<()>,
{
    let versions = VersionSet::new(SDK_VERSION, Some(AIR_VERSION.to_owned()));
    run_with(tree, &versions, scan)
}

fn framework(name: &str, rest: &str) -> String {
    format!("com.adobe.flex.framework:{name}:{rest}")
}

fn zip_entries(bytes: &[u8]) -> Vec<String> {
    let zip = zip::ZipArchive::new(std::io::Cursor::new(bytes.to_vec())).expect("valid zip");
    zip.file_names().map(str::to_owned).collect()
}

#[fixture]
fn tree() -> SdkTree {
    SdkTree::new()
}

#[rstest]
fn each_swc_yields_one_library_named_by_stem(tree: SdkTree) {
    tree.library("foo.swc")
        .library("mx/bar.swc")
        .library("README.txt");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(
        outcome.store.coordinates(),
        [
            framework("foo", &format!("swc:{SDK_VERSION}")),
            framework("bar", &format!("swc:{SDK_VERSION}")),
        ]
    );
    assert!(outcome.names(SubsetKind::AirFrameworkSmall).is_empty());
}

#[rstest]
fn small_sdk_libraries_join_subsets_by_runtime_marker(tree: SdkTree) {
    tree.library("airframework.swc")
        .library("framework.swc")
        .library("air/airglobal.swc");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(
        outcome.names(SubsetKind::AirFrameworkSmall),
        [
            framework("airglobal", &format!("swc:{AIR_VERSION}")),
            framework("airframework", &format!("swc:{SDK_VERSION}")),
            framework("framework", &format!("swc:{SDK_VERSION}")),
        ]
    );
    assert_eq!(
        outcome.names(SubsetKind::FlexFrameworkSmall),
        [framework("framework", &format!("swc:{SDK_VERSION}"))]
    );
}

#[rstest]
fn airglobal_without_air_version_fails(tree: SdkTree) {
    tree.library("airglobal.swc");

    let outcome = run_with(&tree, &VersionSet::new(SDK_VERSION, None), scan_libraries);

    let err = outcome.result.expect_err("AIR version missing");
    assert!(matches!(err, PublisherError::Configuration { .. }));
    assert!(outcome.store.records().is_empty());
}

#[rstest]
#[case::default_layout("spark", "frameworks/projects/spark/src/Spark.as")]
#[case::updater(
    "applicationupdater",
    "frameworks/projects/air/ApplicationUpdater/src/ApplicationUpdater/Updater.as"
)]
#[case::monitor("servicemonitor", "frameworks/projects/air/Core/src/Monitor.as")]
fn library_sources_follow_override_table(tree: SdkTree, #[case] name: &str, #[case] source: &str) {
    tree.library(&format!("{name}.swc"))
        .file(source, "package {}");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    let sources = outcome
        .store
        .find(&framework(name, &format!("jar:sources:{SDK_VERSION}")))
        .expect("sources published");
    assert_eq!(zip_entries(&sources.payload).len(), 1);
    let pom = sources.pom.expect("sources carry a POM");
    assert!(pom.contains("<packaging>jar</packaging>"));
}

#[rstest]
fn missing_source_directory_skips_sources(tree: SdkTree) {
    tree.library("rpc.swc");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(outcome.store.records().len(), 1);
}

#[rstest]
fn single_player_version_names_the_artifact_version(tree: SdkTree) {
    tree.player("10");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    let player = framework("playerglobal", "swc:10");
    assert_eq!(outcome.store.coordinates(), [player.clone()]);
    assert_eq!(outcome.names(SubsetKind::FlexFrameworkSmall), [player]);
    assert!(outcome.names(SubsetKind::AirFrameworkSmall).is_empty());
}

#[rstest]
fn several_player_versions_fail_before_publishing(tree: SdkTree) {
    tree.player("10").player("10.1");

    let outcome = run(&tree, scan_libraries);

    match outcome.result {
        Err(PublisherError::ScanOrder { versions, .. }) => assert_eq!(versions, ["10", "10.1"]),
        other => panic!("expected ScanOrder, got {other:?}"),
    }
    assert!(outcome.store.records().is_empty());
}

#[rstest]
fn empty_player_directory_publishes_nothing(tree: SdkTree) {
    tree.dir("frameworks/libs/player");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    assert!(outcome.store.records().is_empty());
}

#[rstest]
fn en_us_bundles_are_published_twice(tree: SdkTree) {
    tree.locale_bundle("en_US", "framework_rb.swc")
        .locale_bundle("fr_FR", "framework_rb.swc");

    let outcome = run(&tree, scan_locales);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(
        outcome.store.coordinates(),
        [
            framework("framework", &format!("rb.swc:en_US:{SDK_VERSION}")),
            framework("framework", &format!("rb.swc:{SDK_VERSION}")),
            framework("framework", &format!("rb.swc:fr_FR:{SDK_VERSION}")),
        ]
    );
    let unclassified = framework("framework", &format!("rb.swc:{SDK_VERSION}"));
    assert_eq!(
        outcome.names(SubsetKind::AirFrameworkSmall),
        [unclassified.clone()]
    );
    assert_eq!(
        outcome.names(SubsetKind::FlexFrameworkSmall),
        [unclassified]
    );
}

#[rstest]
fn airglobal_bundle_uses_sdk_version(tree: SdkTree) {
    tree.locale_bundle("en_US", "airglobal_rb.swc");

    let outcome = run_with(&tree, &VersionSet::new(SDK_VERSION, None), scan_locales);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(
        outcome.names(SubsetKind::AirFrameworkSmall),
        [framework("airglobal", &format!("rb.swc:{SDK_VERSION}"))]
    );
    assert!(outcome.names(SubsetKind::FlexFrameworkSmall).is_empty());
}

#[rstest]
fn documentation_bundles_and_stray_files_are_skipped(tree: SdkTree) {
    tree.locale_bundle("ja_JP", "playerglobal_rb.swc")
        .locale_bundle("ja_JP", "flash-integration_rb.swc")
        .locale_bundle("ja_JP", "notes.txt")
        .locale_bundle("ja_JP", ".hidden_rb.swc")
        .file("frameworks/locale/README", "not a locale");

    let outcome = run(&tree, scan_locales);

    outcome.result.as_ref().expect("scan succeeds");
    assert!(outcome.store.records().is_empty());
}

#[rstest]
fn configs_bundle_excludes_build_files(tree: SdkTree) {
    tree.file("frameworks/build.xml", "<project/>")
        .file("frameworks/localFonts.ser", "fonts")
        .file("frameworks/projects/spark/build.xml", "<project/>");

    let outcome = run(&tree, scan_configs);

    outcome.result.as_ref().expect("scan succeeds");
    let coordinate = framework("framework", &format!("zip:configs:{SDK_VERSION}"));
    let configs = outcome.store.find(&coordinate).expect("configs published");
    let mut entries = zip_entries(&configs.payload);
    entries.sort();
    assert_eq!(entries, ["flex-config.xml", "localFonts.ser"]);
    assert_eq!(
        outcome.names(SubsetKind::AirFrameworkSmall),
        [coordinate.clone()]
    );
    assert_eq!(outcome.names(SubsetKind::FlexFrameworkSmall), [coordinate]);
}

#[rstest]
fn configs_without_matching_files_fail(tree: SdkTree) {
    tree.remove("frameworks/flex-config.xml");

    let outcome = run(&tree, scan_configs);

    assert!(matches!(outcome.result, Err(PublisherError::Archive(_))));
}

#[rstest]
fn theme_is_published_as_classified_stylesheet(tree: SdkTree) {
    let outcome = run(&tree, scan_themes);

    outcome.result.as_ref().expect("scan succeeds");
    let theme = outcome
        .store
        .find(&framework("spark", &format!("css:theme:{SDK_VERSION}")))
        .expect("theme published");
    assert_eq!(theme.payload, b"/* spark */");
}

#[rstest]
fn rsl_phase_publishes_nothing(tree: SdkTree) {
    let outcome = run(&tree, scan_rsls);

    outcome.result.as_ref().expect("no-op succeeds");
    assert!(outcome.store.records().is_empty());
}

#[rstest]
fn compiler_jars_respect_deny_list_and_locale_prefixes(tree: SdkTree) {
    tree.compiler_jar("adt.jar")
        .compiler_jar("compc.jar")
        .compiler_jar("mxmlc.jar")
        .compiler_jar("mxmlc_ja.jar")
        .compiler_jar("xercesImpl_ja.jar")
        .compiler_jar("notes.txt");

    let outcome = run(&tree, scan_compiler);

    outcome.result.as_ref().expect("scan succeeds");
    let expected = [
        format!("com.adobe.flex.compiler:adt:jar:{AIR_VERSION}"),
        format!("com.adobe.flex.compiler:mxmlc:jar:{SDK_VERSION}"),
    ];
    assert_eq!(outcome.store.coordinates(), expected);
    assert_eq!(outcome.names(SubsetKind::Compiler), expected);
}

#[rstest]
fn mxmlc_sources_are_restricted_to_include_globs(tree: SdkTree) {
    tree.compiler_jar("mxmlc.jar")
        .file(
            "modules/compiler/src/java/flex2/compiler/Main.java",
            "class",
        )
        .file(
            "modules/compiler/src/java/flex2/tools/oem/Builder.java",
            "class",
        )
        .file("modules/compiler/src/java/messages.properties", "k=v");

    let outcome = run(&tree, scan_compiler);

    outcome.result.as_ref().expect("scan succeeds");
    let sources = outcome
        .store
        .find(&format!("com.adobe.flex.compiler:mxmlc:jar:sources:{SDK_VERSION}"))
        .expect("sources published");
    let mut entries = zip_entries(&sources.payload);
    entries.sort();
    assert_eq!(entries, ["flex2/compiler/Main.java", "messages.properties"]);
}

#[rstest]
fn unknown_compiler_jars_publish_no_sources(tree: SdkTree) {
    tree.compiler_jar("fdb.jar")
        .file("modules/fdb/src/java/Fdb.java", "class");

    let outcome = run(&tree, scan_compiler);

    outcome.result.as_ref().expect("scan succeeds");
    assert_eq!(outcome.store.records().len(), 1);
}

#[rstest]
fn duplicate_coordinates_are_rejected(tree: SdkTree) {
    tree.library("foo.swc");

    let outcome = run(&tree, |ctx| {
        scan_libraries(ctx)?;
        scan_libraries(ctx)
    });

    assert!(matches!(
        outcome.result,
        Err(PublisherError::DuplicateCoordinate { .. })
    ));
    assert_eq!(outcome.store.records().len(), 1);
}

#[rstest]
fn archives_reuse_the_scratch_file(tree: SdkTree) {
    tree.library("spark.swc")
        .library("mx.swc")
        .file("frameworks/projects/spark/src/a.as", "a")
        .file("frameworks/projects/mx/src/b.as", "b");

    let outcome = run(&tree, scan_libraries);

    outcome.result.as_ref().expect("scan succeeds");
    let mx = outcome
        .store
        .find(&framework("mx", &format!("jar:sources:{SDK_VERSION}")))
        .expect("mx sources");
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(mx.payload)).expect("zip");
    let mut contents = String::new();
    archive
        .by_name("b.as")
        .expect("entry")
        .read_to_string(&mut contents)
        .expect("read");
    assert_eq!(contents, "b");
    assert_eq!(archive.len(), 1);
}
