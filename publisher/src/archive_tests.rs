//! Unit tests for the zip archive builder.

use super::*;
use crate::rules::{CONFIG_EXCLUDES, CONFIG_INCLUDES};
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

fn utf8(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir")
}

fn write(root: &Utf8Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write file");
}

fn entry_names(archive: &Utf8Path) -> Vec<String> {
    let file = fs::File::open(archive).expect("open archive");
    let zip = zip::ZipArchive::new(file).expect("read archive");
    zip.file_names().map(str::to_owned).collect()
}

#[rstest]
#[case::top_level("flex-config.xml", true)]
#[case::serialized("localFonts.ser", true)]
#[case::excluded("build.xml", false)]
#[case::unicode_table("flash-unicode-table.xml", false)]
#[case::other_extension("README.txt", false)]
#[case::nested("projects/build.xml", false)]
fn config_filter(#[case] path: &str, #[case] expected: bool) {
    let filter = FileFilter::new(CONFIG_INCLUDES, CONFIG_EXCLUDES).expect("valid globs");
    assert_eq!(filter.matches(path), expected);
}

#[rstest]
#[case::properties_at_root("messages.properties", true)]
#[case::nested_properties("flex2/tools/oem/x.properties", true)]
#[case::compiler_tree("flex2/compiler/as3/Parser.java", true)]
#[case::tools_top_only("flex2/tools/Mxmlc.java", true)]
#[case::tools_nested_excluded("flex2/tools/oem/Builder.java", false)]
#[case::flash_tree("flash/util/Trace.java", true)]
#[case::unrelated("macromedia/asc/Main.java", false)]
fn mxmlc_source_filter(#[case] path: &str, #[case] expected: bool) {
    let source = crate::rules::compiler_source("mxmlc").expect("mxmlc has sources");
    let filter = FileFilter::new(source.includes, &[]).expect("valid globs");
    assert_eq!(filter.matches(path), expected);
}

#[test]
fn invalid_glob_is_reported() {
    let err = FileFilter::new(&["[unclosed"], &[]).expect_err("malformed glob");
    assert!(matches!(err, ArchiveError::InvalidPattern { .. }));
}

#[rstest]
fn directory_is_archived_recursively_with_relative_names(temp_dir: TempDir) {
    let root = utf8(&temp_dir);
    write(&root, "src/spark/components/Button.as", "class Button");
    write(&root, "src/spark/manifest.xml", "<manifest/>");
    write(&root, "src/.svn/entries", "hidden");

    let mut archiver = ZipArchiver::new();
    archiver
        .add_directory(&root.join("src"), &FileFilter::all())
        .expect("collect");
    let dest = root.join("out.zip");
    let count = archiver.create_archive(&dest).expect("archive");

    assert_eq!(count, 2);
    let mut names = entry_names(&dest);
    names.sort();
    assert_eq!(names, ["spark/components/Button.as", "spark/manifest.xml"]);
}

#[rstest]
fn top_level_collection_ignores_subdirectories(temp_dir: TempDir) {
    let root = utf8(&temp_dir);
    write(&root, "frameworks/flex-config.xml", "<flex-config/>");
    write(&root, "frameworks/build.xml", "<project/>");
    write(&root, "frameworks/projects/spark/build.xml", "<project/>");

    let filter = FileFilter::new(CONFIG_INCLUDES, CONFIG_EXCLUDES).expect("valid globs");
    let mut archiver = ZipArchiver::new();
    archiver
        .add_top_level(&root.join("frameworks"), &filter)
        .expect("collect");

    assert_eq!(archiver.len(), 1);
}

#[rstest]
fn reset_discards_previous_entries(temp_dir: TempDir) {
    let root = utf8(&temp_dir);
    write(&root, "a/one.txt", "1");
    write(&root, "b/two.txt", "2");

    let mut archiver = ZipArchiver::new();
    archiver
        .add_directory(&root.join("a"), &FileFilter::all())
        .expect("collect a");
    archiver.reset();
    archiver
        .add_directory(&root.join("b"), &FileFilter::all())
        .expect("collect b");
    let dest = root.join("out.zip");
    archiver.create_archive(&dest).expect("archive");

    assert_eq!(entry_names(&dest), ["two.txt"]);
}

#[rstest]
fn empty_collection_is_an_error(temp_dir: TempDir) {
    let root = utf8(&temp_dir);
    fs::create_dir_all(root.join("empty")).expect("mkdir");

    let mut archiver = ZipArchiver::new();
    archiver
        .add_directory(&root.join("empty"), &FileFilter::all())
        .expect("collect");
    let err = archiver
        .create_archive(&root.join("out.zip"))
        .expect_err("nothing to archive");

    assert!(matches!(err, ArchiveError::NothingToArchive { .. }));
    assert!(archiver.is_empty());
}

#[rstest]
fn missing_directory_is_io_error(temp_dir: TempDir) {
    let root = utf8(&temp_dir);
    let mut archiver = ZipArchiver::new();
    let err = archiver
        .add_directory(&root.join("absent"), &FileFilter::all())
        .expect_err("missing dir");
    assert!(matches!(err, ArchiveError::Io { .. }));
}
