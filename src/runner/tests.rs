use crate::colorize;
use crate::config::ListingOptions;
use crate::logger::Logger;
use crate::runner::run;
use std::fs::{self, File};
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

fn plain(paths: &[&Path]) -> ListingOptions {
    ListingOptions {
        capture: true,
        paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        ..Default::default()
    }
}

fn list(options: &ListingOptions) -> (String, String) {
    let mut out = Vec::new();
    let mut log = Logger::new(Vec::new());
    run(options, &mut out, &mut log).unwrap();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(log.into_inner()).unwrap(),
    )
}

fn touch(path: &Path, secs: u64) {
    let file = File::create(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

fn shown(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_compact_colors_by_type() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "text").unwrap();
    fs::set_permissions(dir.path().join("a.txt"), fs::Permissions::from_mode(0o644)).unwrap();
    fs::write(dir.path().join("run.sh"), "#!/bin/sh\n").unwrap();
    fs::set_permissions(dir.path().join("run.sh"), fs::Permissions::from_mode(0o755)).unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let mut options = plain(&[dir.path()]);
    options.capture = false;
    colorize::enable(true);
    let (out, err) = list(&options);

    assert_eq!(out, "a.txt  \x1b[32mrun.sh\x1b[0m  \x1b[34msub\x1b[0m\n");
    assert!(err.is_empty());
}

#[test]
fn test_hidden_entries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".env"), "").unwrap();
    fs::write(dir.path().join("main.rs"), "").unwrap();

    let (out, _) = list(&plain(&[dir.path()]));
    assert_eq!(out, "main.rs\n");

    let mut options = plain(&[dir.path()]);
    options.show_hidden = true;
    let (out, _) = list(&options);
    assert_eq!(out, ".  ..  .env  main.rs\n");
}

#[test]
fn test_time_sort_reversed_is_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("new"), 3_000);
    touch(&dir.path().join("old"), 1_000);
    touch(&dir.path().join("mid"), 2_000);

    let mut options = plain(&[dir.path()]);
    options.time_sort = true;
    let (out, _) = list(&options);
    assert_eq!(out, "new  mid  old\n");

    options.reverse = true;
    let (out, _) = list(&options);
    assert_eq!(out, "old  mid  new\n");
}

#[test]
fn test_single_file_long() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "12345").unwrap();

    let mut options = plain(&[file.as_path()]);
    options.long = true;
    let (out, err) = list(&options);

    assert_eq!(out.lines().count(), 1);
    assert!(!out.contains("total"));
    assert!(out.starts_with('-'));
    assert!(out.trim_end().ends_with(&format!(" {}", shown(&file))));
    assert!(err.is_empty());
}

#[test]
fn test_single_file_compact_prints_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("run.sh");
    fs::write(&file, "").unwrap();
    fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).unwrap();

    let mut options = plain(&[file.as_path()]);
    options.capture = false;
    let (out, _) = list(&options);
    assert_eq!(out, format!("{}\n", shown(&file)));
}

#[test]
fn test_directory_long_has_total() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one"), "1").unwrap();
    fs::write(dir.path().join("two"), "22").unwrap();

    let mut options = plain(&[dir.path()]);
    options.long = true;
    let (out, _) = list(&options);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("total "));
    assert!(lines[1].ends_with(" one"));
    assert!(lines[2].ends_with(" two"));
}

#[test]
fn test_missing_path_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    let present = dir.path().join("present");
    fs::create_dir(&present).unwrap();
    fs::write(present.join("x"), "").unwrap();

    let (out, err) = list(&plain(&[missing.as_path(), present.as_path()]));

    assert_eq!(
        err,
        format!("eles: cannot access '{}': No such file or directory\n", shown(&missing))
    );
    assert_eq!(out, format!("{}:\nx\n", shown(&present)));
}

#[test]
fn test_file_under_file_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "").unwrap();
    let bogus = file.join("child");

    let (out, err) = list(&plain(&[bogus.as_path()]));
    assert!(out.is_empty());
    assert_eq!(
        err,
        format!("eles: cannot access '{}': Not a directory\n", shown(&bogus))
    );
}

#[test]
fn test_multiple_directories_get_headers() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");
    fs::create_dir(&first).unwrap();
    fs::create_dir(&second).unwrap();
    fs::write(first.join("x"), "").unwrap();
    fs::write(second.join("y"), "").unwrap();

    let (out, _) = list(&plain(&[first.as_path(), second.as_path()]));
    assert_eq!(
        out,
        format!("{}:\nx\n\n{}:\ny\n", shown(&first), shown(&second))
    );
}

#[test]
fn test_files_listed_before_directories() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("folder");
    let file = dir.path().join("file");
    fs::create_dir(&folder).unwrap();
    fs::write(folder.join("inside"), "").unwrap();
    fs::write(&file, "").unwrap();

    let (out, _) = list(&plain(&[folder.as_path(), file.as_path()]));
    assert_eq!(
        out,
        format!("{}\n\n{}:\ninside\n", shown(&file), shown(&folder))
    );
}

#[test]
fn test_recursive_skips_symlinked_directories() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a.txt"), "").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/inner.txt"), "").unwrap();
    // points back at the root; following it would never end
    symlink("..", root.join("sub/up")).unwrap();
    fs::create_dir(root.join("zed")).unwrap();

    let mut options = plain(&[root]);
    options.recursive = true;
    let (out, err) = list(&options);

    let sub: PathBuf = root.join("sub");
    let zed: PathBuf = root.join("zed");
    assert_eq!(
        out,
        format!(
            "{}:\na.txt  sub  zed\n\n{}:\ninner.txt  up\n\n{}:\n",
            shown(root),
            shown(&sub),
            shown(&zed)
        )
    );
    assert!(err.is_empty());
}

#[test]
fn test_recursive_descends_depth_first_in_sort_order() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("b/deep")).unwrap();
    fs::create_dir(root.join("a")).unwrap();

    let mut options = plain(&[root]);
    options.recursive = true;
    options.reverse = true;
    let (out, _) = list(&options);

    let headers: Vec<&str> = out.lines().filter(|l| l.ends_with(':')).collect();
    let expected = [
        format!("{}:", shown(root)),
        format!("{}:", shown(&root.join("b"))),
        format!("{}:", shown(&root.join("b/deep"))),
        format!("{}:", shown(&root.join("a"))),
    ];
    assert_eq!(headers, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_recursive_with_hidden_does_not_revisit_dot_entries() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join(".cache")).unwrap();

    let mut options = plain(&[root]);
    options.recursive = true;
    options.show_hidden = true;
    let (out, _) = list(&options);

    assert_eq!(
        out,
        format!(
            "{}:\n.  ..  .cache\n\n{}:\n.  ..\n",
            shown(root),
            shown(&root.join(".cache"))
        )
    );
}

#[test]
fn test_file_arguments_sort_on_last_component() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("a"), "").unwrap();
    fs::write(root.join("b"), "").unwrap();
    let dotted = root.join("./b");
    let direct = root.join("a");

    let (out, _) = list(&plain(&[dotted.as_path(), direct.as_path()]));
    assert_eq!(out, format!("{}\n{}\n", shown(&direct), shown(&dotted)));
}
