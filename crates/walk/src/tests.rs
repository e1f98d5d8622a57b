use super::*;
use std::fs;
use std::path::{Path, PathBuf};

const LIMIT_3: &str = "Maximum visits for symlink (3) reached. Skipping further traversal.";

fn sorted_listing(root: &Path, max_visits: u32) -> Vec<String> {
    traverse_with(
        WalkBuilder::new(root)
            .max_visits(max_visits)
            .entry_order(EntryOrder::Lexicographic),
    )
    .expect("traverse")
}

/// Creates `dir/file.txt` below `base` and returns the directory path.
fn dir_with_file(base: &Path) -> PathBuf {
    let dir = base.join("dir");
    fs::create_dir(&dir).expect("create dir");
    fs::write(dir.join("file.txt"), b"content").expect("write file");
    dir
}

#[test]
fn walk_lists_plain_tree() {
    let temp = tempfile::tempdir().expect("tempdir");
    dir_with_file(temp.path());

    let lines = traverse(temp.path(), 2).expect("traverse");
    assert_eq!(lines, vec!["dir/", "  dir/file.txt"]);
}

#[test]
fn walk_lists_nested_tree_in_pre_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("a/deeper")).expect("create a/deeper");
    fs::create_dir(root.join("b")).expect("create b");
    fs::write(root.join("a/inner.txt"), b"data").expect("write inner");
    fs::write(root.join("a/deeper/leaf.txt"), b"data").expect("write leaf");
    fs::write(root.join("c.txt"), b"data").expect("write c");

    assert_eq!(
        sorted_listing(root, 3),
        vec![
            "a/",
            "  a/deeper/",
            "    a/deeper/leaf.txt",
            "  a/inner.txt",
            "b/",
            "c.txt",
        ]
    );
}

#[test]
fn walk_missing_root_reports_path_not_found() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("missing");

    let lines = traverse(&missing, 3).expect("traverse");
    assert_eq!(lines, vec![format!("Path not found: {}", missing.display())]);
}

#[test]
fn walk_missing_relative_root_is_reported_as_given() {
    let relative = Path::new("symtree-missing-relative-root");
    assert!(!relative.exists());

    let lines = traverse(relative, 3).expect("traverse");
    assert_eq!(lines, vec!["Path not found: symtree-missing-relative-root"]);
}

#[test]
fn walk_reports_subdirectory_removed_after_parent_scan() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir(root.join("vanishing")).expect("create vanishing");

    let mut walker = WalkBuilder::new(root).build().expect("build walker");
    fs::remove_dir(root.join("vanishing")).expect("remove vanishing");

    let first = walker.next().expect("directory line").expect("line");
    assert_eq!(first.kind(), &LineKind::Directory(PathBuf::from("vanishing")));
    assert_eq!(first.depth(), 0);

    let second = walker.next().expect("diagnostic line").expect("line");
    assert!(second.is_diagnostic());
    assert_eq!(second.depth(), 1);
    assert_eq!(second.into_kind(), LineKind::NotFound(root.join("vanishing")));
    assert!(walker.next().is_none());
}

#[test]
fn walker_exposes_resolved_root_and_cap() {
    let temp = tempfile::tempdir().expect("tempdir");
    dir_with_file(temp.path());

    let walker = WalkBuilder::new(temp.path().join("dir/../dir"))
        .max_visits(7)
        .build()
        .expect("build walker");

    let resolved = fs::canonicalize(temp.path().join("dir")).expect("canonical dir");
    assert_eq!(walker.root(), resolved.as_path());
    assert_eq!(walker.max_visits(), 7);

    let kinds: Vec<LineKind> = walker
        .map(|line| line.expect("line").into_kind())
        .collect();
    assert_eq!(kinds, vec![LineKind::File(PathBuf::from("file.txt"))]);
}

#[test]
fn walk_file_root_is_fatal() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("file.txt");
    fs::write(&file, b"data").expect("write");

    let error = traverse(&file, 3).expect_err("a file cannot be listed");
    assert!(matches!(error.kind(), WalkErrorKind::ReadDir { .. }));
    assert!(error.path().ends_with("file.txt"));
}

#[test]
fn walk_is_idempotent() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    dir_with_file(root);
    fs::create_dir(root.join("empty")).expect("create empty");

    assert_eq!(traverse(root, 3).expect("first"), traverse(root, 3).expect("second"));
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn walk_follows_directory_symlink_within_cap() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = dir_with_file(temp.path());
        symlink(&dir, temp.path().join("symlink_dir")).expect("symlink");

        assert_eq!(
            sorted_listing(temp.path(), 1),
            vec!["dir/", "  dir/file.txt", "symlink_dir -> dir", "  dir/file.txt"]
        );
    }

    #[test]
    fn walk_native_order_keeps_each_subtree_together() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = dir_with_file(temp.path());
        symlink(&dir, temp.path().join("symlink_dir")).expect("symlink");

        let lines = traverse(temp.path(), 1).expect("traverse");
        let link_first = vec!["symlink_dir -> dir", "  dir/file.txt", "dir/", "  dir/file.txt"];
        let dir_first = vec!["dir/", "  dir/file.txt", "symlink_dir -> dir", "  dir/file.txt"];
        assert!(
            lines == link_first || lines == dir_first,
            "unexpected listing: {lines:?}"
        );
    }

    #[test]
    fn walk_caps_self_referential_symlink() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).expect("create dir");
        symlink(&dir, dir.join("symlink_dir")).expect("symlink");

        let lines = traverse(temp.path(), 3).expect("traverse");
        assert_eq!(
            lines,
            vec![
                "dir/",
                "  dir/symlink_dir -> dir",
                "    dir/symlink_dir -> dir",
                "      dir/symlink_dir -> dir",
                "        dir/symlink_dir -> dir",
                LIMIT_3,
            ]
        );
    }

    #[test]
    fn walk_ledger_records_visits_per_resolved_target() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("dir");
        fs::create_dir(&dir).expect("create dir");
        symlink(&dir, dir.join("symlink_dir")).expect("symlink");

        let mut walker = WalkBuilder::new(temp.path()).build().expect("build walker");
        let lines: Vec<ListingLine> = walker
            .by_ref()
            .collect::<Result<_, _>>()
            .expect("walk succeeds");

        let depths: Vec<usize> = lines.iter().map(ListingLine::depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 3, 4, 4]);
        assert_eq!(lines[5].kind(), &LineKind::VisitLimit(DEFAULT_MAX_VISITS));

        let resolved = fs::canonicalize(&dir).expect("canonical dir");
        assert_eq!(walker.ledger().visits(&resolved), DEFAULT_MAX_VISITS);
        assert_eq!(walker.ledger().len(), 1);
        assert!(walker.next().is_none());
    }

    #[test]
    fn walk_links_to_same_target_share_one_budget() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = dir_with_file(temp.path());
        symlink(&dir, temp.path().join("a_link")).expect("first link");
        symlink("dir", temp.path().join("b_link")).expect("second link");

        assert_eq!(
            sorted_listing(temp.path(), 1),
            vec![
                "a_link -> dir",
                "  dir/file.txt",
                "b_link -> dir",
                "Maximum visits for symlink (1) reached. Skipping further traversal.",
                "dir/",
                "  dir/file.txt",
            ]
        );
    }

    #[test]
    fn walk_zero_cap_never_follows() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = dir_with_file(temp.path());
        symlink(&dir, temp.path().join("symlink_dir")).expect("symlink");

        assert_eq!(
            sorted_listing(temp.path(), 0),
            vec![
                "dir/",
                "  dir/file.txt",
                "symlink_dir -> dir",
                "Maximum visits for symlink (0) reached. Skipping further traversal.",
            ]
        );
    }

    #[test]
    fn walk_symlink_to_file_is_listed_without_descent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = dir_with_file(temp.path());
        symlink(dir.join("file.txt"), temp.path().join("symlink_file.txt")).expect("symlink");

        let mut walker = WalkBuilder::new(temp.path())
            .entry_order(EntryOrder::Lexicographic)
            .build()
            .expect("build walker");
        let lines: Vec<String> = walker
            .by_ref()
            .map(|line| line.expect("line").to_string())
            .collect();

        assert_eq!(
            lines,
            vec!["dir/", "  dir/file.txt", "symlink_file.txt -> dir/file.txt"]
        );
        assert!(walker.ledger().is_empty());
    }

    #[test]
    fn walk_dangling_symlink_is_listed_without_descent() {
        let temp = tempfile::tempdir().expect("tempdir");
        symlink("nowhere", temp.path().join("broken")).expect("symlink");

        assert_eq!(sorted_listing(temp.path(), 3), vec!["broken -> nowhere"]);
    }

    #[test]
    fn walk_symlink_to_ancestor_is_never_expanded() {
        let temp = tempfile::tempdir().expect("tempdir");
        let three = temp.path().join("one/two/three");
        fs::create_dir_all(&three).expect("create tree");
        symlink(temp.path().join("one/two"), three.join("two")).expect("symlink");
        fs::write(three.join("file.txt"), b"content").expect("write file");

        for max_visits in [0, 3, 100] {
            assert_eq!(
                sorted_listing(&three, max_visits),
                vec!["file.txt", "two -> .."],
                "max_visits = {max_visits}"
            );
        }
    }

    #[test]
    fn walk_symlink_to_root_is_never_expanded() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        fs::create_dir(&root).expect("create root");
        symlink(&root, root.join("self")).expect("symlink");

        assert_eq!(traverse(&root, 3).expect("traverse"), vec!["self -> ."]);
    }

    #[test]
    fn walk_displays_paths_outside_root_relative_to_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let base = temp.path();
        fs::create_dir_all(base.join("outsidedir/four/five/six")).expect("outside tree");
        fs::create_dir_all(base.join("startdir/one/two/three")).expect("start tree");

        symlink(base.join("startdir/one"), base.join("outsidedir/four/five/one"))
            .expect("link back into start");
        symlink("/", base.join("startdir/badlink")).expect("link to filesystem root");
        symlink(base.join("outsidedir"), base.join("startdir/outsidedir"))
            .expect("link to outside");

        fs::write(base.join("outsidedir/hello.txt"), b"hello").expect("write");
        fs::write(base.join("startdir/hello.txt"), b"hello").expect("write");
        fs::write(base.join("startdir/one/goodbye.txt"), b"goodbye").expect("write");

        let start = fs::canonicalize(base.join("startdir")).expect("canonical start");
        let up_to_fs_root = vec![".."; start.components().count() - 1].join("/");

        assert_eq!(
            sorted_listing(&start, 3),
            vec![
                format!("badlink -> {up_to_fs_root}"),
                "hello.txt".to_string(),
                "one/".to_string(),
                "  one/goodbye.txt".to_string(),
                "  one/two/".to_string(),
                "    one/two/three/".to_string(),
                "outsidedir -> ../outsidedir".to_string(),
                "  ../outsidedir/four/".to_string(),
                "    ../outsidedir/four/five/".to_string(),
                "      ../outsidedir/four/five/one -> one".to_string(),
                "        one/goodbye.txt".to_string(),
                "        one/two/".to_string(),
                "          one/two/three/".to_string(),
                "      ../outsidedir/four/five/six/".to_string(),
                "  ../outsidedir/hello.txt".to_string(),
            ]
        );
    }

    #[test]
    fn walk_unreadable_directory_is_reported_inline() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let root = fs::canonicalize(temp.path()).expect("canonical root");
        let locked = root.join("locked");
        fs::create_dir(&locked).expect("create locked");
        fs::write(locked.join("secret.txt"), b"hidden").expect("write secret");
        fs::write(root.join("a.txt"), b"a").expect("write a");
        fs::write(root.join("z.txt"), b"z").expect("write z");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Privileged users bypass directory permissions.
        let privileged = fs::read_dir(&locked).is_ok();
        let lines = sorted_listing(&root, 3);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

        if privileged {
            return;
        }
        assert_eq!(
            lines,
            vec![
                "a.txt".to_string(),
                "locked/".to_string(),
                format!("Permission denied: {}", locked.display()),
                "z.txt".to_string(),
            ]
        );
    }

    #[test]
    fn walk_unreadable_link_target_is_named_by_resolved_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().expect("tempdir");
        let base = fs::canonicalize(temp.path()).expect("canonical base");
        let root = base.join("root");
        let locked = base.join("locked");
        fs::create_dir(&root).expect("create root");
        fs::create_dir(&locked).expect("create locked");
        symlink(&locked, root.join("door")).expect("symlink");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        let privileged = fs::read_dir(&locked).is_ok();
        let lines = traverse(&root, 3);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("restore");

        if privileged {
            return;
        }
        assert_eq!(
            lines.expect("traverse"),
            vec![
                "door -> ../locked".to_string(),
                format!("Permission denied: {}", locked.display()),
            ]
        );
    }
}
