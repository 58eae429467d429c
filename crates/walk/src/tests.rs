use crate::{NodeKind, WalkBuilder, WalkErrorKind, Walker};
use std::fs;
use std::path::PathBuf;

fn collect_preorder(walker: Walker) -> Vec<(PathBuf, NodeKind)> {
    walker
        .map(|node| node.expect("walk node"))
        .filter(|node| node.kind() != NodeKind::DirPost)
        .map(|node| (node.path().to_path_buf(), node.kind()))
        .collect()
}

#[test]
fn build_errors_when_root_missing() {
    let builder = WalkBuilder::new("/nonexistent/path/for/walker");
    let error = match builder.build() {
        Ok(_) => panic!("missing root should fail"),
        Err(error) => error,
    };
    assert!(matches!(error.kind(), WalkErrorKind::RootMetadata { .. }));
}

#[test]
fn single_file_root_yields_one_node() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("file.txt");
    fs::write(&file, b"contents").expect("write");

    let mut walker = WalkBuilder::new(&file).build().expect("build walker");
    let node = walker.next().expect("node").expect("node ok");
    assert_eq!(node.kind(), NodeKind::File);
    assert_eq!(node.depth(), 0);
    assert_eq!(node.path(), file);
    assert!(walker.next().is_none());
}

#[test]
fn directory_walk_is_deterministic_and_depth_first() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir(&root).expect("create root");
    fs::create_dir(root.join("a")).expect("dir a");
    fs::create_dir(root.join("b")).expect("dir b");
    fs::write(root.join("a/inner.txt"), b"data").expect("write inner");
    fs::write(root.join("c.txt"), b"data").expect("write file");

    let walker = WalkBuilder::new(&root).build().expect("build walker");
    let paths = collect_preorder(walker);
    assert_eq!(
        paths,
        vec![
            (root.clone(), NodeKind::Dir),
            (root.join("a"), NodeKind::Dir),
            (root.join("a/inner.txt"), NodeKind::File),
            (root.join("b"), NodeKind::Dir),
            (root.join("c.txt"), NodeKind::File),
        ]
    );
}

#[test]
fn every_dir_gets_a_post_order_node() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub/deeper")).expect("tree");

    let walker = WalkBuilder::new(&root).build().expect("build walker");
    let mut pre = 0;
    let mut post = 0;
    for node in walker {
        match node.expect("walk node").kind() {
            NodeKind::Dir => pre += 1,
            NodeKind::DirPost => post += 1,
            _ => {}
        }
    }
    assert_eq!(pre, 3);
    assert_eq!(post, 3);
}

#[test]
fn skipped_dir_still_gets_post_order_node() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("root");
    fs::create_dir_all(root.join("sub")).expect("tree");
    fs::write(root.join("sub/inner.txt"), b"data").expect("write");

    let mut walker = WalkBuilder::new(&root).build().expect("build walker");
    let mut saw_inner = false;
    let mut post_for_sub = false;
    while let Some(node) = walker.next() {
        let node = node.expect("walk node");
        if node.kind() == NodeKind::Dir && node.name() == "sub" {
            walker.skip_subtree();
        }
        if node.name() == "inner.txt" {
            saw_inner = true;
        }
        if node.kind() == NodeKind::DirPost && node.name() == "sub" {
            post_for_sub = true;
        }
    }
    assert!(!saw_inner);
    assert!(post_for_sub);
}

#[test]
fn multiple_roots_are_walked_in_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let first = temp.path().join("first");
    let second = temp.path().join("second");
    fs::create_dir(&first).expect("first");
    fs::create_dir(&second).expect("second");
    fs::write(second.join("x.txt"), b"x").expect("write");

    let walker = WalkBuilder::new(&first)
        .add_root(&second)
        .build()
        .expect("build walker");
    let paths = collect_preorder(walker);
    assert_eq!(
        paths,
        vec![
            (first, NodeKind::Dir),
            (second.clone(), NodeKind::Dir),
            (second.join("x.txt"), NodeKind::File),
        ]
    );
}

#[cfg(unix)]
mod unix {
    use super::collect_preorder;
    use crate::{NodeKind, WalkBuilder};
    use std::fs;
    use std::os::unix::fs::symlink;

    #[test]
    fn symlink_is_reported_physically_by_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        let target = temp.path().join("target");
        fs::create_dir(&root).expect("root");
        fs::create_dir(&target).expect("target");
        fs::write(target.join("inner.txt"), b"data").expect("write");
        symlink(&target, root.join("link")).expect("symlink");

        let walker = WalkBuilder::new(&root).build().expect("build walker");
        let paths = collect_preorder(walker);
        assert_eq!(
            paths,
            vec![
                (root.clone(), NodeKind::Dir),
                (root.join("link"), NodeKind::Symlink),
            ]
        );
    }

    #[test]
    fn follow_directive_re_yields_target_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        let target = temp.path().join("target");
        fs::create_dir(&root).expect("root");
        fs::create_dir(&target).expect("target");
        fs::write(target.join("inner.txt"), b"data").expect("write");
        symlink(&target, root.join("link")).expect("symlink");

        let mut walker = WalkBuilder::new(&root).build().expect("build walker");
        let mut seen = Vec::new();
        while let Some(node) = walker.next() {
            let node = node.expect("walk node");
            if node.kind() == NodeKind::Symlink {
                walker.follow_symlink();
            }
            if node.kind() != NodeKind::DirPost {
                seen.push((node.path().to_path_buf(), node.kind()));
            }
        }
        assert_eq!(
            seen,
            vec![
                (root.clone(), NodeKind::Dir),
                (root.join("link"), NodeKind::Symlink),
                (root.join("link"), NodeKind::Dir),
                (root.join("link/inner.txt"), NodeKind::File),
            ]
        );
    }

    #[test]
    fn follow_directive_on_file_link_re_yields_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        fs::create_dir(&root).expect("root");
        fs::write(root.join("data.txt"), b"data").expect("write");
        symlink(root.join("data.txt"), root.join("link")).expect("symlink");

        let mut walker = WalkBuilder::new(&root).build().expect("build walker");
        let mut kinds = Vec::new();
        while let Some(node) = walker.next() {
            let node = node.expect("walk node");
            if node.kind() == NodeKind::Symlink {
                walker.follow_symlink();
            }
            kinds.push((node.name().to_os_string(), node.kind()));
        }
        assert!(kinds.contains(&("link".into(), NodeKind::Symlink)));
        assert!(kinds.contains(&("link".into(), NodeKind::File)));
    }

    #[test]
    fn follow_directive_on_dangling_link_reports_it() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        fs::create_dir(&root).expect("root");
        symlink(temp.path().join("gone"), root.join("link")).expect("symlink");

        let mut walker = WalkBuilder::new(&root).build().expect("build walker");
        let mut kinds = Vec::new();
        while let Some(node) = walker.next() {
            let node = node.expect("walk node");
            if node.kind() == NodeKind::Symlink {
                walker.follow_symlink();
            }
            kinds.push(node.kind());
        }
        assert!(kinds.contains(&NodeKind::DanglingSymlink));
    }

    #[test]
    fn skip_overrides_earlier_follow_directive() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        let target = temp.path().join("target");
        fs::create_dir(&root).expect("root");
        fs::create_dir(&target).expect("target");
        symlink(&target, root.join("link")).expect("symlink");

        let mut walker = WalkBuilder::new(&root).build().expect("build walker");
        let mut followed = false;
        while let Some(node) = walker.next() {
            let node = node.expect("walk node");
            if node.kind() == NodeKind::Symlink {
                walker.follow_symlink();
                walker.skip_subtree();
            }
            if node.kind() == NodeKind::Dir && node.path() == root.join("link") {
                followed = true;
            }
        }
        assert!(!followed);
    }

    #[test]
    fn symlink_cycle_yields_single_cycle_node() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("root");
        fs::create_dir(&root).expect("root");
        symlink(&root, root.join("self")).expect("symlink");

        let mut walker = WalkBuilder::new(&root).build().expect("build walker");
        let mut cycles = 0;
        while let Some(node) = walker.next() {
            let node = node.expect("walk node");
            if node.kind() == NodeKind::Symlink {
                walker.follow_symlink();
            }
            if node.kind() == NodeKind::Cycle {
                cycles += 1;
            }
        }
        assert_eq!(cycles, 1);
    }

    #[test]
    fn root_symlink_is_resolved() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("target");
        fs::create_dir(&target).expect("target");
        fs::write(target.join("inner.txt"), b"data").expect("write");
        let link = temp.path().join("link");
        symlink(&target, &link).expect("symlink");

        let walker = WalkBuilder::new(&link).build().expect("build walker");
        let paths = collect_preorder(walker);
        assert_eq!(
            paths,
            vec![
                (link.clone(), NodeKind::Dir),
                (link.join("inner.txt"), NodeKind::File),
            ]
        );
    }
}
