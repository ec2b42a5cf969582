//! End-to-end properties of the project indexer.

use hooksmith::config::IndexingConfig;
use hooksmith::indexing::{Importance, ProjectIndex, ProjectIndexer, Purpose, StructureNode};
use hooksmith::storage::StateStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn build(root: &Path) -> ProjectIndex {
    ProjectIndexer::new(&IndexingConfig::default())
        .unwrap()
        .build(root)
        .unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn leaf<'a>(index: &'a ProjectIndex, rel: &str) -> &'a StructureNode {
    let mut parts = rel.split('/');
    let mut node = &index.structure[parts.next().unwrap()];
    for part in parts {
        match node {
            StructureNode::Dir(children) => node = &children[part],
            StructureNode::File(_) => panic!("{rel} descends through a file"),
        }
    }
    node
}

fn mixed_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", r#"{"name":"demo","scripts":{"test":"jest"}}"#);
    write(root, "README.md", "# Demo\n");
    write(root, "src/index.js", "import express from 'express';\nexport default function start(){}\n");
    write(root, "src/util.js", "const fs = require('fs');\n");
    write(root, "src/index.test.js", "import x from './index';\n");
    write(root, "app/main.py", "import os\nif __name__ == '__main__':\n    pass\n");
    write(root, "app/test_models.py", "def test_a():\n    pass\n");
    write(root, "crate/src/main.rs", "use std::io;\nfn main() {}\n");
    write(root, "crate/src/lib.rs", "pub fn f() {}\n");
    write(root, "node_modules/left-pad/index.js", "module.exports = 1;\n");
    write(root, "dist/bundle.js", "!function(){}();\n");
    write(root, "target/debug/build.log", "ok\n");
    temp_dir
}

#[test]
fn test_empty_project() {
    let temp_dir = TempDir::new().unwrap();
    let index = build(temp_dir.path());

    assert_eq!(index.stats.total_files, 0);
    assert!(index.stats.by_type.is_empty());
    assert!(index.stats.by_purpose.is_empty());
    assert!(index.structure.is_empty());
    assert!(index.critical_files.is_empty());
    assert!(index.entry_points.is_empty());
    assert!(index.test_files.is_empty());
    assert!(index.dependencies_graph.is_empty());
}

#[test]
fn test_package_json_and_index_js() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "package.json", "{}");
    write(root, "src/index.js", "import React from 'react';\nexport default class App {}\n");

    let index = build(root);

    assert_eq!(index.stats.total_files, 2);
    assert_eq!(index.stats.by_type["json"], 1);
    assert_eq!(index.stats.by_type["js"], 1);
    assert!(index.critical_files.contains(&"package.json".to_string()));
    assert!(index.critical_files.contains(&"src/index.js".to_string()));
    assert_eq!(index.entry_points, vec!["src/index.js"]);
    assert_eq!(index.dependencies_graph["src/index.js"], vec!["react"]);

    let StructureNode::File(pkg) = leaf(&index, "package.json") else {
        panic!("package.json should be a leaf");
    };
    assert_eq!(pkg.purpose, Purpose::Configuration);
    assert_eq!(pkg.importance, Importance::Critical);
}

#[test]
fn test_oversized_file_gets_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let mut content = String::from("import a from 'a';\nexport function big() {}\n");
    content.push_str(&" ".repeat(101_000 - content.len()));
    write(root, "src/index.js", &content);

    let index = build(root);

    assert_eq!(index.stats.total_files, 1);
    assert!(index.critical_files.is_empty());
    assert!(index.entry_points.is_empty());
    assert!(index.dependencies_graph.is_empty());
    let StructureNode::File(file) = leaf(&index, "src/index.js") else {
        panic!("src/index.js should be a leaf");
    };
    assert_eq!(file.file_type, "js");
    assert!(file.purpose.is_unspecified());
    assert_eq!(file.importance, Importance::Normal);
}

#[test]
fn test_excluded_directories_never_indexed() {
    let temp_dir = mixed_project();
    let index = build(temp_dir.path());

    let all_paths: Vec<&String> = index
        .critical_files
        .iter()
        .chain(&index.entry_points)
        .chain(&index.test_files)
        .chain(index.dependencies_graph.keys())
        .collect();
    for path in all_paths {
        for excluded in ["node_modules", "dist", "target"] {
            assert!(
                !path.split('/').any(|part| part == excluded),
                "{path} is under {excluded}"
            );
        }
    }
    assert!(!index.structure.contains_key("node_modules"));
    assert!(!index.structure.contains_key("dist"));
    assert!(!index.structure.contains_key("target"));
    assert_eq!(index.stats.total_files, 9);
}

#[test]
fn test_aggregate_invariants() {
    let temp_dir = mixed_project();
    let index = build(temp_dir.path());

    // by_type sums to total_files
    assert_eq!(index.stats.by_type.values().sum::<usize>(), index.stats.total_files);

    // Collect leaves to check the list invariants against
    fn walk<'a>(
        prefix: &str,
        nodes: &'a indexmap::IndexMap<String, StructureNode>,
        out: &mut BTreeMap<String, &'a hooksmith::indexing::FileLeaf>,
    ) {
        for (name, node) in nodes {
            let path = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
            match node {
                StructureNode::File(leaf) => {
                    out.insert(path, leaf);
                }
                StructureNode::Dir(children) => walk(&path, children, out),
            }
        }
    }
    let mut leaves = BTreeMap::new();
    walk("", &index.structure, &mut leaves);
    assert_eq!(leaves.len(), index.stats.total_files);

    for (purpose, count) in &index.stats.by_purpose {
        let actual = leaves.values().filter(|l| l.purpose.as_str() == purpose.as_str()).count();
        assert_eq!(actual, *count, "by_purpose[{purpose}]");
    }
    for path in &index.critical_files {
        assert!(leaves[path].importance >= Importance::High, "{path}");
    }
    for path in &index.entry_points {
        assert_eq!(leaves[path].purpose, Purpose::EntryPoint, "{path}");
        assert!(!index.test_files.contains(path));
    }
    for path in &index.test_files {
        assert_eq!(leaves[path].purpose, Purpose::Test, "{path}");
    }

    assert_eq!(leaves["app/main.py"].purpose, Purpose::Script);
    assert_eq!(leaves["crate/src/lib.rs"].purpose, Purpose::Library);
    assert_eq!(leaves["src/index.test.js"].purpose, Purpose::Test);
    assert_eq!(leaves["README.md"].importance, Importance::Critical);
}

#[test]
fn test_reindexing_is_stable() {
    let temp_dir = mixed_project();
    let mut first = build(temp_dir.path());
    let mut second = build(temp_dir.path());
    first.generated.clear();
    second.generated.clear();
    assert_eq!(first, second);
}

#[test]
fn test_saved_index_round_trips() {
    let temp_dir = mixed_project();
    let index = build(temp_dir.path());
    let store = StateStore::new(temp_dir.path());

    let path = store.save_index(&index).unwrap();
    assert!(path.ends_with(".claude/.index.json"));
    assert_eq!(store.load_index().unwrap(), Some(index));
}

#[cfg(unix)]
#[test]
fn test_symlinked_entry_point_is_classified() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "lib/app.js", "import React from 'react';\nexport default 1;\n");
    std::os::unix::fs::symlink(root.join("lib/app.js"), root.join("index.js")).unwrap();

    let index = build(root);

    assert_eq!(index.stats.total_files, 2);
    assert_eq!(index.entry_points, vec!["index.js"]);
    assert_eq!(index.dependencies_graph["index.js"], vec!["react"]);
}
