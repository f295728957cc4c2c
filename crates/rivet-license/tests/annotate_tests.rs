// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::path::Path;

use rivet_license::{
    ExclusionSet, FileOutcome, HeaderTemplate, LicenseAnnotator, annotate, check, collect_files,
};

const TEMPLATE: &str = "Copyright ${year} Rivet\n\nLicensed under the Apache License, Version 2.0";

const JAVA_HEADER: &str = "/*\n * Copyright 2026 Rivet\n *\n * Licensed under the Apache License, Version 2.0\n */\n\n";

fn annotator() -> LicenseAnnotator {
    let template = HeaderTemplate::new(TEMPLATE).unwrap();
    LicenseAnnotator::new(template, ExclusionSet::defaults()).with_year(2026)
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main/java/App.java", "package app;\n\nclass App {}\n");
    write(dir.path(), "scripts/run.sh", "#!/bin/sh\necho hi\n");
    write(dir.path(), "pom.xml", "<?xml version=\"1.0\"?>\n<project/>\n");
    write(dir.path(), "build.gradle.kts", "plugins {}\n");
    write(dir.path(), "README.md", "# Readme\n");
    write(dir.path(), "gradlew", "#!/bin/sh\n");
    write(dir.path(), "data.bin", "opaque");
    dir
}

#[test]
fn collect_files_is_sorted_and_recursive() {
    let dir = project();
    let files = collect_files(dir.path()).unwrap();
    let rel: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        rel,
        vec![
            "README.md",
            "build.gradle.kts",
            "data.bin",
            "gradlew",
            "pom.xml",
            "scripts/run.sh",
            "src/main/java/App.java",
        ]
    );
}

#[test]
fn annotates_mapped_files_and_skips_the_rest() {
    let dir = project();
    let files = collect_files(dir.path()).unwrap();

    assert_eq!(annotator().annotate(&files).unwrap(), 4);

    let java = fs::read_to_string(dir.path().join("src/main/java/App.java")).unwrap();
    assert_eq!(java, format!("{JAVA_HEADER}package app;\n\nclass App {{}}\n"));

    let script = fs::read_to_string(dir.path().join("scripts/run.sh")).unwrap();
    assert!(script.starts_with("#!/bin/sh\n# Copyright 2026 Rivet\n#\n# Licensed"));
    assert!(script.ends_with("\n\necho hi\n"));

    let pom = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
    assert!(pom.starts_with("<?xml version=\"1.0\"?>\n<!--\n   Copyright 2026 Rivet\n"));

    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), "# Readme\n");
    assert_eq!(fs::read_to_string(dir.path().join("gradlew")).unwrap(), "#!/bin/sh\n");
    assert_eq!(fs::read_to_string(dir.path().join("data.bin")).unwrap(), "opaque");
}

#[test]
fn second_run_changes_nothing() {
    let dir = project();
    let files = collect_files(dir.path()).unwrap();
    let annotator = annotator();

    annotator.annotate(&files).unwrap();
    let snapshot: Vec<String> = files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();

    assert_eq!(annotator.annotate(&files).unwrap(), 0);
    let again: Vec<String> = files.iter().map(|f| fs::read_to_string(f).unwrap()).collect();
    assert_eq!(snapshot, again);
    assert!(annotator.check(&files).unwrap().is_empty());
}

#[test]
fn check_lists_missing_without_writing() {
    let dir = project();
    let files = collect_files(dir.path()).unwrap();

    let missing = annotator().check(&files).unwrap();
    assert_eq!(missing.len(), 4);
    assert_eq!(
        fs::read_to_string(dir.path().join("src/main/java/App.java")).unwrap(),
        "package app;\n\nclass App {}\n"
    );
}

#[test]
fn foreign_header_is_kept_unless_replacement_requested() {
    let dir = tempfile::tempdir().unwrap();
    let original = "/*\n * Copyright 1999 Someone Else\n */\npackage a;\n";
    write(dir.path(), "A.java", original);
    let files = vec![dir.path().join("A.java")];

    assert_eq!(annotator().annotate_file(&files[0]).unwrap(), FileOutcome::AlreadyPresent);
    assert_eq!(fs::read_to_string(&files[0]).unwrap(), original);

    assert!(annotator().check(&files).unwrap().is_empty());
    assert_eq!(annotator().strict_check(true).check(&files).unwrap(), files);
    let template = HeaderTemplate::new(TEMPLATE).unwrap();
    assert_eq!(check(&files, &template, &ExclusionSet::defaults()).unwrap(), files);

    let replacing = annotator().skip_existing_headers(false);
    assert_eq!(replacing.annotate_file(&files[0]).unwrap(), FileOutcome::Replaced);
    assert_eq!(
        fs::read_to_string(&files[0]).unwrap(),
        format!("{JAVA_HEADER}package a;\n")
    );
}

#[test]
fn ordinary_leading_comment_is_not_a_header() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.java", "/* utilities */\nclass A {}\n");
    let path = dir.path().join("A.java");

    assert_eq!(annotator().annotate_file(&path).unwrap(), FileOutcome::Annotated);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{JAVA_HEADER}/* utilities */\nclass A {{}}\n")
    );
}

#[test]
fn custom_exclusions_apply_to_the_free_function() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "gen/Gen.java", "class Gen {}\n");
    write(dir.path(), "src/Main.java", "class Main {}\n");
    let files = collect_files(dir.path()).unwrap();

    let template = HeaderTemplate::new(TEMPLATE).unwrap();
    let exclusions = ExclusionSet::new(["**/gen/**"]).unwrap();
    assert_eq!(annotate(&files, &template, &exclusions).unwrap(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("gen/Gen.java")).unwrap(),
        "class Gen {}\n"
    );
}

#[test]
fn prelude_without_trailing_newline_gets_its_own_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "run.sh", "#!/bin/sh");
    write(dir.path(), "pom.xml", "<?xml version=\"1.0\"?>");
    let files = vec![dir.path().join("pom.xml"), dir.path().join("run.sh")];
    let annotator = annotator();

    assert_eq!(annotator.annotate(&files).unwrap(), 2);

    let script = fs::read_to_string(dir.path().join("run.sh")).unwrap();
    assert!(script.starts_with("#!/bin/sh\n# Copyright 2026 Rivet\n"));
    let pom = fs::read_to_string(dir.path().join("pom.xml")).unwrap();
    assert!(pom.starts_with("<?xml version=\"1.0\"?>\n<!--\n   Copyright 2026 Rivet\n"));

    assert_eq!(annotator.annotate(&files).unwrap(), 0);
    assert_eq!(fs::read_to_string(dir.path().join("run.sh")).unwrap(), script);
    assert_eq!(fs::read_to_string(dir.path().join("pom.xml")).unwrap(), pom);
    assert!(annotator.strict_check(true).check(&files).unwrap().is_empty());
}

#[test]
fn relative_exclusions_match_under_the_walk_root() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/gen/Gen.java", "class Gen {}\n");
    write(dir.path(), "src/Main.java", "class Main {}\n");
    let files = collect_files(dir.path()).unwrap();

    let template = HeaderTemplate::new(TEMPLATE).unwrap();
    let exclusions = ExclusionSet::new(["src/gen/**"]).unwrap();
    let annotator = LicenseAnnotator::new(template, exclusions)
        .with_year(2026)
        .with_root(dir.path());

    let gen_file = dir.path().join("src/gen/Gen.java");
    assert_eq!(annotator.annotate_file(&gen_file).unwrap(), FileOutcome::Excluded);
    assert_eq!(annotator.annotate(&files).unwrap(), 1);
    assert_eq!(fs::read_to_string(&gen_file).unwrap(), "class Gen {}\n");
    assert!(
        fs::read_to_string(dir.path().join("src/Main.java"))
            .unwrap()
            .starts_with(JAVA_HEADER)
    );
}
