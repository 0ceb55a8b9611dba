use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use stagegraph::StagegraphError;
use stagegraph_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        mode: None,
        check: false,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_toml_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        match run(&args_for(demo_path, output_path.clone())) {
            Ok(()) => {
                let json = fs::read_to_string(&output_path).expect("output written");
                let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
                assert!(value["nodes"].as_array().is_some_and(|n| n.len() >= 3));
                assert_eq!(value["edges"][0]["id"], "complete-flow-path");
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_toml_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args_for(demo_path, output_path.clone())).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
        assert!(!output_path.exists(), "No output expected on error");
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_check_reports_missing_stages() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("unused.json");

    let mut args = args_for(&demos_path().join("empty.toml"), output_path.clone());
    args.check = true;

    match run(&args) {
        Err(StagegraphError::IncompletePipeline(missing)) => assert_eq!(missing.len(), 2),
        other => panic!("Expected incomplete pipeline, got {other:?}"),
    }
    assert!(!output_path.exists());

    let mut args = args_for(&demos_path().join("routing.toml"), output_path.clone());
    args.check = true;
    assert!(run(&args).is_ok());
    assert!(!output_path.exists());
}

#[test]
fn e2e_editable_mode_adds_inline_slot() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("routing.json");

    let mut args = args_for(&demos_path().join("routing.toml"), output_path.clone());
    args.mode = Some(stagegraph::config::LayoutMode::Editable);
    run(&args).expect("routing demo renders");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    let nodes = value["nodes"].as_array().unwrap();
    assert!(nodes.iter().any(|node| node["id"] == "add_transform"));
}
