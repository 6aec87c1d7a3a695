use std::{fs, path::PathBuf};

use tempfile::tempdir;

use kpiseed_cli::{Args, run};

/// Collects all .toml manifests from a directory
fn collect_manifests(dir: PathBuf) -> Vec<PathBuf> {
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

/// Demo manifests live at the workspace root, not in the crate
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: PathBuf, format: &str) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        format: Some(format.to_string()),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_manifests(demos_dir());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        for format in ["plan", "script", "json"] {
            let output_path = temp_dir.path().join(format!("{stem}.{format}"));
            let args = args_for(demo_path, output_path.clone(), format);

            match run(&args) {
                Ok(()) => {
                    let written = fs::read_to_string(&output_path).unwrap_or_default();
                    if written.is_empty() {
                        failed_demos.push((demo_path.clone(), format!("empty {format} output")));
                    }
                }
                Err(e) => failed_demos.push((demo_path.clone(), e.to_string())),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_manifests(demos_dir().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.txt",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));
        let args = args_for(demo_path, output_path, "plan");

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
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

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_unknown_format_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = collect_manifests(demos_dir())
        .into_iter()
        .next()
        .expect("No valid demos found in demos/");

    let args = args_for(&demo, temp_dir.path().join("out.sql"), "sql");

    assert!(run(&args).is_err());
}
