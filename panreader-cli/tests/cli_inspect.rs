use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn panreader() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("panreader").unwrap();
    cmd.env_remove("RUST_LOG").env("PANDOC_BIN", "/opt/fake/pandoc");
    cmd
}

#[test]
fn metadata_outputs_flattened_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("post.md"),
        "---\ntitle: Post\nauthor: [Ada]\ndate: 2024/03/09\ntags: [rust, pandoc]\n---\nBody\n",
    )?;

    let assert = panreader()
        .current_dir(dir.path())
        .args(["metadata", "post.md"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["title"], "Post");
    assert_eq!(value["author"], "Ada");
    assert_eq!(value["date"], "2024-03-09");
    assert_eq!(value["tags"], "rust, pandoc");

    Ok(())
}

#[test]
fn args_shows_bibliography_wiring() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("panreader.yml"),
        "PANDOC_BIBDIR: /bibs\nPANDOC_BIBHEADER: References\nPANDOC_FILTERS: [pandoc-crossref]\n",
    )?;
    fs::write(
        dir.path().join("cited.md"),
        "---\ntitle: Cited\nbibliography: refs.bib\n---\nSee [@key].\n",
    )?;

    panreader()
        .current_dir(dir.path())
        .args(["args", "cited.md"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/opt/fake/pandoc --from=markdown --to=html5"))
        .stdout(predicate::str::contains("--bibliography=/bibs/refs.bib"))
        .stdout(predicate::str::contains(
            "--metadata=reference-section-title=\"References\"",
        ))
        .stdout(predicate::str::contains("--filter=pandoc-crossref cited.md"));

    Ok(())
}

#[test]
fn args_json_without_bibliography() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("panreader.yml"), "PANDOC_BIBDIR: /bibs\n")?;
    fs::write(dir.path().join("plain.md"), "---\ntitle: Plain\n---\nBody\n")?;

    let assert = panreader()
        .current_dir(dir.path())
        .args(["args", "plain.md", "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["request"]["bibliography"], Value::Null);
    assert!(value["args"]
        .as_array()
        .expect("args array")
        .iter()
        .all(|arg| !arg.as_str().unwrap_or_default().starts_with("--bibliography")));

    Ok(())
}

#[test]
fn check_reports_missing_bibliography_and_broken_frontmatter(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let content = dir.path().join("content");
    fs::create_dir_all(content.join("nested"))?;
    fs::write(
        dir.path().join("panreader.yml"),
        "PANDOC_BIBDIR: bibs\n",
    )?;
    fs::create_dir_all(dir.path().join("bibs"))?;
    fs::write(dir.path().join("bibs/present.bib"), "@book{key, title={T}}\n")?;

    fs::write(content.join("ok.md"), "---\nbibliography: present.bib\n---\nBody\n")?;
    fs::write(content.join("nested/missing.mdown"), "---\nbibliography: absent.bib\n---\nBody\n")?;
    fs::write(content.join("broken.markdown"), "---\ntitle: [unclosed\n---\nBody\n")?;
    fs::write(content.join("ignored.txt"), "not a document")?;

    let assert = panreader()
        .current_dir(dir.path())
        .args(["check", "content", "--json"])
        .assert()
        .failure();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let value: Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["documents"], 3);
    assert_eq!(value["errors"], 1);
    assert_eq!(value["warnings"], 1);

    let codes: Vec<&str> = value["diagnostics"]
        .as_array()
        .expect("diagnostics array")
        .iter()
        .filter_map(|d| d["code"].as_str())
        .collect();
    assert!(codes.contains(&"bibliography.missing"));
    assert!(codes.contains(&"document.unreadable"));

    Ok(())
}

#[test]
fn check_passes_clean_documents() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "---\ntitle: A\n---\nBody\n")?;

    panreader()
        .current_dir(dir.path())
        .args(["check", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked 1 documents: 0 errors, 0 warnings"));

    Ok(())
}

#[test]
fn config_prints_setting_by_name() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let settings = dir.path().join("site.yml");
    fs::write(&settings, "PANDOC_EXTENSIONS: [+smart, -raw_html]\n")?;

    panreader()
        .arg("--config")
        .arg(&settings)
        .args(["config", "PANDOC_EXTENSIONS"])
        .assert()
        .success()
        .stdout("+smart-raw_html\n");

    panreader()
        .arg("--config")
        .arg(&settings)
        .args(["config", "PANDOC_BIBHEADER"])
        .assert()
        .failure();

    Ok(())
}

#[test]
fn explicit_missing_config_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    panreader()
        .current_dir(dir.path())
        .args(["--config", "nope.yml", "extensions"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));

    Ok(())
}

#[test]
fn extensions_lists_registered_reader() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    panreader()
        .current_dir(dir.path())
        .arg("extensions")
        .assert()
        .success()
        .stdout("markdown\nmd\nmdown\nmkd\n");

    Ok(())
}
