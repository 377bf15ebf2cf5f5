use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn chintai() -> Command {
    Command::cargo_bin("chintai").unwrap()
}

/// Data directory with one raw load directory and a config pointing at it.
fn workspace() -> (tempfile::TempDir, String) {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("data");
    let raw = data_dir.join("raw").join("2024-05");
    fs::create_dir_all(&raw).unwrap();

    fs::write(
        raw.join("suumo_港区.csv"),
        ",name,address,location0,location1,location2,age,height,floor,rent,admin,deposit,gratuity,floor_plan,area,architecture\n\
         0,メゾン白金,東京都港区白金台3,都営三田線/白金台駅 歩7分,,,築12年,5階建,3階,12万円,5000円,-,-,1K,25.5m2,鉄筋系\n",
    )
    .unwrap();

    let config_path = root.path().join("config.json");
    fs::write(
        &config_path,
        format!(r#"{{"data": {{"data_dir": {:?}}}}}"#, data_dir.display().to_string()),
    )
    .unwrap();

    (root, config_path.display().to_string())
}

#[test]
fn test_parse_fee() {
    chintai()
        .args(["parse", "fee", "12万"])
        .assert()
        .success()
        .stdout(predicate::str::contains("120"));
}

#[test]
fn test_parse_commute_compact() {
    chintai()
        .args(["parse", "commute", "A駅 歩5分バス10分", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""walk_minutes":5"#))
        .stdout(predicate::str::contains(r#""bus_minutes":10"#));
}

#[test]
fn test_parse_unknown_architecture_fails() {
    chintai()
        .args(["parse", "architecture", "RC造"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown architecture label"));
}

#[test]
fn test_preprocess_and_summary() {
    let (root, config) = workspace();

    chintai()
        .args(["--config", &config, "preprocess", "2024-05", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preprocessed 1 listings"));

    let out = root.path().join("data").join("interim").join("out.csv");
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.lines().next().unwrap().contains("walk_time_0"));
    assert!(content.contains("白金台3"));

    chintai()
        .args(["summary", "--format", "csv"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("港区,1,120.0,25.5"));
}

#[test]
fn test_preprocess_missing_load_dir() {
    let (_root, config) = workspace();

    chintai()
        .args(["--config", &config, "preprocess", "nope", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Load directory not found"));
}

fn add_unknown_architecture_file(root: &std::path::Path) {
    fs::write(
        root.join("data").join("raw").join("2024-05").join("suumo_品川区.csv"),
        ",name,address,location0,location1,location2,age,height,floor,rent,admin,deposit,gratuity,floor_plan,area,architecture\n\
         0,謎荘,東京都品川区大崎1,ＪＲ山手線/大崎駅 歩4分,,,築5年,2階建,1階,7万円,-,-,-,1R,15m2,RC造\n",
    )
    .unwrap();
}

#[test]
fn test_preprocess_aborts_on_bad_file() {
    let (root, config) = workspace();
    add_unknown_architecture_file(root.path());

    chintai()
        .args(["--config", &config, "preprocess", "2024-05", "out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("suumo_品川区.csv"))
        .stderr(predicate::str::contains("unknown architecture label"));

    assert!(!root.path().join("data").join("interim").join("out.csv").exists());
}

#[test]
fn test_preprocess_continue_on_error() {
    let (root, config) = workspace();
    add_unknown_architecture_file(root.path());

    chintai()
        .args(["--config", &config, "preprocess", "2024-05", "out.csv", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preprocessed 1 listings from 1 files"))
        .stdout(predicate::str::contains("Skipped files:"))
        .stdout(predicate::str::contains("suumo_品川区.csv"));

    let out = root.path().join("data").join("interim").join("out.csv");
    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("港区"));
    assert!(!content.contains("品川区"));
}

#[test]
fn test_summary_without_architecture_encoding() {
    let (root, _) = workspace();
    let config = root.path().join("plain.json");
    fs::write(
        &config,
        format!(
            r#"{{"data": {{"data_dir": {:?}}}, "pipeline": {{"encode_architecture": false}}}}"#,
            root.path().join("data").display().to_string()
        ),
    )
    .unwrap();

    chintai()
        .args(["--config", &config.display().to_string(), "preprocess", "2024-05", "plain.csv"])
        .assert()
        .success();

    let out = root.path().join("data").join("interim").join("plain.csv");
    assert!(!fs::read_to_string(&out).unwrap().contains(",RC,"));

    chintai()
        .args(["summary", "--format", "csv"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("港区,1,120.0,25.5"));
}
