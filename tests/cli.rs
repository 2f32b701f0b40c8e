use predicates::prelude::*;

fn rockday_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("rockday"))
}

#[test]
fn invalid_base_url_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    rockday_cmd()
        .current_dir(dir.path())
        .arg("not-a-url")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid base URL `not-a-url`"));
    assert!(!dir.path().join("feed.xml").exists());
}

#[test]
fn invalid_project_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rockday.yaml"), "days: 400000000\n").unwrap();
    rockday_cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("`days` must be between 1 and 366"));
}

#[test]
fn generates_site_for_base_url() {
    let dir = tempfile::tempdir().unwrap();
    rockday_cmd()
        .current_dir(dir.path())
        .arg("https://rocks.example/daily/")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 32 file(s) for https://rocks.example/daily/"))
        .stdout(predicate::str::contains("Today's specimens: "));

    let feed = std::fs::read_to_string(dir.path().join("feed.xml")).unwrap();
    assert!(feed.contains("<link>https://rocks.example/daily/</link>"));
    assert!(dir.path().join("index.html").exists());
}
