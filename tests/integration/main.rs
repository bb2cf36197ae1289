//! Integration tests for Artefactor

mod cache_tests {
    use artefactor::cache::{calc_checksum, list_tracked_files, ChecksumCache};
    use artefactor::ArtefactorError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn update_then_reopen_matches() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"payload contents").unwrap();

        let mut writer = ChecksumCache::from_existing_file(&file, false).unwrap();
        let checksum = writer.update(&file).unwrap();
        drop(writer);

        let mut reader = ChecksumCache::from_dir(dir.path()).unwrap();
        assert!(reader.is_cached_matched(&file, &checksum).unwrap());
        assert_eq!(checksum, calc_checksum(&file).unwrap());
    }

    #[test]
    fn second_update_wins() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"first").unwrap();

        let mut cache = ChecksumCache::from_existing_file(&file, false).unwrap();
        let first = cache.update(&file).unwrap();
        fs::write(&file, b"second").unwrap();
        let second = cache.update(&file).unwrap();
        assert_ne!(first, second);

        let ledger = fs::read_to_string(dir.path().join("checksum.txt")).unwrap();
        let lines: Vec<&str> = ledger.lines().collect();
        assert_eq!(lines, vec![format!("{}  payload.tar", second)]);

        let mut reopened = ChecksumCache::from_dir(dir.path()).unwrap();
        assert!(!reopened.is_cached_matched(&file, &first).unwrap());
        assert!(reopened.is_cached_matched(&file, &second).unwrap());
    }

    #[test]
    fn deleted_file_is_stale() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"payload").unwrap();

        let mut cache = ChecksumCache::from_existing_file(&file, true).unwrap();
        assert!(cache.is_cached(&file).unwrap());

        fs::remove_file(&file).unwrap();
        assert!(!cache.is_cached(&file).unwrap());
    }

    #[test]
    fn three_token_line_is_dropped() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("checksum.txt"),
            "abc123  good.tar\nabc123  bad.tar  extra\n",
        )
        .unwrap();

        let cache = ChecksumCache::from_dir(dir.path()).unwrap();
        let names: Vec<&str> = cache.entries().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["good.tar"]);
    }

    #[test]
    fn ledger_scenario() {
        let dir = TempDir::new().unwrap();
        let payload = dir.path().join("payload.tar");
        fs::write(&payload, b"release bits").unwrap();
        let checksum = calc_checksum(&payload).unwrap();
        fs::write(
            dir.path().join("checksum.txt"),
            format!("{}  payload.tar\n", checksum),
        )
        .unwrap();

        let mut cache = ChecksumCache::from_dir(dir.path()).unwrap();
        assert!(cache.is_cached_matched(&payload, &checksum).unwrap());

        fs::write(&payload, b"tampered bits").unwrap();
        let actual = calc_checksum(&payload).unwrap();
        assert!(!cache.is_cached_matched(&payload, &actual).unwrap());

        fs::remove_file(&payload).unwrap();
        assert!(!cache.is_cached_matched(&payload, &checksum).unwrap());
    }

    #[test]
    fn strict_and_tolerant_open() {
        let dir = TempDir::new().unwrap();
        let ledger = dir.path().join("checksum.txt");

        let err = ChecksumCache::from_checksums_file(&ledger, true).unwrap_err();
        assert!(matches!(err, ArtefactorError::LedgerNotFound(_)));

        let cache = ChecksumCache::from_checksums_file(&ledger, false).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn list_tracks_updates() {
        let dir = TempDir::new().unwrap();
        for name in ["a.tar", "b.tar"] {
            let file = dir.path().join(name);
            fs::write(&file, name).unwrap();
            ChecksumCache::from_existing_file(&file, true).unwrap();
        }

        let files = list_tracked_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_absolute()));
        assert!(files.iter().any(|f| f.ends_with("a.tar")));
        assert!(files.iter().any(|f| f.ends_with("b.tar")));
    }
}

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    /// Run the binary against an isolated (missing) config file
    fn artefactor(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("artefactor");
        cmd.env("ARTEFACTOR_CONFIG", config_dir.path().join("config.toml"))
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        let cfg = TempDir::new().unwrap();
        artefactor(&cfg)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("checksum ledger"));
    }

    #[test]
    fn version_displays() {
        let cfg = TempDir::new().unwrap();
        artefactor(&cfg)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("artefactor"));
    }

    #[test]
    fn update_check_show_list() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"").unwrap();
        let empty_sha = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

        artefactor(&cfg)
            .arg("update")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::starts_with(empty_sha));

        artefactor(&cfg)
            .arg("check")
            .arg(&file)
            .args(["--sha256", empty_sha])
            .assert()
            .success()
            .stdout(predicate::str::contains("cached"));

        artefactor(&cfg)
            .arg("show")
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::diff(format!("{}\n", empty_sha)));

        artefactor(&cfg)
            .arg("list")
            .arg(dir.path())
            .args(["--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("payload.tar"));
    }

    #[test]
    fn check_mismatch_fails() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"payload").unwrap();

        artefactor(&cfg).arg("update").arg(&file).assert().success();
        artefactor(&cfg)
            .arg("check")
            .arg(&file)
            .args(["--sha256", "0000"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("checksum mismatch"));
    }

    #[test]
    fn show_untracked_fails() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"payload").unwrap();

        artefactor(&cfg)
            .arg("show")
            .arg(&file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("No checksum exists"));
    }

    #[test]
    fn update_missing_file_fails() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();

        artefactor(&cfg)
            .arg("update")
            .arg(dir.path().join("gone.tar"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("doesn't exist"));
    }

    #[test]
    fn list_empty_json() {
        let cfg = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();

        artefactor(&cfg)
            .arg("list")
            .arg(dir.path())
            .args(["-f", "json"])
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn custom_ledger_name_from_config() {
        let cfg = TempDir::new().unwrap();
        fs::write(
            cfg.path().join("config.toml"),
            "[ledger]\nfile_name = \"SHA256SUMS\"\n",
        )
        .unwrap();
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("payload.tar");
        fs::write(&file, b"payload").unwrap();

        artefactor(&cfg).arg("update").arg(&file).assert().success();
        assert!(dir.path().join("SHA256SUMS").exists());
        assert!(!dir.path().join("checksum.txt").exists());
    }

    #[test]
    fn config_path() {
        let cfg = TempDir::new().unwrap();
        artefactor(&cfg)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let cfg = TempDir::new().unwrap();
        artefactor(&cfg)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[ledger]"));
    }
}
