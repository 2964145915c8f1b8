use super::*;
use std::fs::{self, File};
use std::io::Read;
use tempfile::TempDir;

const TIMESTAMP: &str = "2024-05-01_12-30-00";

fn write_env(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_create_copies_content_and_rewinds_source() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "KEY=a/b\n# note\n");
    let mut source = File::open(&env_path).unwrap();

    let guard = BackupGuard::create(&mut source, &env_path, TIMESTAMP).unwrap();

    let backup_path = guard.path().unwrap().to_path_buf();
    assert_eq!(
        backup_path,
        temp_dir.path().join(".env_bkp_2024-05-01_12-30-00")
    );
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), "KEY=a/b\n# note\n");

    let mut rest = String::new();
    source.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "KEY=a/b\n# note\n", "Source should be readable from the start");

    let kept = guard.keep();
    assert_eq!(kept.as_deref(), Some(backup_path.as_path()));
    assert!(backup_path.exists());
}

#[test]
fn test_discard_removes_backup() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "KEY=a/b\n");
    let mut source = File::open(&env_path).unwrap();

    let guard = BackupGuard::create(&mut source, &env_path, TIMESTAMP).unwrap();
    let backup_path = guard.path().unwrap().to_path_buf();

    guard.discard().unwrap();

    assert!(!backup_path.exists());
    assert!(env_path.exists(), "Original must never be touched");
}

#[test]
fn test_disabled_guard_is_noop() {
    let guard = BackupGuard::disabled();
    assert!(guard.path().is_none());
    assert!(guard.discard().is_ok());
    assert!(BackupGuard::disabled().keep().is_none());
}

#[test]
fn test_discard_reports_missing_backup() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "KEY=a/b\n");
    let mut source = File::open(&env_path).unwrap();

    let guard = BackupGuard::create(&mut source, &env_path, TIMESTAMP).unwrap();
    let backup_path = guard.path().unwrap().to_path_buf();
    fs::remove_file(&backup_path).unwrap();

    let err = guard.discard().unwrap_err();
    assert!(matches!(err, BackupError::Remove { .. }));
    assert_eq!(err.path(), backup_path.as_path());
}

#[test]
fn test_create_fails_when_directory_is_missing() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "KEY=a/b\n");
    let mut source = File::open(&env_path).unwrap();

    let elsewhere = temp_dir.path().join("missing").join(".env");
    let err = BackupGuard::create(&mut source, &elsewhere, TIMESTAMP).unwrap_err();

    assert!(matches!(err, BackupError::Create { .. }));
    assert!(err.to_string().contains("Could not create backup file"));
}

#[test]
fn test_create_never_overwrites_existing_backup() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "KEY=a/new\n");
    let earlier = temp_dir.path().join(".env_bkp_2024-05-01_12-30-00");
    fs::write(&earlier, "KEY=a/old\n").unwrap();
    let mut source = File::open(&env_path).unwrap();

    let guard = BackupGuard::create(&mut source, &env_path, TIMESTAMP).unwrap();

    let backup_path = guard.path().unwrap().to_path_buf();
    assert_eq!(
        backup_path,
        temp_dir.path().join(".env_bkp_2024-05-01_12-30-00_1")
    );
    assert_eq!(fs::read_to_string(&backup_path).unwrap(), "KEY=a/new\n");

    guard.discard().unwrap();
    assert_eq!(
        fs::read_to_string(&earlier).unwrap(),
        "KEY=a/old\n",
        "Earlier backup must survive a later discard"
    );
}

#[cfg(unix)]
#[test]
fn test_create_copies_source_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let env_path = write_env(&temp_dir, "SECRET=a/b\n");
    fs::set_permissions(&env_path, fs::Permissions::from_mode(0o600)).unwrap();
    let mut source = File::open(&env_path).unwrap();

    let guard = BackupGuard::create(&mut source, &env_path, TIMESTAMP).unwrap();

    let mode = fs::metadata(guard.path().unwrap()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    guard.discard().unwrap();
}
