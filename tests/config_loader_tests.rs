use cmdb_catalog::config::ConfigLoader;
use std::{
    env, fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    unsafe {
        for key in [
            "CMDB_PROFILE",
            "CMDB_LOG_LEVEL",
            "CMDB_LOG_FORMAT",
            "CMDB_DATABASE_URL",
            "CMDB_DB_MAX_CONNECTIONS",
            "CMDB_DB_ACQUIRE_TIMEOUT_MS",
            "CMDB_SUPPLIER_ACCOUNT",
            "CMDB_CATALOG_PAGE_SIZE",
        ] {
            env::remove_var(key);
        }
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.db_max_connections, 10);
    assert_eq!(cfg.db_acquire_timeout_ms, 5000);
    assert_eq!(cfg.catalog.supplier_account, "0");
    assert_eq!(cfg.catalog.page_size, 100);
    clear_env();
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "CMDB_CATALOG_PAGE_SIZE=10\n");
    write_env_file(&temp_dir, ".env.test", "CMDB_CATALOG_PAGE_SIZE=20\n");
    write_env_file(
        &temp_dir,
        ".env.test.local",
        "CMDB_CATALOG_PAGE_SIZE=30\nCMDB_SUPPLIER_ACCOUNT=tenant-a\n",
    );

    // Select profile via .env.local before profile-specific files load.
    write_env_file(
        &temp_dir,
        ".env.local",
        "CMDB_PROFILE=test\nCMDB_CATALOG_PAGE_SIZE=15\n",
    );

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with layered env files");

    assert_eq!(cfg.profile, "test");
    assert_eq!(cfg.catalog.page_size, 30);
    assert_eq!(cfg.catalog.supplier_account, "tenant-a");
    clear_env();
}

#[test]
fn os_environment_has_highest_precedence() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(
        &temp_dir,
        ".env",
        "CMDB_LOG_FORMAT=json\nCMDB_SUPPLIER_ACCOUNT=from-file\n",
    );

    unsafe {
        env::set_var("CMDB_LOG_FORMAT", "pretty");
    }

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let cfg = loader.load().expect("config loads with env override");
    assert_eq!(cfg.log_format, "pretty");
    assert_eq!(cfg.catalog.supplier_account, "from-file");

    clear_env();
}

#[test]
fn out_of_range_page_size_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("CMDB_CATALOG_PAGE_SIZE", "0");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("zero page size should fail");
    assert!(format!("{}", err).contains("catalog page size"));

    clear_env();
}

#[test]
fn non_numeric_setting_returns_error() {
    let _guard = env_guard();
    clear_env();

    unsafe {
        env::set_var("CMDB_DB_MAX_CONNECTIONS", "lots");
    }
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("non-numeric value should fail");
    assert!(format!("{}", err).contains("CMDB_DB_MAX_CONNECTIONS"));

    clear_env();
}

#[test]
fn blank_supplier_account_returns_error() {
    let _guard = env_guard();
    clear_env();

    let temp_dir = TempDir::new().unwrap();
    write_env_file(&temp_dir, ".env", "CMDB_SUPPLIER_ACCOUNT=   \n");

    let loader = ConfigLoader::with_base_dir(PathBuf::from(temp_dir.path()));
    let err = loader.load().expect_err("blank supplier account should fail");
    assert!(format!("{}", err).contains("supplier account"));

    clear_env();
}
