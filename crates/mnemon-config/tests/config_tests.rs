use mnemon_config::schema::*;

// ── Default tests ──────────────────────────────────────────────

#[test]
fn test_memory_paths_defaults() {
    let config = MemoryPaths::default();
    assert_eq!(config.primary_path.to_str().unwrap(), "memory_store.txt");
    assert_eq!(config.mirror_path.to_str().unwrap(), "memory_backup.txt");
    assert_eq!(config.journal_path.to_str().unwrap(), "activity_log.txt");
}

#[test]
fn test_server_config_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.listen, "127.0.0.1:8321");
    assert!(config.secret.is_none());
    assert!(!config.cors);
}

#[test]
fn test_backup_config_defaults() {
    let config = BackupConfig::default();
    assert!(!config.auto);
    assert!(config.token.is_none());
    assert!(config.repo.is_none());
    assert_eq!(config.memory_path, "memory_store.txt");
    assert!(!config.credentials_present());
}

#[test]
fn test_credentials_present_requires_both() {
    let mut config = BackupConfig::default();
    config.token = Some("ghp_x".into());
    assert!(!config.credentials_present());
    config.repo = Some("owner/name".into());
    assert!(config.credentials_present());

    // Empty strings don't count as configured
    config.token = Some(String::new());
    assert!(!config.credentials_present());
}

// ── TOML parsing ───────────────────────────────────────────────

#[test]
fn test_config_toml_roundtrip() {
    let config = MnemonConfig::default();
    let toml_str = toml::to_string(&config).unwrap();
    let restored: MnemonConfig = toml::from_str(&toml_str).unwrap();
    assert_eq!(restored.server.listen, config.server.listen);
    assert_eq!(restored.memory.primary_path, config.memory.primary_path);
    assert_eq!(restored.backup.auto, config.backup.auto);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let raw = r#"
        [server]
        listen = "0.0.0.0:9000"
        secret = "hunter2"

        [backup]
        auto = true
        token = "ghp_abc"
        repo = "owner/name"
    "#;
    let config: MnemonConfig = toml::from_str(raw).unwrap();
    assert_eq!(config.server.listen, "0.0.0.0:9000");
    assert_eq!(config.server.secret.as_deref(), Some("hunter2"));
    assert!(config.backup.auto);
    assert!(config.backup.credentials_present());
    // Untouched section keeps defaults
    assert_eq!(config.memory.primary_path.to_str().unwrap(), "memory_store.txt");
}

#[test]
fn test_empty_toml_is_all_defaults() {
    let config: MnemonConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.listen, ServerConfig::default().listen);
    assert!(!config.backup.credentials_present());
}
