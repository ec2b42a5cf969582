use hooksmith::Settings;
use std::env;
use tempfile::TempDir;

#[test]
fn test_env_override_with_nested_keys() {
    let temp_dir = TempDir::new().unwrap();

    unsafe {
        // Double underscore separates nested levels
        env::set_var("HOOKSMITH_VALIDATION__TIMEOUT_SECS", "42");
        env::set_var("HOOKSMITH_VALIDATION__PYTHON", "python3.11");
        env::set_var("HOOKSMITH_INDEXING__RESPECT_GITIGNORE", "true");
    }

    let settings = Settings::load(temp_dir.path()).unwrap_or_default();

    unsafe {
        env::remove_var("HOOKSMITH_VALIDATION__TIMEOUT_SECS");
        env::remove_var("HOOKSMITH_VALIDATION__PYTHON");
        env::remove_var("HOOKSMITH_INDEXING__RESPECT_GITIGNORE");
    }

    assert_eq!(settings.validation.timeout_secs, 42);
    assert_eq!(settings.validation.python, "python3.11");
    assert!(settings.indexing.respect_gitignore);
}

#[test]
fn test_env_overrides_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_dir = temp_dir.path().join(".claude");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("hooksmith.toml"),
        "[context]\nreadme_chars = 10\nmax_pending_todos = 3\n",
    )
    .unwrap();

    unsafe {
        env::set_var("HOOKSMITH_CONTEXT__README_CHARS", "777");
    }

    let settings = Settings::load(temp_dir.path()).unwrap_or_default();

    unsafe {
        env::remove_var("HOOKSMITH_CONTEXT__README_CHARS");
    }

    // Environment wins over the file, the file wins over defaults
    assert_eq!(settings.context.readme_chars, 777);
    assert_eq!(settings.context.max_pending_todos, 3);
}
