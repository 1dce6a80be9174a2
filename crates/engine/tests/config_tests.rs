use serial_test::serial;
use symviz_common::types::{ExecutionStep, LocalBindings, PathCondition};
use symviz_engine::{LabelStyle, Materializer, VisualizerConfig, CONFIG_PATH_ENV};
use tempfile::TempDir;
use tracing::info;

#[test]
fn test_default_config() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let style = VisualizerConfig::default().label;

    assert_eq!(style.line_break, "\\n");
    assert_eq!(style.conjunction, "&&");
    assert_eq!(style.clause_separator, " &&\\n");
    assert_eq!(style.binding_separator, "&&\\n");
    assert_eq!(style.terminator, "\r");
    assert_eq!(style.call_marker, "Calling:");
    assert_eq!(style.return_marker, "Returning to:");
}

#[test]
fn test_save_and_load_round_trip() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("symviz.toml");

    let config = VisualizerConfig {
        label: LabelStyle { line_break: "<br/>".to_string(), ..Default::default() },
    };
    config.save_to(&path).unwrap();

    let loaded = VisualizerConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("symviz.toml");
    std::fs::write(&path, "[label]\ncall_marker = \"Invoking:\"\n").unwrap();

    let loaded = VisualizerConfig::load_from(&path).unwrap();
    assert_eq!(loaded.label.call_marker, "Invoking:");
    assert_eq!(loaded.label.return_marker, "Returning to:");
    assert_eq!(loaded.label.terminator, "\r");
}

#[test]
fn test_missing_file_uses_defaults() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();

    let loaded = VisualizerConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded, VisualizerConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("symviz.toml");
    std::fs::write(&path, "[label\nline_break = 3").unwrap();

    let err = VisualizerConfig::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("TOML"));
}

#[test]
#[serial]
fn test_config_path_from_env() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let saved = std::env::var_os(CONFIG_PATH_ENV);

    std::env::set_var(CONFIG_PATH_ENV, "/tmp/custom-symviz.toml");
    let path = VisualizerConfig::config_path().unwrap();
    assert_eq!(path, std::path::PathBuf::from("/tmp/custom-symviz.toml"));

    match saved {
        Some(val) => std::env::set_var(CONFIG_PATH_ENV, val),
        None => std::env::remove_var(CONFIG_PATH_ENV),
    }
}

#[test]
#[serial]
fn test_load_honors_env_path() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let saved = std::env::var_os(CONFIG_PATH_ENV);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "[label]\nreturn_marker = \"Back to:\"\n").unwrap();

    std::env::set_var(CONFIG_PATH_ENV, &path);
    let loaded = VisualizerConfig::load().unwrap();
    assert_eq!(loaded.label.return_marker, "Back to:");

    match saved {
        Some(val) => std::env::set_var(CONFIG_PATH_ENV, val),
        None => std::env::remove_var(CONFIG_PATH_ENV),
    }
}

#[test]
fn test_materializer_uses_configured_style() {
    symviz_common::logging::ensure_test_logging(None);
    info!("Running test");
    let config = VisualizerConfig {
        label: LabelStyle {
            line_break: "\n".to_string(),
            clause_separator: " ∧\n".to_string(),
            terminator: String::new(),
            ..Default::default()
        },
    };
    let mut m = Materializer::with_config(config);

    let pc = PathCondition::from_clauses(["p", "q"]);
    let node = m.add_step(
        None,
        &ExecutionStep::ret("RETURN", "M.java:3", Some("M.main()V".to_string())),
        Some(&pc),
        &LocalBindings::new(),
    );
    assert_eq!(m.node(node).unwrap().label, "RETURN\n(M.java:3)\np ∧\nqReturning to:\nM.main()V");
}
