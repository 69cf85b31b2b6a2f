//! Tests for settings loading and validation.

use super::*;
use crate::LogLevel;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const MINIMAL: &str = r#"
[general]
model = "mistral"

[prompts]
role_prompt = "Eres un agente de EcoMarket."
instruction_prompt = "Responde en español."

[prompts.rag]
retrieval_prompt = "Usa solo los datos recuperados."

[prompts.classifier]
classify_prompt = "Clasifica: {query}"

[prompts.summary]
summary_prompt = "Resume: {query}"
"#;

/// Replace the `[general]` table of the minimal document.
fn with_general(general: &str) -> String {
    MINIMAL.replace("[general]\nmodel = \"mistral\"", general)
}

/// Verify that a minimal document parses with defaults.
#[test]
fn parse_minimal_settings() {
    let settings = Settings::load_from_str(MINIMAL).expect("settings");
    assert_eq!(settings.general.model, "mistral");
    assert_eq!(settings.general.base_url, "http://localhost:11434/v1");
    assert_eq!(settings.general.api_key.as_deref(), Some("ollama"));
    assert_eq!(settings.general.temperature.tracking, 0.2);
    assert_eq!(settings.general.temperature.returns, 0.3);
    assert_eq!(settings.general.temperature.complex, 0.5);
    assert_eq!(settings.logging.log_file, None);
    assert_eq!(settings.logging.log_level, LogLevel::Info);
    assert_eq!(
        settings.retrieval.keyword_fields,
        vec!["order_id".to_string(), "product".to_string()]
    );
    assert_eq!(settings.prompts.positive_example, "");
}

#[test]
fn parse_full_general_and_logging() {
    let general = r#"[general]
model = "llama3"
base_url = "http://127.0.0.1:8080/v1"
api_key = "secret"

[general.temperature]
tracking = 0.1
return = 0.4
complex = 0.9

[logging]
log_file = "assistant.log"
log_level = "warning"

[retrieval]
keyword_fields = ["sku"]"#;
    let settings = Settings::load_from_str(&with_general(general)).expect("settings");
    assert_eq!(settings.general.model, "llama3");
    assert_eq!(settings.general.api_key.as_deref(), Some("secret"));
    assert_eq!(settings.general.temperature.returns, 0.4);
    assert_eq!(settings.general.temperature.complex, 0.9);
    assert_eq!(settings.logging.log_file.as_deref(), Some("assistant.log"));
    assert_eq!(settings.logging.log_level, LogLevel::Warning);
    assert_eq!(settings.retrieval.keyword_fields, vec!["sku".to_string()]);
}

/// Reject unexpected keys anywhere in the document.
#[test]
fn rejects_unknown_key() {
    let doc = format!("{MINIMAL}\n[extra]\nvalue = true\n");
    let err = Settings::load_from_str(&doc).unwrap_err();
    assert!(matches!(err, ConfigError::ParseFailed(_)));
    assert!(format!("{err}").contains("unknown field"));
}

#[test]
fn rejects_missing_prompts() {
    let err = Settings::load_from_str("[general]\nmodel = \"mistral\"\n").unwrap_err();
    assert!(format!("{err}").contains("prompts"));
}

#[test]
fn rejects_unknown_log_level() {
    let doc = format!("{MINIMAL}\n[logging]\nlog_level = \"LOUD\"\n");
    let err = Settings::load_from_str(&doc).unwrap_err();
    assert!(format!("{err}").contains("unknown log level"));
}

#[test]
fn rejects_empty_model() {
    let err = Settings::load_from_str(&with_general("[general]\nmodel = \"  \"")).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("general.model"), "{msg}");
}

#[test]
fn rejects_out_of_range_temperature() {
    let general = "[general]\nmodel = \"mistral\"\n\n[general.temperature]\nreturn = 3.5";
    let err = Settings::load_from_str(&with_general(general)).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("general.temperature.return"), "{msg}");
}

#[test]
fn rejects_non_http_base_url() {
    let general = "[general]\nmodel = \"mistral\"\nbase_url = \"localhost:11434\"";
    let err = Settings::load_from_str(&with_general(general)).unwrap_err();
    assert!(format!("{err}").contains("general.base_url"));
}

#[test]
fn rejects_empty_keyword_fields() {
    let doc = format!("{MINIMAL}\n[retrieval]\nkeyword_fields = []\n");
    let err = Settings::load_from_str(&doc).unwrap_err();
    assert!(format!("{err}").contains("retrieval.keyword_fields"));
}

#[test]
fn log_level_maps_to_filter() {
    assert_eq!(LogLevel::Debug.as_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Warning.as_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Critical.as_filter(), log::LevelFilter::Error);
    assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
}

#[test]
fn log_level_converts_through_strings() {
    assert_eq!(LogLevel::try_from("Critical".to_string()), Ok(LogLevel::Critical));
    assert_eq!(LogLevel::try_from("fatal".to_string()), Ok(LogLevel::Critical));
    assert!(LogLevel::try_from("LOUD".to_string()).is_err());
    assert_eq!(String::from(LogLevel::Warning), "WARNING");
    assert_eq!(LogLevel::Error.to_string(), "ERROR");
}

/// A missing settings file is reported as NotFound, not as an IO error.
#[test]
fn missing_file_is_not_found() {
    let temp = TempDir::new().expect("tmp");
    let err = Settings::load_default(temp.path()).unwrap_err();
    match err {
        ConfigError::NotFound(path) => assert!(path.ends_with(DEFAULT_SETTINGS_FILE)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn load_default_reads_settings_toml_from_cwd() {
    let temp = TempDir::new().expect("tmp");
    fs::write(temp.path().join(DEFAULT_SETTINGS_FILE), MINIMAL).expect("write");
    let settings = Settings::load_default(temp.path()).expect("settings");
    assert_eq!(settings.general.model, "mistral");
}

#[test]
fn overrides_replace_model_and_base_url() {
    let settings = Settings::load_from_str(MINIMAL).expect("settings");
    let settings = settings
        .with_overrides(SettingsOverrides {
            model: Some("qwen2.5".to_string()),
            base_url: Some("http://gpu-box:11434/v1".to_string()),
        })
        .expect("overrides");
    assert_eq!(settings.general.model, "qwen2.5");
    assert_eq!(settings.general.base_url, "http://gpu-box:11434/v1");
}

#[test]
fn overrides_are_validated() {
    let settings = Settings::load_from_str(MINIMAL).expect("settings");
    let err = settings
        .with_overrides(SettingsOverrides {
            model: Some(String::new()),
            base_url: None,
        })
        .unwrap_err();
    assert!(format!("{err}").contains("general.model"));
}

#[test]
fn templates_with_placeholders_have_no_warnings() {
    let settings = Settings::load_from_str(MINIMAL).expect("settings");
    assert!(settings.template_warnings().is_empty());
}

/// A template without `{query}` still loads but is reported.
#[test]
fn template_without_placeholder_is_reported() {
    let doc = MINIMAL.replace("Resume: {query}", "Resume la consulta.");
    let settings = Settings::load_from_str(&doc).expect("settings");
    let warnings = settings.template_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("prompts.summary.summary_prompt"));
}
