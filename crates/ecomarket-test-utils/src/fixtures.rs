use ecomarket_config::Settings;
use ecomarket_core::prompt::{BLOCK_DELIMITER, QUERY_HEADING};

/// The settings file shipped at the workspace root.
pub const SAMPLE_SETTINGS_TOML: &str = include_str!("../../../settings.toml");

/// The sample database shipped under `data/`.
pub const SAMPLE_RECORDS_JSON: &str = include_str!("../../../data/orders.json");

pub fn sample_settings() -> Settings {
    Settings::load_from_str(SAMPLE_SETTINGS_TOML).expect("sample settings")
}

/// Pull the delimited user query back out of a retrieval prompt.
pub fn extract_query(content: &str) -> Option<&str> {
    let heading = content.find(QUERY_HEADING)?;
    let rest = &content[heading + QUERY_HEADING.len()..];
    let rest = rest.strip_prefix('\n')?.strip_prefix(BLOCK_DELIMITER)?;
    let end = rest.rfind(BLOCK_DELIMITER)?;
    Some(&rest[..end])
}
