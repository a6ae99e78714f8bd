use super::{FormConfig, LabelVisibility};

/// Loads a [`FormConfig`] from a JSON file, missing keys keep their defaults.
///
/// ```json
/// { "label_visibility": "visible", "disabled": false, "placeholder": "Enter a value" }
/// ```
///
/// # Errors
/// Returns a human-readable string if the file cannot be read or parsed.
pub fn load_form_config(path: &str) -> Result<FormConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
    parse_form_config(&content)
}

/// Parses a [`FormConfig`] document, see [`load_form_config`].
pub fn parse_form_config(content: &str) -> Result<FormConfig, String> {
    let val: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    let defaults = FormConfig::default();

    let label_visibility = match val["label_visibility"].as_str() {
        None => defaults.label_visibility,
        Some("visible") => LabelVisibility::Visible,
        Some("hidden") => LabelVisibility::Hidden,
        Some("collapsed") => LabelVisibility::Collapsed,
        Some(other) => return Err(format!("unknown label_visibility: {other}")),
    };

    Ok(FormConfig {
        label_visibility,
        disabled: val["disabled"].as_bool().unwrap_or(defaults.disabled),
        placeholder: val["placeholder"]
            .as_str()
            .map(str::to_string)
            .unwrap_or(defaults.placeholder),
    })
}
