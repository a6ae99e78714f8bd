/// How a field's label is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelVisibility {
    /// The label is shown as the input box title.
    #[default]
    Visible,
    /// The title row is kept but left blank.
    Hidden,
    /// No title and no border around the input.
    Collapsed,
}

/// Display options of the estimate form.
///
/// Owned by the caller and handed to every render and key handling pass, so
/// two forms never share hidden state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub label_visibility: LabelVisibility,
    /// When set, inputs are rendered muted and ignore edits.
    pub disabled: bool,
    /// Shown in empty inputs.
    pub placeholder: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            label_visibility: LabelVisibility::Visible,
            disabled: false,
            placeholder: "Enter a value".to_string(),
        }
    }
}
