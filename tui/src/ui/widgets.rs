use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::config::{FormConfig, LabelVisibility};
use crate::state::form::{Field, Outcome};

use super::theme::Theme;

/// A single-line text input for `field`.
pub fn input<'a>(field: Field, value: &'a str, focused: bool, config: &'a FormConfig) -> Paragraph<'a> {
    let border_style = if config.disabled {
        Theme::muted()
    } else if focused {
        Theme::focus()
    } else {
        Theme::border()
    };

    let mut block = match config.label_visibility {
        LabelVisibility::Collapsed => Block::default(),
        _ => Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    };
    match config.label_visibility {
        LabelVisibility::Visible => {
            block = block
                .title(format!(" {} ", field.label()))
                .title_style(if focused { Theme::focus() } else { Theme::dim() });
        }
        LabelVisibility::Hidden | LabelVisibility::Collapsed => {}
    }

    let mut spans = Vec::new();
    if value.is_empty() {
        spans.push(Span::styled(config.placeholder.as_str(), Theme::muted()));
    } else if config.disabled {
        spans.push(Span::styled(value, Theme::muted()));
    } else {
        spans.push(Span::styled(value, Theme::text()));
    }
    if focused && !config.disabled {
        spans.push(Span::styled("█", Theme::focus()));
    }

    Paragraph::new(Line::from(spans)).block(block)
}

/// The estimate or error of the last submission.
pub fn result(outcome: Option<&Outcome>) -> Paragraph<'static> {
    let (text, style) = match outcome {
        None => ("Fill in the form and press enter.".to_string(), Theme::muted()),
        Some(o @ Outcome::Estimate(_)) => (o.message(), Theme::ok()),
        Some(o @ Outcome::Error(_)) => (format!("✖ {}", o.message()), Theme::error()),
    };

    Paragraph::new(Span::styled(text, style))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .wrap(Wrap { trim: true })
}

/// A one-line `[key] action` strip.
pub fn hints<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("[{key}] "), Theme::brand()),
                Span::styled(format!("{action}   "), Theme::dim()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
