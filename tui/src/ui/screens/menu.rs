use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::{layout::centered_rect, theme::Theme, widgets};

use super::{estimate::EstimateState, Action, Context, Screen};

const MENU_ITEMS: &[&str] = &["Estimate a price", "Quit"];

pub struct MenuState {
    pub selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

pub fn handle_key(state: &mut MenuState, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            state.selected = state.selected.saturating_sub(1);
            Action::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected < MENU_ITEMS.len() - 1 {
                state.selected += 1;
            }
            Action::None
        }
        KeyCode::Enter => match state.selected {
            0 => Action::Transition(Screen::Estimate(EstimateState::new())),
            1 => Action::Quit,
            _ => Action::None,
        },
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &MenuState, ctx: &Context) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 70, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(MENU_ITEMS.len() as u16 * 2 + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Immo ", Theme::title()),
            Span::styled("AI", Theme::brand()),
        ]))
        .alignment(Alignment::Center),
        chunks[0],
    );
    draw_model_status(f, chunks[1], ctx);
    draw_menu(f, chunks[3], state);

    f.render_widget(
        widgets::hints(&[("↑↓ / j k", "navigate"), ("enter", "select"), ("q", "quit")]),
        chunks[5],
    );
}

fn draw_model_status(f: &mut Frame, area: Rect, ctx: &Context) {
    let status = match &ctx.model {
        Some(model) => Span::styled(
            format!("model loaded, {} features", model.feature_names().len()),
            Theme::dim(),
        ),
        None => Span::styled("no model loaded", Theme::error()),
    };

    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), area);
}

fn draw_menu(f: &mut Frame, area: Rect, state: &MenuState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(" MENU ")
        .title_alignment(Alignment::Center)
        .title_style(Theme::title());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let item_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            MENU_ITEMS
                .iter()
                .map(|_| Constraint::Length(2))
                .collect::<Vec<_>>(),
        )
        .split(inner);

    for (i, (label, item_area)) in MENU_ITEMS.iter().zip(item_areas.iter()).enumerate() {
        let (prefix, style) = if i == state.selected {
            ("▶ ", Theme::brand().add_modifier(Modifier::BOLD))
        } else {
            ("  ", Theme::dim())
        };

        let line = Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(*label, style),
        ]);

        f.render_widget(Paragraph::new(line), *item_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_within_the_menu() {
        let mut state = MenuState::new();
        handle_key(&mut state, KeyCode::Up);
        assert_eq!(state.selected, 0);

        for _ in 0..5 {
            handle_key(&mut state, KeyCode::Down);
        }
        assert_eq!(state.selected, MENU_ITEMS.len() - 1);
        assert!(matches!(handle_key(&mut state, KeyCode::Enter), Action::Quit));
    }

    #[test]
    fn first_item_opens_the_form() {
        let mut state = MenuState::new();
        assert!(matches!(
            handle_key(&mut state, KeyCode::Enter),
            Action::Transition(Screen::Estimate(_))
        ));
    }
}
