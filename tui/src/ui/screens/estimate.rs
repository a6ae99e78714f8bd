use crossterm::event::KeyCode;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::state::form::{self, Field, FormInput, Outcome};
use crate::ui::{layout, theme::Theme, widgets};

use super::{menu::MenuState, Action, Context, Screen};

/// The estimate form: five inputs, the focused one and the last outcome.
pub struct EstimateState {
    pub input: FormInput,
    pub focus: Field,
    pub outcome: Option<Outcome>,
}

impl EstimateState {
    pub fn new() -> Self {
        Self {
            input: FormInput::default(),
            focus: Field::Municipality,
            outcome: None,
        }
    }
}

pub fn handle_key(state: &mut EstimateState, key: KeyCode, ctx: &Context) -> Action {
    match key {
        KeyCode::Esc => return Action::Transition(Screen::Menu(MenuState::new())),
        KeyCode::Tab | KeyCode::Down => state.focus = state.focus.next(),
        KeyCode::BackTab | KeyCode::Up => state.focus = state.focus.prev(),
        KeyCode::Enter => state.outcome = Some(form::submit(&state.input, ctx.model.as_ref())),
        KeyCode::Char(c) if !ctx.form.disabled => state.input.get_mut(state.focus).push(c),
        KeyCode::Backspace if !ctx.form.disabled => {
            state.input.get_mut(state.focus).pop();
        }
        _ => {}
    }

    Action::None
}

pub fn draw(f: &mut Frame, state: &EstimateState, ctx: &Context) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let regions = layout::form(layout::centered_rect(80, 90, area));

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Immo ", Theme::title()),
            Span::styled("AI", Theme::brand()),
        ])),
        regions.title,
    );
    f.render_widget(
        Paragraph::new(Span::styled("Search and find within your budget", Theme::dim())),
        regions.subtitle,
    );

    for (field, area) in Field::ALL.into_iter().zip(regions.inputs) {
        f.render_widget(
            widgets::input(field, state.input.get(field), field == state.focus, &ctx.form),
            area,
        );
    }

    f.render_widget(widgets::result(state.outcome.as_ref()), regions.result);
    f.render_widget(
        widgets::hints(&[
            ("tab / ↓", "next"),
            ("shift+tab / ↑", "previous"),
            ("enter", "estimate"),
            ("esc", "back"),
            ("ctrl+c", "quit"),
        ]),
        regions.hints,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::state::form::{FormError, INVALID_NUMBERS_MSG};
    use ml_core::{data::Table, pipeline::train_on_table};
    use ratatui::{backend::TestBackend, Terminal};

    fn ctx(with_model: bool) -> Context {
        let model = with_model.then(|| {
            let table = Table::parse_csv(
                "nb_chambres,nb_salon,taille_parcelle,commune,quartier,prix\n\
                 3,1,500,A,X,100000\n\
                 4,2,700,B,Y,150000\n",
            )
            .unwrap();
            train_on_table(&table, 0.2, 42).unwrap().model
        });

        Context {
            model,
            form: FormConfig::default(),
        }
    }

    fn type_text(state: &mut EstimateState, ctx: &Context, text: &str) {
        for c in text.chars() {
            handle_key(state, KeyCode::Char(c), ctx);
        }
    }

    fn fill(state: &mut EstimateState, ctx: &Context, values: [&str; 5]) {
        for value in values {
            type_text(state, ctx, value);
            handle_key(state, KeyCode::Tab, ctx);
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let ctx = ctx(false);
        let mut state = EstimateState::new();

        fill(&mut state, &ctx, ["A", "X", "500", "1", "3"]);
        handle_key(&mut state, KeyCode::Backspace, &ctx);

        assert_eq!(state.focus, Field::Municipality);
        assert_eq!(state.input.municipality, "");
        assert_eq!(state.input.neighborhood, "X");
        assert_eq!(state.input.parcel_size, "500");
        assert_eq!(state.input.rooms, "3");
    }

    #[test]
    fn disabled_form_ignores_edits() {
        let mut ctx = ctx(false);
        ctx.form.disabled = true;
        let mut state = EstimateState::new();

        type_text(&mut state, &ctx, "Gombe");
        assert_eq!(state.input, FormInput::default());
    }

    #[test]
    fn submitting_invalid_numbers_shows_the_error() {
        let ctx = ctx(true);
        let mut state = EstimateState::new();
        fill(&mut state, &ctx, ["A", "X", "abc", "1", "3"]);

        handle_key(&mut state, KeyCode::Enter, &ctx);

        assert!(matches!(
            state.outcome,
            Some(Outcome::Error(FormError::InvalidNumbers { .. }))
        ));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &state, &ctx)).unwrap();
        assert!(screen_text(&terminal).contains(INVALID_NUMBERS_MSG));
    }

    #[test]
    fn submitting_a_valid_listing_shows_the_estimate() {
        let ctx = ctx(true);
        let mut state = EstimateState::new();
        fill(&mut state, &ctx, ["A", "X", "500", "1", "3"]);

        handle_key(&mut state, KeyCode::Enter, &ctx);
        assert!(matches!(state.outcome, Some(Outcome::Estimate(_))));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &state, &ctx)).unwrap();
        assert!(screen_text(&terminal).contains("Estimated price for this house"));
    }

    #[test]
    fn labels_and_placeholder_are_rendered() {
        let ctx = ctx(false);
        let state = EstimateState::new();

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, &state, &ctx)).unwrap();
        let text = screen_text(&terminal);

        for field in Field::ALL {
            assert!(text.contains(field.label()), "{}", field.label());
        }
        assert!(text.contains("Enter a value"));
    }

    #[test]
    fn esc_goes_back_to_the_menu() {
        let ctx = ctx(false);
        let mut state = EstimateState::new();
        assert!(matches!(
            handle_key(&mut state, KeyCode::Esc, &ctx),
            Action::Transition(Screen::Menu(_))
        ));
    }
}
