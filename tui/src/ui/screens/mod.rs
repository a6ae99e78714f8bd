pub mod estimate;
pub mod menu;

use crossterm::event::KeyCode;
use ml_core::HousePriceModel;
use ratatui::Frame;

use crate::config::FormConfig;

/// What every screen may read while drawing or handling keys.
pub struct Context {
    /// `None` when no model artifact could be loaded at startup.
    pub model: Option<HousePriceModel>,
    pub form: FormConfig,
}

pub enum Action {
    None,
    Quit,
    Transition(Screen),
}

pub enum Screen {
    Menu(menu::MenuState),
    Estimate(estimate::EstimateState),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Menu(_) => "menu",
            Screen::Estimate(_) => "estimate",
        }
    }

    pub fn draw(&self, f: &mut Frame, ctx: &Context) {
        match self {
            Screen::Menu(s) => menu::draw(f, s, ctx),
            Screen::Estimate(s) => estimate::draw(f, s, ctx),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, ctx: &Context) -> Action {
        match self {
            Screen::Menu(s) => menu::handle_key(s, key),
            Screen::Estimate(s) => estimate::handle_key(s, key, ctx),
        }
    }
}
