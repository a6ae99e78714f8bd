use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::state::form::Field;

/// Regions of the estimate form.
pub struct FormLayout {
    pub title: Rect,
    pub subtitle: Rect,
    /// One input box per field, in [`Field::ALL`] order.
    pub inputs: [Rect; 5],
    pub result: Rect,
    pub hints: Rect,
}

/// Height of one input box, borders included.
const INPUT_HEIGHT: u16 = 3;

/// Computes the form regions.
///
/// Municipality, neighborhood and parcel size go in the left column, living
/// rooms and rooms in the right one.
pub fn form(area: Rect) -> FormLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // title
            Constraint::Length(1),                // subtitle
            Constraint::Length(1),                // spacer
            Constraint::Length(INPUT_HEIGHT * 3), // inputs
            Constraint::Length(1),                // spacer
            Constraint::Length(3),                // result
            Constraint::Min(0),                   // spacer
            Constraint::Length(1),                // hints
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    let stack = |area: Rect, n: usize| {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(INPUT_HEIGHT); n])
            .split(area)
    };
    let left = stack(cols[0], 3);
    let right = stack(cols[1], 2);

    let inputs = Field::ALL.map(|field| match field {
        Field::Municipality => left[0],
        Field::Neighborhood => left[1],
        Field::ParcelSize => left[2],
        Field::LivingRooms => right[0],
        Field::Rooms => right[1],
    });

    FormLayout {
        title: rows[0],
        subtitle: rows[1],
        inputs,
        result: rows[5],
        hints: rows[7],
    }
}

/// Returns a rectangle of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
