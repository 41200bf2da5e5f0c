#![cfg(feature = "std")]

use std::fmt::Write as _;

use crate::{
    agent::{AgentError, Screen, Turn},
    core::{Field, FieldPosition, FIELD_COLS},
};

fn symbol(p: FieldPosition) -> char {
    match p {
        FieldPosition::Empty => '.',
        FieldPosition::Unknown => ' ',
        FieldPosition::Boat(boat) => char::from_digit(boat.size() as u32, 10).unwrap_or('#'),
        FieldPosition::Hit => 'X',
        FieldPosition::Miss => 'o',
    }
}

/// Render both fields side by side with a turn banner.
pub fn render_fields(mine: &Field, theirs: &Field, turn: Turn) -> String {
    let banner = match turn {
        Turn::Mine => "MY TURN",
        Turn::Theirs => "THEIR TURN",
        Turn::None => "GAME OVER",
    };
    let width = FIELD_COLS * 2 + 1;
    let mut s = String::new();
    let _ = writeln!(s, "{:^w$}   {:^w$}", "mine", "theirs", w = width + 2);
    for (my_row, their_row) in mine.rows().iter().zip(theirs.rows().iter()) {
        s.push_str("[ ");
        for cell in my_row {
            s.push(symbol(*cell));
            s.push(' ');
        }
        s.push_str("]   [ ");
        for cell in their_row {
            s.push(symbol(*cell));
            s.push(' ');
        }
        s.push_str("]\n");
    }
    let _ = writeln!(
        s,
        "{} | fleet {:04b} | enemy {:04b}",
        banner,
        mine.boat_states(),
        theirs.boat_states()
    );
    s
}

/// Screen that logs every redraw, prefixed with a player label.
#[derive(Debug, Clone)]
pub struct ConsoleScreen {
    label: String,
}

impl ConsoleScreen {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Screen for ConsoleScreen {
    fn draw(&mut self, mine: &Field, theirs: &Field, turn: Turn) {
        log::info!("[{}]\n{}", self.label, render_fields(mine, theirs, turn));
    }

    fn show_error(&mut self, error: &AgentError) {
        log::error!("[{}] {}", self.label, error);
    }
}
