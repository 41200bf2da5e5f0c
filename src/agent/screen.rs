use crate::core::Field;

use super::AgentError;

/// Whose turn a rendered view announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Mine,
    Theirs,
    /// Game over.
    None,
}

/// Rendering collaborator driven by the agent.
///
/// Implementations only read the fields they are handed.
pub trait Screen {
    /// Redraw both fields with a turn indicator.
    fn draw(&mut self, mine: &Field, theirs: &Field, turn: Turn);

    /// Replace the view with an error message.
    fn show_error(&mut self, error: &AgentError);
}

/// Screen that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScreen;

impl Screen for NullScreen {
    fn draw(&mut self, _mine: &Field, _theirs: &Field, _turn: Turn) {}
    fn show_error(&mut self, _error: &AgentError) {}
}

impl<S: Screen + ?Sized> Screen for &mut S {
    fn draw(&mut self, mine: &Field, theirs: &Field, turn: Turn) {
        (**self).draw(mine, theirs, turn)
    }

    fn show_error(&mut self, error: &AgentError) {
        (**self).show_error(error)
    }
}
