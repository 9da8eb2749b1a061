use ratatui::Frame;

use crate::app::{App, AppState};
use crate::ui::word_input::render_word_input;

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Game screen - tiles, slots and feedback via the App widget
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        app.set_area(f.area());
        f.render_widget(&*app, f.area());
    }
}

/// Custom word list editor
pub struct WordInputScreen;

impl Screen for WordInputScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_word_input(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Playing => Box::new(GameScreen),
        AppState::EditingWords => Box::new(WordInputScreen),
    }
}

/// Draws whichever screen the app is on
pub fn draw(app: &mut App, f: &mut Frame) {
    current_screen(&app.state).render(app, f);
}
