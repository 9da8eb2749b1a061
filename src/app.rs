use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::board::{BoardCommand, BoardLayout, LetterBoard};
use crate::controller::GameController;
use crate::runtime::GameEvent;
use crate::words::WordList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Playing,
    EditingWords,
}

/// Text being typed on the word input screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordInputState {
    pub buffer: String,
}

impl WordInputState {
    pub fn preview(&self) -> WordList {
        WordList::parse(&self.buffer)
    }
}

#[derive(Debug)]
pub struct App {
    pub game: GameController,
    pub board: LetterBoard,
    pub state: AppState,
    pub word_input: WordInputState,
    pub should_quit: bool,
    area: Rect,
    seen_round: u64,
}

impl App {
    pub fn new(game: GameController) -> Self {
        let board = LetterBoard::new(game.words().tile_set());
        Self {
            game,
            board,
            state: AppState::Playing,
            word_input: WordInputState::default(),
            should_quit: false,
            area: Rect::default(),
            seen_round: 0,
        }
    }

    /// Records the drawing area so pointer events hit what was drawn
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout::compute(
            self.area,
            self.board.tiles().len(),
            self.game.session().slots().len(),
        )
    }

    /// Applies one event. Returns whether the screen needs redrawing.
    pub fn handle_event(&mut self, event: GameEvent, now: Instant) -> bool {
        match event {
            GameEvent::Key(key) => {
                self.handle_key(key);
                true
            }
            GameEvent::Mouse(mouse) => self.handle_mouse(mouse),
            GameEvent::Resize => true,
            GameEvent::Tick => self.on_tick(now),
        }
    }

    pub fn on_tick(&mut self, now: Instant) -> bool {
        let before = (self.game.session().round(), self.game.session().status());
        self.game.on_tick(now);
        self.sync_round();
        before != (self.game.session().round(), self.game.session().status())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Playing => self.on_playing_key(key),
            AppState::EditingWords => self.on_editing_key(key),
        }
        self.sync_round();
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let slot_count = self.game.session().slots().len();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('a') => self.game.repeat_word(),
                KeyCode::Char('w') => self.open_word_input(),
                KeyCode::Char('r') => {
                    self.game.reset();
                    self.board.new_round();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.game.start_round(),
            KeyCode::Enter => {
                if !self.game.session().is_idle() {
                    let _ = self.game.verify();
                }
            }
            KeyCode::Left => self.board.move_left(),
            KeyCode::Right => self.board.move_right(slot_count),
            KeyCode::Backspace => {
                let filled: Vec<bool> = self
                    .game
                    .session()
                    .slots()
                    .iter()
                    .map(Option::is_some)
                    .collect();
                let command = self.board.backspace(&filled);
                self.run(command);
            }
            KeyCode::Delete => {
                let command = self.board.delete(slot_count);
                self.run(command);
            }
            KeyCode::Char(c) => {
                let command = self.board.type_char(c, slot_count);
                self.run(command);
            }
            _ => {}
        }
    }

    fn on_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Playing,
            KeyCode::Enter => self.save_word_input(),
            KeyCode::Backspace => {
                self.word_input.buffer.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.word_input.buffer.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.word_input.buffer.push(c);
            }
            _ => {}
        }
    }

    pub fn open_word_input(&mut self) {
        self.word_input.buffer = self.game.words().to_input_string();
        self.state = AppState::EditingWords;
    }

    /// "Save & start": replace the list, which resets the session, then draw a word.
    pub fn save_word_input(&mut self) {
        let words = self.word_input.preview();
        self.board.set_tiles(words.tile_set());
        self.game.replace_words(words);
        self.board.new_round();
        self.game.start_round();
        self.state = AppState::Playing;
    }

    /// Mouse input drives the same place/clear contract as the keyboard.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.state != AppState::Playing {
            return false;
        }

        let layout = self.layout();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let command = self.board.pointer_down(&layout, mouse.column, mouse.row);
                self.run(command);
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.board.pointer_moved(&layout, mouse.column, mouse.row);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let command = self.board.pointer_up(&layout, mouse.column, mouse.row);
                self.run(command);
                true
            }
            _ => false,
        }
    }

    fn run(&mut self, command: Option<BoardCommand>) {
        // rejected commands are already logged by the controller
        let _ = match command {
            Some(BoardCommand::Place { slot, letter }) => self.game.place_letter(slot, letter),
            Some(BoardCommand::Clear { slot }) => self.game.clear_letter(slot),
            None => Ok(()),
        };
    }

    fn sync_round(&mut self) {
        let round = self.game.session().round();
        if round != self.seen_round {
            self.seen_round = round;
            self.board.new_round();
        }
    }
}
