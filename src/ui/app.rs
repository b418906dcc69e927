//! Main UI Application
//!
//! Owns the current run and routes keyboard and mouse input to it: the
//! title menu, the map screen, and the modal menus drawn over it.

use std::cell::Cell;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::input::{command_for, Command};
use super::menu::{Menu, MAX_OPTIONS};
use super::to_color;
use crate::colors::{self, Rgb};
use crate::data::GameConfig;
use crate::ecs::{Position, Renderable};
use crate::game::{Game, PlayerAction, Prompt, TargetInput};
use crate::progression::LevelUpChoice;
use crate::save::{self, SaveError};

/// Slot used for the single running save
const SAVE_SLOT: u8 = 0;

/// Which screen has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
    Inventory(InventoryMode),
    CharacterSheet,
}

/// What picking from the inventory menu does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryMode {
    Use,
    Drop,
}

/// Main UI application
pub struct App {
    screen: Screen,
    game: Option<Game>,
    config: GameConfig,
    /// Error text shown until the next key press
    dialog: Option<String>,
    /// Map tile under the mouse cursor
    mouse: Option<Position>,
    /// Where the map was last drawn, for mouse lookups
    map_area: Cell<Rect>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            screen: Screen::MainMenu,
            game: None,
            config,
            dialog: None,
            mouse: None,
            map_area: Cell::new(Rect::default()),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.shutdown();
            return Ok(true);
        }

        // Any key dismisses a dialog
        if self.dialog.take().is_some() {
            return Ok(false);
        }

        match self.screen {
            Screen::MainMenu => self.handle_main_menu_input(key),
            Screen::Playing => {
                self.handle_playing_input(key)?;
                Ok(false)
            }
            Screen::Inventory(mode) => {
                self.handle_inventory_input(key, mode);
                Ok(false)
            }
            Screen::CharacterSheet => {
                self.screen = Screen::Playing;
                Ok(false)
            }
        }
    }

    /// Track the hovered tile and answer targeting clicks
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let pos = self.screen_to_map(mouse.column, mouse.row);
        self.mouse = pos;

        if self.screen != Screen::Playing || self.dialog.is_some() {
            return;
        }
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if !matches!(game.prompt(), Some(Prompt::Targeting { .. })) {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(pos) = pos {
                    game.select_target(TargetInput::Select(pos));
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                game.select_target(TargetInput::Cancel);
            }
            _ => {}
        }
    }

    /// Save the running game, if any
    pub fn shutdown(&mut self) {
        self.leave_game();
    }

    fn handle_main_menu_input(&mut self, key: KeyEvent) -> Result<bool> {
        match main_menu().index_for_key(key.code) {
            Some(0) => self.start_new_game()?,
            Some(1) => self.continue_game(),
            Some(2) => return Ok(true),
            _ if key.code == KeyCode::Esc => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    fn start_new_game(&mut self) -> Result<()> {
        let game = Game::new_game(self.config.clone(), None)?;
        self.game = Some(game);
        self.screen = Screen::Playing;
        Ok(())
    }

    fn continue_game(&mut self) {
        match save::load_game(SAVE_SLOT, self.config.clone()) {
            Ok(game) => {
                self.game = Some(game);
                self.screen = Screen::Playing;
            }
            Err(SaveError::NotFound { .. }) => {
                self.dialog = Some("No saved game to load.".to_string());
            }
            Err(e) => {
                log::warn!("Failed to load save: {e}");
                self.dialog = Some(format!("Could not load the saved game: {e}"));
            }
        }
    }

    fn leave_game(&mut self) {
        if let Some(game) = self.game.take() {
            // A finished run leaves nothing to continue
            let result = if game.is_playing() {
                save::save_game(&game, SAVE_SLOT)
            } else {
                save::delete_save(SAVE_SLOT)
            };
            if let Err(e) = result {
                log::warn!("Failed to save game: {e}");
                self.dialog = Some(format!("Could not save the game: {e}"));
            }
        }
        self.screen = Screen::MainMenu;
    }

    fn handle_playing_input(&mut self, key: KeyEvent) -> Result<()> {
        let Some(game) = self.game.as_mut() else {
            self.screen = Screen::MainMenu;
            return Ok(());
        };

        match game.prompt().copied() {
            Some(Prompt::LevelUp) => {
                if let Some(index) = level_up_menu(game).index_for_key(key.code) {
                    game.choose_level_up(LevelUpChoice::ALL[index]);
                }
                return Ok(());
            }
            Some(Prompt::Targeting { .. }) => {
                if key.code == KeyCode::Esc {
                    game.select_target(TargetInput::Cancel);
                }
                return Ok(());
            }
            None => {}
        }

        let Some(command) = command_for(key) else {
            return Ok(());
        };
        match command {
            Command::Move { dx, dy } => {
                game.perform(PlayerAction::Move { dx, dy });
            }
            Command::Wait => {
                game.perform(PlayerAction::Wait);
            }
            Command::PickUp => {
                game.perform(PlayerAction::PickUp);
            }
            Command::Inventory => self.screen = Screen::Inventory(InventoryMode::Use),
            Command::Drop => self.screen = Screen::Inventory(InventoryMode::Drop),
            Command::Descend => {
                game.descend()?;
            }
            Command::Character => self.screen = Screen::CharacterSheet,
            Command::Quit => self.leave_game(),
        }
        Ok(())
    }

    fn handle_inventory_input(&mut self, key: KeyEvent, mode: InventoryMode) {
        self.screen = Screen::Playing;
        let Some(game) = self.game.as_mut() else {
            return;
        };
        if let Some(index) = inventory_menu(game, mode).index_for_key(key.code) {
            let action = match mode {
                InventoryMode::Use => PlayerAction::UseItem(index),
                InventoryMode::Drop => PlayerAction::DropItem(index),
            };
            game.perform(action);
        }
    }

    fn screen_to_map(&self, column: u16, row: u16) -> Option<Position> {
        let area = self.map_area.get();
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| Position::new((column - area.x) as i32, (row - area.y) as i32))
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, frame: &mut Frame) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        match (&self.game, self.screen) {
            (Some(game), screen) if screen != Screen::MainMenu => self.render_playing(frame, game, screen),
            _ => self.render_main_menu(frame),
        }

        if let Some(text) = &self.dialog {
            render_dialog(frame, text);
        }
    }

    fn render_main_menu(&self, frame: &mut Frame) {
        let area = centered_rect(60, 50, frame.area());
        let mut lines = vec![
            Line::from(Span::styled(
                "TOMBS OF THE ANCIENT KINGS",
                Style::default()
                    .fg(to_color(colors::LIGHT_YELLOW))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(
            main_menu()
                .lines()
                .into_iter()
                .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::White)))),
        );

        let menu = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(menu, area);
    }

    fn render_playing(&self, frame: &mut Frame, game: &Game, screen: Screen) {
        let panel_height = game.config().message_height as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(panel_height)])
            .split(frame.area());
        let panel = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(chunks[1]);

        self.render_map(frame, game, chunks[0]);
        self.render_status(frame, game, panel[0]);
        render_messages(frame, game, panel[1]);

        match screen {
            Screen::Inventory(mode) => render_menu(frame, &inventory_menu(game, mode)),
            Screen::CharacterSheet => render_character_sheet(frame, game),
            _ => {}
        }
        if matches!(game.prompt(), Some(Prompt::LevelUp)) {
            render_menu(frame, &level_up_menu(game));
        }
    }

    fn render_map(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let title = if !game.is_playing() {
            " You died! Press Esc to return to the menu ".to_string()
        } else if matches!(game.prompt(), Some(Prompt::Targeting { .. })) {
            " Choose a target: left-click, right-click or Esc to cancel ".to_string()
        } else {
            " Tombs of the Ancient Kings ".to_string()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.map_area.set(inner);

        let map = game.map();
        let buf = frame.buffer_mut();
        for y in 0..map.height.min(inner.height as i32) {
            for x in 0..map.width.min(inner.width as i32) {
                let Some(tile) = map.get_tile(x, y) else {
                    continue;
                };
                if !tile.explored {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((inner.x + x as u16, inner.y + y as u16)) {
                    cell.set_char(' ').set_bg(to_color(tile.bg_color(tile.visible)));
                }
            }
        }

        // Player drawn last so it stays on top
        let player = game.player();
        let order = game
            .objects()
            .iter()
            .copied()
            .filter(|&e| e != player)
            .chain(std::iter::once(player));
        for entity in order {
            if !game.is_drawn(entity) {
                continue;
            }
            let (Some(pos), Ok(render)) = (game.position_of(entity), game.world().get::<&Renderable>(entity))
            else {
                continue;
            };
            if pos.x < 0 || pos.y < 0 || pos.x >= inner.width as i32 || pos.y >= inner.height as i32 {
                continue;
            }
            if let Some(cell) = buf.cell_mut((inner.x + pos.x as u16, inner.y + pos.y as u16)) {
                cell.set_char(render.glyph).set_fg(to_color(render.color));
            }
        }
    }

    fn render_status(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let stats = game.player_stats();
        let (hp, mp) = game.player_fighter().map_or((0, 0), |f| (f.hp, f.mp));
        let mut lines = vec![
            bar_line("HP", hp, stats.max_hp, colors::LIGHT_RED, colors::DARKER_RED, inner.width),
            bar_line("MP", mp, stats.max_mp, colors::LIGHT_BLUE, colors::DARKER_BLUE, inner.width),
            Line::from(Span::styled(
                format!("Dungeon level {}", game.depth()),
                Style::default().fg(Color::White),
            )),
        ];
        if let Some(pos) = self.mouse {
            lines.push(Line::from(Span::styled(
                game.names_at(pos),
                Style::default().fg(to_color(colors::LIGHT_GRAY)),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

fn main_menu() -> Menu {
    Menu::new(
        "",
        vec![
            "Play a new game".to_string(),
            "Continue last game".to_string(),
            "Quit".to_string(),
        ],
    )
}

fn inventory_menu(game: &Game, mode: InventoryMode) -> Menu {
    let header = match mode {
        InventoryMode::Use => "Press the key next to an item to use it, or any other to cancel.",
        InventoryMode::Drop => "Press the key next to an item to drop it, or any other to cancel.",
    };
    let mut labels = game.inventory_labels();
    labels.truncate(MAX_OPTIONS);
    Menu::new(header, labels)
}

fn level_up_menu(game: &Game) -> Menu {
    let stats = game.player_stats();
    Menu::new(
        "Level up! Choose a stat to raise:",
        LevelUpChoice::ALL.iter().map(|c| c.describe(&stats)).collect(),
    )
}

fn render_messages(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Messages ")
        .border_style(Style::default().fg(Color::DarkGray));

    let lines: Vec<Line> = game
        .messages()
        .iter()
        .map(|msg| Line::from(Span::styled(msg.text.as_str(), Style::default().fg(to_color(msg.color)))))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_menu(frame: &mut Frame, menu: &Menu) {
    let width = 64u16.min(frame.area().width);
    let text_width = width.saturating_sub(2).max(1) as usize;
    let header_lines = menu.header.len().div_ceil(text_width).max(1);
    let option_lines = menu.options.len().max(1);
    let height = (header_lines + option_lines + 3) as u16;
    let area = popup_area(frame.area(), width, height);

    let mut lines = vec![
        Line::from(Span::styled(menu.header.as_str(), Style::default().fg(Color::White))),
        Line::from(""),
    ];
    if menu.options.is_empty() {
        lines.push(Line::from(Span::styled(
            "Inventory is empty.",
            Style::default().fg(to_color(colors::LIGHT_GRAY)),
        )));
    }
    lines.extend(menu.lines().into_iter().map(Line::from));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

fn render_character_sheet(frame: &mut Frame, game: &Game) {
    let sheet = game.character_sheet();
    let lines: Vec<Line> = [
        "Character Information".to_string(),
        String::new(),
        format!("Level: {}", sheet.level),
        format!("Experience: {}", sheet.xp),
        format!("Experience to level up: {}", sheet.next_level_xp),
        String::new(),
        format!("Maximum HP: {}", sheet.stats.max_hp),
        format!("Maximum MP: {}", sheet.stats.max_mp),
        format!("Attack: {}", sheet.stats.power),
        format!("Defense: {}", sheet.stats.defense),
    ]
    .into_iter()
    .map(Line::from)
    .collect();

    let area = popup_area(frame.area(), 40, lines.len() as u16 + 2);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Press any key ")
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_dialog(frame: &mut Frame, text: &str) {
    let area = popup_area(frame.area(), 50, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(to_color(colors::LIGHT_RED)));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// A status bar: filled share in `fill`, the rest in `back`, label centered
fn bar_line(label: &str, value: i32, max: i32, fill: Rgb, back: Rgb, width: u16) -> Line<'static> {
    let width = width as usize;
    let filled = if max > 0 {
        (value.clamp(0, max) as usize * width) / max as usize
    } else {
        0
    };
    let text: String = format!("{:^width$}", format!("{label}: {value}/{max}"))
        .chars()
        .take(width)
        .collect();
    let (left, right) = text.split_at(filled.min(text.len()));

    Line::from(vec![
        Span::styled(left.to_string(), Style::default().fg(Color::White).bg(to_color(fill))),
        Span::styled(right.to_string(), Style::default().fg(Color::White).bg(to_color(back))),
    ])
}

/// A fixed-size rectangle centered in `area`, shrunk to fit
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn draw(app: &App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 60)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
    }

    #[test]
    fn test_new_game_from_menu() {
        let mut app = App::default();
        assert!(!app.handle_key(key('a')).unwrap());
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.game().map(|g| g.depth()), Some(1));

        let terminal = draw(&app);
        assert!(terminal.backend().buffer().content.iter().any(|cell| cell.symbol() == "@"));
    }

    #[test]
    fn test_escape_on_menu_quits() {
        let mut app = App::default();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)).unwrap());
    }

    #[test]
    fn test_inventory_menu_toggles_dagger() {
        let mut app = App::default();
        app.handle_key(key('a')).unwrap();
        app.handle_key(key('i')).unwrap();
        assert_eq!(app.screen(), Screen::Inventory(InventoryMode::Use));
        draw(&app);

        app.handle_key(key('a')).unwrap();
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.game().unwrap().inventory_labels(), vec!["dagger"]);
    }

    #[test]
    fn test_unlisted_key_closes_inventory() {
        let mut app = App::default();
        app.handle_key(key('a')).unwrap();
        app.handle_key(key('d')).unwrap();
        app.handle_key(key('z')).unwrap();
        assert_eq!(app.screen(), Screen::Playing);
        assert_eq!(app.game().unwrap().inventory().len(), 1);
    }

    #[test]
    fn test_mouse_maps_into_drawn_map() {
        let mut app = App::default();
        app.handle_key(key('a')).unwrap();
        draw(&app);

        let area = app.map_area.get();
        assert_eq!(app.screen_to_map(area.x + 3, area.y + 4), Some(Position::new(3, 4)));
        assert_eq!(app.screen_to_map(0, 0), None);
    }

    #[test]
    fn test_bar_fill_proportional() {
        let line = bar_line("HP", 15, 30, colors::LIGHT_RED, colors::DARKER_RED, 20);
        assert_eq!(line.spans[0].content.len(), 10);
        assert_eq!(line.spans[1].content.len(), 10);
        assert!(line.to_string().contains("HP: 15/30"));

        let empty = bar_line("MP", 0, 0, colors::LIGHT_BLUE, colors::DARKER_BLUE, 20);
        assert_eq!(empty.spans[0].content.len(), 0);
    }
}
