//! Interactive search prompt
//!
//! A full-screen terminal page hosting the search box: a text input, a
//! `[ Search ]` submit control, and a status line showing what the last
//! trigger opened. Key events go to the trigger first; whatever it leaves
//! unconsumed gets the default editing behavior here.

use crate::error::SiteSearchResult;
use crate::trigger::{EventOutcome, SearchTrigger};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

const SUBMIT_LABEL: &str = "[ Search ]";
const HINT: &str = "Enter or click [ Search ] opens the results in your browser. Esc quits.";

/// Terminal page hosting a [`SearchTrigger`]
pub struct SearchPrompt {
    trigger: SearchTrigger,
    /// Submit control area from the last draw, for click hit-testing
    submit_area: Rect,
    status: Option<String>,
    quit: bool,
}

impl SearchPrompt {
    pub fn new(trigger: SearchTrigger) -> Self {
        Self {
            trigger,
            submit_area: Rect::default(),
            status: None,
            quit: false,
        }
    }

    /// Run the prompt until the user quits
    pub fn run(&mut self) -> SiteSearchResult<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> SiteSearchResult<()> {
        while !self.quit {
            terminal.draw(|frame| self.draw(frame))?;

            match event::read()? {
                Event::Key(key) => self.on_key(key),
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
        }

        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        match self.trigger.on_key_down(key) {
            EventOutcome::Consumed => self.status = Some(self.launch_status()),
            EventOutcome::Ignored => self.apply_default_editing(key),
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if rect_contains(self.submit_area, mouse.column, mouse.row) {
                self.trigger.on_submit_click();
                self.status = Some(self.launch_status());
            }
        }
    }

    /// Default editing for keys the trigger left alone
    fn apply_default_editing(&mut self, key: KeyEvent) {
        let field = self.trigger.field_mut();
        match key.code {
            KeyCode::Char(ch)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                field.insert(ch)
            }
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.move_home(),
            KeyCode::End => field.move_end(),
            _ => {}
        }
    }

    fn launch_status(&self) -> String {
        match self.trigger.pending_search_url() {
            Some(url) => format!("Opened {url}"),
            None => "Nothing to search yet".to_string(),
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(frame.size());

        let input_area = chunks[0];
        let input = Paragraph::new(self.trigger.field().value()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Search {} ", self.trigger.hostname())),
        );
        frame.render_widget(input, input_area);

        let button_area = Rect {
            width: chunks[1].width.min(SUBMIT_LABEL.len() as u16 + 2),
            ..chunks[1]
        };
        let button = Paragraph::new(SUBMIT_LABEL)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, button_area);
        self.submit_area = button_area;

        let status = Paragraph::new(self.status.clone().unwrap_or_default())
            .style(Style::default().fg(Color::Cyan));
        frame.render_widget(status, chunks[2]);

        let hint = Paragraph::new(HINT).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, chunks[3]);

        let cursor_x = (input_area.x + 1 + self.trigger.field().cursor() as u16)
            .min(input_area.x + input_area.width.saturating_sub(2));
        frame.set_cursor(cursor_x, input_area.y + 1);
    }
}

fn rect_contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
