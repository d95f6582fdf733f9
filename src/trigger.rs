//! Search trigger wiring
//!
//! [`SearchTrigger`] binds a text input field to a [`HostEnvironment`] and
//! reproduces the launch behavior of a site search box: pressing Enter in
//! the field or clicking the submit control opens a site-restricted search
//! for the current value in a new browsing context.
//!
//! Event handlers report an [`EventOutcome`] so the host knows whether the
//! default action for the event should still run. Enter and submit clicks
//! are always consumed, even when the empty-value guard stops the launch.

use crate::engine::site_search_url;
use crate::host::HostEnvironment;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// What a handler did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Handled here; the host must suppress the default action
    Consumed,
    /// Not handled; the default action proceeds
    Ignored,
}

/// Single-line text input state with a character cursor
#[derive(Debug, Default, Clone)]
pub struct SearchField {
    value: String,
    cursor: usize,
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the field
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters from the start of the value
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    /// Remove the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
    }

    /// Remove the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.value.chars().count() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.value.remove(at);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Byte index of the character at char position `cursor`
    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }
}

/// Search box bound to a host environment
pub struct SearchTrigger {
    field: SearchField,
    env: Box<dyn HostEnvironment>,
}

impl SearchTrigger {
    /// Bind a fresh input field to `env`
    pub fn bind(env: Box<dyn HostEnvironment>) -> Self {
        Self {
            field: SearchField::new(),
            env,
        }
    }

    /// The bound input field
    pub fn field(&self) -> &SearchField {
        &self.field
    }

    /// Mutable access for the host to apply default text editing
    pub fn field_mut(&mut self) -> &mut SearchField {
        &mut self.field
    }

    /// Hostname searches are restricted to
    pub fn hostname(&self) -> &str {
        self.env.hostname()
    }

    /// Keydown on the input field.
    ///
    /// Enter (Press or Repeat) launches the search and is consumed whether
    /// or not the launch happens; every other key is ignored so the host
    /// can apply its default editing. A key Release is not a keydown.
    pub fn on_key_down(&mut self, key: KeyEvent) -> EventOutcome {
        if key.code == KeyCode::Enter
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
        {
            self.perform_search();
            return EventOutcome::Consumed;
        }

        EventOutcome::Ignored
    }

    /// Click on the submit control. Always consumed.
    pub fn on_submit_click(&mut self) -> EventOutcome {
        self.perform_search();
        EventOutcome::Consumed
    }

    /// Launch the search for the current field value.
    ///
    /// Does nothing when the value is the empty string. The value is kept;
    /// launching does not reset the field. Never fails: opening problems
    /// stay inside the environment.
    pub fn perform_search(&self) {
        let query = self.field.value();
        if query.is_empty() {
            return;
        }

        let url = site_search_url(self.env.hostname(), query);
        self.env.open_in_new_context(&url);
    }

    /// URL the current value would open, or `None` while the guard blocks it
    pub fn pending_search_url(&self) -> Option<String> {
        let query = self.field.value();
        if query.is_empty() {
            return None;
        }

        Some(site_search_url(self.env.hostname(), query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use std::sync::{Arc, Mutex};

    struct RecordingEnvironment {
        hostname: String,
        opened: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingEnvironment {
        fn new(hostname: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let opened = Arc::new(Mutex::new(Vec::new()));
            let env = Self {
                hostname: hostname.to_string(),
                opened: opened.clone(),
            };
            (env, opened)
        }
    }

    impl HostEnvironment for RecordingEnvironment {
        fn hostname(&self) -> &str {
            &self.hostname
        }

        fn open_in_new_context(&self, url: &str) {
            self.opened.lock().unwrap().push(url.to_string());
        }
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn type_text(trigger: &mut SearchTrigger, text: &str) {
        for ch in text.chars() {
            trigger.field_mut().insert(ch);
        }
    }

    #[test]
    fn test_field_insert_and_cursor() {
        let mut field = SearchField::new();
        field.insert('a');
        field.insert('b');
        assert_eq!(field.value(), "ab");
        assert_eq!(field.cursor(), 2);

        field.move_left();
        field.insert('x');
        assert_eq!(field.value(), "axb");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_field_edits_multibyte_text() {
        let mut field = SearchField::new();
        for ch in "été".chars() {
            field.insert(ch);
        }
        assert_eq!(field.value(), "été");

        field.backspace();
        assert_eq!(field.value(), "ét");

        field.move_home();
        field.delete();
        assert_eq!(field.value(), "t");
    }

    #[test]
    fn test_field_bounds() {
        let mut field = SearchField::new();
        field.backspace();
        field.delete();
        field.move_left();
        field.move_right();
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);

        field.insert('q');
        field.move_end();
        field.move_right();
        assert_eq!(field.cursor(), 1);
    }

    #[test]
    fn test_enter_launches_search() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "hello world");

        assert_eq!(trigger.on_key_down(enter()), EventOutcome::Consumed);
        assert_eq!(
            opened.lock().unwrap().as_slice(),
            ["https://www.ecosia.org/search?q=site:example.com%20hello%20world"]
        );
    }

    #[test]
    fn test_enter_on_empty_field_consumed_without_launch() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));

        assert_eq!(trigger.on_key_down(enter()), EventOutcome::Consumed);
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_only_value_still_launches() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "   ");

        trigger.on_submit_click();
        assert_eq!(
            opened.lock().unwrap().as_slice(),
            ["https://www.ecosia.org/search?q=site:example.com%20%20%20%20"]
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "query");

        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(trigger.on_key_down(key), EventOutcome::Ignored);
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(trigger.on_key_down(key), EventOutcome::Ignored);
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enter_release_is_not_a_keydown() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "query");

        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(trigger.on_key_down(release), EventOutcome::Ignored);
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enter_with_modifiers_still_launches() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "query");

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT);
        assert_eq!(trigger.on_key_down(key), EventOutcome::Consumed);
        assert_eq!(opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_value_kept_after_launch() {
        let (env, opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        type_text(&mut trigger, "rust");

        trigger.on_key_down(enter());
        trigger.on_key_down(enter());
        assert_eq!(trigger.field().value(), "rust");
        assert_eq!(opened.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_pending_search_url() {
        let (env, _opened) = RecordingEnvironment::new("example.com");
        let mut trigger = SearchTrigger::bind(Box::new(env));
        assert_eq!(trigger.pending_search_url(), None);

        type_text(&mut trigger, "hi");
        assert_eq!(
            trigger.pending_search_url().as_deref(),
            Some("https://www.ecosia.org/search?q=site:example.com%20hi")
        );
    }
}
