//! Integration tests for the search trigger
//!
//! These tests drive the public trigger API against a recording host
//! environment and check the launch rules end to end.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sitesearch::{EventOutcome, HostEnvironment, SearchTrigger};
use std::sync::{Arc, Mutex};

// Host environment that records every opened URL instead of launching
// a browser.
#[derive(Debug, Clone)]
struct LaunchRecorder {
    hostname: String,
    opened: Arc<Mutex<Vec<String>>>,
}

impl LaunchRecorder {
    fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            opened: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl HostEnvironment for LaunchRecorder {
    fn hostname(&self) -> &str {
        &self.hostname
    }

    fn open_in_new_context(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

fn trigger_for(hostname: &str) -> (SearchTrigger, LaunchRecorder) {
    let recorder = LaunchRecorder::new(hostname);
    let trigger = SearchTrigger::bind(Box::new(recorder.clone()));
    (trigger, recorder)
}

fn type_text(trigger: &mut SearchTrigger, text: &str) {
    for ch in text.chars() {
        trigger.field_mut().insert(ch);
    }
}

fn enter() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

#[test]
fn test_enter_opens_site_restricted_search() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "hello world");

    let outcome = trigger.on_key_down(enter());

    assert_eq!(outcome, EventOutcome::Consumed);
    assert_eq!(
        recorder.opened(),
        vec!["https://www.ecosia.org/search?q=site:example.com%20hello%20world".to_string()]
    );
}

#[test]
fn test_submit_click_opens_the_same_search() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "hello world");

    let outcome = trigger.on_submit_click();

    assert_eq!(outcome, EventOutcome::Consumed);
    assert_eq!(
        recorder.opened(),
        vec!["https://www.ecosia.org/search?q=site:example.com%20hello%20world".to_string()]
    );
}

#[test]
fn test_empty_value_is_consumed_without_launching() {
    let (mut trigger, recorder) = trigger_for("example.com");

    assert_eq!(trigger.on_key_down(enter()), EventOutcome::Consumed);
    assert_eq!(trigger.on_submit_click(), EventOutcome::Consumed);
    assert!(recorder.opened().is_empty());
}

#[test]
fn test_whitespace_only_value_still_launches() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "   ");

    trigger.on_key_down(enter());

    let opened = recorder.opened();
    assert_eq!(opened.len(), 1);
    assert_eq!(
        opened[0],
        "https://www.ecosia.org/search?q=site:example.com%20%20%20%20"
    );
}

#[test]
fn test_key_release_is_not_a_keydown() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "hello");

    let release = KeyEvent::new_with_kind(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    let outcome = trigger.on_key_down(release);

    assert_eq!(outcome, EventOutcome::Ignored);
    assert!(recorder.opened().is_empty());
}

#[test]
fn test_other_keys_are_ignored() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "hello");

    for code in [KeyCode::Char('a'), KeyCode::Backspace, KeyCode::Tab] {
        let outcome = trigger.on_key_down(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(outcome, EventOutcome::Ignored, "key {code:?} should be ignored");
    }

    assert!(recorder.opened().is_empty());
    assert_eq!(trigger.field().value(), "hello");
}

#[test]
fn test_enter_with_modifiers_still_launches() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "hello");

    trigger.on_key_down(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
    trigger.on_key_down(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));

    assert_eq!(recorder.opened().len(), 2);
}

#[test]
fn test_value_is_kept_after_launch() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "rust");

    trigger.on_key_down(enter());
    trigger.on_key_down(enter());

    let opened = recorder.opened();
    assert_eq!(opened.len(), 2);
    assert_eq!(opened[0], opened[1]);
    assert_eq!(trigger.field().value(), "rust");
}

#[test]
fn test_queries_are_percent_encoded() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "a&b=c?d");

    trigger.on_key_down(enter());

    assert_eq!(
        recorder.opened(),
        vec!["https://www.ecosia.org/search?q=site:example.com%20a%26b%3Dc%3Fd".to_string()]
    );
}

#[test]
fn test_unicode_query_is_encoded_as_utf8() {
    let (mut trigger, recorder) = trigger_for("example.com");
    type_text(&mut trigger, "été à Paris");

    trigger.on_key_down(enter());

    assert_eq!(
        recorder.opened(),
        vec![
            "https://www.ecosia.org/search?q=site:example.com%20%C3%A9t%C3%A9%20%C3%A0%20Paris"
                .to_string()
        ]
    );
}

#[test]
fn test_pending_search_url_previews_the_launch() {
    let (mut trigger, recorder) = trigger_for("example.com");
    assert_eq!(trigger.pending_search_url(), None);

    type_text(&mut trigger, "hello");
    let pending = trigger.pending_search_url();
    assert!(pending.is_some());

    trigger.on_key_down(enter());
    assert_eq!(recorder.opened(), vec![pending.unwrap()]);
}

#[test]
fn test_hostname_comes_from_the_environment() {
    let (mut trigger, recorder) = trigger_for("blog.example.org");
    assert_eq!(trigger.hostname(), "blog.example.org");

    type_text(&mut trigger, "q");
    trigger.on_key_down(enter());

    assert!(recorder.opened()[0].contains("q=site:blog.example.org%20q"));
}
