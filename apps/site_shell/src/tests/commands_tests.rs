use std::sync::Arc;

use page_core::{
    testing::{ManualScheduler, RecordingView, ScriptedService},
    Dispatched, PageController, PageDeps, PageSettings,
};
use shared::domain::{SectionId, SectionRegistry};
use storage::{MemoryStore, PreferenceStore};

use super::*;

fn parsed(line: &str) -> ShellCommand {
    parse_command(line)
        .expect("parse")
        .expect("non-empty command")
}

#[test]
fn blank_lines_are_skipped() {
    assert!(parse_command("").expect("parse").is_none());
    assert!(parse_command("   \t").expect("parse").is_none());
}

#[test]
fn goto_carries_raw_target() {
    match parsed("goto  #FAQ ") {
        ShellCommand::Page(PageEvent::NavClick { target }) => assert_eq!(target, "#FAQ"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        parse_command("goto").expect_err("missing target"),
        CommandError::MissingArgument {
            command: "goto",
            expected: "a section",
        }
    );
}

#[test]
fn goto_keeps_every_word_of_the_target() {
    let ShellCommand::Page(event) = parsed("goto faq tos") else {
        panic!("expected a page event");
    };
    match &event {
        PageEvent::NavClick { target } => assert_eq!(target, "faq tos"),
        other => panic!("unexpected {other:?}"),
    }

    let mut page = PageController::start(
        PageDeps {
            view: Arc::new(RecordingView::new()),
            scheduler: Arc::new(ManualScheduler::new()),
            preferences: PreferenceStore::new(Arc::new(MemoryStore::new())),
            registry: SectionRegistry::new("Brightline"),
            service: Arc::new(ScriptedService::accepting()),
        },
        &PageSettings::default(),
        None,
    );
    assert!(matches!(page.dispatch(event), Dispatched::NavigationRejected));
    assert_eq!(page.navigation().current(), SectionId::Home);
}

#[test]
fn key_with_shift_modifier() {
    match parsed("key Tab shift") {
        ShellCommand::Page(PageEvent::KeyDown { key, shift }) => {
            assert_eq!(key, Key::Tab);
            assert!(shift);
        }
        other => panic!("unexpected {other:?}"),
    }
    match parsed("key Esc") {
        ShellCommand::Page(PageEvent::KeyDown { key, shift }) => {
            assert_eq!(key, Key::Escape);
            assert!(!shift);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn field_value_keeps_inner_spaces() {
    match parsed("field Message  hello there  friend ") {
        ShellCommand::SetField(field, value) => {
            assert_eq!(field, FormField::Message);
            assert_eq!(value, "hello there  friend");
        }
        other => panic!("unexpected {other:?}"),
    }
    match parsed("field contact") {
        ShellCommand::SetField(FormField::Contact, value) => assert!(value.is_empty()),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn numeric_arguments_are_checked() {
    assert!(matches!(
        parsed("scroll 72.5"),
        ShellCommand::Page(PageEvent::Scroll { offset }) if offset == 72.5
    ));
    assert!(matches!(
        parsed("faq 2"),
        ShellCommand::Page(PageEvent::FaqToggle { index: 2 })
    ));
    assert!(matches!(
        parse_command("faq -1"),
        Err(CommandError::InvalidArgument { what: "faq index", .. })
    ));
    assert!(matches!(
        parse_command("scroll far"),
        Err(CommandError::InvalidArgument { .. })
    ));
}

#[test]
fn unknown_commands_and_fields_error() {
    assert_eq!(
        parse_command("dance").expect_err("unknown"),
        CommandError::Unknown("dance".to_string())
    );
    assert!(matches!(
        parse_command("field phone 555"),
        Err(CommandError::InvalidArgument { what: "field", .. })
    ));
}

#[test]
fn menu_names_its_trigger() {
    match parsed("menu") {
        ShellCommand::Page(PageEvent::ToggleSidebar { trigger }) => {
            assert_eq!(trigger, Some(ElementId::from(MENU_TOGGLE)));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(parsed("quit"), ShellCommand::Quit));
    assert!(matches!(parsed("?"), ShellCommand::Help));
}
