use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::backend::Dispatch;
use crate::domain::email::Mailbox;
use crate::terminal::state::AppState;
use crate::terminal::structs::{ComposeField, View};

/// Handle one key press. Returns `true` when the client should exit.
pub fn handle_key(key: KeyEvent, state: &mut AppState, api: &dyn Dispatch) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // The alert blocks everything until acknowledged
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.dismiss_alert();
        }
        return false;
    }

    match key.code {
        KeyCode::F(1) => {
            state.load_mailbox(Mailbox::Inbox, api);
            return false;
        }
        KeyCode::F(2) => {
            state.load_mailbox(Mailbox::Sent, api);
            return false;
        }
        KeyCode::F(3) => {
            state.load_mailbox(Mailbox::Archive, api);
            return false;
        }
        KeyCode::F(4) => {
            state.compose_email();
            return false;
        }
        _ => {}
    }

    if state.view == View::Compose {
        handle_compose_keys(key, state, api);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('i') => {
            state.load_mailbox(Mailbox::Inbox, api);
            return false;
        }
        KeyCode::Char('s') => {
            state.load_mailbox(Mailbox::Sent, api);
            return false;
        }
        KeyCode::Char('a') => {
            state.load_mailbox(Mailbox::Archive, api);
            return false;
        }
        KeyCode::Char('c') => {
            state.compose_email();
            return false;
        }
        _ => {}
    }

    match state.view {
        View::MailboxList => handle_list_keys(key, state, api),
        View::EmailDetail => {
            handle_detail_keys(key, state, api);
            false
        }
        View::Compose => false,
    }
}

fn handle_list_keys(key: KeyEvent, state: &mut AppState, api: &dyn Dispatch) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => state.open_selected(api),
        KeyCode::Down | KeyCode::Char('j') => state.move_selection(1),
        KeyCode::Up | KeyCode::Char('k') => state.move_selection(-1),
        KeyCode::Home => state.move_selection(-(state.rows.len() as i32)),
        KeyCode::End => state.move_selection(state.rows.len() as i32),
        _ => {}
    }
    false
}

fn handle_detail_keys(key: KeyEvent, state: &mut AppState, api: &dyn Dispatch) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => state.back(api),
        KeyCode::Tab | KeyCode::Left | KeyCode::Right => state.toggle_action(),
        KeyCode::Enter => state.activate_selected_action(api),
        KeyCode::Char('x') => state.toggle_archive(api),
        KeyCode::Char('r') => state.reply(),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_body(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_body(-1),
        KeyCode::PageDown => state.scroll_body(10),
        KeyCode::PageUp => state.scroll_body(-10),
        KeyCode::Home => state.body_scroll = 0,
        _ => {}
    }
}

fn handle_compose_keys(key: KeyEvent, state: &mut AppState, api: &dyn Dispatch) {
    match key.code {
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.send_email(api);
            return;
        }
        KeyCode::Esc => {
            state.back(api);
            return;
        }
        _ => {}
    }

    let draft = &mut state.draft;
    match key.code {
        KeyCode::Tab => draft.focus = draft.focus.next(),
        KeyCode::BackTab => draft.focus = draft.focus.prev(),
        KeyCode::Enter if draft.focus == ComposeField::Body => draft.push_char('\n'),
        KeyCode::Enter => draft.focus = draft.focus.next(),
        KeyCode::Backspace => draft.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => draft.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ApiCommand;
    use crate::backend::testing::RecordingDispatch;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(s: &str, state: &mut AppState, api: &RecordingDispatch) {
        for c in s.chars() {
            handle_key(press(KeyCode::Char(c)), state, api);
        }
    }

    #[test]
    fn test_navigation_keys_load_mailboxes() {
        let api = RecordingDispatch::default();
        let mut state = AppState::default();

        handle_key(press(KeyCode::Char('a')), &mut state, &api);
        handle_key(press(KeyCode::F(2)), &mut state, &api);

        assert_eq!(
            api.commands(),
            vec![
                ApiCommand::ListMailbox {
                    mailbox: Mailbox::Archive
                },
                ApiCommand::ListMailbox {
                    mailbox: Mailbox::Sent
                },
            ]
        );
        assert_eq!(state.heading, "Sent");
    }

    #[test]
    fn test_compose_form_typing_and_submit() {
        let api = RecordingDispatch::default();
        let mut state = AppState::default();

        handle_key(press(KeyCode::Char('c')), &mut state, &api);
        assert_eq!(state.view, View::Compose);

        // letters that are shortcuts elsewhere are plain input here
        type_str("a@b.com", &mut state, &api);
        handle_key(press(KeyCode::Enter), &mut state, &api);
        type_str("Hi", &mut state, &api);
        handle_key(press(KeyCode::Tab), &mut state, &api);
        type_str("Body", &mut state, &api);

        assert_eq!(state.draft.recipients, "a@b.com");
        assert_eq!(state.draft.subject, "Hi");
        assert_eq!(state.draft.body, "Body");
        assert!(api.commands().is_empty());

        handle_key(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &mut state,
            &api,
        );
        assert_eq!(api.commands().len(), 1);
    }

    #[test]
    fn test_alert_blocks_input_until_dismissed() {
        let api = RecordingDispatch::default();
        let mut state = AppState::default();
        state.compose_email();

        handle_key(
            KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &mut state,
            &api,
        );
        assert!(state.alert.is_some());

        handle_key(press(KeyCode::Char('x')), &mut state, &api);
        assert!(state.draft.recipients.is_empty());
        assert!(state.alert.is_some());

        handle_key(press(KeyCode::Enter), &mut state, &api);
        assert!(state.alert.is_none());
        assert_eq!(state.view, View::Compose);
    }

    #[test]
    fn test_quit_keys() {
        let api = RecordingDispatch::default();
        let mut state = AppState::default();
        assert!(handle_key(press(KeyCode::Char('q')), &mut state, &api));
        assert!(handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut state,
            &api
        ));

        state.compose_email();
        assert!(!handle_key(press(KeyCode::Char('q')), &mut state, &api));
    }
}
