use ratatui::widgets::ListState;

use crate::backend::{ApiCommand, ApiEvent, Dispatch, Job, Ticket};
use crate::domain::email::{EmailId, Mailbox};
use crate::terminal::structs::{
    ComposeDraft, DetailAction, EmailDetail, MISSING_FIELDS_ALERT, MailboxRow, View,
};

/// View model for the whole client. Every view change goes through [`AppState::show`].
pub struct AppState {
    pub view: View,
    /// Bumped on every view change; responses for an older generation are dropped.
    pub generation: Ticket,

    /// Mailbox most recently loaded into the list view.
    pub mailbox: Mailbox,
    pub heading: String,
    pub rows: Vec<MailboxRow>,
    pub list_state: ListState,

    pub detail: Option<EmailDetail>,
    pub body_scroll: u16,

    pub draft: ComposeDraft,

    /// Blocking alert; while set, input only dismisses it.
    pub alert: Option<String>,
}

impl AppState {
    pub fn new(start: Mailbox) -> Self {
        Self {
            view: View::MailboxList,
            generation: 0,
            mailbox: start,
            heading: start.title(),
            rows: vec![],
            list_state: ListState::default(),
            detail: None,
            body_scroll: 0,
            draft: ComposeDraft::default(),
            alert: None,
        }
    }

    /// Hide every view and show `view`.
    pub fn show(&mut self, view: View) {
        self.view = view;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.view == view
    }

    fn dispatch(&self, api: &dyn Dispatch, command: ApiCommand) {
        api.dispatch(Job {
            ticket: self.generation,
            command,
        });
    }

    pub fn load_mailbox(&mut self, mailbox: Mailbox, api: &dyn Dispatch) {
        self.show(View::MailboxList);
        self.mailbox = mailbox;
        self.heading = mailbox.title();
        self.rows.clear();
        self.list_state.select(None);
        self.dispatch(api, ApiCommand::ListMailbox { mailbox });
    }

    pub fn compose_email(&mut self) {
        self.show(View::Compose);
        self.draft.clear();
    }

    pub fn send_email(&mut self, api: &dyn Dispatch) {
        let Some(email) = self.draft.to_outgoing() else {
            self.alert = Some(MISSING_FIELDS_ALERT.to_string());
            return;
        };
        self.dispatch(api, ApiCommand::Send { email });
    }

    pub fn view_email(&mut self, id: EmailId, api: &dyn Dispatch) {
        self.show(View::EmailDetail);
        self.detail = None;
        self.body_scroll = 0;
        self.dispatch(api, ApiCommand::GetEmail { id });
    }

    pub fn current_selected_id(&self) -> Option<EmailId> {
        let idx = self.list_state.selected()?;
        self.rows.get(idx).map(|r| r.id)
    }

    pub fn open_selected(&mut self, api: &dyn Dispatch) {
        if let Some(id) = self.current_selected_id() {
            self.view_email(id, api);
        }
    }

    pub fn toggle_archive(&mut self, api: &dyn Dispatch) {
        let Some(detail) = &self.detail else {
            return;
        };
        let command = ApiCommand::SetArchived {
            id: detail.email.id,
            archived: detail.archive.target,
        };
        self.dispatch(api, command);
    }

    pub fn reply(&mut self) {
        let Some(detail) = self.detail.take() else {
            return;
        };
        self.compose_email();
        self.draft.prefill_reply(&detail.email);
    }

    pub fn activate_selected_action(&mut self, api: &dyn Dispatch) {
        let Some(action) = self.detail.as_ref().map(|d| d.selected) else {
            return;
        };
        match action {
            DetailAction::Archive => self.toggle_archive(api),
            DetailAction::Reply => self.reply(),
        }
    }

    pub fn toggle_action(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.selected = detail.selected.toggle();
        }
    }

    /// Leave compose/detail for the last loaded mailbox.
    pub fn back(&mut self, api: &dyn Dispatch) {
        if self.view != View::MailboxList {
            self.load_mailbox(self.mailbox, api);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.rows.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.rows.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if self.view != View::EmailDetail {
            return;
        }
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    /// Apply a backend response to the view model.
    pub fn handle_event(&mut self, event: ApiEvent, api: &dyn Dispatch) {
        if event.ticket() != self.generation {
            log::debug!(
                "dropping stale response for generation {} (now {})",
                event.ticket(),
                self.generation
            );
            return;
        }

        match event {
            ApiEvent::MailboxLoaded {
                mailbox, result, ..
            } => match result {
                Ok(emails) => {
                    self.rows = emails.iter().map(MailboxRow::from).collect();
                    self.list_state
                        .select(if self.rows.is_empty() { None } else { Some(0) });
                    log::info!("loaded {} emails from {mailbox}", self.rows.len());
                }
                Err(e) => log::error!("Failed to fetch emails for {mailbox}: {e}"),
            },

            ApiEvent::EmailLoaded { id, result, .. } => match result {
                Ok(email) => {
                    if !email.read {
                        self.dispatch(api, ApiCommand::MarkRead { id: email.id });
                    }
                    self.detail = Some(EmailDetail::new(email));
                }
                Err(e) => log::error!("Failed to fetch email {id}: {e}"),
            },

            ApiEvent::ArchiveToggled { id, result, .. } => match result {
                Ok(()) => self.load_mailbox(Mailbox::Archive, api),
                // the request completed, the server just disagreed
                Err(e) if e.reached_server() => {
                    log::warn!("Archive toggle for email {id} answered with {e}");
                    self.load_mailbox(Mailbox::Archive, api);
                }
                Err(e) => log::error!("Failed to toggle archive for email {id}: {e}"),
            },

            ApiEvent::EmailSent { result, .. } => match result {
                Ok(v) => {
                    log::info!("{v}");
                    self.load_mailbox(Mailbox::Sent, api);
                }
                Err(e) => log::error!("Failed to send email: {e}"),
            },
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Mailbox::Inbox)
    }
}
