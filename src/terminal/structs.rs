use crate::domain::email::{Email, EmailId, OutgoingEmail};

pub const MISSING_FIELDS_ALERT: &str = "Please fill in all fields.";

const REPLY_PREFIX: &str = "Re: ";

/// The three mutually exclusive panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    MailboxList,
    Compose,
    EmailDetail,
}

impl View {
    pub const ALL: [View; 3] = [View::MailboxList, View::Compose, View::EmailDetail];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Read,
    Unread,
}

/// One line of the mailbox list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxRow {
    pub id: EmailId,
    pub sender: String,
    pub subject: String,
    pub timestamp: String,
    pub style: RowStyle,
}

impl From<&Email> for MailboxRow {
    fn from(e: &Email) -> Self {
        Self {
            id: e.id,
            sender: e.sender.clone(),
            subject: e.subject.clone(),
            timestamp: e.timestamp.clone(),
            style: if e.read {
                RowStyle::Read
            } else {
                RowStyle::Unread
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Danger,
    Success,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailAction {
    #[default]
    Archive,
    Reply,
}

impl DetailAction {
    pub fn toggle(self) -> Self {
        match self {
            DetailAction::Archive => DetailAction::Reply,
            DetailAction::Reply => DetailAction::Archive,
        }
    }
}

/// Archive/unarchive button, fixed at the state the email was fetched in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveControl {
    pub label: &'static str,
    pub style: ButtonStyle,
    /// Value sent as `archived` when pressed.
    pub target: bool,
}

impl ArchiveControl {
    pub fn for_email(email: &Email) -> Self {
        if email.archived {
            Self {
                label: "Unarchive",
                style: ButtonStyle::Success,
                target: false,
            }
        } else {
            Self {
                label: "Archive",
                style: ButtonStyle::Danger,
                target: true,
            }
        }
    }
}

/// A rendered detail view. Always carries one archive control and one reply control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDetail {
    pub email: Email,
    pub archive: ArchiveControl,
    pub selected: DetailAction,
}

impl EmailDetail {
    pub const REPLY_LABEL: &'static str = "Reply";
    pub const REPLY_STYLE: ButtonStyle = ButtonStyle::Info;

    pub fn new(email: Email) -> Self {
        let archive = ArchiveControl::for_email(&email);
        Self {
            email,
            archive,
            selected: DetailAction::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeField {
    #[default]
    Recipients,
    Subject,
    Body,
}

impl ComposeField {
    pub fn next(self) -> Self {
        match self {
            ComposeField::Recipients => ComposeField::Subject,
            ComposeField::Subject => ComposeField::Body,
            ComposeField::Body => ComposeField::Recipients,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ComposeField::Recipients => ComposeField::Body,
            ComposeField::Subject => ComposeField::Recipients,
            ComposeField::Body => ComposeField::Subject,
        }
    }
}

/// Contents of the compose form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDraft {
    pub recipients: String,
    pub subject: String,
    pub body: String,
    pub focus: ComposeField,
}

impl ComposeDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn field(&self, field: ComposeField) -> &str {
        match field {
            ComposeField::Recipients => &self.recipients,
            ComposeField::Subject => &self.subject,
            ComposeField::Body => &self.body,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ComposeField::Recipients => &mut self.recipients,
            ComposeField::Subject => &mut self.subject,
            ComposeField::Body => &mut self.body,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Fill the form as a reply to `email`.
    pub fn prefill_reply(&mut self, email: &Email) {
        self.recipients = email.sender.clone();
        self.subject = reply_subject(&email.subject);
        self.body = format!("On {} {} wrote: {}", email.timestamp, email.sender, email.body);
        self.focus = ComposeField::Body;
    }

    /// The POST payload, or `None` when any field is empty.
    pub fn to_outgoing(&self) -> Option<OutgoingEmail> {
        if self.recipients.is_empty() || self.subject.is_empty() || self.body.is_empty() {
            return None;
        }
        Some(OutgoingEmail {
            recipients: self.recipients.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        })
    }
}

pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with(REPLY_PREFIX) {
        subject.to_string()
    } else {
        format!("{REPLY_PREFIX}{subject}")
    }
}
