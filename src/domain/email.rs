use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type EmailId = u64;

/// An email as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub archived: bool,
}

/// Body of `PUT /emails/{id}`. Unset fields are left alone by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl EmailUpdate {
    pub fn mark_read() -> Self {
        Self {
            read: Some(true),
            ..Self::default()
        }
    }

    pub fn set_archived(archived: bool) -> Self {
        Self {
            archived: Some(archived),
            ..Self::default()
        }
    }
}

/// Body of `POST /emails`. `recipients` is comma separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mailbox {
    #[default]
    Inbox,
    Sent,
    Archive,
}

impl Mailbox {
    pub const ALL: [Mailbox; 3] = [Mailbox::Inbox, Mailbox::Sent, Mailbox::Archive];

    /// Path segment used by `GET /emails/{mailbox}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mailbox::Inbox => "inbox",
            Mailbox::Sent => "sent",
            Mailbox::Archive => "archive",
        }
    }

    pub fn title(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mailbox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Mailbox::Inbox),
            "sent" => Ok(Mailbox::Sent),
            "archive" | "archived" => Ok(Mailbox::Archive),
            other => Err(format!(
                "unknown mailbox '{other}' (expected inbox, sent or archive)"
            )),
        }
    }
}

/// Uppercases the first character and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_backend_email() {
        let data = json!({
            "id": 7,
            "sender": "foo@example.com",
            "recipients": ["bar@example.com", "baz@example.com"],
            "subject": "Meeting",
            "body": "See you at 10",
            "timestamp": "Jan 2 2024, 10:00 AM",
            "read": false,
            "archived": true
        });
        let email: Email = serde_json::from_value(data).unwrap();
        assert_eq!(email.id, 7);
        assert_eq!(email.recipients.len(), 2);
        assert!(!email.read);
        assert!(email.archived);
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let read = serde_json::to_value(EmailUpdate::mark_read()).unwrap();
        assert_eq!(read, json!({ "read": true }));

        let archived = serde_json::to_value(EmailUpdate::set_archived(false)).unwrap();
        assert_eq!(archived, json!({ "archived": false }));
    }

    #[test]
    fn test_mailbox_titles() {
        let titles: Vec<String> = Mailbox::ALL.iter().map(|m| m.title()).collect();
        assert_eq!(titles, vec!["Inbox", "Sent", "Archive"]);
    }

    #[test]
    fn test_mailbox_from_str() {
        assert_eq!("Inbox".parse::<Mailbox>(), Ok(Mailbox::Inbox));
        assert_eq!("archived".parse::<Mailbox>(), Ok(Mailbox::Archive));
        assert!("spam".parse::<Mailbox>().is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("inbox"), "Inbox");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
    }
}
