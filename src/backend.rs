use std::sync::mpsc;
use std::thread;

use crate::api::{ApiError, MailApi};
use crate::domain::email::{Email, EmailId, EmailUpdate, Mailbox, OutgoingEmail};

/// Generation of the view a request was issued for.
pub type Ticket = u64;

/// Requests sent from the UI thread to the backend thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    ListMailbox { mailbox: Mailbox },
    GetEmail { id: EmailId },
    MarkRead { id: EmailId },
    SetArchived { id: EmailId, archived: bool },
    Send { email: OutgoingEmail },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub ticket: Ticket,
    pub command: ApiCommand,
}

/// Responses sent from the backend thread to the UI thread.
#[derive(Debug)]
pub enum ApiEvent {
    MailboxLoaded {
        ticket: Ticket,
        mailbox: Mailbox,
        result: Result<Vec<Email>, ApiError>,
    },
    EmailLoaded {
        ticket: Ticket,
        id: EmailId,
        result: Result<Email, ApiError>,
    },
    ArchiveToggled {
        ticket: Ticket,
        id: EmailId,
        result: Result<(), ApiError>,
    },
    EmailSent {
        ticket: Ticket,
        result: Result<serde_json::Value, ApiError>,
    },
}

impl ApiEvent {
    pub fn ticket(&self) -> Ticket {
        match self {
            ApiEvent::MailboxLoaded { ticket, .. }
            | ApiEvent::EmailLoaded { ticket, .. }
            | ApiEvent::ArchiveToggled { ticket, .. }
            | ApiEvent::EmailSent { ticket, .. } => *ticket,
        }
    }
}

/// Where the UI hands off requests. The TUI uses the backend channel.
pub trait Dispatch {
    fn dispatch(&self, job: Job);
}

impl Dispatch for mpsc::Sender<Job> {
    fn dispatch(&self, job: Job) {
        if self.send(job).is_err() {
            log::error!("backend thread is gone; request dropped");
        }
    }
}

/// Spawn the backend thread. Returns the job sender and event receiver.
/// The thread exits once every sender is dropped.
pub fn spawn<A: MailApi + 'static>(api: A) -> (mpsc::Sender<Job>, mpsc::Receiver<ApiEvent>) {
    let (job_tx, job_rx) = mpsc::channel::<Job>();
    let (event_tx, event_rx) = mpsc::channel::<ApiEvent>();

    thread::spawn(move || {
        while let Ok(job) = job_rx.recv() {
            if let Some(event) = execute(&api, job) {
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        }
        log::debug!("backend thread exiting");
    });

    (job_tx, event_rx)
}

/// Runs one job against the API. Fire-and-forget jobs yield no event.
pub fn execute(api: &dyn MailApi, job: Job) -> Option<ApiEvent> {
    let ticket = job.ticket;
    match job.command {
        ApiCommand::ListMailbox { mailbox } => Some(ApiEvent::MailboxLoaded {
            ticket,
            mailbox,
            result: api.list_mailbox(mailbox),
        }),
        ApiCommand::GetEmail { id } => Some(ApiEvent::EmailLoaded {
            ticket,
            id,
            result: api.get_email(id),
        }),
        ApiCommand::MarkRead { id } => {
            if let Err(e) = api.update_email(id, &EmailUpdate::mark_read()) {
                log::warn!("Failed to mark email {id} as read: {e}");
            }
            None
        }
        ApiCommand::SetArchived { id, archived } => Some(ApiEvent::ArchiveToggled {
            ticket,
            id,
            result: api.update_email(id, &EmailUpdate::set_archived(archived)),
        }),
        ApiCommand::Send { email } => Some(ApiEvent::EmailSent {
            ticket,
            result: api.send_email(&email),
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeApi, email};
    use super::*;

    #[test]
    fn test_execute_list_carries_ticket() {
        let api = FakeApi::default();
        api.emails.lock().unwrap().push(email(1, false, false));

        let event = execute(
            &api,
            Job {
                ticket: 9,
                command: ApiCommand::ListMailbox {
                    mailbox: Mailbox::Inbox,
                },
            },
        )
        .unwrap();

        assert_eq!(event.ticket(), 9);
        match event {
            ApiEvent::MailboxLoaded { mailbox, result, .. } => {
                assert_eq!(mailbox, Mailbox::Inbox);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_mark_read_is_fire_and_forget() {
        let api = FakeApi::default();
        let event = execute(
            &api,
            Job {
                ticket: 1,
                command: ApiCommand::MarkRead { id: 3 },
            },
        );
        assert!(event.is_none());
        assert_eq!(
            *api.updates.lock().unwrap(),
            vec![(3, EmailUpdate::mark_read())]
        );
    }

    #[test]
    fn test_mark_read_failure_is_swallowed() {
        let api = FakeApi {
            fail_updates: true,
            ..FakeApi::default()
        };
        let event = execute(
            &api,
            Job {
                ticket: 1,
                command: ApiCommand::MarkRead { id: 3 },
            },
        );
        assert!(event.is_none());
    }

    #[test]
    fn test_spawned_thread_round_trip() {
        let api = FakeApi::default();
        api.emails.lock().unwrap().push(email(5, true, false));
        let (tx, rx) = spawn(api);

        tx.dispatch(Job {
            ticket: 2,
            command: ApiCommand::GetEmail { id: 5 },
        });

        match rx.recv().unwrap() {
            ApiEvent::EmailLoaded { ticket, id, result } => {
                assert_eq!(ticket, 2);
                assert_eq!(id, 5);
                assert_eq!(result.unwrap().subject, "Subject 5");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
