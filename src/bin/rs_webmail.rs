use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use rs_webmail::api::MailApi;
use rs_webmail::api::http::HttpMailApi;
use rs_webmail::config::{load_config, resolve_log_path};
use rs_webmail::domain::email::{EmailId, EmailUpdate, Mailbox};
use rs_webmail::logging;
use rs_webmail::terminal::run_tui;
use rs_webmail::terminal::structs::{ComposeDraft, MISSING_FIELDS_ALERT};

#[derive(Parser)]
#[command(name = "rs_webmail")]
#[command(about = "Terminal client for the webmail REST backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive client
    Tui {
        /// Mailbox shown on start (inbox, sent, archive)
        #[arg(long)]
        mailbox: Option<Mailbox>,
    },

    /// Print one line per email in a mailbox
    List { mailbox: Mailbox },

    /// Print an email, marking it read like the detail view does
    Show { id: EmailId },

    /// Send an email
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    let api = HttpMailApi::from_config(&cfg)?;

    match cli.cmd {
        Command::Tui { mailbox } => {
            logging::init_file(&resolve_log_path(&cfg)?)?;
            let start = mailbox.or(cfg.start_mailbox).unwrap_or_default();
            run_tui(api, start)
        }

        Command::List { mailbox } => {
            logging::init_stderr();
            for e in api.list_mailbox(mailbox)? {
                let marker = if e.read { ' ' } else { '*' };
                println!(
                    "{marker} {:>5}  {:<30}  {:<40}  {}",
                    e.id, e.sender, e.subject, e.timestamp
                );
            }
            Ok(())
        }

        Command::Show { id } => {
            logging::init_stderr();
            let e = api.get_email(id)?;
            if !e.read {
                if let Err(err) = api.update_email(id, &EmailUpdate::mark_read()) {
                    log::warn!("Failed to mark email {id} as read: {err}");
                }
            }
            println!("From: {}", e.sender);
            println!("To: {}", e.recipients.join(", "));
            println!("Subject: {}", e.subject);
            println!("Timestamp: {}", e.timestamp);
            println!();
            println!("{}", e.body);
            Ok(())
        }

        Command::Send { to, subject, body } => {
            logging::init_stderr();
            let draft = ComposeDraft {
                recipients: to,
                subject,
                body,
                ..ComposeDraft::default()
            };
            let outgoing = draft
                .to_outgoing()
                .ok_or_else(|| anyhow!(MISSING_FIELDS_ALERT))?;
            let result = api.send_email(&outgoing)?;
            println!("{result}");
            Ok(())
        }
    }
}
