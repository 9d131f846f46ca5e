//! Email Commands

use clap::Subcommand;

/// Email subcommands
#[derive(Subcommand, Debug)]
pub enum EmailCommands {
    /// Send an email
    Send {
        /// Recipient (repeatable)
        #[arg(short, long = "to", required = true)]
        to: Vec<String>,

        #[arg(short, long)]
        subject: String,

        /// Plain-text body
        #[arg(long)]
        text: Option<String>,

        /// HTML body
        #[arg(long)]
        html: Option<String>,
    },

    /// Submit a complaint form and notify the branch
    SubmitForm {
        #[arg(long)]
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        branch: String,

        /// Observation category
        #[arg(long = "type")]
        observation_type: String,

        #[arg(long)]
        detail: String,

        /// Attachment URL (repeatable)
        #[arg(long = "attachment")]
        attachments: Vec<String>,
    },
}
