//! Instructor Commands

use clap::Subcommand;

use super::PageArgs;

/// Instructor subcommands
#[derive(Subcommand, Debug)]
pub enum InstructorCommands {
    /// List instructors
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by branch ID
        #[arg(short, long)]
        branch: Option<String>,

        /// Filter by discipline
        #[arg(short, long)]
        discipline: Option<String>,

        /// Search by name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one instructor
    Get {
        /// Instructor ID
        id: String,
    },

    /// Ratings received by an instructor
    Ratings {
        /// Instructor ID
        id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Create an instructor
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: Option<String>,

        /// Disciplines taught (repeatable)
        #[arg(short, long = "discipline")]
        disciplines: Vec<String>,

        /// Branch IDs (repeatable)
        #[arg(short, long = "branch")]
        branches: Vec<String>,
    },

    /// Delete an instructor
    Delete {
        /// Instructor ID
        id: String,
    },
}
