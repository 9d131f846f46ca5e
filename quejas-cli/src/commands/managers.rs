//! Manager Commands

use clap::Subcommand;
use quejas_core::UserRole;

use super::PageArgs;

/// Back-office user subcommands
#[derive(Subcommand, Debug)]
pub enum ManagerCommands {
    /// List users
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by branch ID
        #[arg(short, long)]
        branch: Option<String>,

        /// Filter by role (admin, manager)
        #[arg(short, long)]
        role: Option<UserRole>,
    },

    /// Show one user
    Get {
        /// User ID
        id: String,
    },

    /// Register a user
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Initial password (env: QUEJAS_NEW_USER_PASSWORD)
        #[arg(short, long, env = "QUEJAS_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(short, long, default_value = "manager")]
        role: UserRole,

        /// Branch the user manages
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Deactivate a user without deleting it
    Deactivate {
        /// User ID
        id: String,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}
