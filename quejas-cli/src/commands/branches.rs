//! Branch Commands

use clap::Subcommand;

use super::PageArgs;

/// Branch subcommands
#[derive(Subcommand, Debug)]
pub enum BranchCommands {
    /// List branches
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only active (true) or inactive (false) branches
        #[arg(long)]
        active: Option<bool>,

        /// Search by name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show one branch
    Get {
        /// Branch ID
        id: String,
    },

    /// Create a branch
    Create {
        /// Branch name
        #[arg(short, long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: Option<String>,
    },

    /// Update a branch
    Update {
        /// Branch ID
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// Activate or deactivate
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a branch
    Delete {
        /// Branch ID
        id: String,
    },
}
