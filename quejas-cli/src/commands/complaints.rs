//! Complaint Commands

use clap::Subcommand;
use quejas_core::{ComplaintFilters, ComplaintPriority, ComplaintStatus, StatsFilters};

use super::PageArgs;

/// Complaint subcommands
#[derive(Subcommand, Debug)]
pub enum ComplaintCommands {
    /// List complaints
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Filter by status (pending, in_progress, resolved, rejected)
        #[arg(long)]
        status: Option<ComplaintStatus>,

        /// Filter by priority (high, medium, low)
        #[arg(long)]
        priority: Option<ComplaintPriority>,

        /// Filter by branch ID
        #[arg(short, long)]
        branch: Option<String>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Created on or after (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Created on or before (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Show one complaint
    Get {
        /// Complaint ID
        id: String,
    },

    /// Complaint statistics
    Stats {
        /// Restrict to a branch
        #[arg(short, long)]
        branch: Option<String>,

        #[arg(long)]
        from: Option<String>,

        #[arg(long)]
        to: Option<String>,
    },

    /// Move a complaint to another status
    Status {
        /// Complaint ID
        id: String,

        /// New status
        status: ComplaintStatus,

        /// Resolution note
        #[arg(short, long)]
        resolution: Option<String>,
    },

    /// Delete a complaint
    Delete {
        /// Complaint ID
        id: String,
    },
}

impl ComplaintCommands {
    /// List filters for `list`
    pub fn filters(&self) -> Option<ComplaintFilters> {
        match self {
            ComplaintCommands::List {
                page,
                status,
                priority,
                branch,
                search,
                from,
                to,
            } => Some(ComplaintFilters {
                page: page.page,
                limit: page.limit,
                status: *status,
                priority: *priority,
                branch_id: branch.clone(),
                search: search.clone(),
                start_date: from.clone(),
                end_date: to.clone(),
            }),
            _ => None,
        }
    }
}

/// Stats filters from the shared flags
pub fn stats_filters(branch: Option<String>, from: Option<String>, to: Option<String>) -> StatsFilters {
    StatsFilters {
        branch_id: branch,
        start_date: from,
        end_date: to,
    }
}
