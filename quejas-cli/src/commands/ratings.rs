//! Rating Commands

use clap::{Args, Subcommand};
use quejas_core::RatingFilters;

use super::PageArgs;

/// Rating filter flags
#[derive(Args, Debug, Clone)]
pub struct RatingFilterArgs {
    #[command(flatten)]
    pub page: PageArgs,

    /// Filter by branch ID
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Filter by instructor ID
    #[arg(short, long)]
    pub instructor: Option<String>,

    /// Filter by discipline
    #[arg(short, long)]
    pub discipline: Option<String>,

    /// Created on or after (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Created on or before (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

impl RatingFilterArgs {
    pub fn to_filters(&self) -> RatingFilters {
        RatingFilters {
            page: self.page.page,
            limit: self.page.limit,
            branch_id: self.branch.clone(),
            instructor_id: self.instructor.clone(),
            discipline: self.discipline.clone(),
            start_date: self.from.clone(),
            end_date: self.to.clone(),
        }
    }
}

/// Rating subcommands
#[derive(Subcommand, Debug)]
pub enum RatingCommands {
    /// List ratings
    List(RatingFilterArgs),

    /// Show one rating
    Get {
        /// Rating ID
        id: String,
    },

    /// Aggregate statistics
    Stats(RatingFilterArgs),

    /// Trends and per-branch averages
    Analytics(RatingFilterArgs),

    /// Net Promoter Score of a page of ratings
    Nps(RatingFilterArgs),

    /// Delete a rating
    Delete {
        /// Rating ID
        id: String,
    },
}
