//! CLI Commands Module
//!
//! Command definitions for the Quejas CLI.

pub mod auth;
pub mod branches;
pub mod complaints;
pub mod config;
pub mod email;
pub mod instructors;
pub mod managers;
pub mod ratings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quejas back-office CLI
#[derive(Parser, Debug)]
#[command(name = "quejas")]
#[command(author = "Siclo Engineering")]
#[command(version)]
#[command(about = "Quejas complaint and rating back-office")]
#[command(long_about = "A command-line tool for the Quejas back-office.\n\n\
    Use this tool to review and resolve complaints, inspect instructor ratings \
    and NPS, manage branches, instructors and users, and upload images.")]
pub struct Cli {
    /// Backend API URL, including any /api prefix (env: QUEJAS_API_URL)
    #[arg(short, long, env = "QUEJAS_API_URL")]
    pub api_url: Option<String>,

    /// Output format (json, table, plain)
    #[arg(short, long, env = "QUEJAS_OUTPUT_FORMAT", default_value = "table")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table format (human-readable)
    #[default]
    Table,
    /// Plain text
    Plain,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session token
    Login(auth::LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Complaint management
    #[command(subcommand)]
    Complaints(complaints::ComplaintCommands),

    /// Ratings, statistics and NPS
    #[command(subcommand)]
    Ratings(ratings::RatingCommands),

    /// Branch management
    #[command(subcommand)]
    Branches(branches::BranchCommands),

    /// Instructor management
    #[command(subcommand)]
    Instructors(instructors::InstructorCommands),

    /// Back-office user management
    #[command(subcommand)]
    Managers(managers::ManagerCommands),

    /// Send notification emails
    #[command(subcommand)]
    Email(email::EmailCommands),

    /// Upload images to object storage, one after another
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Page selection shared by list commands
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// Page size
    #[arg(short, long, default_value = "10")]
    pub limit: u32,
}
