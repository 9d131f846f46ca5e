//! Quejas CLI - Command Line Interface
//!
//! Back-office access to complaints, ratings, branches, instructors and
//! users from the terminal.
//!
//! # Usage
//!
//! ```text
//! quejas [OPTIONS] <COMMAND>
//!
//! Commands:
//!   login        Log in and store the session token
//!   logout       Forget the stored session token
//!   complaints   Complaint management
//!   ratings      Ratings, statistics and NPS
//!   branches     Branch management
//!   instructors  Instructor management
//!   managers     Back-office user management
//!   email        Send notification emails
//!   upload       Upload images to object storage
//!   config       Show effective configuration
//!
//! Options:
//!   -a, --api-url <URL>    Backend API URL [env: QUEJAS_API_URL]
//!   -f, --format <FORMAT>  Output format (json, table, plain) [default: table]
//!   -v, --verbose          Enable verbose output
//! ```
//!
//! # Examples
//!
//! ```text
//! quejas login --email admin@siclo.com
//! quejas complaints list --status pending --branch 3
//! quejas complaints status 42 resolved --resolution "Reembolso aplicado"
//! quejas ratings nps --branch 3
//! quejas upload ./recibo.jpg ./foto.png
//! ```

pub mod commands;
pub mod error;
pub mod handler;
pub mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use error::{CliError, CliResult};
