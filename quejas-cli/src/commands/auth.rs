//! Auth Commands

use clap::Args;

/// Login arguments
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password (env: QUEJAS_PASSWORD)
    #[arg(short, long, env = "QUEJAS_PASSWORD", hide_env_values = true)]
    pub password: String,
}
