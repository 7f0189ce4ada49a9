//! Admin Config

use clap::Args;

/// Credentials the admin commands accept.
#[derive(Debug, Args)]
pub(crate) struct AdminConfig {
    /// Admin username
    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Admin password
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub admin_password: String,
}

/// Login presented for admin commands.
#[derive(Debug, Args)]
pub(crate) struct AdminLogin {
    /// Username for admin commands
    #[arg(long, env = "PIZZERIA_USER", global = true)]
    pub user: Option<String>,

    /// Password for admin commands
    #[arg(long, env = "PIZZERIA_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}
