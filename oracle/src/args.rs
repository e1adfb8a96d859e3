use std::path::PathBuf;

use clap::Parser;

/// Relationship oracle gateway
#[derive(Debug, Parser)]
#[command(name = "oracle", about = "JSON oracle endpoint backed by Groq and Gemini")]
pub struct Args {
    /// Path to configuration file; defaults apply when omitted
    #[arg(short, long, env = "ORACLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "ORACLE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
