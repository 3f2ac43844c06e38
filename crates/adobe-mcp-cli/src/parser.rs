//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dispatch commands to Adobe applications through the local proxy.
#[derive(Debug, Parser)]
#[command(name = "adobe-mcp")]
#[command(about = "Send commands to Adobe applications through the proxy")]
#[command(version)]
pub struct Cli {
    /// Load endpoint settings from a dotenv file
    #[arg(long = "env-file", global = true, env = "ADOBE_MCP_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send one command and print its outcome as JSON
    Send {
        /// Target application (indesign, photoshop, premiere)
        application: String,

        /// Command name, e.g. createDocument
        command: String,

        /// Command parameters as a JSON object
        #[arg(short, long)]
        params: Option<String>,
    },

    /// Show the resolved endpoint for every application
    Endpoints,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_args() {
        let cli = Cli::parse_from([
            "adobe-mcp",
            "send",
            "indesign",
            "createDocument",
            "--params",
            r#"{"pages": 1}"#,
        ]);
        match cli.command {
            Commands::Send {
                application,
                command,
                params,
            } => {
                assert_eq!(application, "indesign");
                assert_eq!(command, "createDocument");
                assert_eq!(params.as_deref(), Some(r#"{"pages": 1}"#));
            }
            Commands::Endpoints => panic!("expected send"),
        }
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["adobe-mcp", "endpoints", "--env-file", "/tmp/adobe.env", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/adobe.env")));
        assert!(matches!(cli.command, Commands::Endpoints));
    }

    #[test]
    fn test_send_requires_command_name() {
        assert!(Cli::try_parse_from(["adobe-mcp", "send", "indesign"]).is_err());
    }
}
