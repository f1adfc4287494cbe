//! CLI module - Command-line interface for anime-api
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::domain::Role;

pub use commands::{cmd_user_add, cmd_user_list};

/// anime-api - Anime catalogue REST service
#[derive(Parser)]
#[command(name = "anime-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage API users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Create a default config file
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        /// Login name
        username: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// ADMIN or USER
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// List all users
    #[command(alias = "ls")]
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_add() {
        let cli = Cli::try_parse_from([
            "anime-api", "user", "add", "nata", "--name", "Nata", "--password", "mama", "--role",
            "admin",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::User {
                command:
                    UserCommands::Add {
                        username,
                        name,
                        password,
                        role,
                    },
            }) => {
                assert_eq!(username, "nata");
                assert_eq!(name, "Nata");
                assert_eq!(password, "mama");
                assert_eq!(role, Role::Admin);
            }
            _ => panic!("expected user add"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["anime-api"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_rejects_unknown_role() {
        assert!(
            Cli::try_parse_from([
                "anime-api", "user", "add", "x", "--name", "X", "--password", "p", "--role",
                "root",
            ])
            .is_err()
        );
    }
}
