//! agentplan - resolve agent install plans
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Reads a resolution request (host facts, build coordinates, parameters),
//! runs it through `agentplan-core` and prints the resulting action plan.
//! Nothing is applied to the local machine.

pub mod cmd;
pub mod config;
pub mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "agentplan")]
#[command(author, version, about = "agentplan - resolve agent install plans")]
pub struct Cli {
    #[command(flatten)]
    pub request: RequestArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the request comes from, and what to override in it.
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request file (TOML with [facts], [build] and [params])
    #[arg(long, short = 'r', global = true, env = "AGENTPLAN_REQUEST")]
    pub request: Option<PathBuf>,

    /// Agent version to install
    #[arg(long, global = true)]
    pub package_version: Option<String>,

    /// Do not manage the package repository definition
    #[arg(long, global = true)]
    pub no_manage_repo: bool,

    /// Do not manage /etc/pki and /etc/pki/rpm-gpg
    #[arg(long, global = true)]
    pub no_manage_pki_dir: bool,

    /// Compiling server hostname
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Build identifier
    #[arg(long, global = true)]
    pub build: Option<String>,

    /// Client certificate name
    #[arg(long, global = true)]
    pub client: Option<String>,

    /// Override a host fact: name=value (repeatable)
    #[arg(long = "fact", global = true, value_name = "NAME=VALUE")]
    pub facts: Vec<String>,
}

impl RequestArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            package_version: self.package_version.clone(),
            no_manage_repo: self.no_manage_repo,
            no_manage_pki_dir: self.no_manage_pki_dir,
            server: self.server.clone(),
            build: self.build.clone(),
            client: self.client.clone(),
            facts: self.facts.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable table
    Table,
    /// JSON, as handed to an executor
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and print the install plan
    Plan {
        /// Output format
        #[arg(long, short, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Validate the platform only
    Check,
    /// List supported platform tags
    Platforms,
    /// Print the SHA-256 digest of the plan
    Digest,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
