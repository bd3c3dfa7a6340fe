//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Check that every `REQUIRE` has a matching `SATISFIED`
//! - `init`: Initialize reqsat configuration file
//! - `serve`: Start MCP server for AI integration

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::LanguageSelection;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

fn parse_lang(s: &str) -> Result<LanguageSelection, String> {
    LanguageSelection::parse(s).ok_or_else(|| format!("unknown language '{}'", s))
}

/// Arguments shared by commands that scan files.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory or file to check
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Language whose comment marks are used: `auto` (by file extension)
    /// or a name such as C, C++, JavaScript, Python, Rust, Batch, Any
    #[arg(short, long, env = "REQSAT_LANG", value_parser = parse_lang)]
    pub lang: Option<LanguageSelection>,

    /// Glob of files to check, relative to PATH (overrides config file)
    #[arg(short, long = "include", value_name = "GLOB")]
    pub includes: Vec<String>,

    /// Glob of files to skip, relative to PATH (overrides config file)
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check REQUIRE / SATISFIED annotations for missing and duplicated pairs
    Check(CheckCommand),
    /// Initialize a new .reqsatrc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}
