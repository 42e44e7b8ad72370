use crate::solver::SolveOptions;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "timetable-solver", version, about = "Weekly class timetable solver")]
pub struct Cli {
    /// Address the HTTP API listens on.
    #[arg(long, global = true, env = "SCHEDULER_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub budget: BudgetArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (the default when no command is given).
    Serve,
    /// Solve one catalog and print the timetable.
    Solve {
        /// JSON catalog file; the built-in demo catalog when omitted.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Print sessions and conflicts as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Search limits shared by every command.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct BudgetArgs {
    /// Give up after trying this many candidate placements.
    #[arg(long, global = true, env = "SCHEDULER_MAX_STEPS")]
    pub max_steps: Option<u64>,

    /// Give up after this many milliseconds.
    #[arg(long, global = true, env = "SCHEDULER_TIME_LIMIT_MS")]
    pub time_limit_ms: Option<u64>,
}

impl BudgetArgs {
    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            max_steps: self.max_steps,
            time_limit: self.time_limit_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_flags_become_solve_options() {
        let cli = Cli::parse_from([
            "timetable-solver",
            "solve",
            "--max-steps",
            "500",
            "--time-limit-ms",
            "250",
        ]);
        assert_eq!(
            cli.budget.solve_options(),
            SolveOptions {
                max_steps: Some(500),
                time_limit: Some(Duration::from_millis(250)),
            }
        );
        assert!(matches!(cli.command, Some(Command::Solve { catalog: None, json: false })));
    }

    #[test]
    fn test_serve_parses_bind_address() {
        let cli = Cli::parse_from(["timetable-solver", "serve", "--bind", "0.0.0.0:9000"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
        assert_eq!(cli.bind.port(), 9000);
    }

    #[test]
    fn test_bind_applies_without_a_subcommand() {
        let cli = Cli::parse_from(["timetable-solver", "--bind", "0.0.0.0:9001"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.bind.port(), 9001);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
