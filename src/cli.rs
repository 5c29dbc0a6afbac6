use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "varmap")]
#[command(
    about = "Variability graph analyzer for object-oriented codebases",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    /// -v: Show pipeline progress
    /// -vv: Show every declaration and detected pattern
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the variability graph from a discovery event file and export it
    Analyze {
        /// JSON Lines file of discovery events
        events: PathBuf,

        /// Graph document destination
        #[arg(short, long, default_value = "graph.json")]
        output: PathBuf,

        /// Statistics document destination (defaults to <output>-stats.json)
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .varmap.toml)
        #[arg(long, env = "VARMAP_CONFIG")]
        config: Option<PathBuf>,

        /// Run pattern detectors sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Pretty-print the JSON artifacts
        #[arg(long)]
        pretty: bool,
    },

    /// Initialize a varmap configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_defaults() {
        let cli = Cli::try_parse_from(["varmap", "analyze", "events.jsonl"]).unwrap();
        match cli.command {
            Commands::Analyze {
                events,
                output,
                stats,
                no_parallel,
                ..
            } => {
                assert_eq!(events, PathBuf::from("events.jsonl"));
                assert_eq!(output, PathBuf::from("graph.json"));
                assert_eq!(stats, None);
                assert!(!no_parallel);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn test_verbosity_is_global() {
        let cli = Cli::try_parse_from(["varmap", "analyze", "e.jsonl", "-vv"]).unwrap();
        assert_eq!(cli.verbosity, 2);
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::try_parse_from(["varmap", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
