//! CLI argument parsing module for dep-harvest

use crate::registry::SearchKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parse duration string in format: N or Ns (seconds), Nm (minutes), Nh (hours)
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix('s') {
        (n, 's')
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 'm')
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 'h')
    } else {
        (s, 's')
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| format!("invalid number in duration: {}", num_str))?;

    let multiplier = match unit {
        'm' => 60,
        'h' => 60 * 60,
        _ => 1,
    };
    let seconds = num
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration too large: {}", s))?;

    Ok(Duration::from_secs(seconds))
}

/// Harvests Maven/Gradle dependency coordinates and verifies them against a Maven repository
#[derive(Parser, Debug, Clone)]
#[command(name = "dep-harvest", version, about)]
pub struct CliArgs {
    /// Configuration file (default: ./dep-harvest.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output summaries in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Walk source trees, parse build files, resolve versions and write a unique list
    Harvest {
        /// Source trees to walk
        #[arg(required = true)]
        roots: Vec<PathBuf>,

        /// Output list file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Merge coordinate lists and flattened dependency trees (*.json) into a unique list
    Dedupe {
        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output list file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Verify coordinates against the Maven repository with checkpointed passes
    Verify(VerifyArgs),

    /// Probe single coordinates once
    Check {
        /// `group:name:version` coordinates
        #[arg(required = true)]
        coordinates: Vec<String>,
    },

    /// Collect coordinates from remote search APIs
    #[command(subcommand)]
    Search(SearchCommand),

    /// Generate a Gradle dependency block from a coordinate list
    Fixture {
        /// Coordinate list
        input: PathBuf,

        /// Output build file
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a settings.gradle next to the output including projects 0..N
        #[arg(long, value_name = "N")]
        projects: Option<usize>,
    },
}

/// Arguments of `verify`
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Coordinate lists or flattened dependency trees (*.json)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for checkpoint files
    #[arg(long, value_name = "DIR")]
    pub checkpoint_dir: Option<PathBuf>,

    /// Pause between passes (e.g., 60, 90s, 5m)
    #[arg(long, value_parser = parse_duration)]
    pub cooldown: Option<Duration>,

    /// Give up after this many passes
    #[arg(long, value_name = "N")]
    pub max_passes: Option<u32>,
}

/// `search` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SearchCommand {
    /// Harvest latest versions from Maven Central with one- and two-letter queries
    Maven {
        /// Output list file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Harvest coordinates from build files found by GitHub code search
    Github {
        /// Kind of build file
        #[arg(long, value_enum)]
        kind: SearchKind,

        /// Restrict to this file name
        #[arg(long)]
        filename: Option<String>,

        /// Free-text search term
        #[arg(long)]
        term: Option<String>,

        /// Maximum files to download (default: github.files_limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Output list file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_harvest_args() {
        let args = CliArgs::parse_from(["dep-harvest", "harvest", "a", "b", "-o", "out.txt"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(args.config.is_none());
        match args.command {
            Command::Harvest { roots, output } => {
                assert_eq!(roots, vec![PathBuf::from("a"), PathBuf::from("b")]);
                assert_eq!(output, PathBuf::from("out.txt"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_harvest_requires_output() {
        assert!(CliArgs::try_parse_from(["dep-harvest", "harvest", "a"]).is_err());
        assert!(CliArgs::try_parse_from(["dep-harvest", "harvest", "-o", "x"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "dep-harvest",
            "dedupe",
            "list.txt",
            "-o",
            "out.txt",
            "--json",
            "-q",
            "--config",
            "custom.toml",
        ]);
        assert!(args.json);
        assert!(args.quiet);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_verify_args() {
        let args = CliArgs::parse_from([
            "dep-harvest",
            "verify",
            "deps.txt",
            "--checkpoint-dir",
            "ckpt",
            "--cooldown",
            "5m",
            "--max-passes",
            "3",
        ]);
        match args.command {
            Command::Verify(verify) => {
                assert_eq!(verify.inputs, vec![PathBuf::from("deps.txt")]);
                assert_eq!(verify.checkpoint_dir, Some(PathBuf::from("ckpt")));
                assert_eq!(verify.cooldown, Some(Duration::from_secs(300)));
                assert_eq!(verify.max_passes, Some(3));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verify_defaults_left_to_config() {
        let args = CliArgs::parse_from(["dep-harvest", "verify", "deps.txt"]);
        match args.command {
            Command::Verify(verify) => {
                assert!(verify.checkpoint_dir.is_none());
                assert!(verify.cooldown.is_none());
                assert!(verify.max_passes.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_github_args() {
        let args = CliArgs::parse_from([
            "dep-harvest",
            "search",
            "github",
            "--kind",
            "gradle",
            "--filename",
            "build.gradle",
            "--limit",
            "20",
            "-o",
            "gh.txt",
        ]);
        match args.command {
            Command::Search(SearchCommand::Github {
                kind,
                filename,
                term,
                limit,
                output,
            }) => {
                assert_eq!(kind, SearchKind::Gradle);
                assert_eq!(filename.as_deref(), Some("build.gradle"));
                assert!(term.is_none());
                assert_eq!(limit, Some(20));
                assert_eq!(output, PathBuf::from("gh.txt"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_github_rejects_unknown_kind() {
        assert!(CliArgs::try_parse_from([
            "dep-harvest",
            "search",
            "github",
            "--kind",
            "sbt",
            "-o",
            "x"
        ])
        .is_err());
    }

    #[test]
    fn test_fixture_args() {
        let args = CliArgs::parse_from([
            "dep-harvest",
            "fixture",
            "deps.txt",
            "-o",
            "build.gradle",
            "--projects",
            "5",
        ]);
        match args.command {
            Command::Fixture {
                input,
                output,
                projects,
            } => {
                assert_eq!(input, PathBuf::from("deps.txt"));
                assert_eq!(output, PathBuf::from("build.gradle"));
                assert_eq!(projects, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("60").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("-1").is_err());
        assert!(parse_duration(&format!("{}h", u64::MAX)).is_err());
        assert!(parse_duration(&format!("{}m", u64::MAX / 60 + 1)).is_err());
    }
}
