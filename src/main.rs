//! dep-harvest - Maven/Gradle dependency coordinate harvester CLI tool
//!
//! Subcommands:
//! - harvest: build files → unique `group:name:version` list
//! - dedupe: merge lists and flattened dependency trees
//! - verify / check: existence checks against a Maven repository
//! - search: Maven Central and GitHub collaborators
//! - fixture: Gradle build file generation

use anyhow::Context;
use clap::Parser;
use dep_harvest::cli::{CliArgs, Command, SearchCommand, VerifyArgs};
use dep_harvest::config::HarvestConfig;
use dep_harvest::error::{AppError, CheckpointError, VerifyError};
use dep_harvest::fixture::{dependency_block, settings_includes};
use dep_harvest::lists::{read_lines, write_lines};
use dep_harvest::logging::{init_logging, LoggingConfig};
use dep_harvest::orchestrator::{merge_lists, Orchestrator};
use dep_harvest::output::{create_formatter, ListReport, OutputConfig};
use dep_harvest::registry::CodeSearchQuery;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit code for runs that finished with skipped work
const EXIT_PARTIAL: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(args.verbose, args.quiet));

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and apply the per-command CLI overrides
fn load_config(args: &CliArgs) -> anyhow::Result<HarvestConfig> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let mut config = HarvestConfig::discover(args.config.as_deref(), &cwd)?;
    config.apply_env();

    if let Command::Verify(VerifyArgs {
        checkpoint_dir,
        cooldown,
        max_passes,
        ..
    }) = &args.command
    {
        if let Some(dir) = checkpoint_dir {
            config.verify.checkpoint_dir = dir.clone();
        }
        if let Some(cooldown) = cooldown {
            config.verify.cooldown_secs = cooldown.as_secs();
        }
        if max_passes.is_some() {
            config.verify.max_passes = *max_passes;
        }
    }

    config.validate()?;
    debug!(?config, "configuration loaded");
    Ok(config)
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(&args)?;
    let github_limit = config.github.files_limit;
    let orchestrator = Orchestrator::new(config, !args.quiet);

    let mut output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    output_config.color = io::stdout().is_terminal();
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();

    let exit = match args.command {
        Command::Harvest { roots, output } => {
            let result = orchestrator.harvest(&roots)?;
            write_lines(&output, &result.coordinates)?;
            formatter.format_harvest(&result, &output, &mut stdout)?;
            partial_if(!result.errors.is_empty())
        }

        Command::Dedupe { inputs, output } => {
            let unique = merge_lists(&inputs)?;
            write_lines(&output, &unique)?;
            formatter.format_list(&ListReport::new("dedupe", unique.len(), &output), &mut stdout)?;
            ExitCode::SUCCESS
        }

        Command::Verify(verify) => {
            let input = merge_lists(&verify.inputs)?;
            let input: Vec<String> = input.into_iter().collect();
            match orchestrator.verify(&input).await {
                Ok((_, summary)) => {
                    formatter.format_verify(&summary, &mut stdout)?;
                    ExitCode::SUCCESS
                }
                Err(AppError::Verify(e @ VerifyError::PassLimitReached { .. })) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(EXIT_PARTIAL)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Check { coordinates } => {
            let outcomes = orchestrator.check(&coordinates).await?;
            formatter.format_check(&outcomes, &mut stdout)?;
            partial_if(outcomes.iter().any(|(_, outcome)| !outcome.is_found()))
        }

        Command::Search(SearchCommand::Maven { output }) => {
            let (unique, errors) = orchestrator.harvest_maven_central().await?;
            write_lines(&output, &unique)?;
            let report =
                ListReport::new("maven-central", unique.len(), &output).with_errors(&errors);
            formatter.format_list(&report, &mut stdout)?;
            partial_if(!errors.is_empty())
        }

        Command::Search(SearchCommand::Github {
            kind,
            filename,
            term,
            limit,
            output,
        }) => {
            let query = CodeSearchQuery {
                kind,
                filename,
                term,
                limit: limit.unwrap_or(github_limit),
            };
            let result = orchestrator.harvest_github(&query).await?;
            write_lines(&output, &result.coordinates)?;
            formatter.format_harvest(&result, &output, &mut stdout)?;
            partial_if(!result.errors.is_empty())
        }

        Command::Fixture {
            input,
            output,
            projects,
        } => {
            write_fixture(&input, &output, projects)?;
            ExitCode::SUCCESS
        }
    };

    stdout.flush()?;
    Ok(exit)
}

fn partial_if(partial: bool) -> ExitCode {
    if partial {
        ExitCode::from(EXIT_PARTIAL)
    } else {
        ExitCode::SUCCESS
    }
}

/// Write a Gradle build file, and optionally a sibling settings.gradle
fn write_fixture(input: &Path, output: &Path, projects: Option<usize>) -> Result<(), AppError> {
    let coordinates = read_lines(input)?;
    write_text(output, &dependency_block(&coordinates))?;
    info!(output = %output.display(), coordinates = coordinates.len(), "wrote dependency block");

    if let Some(count) = projects {
        let settings = output.with_file_name("settings.gradle");
        write_text(&settings, &settings_includes(count))?;
        info!(output = %settings.display(), projects = count, "wrote settings includes");
    }
    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<(), CheckpointError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CheckpointError::write_error(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| CheckpointError::write_error(path, e))
}
