//! CLI command handling
//!
//! Resolves the server command from flags and config, runs scenarios, and
//! prints the final report.

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::{self, Config};
use crate::common::{Error, Result};
use crate::scenario::{self, builtin, RunSummary, Runner, Scenario};
use crate::schema::SchemaRegistry;
use crate::transport::ServerCommand;

/// Dispatch a CLI command
///
/// Returns whether every scenario passed; harness-level problems (bad
/// flags, unreadable files) come back as errors instead.
pub async fn dispatch(command: Commands) -> Result<bool> {
    let config = Config::load()?;

    match command {
        Commands::Run {
            server,
            args,
            only,
            timeout,
            cwd,
            verbose,
        } => {
            let mut scenarios = builtin::all();
            if let Some(name) = &only {
                scenarios.retain(|s| &s.name == name);
                if scenarios.is_empty() {
                    let known: Vec<String> =
                        builtin::all().iter().map(|s| s.name.clone()).collect();
                    return Err(Error::Config(format!(
                        "No built-in scenario named '{}'. Available: {}",
                        name,
                        known.join(", ")
                    )));
                }
            }
            run(&config, &scenarios, server, args, timeout, cwd, verbose).await
        }

        Commands::Test {
            paths,
            server,
            args,
            timeout,
            cwd,
            verbose,
        } => {
            let scenarios = paths
                .iter()
                .map(|path| scenario::load_scenario(path))
                .collect::<Result<Vec<_>>>()?;
            run(&config, &scenarios, server, args, timeout, cwd, verbose).await
        }

        Commands::List => {
            println!("{}", "Built-in scenarios:".bold());
            for scenario in builtin::all() {
                match &scenario.description {
                    Some(desc) => println!("  {} - {}", scenario.name, desc.dimmed()),
                    None => println!("  {}", scenario.name),
                }
            }

            let registry = SchemaRegistry::builtin();
            println!("\n{}", "Registered schemas:".bold());
            for name in registry.names() {
                println!("  {}", name);
            }

            Ok(true)
        }
    }
}

async fn run(
    config: &Config,
    scenarios: &[Scenario],
    server: Option<String>,
    args: Vec<String>,
    timeout: Option<u64>,
    cwd: Option<PathBuf>,
    verbose: bool,
) -> Result<bool> {
    let command = server_command(config, server, args, cwd)?;
    let timeout = Duration::from_secs(timeout.unwrap_or(config.timeouts.response_secs));
    tracing::info!(
        "Testing {} with a {}s timeout per scenario",
        command.program.display(),
        timeout.as_secs()
    );

    let runner = Runner::new(command, timeout).verbose(verbose);
    let summary = runner.run_all(scenarios).await;
    print_summary(&summary);

    Ok(summary.all_passed())
}

/// Resolve the server command line: CLI flags win over the config file
fn server_command(
    config: &Config,
    server: Option<String>,
    args: Vec<String>,
    cwd: Option<PathBuf>,
) -> Result<ServerCommand> {
    let (name, args) = match server {
        Some(name) => (name, args),
        None => {
            let name = config.server.command.clone().ok_or_else(|| {
                Error::Config(
                    "No server command given. Pass one on the command line or set \
                     [server] command in the config file"
                        .to_string(),
                )
            })?;
            let args = if args.is_empty() {
                config.server.args.clone()
            } else {
                args
            };
            (name, args)
        }
    };

    Ok(ServerCommand {
        program: config::resolve_program(&name)?,
        args,
        cwd: cwd.or_else(|| config.server.cwd.clone()),
    })
}

fn print_summary(summary: &RunSummary) {
    println!("\n{}", "=".repeat(50));
    let line = format!(
        "Results: {}/{} scenarios passed",
        summary.passed, summary.total
    );
    if summary.all_passed() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
        for outcome in summary.outcomes.iter().filter(|o| !o.passed) {
            println!("  {} {}", "✗".red(), outcome.name);
            for diag in &outcome.diagnostics {
                println!("      {}", diag);
            }
        }
    }
}
