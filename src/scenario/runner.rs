//! Scenario execution
//!
//! Pure orchestration: build the request batch, exchange it through a fresh
//! transport session, validate the designated responses, aggregate
//! pass/fail. Transport and schema-lookup errors fail the scenario they hit
//! and never abort the run.

use std::time::Duration;

use colored::Colorize;
use serde_json::Value;

use crate::schema::SchemaRegistry;
use crate::transport::{Exchange, ProcessTransport, ServerCommand};

use super::config::{Scenario, Step};

/// Result of running one scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    /// The responses the server produced, in order (empty when the
    /// transport failed before any could be collected)
    pub responses: Vec<Value>,
    /// Everything that went wrong, in the order it was found
    pub diagnostics: Vec<String>,
}

/// Aggregated result of a whole run
#[derive(Debug)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

/// Runs scenarios against one server command
pub struct Runner {
    registry: SchemaRegistry,
    command: ServerCommand,
    timeout: Duration,
    verbose: bool,
}

impl Runner {
    pub fn new(command: ServerCommand, timeout: Duration) -> Self {
        Self {
            registry: SchemaRegistry::builtin(),
            command,
            timeout,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run every scenario in order, one fresh server process each
    pub async fn run_all(&self, scenarios: &[Scenario]) -> RunSummary {
        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run_scenario(scenario).await);
        }

        let passed = outcomes.iter().filter(|o| o.passed).count();
        RunSummary {
            passed,
            total: outcomes.len(),
            outcomes,
        }
    }

    /// Run a single scenario against a fresh server process
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        println!(
            "\n{} {}",
            "Running Scenario:".blue().bold(),
            scenario.name.white().bold()
        );
        if let Some(desc) = &scenario.description {
            println!("  {}", desc.dimmed());
        }

        let requests: Vec<Value> = scenario
            .steps
            .iter()
            .map(|step| step.request.clone())
            .collect();

        let transport = ProcessTransport::new(self.command.clone(), self.timeout);
        let exchange = match transport.send_and_collect(&requests).await {
            Ok(exchange) => exchange,
            Err(e) => {
                println!("  {} {}", "✗".red(), e);
                return ScenarioOutcome {
                    name: scenario.name.clone(),
                    passed: false,
                    responses: Vec::new(),
                    diagnostics: vec![e.to_string()],
                };
            }
        };

        if self.verbose && !exchange.stderr.is_empty() {
            println!("  {}", "server stderr:".dimmed());
            for line in exchange.stderr.lines() {
                println!("    {}", line.dimmed());
            }
        }

        let mut diagnostics = Vec::new();
        for (index, step) in scenario.steps.iter().enumerate() {
            self.check_step(step, index, &exchange, &mut diagnostics);
        }

        let passed = diagnostics.is_empty();
        if passed {
            println!("  {} {}", "✓".green().bold(), "Scenario Passed".green());
        } else {
            println!("  {} {}", "✗".red().bold(), "Scenario Failed".red());
        }

        ScenarioOutcome {
            name: scenario.name.clone(),
            passed,
            responses: exchange.responses,
            diagnostics,
        }
    }

    /// Check one step's expectation against its positional response
    fn check_step(
        &self,
        step: &Step,
        index: usize,
        exchange: &Exchange,
        diagnostics: &mut Vec<String>,
    ) {
        let method = step.request["method"].as_str().unwrap_or("?");
        let Some(expect) = &step.expect else {
            if self.verbose {
                println!("  {} {} (no expectation)", "·".dimmed(), method.dimmed());
            }
            return;
        };

        let Some(response) = exchange.responses.get(index) else {
            let diag = format!(
                "no response for request {} ({}); got {} response(s)",
                index,
                method,
                exchange.responses.len()
            );
            println!("  {} {}: {}", "✗".red(), method, diag);
            diagnostics.push(diag);
            return;
        };

        let mut step_diags = Vec::new();
        if let Some(schema_name) = &expect.schema {
            match self.registry.validate(response, schema_name) {
                Ok(result) => step_diags.extend(result.diagnostics),
                // Unknown schema is a harness bug, reported as such and
                // still failing only this scenario
                Err(e) => step_diags.push(e.to_string()),
            }
        }
        if expect.require_result && response.get("result").is_none() {
            step_diags.push(format!("response {} has no result member", index));
        }
        if expect.require_outcome
            && response.get("result").is_none()
            && response.get("error").is_none()
        {
            step_diags.push(format!(
                "response {} has neither result nor error member",
                index
            ));
        }

        if step_diags.is_empty() {
            println!("  {} {}", "✓".green(), method.dimmed());
            if expect.schema.as_deref() == Some("ToolsListResponse") {
                print_tool_inventory(response);
            }
        } else {
            println!("  {} {}:", "✗".red(), method);
            for diag in &step_diags {
                println!("    {}", diag);
            }
        }
        diagnostics.extend(step_diags);
    }
}

/// Report the tools a server advertises. Informational only: which tools
/// exist and what they do is not a conformance question.
fn print_tool_inventory(response: &Value) {
    let Some(tools) = response.pointer("/result/tools").and_then(Value::as_array) else {
        return;
    };
    println!("    {} tool(s) advertised:", tools.len());
    for tool in tools {
        let name = tool["name"].as_str().unwrap_or("?");
        let description = tool["description"].as_str().unwrap_or("no description");
        println!("    - {}: {}", name, description.dimmed());
    }
}
