use anyhow::{Context, Result};
use keeper_ci::cli::commands::{RunCommand, StepsCommand, ValidateCommand};
use keeper_ci::cli::output::*;
use keeper_ci::cli::{Cli, Command};
use keeper_ci::core::config::WorkflowConfig;
use keeper_ci::core::{Run, RunStatus, StepState, Trigger};
use keeper_ci::exec::{create_report, PipelineRunner, RunEvent, ShellCommandRunner};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_pipeline(cmd, cli.clone()).await?,
        Command::Validate(cmd) => validate_workflow(cmd)?,
        Command::Steps(cmd) => show_steps(cmd)?,
    }

    Ok(())
}

/// Load the workflow from a file, or fall back to the built-in keeper one
fn load_workflow_config(file: Option<&str>) -> Result<WorkflowConfig> {
    match file {
        Some(path) => {
            WorkflowConfig::from_file(path).context("Failed to load workflow config")
        }
        None => WorkflowConfig::keeper_default(),
    }
}

async fn run_pipeline(cmd: &RunCommand, cli: Cli) -> Result<()> {
    let config = load_workflow_config(cmd.file.as_deref())?;
    let workflow = config.to_workflow()?;

    if !cmd.json {
        println!("{} Loaded workflow: {}", INFO, style(&workflow.name).bold());
    }

    let trigger = Trigger::new(cmd.event.into(), cmd.branch.clone());

    // A trigger outside the workflow's filters schedules nothing.
    let Some(mut run) = Run::from_workflow(&workflow, trigger.clone()) else {
        if cmd.json {
            println!(
                "{}",
                serde_json::json!({ "triggered": false, "trigger": trigger })
            );
        } else {
            println!(
                "{} {} does not match the workflow triggers, nothing to run",
                INFO,
                style(&trigger).cyan()
            );
        }
        return Ok(());
    };

    let mut runner = PipelineRunner::new(ShellCommandRunner::new(), cmd.fail_fast);

    // Console output for events; suppressed when emitting JSON
    if !cmd.json {
        let stream = cli.stream;
        runner.add_event_handler(move |event| {
            match &event {
                RunEvent::StepOutput { .. } if !stream => return,
                RunEvent::StepFailed { output, .. } if !output.is_empty() => {
                    println!("{}", format_run_event(&event));
                    println!("{}", format_output(output, 30));
                    return;
                }
                _ => {}
            }
            println!("{}", format_run_event(&event));
        });
    }

    let status = runner.execute(&mut run).await;

    if cmd.json {
        let report = create_report(&run);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        for step in &run.steps {
            println!(
                "  {} {}",
                format_step_state(&step.state),
                style(&step.name).bold()
            );
        }

        if status == RunStatus::Passed {
            println!(
                "\n{} {} {}",
                CHECK,
                style(&run.workflow_name).bold(),
                style("passed").green()
            );
        } else {
            println!(
                "\n{} {} {}",
                CROSS,
                style(&run.workflow_name).bold(),
                style("failed").red()
            );
            for step in run.failed_steps() {
                if let StepState::Failed { reason, .. } = &step.state {
                    println!("  {} {}: {}", CROSS, style(&step.name).red(), reason);
                }
            }
        }
    }

    // Exit contract: non-zero iff any step failed.
    if status != RunStatus::Passed {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_workflow(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating workflow...", INFO);

    let result = WorkflowConfig::from_file(&cmd.file);

    match result {
        Ok(config) => {
            println!("{} Workflow configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Steps: {}", style(config.steps.len()).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

fn show_steps(cmd: &StepsCommand) -> Result<()> {
    let config = load_workflow_config(cmd.file.as_deref())?;
    let workflow = config.to_workflow()?;

    println!("{} {}", INFO, style(&workflow.name).bold());
    if let Some(toolchain) = &workflow.toolchain {
        println!(
            "  Toolchain: {} ({})",
            style(&toolchain.channel).cyan(),
            if toolchain.force { "override" } else { "no override" }
        );
    }

    for (index, step) in workflow.steps.iter().enumerate() {
        println!(
            "  {}. {} {} {}",
            index + 1,
            style(&step.name).bold(),
            style(&step.command).dim(),
            style(format!("[{}]", step.working_dir)).cyan()
        );
    }

    Ok(())
}
