//! Application entry point and dispatch.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use pathbench_harness::compare::ComparisonAssembler;
use pathbench_harness::error::HarnessError;
use pathbench_harness::invocation::{FeatureFlags, InvocationBuilder};
use pathbench_harness::report::{self, JsonReportEmitter, ReportEmitter};
use pathbench_harness::runner::ProcessRunner;
use pathbench_harness::sweep::{SweepController, SweepOutcome};
use pathbench_harness::workload;

use crate::config::AppConfig;
use crate::presenter;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        crate::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    if config.updates.is_empty() {
        anyhow::bail!("no update workloads given; pass at least one --update <file>");
    }
    if config.procs.is_empty() {
        anyhow::bail!("no process counts given; pass --procs <list>");
    }

    let workloads = workload::sequence(config.updates.clone());
    tracing::info!(count = workloads.len(), "workloads sequenced");

    std::fs::create_dir_all(&config.output_dir)?;

    let builder = InvocationBuilder::new(&config.graph, config.source_vertex)
        .with_serial_bin(&config.serial_bin)
        .with_parallel_bin(&config.parallel_bin)
        .with_launcher(&config.launcher)
        .with_flags(FeatureFlags {
            openmp: config.openmp,
            opencl: config.opencl,
            async_level: config.async_level,
        });
    let runner = ProcessRunner::new(config.timeout_duration());
    let controller = SweepController::new(builder, runner, config.procs.clone(), &config.output_dir)
        .with_serial_baseline(!config.scaling);

    let outcome = sweep_with_progress(config, &controller, &workloads);
    if !config.quiet {
        presenter::print_success(&format!(
            "sweep complete: {}/{} cells succeeded",
            outcome.succeeded, outcome.attempted
        ));
    }

    let emitter = JsonReportEmitter::new(&config.report_dir);
    if config.scaling {
        emit_scaling(config, &emitter, &outcome)
    } else {
        emit_comparison(config, &emitter, &outcome)
    }
}

fn sweep_with_progress(
    config: &AppConfig,
    controller: &SweepController,
    workloads: &[pathbench_harness::WorkloadDescriptor],
) -> SweepOutcome {
    if config.quiet {
        return controller.run(workloads, |_| {});
    }

    let bar = ProgressBar::new(controller.cell_count(workloads.len()) as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let outcome = controller.run(workloads, |label| {
        bar.set_message(label.to_string());
        bar.inc(1);
    });
    bar.finish_and_clear();
    outcome
}

fn emit_comparison(
    config: &AppConfig,
    emitter: &JsonReportEmitter,
    outcome: &SweepOutcome,
) -> Result<()> {
    let dataset = match ComparisonAssembler::assemble(&outcome.rows) {
        Ok(dataset) => dataset,
        Err(HarnessError::InsufficientData) => {
            presenter::print_error("no comparable rows; skipping report");
            anyhow::bail!(HarnessError::InsufficientData);
        }
        Err(err) => return Err(err.into()),
    };

    if !config.quiet {
        presenter::present_comparison(&dataset);
    }

    // Persist best-effort: fall back to a console table, never abort.
    if let Err(err) = emitter.emit_comparison(&dataset) {
        presenter::print_error(&err.to_string());
        print!("{}", report::comparison_table(&dataset));
    } else if !config.quiet {
        presenter::print_success(&format!(
            "report written to {}",
            emitter.comparison_path().display()
        ));
    }
    Ok(())
}

fn emit_scaling(
    config: &AppConfig,
    emitter: &JsonReportEmitter,
    outcome: &SweepOutcome,
) -> Result<()> {
    let dataset = match ComparisonAssembler::scaling(&outcome.rows) {
        Ok(dataset) => dataset,
        Err(HarnessError::InsufficientData) => {
            presenter::print_error("no successful runs; skipping report");
            anyhow::bail!(HarnessError::InsufficientData);
        }
        Err(err) => return Err(err.into()),
    };

    if !config.quiet {
        presenter::present_scaling(&dataset);
    }

    if let Err(err) = emitter.emit_scaling(&dataset) {
        presenter::print_error(&err.to_string());
        print!("{}", report::scaling_table(&dataset));
    } else if !config.quiet {
        presenter::print_success(&format!(
            "report written to {}",
            emitter.scaling_path().display()
        ));
    }
    Ok(())
}
