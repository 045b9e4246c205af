//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use confgrid_core::{ConfgridConfig, ConfusionCounts};
use std::io::Write;

/// Handle a CLI subcommand, writing its output to `out`.
pub fn handle_command<W: Write>(
    command: Commands,
    config: &ConfgridConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    match command {
        Commands::Report => handle_report(config, out),
        Commands::Score { tp, tn, fp, fn_ } => {
            handle_score(ConfusionCounts::new(tp, tn, fp, fn_), config, out)
        }
        Commands::Config { action } => handle_config(action, config, out),
    }
}

fn handle_report<W: Write>(config: &ConfgridConfig, out: &mut W) -> anyhow::Result<()> {
    confgrid_core::write_report(
        out,
        &config.grid,
        config.metrics.zero_division,
        &config.output,
    )?;
    Ok(())
}

fn handle_score<W: Write>(
    counts: ConfusionCounts,
    config: &ConfgridConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    tracing::info!(%counts, "scoring confusion matrix");
    confgrid_core::write_score(out, &counts, config.metrics.zero_division, &config.output)?;
    Ok(())
}

fn handle_config<W: Write>(
    action: ConfigAction,
    config: &ConfgridConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(config)?;
            write!(out, "{}", toml_str)?;
            Ok(())
        }
    }
}
