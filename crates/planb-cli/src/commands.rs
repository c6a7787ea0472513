use super::args::{Cli, Commands, ConfigCommand};
use super::{logging, render};
use crate::types::OutputFormat;
use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use planb_runtime::config::resolve_endpoint;
use planb_runtime::{EndpointSource, LoadStatus, PlanWidget, WidgetConfig, WidgetEvents};
use planb_types::{BillingPeriod, NavKey};
use serde_json::json;
use std::time::Instant;
use tokio::runtime::Runtime;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => WidgetConfig::default_path()?,
    };
    let mut config = WidgetConfig::load_from(&config_path)
        .with_context(|| format!("failed to read config {}", config_path.display()))?;

    config.endpoint = Some(resolve_endpoint(
        cli.endpoint.as_deref(),
        config.endpoint.as_deref(),
    ));
    if cli.default_plan.is_some() {
        config.default_plan = cli.default_plan;
    }
    tracing::debug!(
        config = %config_path.display(),
        endpoint = config.endpoint_or_default(),
        "resolved configuration"
    );

    let color = cli.format == OutputFormat::Plain && std::io::stdout().is_terminal();

    match cli.command {
        Commands::Show {
            billing,
            width,
            select,
            keys,
            events,
        } => {
            let options = ShowOptions {
                billing,
                width,
                select,
                keys,
                events,
            };
            show(&config, &options, cli.format, color)
        }

        Commands::Compare => compare(&config, cli.format, color),

        Commands::Dump => dump(&config),

        Commands::Config { command } => match command {
            ConfigCommand::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigCommand::Show => show_config(&config, cli.format),
        },
    }
}

struct ShowOptions {
    billing: BillingPeriod,
    width: Option<f64>,
    select: Option<String>,
    keys: Vec<NavKey>,
    events: bool,
}

fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

/// Load the configured endpoint to completion. A failed load is an error here.
fn load_widget(
    rt: &Runtime,
    config: &WidgetConfig,
) -> Result<(PlanWidget<EndpointSource>, WidgetEvents)> {
    let (mut widget, events) = PlanWidget::new(EndpointSource::new(), config);

    rt.block_on(async {
        widget.reload();
        widget.settle_load().await
    });

    if let LoadStatus::Failed(message) = widget.status() {
        anyhow::bail!(
            "failed to load plans from {}: {}",
            widget.endpoint(),
            message
        );
    }

    Ok((widget, events))
}

fn show(
    config: &WidgetConfig,
    options: &ShowOptions,
    format: OutputFormat,
    color: bool,
) -> Result<()> {
    let rt = runtime()?;
    let (mut widget, mut events) = load_widget(&rt, config)?;
    let now = Instant::now();

    widget.set_billing(options.billing);
    if let Some(width) = options.width {
        widget.set_viewport_width(width);
    }
    if let Some(name) = &options.select {
        let index = widget
            .plans()
            .iter()
            .position(|plan| &plan.name == name)
            .with_context(|| format!("no plan named {:?}", name))?;
        widget.click(index, now);
    }
    for key in &options.keys {
        widget.key(*key, now);
    }

    let view = widget.view();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Plain => print!("{}", render::cards(&view, color)),
    }

    if options.events {
        for event in events.drain() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    Ok(())
}

fn compare(config: &WidgetConfig, format: OutputFormat, color: bool) -> Result<()> {
    let rt = runtime()?;
    let (widget, _events) = load_widget(&rt, config)?;
    let view = widget.view();

    match (format, &view.comparison) {
        (OutputFormat::Json, comparison) => {
            println!("{}", serde_json::to_string_pretty(comparison)?)
        }
        (OutputFormat::Plain, Some(table)) => print!("{}", render::comparison(table, color)),
        (OutputFormat::Plain, None) => println!("No features to compare."),
    }

    Ok(())
}

fn dump(config: &WidgetConfig) -> Result<()> {
    let rt = runtime()?;
    let (widget, _events) = load_widget(&rt, config)?;

    let catalog = json!({
        "plans": widget.plans(),
        "features": widget.features(),
        "active_index": widget.active_index(),
    });
    println!("{}", serde_json::to_string_pretty(&catalog)?);

    Ok(())
}

fn show_config(config: &WidgetConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Plain => print!("{}", toml::to_string_pretty(config)?),
    }
    Ok(())
}
