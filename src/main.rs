use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use service_cost_model::config::{load_inputs_file, Config, ConfigOverrides};
use service_cost_model::engine::{calculate, CalculationResult};
use service_cost_model::model::{InputBag, ModelKind, OperationalModel, SolutionKind};
use service_cost_model::output::csv::{
    comparison_to_csv, projection_to_csv, ranking_to_csv, sensitivity_to_csv,
};
use service_cost_model::output::render_json;
use service_cost_model::output::table::{
    render_comparison_table, render_projection_table, render_ranking_table,
    render_sensitivity_table, render_summary_table,
};
use service_cost_model::report::comparison::build_comparison;
use service_cost_model::report::ranking::rank_from_inputs;
use service_cost_model::report::summary::summarize;
use service_cost_model::report::CalculationReport;
use service_cost_model::server::run_server;
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "service-cost-model",
    about = "Compare in-house, platform, outsourced and hybrid service delivery costs"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// TOML or JSON file of assumption values.
    #[arg(short, long)]
    inputs: Option<PathBuf>,
    /// Single assumption override, e.g. `--set team_size=8`. Repeatable.
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Baseline vs. solution cost, break-even and the monthly projection.
    Calculate {
        model: ModelKind,
        solution: SolutionKind,
        #[arg(long)]
        monthly: bool,
    },
    Sensitivity {
        model: ModelKind,
        solution: SolutionKind,
    },
    Compare {
        model: ModelKind,
        solution: SolutionKind,
    },
    /// Rank every solution type against one operational model.
    Rank {
        model: ModelKind,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let (host, port) = match &cli.command {
        Commands::Serve { host, port } => (host.clone(), *port),
        _ => (None, None),
    };
    config.apply_overrides(ConfigOverrides {
        inputs: Some(collect_input_overrides(cli.inputs.as_deref(), &cli.set)?),
        host,
        port,
    });

    match &cli.command {
        Commands::Calculate {
            model,
            solution,
            monthly,
        } => {
            let result = calculate(*model, *solution, &config.inputs)?;
            print_calculation(result, *monthly, cli.output)?;
        }
        Commands::Sensitivity { model, solution } => {
            let result = calculate(*model, *solution, &config.inputs)?;
            let sensitivity = result.sensitivity();
            match cli.output {
                OutputFormat::Table => println!("{}", render_sensitivity_table(&sensitivity)),
                OutputFormat::Json => println!("{}", render_json(&sensitivity)?),
                OutputFormat::Csv => println!("{}", sensitivity_to_csv(&sensitivity)?),
            }
        }
        Commands::Compare { model, solution } => {
            let result = calculate(*model, *solution, &config.inputs)?;
            let rows = build_comparison(&result);
            match cli.output {
                OutputFormat::Table => {
                    println!("{}", render_comparison_table(&rows, result.breakeven))
                }
                OutputFormat::Json => println!("{}", render_json(&rows)?),
                OutputFormat::Csv => println!("{}", comparison_to_csv(&rows, result.breakeven)?),
            }
        }
        Commands::Rank { model } => {
            let operational = OperationalModel::from_inputs(*model, &config.inputs)?;
            operational.validate()?;
            let rankings = rank_from_inputs(&operational, &config.inputs);
            match cli.output {
                OutputFormat::Table => println!("{}", render_ranking_table(&rankings)),
                OutputFormat::Json => println!("{}", render_json(&rankings)?),
                OutputFormat::Csv => println!("{}", ranking_to_csv(&rankings)?),
            }
        }
        Commands::Serve { .. } => {
            let bind = format!("{}:{}", config.server.host, config.server.port);
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            return run_server(config, addr).await;
        }
        Commands::Config { init, show } => {
            if *init {
                Config::write_template(&config_path)?;
                println!("Wrote config template to {}", config_path.display());
            }
            if *show || !*init {
                println!("{}", render_json(&config)?);
            }
        }
    }

    Ok(())
}

fn collect_input_overrides(file: Option<&Path>, assignments: &[String]) -> Result<InputBag> {
    let mut inputs = match file {
        Some(path) => {
            info!("loading assumptions from {}", path.display());
            load_inputs_file(path)?
        }
        None => InputBag::new(),
    };
    for raw in assignments {
        let (key, value) = InputBag::parse_assignment(raw)?;
        inputs.set(&key, value);
    }
    Ok(inputs)
}

fn print_calculation(result: CalculationResult, monthly: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_summary_table(&result));
            if monthly {
                println!("{}", render_projection_table(&result.data));
            }
            println!("{}", summarize(&result, &result.sensitivity()));
        }
        OutputFormat::Json => println!("{}", render_json(&CalculationReport::build(result))?),
        OutputFormat::Csv => println!("{}", projection_to_csv(&result.data)?),
    }
    Ok(())
}
