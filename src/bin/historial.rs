//! Terminal view of the prediction log.
//!
//! Usage:
//!   cargo run --bin historial -- resumen
//!   cargo run --bin historial -- resumen --formato json
//!   cargo run --bin historial -- clasificar --pcr 5 --fc 100 --edad 25 --registrar

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use enfermedad_predictor::{
    CsvStore, HistorySummary, PredictionInput, PredictionRecord, PredictionStore, classify_with,
    config::Config, summarize,
};
use prettytable::{Table, row};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "historial")]
#[command(about = "Prediction log utilities", long_about = None)]
struct Cli {
    /// Prediction log to use instead of the configured one
    #[arg(long, global = true)]
    log_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print category totals and the latest predictions
    Resumen {
        #[arg(long, value_enum, default_value_t = Formato::Tabla)]
        formato: Formato,
    },
    /// Classify one case from the command line
    Clasificar {
        #[arg(long)]
        pcr: f64,
        #[arg(long)]
        fc: f64,
        #[arg(long)]
        edad: f64,
        /// Also append the result to the log
        #[arg(long)]
        registrar: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Formato {
    Tabla,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    let log_path = cli
        .log_path
        .unwrap_or_else(|| config.storage.log_path.clone());
    let store = CsvStore::new(log_path);

    match cli.command {
        Commands::Resumen { formato } => {
            let summary = summarize(&store.read_all().await?);
            match formato {
                Formato::Tabla => print_tables(&summary),
                Formato::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            }
        }
        Commands::Clasificar {
            pcr,
            fc,
            edad,
            registrar,
        } => {
            let input = PredictionInput { pcr, fc, edad };
            if !(pcr.is_finite() && fc.is_finite() && edad.is_finite()) {
                anyhow::bail!("pcr, fc and edad must be finite numbers");
            }
            let categoria = classify_with(&input, &config.thresholds);
            println!("{}", categoria);
            if registrar {
                store.append(&PredictionRecord::new(input, categoria)).await?;
                println!("Registrado en {}", store.path().display());
            }
        }
    }

    Ok(())
}

fn print_tables(summary: &HistorySummary) {
    println!("Total por Categoría");
    let mut totals = Table::new();
    totals.add_row(row!["Categoría", "Total"]);
    for (categoria, count) in &summary.counts {
        totals.add_row(row![categoria.label(), count]);
    }
    totals.add_row(row!["Total", summary.total]);
    totals.printstd();

    println!();
    println!("Últimas {} Predicciones", enfermedad_predictor::history::RECENT_LIMIT);
    if summary.recent.is_empty() {
        println!("No hay predicciones registradas.");
        return;
    }
    let mut recent = Table::new();
    recent.add_row(row!["Fecha", "PCR", "FC", "Edad", "Categoría"]);
    for record in &summary.recent {
        recent.add_row(row![
            record.fecha.format("%Y-%m-%d %H:%M:%S"),
            record.pcr,
            record.fc,
            record.edad,
            record.categoria.label()
        ]);
    }
    recent.printstd();
}
