use anyhow::{Context, bail};
use clap::Parser;
use log::{error, info};
use std::path::Path;
use timetable_solver::config::{Cli, Command};
use timetable_solver::data::Catalog;
use timetable_solver::report::{CatalogSummary, format_schedule};
use timetable_solver::seed::demo_catalog;
use timetable_solver::server::{self, AppState};
use timetable_solver::solver::{SolveOptions, SolveOutcome, solve};
use timetable_solver::validation::validate_catalog;
use timetable_solver::detect_conflicts;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = cli.budget.solve_options();

    match cli.command {
        Some(Command::Solve { catalog, json }) => {
            let catalog = match catalog {
                Some(path) => load_catalog(&path)?,
                None => demo_catalog(),
            };
            solve_and_print(catalog, options, json)
        }
        Some(Command::Serve) | None => serve(cli.bind, options).await,
    }
}

async fn serve(bind: std::net::SocketAddr, options: SolveOptions) -> anyhow::Result<()> {
    server::run_server(bind, AppState { options })
        .await
        .with_context(|| format!("server on {bind} failed"))
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing catalog {}", path.display()))
}

fn solve_and_print(catalog: Catalog, options: SolveOptions, json: bool) -> anyhow::Result<()> {
    if let Err(errors) = validate_catalog(&catalog) {
        for e in &errors {
            error!("{e}");
        }
        bail!("catalog has {} problems", errors.len());
    }

    let report = solve(&catalog, &options);
    info!("Search stats: {:?}", report.stats);

    let sessions = match report.outcome {
        SolveOutcome::Solved(sessions) => sessions,
        SolveOutcome::Unsatisfiable => bail!(
            "failed to generate a valid schedule; constraints are too tight, try adding rooms or reducing sessions"
        ),
        SolveOutcome::Inconclusive => bail!(
            "search budget exhausted after {} candidates; result unknown",
            report.stats.candidates_tried
        ),
    };
    let conflicts = detect_conflicts(&sessions, &catalog);

    if json {
        let out = serde_json::json!({
            "sessions": sessions,
            "conflicts": conflicts,
            "summary": CatalogSummary::new(&catalog, &sessions),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_schedule(&sessions, &catalog));
        println!("\n{}", CatalogSummary::new(&catalog, &sessions));
        for conflict in &conflicts {
            println!("{conflict}");
        }
    }
    Ok(())
}
