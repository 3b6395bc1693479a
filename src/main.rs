// ==========================================
// Flight Roster - CLI entry point
// ==========================================
// flight-roster [--db PATH] <FLIGHT> [--view tabular|seat-map|extended]
//               [--export] [--generate-passengers]
// ==========================================

use anyhow::{bail, Context};
use flight_roster::api::RosterView;
use flight_roster::app::{get_default_db_path, AppState};
use flight_roster::logging;

const USAGE: &str = "usage: flight-roster [--db PATH] <FLIGHT> [--view tabular|seat-map|extended] [--export] [--generate-passengers]";

#[derive(Debug)]
struct CliArgs {
    db_path: String,
    flight_number: String,
    view: RosterView,
    export: bool,
    generate_passengers: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut db_path = None;
    let mut flight_number = None;
    let mut view = RosterView::default();
    let mut export = false;
    let mut generate_passengers = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => db_path = Some(args.next().context("--db needs a path")?),
            "--view" => {
                let raw = args.next().context("--view needs a value")?;
                view = raw.parse()?;
            }
            "--export" => export = true,
            "--generate-passengers" => generate_passengers = true,
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("unknown option {}\n{}", other, USAGE),
            other => {
                if flight_number.replace(other.to_string()).is_some() {
                    bail!("only one flight number may be given\n{}", USAGE);
                }
            }
        }
    }

    Ok(CliArgs {
        db_path: db_path.unwrap_or_else(get_default_db_path),
        flight_number: flight_number.context(USAGE)?,
        view,
        export,
        generate_passengers,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args = parse_args(std::env::args().skip(1))?;
    tracing::info!("{} v{}", flight_roster::APP_NAME, flight_roster::VERSION);

    let state = AppState::new(args.db_path.clone()).map_err(anyhow::Error::msg)?;
    let api = &state.roster_api;

    let outcome = if args.generate_passengers {
        api.generate_demo_roster(&args.flight_number).await
    } else {
        api.generate_roster(&args.flight_number).await
    }
    .with_context(|| format!("roster generation failed for {}", args.flight_number))?;

    println!("{}", api.render(&outcome.roster, args.view));

    if outcome.has_warnings() {
        eprintln!("{} warning(s):", outcome.warnings.len());
        for warning in &outcome.warnings {
            eprintln!("  {}", warning);
        }
    }

    if args.export {
        let date = outcome.roster.flight_info().scheduled_at.date();
        let path = api.export(&outcome.roster, date).await?;
        println!("exported to {}", path.display());
    }

    Ok(())
}
