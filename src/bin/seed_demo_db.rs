// ==========================================
// Flight Roster - demo database seeding
// ==========================================
// seed_demo_db [db_path] [--crew CSV] [--passengers CSV] [--flight FLIGHT]
//
// Without CSV options the built-in demo fleet, crew and passengers are
// written. A passenger CSV replaces the pool of --flight (default TK1234).
// ==========================================

use std::error::Error;
use std::path::PathBuf;

use flight_roster::app::get_default_db_path;
use flight_roster::importer::CsvPoolReader;
use flight_roster::logging;
use flight_roster::repository::{InMemoryRosterRepository, SqliteRosterRepository};

const DEFAULT_FLIGHT: &str = "TK1234";

#[derive(Debug, Default)]
struct SeedArgs {
    db_path: Option<String>,
    crew_csv: Option<PathBuf>,
    passengers_csv: Option<PathBuf>,
    flight_number: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SeedArgs, Box<dyn Error>> {
    let mut parsed = SeedArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--crew" => parsed.crew_csv = Some(args.next().ok_or("--crew needs a path")?.into()),
            "--passengers" => parsed.passengers_csv = Some(args.next().ok_or("--passengers needs a path")?.into()),
            "--flight" => parsed.flight_number = Some(args.next().ok_or("--flight needs a value")?),
            other if other.starts_with("--") => return Err(format!("unknown option {}", other).into()),
            other => parsed.db_path = Some(other.to_string()),
        }
    }
    Ok(parsed)
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let args = parse_args(std::env::args().skip(1))?;
    let db_path = args.db_path.clone().unwrap_or_else(get_default_db_path);
    let repo = SqliteRosterRepository::new(&db_path)?;
    let demo = InMemoryRosterRepository::demo();

    for flight in demo.flights() {
        repo.upsert_flight(flight)?;
    }

    let crew = match &args.crew_csv {
        Some(path) => CsvPoolReader::read_crew_file(path)?,
        None => demo.crew().to_vec(),
    };
    let crew_count = repo.insert_crew(&crew)?;

    let csv_flight = args.flight_number.as_deref().unwrap_or(DEFAULT_FLIGHT);
    if args.passengers_csv.is_some() && demo.flight(csv_flight).is_none() {
        return Err(format!("unknown flight {}", csv_flight).into());
    }
    let mut passenger_count = 0;
    for flight in demo.flights() {
        let number = flight.flight_number.as_str();
        let pool = match &args.passengers_csv {
            Some(path) if number == csv_flight => CsvPoolReader::read_passenger_file(path)?,
            _ => demo.passengers(number).to_vec(),
        };
        repo.clear_passengers(number)?;
        passenger_count += repo.insert_passengers(number, &pool)?;
    }

    eprintln!(
        "Seeded {}: flights={:?} crew={} passengers={}",
        db_path,
        repo.find_flight_numbers()?,
        crew_count,
        passenger_count
    );
    Ok(())
}
