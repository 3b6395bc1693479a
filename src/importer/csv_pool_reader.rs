// ==========================================
// Flight Roster - CSV pool reader
// ==========================================
// Headers follow the JSON field names; column order is free.
// List columns (languages, recipes, vehicleRestrictions,
// affiliatedPassengers) are ';'-separated.
//
// Crew file: one row per member, `role` = FlightCrew | CabinCrew
// Passenger file: one row per passenger of a single flight
// ==========================================

use crate::domain::crew::{CabinCrewKind, CabinCrewMember, CrewCandidate, FlightCrewMember, PersonalInfo};
use crate::domain::passenger::PassengerCandidate;
use crate::domain::seat::SeatIdentifier;
use crate::domain::types::SeatClass;
use crate::importer::error::{ImportError, ImportResult};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument};

pub struct CsvPoolReader;

impl CsvPoolReader {
    // ==========================================
    // Crew
    // ==========================================

    #[instrument]
    pub fn read_crew_file(path: &Path) -> ImportResult<Vec<CrewCandidate>> {
        let file = open(path)?;
        let crew = Self::read_crew(file)?;
        info!(count = crew.len(), "crew pool imported");
        Ok(crew)
    }

    pub fn read_crew<R: Read>(source: R) -> ImportResult<Vec<CrewCandidate>> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(source);
        let columns = Columns::new(reader.headers()?);

        let mut crew = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = Row {
                record: &record,
                columns: &columns,
                number: idx + 2,
            };

            let id = row.required("id")?;
            let info = row.personal_info()?;
            let candidate = match row.required("role")?.as_str() {
                "FlightCrew" => CrewCandidate::FlightCrew(FlightCrewMember {
                    id,
                    info,
                    seniority: row.parsed("seniority")?,
                    vehicle_restriction: row.required("vehicleRestriction")?,
                    allowed_range: row.parsed("allowedRange")?,
                }),
                "CabinCrew" => {
                    let kind = match row.required("type")?.as_str() {
                        "Regular" => CabinCrewKind::Regular,
                        "Chief" => CabinCrewKind::Chief,
                        "Chef" => CabinCrewKind::Chef {
                            recipes: row.list("recipes"),
                        },
                        other => return Err(row.conversion("type", format!("unknown cabin crew type: {}", other))),
                    };
                    CrewCandidate::CabinCrew(CabinCrewMember {
                        id,
                        info,
                        kind,
                        vehicle_restrictions: row.list("vehicleRestrictions"),
                    })
                }
                other => return Err(row.conversion("role", format!("unknown role: {}", other))),
            };
            crew.push(candidate);
        }
        Ok(crew)
    }

    // ==========================================
    // Passengers
    // ==========================================

    #[instrument]
    pub fn read_passenger_file(path: &Path) -> ImportResult<Vec<PassengerCandidate>> {
        let file = open(path)?;
        let passengers = Self::read_passengers(file)?;
        info!(count = passengers.len(), "passenger pool imported");
        Ok(passengers)
    }

    pub fn read_passengers<R: Read>(source: R) -> ImportResult<Vec<PassengerCandidate>> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(source);
        let columns = Columns::new(reader.headers()?);

        let mut passengers = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row = Row {
                record: &record,
                columns: &columns,
                number: idx + 2,
            };

            let seat_number = match row.optional("seatNumber") {
                Some(raw) => Some(
                    raw.parse::<SeatIdentifier>()
                        .map_err(|e| row.conversion("seatNumber", e.to_string()))?,
                ),
                None => None,
            };

            passengers.push(PassengerCandidate {
                id: row.required("id")?,
                info: row.personal_info()?,
                seat_type: row.parsed::<SeatClass>("seatType")?,
                seat_number,
                parent_id: row.optional("parentId"),
                affiliated_passengers: row.list("affiliatedPassengers"),
            });
        }
        Ok(passengers)
    }
}

fn open(path: &Path) -> ImportResult<std::fs::File> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::File::open(path)?)
}

// ==========================================
// Header lookup / field access
// ==========================================

struct Columns(HashMap<String, usize>);

impl Columns {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(idx, name)| (name.trim().to_string(), idx))
                .collect(),
        )
    }
}

struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a Columns,
    number: usize,
}

impl Row<'_> {
    fn optional(&self, field: &str) -> Option<String> {
        self.columns
            .0
            .get(field)
            .and_then(|&idx| self.record.get(idx))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn required(&self, field: &str) -> ImportResult<String> {
        if !self.columns.0.contains_key(field) {
            return Err(ImportError::MissingColumn(field.to_string()));
        }
        self.optional(field).ok_or_else(|| ImportError::MissingValue {
            row: self.number,
            field: field.to_string(),
        })
    }

    fn parsed<T>(&self, field: &str) -> ImportResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.required(field)?;
        raw.parse::<T>().map_err(|e| self.conversion(field, e.to_string()))
    }

    fn list(&self, field: &str) -> Vec<String> {
        self.optional(field)
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn conversion(&self, field: &str, message: String) -> ImportError {
        ImportError::TypeConversionError {
            row: self.number,
            field: field.to_string(),
            message,
        }
    }

    fn personal_info(&self) -> ImportResult<PersonalInfo> {
        Ok(PersonalInfo {
            name: self.required("name")?,
            age: self.parsed("age")?,
            gender: self.required("gender")?,
            nationality: self.required("nationality")?,
            languages: self.list("languages"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Seniority;

    const CREW_CSV: &str = "\
role,id,name,age,gender,nationality,languages,seniority,vehicleRestriction,allowedRange,type,recipes,vehicleRestrictions
FlightCrew,FC001,Captain John Smith,45,Male,Turkish,Turkish;English,Senior,Boeing 777,15000,,,
CabinCrew,CC003,Chef Pierre Dubois,42,Male,French,French;English,,,,Chef,Coq au Vin;Ratatouille,Boeing 777
";

    #[test]
    fn test_read_crew() {
        let crew = CsvPoolReader::read_crew(CREW_CSV.as_bytes()).unwrap();
        assert_eq!(crew.len(), 2);
        match &crew[0] {
            CrewCandidate::FlightCrew(m) => {
                assert_eq!(m.seniority, Seniority::Senior);
                assert_eq!(m.allowed_range, 15000.0);
                assert_eq!(m.info.languages, vec!["Turkish", "English"]);
            }
            other => panic!("expected pilot, got {other:?}"),
        }
        match &crew[1] {
            CrewCandidate::CabinCrew(m) => {
                assert_eq!(m.kind.recipes(), ["Coq au Vin", "Ratatouille"]);
                assert_eq!(m.vehicle_restrictions, vec!["Boeing 777"]);
            }
            other => panic!("expected attendant, got {other:?}"),
        }
    }

    #[test]
    fn test_read_passengers() {
        let csv = "\
id,name,age,gender,nationality,seatType,seatNumber,parentId,affiliatedPassengers
P003,Michael Brown,42,Male,Canadian,business,2c,,
P004,Baby Emma Brown,1,Female,Canadian,infant,,P003,
P005,Anna Wilson,31,Female,German,economy,,,P006
";
        let passengers = CsvPoolReader::read_passengers(csv.as_bytes()).unwrap();
        assert_eq!(passengers.len(), 3);
        assert_eq!(passengers[0].seat_number, Some(SeatIdentifier::new(2, 'C')));
        assert_eq!(passengers[1].parent_id.as_deref(), Some("P003"));
        assert!(passengers[1].is_infant());
        assert_eq!(passengers[2].affiliated_passengers, vec!["P006"]);
        assert!(passengers[2].info.languages.is_empty());
    }

    #[test]
    fn test_errors_carry_row_number() {
        let csv = "\
id,name,age,gender,nationality,seatType
P001,Robert Johnson,35,Male,American,business
P002,Emily Davis,old,Female,British,economy
";
        let err = CsvPoolReader::read_passengers(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::TypeConversionError { row: 3, ref field, .. } if field == "age"));

        let err = CsvPoolReader::read_passengers("id,name\nP1,X\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "age"));
    }
}
