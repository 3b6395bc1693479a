// ==========================================
// Flight Roster - Seats and cabin layout
// ==========================================
// SeatIdentifier: row (1-based) + column letter, text form "12F"
// CabinLayout: seating plan "3-4-3" split into contiguous letter blocks
// SeatAssignment: Assigned | Unassigned | LapInfant
// ==========================================

use crate::domain::types::CabinSection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest number of columns a seating plan may declare (A..Z)
pub const MAX_COLUMNS: u32 = 26;

// ==========================================
// SeatIdentifier
// ==========================================
// Ordering is row-major: row first, then column letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatIdentifier {
    pub row: u32,
    pub column: char,
}

impl SeatIdentifier {
    pub fn new(row: u32, column: char) -> Self {
        Self {
            row,
            column: column.to_ascii_uppercase(),
        }
    }

    /// Zero-based column index (A=0)
    pub fn column_index(&self) -> u32 {
        (self.column as u32).saturating_sub('A' as u32)
    }
}

impl fmt::Display for SeatIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatIdentifier {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || LayoutError::InvalidSeat(s.to_string());

        let column = trimmed.chars().last().ok_or_else(invalid)?;
        if !column.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let row_part = &trimmed[..trimmed.len() - column.len_utf8()];
        if row_part.is_empty() || !row_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row: u32 = row_part.parse().map_err(|_| invalid())?;
        if row == 0 {
            return Err(invalid());
        }

        Ok(SeatIdentifier::new(row, column))
    }
}

impl TryFrom<String> for SeatIdentifier {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatIdentifier> for String {
    fn from(seat: SeatIdentifier) -> Self {
        seat.to_string()
    }
}

// ==========================================
// LayoutError
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid seating plan: {0}")]
    InvalidSeatingPlan(String),

    #[error("seating plan declares {0} columns (max 26)")]
    TooManyColumns(u32),

    #[error("invalid seat identifier: {0}")]
    InvalidSeat(String),

    #[error("total seat count must be positive")]
    NoSeats,
}

// ==========================================
// CabinLayout
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CabinLayout {
    /// Seats per block, left to right
    blocks: Vec<u32>,
    seats_per_row: u32,
    total_seats: u32,
    business_rows: u32,
}

impl CabinLayout {
    /// Builds a layout from a seating plan such as "3-4-3"
    ///
    /// # Rules
    /// - blocks are separated by '-', every block must be a positive number
    /// - column letters are assigned from 'A' across blocks
    /// - the last row is truncated so the layout holds exactly `total_seats`
    pub fn parse(seating_plan: &str, total_seats: u32, business_rows: u32) -> Result<Self, LayoutError> {
        if total_seats == 0 {
            return Err(LayoutError::NoSeats);
        }

        let blocks = seating_plan
            .split('-')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| LayoutError::InvalidSeatingPlan(seating_plan.to_string()))
            })
            .collect::<Result<Vec<u32>, LayoutError>>()?;

        let seats_per_row: u32 = blocks.iter().sum();
        if seats_per_row > MAX_COLUMNS {
            return Err(LayoutError::TooManyColumns(seats_per_row));
        }

        Ok(Self {
            blocks,
            seats_per_row,
            total_seats,
            business_rows,
        })
    }

    pub fn seats_per_row(&self) -> u32 {
        self.seats_per_row
    }

    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    pub fn business_rows(&self) -> u32 {
        self.business_rows.min(self.row_count())
    }

    pub fn blocks(&self) -> &[u32] {
        &self.blocks
    }

    /// Number of rows, the last one possibly partial
    pub fn row_count(&self) -> u32 {
        self.total_seats.div_ceil(self.seats_per_row)
    }

    /// Number of seats actually present in `row`
    pub fn row_len(&self, row: u32) -> u32 {
        if row == 0 || row > self.row_count() {
            return 0;
        }
        let before = (row - 1) * self.seats_per_row;
        (self.total_seats - before).min(self.seats_per_row)
    }

    pub fn section_of(&self, row: u32) -> CabinSection {
        if row <= self.business_rows() {
            CabinSection::Business
        } else {
            CabinSection::Economy
        }
    }

    /// Block index (0-based) holding the given column index
    pub fn block_of(&self, column_index: u32) -> usize {
        let mut upper = 0;
        for (idx, size) in self.blocks.iter().enumerate() {
            upper += size;
            if column_index < upper {
                return idx;
            }
        }
        self.blocks.len().saturating_sub(1)
    }

    /// Whether an aisle follows the given column index
    pub fn aisle_after(&self, column_index: u32) -> bool {
        let mut upper = 0;
        for size in &self.blocks[..self.blocks.len().saturating_sub(1)] {
            upper += size;
            if column_index + 1 == upper {
                return true;
            }
        }
        false
    }

    pub fn column_letter(column_index: u32) -> char {
        char::from_u32('A' as u32 + column_index).unwrap_or('?')
    }

    pub fn contains(&self, seat: &SeatIdentifier) -> bool {
        seat.column.is_ascii_uppercase() && seat.column_index() < self.row_len(seat.row)
    }

    /// All seats of `row`, in column order
    pub fn row_seats(&self, row: u32) -> Vec<SeatIdentifier> {
        (0..self.row_len(row))
            .map(|idx| SeatIdentifier::new(row, Self::column_letter(idx)))
            .collect()
    }

    /// All seats in row-major order
    pub fn seats(&self) -> impl Iterator<Item = SeatIdentifier> + '_ {
        (1..=self.row_count()).flat_map(move |row| self.row_seats(row))
    }

    /// Rows belonging to a cabin section, ascending
    pub fn section_rows(&self, section: CabinSection) -> std::ops::RangeInclusive<u32> {
        match section {
            CabinSection::Business => 1..=self.business_rows(),
            CabinSection::Economy => (self.business_rows() + 1)..=self.row_count(),
        }
    }

    pub fn section_capacity(&self, section: CabinSection) -> u32 {
        self.section_rows(section).map(|row| self.row_len(row)).sum()
    }
}

// ==========================================
// SeatAssignment
// ==========================================
// Serialized on each roster passenger as `seatNumber` + `seatStatus`,
// seatNumber is null (never omitted) when no seat is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "SeatAssignmentRepr", try_from = "SeatAssignmentRepr")]
pub enum SeatAssignment {
    Assigned(SeatIdentifier),
    /// No seat could be allocated under capacity constraints
    Unassigned,
    /// Infant carried on the parent's seat
    LapInfant,
}

impl SeatAssignment {
    pub fn seat(&self) -> Option<SeatIdentifier> {
        match self {
            SeatAssignment::Assigned(seat) => Some(*seat),
            _ => None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, SeatAssignment::Unassigned)
    }

    pub fn status(&self) -> SeatStatus {
        match self {
            SeatAssignment::Assigned(_) => SeatStatus::Assigned,
            SeatAssignment::Unassigned => SeatStatus::Unassigned,
            SeatAssignment::LapInfant => SeatStatus::LapInfant,
        }
    }
}

impl fmt::Display for SeatAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatAssignment::Assigned(seat) => write!(f, "{}", seat),
            SeatAssignment::Unassigned => write!(f, "UNASSIGNED"),
            SeatAssignment::LapInfant => write!(f, "LAP"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Assigned,
    Unassigned,
    LapInfant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignmentRepr {
    seat_number: Option<SeatIdentifier>,
    seat_status: SeatStatus,
}

impl From<SeatAssignment> for SeatAssignmentRepr {
    fn from(assignment: SeatAssignment) -> Self {
        Self {
            seat_number: assignment.seat(),
            seat_status: assignment.status(),
        }
    }
}

impl TryFrom<SeatAssignmentRepr> for SeatAssignment {
    type Error = String;

    fn try_from(repr: SeatAssignmentRepr) -> Result<Self, Self::Error> {
        match (repr.seat_status, repr.seat_number) {
            (SeatStatus::Assigned, Some(seat)) => Ok(SeatAssignment::Assigned(seat)),
            (SeatStatus::Assigned, None) => Err("seatStatus=assigned requires seatNumber".to_string()),
            (SeatStatus::Unassigned, _) => Ok(SeatAssignment::Unassigned),
            (SeatStatus::LapInfant, _) => Ok(SeatAssignment::LapInfant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_identifier_parse_and_display() {
        let seat: SeatIdentifier = "12f".parse().unwrap();
        assert_eq!(seat, SeatIdentifier::new(12, 'F'));
        assert_eq!(seat.to_string(), "12F");
        assert_eq!(seat.column_index(), 5);

        assert!("F12".parse::<SeatIdentifier>().is_err());
        assert!("0A".parse::<SeatIdentifier>().is_err());
        assert!("".parse::<SeatIdentifier>().is_err());
    }

    #[test]
    fn test_seat_identifier_row_digits_only() {
        assert_eq!(
            "+3A".parse::<SeatIdentifier>(),
            Err(LayoutError::InvalidSeat("+3A".to_string()))
        );
        assert!("A".parse::<SeatIdentifier>().is_err());
        assert!("3 A".parse::<SeatIdentifier>().is_err());
        assert_eq!(" 03a ".parse::<SeatIdentifier>().unwrap(), SeatIdentifier::new(3, 'A'));
    }

    #[test]
    fn test_seat_identifier_row_major_order() {
        let mut seats = vec![
            SeatIdentifier::new(2, 'A'),
            SeatIdentifier::new(1, 'C'),
            SeatIdentifier::new(1, 'A'),
        ];
        seats.sort();
        assert_eq!(
            seats.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            vec!["1A", "1C", "2A"]
        );
    }

    #[test]
    fn test_layout_3_4_3() {
        let layout = CabinLayout::parse("3-4-3", 396, 4).unwrap();
        assert_eq!(layout.seats_per_row(), 10);
        assert_eq!(layout.row_count(), 40);
        assert_eq!(layout.row_len(40), 6);
        assert_eq!(layout.seats().count(), 396);
        assert_eq!(layout.block_of(0), 0);
        assert_eq!(layout.block_of(3), 1);
        assert_eq!(layout.block_of(7), 2);
        assert!(layout.aisle_after(2));
        assert!(layout.aisle_after(6));
        assert!(!layout.aisle_after(9));
        assert_eq!(layout.section_of(4), CabinSection::Business);
        assert_eq!(layout.section_of(5), CabinSection::Economy);
        assert_eq!(layout.section_capacity(CabinSection::Business), 40);
        assert_eq!(layout.section_capacity(CabinSection::Economy), 356);
        assert!(layout.contains(&SeatIdentifier::new(40, 'F')));
        assert!(!layout.contains(&SeatIdentifier::new(40, 'G')));
        assert!(!layout.contains(&SeatIdentifier::new(41, 'A')));
    }

    #[test]
    fn test_layout_rejects_bad_plans() {
        assert!(CabinLayout::parse("", 10, 0).is_err());
        assert!(CabinLayout::parse("3-0-3", 10, 0).is_err());
        assert!(CabinLayout::parse("3-x", 10, 0).is_err());
        assert_eq!(
            CabinLayout::parse("10-10-10", 30, 0),
            Err(LayoutError::TooManyColumns(30))
        );
        assert_eq!(CabinLayout::parse("3-3", 0, 0), Err(LayoutError::NoSeats));
    }

    #[test]
    fn test_seat_assignment_serde_shape() {
        let assigned = SeatAssignment::Assigned(SeatIdentifier::new(3, 'B'));
        let json = serde_json::to_value(assigned).unwrap();
        assert_eq!(json["seatNumber"], "3B");
        assert_eq!(json["seatStatus"], "assigned");

        let json = serde_json::to_value(SeatAssignment::Unassigned).unwrap();
        assert!(json.get("seatNumber").unwrap().is_null());
        assert_eq!(json["seatStatus"], "unassigned");

        let back: SeatAssignment = serde_json::from_value(serde_json::json!({
            "seatNumber": null,
            "seatStatus": "lap_infant"
        }))
        .unwrap();
        assert_eq!(back, SeatAssignment::LapInfant);
    }
}
