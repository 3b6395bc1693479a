// ==========================================
// Flight Roster - Demo data generator
// ==========================================

pub mod passenger_generator;

pub use passenger_generator::PassengerGenerator;
