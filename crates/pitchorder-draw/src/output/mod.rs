pub mod csv;

pub use self::csv::write_sequence_csv;
