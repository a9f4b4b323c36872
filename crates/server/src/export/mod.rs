//! Report export utilities.

pub mod csv;

pub use csv::CsvDocument;
