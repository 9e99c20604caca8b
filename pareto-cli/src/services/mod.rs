//! Business logic kept free of storage and spreadsheet I/O

pub mod analysis;
