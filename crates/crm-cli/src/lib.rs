//! CLI library components for the CRM importer.

pub mod logging;
