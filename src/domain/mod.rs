// Domain layer - Core types and pure rules, no I/O
pub mod alerts;
pub mod dashboard;
pub mod reading;
pub mod sensor;
pub mod snapshot;
pub mod telemetry;
