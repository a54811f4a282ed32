//! Academic rules engine for the URR24 undergraduate regulations.
//!
//! Turns marks, attendance and credit records into grades, SGPA/CGPA, attendance compliance
//! and promotion eligibility. All rules are read from an injected [`policy::PolicyTable`].

pub mod config;
pub mod error;
pub mod intake;
pub mod policy;
pub mod report;
pub mod rules;
pub mod telemetry;

pub use policy::{Grade, PolicyTable};
pub use rules::RulesEngine;
