//! Scenario tests over the bundled reference data.

mod fixer_scenarios;
mod oracle_scenarios;
