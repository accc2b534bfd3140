pub mod support;

mod controller_sessions;
mod delegation_scenarios;
mod directory_properties;
