//! Scenario-based tests for shrub

mod helpers;

mod command_validation;
mod document_output;
mod registry_identity;
mod task_group_sequences;
