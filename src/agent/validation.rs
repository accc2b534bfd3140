//! Agent definition validation applied at registration.

use crate::agent::descriptor::AgentDescriptor;
use crate::error::ApiError;

/// Validate an agent name: non-empty, lowercase ASCII alphanumerics in hyphen-separated groups.
pub fn validate_agent_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::ConfigError("Agent name cannot be empty".to_string()));
    }

    let well_formed = name
        .split('-')
        .all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        });
    if !well_formed {
        return Err(ApiError::ConfigError(format!(
            "Agent name '{}' must be lowercase and hyphenated (e.g. 'web-searcher')",
            name
        )));
    }

    Ok(())
}

/// Validate the descriptor fields of an agent definition.
pub fn validate_descriptor(descriptor: &AgentDescriptor) -> Result<(), ApiError> {
    validate_agent_name(&descriptor.name)?;

    if descriptor.display_name.trim().is_empty() {
        return Err(ApiError::ConfigError(format!(
            "Agent '{}' requires a display name",
            descriptor.name
        )));
    }

    if descriptor.description.contains('\n') {
        return Err(ApiError::ConfigError(format!(
            "Agent '{}' description must be a single line",
            descriptor.name
        )));
    }

    Ok(())
}
