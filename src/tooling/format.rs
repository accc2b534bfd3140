//! Text and JSON rendering for CLI command results.

use crate::agent::commands::{
    AgentListResult, AgentShowResult, AgentStatusEntry, AgentToolsResult, ValidationResult,
};
use crate::error::ApiError;
use crate::session::{SessionSummary, StoredMessage};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON output: {}", e)))
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

pub fn format_agent_list_text(result: &AgentListResult) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Agents"));
    if result.agents.is_empty() {
        out.push_str("No agents registered.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Display name", "Enabled", "Description"]);
    for agent in &result.agents {
        table.add_row(vec![
            agent.name.clone(),
            agent.display_name.clone(),
            yes_no(agent.enabled).to_string(),
            agent.description.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\nTotal: {} agent(s)\n", table, result.agents.len()));
    out
}

pub fn format_agent_list_json(result: &AgentListResult) -> Result<String, ApiError> {
    to_json(&json!({ "agents": result.agents, "total": result.agents.len() }))
}

pub fn format_agent_show_text(result: &AgentShowResult) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&result.display_name));
    out.push_str(&format!("Name: {}\n", result.name));
    out.push_str(&format!("Description: {}\n", result.description));
    out.push_str(&format!("Source: {}\n", result.source));
    out.push_str(&format!("Enabled: {}\n", yes_no(result.enabled)));
    out.push_str(&format!(
        "Model: {}\n",
        result.model.as_deref().unwrap_or("(runtime default)")
    ));
    out.push_str(&format!("Tools: {}\n", result.tools.join(", ")));
    if let Some(prompt) = &result.prompt {
        out.push_str(&format!("\n{}\n\n", format_section_heading("Prompt")));
        out.push_str(prompt);
        out.push('\n');
    }
    out
}

pub fn format_agent_tools_text(result: &AgentToolsResult) -> String {
    let mut out = format!("Tools for {}:\n", result.name);
    for tool in &result.tools {
        out.push_str(&format!("  {}\n", tool));
    }
    out
}

pub fn format_validation_result(result: &ValidationResult, verbose: bool) -> String {
    let mut out = format!("Validating agent: {}\n\n", result.name);
    for (description, passed) in &result.checks {
        if *passed {
            if verbose {
                out.push_str(&format!("  {} {}\n", "ok".green(), description));
            }
        } else {
            out.push_str(&format!("  {} {}\n", "fail".red(), description));
        }
    }
    for error in &result.errors {
        out.push_str(&format!("  {}\n", error));
    }

    let passed = result.checks.iter().filter(|(_, passed)| *passed).count();
    if result.is_valid() {
        out.push_str(&format!(
            "\nValidation passed: {}/{} checks\n",
            passed,
            result.checks.len()
        ));
    } else {
        out.push_str(&format!(
            "\nValidation failed: {} error(s) found\n",
            result.errors.len().max(result.checks.len() - passed)
        ));
    }
    out
}

pub fn format_validation_results_all(results: &[ValidationResult], verbose: bool) -> String {
    let mut out = String::from("Validating all agents:\n\n");
    let valid_count = results.iter().filter(|r| r.is_valid()).count();
    for result in results {
        if result.is_valid() {
            out.push_str(&format!("  {}: Valid\n", result.name));
            continue;
        }
        out.push_str(&format!("  {}: Validation failed\n", result.name));
        if verbose {
            for (description, passed) in &result.checks {
                if !passed {
                    out.push_str(&format!("    {}\n", description));
                }
            }
            for error in &result.errors {
                out.push_str(&format!("    {}\n", error));
            }
        }
    }
    out.push_str(&format!(
        "\nSummary: {} valid, {} invalid (out of {} total)\n",
        valid_count,
        results.len() - valid_count,
        results.len()
    ));
    out
}

pub fn format_agent_status_text(entries: &[AgentStatusEntry]) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Agents"));
    if entries.is_empty() {
        out.push_str("No agents registered.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Agent", "Source", "Enabled", "Model", "Tools", "Unhandled"]);
    for row in entries {
        table.add_row(vec![
            row.name.clone(),
            row.source.clone(),
            yes_no(row.enabled).to_string(),
            row.model.clone().unwrap_or_else(|| "-".to_string()),
            row.tool_count.to_string(),
            row.unhandled_tools.len().to_string(),
        ]);
    }
    let enabled = entries.iter().filter(|e| e.enabled).count();
    out.push_str(&format!(
        "{}\n\nTotal: {} agents, {} enabled.\n",
        table,
        entries.len(),
        enabled
    ));
    out
}

pub fn format_session_list_text(sessions: &[SessionSummary]) -> String {
    if sessions.is_empty() {
        return "No stored sessions.\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Session", "Agent", "Messages", "Auto-saved", "Updated"]);
    for session in sessions {
        table.add_row(vec![
            session.session_id.clone(),
            session.agent_name.clone(),
            session.message_count.to_string(),
            yes_no(session.auto_saved).to_string(),
            session.updated_at.to_rfc3339(),
        ]);
    }
    format!("{}\n", table)
}

pub fn format_session_messages_text(session_id: &str, messages: &[StoredMessage]) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&format!("Session {}", session_id)));
    if messages.is_empty() {
        out.push_str("No messages.\n");
        return out;
    }
    for message in messages {
        let role = serde_json::to_value(message.role)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        out.push_str(&format!(
            "[{}] {}: {}\n",
            message.timestamp.to_rfc3339(),
            role.bold(),
            message.content
        ));
    }
    out
}
