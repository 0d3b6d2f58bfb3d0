//! Output formatting for CLI responses.

use twin_protocol::mcp::tools::ToolDescriptor;
use twin_types::TwinRecord;

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

/// One line per tool: name, padded, then description.
pub fn tool_line(tool: &ToolDescriptor) -> String {
    format!("{:<16} {}", tool.name, tool.description)
}

/// One line per record.
pub fn record_line(record: &TwinRecord) -> String {
    let p = &record.profile;
    format!(
        "{} [{}] {} {} <{}> {} created {}",
        record.id,
        record.country_id,
        p.first_name,
        p.last_name,
        p.email,
        p.telephone_number,
        record.created_at.to_rfc3339()
    )
}
