/// Commands every level advertises.
const BASE_COMMANDS: &[&str] = &[
    "Available Commands:",
    "  ls                 - List directory contents",
    "  cat [file]         - Display full file content",
    "  head [file]        - Display first 5 lines",
    "  tail [file]        - Display last 5 lines",
    "  grep [key] [file]  - Search for pattern",
    "  strings [file]     - Extract printable chars (Forensics)",
    "  rev [string]       - Reverse a string (Crypto)",
    "  verify [flag]      - Submit flag to complete level",
];

/// Levels above this advertise `decode base64`.
pub const BASE64_HINT_AFTER: u32 = 5;
/// Levels above this advertise `decode hex`.
pub const HEX_HINT_AFTER: u32 = 20;

/// Help text for `level`.
///
/// Only the advertisement grows with the level: `decode` itself works
/// everywhere.
pub fn help_text(level: u32, is_interactive: bool) -> Vec<String> {
    let mut lines: Vec<String> = BASE_COMMANDS.iter().map(|s| s.to_string()).collect();

    if level > BASE64_HINT_AFTER {
        lines.push("  decode base64 [str] - Decode Base64 string".to_string());
    }
    if level > HEX_HINT_AFTER {
        lines.push("  decode hex [str]    - Decode Hex string".to_string());
    }

    if is_interactive {
        match level {
            2 => lines.push("  login [u] [p]      - Login to portal".to_string()),
            3 => lines.push("  ping [ip]          - Network tool".to_string()),
            _ => {}
        }
    }

    lines
}
