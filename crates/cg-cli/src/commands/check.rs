use std::fs;
use std::path::Path;

use cg_core::TerminalScenario;
use cg_session::ProviderError;
use cg_session::provider::directory::scan;
use colored::Colorize;

pub fn run(dir: &Path) -> Result<(), String> {
    let files = scan(dir).map_err(|e| format!("cannot read {}: {e}", dir.display()))?;
    if files.is_empty() {
        return Err(format!("no level_<N>.json files in {}", dir.display()));
    }

    let mut failures = 0;
    for (level, path) in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load(*level, path) {
            Ok(scenario) => println!(
                "  {} {name}: level {level}, \"{}\", {} files",
                "ok".green(),
                scenario.title,
                scenario.file_system.len()
            ),
            Err(e) => {
                failures += 1;
                println!("  {} {name}: {e}", "FAIL".red().bold());
            }
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} scenario files failed validation",
            files.len()
        ));
    }
    println!("  All {} scenario files passed.", files.len());
    Ok(())
}

fn load(level: u32, path: &Path) -> Result<TerminalScenario, ProviderError> {
    let json = fs::read_to_string(path)?;
    TerminalScenario::from_generated_json(level, &json).map_err(ProviderError::from)
}
