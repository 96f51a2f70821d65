use cg_core::DifficultyTier;
use cg_session::completion_bonus;
use cg_session::config::DEFAULT_FINAL_LEVEL;
use comfy_table::{ContentArrangement, Table};

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Levels", "Tier", "Artifact", "Points", "Briefing"]);

    for tier in DifficultyTier::ALL {
        let (first, last) = tier.levels();
        let last = last.min(DEFAULT_FINAL_LEVEL);
        table.add_row(vec![
            format!("{first}-{last}"),
            tier.name().to_string(),
            tier.artifact().unwrap_or("-").to_string(),
            format!("{}-{}", completion_bonus(first), completion_bonus(last)),
            tier.briefing().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  Solving level N awards 100 + N * 50 points. Level {DEFAULT_FINAL_LEVEL} ends the campaign."
    );
    Ok(())
}
