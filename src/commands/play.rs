//! Play command handler

use anyhow::{Context, Result};

use cueplay::cli::PlayArgs;
use cueplay::player::{play_playlist, PlayerOptions};
use cueplay::schedule::SystemClock;
use cueplay::timecode::{format_time, parse_time};
use cueplay::{current_theme, Config};

/// Run the interactive player.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: &Config) -> Result<()> {
    let target = args.target.unwrap_or(config.player.target_time);
    let milestone = match &args.milestone {
        Some(input) => parse_time(input)
            .with_context(|| format!("Invalid --milestone '{}'", input))? as f64,
        None => config.player.milestone_seconds()?,
    };

    let mut player = super::build_player(&args.playlist, config, target)?;
    let options = PlayerOptions {
        seek_step: config.player.seek_step_secs,
        milestone,
    };

    let result = play_playlist(&mut player, &options, &SystemClock)?;

    let theme = current_theme();
    if let Some(name) = &result.last_entry {
        println!("{}", theme.primary_text(&format!("Stopped at {}", name)));
    }
    println!(
        "{}",
        theme.secondary_text(&format!(
            "Target {} · last start offset {}",
            result.target,
            format_time(result.computed_start_offset)
        ))
    );
    Ok(())
}
