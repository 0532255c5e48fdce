//! Offset command handler
//!
//! Prints where to start the first video so the second begins at the target
//! time, without opening the player.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime, NaiveTime};
use serde::Serialize;

use cueplay::cli::OffsetArgs;
use cueplay::schedule::{synchronized_start_offset, Clock, FixedClock, SystemClock};
use cueplay::timecode::{format_time, parse_duration};
use cueplay::{current_theme, Config, SyncPlan, TimeOfDay};

/// JSON shape of the offset report.
#[derive(Debug, Serialize)]
pub struct OffsetReport {
    pub target: TimeOfDay,
    pub now: NaiveDateTime,
    pub target_instant: NaiveDateTime,
    pub delta_seconds: f64,
    pub lead_in_seconds: f64,
    pub start_offset_seconds: f64,
    pub start_offset: String,
    pub finishes_early: bool,
    pub early_by_seconds: f64,
    pub tomorrow: bool,
}

impl OffsetReport {
    fn new(target: TimeOfDay, now: NaiveDateTime, plan: &SyncPlan) -> Self {
        Self {
            target,
            now,
            target_instant: plan.target_instant,
            delta_seconds: plan.delta_seconds,
            lead_in_seconds: plan.lead_in_seconds,
            start_offset_seconds: plan.start_offset_seconds,
            start_offset: format_time(plan.start_offset_seconds),
            finishes_early: plan.finishes_early(),
            early_by_seconds: plan.early_by_seconds(),
            tomorrow: plan.is_tomorrow(now),
        }
    }
}

/// Parse `HH:MM` or `HH:MM:SS` as a time today.
fn parse_now(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    let time = NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .with_context(|| format!("Invalid --now '{}', expected HH:MM or HH:MM:SS", input))?;
    Ok(Local::now().date_naive().and_time(time))
}

/// Print the synchronized start offset.
pub fn handle(args: &OffsetArgs, config: &Config) -> Result<()> {
    let target = args.target.unwrap_or(config.player.target_time);
    let clock: Box<dyn Clock> = match &args.now {
        Some(input) => Box::new(FixedClock(parse_now(input)?)),
        None => Box::new(SystemClock),
    };

    let lead_in = match &args.lead_in {
        Some(input) => {
            parse_duration(input).with_context(|| format!("Invalid --lead-in '{}'", input))?
        }
        None => {
            let player = super::build_player(&args.playlist, config, target)?;
            let Some(first) = player.playlist().get(0) else {
                bail!("The playlist is empty; pass files or --lead-in");
            };
            if !first.has_duration() {
                eprintln!(
                    "{}",
                    current_theme().error_text(&format!(
                        "Duration of {} is unknown; pass --duration or --lead-in",
                        first.display_name
                    ))
                );
            }
            first.duration_seconds
        }
    };

    let now = clock.now();
    let plan = synchronized_start_offset(target, now, lead_in);
    let report = OffsetReport::new(target, now, &plan);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn print_report(report: &OffsetReport) {
    let theme = current_theme();
    let day = if report.tomorrow { " tomorrow" } else { "" };

    println!(
        "Start video 1 at {} so video 2 begins at {}{}.",
        theme.accent_text(&report.start_offset),
        report.target,
        day
    );
    println!(
        "{}",
        theme.secondary_text(&format!(
            "Now {}, target in {}, lead-in {}",
            report.now.format("%H:%M:%S"),
            format_time(report.delta_seconds),
            format_time(report.lead_in_seconds)
        ))
    );
    if report.finishes_early {
        println!(
            "{}",
            theme.error_text(&format!(
                "The lead-in ends {} before the target time.",
                format_time(report.early_by_seconds)
            ))
        );
    }
}
