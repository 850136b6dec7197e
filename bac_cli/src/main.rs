use bac_core::*;
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bac-sim")]
#[command(about = "Educational blood alcohol concentration simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate at this instant (RFC 3339) instead of now
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Current BAC, impairment and projections for a scenario
    Report {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,
    },

    /// BAC sampled every 5 minutes
    Timeline {
        /// Scenario JSON file
        #[arg(long)]
        scenario: PathBuf,

        /// Window length in hours (default from config)
        #[arg(long)]
        hours: Option<i64>,

        /// Start at scenario start instead of the evaluation instant
        #[arg(long)]
        from_start: bool,
    },

    /// Show the impairment scale
    Tiers,

    /// Show standard drinks and food categories
    Catalog,
}

fn main() -> Result<()> {
    bac_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let now = cli.at.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::Report { scenario } => cmd_report(&scenario, now, &config),
        Commands::Timeline {
            scenario,
            hours,
            from_start,
        } => cmd_timeline(&scenario, now, hours, from_start, &config),
        Commands::Tiers => cmd_tiers(),
        Commands::Catalog => cmd_catalog(),
    }
}

fn load_simulator(path: &Path, now: DateTime<Utc>, config: &Config) -> Result<Simulator> {
    let catalog_errors = get_default_catalog().validate();
    if !catalog_errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in catalog_errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let default_profile = config.profile.to_profile()?;
    ScenarioFile::load(path)?.into_simulator(default_profile, now)
}

fn cmd_report(path: &Path, now: DateTime<Utc>, config: &Config) -> Result<()> {
    let sim = load_simulator(path, now, config)?;

    let bac = sim.bac_at(now);
    let tier = impairment_level(bac);
    let peak = sim.peak_bac(now);
    let threshold = config.timeline.sobriety_threshold;
    let sober_at = sim.start_time() + sim.time_to_sobriety(now, threshold);
    let limit_at = sim.time_to_legal_limit(now).map(|d| sim.start_time() + d);
    let legal_at = sim.time_when_legal(now);
    let elapsed = now - sim.start_time();

    print_header("BAC REPORT");
    println!("  Current BAC: {:.4}%", bac);
    println!("  Status: {}", tier.level);
    println!("  Description: {}", tier.description);
    println!("  Fitness to drive: {}", tier.fitness_to_drive);
    println!("  Legal status: {}", tier.legal_status);
    println!();
    println!("  Peak BAC: {:.4}% at {}", peak.bac, format_instant(peak.time));
    if sim.bac_at(sober_at) > threshold {
        println!("  Sober at: not within 24h");
    } else if sober_at <= now {
        println!("  Sober: now");
    } else {
        println!(
            "  Sober at: {} (in {})",
            format_instant(sober_at),
            format_duration(sober_at - now)
        );
    }
    match limit_at {
        Some(t) => println!("  Legal limit reached at: {}", format_instant(t)),
        None => println!("  Legal limit: not reached in the next 6h"),
    }
    match legal_at {
        Some(t) => println!(
            "  Legal to drive at: {} (in {})",
            format_instant(t),
            format_duration(t - now)
        ),
        None if bac < catalog::LEGAL_LIMIT => println!("  Legal to drive: below 0.08% now"),
        None => println!("  Legal to drive: not within 24h"),
    }
    println!(
        "  Hours since start: {:.1}",
        elapsed.num_minutes() as f64 / 60.0
    );

    if bac >= 0.15 {
        println!("\n  ⚠ CRITICAL: enhanced DUI level (0.15%+)");
    } else if bac >= catalog::LEGAL_LIMIT {
        println!("\n  ⚠ WARNING: at or above the 0.08% legal limit");
    } else if bac > 0.0 {
        println!("\n  ✓ Below legal limit (0.08%) but impaired");
    }

    print_history(&sim);
    println!();
    println!("  Educational estimate only. Never use it to decide whether to drive.");
    Ok(())
}

fn cmd_timeline(
    path: &Path,
    now: DateTime<Utc>,
    hours: Option<i64>,
    from_start: bool,
    config: &Config,
) -> Result<()> {
    let sim = load_simulator(path, now, config)?;
    let hours = hours.unwrap_or(config.timeline.hours);
    if hours <= 0 || hours > timeline::MAX_WINDOW_HOURS {
        return Err(Error::Other(format!(
            "hours must be between 1 and {}, got {}",
            timeline::MAX_WINDOW_HOURS,
            hours
        )));
    }

    let anchor = if from_start {
        TimelineAnchor::ScenarioStart
    } else {
        TimelineAnchor::Now(now)
    };

    print_header("BAC TIMELINE");
    for point in sim.timeline(hours, anchor) {
        println!(
            "  {}  {:.4}%  {}",
            point.time.format("%Y-%m-%d %H:%M"),
            point.bac,
            impairment_level(point.bac).level
        );
    }
    Ok(())
}

fn cmd_tiers() -> Result<()> {
    print_header("IMPAIRMENT LEVELS");
    for tier in &get_default_catalog().tiers {
        println!(
            "  ≥ {:.2}%  {:<24} drive: {:<8} {}",
            tier.threshold, tier.level, tier.fitness_to_drive, tier.legal_status
        );
    }
    Ok(())
}

fn cmd_catalog() -> Result<()> {
    let catalog = get_default_catalog();

    print_header("STANDARD DRINKS");
    for kind in DrinkKind::STANDARD {
        let drink = catalog.drink(kind);
        println!(
            "  {:<16} {:<16} {:>5.1} oz  {:>5.1}%",
            kind.as_str(),
            drink.name,
            drink.size_oz,
            drink.alcohol_percent
        );
    }

    print_header("FOOD");
    for kind in FoodKind::ALL {
        let food = catalog.food(kind);
        println!(
            "  {:<16} {:<20} half-time {:>3.0} min  peak -{:.0}%",
            kind.as_str(),
            food.name,
            food.gastric_half_time_min,
            food.peak_reduction * 100.0
        );
    }
    Ok(())
}

fn print_header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
}

fn print_history(sim: &Simulator) {
    if sim.ledger().is_empty() {
        return;
    }

    println!();
    println!("─────────────────────────────────────────");
    println!("CONSUMPTION HISTORY");
    println!("─────────────────────────────────────────");

    if !sim.foods().is_empty() {
        println!("\n  Food:");
        for food in sim.foods() {
            println!(
                "    • {} - {}",
                food.time.format("%H:%M"),
                food.kind.profile().name
            );
        }
    }

    if !sim.drinks().is_empty() {
        println!("\n  Drinks:");
        for (i, drink) in sim.drinks().iter().enumerate() {
            println!(
                "    {}. {} - {:.1}oz {} ({:.1}%) [{:.2}oz alcohol, {:.1} std]",
                i + 1,
                drink.time.format("%H:%M"),
                drink.size_oz,
                drink.kind.standard().name,
                drink.alcohol_percent,
                drink.alcohol_oz(),
                drink.standard_drinks()
            );
        }
    }
}

fn format_instant(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Hours and minutes; negative durations show as "0m"
fn format_duration(d: Duration) -> String {
    let total = d.num_minutes().max(0);
    let (hours, minutes) = (total / 60, total % 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(385)), "6h 25m");
        assert_eq!(format_duration(Duration::minutes(45)), "45m");
        assert_eq!(format_duration(Duration::zero()), "0m");
        assert_eq!(format_duration(Duration::minutes(-60)), "0m");
        assert_eq!(format_duration(Duration::hours(-3)), "0m");
    }
}
