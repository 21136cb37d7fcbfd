use crossterm::style::Stylize;
use lrcput::batch::BatchOutcome;

pub fn print_summary(outcome: &BatchOutcome) {
    println!(
        "Total: {}, Embedded: {}, Skipped: {}, Failed: {} ({:.1}% embedded)",
        outcome.total,
        outcome.embedded,
        outcome.skipped,
        outcome.failed.len(),
        outcome.embedded_percentage()
    );

    if outcome.deferred > 0 {
        println!(
            "Manual: {} of {} resolved",
            outcome.resolved, outcome.deferred
        );
    }

    for path in &outcome.converted {
        println!("{} {}", "converted:".cyan(), path.display());
    }

    if !outcome.failed.is_empty() {
        println!("{}", "Failed:".red().bold());
        for name in &outcome.failed {
            println!("  {}", name.as_str().red());
        }
    }

    if !outcome.unresolved.is_empty() {
        println!("{}", "Unresolved:".yellow().bold());
        for name in &outcome.unresolved {
            println!("  {}", name.as_str().yellow());
        }
    }
}
