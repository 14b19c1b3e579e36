use std::env;

use transmission_sim::config::Settings;
use transmission_sim::stats::CaseStatistics;

fn main() {
    simple_logging::log_to_stderr(log::LevelFilter::Info);

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/settings.yaml".to_string());
    let settings = Settings::read_from_file(&path).expect("Unable to read settings.");
    println!("{settings}");

    let mut outbreak = settings
        .build_outbreak()
        .expect("Unable to build outbreak from settings.");
    let report = outbreak
        .spread(settings.horizon)
        .expect("Outbreak failed to spread.");

    let cases = outbreak.cases();
    println!(
        "{:?} after {} rounds with {} new cases",
        report.termination, report.rounds, report.new_cases
    );
    println!("Cases per generation: {:?}", cases.level_sizes());
    if let Some(r) = cases.mean_offspring() {
        println!("Empirical reproduction number: {r:.3}");
    }
    if let Some((first, last)) = cases.onset_range() {
        println!("Onsets between day {first:.1} and day {last:.1}");
    }
    println!("External cases: {}", outbreak.external_cases().len());
}
