use crate::cli::InspectArgs;
use crate::error::Result;
use foldxddg::workflows::inspect;
use tracing::info;

const ENERGY_LINE_SAMPLES: usize = 3;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Inspecting FoldX output under {:?}", &args.results);
    let reports = inspect::run(&args.results)?;

    println!(
        "Found {} .fxout file(s) under {}",
        reports.len(),
        args.results.display()
    );
    for report in &reports {
        println!("\n--- {} ---", report.path.display());
        println!("Total lines: {}", report.total_lines);
        for (number, line) in report.preview.iter().enumerate() {
            println!("  {:2}: {}", number + 1, line);
        }
        println!("Lines with energy values: {}", report.energy_lines.len());
        for line in report.energy_lines.iter().take(ENERGY_LINE_SAMPLES) {
            println!("  {line}");
        }
    }
    Ok(())
}
