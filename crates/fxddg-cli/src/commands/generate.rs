use crate::cli::GenerateArgs;
use crate::config::PartialRequestConfig;
use crate::error::Result;
use foldxddg::workflows::generate;
use tracing::info;

pub fn run(args: GenerateArgs) -> Result<()> {
    let partial = match &args.config {
        Some(path) => PartialRequestConfig::from_file(path)?,
        None => PartialRequestConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial.merge_with_cli(&args)?;

    info!("Generating request files from {:?}", &args.input);
    let summary = generate::run(&args.input, &config)?;

    println!(
        "✓ Wrote {} request file(s) and {} wild-type append(s) for {} gene(s) to: {}",
        summary.requests_written,
        summary.wild_type_appends,
        summary.genes.len(),
        config.output_dir.display()
    );
    if summary.skipped_rows > 0 {
        println!(
            "  {} row(s) were skipped; re-run with -v for details.",
            summary.skipped_rows
        );
    }
    Ok(())
}
