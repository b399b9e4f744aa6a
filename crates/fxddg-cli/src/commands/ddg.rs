use crate::cli::DdgArgs;
use crate::error::Result;
use foldxddg::workflows::ddg;
use tracing::info;

pub fn run(args: DdgArgs) -> Result<()> {
    info!(
        "Computing ddG from results under {:?} for scan {:?}",
        &args.results, &args.input
    );
    let summary = ddg::run(&args.results, &args.input, &args.output)?;

    println!(
        "✓ ddG computed for {}/{} row(s); results written to: {}",
        summary.computed,
        summary.rows,
        args.output.display()
    );
    if summary.computed < summary.rows {
        println!(
            "  {} row(s) lack a wild-type energy and {} a mutant energy; \
             their ddG cells are empty.",
            summary.missing_wild_type, summary.missing_mutant
        );
    }
    Ok(())
}
