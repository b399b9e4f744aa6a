use crate::cli::ConvertArgs;
use crate::error::Result;
use foldxddg::workflows::convert;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    info!("Converting {:?} to clean CSV", &args.input);
    let summary = convert::run(&args.input, &args.output)?;

    println!(
        "✓ {} data row(s) across {} column(s) written to: {}",
        summary.data_rows,
        summary.columns,
        args.output.display()
    );
    Ok(())
}
