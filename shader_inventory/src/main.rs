use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use shader_inventory::{
    aggregate::{aggregate_by_shader, print_top_shaders},
    report::{
        read_shader_report, write_csv, MATERIAL_USAGE, SHADER_AGGREGATE, SHADER_REPORT,
    },
    resolve::GuidResolver,
    scan::scan_materials,
    usage::{count_usages, print_top_usages, prioritized_materials},
};

/// The number of rows shown in the console summaries.
const SUMMARY_SIZE: usize = 20;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shader referenced by each .mat file in the Assets folder.
    Scan {
        /// The Unity project folder containing the Assets folder.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// The output CSV file. Defaults to shader_report.csv in the project folder.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Read all .meta files once instead of searching the project again for each material.
        #[arg(long)]
        cache_meta: bool,
    },
    /// Count the materials using each shader from the scan report.
    Aggregate {
        /// The Unity project folder.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// The scan report. Defaults to shader_report.csv in the project folder.
        #[arg(long)]
        input: Option<PathBuf>,
        /// The output CSV file. Defaults to shader_aggregate.csv in the project folder.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Count references to each material in the scan report
    /// by searching content files for the material's GUID.
    Usage {
        /// The Unity project folder containing the Assets folder.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// The scan report. Defaults to shader_report.csv in the project folder.
        #[arg(long)]
        input: Option<PathBuf>,
        /// The output CSV file. Defaults to material_usage_by_guid.csv in the project folder.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also list materials that aren't referenced by any file.
        #[arg(long)]
        include_unreferenced: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let start = std::time::Instant::now();

    if let Err(e) = run(cli.command) {
        println!("{e:?}");
        std::process::exit(1);
    }

    println!("Finished in {:?}", start.elapsed());
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Scan {
            root,
            output,
            cache_meta,
        } => scan(&root, output, cache_meta),
        Commands::Aggregate {
            root,
            input,
            output,
        } => aggregate(&root, input, output),
        Commands::Usage {
            root,
            input,
            output,
            include_unreferenced,
        } => usage(&root, input, output, include_unreferenced),
    }
}

fn scan(root: &Path, output: Option<PathBuf>, cache_meta: bool) -> anyhow::Result<()> {
    let resolver = if cache_meta {
        GuidResolver::indexed(root).context("failed to index .meta files")?
    } else {
        GuidResolver::tree_search(root)
    };

    let records = scan_materials(root, &resolver)?;

    let output = output.unwrap_or_else(|| root.join(SHADER_REPORT));
    write_csv(&output, &records).with_context(|| format!("failed to write {output:?}"))?;
    println!("Report written to {output:?}");

    println!();
    print_top_shaders(&aggregate_by_shader(&records), SUMMARY_SIZE);
    Ok(())
}

fn aggregate(root: &Path, input: Option<PathBuf>, output: Option<PathBuf>) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| root.join(SHADER_REPORT));
    let records = read_shader_report(&input)?;

    let aggregates = aggregate_by_shader(&records);

    let output = output.unwrap_or_else(|| root.join(SHADER_AGGREGATE));
    write_csv(&output, &aggregates).with_context(|| format!("failed to write {output:?}"))?;
    println!("Wrote {output:?}");
    Ok(())
}

fn usage(
    root: &Path,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    include_unreferenced: bool,
) -> anyhow::Result<()> {
    let input = input.unwrap_or_else(|| root.join(SHADER_REPORT));
    let records = read_shader_report(&input)?;

    let candidates = prioritized_materials(root, &records);
    let usages = count_usages(root, &candidates, include_unreferenced)?;

    let output = output.unwrap_or_else(|| root.join(MATERIAL_USAGE));
    write_csv(&output, &usages).with_context(|| format!("failed to write {output:?}"))?;
    println!("Wrote {output:?}");

    print_top_usages(&usages, SUMMARY_SIZE);
    Ok(())
}
