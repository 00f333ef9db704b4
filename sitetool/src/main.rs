use anyhow::Context;
use clap::Parser;
use generator::catalog::{build_catalog_json, CatalogSpec};
use gnsscore::catalog::parse_site_collection;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::JobConfig;
use workflow::runner::ManifestRunner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the GNSS site catalog")]
struct Args {
    /// Site catalog GeoJSON file to build a plot manifest from
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Load a manifest job config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Plot family for the manifest (displacement or multipath)
    #[arg(long, default_value = "displacement")]
    plot_type: String,
    /// Generate a synthetic catalog with this many sites instead
    #[arg(long)]
    generate: Option<usize>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output path for the generated catalog or manifest
    #[arg(long)]
    out: Option<PathBuf>,
    /// Append a one-line run summary to this report file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(count) = args.generate {
        let spec = CatalogSpec {
            count,
            seed: args.seed,
            ..Default::default()
        };
        let body = build_catalog_json(&spec)?;
        match &args.out {
            Some(path) => {
                fs::write(path, &body)
                    .with_context(|| format!("writing catalog {}", path.display()))?;
                println!("wrote {} synthetic sites to {}", count, path.display());
            }
            None => println!("{body}"),
        }
        return Ok(());
    }

    let catalog_path = args
        .catalog
        .context("either --catalog or --generate is required")?;
    let body = fs::read_to_string(&catalog_path)
        .with_context(|| format!("reading catalog {}", catalog_path.display()))?;
    let sites = parse_site_collection(&body)
        .with_context(|| format!("parsing catalog {}", catalog_path.display()))?;
    log::info!("parsed {} sites from {}", sites.len(), catalog_path.display());

    let config = if let Some(path) = args.workflow {
        JobConfig::load(path)?
    } else {
        JobConfig::from_plot_type(&args.plot_type)?
    };

    let runner = ManifestRunner::new(config);
    let manifest = runner.execute(&sites);

    println!(
        "Manifest -> {} sites, {} image urls, plot family {}",
        manifest.entries.len(),
        manifest.total_images,
        runner.config().plot_kind.label()
    );

    if let Some(out) = &args.out {
        let rendered =
            serde_json::to_string_pretty(&manifest).context("serialising manifest")?;
        fs::write(out, rendered).with_context(|| format!("writing manifest {}", out.display()))?;
    }

    if let Some(report_path) = &args.report {
        let line = format!(
            "catalog={} sites={} images={} family={}\n",
            catalog_path.display(),
            manifest.entries.len(),
            manifest.total_images,
            runner.config().plot_kind.label()
        );
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(line.as_bytes())?;
    }

    Ok(())
}
