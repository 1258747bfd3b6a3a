use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;

mod log;
mod model;
mod render;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "client-timing-viz")]
#[command(about = "Inference client timing visualizer", long_about = None)]
struct Cli {
    /// Directory holding the per-machine `.dat` timing logs.
    #[arg(long, default_value = ".")]
    directory: PathBuf,

    /// Lower edge of the client-latency histogram, in milliseconds.
    #[arg(long, default_value_t = 5.0)]
    hmin: f64,

    /// Upper edge of the client-latency histogram, in milliseconds.
    #[arg(long, default_value_t = 200.0)]
    hmax: f64,

    /// Bin count of the client-latency histogram.
    #[arg(long, default_value_t = 40)]
    nbins: usize,

    /// Also write the aggregates as JSON to this path.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.nbins == 0 {
        bail!("--nbins must be at least 1");
    }
    if cli.hmax <= cli.hmin {
        bail!(
            "--hmax ({}) must be greater than --hmin ({})",
            cli.hmax,
            cli.hmin
        );
    }

    // 1) Discover the candidate logs.
    let files = log::scan_directory(&cli.directory)?;

    // 2) Parse each log. Unreadable or truncated files are skipped; a bad
    //    value field on an event line aborts the run.
    let mut logs = Vec::new();
    for path in &files {
        println!("{}", path.display());
        match log::parse_log_file(path) {
            Ok(parsed) => logs.push(parsed),
            Err(err) if !err.is_fatal() => println!("skipping: {}", err),
            Err(err) => return Err(err.into()),
        }
    }

    // 3) Aggregate across machines.
    let agg = model::aggregate(&logs);

    // 4) Render the charts into the input directory.
    if agg.machines == 0 {
        println!("no usable timing logs under {}", cli.directory.display());
    } else {
        let bar = cli.directory.join("event-times.png");
        render::event_times_chart(&bar, &agg.per_event_avg_ms)?;
        println!("Wrote {}", bar.display());

        let lat = cli.directory.join("client-time-hist.png");
        render::latency_histogram(
            &lat,
            &agg.machine_avg_latency_ms,
            cli.hmin,
            cli.hmax,
            cli.nbins,
        )?;
        println!("Wrote {}", lat.display());

        let thr = cli.directory.join("throughput-hist.png");
        render::throughput_histogram(&thr, &agg.machine_avg_throughput)?;
        println!("Wrote {}", thr.display());
    }

    // 5) Optional machine-readable summary.
    if let Some(path) = &cli.summary {
        std::fs::write(path, serde_json::to_string_pretty(&agg)?)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
