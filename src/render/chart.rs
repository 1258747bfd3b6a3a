use plotters::prelude::*;
use std::path::Path;

const CHART_SIZE: (u32, u32) = (800, 600);
const BAR_ALPHA: f64 = 0.75;
/// The throughput histogram always spans the observed range with this many bins.
const THROUGHPUT_BINS: usize = 20;

/// Bar chart of per-event latency, averaged across machines.
///
/// One bar per event index, labeled as integers on the x axis.
pub fn event_times_chart(path: &Path, per_event_avg_ms: &[f64]) -> anyhow::Result<()> {
    if per_event_avg_ms.is_empty() {
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = per_event_avg_ms.len() as u32;
    let y_max = axis_max(per_event_avg_ms);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Time of each event, averaged over all machines",
            ("sans-serif", 22),
        )
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(56)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Run number")
        .y_desc("Time (ms)")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(BAR_ALPHA).filled())
            .data(
                per_event_avg_ms
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i as u32, v)),
            ),
    )?;

    root.present()?;
    Ok(())
}

/// Histogram of per-machine mean latencies over the configured range.
///
/// Values outside `[hmin, hmax]` are dropped, not clipped; a value exactly
/// at `hmax` lands in the last bin.
pub fn latency_histogram(
    path: &Path,
    values: &[f64],
    hmin: f64,
    hmax: f64,
    nbins: usize,
) -> anyhow::Result<()> {
    if values.is_empty() {
        return Ok(());
    }
    histogram_chart(
        path,
        values,
        hmin,
        hmax,
        nbins,
        "Histogram of average server times for each client",
        "Time (ms)",
    )
}

/// Histogram of per-machine mean throughputs over the observed range.
pub fn throughput_histogram(path: &Path, values: &[f64]) -> anyhow::Result<()> {
    let Some((lo, hi)) = data_range(values) else {
        return Ok(());
    };
    histogram_chart(
        path,
        values,
        lo,
        hi,
        THROUGHPUT_BINS,
        "Histogram of average throughput for each client",
        "Throughput (s^-1)",
    )
}

fn histogram_chart(
    path: &Path,
    values: &[f64],
    lo: f64,
    hi: f64,
    bins: usize,
    caption: &str,
    x_desc: &str,
) -> anyhow::Result<()> {
    let counts = bin_values(values, lo, hi, bins);
    let width = (hi - lo) / bins as f64;
    let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as u32 + 1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(44)
        .y_label_area_size(56)
        .build_cartesian_2d(lo..hi, 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().filter(|&(_, &c)| c > 0).map(
        |(i, &c)| {
            let x0 = lo + width * i as f64;
            Rectangle::new([(x0, 0), (x0 + width, c as u32)], BLUE.mix(BAR_ALPHA).filled())
        },
    ))?;

    root.present()?;
    Ok(())
}

/// Equal-width binning of `values` into `bins` buckets spanning `[lo, hi]`.
///
/// Out-of-range values are dropped; the upper boundary is inclusive.
fn bin_values(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 || hi <= lo {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for &v in values {
        if v < lo || v > hi {
            continue;
        }
        let idx = ((v - lo) / width) as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Observed [min, max] of `values`, widened by 0.5 on both sides when all
/// values coincide.
fn data_range(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    let (lo, hi) = values
        .iter()
        .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        Some((lo - 0.5, hi + 0.5))
    } else {
        Some((lo, hi))
    }
}

fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0f64, |a, &b| a.max(b));
    if max > 0.0 { max * 1.05 } else { 1.0 }
}
