#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]

//! Charts how many buckets a lookup examines as a fixed-size table fills up, once for a table
//! built by inserts alone and once for a table that has been through insert/remove churn.

use std::error::Error;

use env_logger::Builder;
use log::{LevelFilter, info};
use plotters::prelude::*;
use randprobe::HashTable;

// Large enough that no measured load factor triggers a resize
const TABLE_CAPACITY: usize = 1 << 16;
// Load factors from 0.05 up to the resize threshold of 0.5
const NUM_LOAD_FACTORS: usize = 10;
// Remove/re-insert passes applied by the churn workload
const CHURN_ROUNDS: usize = 8;
const SEED: u64 = 0x5eed;

const WORKLOADS: [&str; 2] = ["Inserts only", "Insert/remove churn"];

/// Probe statistics of one table state
#[derive(Debug, Clone, Copy)]
struct ProbeStats {
    avg_hit: f64,
    worst_hit: usize,
    avg_miss: f64,
    tombstones: usize,
}

fn init_logger() {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info).format_timestamp_millis().parse_default_env();
    if let Err(err) = builder.try_init() {
        eprintln!("logger already initialized: {err}");
    }
}

fn key(i: usize) -> String {
    format!("key-{i}")
}

fn missing_key(i: usize) -> String {
    format!("absent-{i}")
}

/// Fills a fresh table with `n_keys` entries.
fn inserts_only(n_keys: usize) -> (HashTable, Vec<String>) {
    let mut table = HashTable::with_seed(TABLE_CAPACITY, SEED);
    let keys: Vec<String> = (0..n_keys).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        table.insert(k.as_str(), i as i64);
    }
    (table, keys)
}

/// Fills a fresh table with `n_keys` entries, then repeatedly replaces half of them with new
/// keys so the live count stays at `n_keys` while removed buckets pile up.
fn churned(n_keys: usize) -> (HashTable, Vec<String>) {
    let (mut table, mut keys) = inserts_only(n_keys);
    let mut next = n_keys;

    for round in 0..CHURN_ROUNDS {
        for slot in keys.iter_mut().skip(round % 2).step_by(2) {
            table.remove(slot);
            *slot = key(next);
            table.insert(slot.as_str(), next as i64);
            next += 1;
        }
    }
    (table, keys)
}

fn measure(table: &HashTable, keys: &[String]) -> ProbeStats {
    let hits: Vec<usize> = keys.iter().map(|k| table.probe_len(k)).collect();
    let misses: Vec<usize> = (0..keys.len().max(1)).map(|i| table.probe_len(&missing_key(i))).collect();

    ProbeStats {
        avg_hit: hits.iter().sum::<usize>() as f64 / hits.len().max(1) as f64,
        worst_hit: hits.iter().copied().max().unwrap_or(0),
        avg_miss: misses.iter().sum::<usize>() as f64 / misses.len() as f64,
        tombstones: table.tombstones(),
    }
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    load_factors: &[f64],
    series: &[Vec<f64>],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
    ];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series.iter().flat_map(|v| v.iter()).fold(1.0, |max: f64, &x| max.max(x)) * 1.1;
    let max_x = load_factors.last().copied().unwrap_or(0.5) * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..max_x, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (workload_idx, &workload) in WORKLOADS.iter().enumerate() {
        let color = &colors[workload_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(2);
        let points: Vec<(f64, f64)> =
            load_factors.iter().copied().zip(series[workload_idx].iter().copied()).collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(workload)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger();

    let load_factors: Vec<f64> = (1..=NUM_LOAD_FACTORS)
        .map(|i| 0.5 * (i as f64) / (NUM_LOAD_FACTORS as f64))
        .collect();
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_CAPACITY as f64 * load) as usize).collect();

    let mut avg_hits: Vec<Vec<f64>> = vec![Vec::new(); WORKLOADS.len()];
    let mut avg_misses: Vec<Vec<f64>> = vec![Vec::new(); WORKLOADS.len()];

    for &n_keys in &num_keys {
        info!("profiling {n_keys} keys in {TABLE_CAPACITY} buckets");

        for (workload_idx, &workload) in WORKLOADS.iter().enumerate() {
            let (table, keys) = if workload_idx == 0 { inserts_only(n_keys) } else { churned(n_keys) };
            let stats = measure(&table, &keys);

            avg_hits[workload_idx].push(stats.avg_hit);
            avg_misses[workload_idx].push(stats.avg_miss);

            println!(
                "  {workload}: alpha = {:.3}, avg hit = {:.2}, worst hit = {}, avg miss = {:.2}, tombstones = {}",
                table.alpha(),
                stats.avg_hit,
                stats.worst_hit,
                stats.avg_miss,
                stats.tombstones
            );
        }
    }

    plot(
        "probe_hits.png",
        "Buckets Examined by Successful Lookups",
        "Average probes per hit",
        &load_factors,
        &avg_hits,
    )?;
    plot(
        "probe_misses.png",
        "Buckets Examined by Failed Lookups",
        "Average probes per miss",
        &load_factors,
        &avg_misses,
    )?;

    println!("Generated plot images: probe_hits.png, probe_misses.png");

    Ok(())
}
