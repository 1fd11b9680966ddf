//! Analyze Tools
//!
//! Turns scraped rows into capacity-density points: mAh per mm³ against
//! mAh per gram, tagged by series, stock, and wire gauge. Points of the same
//! series are joined by a minimum spanning tree over min-max normalized
//! densities, so near neighbours within a series are easy to spot.

mod types;
mod utils;

pub use types::*;

use crate::types::{ProductRecord, ResultSet};
use types::column;
use utils::{first_decimal, first_integer, leading_integer, min_max, minimum_spanning_tree, volume_mm3};

const IN_STOCK: &str = "In Stock";

/// Place one row, or `None` if it lacks a size, weight, or capacity to divide by.
pub fn battery_point(row: &ProductRecord) -> Option<BatteryPoint> {
    let cells = row.as_slice();
    if cells.len() < MIN_ROW_LEN {
        return None;
    }

    let volume = volume_mm3(&cells[column::SIZE])?;
    let weight = first_decimal(&cells[column::WEIGHT])?;
    let capacity = first_integer(&cells[column::CAPACITY])? as f64;
    if volume <= 0.0 || weight <= 0.0 {
        return None;
    }

    let name = cells[column::NAME].clone();
    let category = Category::from_name(&name);
    let price = first_decimal(&cells[column::PRICE]).unwrap_or(0.0);
    let c_rate = first_integer(&cells[column::C_RATE]);
    let power_factor = leading_integer(&cells[column::POWER_FACTOR]);
    let wire_awg = first_integer(&cells[column::WIRE_SIZE]);

    let label = point_label(category, capacity, c_rate, price, power_factor);

    Some(BatteryPoint {
        name,
        category,
        in_stock: cells[column::AVAILABILITY].contains(IN_STOCK),
        capacity_mah: capacity,
        volume_mm3: volume,
        weight_g: weight,
        price,
        c_rate,
        power_factor,
        wire_awg,
        marker: Marker::for_wire(wire_awg),
        mah_per_mm3: capacity / volume,
        mah_per_g: capacity / weight,
        normalized: [0.0, 0.0],
        label,
    })
}

/// `"P 50γ 65C $162 18φ"`: series, capacity in hundreds of mAh, C rate,
/// whole dollars, power factor. Unknown numbers print as `?`.
pub fn point_label(
    category: Category,
    capacity_mah: f64,
    c_rate: Option<u64>,
    price: f64,
    power_factor: Option<u64>,
) -> String {
    let or_unknown = |v: Option<u64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
    format!(
        "{} {}\u{03B3} {}C ${} {}\u{03C6}",
        category.code(),
        (capacity_mah / 100.0).trunc() as u64,
        or_unknown(c_rate),
        price.trunc() as u64,
        or_unknown(power_factor)
    )
}

/// Points for every usable row, in row order, with normalized densities.
pub fn battery_points(rows: &ResultSet) -> (Vec<BatteryPoint>, usize) {
    let mut points = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (i, row) in rows.rows().iter().enumerate() {
        match battery_point(row) {
            Some(point) => points.push(point),
            None => {
                skipped += 1;
                tracing::debug!(row = i, name = row.name(), "row skipped: no usable size, weight, or capacity");
            }
        }
    }
    normalize(&mut points);
    (points, skipped)
}

/// Min-max scale both densities across `points`.
pub fn normalize(points: &mut [BatteryPoint]) {
    let xs: Vec<f64> = points.iter().map(|p| p.mah_per_mm3).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.mah_per_g).collect();
    for ((point, x), y) in points.iter_mut().zip(min_max(&xs)).zip(min_max(&ys)) {
        point.normalized = [x, y];
    }
}

/// Group points by category in order of first appearance and join each group
/// with its minimum spanning tree. Single-point groups have no edges.
pub fn cluster(points: &[BatteryPoint]) -> Vec<CategoryCluster> {
    let mut clusters: Vec<CategoryCluster> = Vec::new();
    for (i, point) in points.iter().enumerate() {
        match clusters.iter_mut().find(|c| c.category == point.category) {
            Some(cluster) => cluster.members.push(i),
            None => clusters.push(CategoryCluster {
                category: point.category,
                name: point.category.full_name(),
                members: vec![i],
                edges: vec![],
            }),
        }
    }

    for cluster in &mut clusters {
        let coords: Vec<[f64; 2]> = cluster.members.iter().map(|&i| points[i].normalized).collect();
        cluster.edges = minimum_spanning_tree(&coords)
            .into_iter()
            .map(|(a, b, length)| Edge {
                from: cluster.members[a],
                to: cluster.members[b],
                length,
            })
            .collect();
    }
    clusters
}

/// Points and per-category trees for a scraped result set.
pub fn analyze(rows: &ResultSet) -> Analysis {
    let (points, skipped) = battery_points(rows);
    let clusters = cluster(&points);
    tracing::info!(points = points.len(), skipped, clusters = clusters.len(), "analysis complete");
    Analysis {
        points,
        clusters,
        skipped,
    }
}
