//! PNG rendering of a clustered grid
//!
//! Each cluster gets its own shade so that neighbouring clusters of the same
//! color stay distinguishable. Spanning clusters are tinted: white ones toward
//! blue, black ones toward red.

use crate::algorithm::simulation::Simulation;
use crate::io::error::{PercolationError, Result};
use crate::math::random::Xorshift64Star;
use crate::spatial::lattice::{Color, PerColor};
use bitvec::prelude::*;
use image::{ImageBuffer, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use std::path::Path;

// Deterministic shade in [0, 1) for a cluster root
fn shade(root: u32) -> f64 {
    Xorshift64Star::seed_from_u64(u64::from(root) + 1).random::<f64>()
}

fn channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn cluster_color(color: Color, spanning: bool, p: f64) -> Rgb<u8> {
    let [r, g, b] = match (color, spanning) {
        (Color::White, true) => [
            0.3f64.mul_add(p, 0.6),
            0.3f64.mul_add(p, 0.6),
            0.2f64.mul_add(-p, 1.0),
        ],
        (Color::White, false) => [0.4f64.mul_add(p, 0.6); 3],
        (Color::Black, true) => [0.4f64.mul_add(-p, 1.0), 0.3 * p, 0.3 * p],
        (Color::Black, false) => [0.4 * p; 3],
    };
    Rgb([channel(r), channel(g), channel(b)])
}

/// Render the most recent grid of a session
///
/// Spanning roots are gathered from the session before drawing, so the
/// session is borrowed mutably for its spanning scratch space.
pub fn render_grid(simulation: &mut Simulation) -> RgbImage {
    let labels = simulation.lattice().dimensions().labels();
    let spanning = PerColor::from_fn(|color| {
        let mut marks = bitvec![0; labels];
        for root in simulation.spanning_roots(color) {
            marks.set(root as usize, true);
        }
        marks
    });

    let lattice = simulation.lattice();
    let partition = simulation.partition();
    let width = lattice.cols() as u32;
    let height = lattice.rows() as u32;

    ImageBuffer::from_fn(width, height, |x, y| {
        let (row, col) = (y as usize, x as usize);
        lattice.color(row, col).map_or(Rgb([0, 0, 0]), |color| {
            let root = partition.parent(lattice.label(row, col));
            let spans = spanning[color].get(root as usize).as_deref() == Some(&true);
            cluster_color(color, spans, shade(root))
        })
    })
}

/// Render the most recent grid of a session and save it as PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(simulation: &mut Simulation, output_path: &Path) -> Result<()> {
    let img = render_grid(simulation);

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PercolationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| PercolationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
