// Probability-based target suggestions for the hidden board.
// Works from what the player can see: hits, misses and unsunk fleet lengths.

use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;

use crate::{bitboard::BitBoard, config::Cells, ship::Orientation};

type BB = BitBoard<Cells>;

/// Placements covering more observed hits receive this much more weight per
/// hit, so squares next to a wounded ship stand out.
const HIT_BIAS: f64 = 10.0;

/// Densities are raised to this power before sampling, which favours the
/// most likely cells without always picking the single peak.
const SHARPEN: f64 = 2.0;

/// Compute a probability density over all unfired squares given the sets of
/// known hits and misses and the lengths of ships not yet sunk. The result is
/// a row-major `size*size` vector summing to 1 over unfired cells (or all
/// zeros once every cell is fired).
pub fn calc_pdf(hits: &BB, misses: &BB, remaining_lengths: &[usize]) -> Vec<f64> {
    let size = hits.size();
    let mut matrix = vec![0.0f64; size * size];
    let fired = |r: usize, c: usize| {
        hits.get(r, c).unwrap_or(false) || misses.get(r, c).unwrap_or(false)
    };

    for &len in remaining_lengths.iter() {
        if len == 0 || len > size {
            continue;
        }

        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let max_row = if orient == Orientation::Vertical {
                size - len + 1
            } else {
                size
            };
            let max_col = if orient == Orientation::Horizontal {
                size - len + 1
            } else {
                size
            };
            for r in 0..max_row {
                for c in 0..max_col {
                    // check placement validity and count hits
                    let mut valid = true;
                    let mut n_hits = 0usize;
                    for k in 0..len {
                        let (rr, cc) = orient.step(r, c, k);
                        if misses.get(rr, cc).unwrap_or(false) {
                            valid = false;
                            break;
                        }
                        if hits.get(rr, cc).unwrap_or(false) {
                            n_hits += 1;
                        }
                    }
                    if !valid {
                        continue;
                    }

                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        let (rr, cc) = orient.step(r, c, k);
                        if !fired(rr, cc) {
                            matrix[rr * size + cc] += weight;
                        }
                    }
                }
            }
        }
    }

    normalize(matrix, size, fired)
}

fn normalize<F>(mut matrix: Vec<f64>, size: usize, fired: F) -> Vec<f64>
where
    F: Fn(usize, usize) -> bool,
{
    let total: f64 = matrix.iter().sum();
    if total == 0.0 {
        // nothing fits any more; spread evenly over what is left
        let open = (0..size * size)
            .filter(|&i| !fired(i / size, i % size))
            .count();
        if open == 0 {
            return matrix;
        }
        let uniform = 1.0 / open as f64;
        for (i, v) in matrix.iter_mut().enumerate() {
            if !fired(i / size, i % size) {
                *v = uniform;
            }
        }
        return matrix;
    }
    for v in matrix.iter_mut() {
        *v /= total;
    }
    matrix
}

/// Sample a coordinate from a row-major probability vector. Returns `None`
/// when every weight is zero.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &[f64], size: usize, rng: &mut R) -> Option<(usize, usize)> {
    let adjusted: Vec<f64> = pdf
        .iter()
        .map(|&p| if p > 0.0 { libm::pow(p, SHARPEN) } else { 0.0 })
        .collect();
    let total: f64 = adjusted.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &v) in adjusted.iter().enumerate() {
        if v <= 0.0 {
            continue;
        }
        cumulative += v;
        last = Some((i / size, i % size));
        if threshold < cumulative {
            return last;
        }
    }
    // rounding left the threshold past the final bucket
    last
}

/// Convenience wrapper that calculates the PDF and immediately selects a
/// target using the provided random number generator.
pub fn calc_pdf_and_guess<R: Rng + ?Sized>(
    hits: &BB,
    misses: &BB,
    remaining_lengths: &[usize],
    rng: &mut R,
) -> Option<(usize, usize)> {
    let pdf = calc_pdf(hits, misses, remaining_lengths);
    sample_pdf(&pdf, hits.size(), rng)
}
