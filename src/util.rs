use std::ops::Range;

/// Evaluates x / (1 - exp(-x / k)), substituting the limit k at the
/// removable singularity x = 0.
pub fn vtrap(x: f64, k: f64) -> f64 {
    if x.abs() < 1e-9 {
        k
    } else {
        x / (1.0 - (-x / k).exp())
    }
}

/// Sigmoid activation with half-activation voltage v_half and slope k.
pub fn boltzmann(v: f64, v_half: f64, k: f64) -> f64 {
    1.0 / (1.0 + (-(v - v_half) / k).exp())
}

pub fn get_partition_range(
    num_threads: usize,
    thread_id: usize,
    num_items: usize,
) -> Range<usize> {
    let min_partition_size = num_items / num_threads;
    let remainder = num_items % num_threads;

    if thread_id < remainder {
        let partition_size = min_partition_size + 1;
        let start = partition_size * thread_id;
        let end = start + partition_size;
        Range { start, end }
    } else {
        let start =
            (min_partition_size + 1) * remainder + min_partition_size * (thread_id - remainder);
        let end = start + min_partition_size;
        Range { start, end }
    }
}
