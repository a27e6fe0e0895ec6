//! Row-partitioned fork-join dispatch.
//!
//! C is split into row-aligned chunks before any work starts. Each task gets
//! an exclusive `&mut` to its own rows and a shared `&` to the inputs, so no
//! two tasks can ever write the same element and nothing needs a lock. The
//! call returns only after every task has finished.

use rayon::prelude::*;
use std::ops::Range;

/// Number of workers in the pool (the hardware concurrency).
pub fn worker_count() -> usize {
    rayon::current_num_threads()
}

/// Partition `[0, m)` into consecutive blocks of `block_rows` rows.
///
/// The last block is shorter when `block_rows` doesn't divide `m`. This is
/// the exact partition [`for_each_row_block`] hands to its tasks.
///
/// # Panics
///
/// Panics if `block_rows` is zero.
pub fn row_blocks(m: usize, block_rows: usize) -> Vec<Range<usize>> {
    assert!(block_rows > 0, "block size must be positive");
    (0..m)
        .step_by(block_rows)
        .map(|start| start..(start + block_rows).min(m))
        .collect()
}

/// Run `body(rows, c_rows)` on the worker pool once per row block.
///
/// `c` is an m×n row-major matrix. `c_rows` is the slice of `c` holding
/// exactly the rows in `rows`. Blocks are disjoint and together cover every
/// row once.
///
/// When `c` is empty (m or n is zero) there is nothing to write and no task
/// is spawned.
///
/// # Panics
///
/// Panics if `block_rows` is zero, if `c.len()` isn't a multiple of `n`, or
/// if any task panics.
pub fn for_each_row_block<F>(c: &mut [f64], n: usize, block_rows: usize, body: F)
where
    F: Fn(Range<usize>, &mut [f64]) + Sync + Send,
{
    assert!(block_rows > 0, "block size must be positive");
    if c.is_empty() {
        return;
    }
    assert_eq!(c.len() % n, 0, "C: length {} is not a multiple of {}", c.len(), n);

    c.par_chunks_mut(block_rows * n)
        .enumerate()
        .for_each(|(block, c_rows)| {
            let start = block * block_rows;
            let end = start + c_rows.len() / n;
            body(start..end, c_rows);
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_row_blocks_clip_last_block() {
        assert_eq!(row_blocks(5, 2), vec![0..2, 2..4, 4..5]);
        assert_eq!(row_blocks(4, 4), vec![0..4]);
        assert_eq!(row_blocks(3, 10), vec![0..3]);
        assert!(row_blocks(0, 3).is_empty());
    }

    #[test]
    fn test_dispatch_matches_partition() {
        let (m, n) = (11, 3);
        for block_rows in [1, 2, 3, 4, 11, 20] {
            let seen = Mutex::new(Vec::new());
            let mut c = vec![0.0; m * n];

            for_each_row_block(&mut c, n, block_rows, |rows, c_rows| {
                assert_eq!(c_rows.len(), rows.len() * n);
                seen.lock().unwrap().push(rows);
            });

            let mut seen = seen.into_inner().unwrap();
            seen.sort_by_key(|r| r.start);
            assert_eq!(seen, row_blocks(m, block_rows), "block_rows {}", block_rows);
        }
    }

    #[test]
    fn test_each_task_writes_its_own_rows() {
        let (m, n) = (9, 4);
        let mut c = vec![0.0; m * n];

        for_each_row_block(&mut c, n, 2, |rows, c_rows| {
            for (local, i) in rows.enumerate() {
                for v in &mut c_rows[local * n..(local + 1) * n] {
                    *v += i as f64;
                }
            }
        });

        for i in 0..m {
            assert!(c[i * n..(i + 1) * n].iter().all(|&v| v == i as f64));
        }
    }

    #[test]
    fn test_empty_output_spawns_nothing() {
        let calls = Mutex::new(0);
        for_each_row_block(&mut [], 0, 1, |_, _| *calls.lock().unwrap() += 1);
        for_each_row_block(&mut [], 5, 1, |_, _| *calls.lock().unwrap() += 1);
        assert_eq!(calls.into_inner().unwrap(), 0);
    }

    #[test]
    fn test_worker_count_positive() {
        assert!(worker_count() >= 1);
    }
}
