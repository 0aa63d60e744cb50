/// Greedy row-priority assignment of tracked objects to detections
///
/// Rows (tracked objects) are visited in order of their closest detection, and
/// each row claims its own nearest column if both are still free. This is
/// deliberately not a globally optimal assignment: identity continuity depends
/// on the exact visiting order.
use ndarray::ArrayView2;

/// Result of a greedy assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentResult {
    /// Accepted pairs as (row_idx, col_idx), in the order they were committed
    pub assignments: Vec<(usize, usize)>,
    /// Rows left without a column, ascending
    pub unassigned_rows: Vec<usize>,
    /// Columns left without a row, ascending
    pub unassigned_cols: Vec<usize>,
}

/// Row-priority greedy solver over a distance matrix
pub struct GreedyAssignment;

impl GreedyAssignment {
    /// Solve the assignment problem for a (n_rows, n_cols) distance matrix
    ///
    /// # Arguments
    /// * `distances` - distances\[i\]\[j\] between row i and column j
    /// * `max_distance` - pairs farther apart than this are skipped, leaving
    ///   both row and column free for later pairs
    ///
    /// # Returns
    /// AssignmentResult with committed pairs and leftover indices
    pub fn solve(distances: ArrayView2<f64>, max_distance: f64) -> AssignmentResult {
        let n_rows = distances.nrows();
        let n_cols = distances.ncols();

        if n_rows == 0 || n_cols == 0 {
            return AssignmentResult {
                assignments: Vec::new(),
                unassigned_rows: (0..n_rows).collect(),
                unassigned_cols: (0..n_cols).collect(),
            };
        }

        // (row, argmin col, min distance) for every row
        let mut candidates: Vec<(usize, usize, f64)> = distances
            .outer_iter()
            .enumerate()
            .map(|(row, dists)| {
                let (col, dist) = Self::argmin(dists.iter().copied());
                (row, col, dist)
            })
            .collect();

        // Stable: rows with equal minima keep their input order
        candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

        let mut assignments = Vec::new();
        let mut used_rows = vec![false; n_rows];
        let mut used_cols = vec![false; n_cols];

        for (row, col, dist) in candidates {
            if used_rows[row] || used_cols[col] {
                continue;
            }
            if dist.is_nan() || dist > max_distance {
                continue;
            }
            assignments.push((row, col));
            used_rows[row] = true;
            used_cols[col] = true;
        }

        let unassigned_rows = (0..n_rows).filter(|&i| !used_rows[i]).collect();
        let unassigned_cols = (0..n_cols).filter(|&j| !used_cols[j]).collect();

        AssignmentResult {
            assignments,
            unassigned_rows,
            unassigned_cols,
        }
    }

    /// Index and value of the smallest element, first one wins on ties
    fn argmin(values: impl Iterator<Item = f64>) -> (usize, f64) {
        let mut best = (0, f64::NAN);
        for (idx, value) in values.enumerate() {
            if idx == 0 || value.total_cmp(&best.1).is_lt() {
                best = (idx, value);
            }
        }
        best
    }
}

impl AssignmentResult {
    /// Number of accepted pairs
    pub fn num_matched(&self) -> usize {
        self.assignments.len()
    }

    /// Column assigned to each row, `None` for unassigned rows
    pub fn row_to_col(&self, n_rows: usize) -> Vec<Option<usize>> {
        let mut mapping = vec![None; n_rows];
        for &(row, col) in &self.assignments {
            mapping[row] = Some(col);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_unambiguous_pairs() {
        let d = array![[1.4, 140.0], [139.0, 1.4]];
        let res = GreedyAssignment::solve(d.view(), 50.0);

        assert_eq!(res.num_matched(), 2);
        assert_eq!(res.row_to_col(2), vec![Some(0), Some(1)]);
        assert!(res.unassigned_rows.is_empty());
        assert!(res.unassigned_cols.is_empty());
    }

    #[test]
    fn test_closest_row_claims_contested_column() {
        // both rows prefer column 0; row 1 is closer so it wins,
        // row 0 does not fall back to column 1
        let d = array![[10.0, 20.0], [5.0, 30.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);

        assert_eq!(res.assignments, vec![(1, 0)]);
        assert_eq!(res.unassigned_rows, vec![0]);
        assert_eq!(res.unassigned_cols, vec![1]);
    }

    #[test]
    fn test_greedy_is_not_optimal() {
        // optimal total would be (0,1)+(1,0) = 4, greedy takes (0,0) first
        let d = array![[1.0, 2.0], [2.0, 100.0]];
        let res = GreedyAssignment::solve(d.view(), 10.0);

        assert_eq!(res.assignments, vec![(0, 0)]);
        assert_eq!(res.unassigned_rows, vec![1]);
        assert_eq!(res.unassigned_cols, vec![1]);
    }

    #[test]
    fn test_far_pair_is_skipped_without_consuming() {
        let d = array![[60.0, 70.0], [80.0, 90.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);

        assert!(res.assignments.is_empty());
        assert_eq!(res.unassigned_rows, vec![0, 1]);
        assert_eq!(res.unassigned_cols, vec![0, 1]);
    }

    #[test]
    fn test_distance_equal_to_threshold_matches() {
        let d = array![[50.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);
        assert_eq!(res.assignments, vec![(0, 0)]);
    }

    #[test]
    fn test_tied_rows_keep_input_order() {
        let d = array![[3.0, 9.0], [3.0, 9.0], [3.0, 9.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);

        // row 0 visits first and takes column 0; the others lose it
        assert_eq!(res.assignments, vec![(0, 0)]);
        assert_eq!(res.unassigned_rows, vec![1, 2]);
        assert_eq!(res.unassigned_cols, vec![1]);
    }

    #[test]
    fn test_tied_columns_pick_lowest_index() {
        let d = array![[4.0, 4.0, 4.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);
        assert_eq!(res.assignments, vec![(0, 0)]);
        assert_eq!(res.unassigned_cols, vec![1, 2]);
    }

    #[test]
    fn test_nan_rows_sort_last_and_never_match() {
        let d = array![[f64::NAN, f64::NAN], [7.0, 1.0]];
        let res = GreedyAssignment::solve(d.view(), 50.0);
        assert_eq!(res.assignments, vec![(1, 1)]);
        assert_eq!(res.unassigned_rows, vec![0]);
        assert_eq!(res.unassigned_cols, vec![0]);
    }

    #[test]
    fn test_empty_matrix() {
        let d = ndarray::Array2::<f64>::zeros((3, 0));
        let res = GreedyAssignment::solve(d.view(), 50.0);
        assert!(res.assignments.is_empty());
        assert_eq!(res.unassigned_rows, vec![0, 1, 2]);
        assert!(res.unassigned_cols.is_empty());
    }
}
