//! Lowered problem handed to a backend.
//!
//! Columns are indexed by position; rows reference columns by that index.
//! The objective is `Σ cost_j x_j + Σ c x_i x_j + offset`, optimized in
//! `sense`.

use lazo_expr::{Bounds, Sense, VariableId};

/// One decision column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub id: VariableId,
    pub name: String,
    pub bounds: Bounds,
    pub is_integer: bool,
    pub cost: f64,
}

/// One linear row `lower <= Σ a_j x_j <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: Option<String>,
    pub lower: f64,
    pub upper: f64,
    /// `(column index, coefficient)` pairs, column indices unique.
    pub coefficients: Vec<(usize, f64)>,
}

/// Objective term `coeff * x_i * x_j` with `i <= j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticTerm {
    pub i: usize,
    pub j: usize,
    pub coeff: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandardForm {
    pub sense: Sense,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub quadratic: Vec<QuadraticTerm>,
    pub offset: f64,
}

impl StandardForm {
    pub fn new(sense: Sense) -> Self {
        Self {
            sense,
            columns: Vec::new(),
            rows: Vec::new(),
            quadratic: Vec::new(),
            offset: 0.0,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_nonzeros(&self) -> usize {
        self.rows.iter().map(|row| row.coefficients.len()).sum()
    }

    pub fn is_quadratic(&self) -> bool {
        !self.quadratic.is_empty()
    }

    pub fn has_integer_columns(&self) -> bool {
        self.columns.iter().any(|col| col.is_integer)
    }

    /// Objective evaluated at `values` (indexed like `columns`).
    pub fn objective_at(&self, values: &[f64]) -> f64 {
        let at = |idx: usize| values.get(idx).copied().unwrap_or(0.0);
        let linear: f64 = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, col)| col.cost * at(idx))
            .sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .map(|term| term.coeff * at(term.i) * at(term.j))
            .sum();
        self.offset + linear + quadratic
    }

    /// Row matrix in CSC form: `(column starts, row indices, values)`.
    /// `starts` has `num_columns() + 1` entries.
    pub fn csc(&self) -> (Vec<usize>, Vec<usize>, Vec<f64>) {
        let mut per_column: Vec<Vec<(usize, f64)>> = vec![Vec::new(); self.columns.len()];
        for (row_idx, row) in self.rows.iter().enumerate() {
            for &(col_idx, coeff) in &row.coefficients {
                if let Some(column) = per_column.get_mut(col_idx) {
                    column.push((row_idx, coeff));
                }
            }
        }

        let mut starts = Vec::with_capacity(self.columns.len() + 1);
        let mut indices = Vec::with_capacity(self.num_nonzeros());
        let mut values = Vec::with_capacity(self.num_nonzeros());
        starts.push(0);
        for column in per_column {
            for (row_idx, coeff) in column {
                indices.push(row_idx);
                values.push(coeff);
            }
            starts.push(indices.len());
        }
        (starts, indices, values)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn column(name: &str, cost: f64) -> Column {
        Column {
            id: VariableId::new(0),
            name: name.to_string(),
            bounds: Bounds::new(0.0, 1.0),
            is_integer: false,
            cost,
        }
    }

    fn two_by_two() -> StandardForm {
        let mut form = StandardForm::new(Sense::Minimize);
        form.columns = vec![column("x", 1.0), column("y", 2.0)];
        form.rows = vec![
            Row {
                name: None,
                lower: f64::NEG_INFINITY,
                upper: 1.0,
                coefficients: vec![(0, 1.0), (1, 1.0)],
            },
            Row {
                name: Some("only_y".to_string()),
                lower: 0.5,
                upper: f64::INFINITY,
                coefficients: vec![(1, 3.0)],
            },
        ];
        form.offset = 4.0;
        form
    }

    #[test]
    fn csc_groups_entries_by_column() {
        let (starts, indices, values) = two_by_two().csc();
        assert_eq!(starts, vec![0, 1, 3]);
        assert_eq!(indices, vec![0, 0, 1]);
        assert_eq!(values, vec![1.0, 1.0, 3.0]);
    }

    #[test]
    fn objective_includes_offset_and_quadratic_terms() {
        let mut form = two_by_two();
        assert_eq!(form.objective_at(&[1.0, 1.0]), 7.0);

        form.quadratic.push(QuadraticTerm { i: 0, j: 1, coeff: 2.0 });
        assert!(form.is_quadratic());
        assert_eq!(form.objective_at(&[1.0, 2.0]), 13.0);
    }

    #[test]
    fn counts() {
        let form = two_by_two();
        assert_eq!(form.num_columns(), 2);
        assert_eq!(form.num_rows(), 2);
        assert_eq!(form.num_nonzeros(), 3);
        assert!(!form.has_integer_columns());
    }
}
