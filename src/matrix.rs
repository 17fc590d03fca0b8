use std::ops::Index;

/// A dense row-major matrix, as returned by `jacfwd` and `hessian`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// Create a matrix from its elements in row-major order.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    #[must_use]
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "matrix of shape {rows}x{cols} needs {} elements",
            rows * cols
        );
        Matrix { rows, cols, data }
    }

    /// Stack rows of equal length. The number of columns is given explicitly so
    /// that a matrix with zero rows still has a shape.
    ///
    /// # Panics
    /// If a row does not have `cols` elements.
    #[must_use]
    pub fn from_rows(cols: usize, rows: Vec<Vec<T>>) -> Self {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), cols, "row {i} has {} elements, expected {cols}", row.len());
            data.extend(row);
        }
        Matrix {
            rows: n_rows,
            cols,
            data,
        }
    }

    /// (rows, columns)
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// # Panics
    /// If `r` is out of bounds.
    #[must_use]
    pub fn row(&self, r: usize) -> &[T] {
        assert!(
            r < self.rows,
            "row {r} out of bounds for shape {}x{}",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    #[must_use]
    pub fn column(&self, c: usize) -> Vec<T> {
        (0..self.rows).map(|r| self[(r, c)].clone()).collect()
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let data = (0..self.cols).flat_map(|c| self.column(c)).collect();
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// The elements in row-major order.
    #[must_use]
    pub fn ravel(&self) -> Vec<T> {
        self.data.clone()
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &Self::Output {
        assert!(
            r < self.rows && c < self.cols,
            "index ({r}, {c}) out of bounds for shape {}x{}",
            self.rows,
            self.cols
        );
        &self.data[r * self.cols + c]
    }
}
