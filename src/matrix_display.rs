use std::{
    fmt::{Display, Formatter},
    sync::OnceLock,
};

use prettytable::{format, Cell, Table};

use crate::Matrix;

static FORMAT_MATRIX: OnceLock<format::TableFormat> = OnceLock::new();

fn get_pretty_format() -> &'static format::TableFormat {
    FORMAT_MATRIX.get_or_init(|| {
        format::FormatBuilder::new()
            .column_separator(' ')
            .borders('│')
            .separators(
                &[format::LinePosition::Top],
                format::LineSeparator::new(' ', ' ', '┌', '┐'),
            )
            .separators(
                &[format::LinePosition::Bottom],
                format::LineSeparator::new(' ', ' ', '└', '┘'),
            )
            .padding(1, 1)
            .build()
    })
}

static FORMAT_MATRIX_SINGLE_LINE: OnceLock<format::TableFormat> = OnceLock::new();

fn get_single_line_format() -> &'static format::TableFormat {
    FORMAT_MATRIX_SINGLE_LINE.get_or_init(|| {
        format::FormatBuilder::new()
            .column_separator(' ')
            .left_border('[')
            .right_border(']')
            .padding(1, 0)
            .build()
    })
}

fn create_table<T: Display + Clone>(
    matrix: &Matrix<T>,
    table: &mut Table,
    precision: Option<usize>,
) {
    let (rows, cols) = matrix.shape();
    table.set_format(if rows == 1 {
        *get_single_line_format()
    } else {
        *get_pretty_format()
    });
    for r in 0..rows {
        let row = table.add_empty_row();
        for c in 0..cols {
            let elem = &matrix[(r, c)];
            let text = match precision {
                Some(precision) => format!("{elem:.precision$}"),
                None => format!("{elem}"),
            };
            row.add_cell(Cell::new(&text));
        }
    }
}

impl<T: Display + Clone> Display for Matrix<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        create_table(self, &mut table, f.precision());
        write!(f, "{table}")
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_single_row() {
        let m = Matrix::new(1, 3, vec![1.0, 2.5, -3.0]);
        let s = format!("{m:.1}");
        assert!(s.starts_with('['), "{s}");
        assert!(s.contains("1.0"), "{s}");
        assert!(s.contains("2.5"), "{s}");
        assert!(s.contains("-3.0"), "{s}");
    }

    #[test]
    fn test_bordered() {
        let m = Matrix::new(2, 2, vec![1, 2, 3, 4]);
        let s = format!("{m}");
        assert!(s.contains('│'), "{s}");
        assert_eq!(s.lines().filter(|l| l.contains('│')).count(), 2, "{s}");
    }
}
