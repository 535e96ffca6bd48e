//! Plain aligned text tables for the view actions.
//!
//! Output shape:
//!
//! ```text
//! id | name
//! ---------------
//! 1  | Sales
//! 2  | Engineering
//! ```

/// A record that can be laid out as a table row.
///
/// `COLUMNS` is the ordered field list the view action shows; `cell` renders one of those
/// fields as text, `None` for a null value.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cell(&self, column: &str) -> Option<String>;
}

const SEPARATOR: &str = " | ";

/// Renders `rows` under the given columns, one line per row, each line ending in `\n`.
///
/// Every column is as wide as its header or its widest value, whichever is longer. Null
/// cells are blank. The rule under the header spans all columns and separators.
pub fn render_table<T: Tabular>(rows: &[T], columns: &[&str]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.cell(c).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule_len = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1);

    let mut out = String::new();
    out.push_str(&join_padded(columns.iter().copied(), &widths));
    out.push('\n');
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for line in &cells {
        out.push_str(&join_padded(line.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn join_padded<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Department, EmployeeListing};
    use rstest::rstest;

    fn dept(id: i32, name: &str) -> Department {
        Department {
            id,
            name: name.to_string(),
        }
    }

    fn line_lengths(table: &str) -> Vec<usize> {
        table.lines().map(|l| l.chars().count()).collect()
    }

    #[test]
    fn test_departments_layout() {
        let rows = vec![dept(1, "Sales"), dept(2, "Engineering")];
        let table = render_table(&rows, Department::COLUMNS);
        let expected = "id | name       \n\
                        ----------------\n\
                        1  | Sales      \n\
                        2  | Engineering\n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_empty_rows_print_header_and_rule() {
        let rows: Vec<Department> = Vec::new();
        let table = render_table(&rows, Department::COLUMNS);
        assert_eq!(table, "id | name\n---------\n");
        assert_eq!(table.lines().count(), 2);
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![dept(1, "R&D")])]
    #[case(vec![dept(1, "Sales"), dept(20, "Customer Success"), dept(300, "")])]
    #[case(vec![dept(4, "Über Größe")])]
    fn test_every_line_matches_rule(#[case] rows: Vec<Department>) {
        let table = render_table(&rows, Department::COLUMNS);
        let lengths = line_lengths(&table);
        let rule = lengths[1];
        assert!(lengths.iter().all(|l| *l == rule), "ragged table:\n{table}");
    }

    #[test]
    fn test_null_cells_render_blank() {
        let rows = vec![EmployeeListing {
            id: 1,
            first_name: "Jo".to_string(),
            last_name: "Park".to_string(),
            title: None,
            department: None,
            salary: None,
            manager: None,
        }];
        let table = render_table(&rows, EmployeeListing::COLUMNS);
        assert!(!table.contains("null"));
        assert!(!table.contains("None"));
        let data = table.lines().nth(2).unwrap();
        assert_eq!(
            data,
            "1  | Jo         | Park      |       |            |        |        "
        );
    }

    #[test]
    fn test_column_subset_and_order() {
        let rows = vec![dept(9, "Ops")];
        let table = render_table(&rows, &["name", "id"]);
        assert_eq!(table, "name | id\n---------\nOps  | 9 \n");
    }

    #[test]
    fn test_deterministic() {
        let rows = vec![dept(1, "Sales"), dept(2, "Legal")];
        assert_eq!(
            render_table(&rows, Department::COLUMNS),
            render_table(&rows, Department::COLUMNS)
        );
    }
}
