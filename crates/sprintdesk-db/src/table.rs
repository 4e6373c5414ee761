/// A flat string table: header plus rows, the in-memory shape of one CSV
/// file before typed decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn empty(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Coerce to exactly `expected`: known columns keep their values
    /// (reordered if needed), missing columns are created empty, extra
    /// columns are dropped. Row order is preserved. Idempotent.
    pub fn conform(&self, expected: &[&str]) -> Table {
        let indices: Vec<Option<usize>> =
            expected.iter().map(|c| self.column_index(c)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| match idx {
                        Some(i) => row.get(*i).cloned().unwrap_or_default(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();
        Table {
            columns: expected.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::empty(columns);
        for row in rows {
            t.push_row(row.iter().map(|v| v.to_string()).collect());
        }
        t
    }

    #[test]
    fn conform_is_identity_on_matching_schema() {
        let t = table(&["A", "B"], &[&["1", "2"], &["3", "4"]]);
        assert_eq!(t.conform(&["A", "B"]), t);
    }

    #[test]
    fn conform_adds_missing_and_drops_extra() {
        let t = table(&["A", "Junk"], &[&["1", "x"]]);
        let out = t.conform(&["A", "B"]);
        assert_eq!(out.columns, vec!["A", "B"]);
        assert_eq!(out.rows, vec![vec!["1".to_string(), String::new()]]);
    }

    #[test]
    fn conform_reorders_columns() {
        let t = table(&["B", "A"], &[&["b1", "a1"]]);
        let out = t.conform(&["A", "B"]);
        assert_eq!(out.rows, vec![vec!["a1".to_string(), "b1".to_string()]]);
    }

    #[test]
    fn conform_is_idempotent() {
        let t = table(&["B", "A", "C"], &[&["b", "a", "c"]]);
        let once = t.conform(&["A", "B"]);
        let twice = once.conform(&["A", "B"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn conform_pads_short_rows() {
        let mut t = Table::empty(&["A", "B"]);
        t.rows.push(vec!["only-a".to_string()]);
        let out = t.conform(&["A", "B"]);
        assert_eq!(out.rows, vec![vec!["only-a".to_string(), String::new()]]);
    }
}
