/// An ascii table.
///
/// The first column is left-aligned, every other column is right-aligned.
#[derive(Debug)]
pub struct AsciiTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,

    max_cell_widths: Vec<usize>,
}

impl AsciiTable {
    /// Make a new table with the given column names
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(Into::into).collect();
        let max_cell_widths = header.iter().map(|cell| cell.chars().count()).collect();

        Self {
            header,
            rows: Vec::new(),
            max_cell_widths,
        }
    }

    /// Add a row.
    ///
    /// Missing cells are left empty, extra cells are dropped.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = row
            .into_iter()
            .take(self.header.len())
            .map(Into::into)
            .collect();
        row.resize(self.header.len(), String::new());

        for (cell, max_cell_width) in row.iter().zip(self.max_cell_widths.iter_mut()) {
            *max_cell_width = std::cmp::max(*max_cell_width, cell.chars().count());
        }

        self.rows.push(row);
    }

    fn fmt_row_border(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "+")?;
        for max_cell_width in self.max_cell_widths.iter() {
            for _ in 0..*max_cell_width + 2 {
                write!(f, "-")?;
            }
            write!(f, "+")?;
        }
        writeln!(f)?;

        Ok(())
    }

    fn fmt_row(&self, f: &mut std::fmt::Formatter<'_>, row: &[String]) -> std::fmt::Result {
        for (i, (cell, width)) in row.iter().zip(self.max_cell_widths.iter().copied()).enumerate() {
            if i == 0 {
                write!(f, "| {cell:<width$} ")?;
            } else {
                write!(f, "| {cell:>width$} ")?;
            }
        }
        writeln!(f, "|")?;

        Ok(())
    }
}

impl std::fmt::Display for AsciiTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_row_border(f)?;
        self.fmt_row(f, &self.header)?;
        self.fmt_row_border(f)?;

        for row in self.rows.iter() {
            self.fmt_row(f, row)?;
        }
        self.fmt_row_border(f)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render() {
        let mut table = AsciiTable::new(["Name", "Kills"]);
        table.push_row(["Ash", "16"]);
        table.push_row(["Thermite"]);

        let expected = "\
+----------+-------+
| Name     | Kills |
+----------+-------+
| Ash      |    16 |
| Thermite |       |
+----------+-------+
";
        assert_eq!(table.to_string(), expected);
    }
}
