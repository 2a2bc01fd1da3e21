/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: &'static str,
    pub alignment: Alignment,
}

impl TableColumn {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Left,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Right,
        }
    }
}

/// Plain-text table sized to its widest cell per column.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .fold(column.header.chars().count(), usize::max)
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.to_string())
            .collect();

        let mut lines = vec![self.render_row(&header, &widths)];
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push("─".repeat(rule_width));
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(cell.chars().count());
                match column.alignment {
                    Alignment::Left => format!("{}{}", cell, " ".repeat(pad)),
                    Alignment::Right => format!("{}{}", " ".repeat(pad), cell),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}
