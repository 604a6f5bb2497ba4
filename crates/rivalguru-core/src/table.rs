//! Attribute-by-competitor comparison table built from an analysis response.

use crate::profile::{AnalysisResponse, Profile};

/// Row labels, in display order.
pub const ATTRIBUTE_LABELS: [&str; 9] = [
    "Description",
    "Category",
    "Year Founded",
    "Employees",
    "Annual Revenue",
    "Global Rank",
    "Visits",
    "Bounce Rate",
    "Avg Visit Duration",
];

/// Transposed comparison: one column per fetched competitor, one row per
/// profile attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonTable {
    pub columns: Vec<String>,
    /// `cells[column][row]`, rows ordered as [`ATTRIBUTE_LABELS`].
    pub cells: Vec<[String; 9]>,
}

impl ComparisonTable {
    /// Builds the table from a response document.
    ///
    /// Column `i` is named after `company.competitors[i]`. Absent outcomes,
    /// and outcomes with no matching identifier, produce no column. A repeated
    /// name keeps its first position and takes the later values.
    #[must_use]
    pub fn from_response(response: &AnalysisResponse) -> Self {
        let ids = &response.company.competitors;
        let mut table = Self::default();

        for (i, outcome) in response.competitors.iter().enumerate() {
            let (Some(profile), Some(id)) = (outcome, ids.get(i)) else {
                continue;
            };
            let name = capitalize(id);
            let values = attribute_values(profile);
            if let Some(pos) = table.columns.iter().position(|c| *c == name) {
                table.cells[pos] = values;
            } else {
                table.columns.push(name);
                table.cells.push(values);
            }
        }

        table
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cell value for a row label and column name.
    #[must_use]
    pub fn cell(&self, label: &str, column: &str) -> Option<&str> {
        let row = ATTRIBUTE_LABELS.iter().position(|l| *l == label)?;
        let col = self.columns.iter().position(|c| c == column)?;
        Some(self.cells[col][row].as_str())
    }

    /// Renders an aligned plain-text grid with a `Metric` header column.
    ///
    /// Cell values are printed in full.
    #[must_use]
    pub fn render(&self) -> String {
        let label_width = ATTRIBUTE_LABELS
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max("Metric".len());

        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&self.cells)
            .map(|(name, col)| {
                col.iter()
                    .map(|c| c.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("{:<label_width$}", "Metric");
        for (name, width) in self.columns.iter().zip(widths.iter().copied()) {
            out.push_str(&format!(" | {name:<width$}"));
        }
        out.push('\n');

        let rule_len = label_width + widths.iter().map(|w| w + 3).sum::<usize>();
        out.push_str(&"-".repeat(rule_len));
        out.push('\n');

        for (row, label) in ATTRIBUTE_LABELS.iter().enumerate() {
            out.push_str(&format!("{label:<label_width$}"));
            for (col, width) in self.cells.iter().zip(widths.iter().copied()) {
                out.push_str(&format!(" | {:<width$}", col[row]));
            }
            out.push('\n');
        }

        out
    }
}

/// Upper-cases the first character and lower-cases the rest.
///
/// `"apple.com"` becomes `"Apple.com"`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn attribute_values(p: &Profile) -> [String; 9] {
    [
        p.description.clone(),
        p.category.replace('/', ">"),
        p.year_founded.to_string(),
        p.employees.clone(),
        p.annual_revenue.clone(),
        p.global_rank.to_string(),
        p.visits.clone(),
        p.bounce_rate.clone(),
        p.avg_visit_duration.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::fixtures::profile;

    fn response(ids: &[&str], outcomes: Vec<Option<Profile>>) -> AnalysisResponse {
        AnalysisResponse {
            company: profile("Microsoft", ids),
            competitors: outcomes,
        }
    }

    #[test]
    fn capitalize_matches_title_rules() {
        assert_eq!(capitalize("apple.com"), "Apple.com");
        assert_eq!(capitalize("GOOGLE.COM"), "Google.com");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn builds_one_column_per_fetched_competitor() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com", "google.com"],
            vec![Some(profile("Apple", &[])), Some(profile("Google", &[]))],
        ));
        assert_eq!(table.columns, vec!["Apple.com", "Google.com"]);
        assert_eq!(table.cell("Description", "Google.com"), Some("Google"));
        assert_eq!(table.cell("Year Founded", "Apple.com"), Some("1975"));
    }

    #[test]
    fn omits_absent_competitors() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com", "google.com"],
            vec![Some(profile("Apple", &[])), None],
        ));
        assert_eq!(table.columns, vec!["Apple.com"]);
        assert!(table.cell("Description", "Google.com").is_none());
    }

    #[test]
    fn ignores_outcomes_without_identifier() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com"],
            vec![Some(profile("Apple", &[])), Some(profile("Orphan", &[]))],
        ));
        assert_eq!(table.columns, vec!["Apple.com"]);
    }

    #[test]
    fn category_separators_become_arrows() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com"],
            vec![Some(profile("Apple", &[]))],
        ));
        assert_eq!(
            table.cell("Category", "Apple.com"),
            Some("Computers Electronics and Technology>Programming and Developer Software")
        );
    }

    #[test]
    fn duplicate_names_keep_first_position_with_later_values() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com", "google.com", "Apple.com"],
            vec![
                Some(profile("First", &[])),
                Some(profile("Google", &[])),
                Some(profile("Second", &[])),
            ],
        ));
        assert_eq!(table.columns, vec!["Apple.com", "Google.com"]);
        assert_eq!(table.cell("Description", "Apple.com"), Some("Second"));
    }

    #[test]
    fn render_lists_labels_in_fixed_order() {
        let table = ComparisonTable::from_response(&response(
            &["apple.com"],
            vec![Some(profile("Apple", &[]))],
        ));
        let text = table.render();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Metric"));
        assert!(lines[0].contains("Apple.com"));
        for (label, line) in ATTRIBUTE_LABELS.iter().zip(&lines[2..]) {
            assert!(line.starts_with(label), "{line:?} should start with {label}");
        }
    }

    #[test]
    fn render_prints_long_cells_in_full() {
        let mut long = profile("x", &[]);
        long.description = "a".repeat(200);
        let table = ComparisonTable::from_response(&response(&["apple.com"], vec![Some(long)]));
        let text = table.render();
        assert!(text.contains(&"a".repeat(200)));
        assert!(text.contains(
            "Computers Electronics and Technology>Programming and Developer Software"
        ));
    }
}
