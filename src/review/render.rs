//! Plain-text rendering of one review page.
//!
//! Rows are rendered through a Jinja2-compatible template so users can
//! supply their own layout. Variables available to templates:
//!
//! - `page`, `page_count`: 1-based page number and total pages
//! - `total`, `selected`: row and selection counts
//! - `all_selected`, `partially_selected`: header checkbox state
//! - `rows`: list with `number`, `id`, `title`, `description`, `selected`,
//!   `expanded` and `steps` (each with `number`, `action`, `data`,
//!   `expected`)

use minijinja::Environment;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::WorkbenchError;
use crate::models::{TestCase, TestStep};

use super::ReviewTable;

const TITLE_WIDTH: usize = 60;

const DEFAULT_TEMPLATE: &str = "\
Test cases: page {{ page }} of {{ page_count }} ({{ selected }} of {{ total }} selected)
{% for row in rows %}\
[{% if row.selected %}x{% else %} {% endif %}] {{ row.number }}. {{ row.id }}  {{ row.title }}
{% if row.expanded %}\
{% for step in row.steps %}    {{ step.number }}. {{ step.action }}{% if step.data %} [{{ step.data }}]{% endif %} => {{ step.expected }}
{% endfor %}\
{% endif %}\
{% endfor %}";

/// Row of the rendered page.
#[derive(Debug, Clone, Serialize)]
struct RowView {
    number: usize,
    id: String,
    title: String,
    description: String,
    selected: bool,
    expanded: bool,
    steps: Vec<StepView>,
}

#[derive(Debug, Clone, Serialize)]
struct StepView {
    number: u32,
    action: String,
    data: String,
    expected: String,
}

impl From<&TestStep> for StepView {
    fn from(step: &TestStep) -> Self {
        Self {
            number: step.step_number,
            action: step.action.clone(),
            data: step.data.clone(),
            expected: step.expected_result.clone(),
        }
    }
}

/// Snapshot of the rows visible on the current page.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    page: usize,
    page_count: usize,
    total: usize,
    selected: usize,
    all_selected: bool,
    partially_selected: bool,
    rows: Vec<RowView>,
}

impl PageView {
    /// Captures the current page of `table` over `cases`.
    #[must_use]
    pub fn capture(table: &ReviewTable, cases: &[TestCase]) -> Self {
        let rows = table
            .page_range()
            .filter_map(|index| {
                cases.get(index).map(|case| RowView {
                    number: index.saturating_add(1),
                    id: case.display_id(index),
                    title: truncate_to_width(&case.title, TITLE_WIDTH),
                    description: case.description.clone(),
                    selected: table.is_selected(index),
                    expanded: table.is_expanded(index),
                    steps: case.steps.iter().map(StepView::from).collect(),
                })
            })
            .collect();

        Self {
            page: table.page().saturating_add(1),
            page_count: table.page_count(),
            total: table.row_count(),
            selected: table.selected_count(),
            all_selected: table.is_all_selected(),
            partially_selected: table.is_partially_selected(),
            rows,
        }
    }
}

/// Renders the current page with `template`, or the built-in layout.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] when the template does not
/// parse or fails to render.
pub fn render_page(
    table: &ReviewTable,
    cases: &[TestCase],
    template: Option<&str>,
) -> Result<String, WorkbenchError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);

    env.add_template("review", template.unwrap_or(DEFAULT_TEMPLATE))
        .map_err(|e| WorkbenchError::Configuration {
            message: format!("invalid review template: {e}"),
        })?;

    let view = PageView::capture(table, cases);
    let tmpl = env
        .get_template("review")
        .map_err(|e| WorkbenchError::Configuration {
            message: format!("failed to retrieve review template: {e}"),
        })?;

    tmpl.render(&view)
        .map_err(|e| WorkbenchError::Configuration {
            message: format!("review rendering failed: {e}"),
        })
}

/// Cuts `text` to at most `max_width` terminal columns, marking the cut
/// with an ellipsis.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }

    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut truncated = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > budget {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::{render_page, truncate_to_width};
    use crate::error::WorkbenchError;
    use crate::models::test_support::sample_cases;
    use crate::review::ReviewTable;

    #[test]
    fn default_layout_marks_selected_rows() {
        let cases = sample_cases(2);
        let mut table = ReviewTable::new(cases.len());
        table.toggle_selection(1);

        let output = render_page(&table, &cases, None).expect("render should succeed");

        assert!(output.starts_with("Test cases: page 1 of 1 (1 of 2 selected)"));
        assert!(output.contains("[ ] 1. TC_001"));
        assert!(output.contains("[x] 2. TC_002"));
    }

    #[test]
    fn expanded_rows_list_their_steps() {
        let cases = sample_cases(1);
        let mut table = ReviewTable::new(1);
        table.toggle_expanded(0);

        let output = render_page(&table, &cases, None).expect("render should succeed");

        assert!(output.contains("1. Open the help page [NA] => Help page is displayed"), "{output}");
    }

    #[test]
    fn custom_template_sees_counts() {
        let cases = sample_cases(12);
        let mut table = ReviewTable::new(cases.len());
        table.set_page(1);

        let output = render_page(
            &table,
            &cases,
            Some("{{ page }}/{{ page_count }}:{% for r in rows %}{{ r.id }};{% endfor %}"),
        )
        .expect("render should succeed");

        assert_eq!(output, "2/2:TC_011;TC_012;");
    }

    #[test]
    fn broken_template_is_a_configuration_error() {
        let error = render_page(&ReviewTable::new(0), &[], Some("{% for %}"))
            .expect_err("template should be rejected");

        assert!(matches!(error, WorkbenchError::Configuration { .. }));
    }

    #[test]
    fn wide_characters_are_truncated_by_columns() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テスト", 5), "日本…");
    }
}
