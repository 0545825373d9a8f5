//! Generates test cases from a story or a typed requirement, then prints
//! the review page and optionally exports or uploads the results.

use std::cell::RefCell;
use std::io::{self, Write};

use casewright::{
    CasewrightConfig, GenerationMode, ReviewTable, Workbench, WorkbenchError, files, render_page,
};

use super::output::{write_export_path, write_page};
use super::workbench::{attach_context, flush_notifications};

/// Runs one generation in `mode` and reviews the result.
///
/// Progress notifications go to stderr; the review page and export notice
/// go to `writer`.
///
/// # Errors
///
/// Returns configuration errors for missing inputs and any workbench error.
pub async fn run<W: Write>(
    workbench: &Workbench,
    config: &CasewrightConfig,
    mode: GenerationMode,
    writer: &mut W,
) -> Result<(), WorkbenchError> {
    let manual_input = match mode {
        GenerationMode::Story => {
            prepare_story(workbench, config).await?;
            config.optional_requirement()?
        }
        GenerationMode::Manual => Some(config.resolve_requirement()?),
    };
    attach_context(workbench, config).await?;
    flush_notifications(workbench, &mut io::stderr().lock())?;

    let count = workbench.generate(mode, manual_input.as_deref()).await?;
    flush_notifications(workbench, &mut io::stderr().lock())?;
    tracing::debug!("reviewing {count} generated test cases");

    let table = ReviewTable::attach(workbench.store());
    write_review(workbench, &table, config, writer)?;

    if let Some(path) = config.output.as_deref() {
        let bytes = workbench.download().await?;
        let written = files::write_bytes(path, &bytes)?;
        write_export_path(writer, &written)?;
    }
    if config.upload {
        workbench.upload_to_tracker(&table).await?;
    }
    flush_notifications(workbench, &mut io::stderr().lock())
}

async fn prepare_story(
    workbench: &Workbench,
    config: &CasewrightConfig,
) -> Result<(), WorkbenchError> {
    let story = config.require_story()?;
    let api_key = config.resolve_jira_api_key()?;
    let jql = config.require_jql()?;

    workbench.fetch_stories(&api_key, jql).await?;
    workbench.select_story(story)
}

/// Applies the configured page and row selection, then writes the page
/// with every visible row expanded.
///
/// # Errors
///
/// Returns [`WorkbenchError::Configuration`] for rows outside the table or
/// an unusable review template.
pub fn write_review<W: Write>(
    workbench: &Workbench,
    table: &RefCell<ReviewTable>,
    config: &CasewrightConfig,
    writer: &mut W,
) -> Result<(), WorkbenchError> {
    {
        let mut review = table.borrow_mut();
        for index in config.selected_rows()? {
            if index >= review.row_count() {
                return Err(WorkbenchError::Configuration {
                    message: format!(
                        "row {} is outside the {} generated test cases",
                        index.saturating_add(1),
                        review.row_count()
                    ),
                });
            }
            if !review.is_selected(index) {
                review.toggle_selection(index);
            }
        }
        review.set_page(config.page_index());
        for index in review.page_range() {
            if !review.is_expanded(index) {
                review.toggle_expanded(index);
            }
        }
    }

    let template = config
        .review_template
        .as_deref()
        .map(files::read_text)
        .transpose()?;
    let page = workbench
        .store()
        .with_test_scripts(|cases| render_page(&table.borrow(), cases, template.as_deref()))?;
    write_page(writer, &page)
}

#[cfg(test)]
mod tests {
    use casewright::{
        CasewrightConfig, ReviewTable, TestCase, TestStep, Workbench, WorkbenchError,
    };
    use rstest::{fixture, rstest};

    use super::write_review;
    use crate::cli::workbench::build;

    fn case(number: usize) -> TestCase {
        TestCase {
            id: format!("TC_{number:03}"),
            title: format!("Case {number}"),
            description: String::new(),
            steps: vec![TestStep {
                step_number: 1,
                action: format!("Perform action {number}"),
                data: String::new(),
                expected_result: "It works".to_owned(),
            }],
        }
    }

    #[fixture]
    fn workbench() -> Workbench {
        let workbench = build(&CasewrightConfig::default()).expect("workbench should build");
        workbench
            .store()
            .set_test_scripts((1..=12).map(case).collect());
        workbench
    }

    #[rstest]
    fn review_marks_selected_rows_and_expands_page(workbench: Workbench) {
        let table = ReviewTable::attach(workbench.store());
        let config = CasewrightConfig {
            select: Some("2,11".to_owned()),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        write_review(&workbench, &table, &config, &mut buffer).expect("review should render");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.starts_with("Test cases: page 1 of 2 (2 of 12 selected)"),
            "unexpected header: {output}"
        );
        assert!(output.contains("[x] 2. TC_002"), "row 2 should be selected: {output}");
        assert!(output.contains("1. Perform action 1 => It works"), "{output}");
        assert!(!output.contains("TC_011"), "row 11 is on page 2: {output}");
        assert_eq!(table.borrow().selected_indices(), vec![1, 10]);
    }

    #[rstest]
    fn review_prints_requested_page(workbench: Workbench) {
        let table = ReviewTable::attach(workbench.store());
        let config = CasewrightConfig {
            page: Some(2),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        write_review(&workbench, &table, &config, &mut buffer).expect("review should render");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(output.starts_with("Test cases: page 2 of 2"), "{output}");
        assert!(output.contains("[ ] 12. TC_012"), "{output}");
    }

    #[rstest]
    fn review_rejects_rows_outside_the_table(workbench: Workbench) {
        let table = ReviewTable::attach(workbench.store());
        let config = CasewrightConfig {
            select: Some("13".to_owned()),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        let result = write_review(&workbench, &table, &config, &mut buffer);

        assert!(
            matches!(result, Err(WorkbenchError::Configuration { ref message }) if message.contains("row 13")),
            "unexpected result: {result:?}"
        );
    }
}
