//! Read command handler

use std::path::Path;

use pagescope::{MountOptions, PageObject, TestFixture, ALTERNATE_CONTAINER, DEFAULT_CONTAINER};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::check::load_page;
use crate::output::{render_readings, OutputFormat, Reading, Reporter};
use crate::ReadArgs;

/// Execute the read command
pub fn execute_read(config: &CliConfig, args: &ReadArgs) -> CliResult<()> {
    let page = load_page(&args.page)?;
    let fixture = fixture_for(&args.html, args.alternate)?;
    let paths = requested_paths(&page, &args.paths)?;

    let readings = read_all(&page, &fixture, &paths)?;
    let format: OutputFormat = args.format.into();
    print!("{}", render_readings(&readings, format, config.use_color())?);

    if config.verbosity.is_verbose() {
        let reporter = Reporter::new(config.color.should_color_stderr(), false);
        reporter.info(&summary(&readings, &args.html, args.alternate));
    }
    Ok(())
}

/// One-line account of a finished read, shown with `-v`
#[must_use]
pub fn summary(readings: &[Reading], html: &Path, alternate: bool) -> String {
    let container = if alternate { ALTERNATE_CONTAINER } else { DEFAULT_CONTAINER };
    format!(
        "read {} properties from {} in {container}",
        readings.len(),
        html.display()
    )
}

/// Mount an HTML file into a fresh fixture
pub fn fixture_for(html: &Path, alternate: bool) -> CliResult<TestFixture> {
    let markup = std::fs::read_to_string(html)?;
    let options = if alternate {
        MountOptions::alternate()
    } else {
        MountOptions::default()
    };

    let mut fixture = TestFixture::new();
    fixture.mount(&markup, options);
    Ok(fixture)
}

/// The paths given, or every declared property when none are
pub fn requested_paths(page: &PageObject, given: &[String]) -> CliResult<Vec<String>> {
    if !given.is_empty() {
        return Ok(given.to_vec());
    }
    let all = page.property_paths();
    if all.is_empty() {
        return Err(CliError::invalid_argument(
            "no property paths given and the definition declares no properties",
        ));
    }
    Ok(all)
}

/// Read each path in order; the first failure aborts
pub fn read_all(
    page: &PageObject,
    fixture: &TestFixture,
    paths: &[String],
) -> CliResult<Vec<Reading>> {
    paths
        .iter()
        .map(|path| -> CliResult<Reading> {
            let value = page.read(path, fixture)?;
            debug!(path = %path, value = %value, "read property");
            Ok(Reading::new(path.clone(), value))
        })
        .collect()
}
