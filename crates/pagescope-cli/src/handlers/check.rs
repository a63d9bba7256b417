//! Check command handler

use std::path::Path;

use pagescope::PageObject;
use tracing::debug;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::tree::render_tree;
use crate::CheckArgs;

/// Execute the check command
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let page = load_page(&args.page)?;
    let use_color = config.use_color();

    if !config.verbosity.is_quiet() {
        print!("{}", render_tree(&page, use_color));
    }

    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());
    reporter.success(&format!("{} is a valid page definition", args.page.display()));
    Ok(())
}

/// Load and build a page definition
pub fn load_page(path: &Path) -> CliResult<PageObject> {
    debug!(path = %path.display(), "loading page definition");
    let page = PageObject::from_path(path)?;
    debug!(
        root = page.name(),
        properties = page.property_paths().len(),
        "page definition built"
    );
    Ok(page)
}
