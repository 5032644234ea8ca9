//! Plugin contract handlers: check-arg and info

use crate::commands::CheckArgArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use sonarcov::{create_plugin, ExportPlugin};

/// Execute the check-arg command
pub fn execute_check_arg(config: &CliConfig, args: &CheckArgArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let plugin = create_plugin();

    match plugin.check_argument(args.argument.as_deref()) {
        Ok(()) => {
            reporter.success(&format!(
                "argument accepted: {}",
                args.argument.as_deref().unwrap_or("(none)")
            ));
            Ok(())
        }
        Err(e) => {
            reporter.failure(&e.to_string());
            Err(e.into())
        }
    }
}

/// Execute the info command
pub fn execute_info() {
    print!("{}", plugin_info(create_plugin().as_ref()));
}

/// Plugin version and argument description
#[must_use]
pub fn plugin_info(plugin: &dyn ExportPlugin) -> String {
    format!(
        "Plugin version: {}\nArgument: {}\n",
        plugin.export_plugin_version(),
        plugin.argument_help_description()
    )
}
