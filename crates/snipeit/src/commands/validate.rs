//! `snipeit validate`

use serde::Serialize;

use snipeit_core::SnipeIt;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Validation {
    display_name: String,
    description: String,
    base_url: String,
}

pub async fn handle(connector: &SnipeIt, global: &GlobalOpts) -> Result<(), CliError> {
    connector.validate().await?;

    let metadata = connector.metadata();
    let result = Validation {
        display_name: metadata.display_name,
        description: metadata.description,
        base_url: connector.client().base_url().to_string(),
    };

    let out = output::render_single(
        &global.output,
        &result,
        |v| {
            format!(
                "{} credentials valid\nBase URL: {}",
                output::status_cell("✓", true),
                v.base_url
            )
        },
        |v| v.base_url.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
