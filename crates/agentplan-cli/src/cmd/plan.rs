use crate::render::plan_table;
use crate::{Format, RequestArgs};
use anyhow::Result;

pub fn plan(args: &RequestArgs, format: Format) -> Result<()> {
    let resolution = super::resolve_request(args)?;

    match format {
        Format::Table => {
            println!(
                "{} ({}, {})",
                resolution.descriptor.platform_tag,
                resolution.platform.install_method,
                resolution.platform.provider
            );
            println!("{}", plan_table(&resolution.plan));
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&resolution.plan)?);
        }
    }
    Ok(())
}
