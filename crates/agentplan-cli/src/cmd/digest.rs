use crate::RequestArgs;
use anyhow::{Context, Result};

pub fn digest(args: &RequestArgs) -> Result<()> {
    let resolution = super::resolve_request(args)?;
    let digest = resolution
        .plan
        .digest()
        .context("Failed to serialize plan")?;
    println!("{digest}");
    Ok(())
}
