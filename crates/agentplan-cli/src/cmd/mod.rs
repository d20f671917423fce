pub mod check;
pub mod completions;
pub mod digest;
pub mod plan;

use crate::RequestArgs;
use crate::config::Request;
use agentplan_core::{HostInventory, Resolution, resolve_with};
use agentplan_schema::HostFacts;
use anyhow::{Context, Result};

/// Load the request, layer the flags over it and resolve.
pub(crate) fn resolve_request(args: &RequestArgs) -> Result<Resolution> {
    let request = load_request(args)?;
    let resolution = resolve_with(&request.facts, &request.build, &request.params)?;
    Ok(resolution)
}

/// Load the request and produce host facts only.
pub(crate) fn request_facts(args: &RequestArgs) -> Result<HostFacts> {
    let request = load_request(args)?;
    Ok(request.facts.host_facts()?)
}

fn load_request(args: &RequestArgs) -> Result<Request> {
    Request::discover(args.request.as_deref())
        .context("Failed to load request")?
        .apply(&args.overrides())
        .context("Invalid command-line override")
}
