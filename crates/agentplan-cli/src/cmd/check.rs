use crate::RequestArgs;
use agentplan_core::check_platform;
use anyhow::Result;

pub fn check(args: &RequestArgs) -> Result<()> {
    let facts = super::request_facts(args)?;
    let (descriptor, platform) = check_platform(&facts)?;
    println!(
        "{}: supported ({}, {})",
        descriptor.platform_tag, platform.install_method, platform.provider
    );
    Ok(())
}

pub fn platforms() {
    for tag in agentplan_core::matrix::supported_tags() {
        println!("{tag}");
    }
}
