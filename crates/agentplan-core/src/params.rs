//! Checks on user-supplied parameters.

use crate::error::PlanError;
use agentplan_schema::{BuildCoordinates, Parameters, Version};

/// The validated package version.
///
/// The version is embedded verbatim in filenames and URLs, so anything that
/// would change their shape is rejected here rather than downstream.
///
/// # Errors
///
/// Returns [`PlanError::MissingParameter`] when `package_version` is absent or
/// blank, and [`PlanError::InvalidParameter`] when it contains whitespace or
/// a path separator.
pub fn package_version(params: &Parameters) -> Result<&Version, PlanError> {
    let version = params
        .package_version
        .as_ref()
        .filter(|v| !v.is_blank())
        .ok_or(PlanError::MissingParameter {
            name: "package_version",
        })?;

    if version
        .as_str()
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        return Err(PlanError::InvalidParameter {
            name: "package_version",
            value: version.to_string(),
        });
    }

    Ok(version)
}

/// Check that the coordinates name a compiling server and a build.
///
/// Both are embedded in every download and repository URL.
///
/// # Errors
///
/// Returns [`PlanError::MissingParameter`] naming `servername` or `pe_build`
/// when either is blank.
pub fn build_coordinates(coords: &BuildCoordinates) -> Result<(), PlanError> {
    if coords.compiling_server.trim().is_empty() {
        return Err(PlanError::MissingParameter { name: "servername" });
    }
    if coords.build_id.trim().is_empty() {
        return Err(PlanError::MissingParameter { name: "pe_build" });
    }
    Ok(())
}
