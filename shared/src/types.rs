/// Workspace-wide fallible result used outside the domain core.
pub type Result<T> = anyhow::Result<T>;

pub type Error = anyhow::Error;
