use once_cell::sync::Lazy;

pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata captured by the build script.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

static CURRENT: Lazy<BuildInfo> = Lazy::new(|| BuildInfo {
    version: CLI_VERSION,
    git_hash: env!("PESETA_BUILD_HASH"),
    git_status: env!("PESETA_BUILD_STATUS"),
    timestamp: env!("PESETA_BUILD_TIMESTAMP"),
    target: env!("PESETA_BUILD_TARGET"),
    profile: env!("PESETA_BUILD_PROFILE"),
    rustc: env!("PESETA_BUILD_RUSTC"),
});

pub fn current() -> BuildInfo {
    *CURRENT
}
