//! Classify the first command token as a file to run or a module to import.
use std::{
    env,
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::lib::paths::{self, HOME_ENV, USER_BASE_ENV};

/// Outcome of resolving a command token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// An existing file to hand to the backend positionally.
    FilePath(PathBuf),
    /// Not found on disk; left for the interpreter's import machinery.
    ModuleName(OsString),
}

/// Where a resolution was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOrigin {
    AsGiven,
    SearchPath(PathBuf),
    UserBin(PathBuf),
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: ResolvedTarget,
    pub origin: ResolutionOrigin,
}

/// Environment consulted during resolution. Read-only.
#[derive(Debug, Clone, Default)]
pub struct ResolveEnv {
    pub search_path: Vec<PathBuf>,
    pub user_base: Option<OsString>,
    pub home: Option<OsString>,
}

impl ResolveEnv {
    /// Snapshot `PATH`, `PYTHONUSERBASE` and `HOME` from the current process.
    pub fn from_process() -> Self {
        Self {
            search_path: paths::exec_search_path(),
            user_base: env::var_os(USER_BASE_ENV),
            home: env::var_os(HOME_ENV),
        }
    }

    fn user_bin_dir(&self) -> Option<PathBuf> {
        paths::user_bin_dir_from(self.user_base.as_deref(), self.home.as_deref())
    }
}

/// Resolves command tokens against a fixed environment.
#[derive(Debug, Clone)]
pub struct Resolver {
    env: ResolveEnv,
}

impl Resolver {
    pub fn new(env: ResolveEnv) -> Self {
        Self { env }
    }

    pub fn from_process() -> Self {
        Self::new(ResolveEnv::from_process())
    }

    /// Resolve `token`, logging where a user-local script was found.
    pub fn resolve(&self, token: impl AsRef<OsStr>) -> ResolvedTarget {
        let token = token.as_ref();
        let resolution = self.locate(token);
        match &resolution.origin {
            ResolutionOrigin::UserBin(_) => {
                if let ResolvedTarget::FilePath(path) = &resolution.target {
                    info!(
                        target: "debug_launcher::resolver",
                        path = %path.display(),
                        "found {}: {}",
                        token.to_string_lossy(),
                        path.display()
                    );
                }
            }
            ResolutionOrigin::Module => debug!(
                target: "debug_launcher::resolver",
                token = %token.to_string_lossy(),
                "No file found; treating as module"
            ),
            origin => debug!(
                target: "debug_launcher::resolver",
                token = %token.to_string_lossy(),
                origin = ?origin,
                "Resolved launch target"
            ),
        }
        resolution.target
    }

    /// Resolution order, first match wins:
    /// 1. `token` as an existing path (absolute or relative to cwd).
    /// 2. `<dir>/<token>` for each search path directory, in order.
    /// 3. `<user-bin>/<token>`.
    /// 4. `token` as a module name.
    pub fn locate(&self, token: impl AsRef<OsStr>) -> Resolution {
        let token = token.as_ref();
        if Path::new(token).exists() {
            return Resolution {
                target: ResolvedTarget::FilePath(PathBuf::from(token)),
                origin: ResolutionOrigin::AsGiven,
            };
        }

        for dir in &self.env.search_path {
            let candidate = dir.join(token);
            if candidate.exists() {
                return Resolution {
                    target: ResolvedTarget::FilePath(candidate),
                    origin: ResolutionOrigin::SearchPath(dir.clone()),
                };
            }
        }

        if let Some(user_bin) = self.env.user_bin_dir() {
            let candidate = user_bin.join(token);
            if candidate.exists() {
                return Resolution {
                    target: ResolvedTarget::FilePath(candidate),
                    origin: ResolutionOrigin::UserBin(user_bin),
                };
            }
        }

        Resolution {
            target: ResolvedTarget::ModuleName(token.to_os_string()),
            origin: ResolutionOrigin::Module,
        }
    }
}

/// Resolve `token` against the current process environment.
pub fn resolve(token: impl AsRef<OsStr>) -> ResolvedTarget {
    Resolver::from_process().resolve(token)
}
