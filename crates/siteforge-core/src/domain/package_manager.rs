use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// The JavaScript package manager driving installs and script invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Pnpm, Self::Yarn];

    /// Binary name looked up on `PATH`.
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }

    /// Prefix used inside script aliases and hooks to call another alias.
    pub const fn run_prefix(self) -> &'static str {
        match self {
            Self::Npm => "npm run",
            Self::Pnpm => "pnpm run",
            Self::Yarn => "yarn run",
        }
    }

    /// Lockfile-respecting install used by the CI pipeline.
    pub const fn ci_install(self) -> &'static str {
        match self {
            Self::Npm => "npm ci",
            Self::Pnpm => "pnpm install --frozen-lockfile",
            Self::Yarn => "yarn install --frozen-lockfile",
        }
    }

    /// Workflow steps that must run before `actions/setup-node`.
    ///
    /// Each line carries the step-list indentation of the generated workflow.
    pub const fn ci_setup_steps(self) -> &'static str {
        match self {
            Self::Pnpm => concat!(
                "      - uses: pnpm/action-setup@v4\n",
                "        with:\n",
                "          version: 9\n",
            ),
            Self::Npm | Self::Yarn => "",
        }
    }

    /// Invocation adding `packages` (`name` or `name@range`) as
    /// development-only dependencies.
    pub fn install_dev<I, S>(self, packages: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let base: &[&str] = match self {
            Self::Npm => &["install", "--save-dev"],
            Self::Pnpm | Self::Yarn => &["add", "-D"],
        };
        Invocation::new(
            self.program(),
            base.iter()
                .map(|arg| arg.to_string())
                .chain(packages.into_iter().map(Into::into)),
        )
    }

    /// Invocation running a locally installed tool binary.
    pub fn exec(self, tool: &str) -> Invocation {
        match self {
            Self::Npm => Invocation::new("npx", [tool]),
            Self::Pnpm => Invocation::new("pnpm", ["exec", tool]),
            Self::Yarn => Invocation::new("yarn", [tool]),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            other => Err(DomainError::UnknownPackageManager(other.to_string())),
        }
    }
}

/// A single external command: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
