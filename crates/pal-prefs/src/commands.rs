//! Per-manager command variants.

use serde::Serialize;

use crate::manager::PackageManager;

/// One command written for each package manager.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PackageCommands {
    pub npm: String,
    pub yarn: String,
    pub pnpm: String,
}

impl PackageCommands {
    /// Create a command set.
    pub fn new(npm: impl Into<String>, yarn: impl Into<String>, pnpm: impl Into<String>) -> Self {
        Self {
            npm: npm.into(),
            yarn: yarn.into(),
            pnpm: pnpm.into(),
        }
    }

    /// Global installation of the PalJS CLI.
    #[must_use]
    pub fn cli_installation() -> Self {
        Self::new(
            "npm install -g @paljs/cli",
            "yarn global add @paljs/cli",
            "pnpm add -g @paljs/cli",
        )
    }

    /// Project installation of the PalJS CLI and generator.
    #[must_use]
    pub fn project_installation() -> Self {
        Self::new(
            "npm install @paljs/cli @paljs/generator",
            "yarn add @paljs/cli @paljs/generator",
            "pnpm add @paljs/cli @paljs/generator",
        )
    }

    /// Command for `manager`.
    #[must_use]
    pub fn command_for(&self, manager: PackageManager) -> &str {
        match manager {
            PackageManager::Npm => &self.npm,
            PackageManager::Yarn => &self.yarn,
            PackageManager::Pnpm => &self.pnpm,
        }
    }

    /// Manager name and the rest of its command.
    ///
    /// The first occurrence of the manager name is removed from the command
    /// and the remainder trimmed.
    #[must_use]
    pub fn split_for(&self, manager: PackageManager) -> (&'static str, String) {
        let name = manager.as_str();
        let rest = self.command_for(manager).replacen(name, "", 1);
        (name, rest.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_command_for_each_manager() {
        let commands = PackageCommands::cli_installation();

        assert_eq!(commands.command_for(PackageManager::Npm), "npm install -g @paljs/cli");
        assert_eq!(commands.command_for(PackageManager::Yarn), "yarn global add @paljs/cli");
        assert_eq!(commands.command_for(PackageManager::Pnpm), "pnpm add -g @paljs/cli");
    }

    #[test]
    fn test_split_for() {
        let commands = PackageCommands::project_installation();

        assert_eq!(
            commands.split_for(PackageManager::Pnpm),
            ("pnpm", "add @paljs/cli @paljs/generator".to_owned())
        );
        assert_eq!(
            commands.split_for(PackageManager::Npm),
            ("npm", "install @paljs/cli @paljs/generator".to_owned())
        );
    }

    #[test]
    fn test_split_without_manager_prefix() {
        let commands = PackageCommands::new("npx prisma generate", "yarn prisma generate", "pnpm dlx prisma generate");

        assert_eq!(
            commands.split_for(PackageManager::Npm),
            ("npm", "npx prisma generate".to_owned())
        );
    }
}
