//! The static menu table and the command strings behind each entry.
//!
//! Nothing here touches the terminal or spawns processes: turning an [`Action`] into a
//! command string is a pure function of the [`Platform`] and the configured runner.

use std::fmt;

/// Key the user types to leave the menu. Not part of any section.
pub const EXIT_KEY: &str = "0";

/// Host platform classification, resolved once at startup.
///
/// Only the file-opening actions care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    /// Detects the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Rewrites a forward-slash project path into the platform's native separator.
    fn native_path(self, path: &str) -> String {
        match self {
            Platform::Windows => path.replace('/', "\\"),
            Platform::Posix => path.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Posix => write!(f, "posix"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

/// What a menu option does when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A package script, run as `<runner> run <script>`.
    Script(&'static str),
    /// Install/update dependencies with `<runner> install`.
    Install,
    /// Open a directory in the platform file explorer.
    OpenDirectory(&'static str),
    /// Open a file in a text editor.
    OpenFile(&'static str),
}

impl Action {
    /// Builds the shell command string for this action.
    ///
    /// On POSIX the openers are chained with `||`: macOS `open` first, then `xdg-open`.
    /// Which of the two actually succeeded is not checked.
    pub fn command(&self, platform: Platform, runner: &str) -> String {
        match *self {
            Action::Script(script) => format!("{} run {}", runner, script),
            Action::Install => format!("{} install", runner),
            Action::OpenDirectory(path) => match platform {
                Platform::Windows => format!("explorer {}", platform.native_path(path)),
                Platform::Posix => format!("open {0} || xdg-open {0}", path),
            },
            Action::OpenFile(path) => match platform {
                Platform::Windows => format!("notepad {}", platform.native_path(path)),
                Platform::Posix => format!("open -e {0} || xdg-open {0}", path),
            },
        }
    }
}

/// A single selectable entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    /// The numeric string the user types.
    pub key: &'static str,
    pub label: &'static str,
    pub action: Action,
}

/// A titled group of options, rendered together.
#[derive(Debug, Clone, Copy)]
pub struct MenuSection {
    pub title: &'static str,
    pub options: &'static [MenuOption],
}

/// Every section of the menu, in display order.
pub const MENU: &[MenuSection] = &[
    MenuSection {
        title: "Development",
        options: &[
            MenuOption {
                key: "1",
                label: "Start dev server (http://localhost:4321)",
                action: Action::Script("dev"),
            },
            MenuOption {
                key: "2",
                label: "Build for production",
                action: Action::Script("build"),
            },
            MenuOption {
                key: "3",
                label: "Preview production build",
                action: Action::Script("preview"),
            },
        ],
    },
    MenuSection {
        title: "Code quality",
        options: &[
            MenuOption {
                key: "4",
                label: "Format code (Prettier)",
                action: Action::Script("format"),
            },
            MenuOption {
                key: "5",
                label: "Check formatting",
                action: Action::Script("format:check"),
            },
            MenuOption {
                key: "6",
                label: "Lint code (ESLint)",
                action: Action::Script("lint"),
            },
        ],
    },
    MenuSection {
        title: "Content",
        options: &[
            MenuOption {
                key: "7",
                label: "Open blog posts directory",
                action: Action::OpenDirectory("src/data/blog"),
            },
            MenuOption {
                key: "8",
                label: "Open site config file",
                action: Action::OpenFile("src/config.ts"),
            },
            MenuOption {
                key: "9",
                label: "Open about page",
                action: Action::OpenFile("src/pages/about.md"),
            },
        ],
    },
    MenuSection {
        title: "Other",
        options: &[
            MenuOption {
                key: "10",
                label: "Sync TypeScript types",
                action: Action::Script("sync"),
            },
            MenuOption {
                key: "11",
                label: "Install/update dependencies",
                action: Action::Install,
            },
        ],
    },
];

/// Iterates over every option of every section, in display order.
pub fn all_options() -> impl Iterator<Item = &'static MenuOption> {
    MENU.iter().flat_map(|section| section.options.iter())
}

/// Looks up the option bound to `key`. The caller trims the input first.
pub fn find_option(key: &str) -> Option<&'static MenuOption> {
    all_options().find(|option| option.key == key)
}

/// Highest numeric key on the menu, used in the prompt text.
pub fn max_key() -> usize {
    all_options()
        .filter_map(|option| option.key.parse::<usize>().ok())
        .max()
        .unwrap_or(0)
}
