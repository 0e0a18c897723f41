// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo setupterm tigetstr ncurses

//! [`CapabilitySource`] backed by the host terminfo database.

use crate::{CapabilitySource, ConsoleError, ConsoleResult, TermDbErrorKind};
use std::{env,
          fmt::{Debug, Formatter},
          path::PathBuf};
use terminfo::{Database, Value};

/// Capabilities for one terminal type, loaded lazily from terminfo.
///
/// The database entry is read on the first [`ensure_loaded()`] call and kept for the
/// lifetime of this value. Until then every lookup returns `None`.
///
/// [`ensure_loaded()`]: CapabilitySource::ensure_loaded
pub struct TerminfoCapabilities {
    term: Option<String>,
    database: Option<Database>,
}

impl Debug for TerminfoCapabilities {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminfoCapabilities")
            .field("term", &self.term)
            .field("loaded", &self.database.is_some())
            .finish()
    }
}

impl TerminfoCapabilities {
    /// Use the terminal type named by the `TERM` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            term: env::var("TERM").ok().filter(|it| !it.is_empty()),
            database: None,
        }
    }

    /// Use an explicit terminal type (eg: `"xterm-256color"`).
    #[must_use]
    pub fn for_terminal(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            database: None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool { self.database.is_some() }

    fn load(term: &str) -> ConsoleResult<Database> {
        match Database::from_name(term) {
            Ok(database) => Ok(database),
            Err(terminfo::Error::NotFound) => {
                let kind = if search_dirs().iter().any(|dir| dir.is_dir()) {
                    TermDbErrorKind::NoSuchTerminal
                } else {
                    TermDbErrorKind::DatabaseNotFound
                };
                Err(ConsoleError::TerminalDatabase {
                    kind,
                    term: term.to_string(),
                })
            }
            Err(other) => Err(ConsoleError::TerminalDatabase {
                kind: TermDbErrorKind::Other(other.to_string()),
                term: term.to_string(),
            }),
        }
    }
}

impl CapabilitySource for TerminfoCapabilities {
    fn ensure_loaded(&mut self) -> ConsoleResult<()> {
        if self.database.is_some() {
            return Ok(());
        }

        let Some(term) = self.term.as_deref() else {
            return Err(ConsoleError::TerminalDatabase {
                kind: TermDbErrorKind::NoSuchTerminal,
                term: String::new(),
            });
        };

        let database = Self::load(term)?;
        tracing::debug!(term, "loaded terminfo entry");
        self.database = Some(database);
        Ok(())
    }

    fn string(&self, name: &str) -> Option<&[u8]> {
        match self.database.as_ref()?.raw(name)? {
            Value::String(bytes) if !bytes.is_empty() => Some(bytes.as_slice()),
            _ => None,
        }
    }

    fn number(&self, name: &str) -> Option<i32> {
        match self.database.as_ref()?.raw(name)? {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }
}

/// Directories the terminfo loader searches, in the order ncurses uses.
fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Some(dir) = env::var_os("TERMINFO") {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(home) = env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".terminfo"));
    }
    if let Some(list) = env::var_os("TERMINFO_DIRS") {
        dirs.extend(env::split_paths(&list).filter(|it| !it.as_os_str().is_empty()));
    }
    dirs.extend(
        [
            "/etc/terminfo",
            "/lib/terminfo",
            "/usr/share/terminfo",
            "/usr/lib/terminfo",
            "/usr/share/lib/terminfo",
        ]
        .into_iter()
        .map(PathBuf::from),
    );

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookups_before_load_are_empty() {
        let source = TerminfoCapabilities::for_terminal("xterm");
        assert!(!source.is_loaded());
        assert_eq!(source.string("kcuu1"), None);
        assert_eq!(source.number("lines"), None);
    }

    #[test]
    fn test_missing_term_is_no_such_terminal() {
        let mut source = TerminfoCapabilities {
            term: None,
            database: None,
        };
        let err = source.ensure_loaded().unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::TerminalDatabase {
                kind: TermDbErrorKind::NoSuchTerminal,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_terminal_fails() {
        let mut source =
            TerminfoCapabilities::for_terminal("r3bl-no-such-terminal-type-exists");
        let err = source.ensure_loaded().unwrap_err();
        assert!(matches!(err, ConsoleError::TerminalDatabase { .. }));
        assert!(!source.is_loaded());
    }

    #[test]
    fn test_search_dirs_include_system_locations() {
        let dirs = search_dirs();
        assert!(dirs.contains(&PathBuf::from("/usr/share/terminfo")));
    }
}
