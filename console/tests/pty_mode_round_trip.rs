// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios ptsname grantpt unlockpt openpt NOCTTY ICANON VMIN VTIME

//! Switches a real pseudo terminal into raw mode and back, and checks that the
//! attributes the kernel reports afterwards match the ones captured before.

use pretty_assertions::assert_eq;
use r3bl_console::{CapabilityTable, ConsoleIn, ConsoleInConfig, KeyCode, ReadDeadline,
                   ScriptedLineEditor, TerminalMode, Tty};
use rustix::{fd::OwnedFd,
             pty::{OpenptFlags, grantpt, openpt, ptsname, unlockpt},
             termios::{LocalModes, SpecialCodeIndex, Termios, tcgetattr}};
use serial_test::serial;
use std::{ffi::OsStr, fs::File, os::unix::ffi::OsStrExt, time::Duration};

/// Returns the master side and the opened slave side, or `None` if this machine has no
/// pseudo terminals to hand out.
fn open_pty() -> Option<(OwnedFd, File)> {
    let master = openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY).ok()?;
    grantpt(&master).ok()?;
    unlockpt(&master).ok()?;
    let name = ptsname(&master, Vec::new()).ok()?;
    let slave = File::options()
        .read(true)
        .write(true)
        .open(OsStr::from_bytes(name.as_bytes()))
        .ok()?;
    Some((master, slave))
}

fn assert_same_line_discipline(before: &Termios, after: &Termios) {
    assert_eq!(before.local_modes, after.local_modes);
    assert_eq!(before.input_modes, after.input_modes);
    assert_eq!(before.output_modes, after.output_modes);
    assert_eq!(
        before.special_codes[SpecialCodeIndex::VMIN],
        after.special_codes[SpecialCodeIndex::VMIN]
    );
    assert_eq!(
        before.special_codes[SpecialCodeIndex::VTIME],
        after.special_codes[SpecialCodeIndex::VTIME]
    );
}

#[test]
#[serial]
fn test_raw_then_line_restores_attributes() {
    let Some((master, slave)) = open_pty() else {
        eprintln!("no pseudo terminal available, skipping");
        return;
    };
    let probe = slave.try_clone().unwrap();
    let before = tcgetattr(&probe).unwrap();
    assert!(before.local_modes.contains(LocalModes::ICANON));

    let tty = Tty::from_file(slave);
    assert!(tty.is_terminal());
    let mut console = ConsoleIn::new(
        tty,
        CapabilityTable::vt100(),
        ScriptedLineEditor::default(),
        ConsoleInConfig::default().with_escape_sequence_timeout(Duration::from_millis(500)),
    );

    console.set_mode(TerminalMode::Raw).unwrap();
    let raw = tcgetattr(&probe).unwrap();
    assert!(!raw.local_modes.contains(LocalModes::ICANON));
    assert!(!raw.local_modes.contains(LocalModes::ECHO));
    assert_eq!(raw.special_codes[SpecialCodeIndex::VMIN], 1);
    assert_eq!(raw.special_codes[SpecialCodeIndex::VTIME], 0);
    // Signal generation is left alone.
    assert_eq!(
        raw.local_modes.contains(LocalModes::ISIG),
        before.local_modes.contains(LocalModes::ISIG)
    );

    rustix::io::write(&master, b"a\x1b[A").unwrap();
    let deadline = || ReadDeadline::after(Duration::from_secs(2));
    let key = console.read_char(deadline()).unwrap();
    assert_eq!((key.code, key.ch), (KeyCode::Char, 'a'));
    let key = console.read_char(deadline()).unwrap();
    assert_eq!(key.code, KeyCode::Up);

    console.set_mode(TerminalMode::Line).unwrap();
    assert_same_line_discipline(&before, &tcgetattr(&probe).unwrap());

    // Raw again, then close: close restores too.
    console.set_mode(TerminalMode::Raw).unwrap();
    console.close().unwrap();
    assert_eq!(console.mode(), TerminalMode::Line);
    assert_same_line_discipline(&before, &tcgetattr(&probe).unwrap());
}

#[test]
#[serial]
fn test_drop_restores_attributes() {
    let Some((_master, slave)) = open_pty() else {
        eprintln!("no pseudo terminal available, skipping");
        return;
    };
    let probe = slave.try_clone().unwrap();
    let before = tcgetattr(&probe).unwrap();

    {
        let mut console = ConsoleIn::new(
            Tty::from_file(slave),
            CapabilityTable::vt100(),
            ScriptedLineEditor::default(),
            ConsoleInConfig::default(),
        );
        console.set_mode(TerminalMode::Raw).unwrap();
        assert!(!tcgetattr(&probe).unwrap().local_modes.contains(LocalModes::ICANON));
    }

    assert_same_line_discipline(&before, &tcgetattr(&probe).unwrap());
}

#[test]
#[serial]
fn test_immediate_read_on_idle_pty_times_out() {
    let Some((_master, slave)) = open_pty() else {
        eprintln!("no pseudo terminal available, skipping");
        return;
    };
    let mut console = ConsoleIn::new(
        Tty::from_file(slave),
        CapabilityTable::vt100(),
        ScriptedLineEditor::default(),
        ConsoleInConfig::default(),
    );

    let err = console.read_char(ReadDeadline::Immediate).unwrap_err();
    assert!(err.is_timeout());
    assert_eq!(console.mode(), TerminalMode::Raw);
}
