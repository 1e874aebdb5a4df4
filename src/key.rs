//! Key events and the raw-mode escape-sequence decoder.
//!
//! One logical keypress in, one [`Key`] out:
//! - plain bytes map to Enter/Tab/Backspace, Ctrl-letters, printable chars
//!   (including multi-byte UTF-8)
//! - ESC switches to non-blocking burst reads; zero follow-up bytes is the
//!   bare Escape key, otherwise the sequence is assembled (numbered CSI
//!   sequences read on until `~`, with a bounded retry budget) and matched
//!   against the [`KeyMap`]
//! - sequences the map does not know come back as [`Key::Unknown`], which
//!   callers treat as a no-op keypress
//!
//! The KeyMap is built once, from the default table plus a `$TERM`-keyed
//! override for terminals that emit non-standard Home/End codes, and never
//! changes within a session.

use std::collections::HashMap;
use std::io;

use crate::backend::Backend;

// =============================================================================
// Key
// =============================================================================

/// A decoded keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    /// A printable character.
    Char(char),
    /// Ctrl plus a lowercase letter (Ctrl-C is `Ctrl('c')`).
    Ctrl(char),
    /// An escape sequence the key table does not know. Treat as a no-op.
    Unknown(Vec<u8>),
}

// =============================================================================
// KeyMap
// =============================================================================

/// Escape-sequence → key table, fixed for the session.
pub struct KeyMap {
    sequences: HashMap<Vec<u8>, Key>,
}

/// Default escape sequences for symbolic keys.
const DEFAULT_SEQUENCES: &[(&[u8], Key)] = &[
    (b"\x1bOP", Key::F(1)),
    (b"\x1bOQ", Key::F(2)),
    (b"\x1bOR", Key::F(3)),
    (b"\x1bOS", Key::F(4)),
    (b"\x1b[15~", Key::F(5)),
    (b"\x1b[17~", Key::F(6)),
    (b"\x1b[18~", Key::F(7)),
    (b"\x1b[19~", Key::F(8)),
    (b"\x1b[20~", Key::F(9)),
    (b"\x1b[21~", Key::F(10)),
    (b"\x1b[23~", Key::F(11)),
    (b"\x1b[24~", Key::F(12)),
    (b"\x1b[A", Key::Up),
    (b"\x1b[B", Key::Down),
    (b"\x1b[C", Key::Right),
    (b"\x1b[D", Key::Left),
    (b"\x1b[H", Key::Home),
    (b"\x1b[F", Key::End),
    (b"\x1b[2~", Key::Insert),
    (b"\x1b[3~", Key::Delete),
    (b"\x1b[5~", Key::PageUp),
    (b"\x1b[6~", Key::PageDown),
];

/// Per-terminal-type overrides, keyed by `$TERM`.
///
/// screen/tmux report Home and End as numbered CSI sequences.
const TERM_OVERRIDES: &[(&str, &[(&[u8], Key)])] = &[(
    "screen-256color",
    &[(b"\x1b[1~", Key::Home), (b"\x1b[4~", Key::End)],
)];

impl KeyMap {
    /// Build the table for a terminal type (the value of `$TERM`).
    pub fn for_term(term: Option<&str>) -> Self {
        let mut sequences: HashMap<Vec<u8>, Key> = DEFAULT_SEQUENCES
            .iter()
            .map(|(seq, key)| (seq.to_vec(), key.clone()))
            .collect();

        if let Some(term) = term {
            for (name, overrides) in TERM_OVERRIDES {
                if *name == term {
                    for (seq, key) in *overrides {
                        // Overrides replace, so the default sequence for
                        // the same key stops resolving.
                        sequences.retain(|_, mapped| mapped != key);
                        sequences.insert(seq.to_vec(), key.clone());
                    }
                }
            }
        }

        Self { sequences }
    }

    /// Build the table from the process environment.
    pub fn from_env() -> Self {
        Self::for_term(std::env::var("TERM").ok().as_deref())
    }

    fn lookup(&self, sequence: &[u8]) -> Option<Key> {
        self.sequences.get(sequence).cloned()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::for_term(None)
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Further single-byte reads allowed while completing a numbered CSI
/// sequence (`ESC [ 1 5 ~` and friends).
const CSI_READ_BUDGET: u32 = 5;

/// Decode one keypress from the backend.
///
/// Blocks for the first byte; escape-sequence continuation bytes are pulled
/// with non-blocking burst reads so a lone ESC keypress is not mistaken for
/// the start of a sequence.
pub fn decode<B: Backend>(backend: &mut B, map: &KeyMap) -> io::Result<Key> {
    let first = backend.read_byte()?;

    match first {
        crate::ansi::ESC => decode_escape(backend, map),
        b'\r' | b'\n' => Ok(Key::Enter),
        b'\t' => Ok(Key::Tab),
        0x7f => Ok(Key::Backspace),
        0x01..=0x1a => Ok(Key::Ctrl((first + b'a' - 1) as char)),
        0x20..=0x7e => Ok(Key::Char(first as char)),
        0x80..=0xff => decode_utf8(backend, first),
        other => Ok(Key::Unknown(vec![other])),
    }
}

fn decode_escape<B: Backend>(backend: &mut B, map: &KeyMap) -> io::Result<Key> {
    let mut sequence = vec![crate::ansi::ESC];

    // Up to two bytes arrive in the same burst for the short forms
    // (ESC O x and ESC [ x). None at all means a bare Escape keypress.
    for _ in 0..2 {
        match backend.read_byte_burst()? {
            Some(byte) => sequence.push(byte),
            None => break,
        }
    }
    if sequence.len() == 1 {
        return Ok(Key::Escape);
    }

    // Numbered CSI sequence: keep reading until the terminating '~',
    // within a bounded budget so a broken stream cannot wedge the loop.
    if sequence.len() == 3 && sequence[2].is_ascii_digit() && sequence[2] != b'0' {
        let mut budget = CSI_READ_BUDGET;
        while *sequence.last().unwrap_or(&0) != b'~' && budget > 0 {
            match backend.read_byte_burst()? {
                Some(byte) => sequence.push(byte),
                None => break,
            }
            budget -= 1;
        }
    }

    Ok(map
        .lookup(&sequence)
        .unwrap_or_else(|| Key::Unknown(sequence)))
}

fn decode_utf8<B: Backend>(backend: &mut B, first: u8) -> io::Result<Key> {
    let expected = if first & 0xe0 == 0xc0 {
        2
    } else if first & 0xf0 == 0xe0 {
        3
    } else if first & 0xf8 == 0xf0 {
        4
    } else {
        return Ok(Key::Unknown(vec![first]));
    };

    let mut bytes = vec![first];
    while bytes.len() < expected {
        match backend.read_byte_burst()? {
            Some(byte) => bytes.push(byte),
            None => return Ok(Key::Unknown(bytes)),
        }
    }

    if let Ok(s) = std::str::from_utf8(&bytes) {
        if let Some(ch) = s.chars().next() {
            return Ok(Key::Char(ch));
        }
    }
    Ok(Key::Unknown(bytes))
}

// =============================================================================
// Tests
// =============================================================================
