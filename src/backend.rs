//! Terminal backends.
//!
//! [`Backend`] is the seam between the toolkit and the terminal device.
//! [`TtyBackend`] talks to the real tty through libc (termios raw mode,
//! TIOCGWINSZ size query, O_NONBLOCK burst reads). [`TestBackend`] replays a
//! scripted byte stream and captures output, so widget loops can run in
//! tests without a terminal.

use std::io;

use crate::error::{Error, Result};

// =============================================================================
// Backend trait
// =============================================================================

/// Access to the terminal device.
///
/// `read_byte` blocks for the next input byte. `read_byte_burst` is only
/// used while assembling an escape sequence: it must not block, returning
/// `None` when the input burst is exhausted, and must leave the descriptor
/// in its original blocking state on every exit path.
pub trait Backend {
    /// Terminal extents as (columns, rows).
    fn size(&self) -> Result<(u16, u16)>;

    /// Enter raw (non-canonical, no-echo) mode.
    fn enter_raw(&mut self) -> Result<()>;

    /// Restore the terminal settings saved by `enter_raw`.
    fn leave_raw(&mut self) -> Result<()>;

    /// Whether raw mode is currently active.
    fn is_raw(&self) -> bool;

    /// Blocking read of one input byte.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Non-blocking read of one byte from the current input burst.
    fn read_byte_burst(&mut self) -> io::Result<Option<u8>>;

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

// =============================================================================
// TtyBackend
// =============================================================================

/// The real terminal, on stdin/stdout.
#[cfg(unix)]
pub struct TtyBackend {
    fd: libc::c_int,
    saved: Option<libc::termios>,
}

#[cfg(unix)]
impl TtyBackend {
    /// Open the backend on stdin. Fails if stdin is not a tty.
    pub fn new() -> Result<Self> {
        let fd = libc::STDIN_FILENO;
        if unsafe { libc::isatty(fd) } == 0 {
            return Err(Error::NotATty);
        }
        Ok(Self { fd, saved: None })
    }

    /// Number of retries while waiting for the rest of an input burst.
    const BURST_RETRIES: u32 = 5;

    fn fcntl_flags(&self) -> io::Result<libc::c_int> {
        let flags = unsafe { libc::fcntl(self.fd, libc::F_GETFL) };
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(flags)
    }

    fn set_fcntl_flags(&self, flags: libc::c_int) -> io::Result<()> {
        if unsafe { libc::fcntl(self.fd, libc::F_SETFL, flags) } < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn read_raw(&self) -> io::Result<u8> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(byte),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

#[cfg(unix)]
impl Backend for TtyBackend {
    fn size(&self) -> Result<(u16, u16)> {
        let mut ws = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
        if rc != 0 || ws.ws_col == 0 || ws.ws_row == 0 {
            return Err(Error::TerminalSize(io::Error::last_os_error()));
        }
        Ok((ws.ws_col, ws.ws_row))
    }

    fn enter_raw(&mut self) -> Result<()> {
        if self.saved.is_some() {
            return Ok(());
        }
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(self.fd, &mut termios) != 0 {
                return Err(Error::RawMode(io::Error::last_os_error()));
            }
            let original = termios;

            termios.c_iflag &= !(libc::IGNBRK
                | libc::BRKINT
                | libc::PARMRK
                | libc::ISTRIP
                | libc::INLCR
                | libc::IGNCR
                | libc::ICRNL
                | libc::IXON);
            termios.c_oflag &= !libc::OPOST;
            termios.c_lflag &=
                !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
            termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
            termios.c_cflag |= libc::CS8;
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(self.fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(Error::RawMode(io::Error::last_os_error()));
            }
            self.saved = Some(original);
        }
        log::trace!("entered raw mode");
        Ok(())
    }

    fn leave_raw(&mut self) -> Result<()> {
        if let Some(original) = self.saved.take() {
            if unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, &original) } != 0 {
                return Err(Error::RawMode(io::Error::last_os_error()));
            }
            log::trace!("left raw mode");
        }
        Ok(())
    }

    fn is_raw(&self) -> bool {
        self.saved.is_some()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        loop {
            match self.read_raw() {
                Ok(byte) => return Ok(byte),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_byte_burst(&mut self) -> io::Result<Option<u8>> {
        // Switch to non-blocking, try a bounded number of reads, and restore
        // the original flags before returning on every path.
        let flags = self.fcntl_flags()?;
        self.set_fcntl_flags(flags | libc::O_NONBLOCK)?;

        let mut result = Ok(None);
        for attempt in 0..Self::BURST_RETRIES {
            match self.read_raw() {
                Ok(byte) => {
                    result = Ok(Some(byte));
                    break;
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::Interrupted =>
                {
                    // The burst may still be in flight from the terminal.
                    if attempt + 1 < Self::BURST_RETRIES {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                }
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }

        self.set_fcntl_flags(flags)?;
        result
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        use std::io::Write;
        io::stdout().lock().write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        use std::io::Write;
        io::stdout().lock().flush()
    }
}

#[cfg(unix)]
impl Drop for TtyBackend {
    fn drop(&mut self) {
        // Restore cooked mode even on panic unwind.
        let _ = self.leave_raw();
    }
}

// =============================================================================
// TestBackend
// =============================================================================

/// In-memory backend for tests: scripted input, captured output, fixed size.
pub struct TestBackend {
    input: std::collections::VecDeque<u8>,
    output: Vec<u8>,
    size: (u16, u16),
    raw: bool,
}

impl TestBackend {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            input: std::collections::VecDeque::new(),
            output: Vec::new(),
            size: (cols, rows),
            raw: false,
        }
    }

    /// Queue bytes to be returned by subsequent reads.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().copied());
    }

    /// Everything written so far, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Backend for TestBackend {
    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }

    fn enter_raw(&mut self) -> Result<()> {
        self.raw = true;
        Ok(())
    }

    fn leave_raw(&mut self) -> Result<()> {
        self.raw = false;
        Ok(())
    }

    fn is_raw(&self) -> bool {
        self.raw
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn read_byte_burst(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
