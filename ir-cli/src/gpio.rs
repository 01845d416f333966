//! sysfs GPIO edge source
//!
//! Exposes a kernel GPIO line through `/sys/class/gpio` and implements
//! the library's [`EdgeSource`] contract on top of it: export the pin,
//! set direction `in` and edge `both`, then wait for level changes with
//! `poll(POLLPRI)` on the value file. The poll runs with a short timeout
//! so a pending [`CancelToken`] is noticed promptly instead of blocking
//! indefinitely.

use ir_decoder::{CancelToken, DecoderError, EdgeEvent, EdgeRead, EdgeSource, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How long one poll waits before re-checking the cancel token
const POLL_TICK_MS: i32 = 100;

/// An exported sysfs GPIO pin, unexported again on drop
pub struct SysfsGpio {
    pin: u32,
}

impl SysfsGpio {
    /// Export `pin` and configure it for input with edge detection
    pub fn export_input(pin: u32) -> Result<Self> {
        // Export: /sys/class/gpio/export. EBUSY means the pin is already
        // exported, which is fine for our purposes.
        if let Err(e) = write_sysfs(Path::new("/sys/class/gpio/export"), &pin.to_string()) {
            if !already_exported(&e, pin) {
                return Err(DecoderError::Gpio(format!(
                    "failed to export GPIO {}: {}",
                    pin, e
                )));
            }
        }

        let gpio = Self { pin };

        // Direction: /sys/class/gpio%d/direction
        write_sysfs(&gpio.path("direction"), "in")
            .map_err(|e| DecoderError::Gpio(format!("failed to set direction: {}", e)))?;

        // Edge: /sys/class/gpio%d/edge
        write_sysfs(&gpio.path("edge"), "both")
            .map_err(|e| DecoderError::Gpio(format!("failed to set edge mode: {}", e)))?;

        Ok(gpio)
    }

    /// Open the value file for polling
    pub fn open_value(&self) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .open(self.path("value"))
            .map_err(|e| DecoderError::Gpio(format!("failed to open GPIO {} value: {}", self.pin, e)))
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    fn path(&self, leaf: &str) -> PathBuf {
        PathBuf::from(format!("/sys/class/gpio/gpio{}/{}", self.pin, leaf))
    }
}

impl Drop for SysfsGpio {
    fn drop(&mut self) {
        if let Err(e) = write_sysfs(Path::new("/sys/class/gpio/unexport"), &self.pin.to_string()) {
            log::warn!("failed to unexport GPIO {}: {}", self.pin, e);
        }
    }
}

/// Blocking edge source over an exported sysfs GPIO line
pub struct SysfsEdgeSource {
    gpio: SysfsGpio,
    value: File,
    invert: bool,
    token: CancelToken,
    last_edge: Instant,
}

impl SysfsEdgeSource {
    /// Export `pin` and start watching it for edges
    ///
    /// `invert` flips the raw hardware polarity so the decoder sees
    /// logical levels (IR receiver modules idle high).
    pub fn open(pin: u32, invert: bool, token: CancelToken) -> Result<Self> {
        let gpio = SysfsGpio::export_input(pin)?;
        let mut value = gpio.open_value()?;

        // Drain the initial readiness so the first poll reports a real
        // edge rather than the current state.
        let mut scratch = String::new();
        value.read_to_string(&mut scratch)?;

        Ok(Self {
            gpio,
            value,
            invert,
            token,
            last_edge: Instant::now(),
        })
    }

    pub fn pin(&self) -> u32 {
        self.gpio.pin()
    }

    /// Read the logical level currently on the line
    fn read_level(&mut self) -> Result<bool> {
        self.value.seek(SeekFrom::Start(0))?;
        let mut buf = String::new();
        self.value.read_to_string(&mut buf)?;
        let raw = buf.trim_start().starts_with('1');
        Ok(raw != self.invert)
    }
}

impl EdgeSource for SysfsEdgeSource {
    fn next_edge(&mut self) -> Result<EdgeRead> {
        loop {
            if self.token.is_cancelled() {
                return Ok(EdgeRead::Cancelled);
            }
            match poll_pri(self.value.as_raw_fd(), POLL_TICK_MS)? {
                0 => continue, // timeout, re-check the token
                _ => break,
            }
        }

        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last_edge).as_secs_f64() * 1000.0;
        self.last_edge = now;

        let level = self.read_level()?;
        Ok(EdgeRead::Edge(EdgeEvent { level, elapsed_ms }))
    }
}

/// Wait up to `timeout_ms` for an exception condition on `fd`
///
/// Returns the number of ready descriptors (0 on timeout). EINTR is
/// reported as a timeout so the caller re-checks its cancel token, which
/// is exactly what a signal-interrupted wait needs.
fn poll_pri(fd: RawFd, timeout_ms: i32) -> Result<i32> {
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLPRI,
        revents: 0,
    };

    let rc = unsafe { libc::poll(&mut pollfd, 1, timeout_ms) };
    if rc >= 0 {
        return Ok(rc);
    }

    let err = std::io::Error::last_os_error();
    if err.kind() == ErrorKind::Interrupted {
        Ok(0)
    } else {
        Err(DecoderError::Gpio(format!("poll failed: {}", err)))
    }
}

fn write_sysfs(path: &Path, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).open(path)?;
    writeln!(file, "{}", value)
}

/// EBUSY from the export file means the pin is exported already
fn already_exported(err: &std::io::Error, pin: u32) -> bool {
    let busy = err.raw_os_error() == Some(libc::EBUSY);
    if busy {
        log::debug!("GPIO {} already exported, reusing", pin);
    }
    busy
}
