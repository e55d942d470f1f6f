// SimVerdict - platform/fs.rs
//
// Log reading and text decoding.
//
// Regression logs arrive from many capture paths: plain simulator output,
// PowerShell `Tee-Object` (UTF-16LE, with or without BOM), editors that add
// a UTF-8 BOM, and Japanese Windows consoles writing CP932. Decoding never
// fails: undecodable bytes become U+FFFD and classification proceeds on
// whatever text survives.

use crate::util::constants;
use crate::util::error::{ExportError, ReadError};
use encoding_rs::{Encoding, SHIFT_JIS, UTF_16BE, UTF_16LE};
use std::borrow::Cow;
use std::io;
use std::path::Path;
use std::time::Duration;

const UTF16LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16BE_BOM: &[u8] = b"\xFE\xFF";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Retry limits for transient I/O errors.
const MAX_RETRIES: u32 = 3;
const RETRY_DELAYS_MS: [u64; 2] = [50, 100];

/// Encoding chosen for a log buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-16LE with a byte-order mark.
    Utf16LeBom,
    /// UTF-16BE with a byte-order mark.
    Utf16BeBom,
    /// UTF-8 with a byte-order mark.
    Utf8Bom,
    /// UTF-16LE without a BOM, detected from the share of NUL bytes.
    Utf16LeSniffed,
    /// Well-formed UTF-8 (includes plain ASCII).
    Utf8,
    /// Well-formed Shift_JIS / CP932.
    ShiftJis,
    /// Nothing decoded cleanly; UTF-8 with replacement characters.
    Utf8Lossy,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf16LeBom => "utf-16le (bom)",
            TextEncoding::Utf16BeBom => "utf-16be (bom)",
            TextEncoding::Utf8Bom => "utf-8 (bom)",
            TextEncoding::Utf16LeSniffed => "utf-16le (sniffed)",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::ShiftJis => "shift_jis",
            TextEncoding::Utf8Lossy => "utf-8 (lossy)",
        }
    }
}

/// Decoded log text plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLog {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Read and decode the full content of a log file.
///
/// The file handle is closed before decoding starts. Only I/O failures are
/// reported; decoding itself cannot fail.
pub fn read_log(path: &Path) -> Result<DecodedLog, ReadError> {
    let bytes = read_bytes_with_retry(path).map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = decode_log_bytes(&bytes);
    tracing::debug!(
        file = %path.display(),
        bytes = bytes.len(),
        encoding = decoded.encoding.label(),
        "Log decoded"
    );
    Ok(decoded)
}

/// Decode raw log bytes, choosing the encoding by BOM, then by NUL density,
/// then UTF-8, then Shift_JIS, and finally lossy UTF-8.
pub fn decode_log_bytes(bytes: &[u8]) -> DecodedLog {
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        return decoded(decode_with(UTF_16LE, rest), TextEncoding::Utf16LeBom);
    }
    if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        return decoded(decode_with(UTF_16BE, rest), TextEncoding::Utf16BeBom);
    }
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return decoded(String::from_utf8_lossy(rest), TextEncoding::Utf8Bom);
    }

    if looks_like_utf16le(bytes) {
        return decoded(decode_with(UTF_16LE, bytes), TextEncoding::Utf16LeSniffed);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return decoded(Cow::Borrowed(text), TextEncoding::Utf8);
    }

    if let Some(text) = SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes) {
        return decoded(text, TextEncoding::ShiftJis);
    }

    decoded(String::from_utf8_lossy(bytes), TextEncoding::Utf8Lossy)
}

/// More than a tenth of the bytes are NUL: ASCII text stored as UTF-16LE.
fn looks_like_utf16le(bytes: &[u8]) -> bool {
    let nuls = bytes.iter().filter(|&&b| b == 0).count();
    nuls > bytes.len() / constants::NUL_RATIO_DIVISOR
}

fn decode_with<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Cow<'a, str> {
    encoding.decode_without_bom_handling(bytes).0
}

fn decoded(text: Cow<'_, str>, encoding: TextEncoding) -> DecodedLog {
    DecodedLog {
        text: text.into_owned(),
        encoding,
    }
}

/// Create (or truncate) an export file, creating missing parent directories.
pub fn create_output(path: &Path) -> Result<std::fs::File, ExportError> {
    let io_err = |source: io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::File::create(path).map_err(io_err)
}

/// Read a whole file, retrying transient errors with capped backoff.
/// Logs on network shares occasionally report `Interrupted` or `WouldBlock`
/// while the simulator is still flushing them.
fn read_bytes_with_retry(path: &Path) -> io::Result<Vec<u8>> {
    let mut last_err: Option<io::Error> = None;

    for attempt in 0..MAX_RETRIES {
        match std::fs::read(path) {
            Ok(bytes) => return Ok(bytes),
            Err(e) if is_transient_error(&e) => {
                tracing::debug!(
                    file = %path.display(),
                    attempt = attempt + 1,
                    error = %e,
                    "Transient I/O error, retrying"
                );
                if let Some(delay) = retry_delay(attempt) {
                    std::thread::sleep(delay);
                }
                last_err = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err.unwrap_or_else(|| io::Error::other("Unknown read error")))
}

/// Pause before the attempt after `attempt`; `None` once no attempt is left.
fn retry_delay(attempt: u32) -> Option<Duration> {
    if attempt + 1 >= MAX_RETRIES {
        return None;
    }
    RETRY_DELAYS_MS
        .get(attempt as usize)
        .map(|ms| Duration::from_millis(*ms))
}

/// Returns true for transient I/O errors that are worth retrying.
fn is_transient_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted | io::ErrorKind::TimedOut
    )
}
