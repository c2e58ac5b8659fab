//! Error types

/// Errors surfaced by the editor.
///
/// The editor itself never fails; the only error source is the
/// transport refusing output.
#[derive(Debug)]
pub enum Error {
    Write(embedded_io::ErrorKind),
}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        match *self {
            Error::Write(e) => e.kind(),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Error::Write(e) => write!(f, "write error: {:?}", e),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for Error {}
