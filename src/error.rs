use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, covering all errors this library can return.
///
/// The variants fall into the taxonomy the stripping engine distinguishes:
/// input faults ([`Error::Malformed`], [`Error::RecursionLimit`]), I/O faults
/// ([`Error::FileError`]), configuration faults ([`Error::Config`]) and
/// synchronization faults ([`Error::LockError`]). No
/// fault is retried internally; the first error aborts the run and surfaces
/// to the host unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The module metadata is inconsistent and could not be stripped.
    ///
    /// This covers programmer-visible input faults: a property with neither
    /// getter nor setter, an indexer rewrite that cannot locate its accessor
    /// token, a delegate type without an `Invoke` method, or a type link
    /// whose target is no longer alive. The source location where the
    /// malformation was detected is captured for debugging.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Recursion limit reached.
    ///
    /// Base-type chains are walked with a bounded loop so malformed cyclic
    /// metadata cannot hang the engine. The associated value is the depth
    /// cap that was exceeded.
    #[error("Reached the maximum inheritance depth allowed - {0}")]
    RecursionLimit(usize),

    /// File I/O error.
    ///
    /// Wraps standard I/O errors from directory and file creation while
    /// writing stripped sources. Propagated unchanged to the host.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Invalid run configuration.
    ///
    /// Raised before any type is processed, e.g. for an empty output root.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error during lock acquisition.
    ///
    /// Raised when the progress channel's action slot is poisoned by a
    /// panicking observer thread.
    #[error("Lock error - {0}")]
    LockError(String),
}
