use std::fmt;

/// All fallible outcomes surfaced by this crate.
///
/// Construction errors (`EmptyKeyword`, `DomainMismatch`, `CaseFoldingUnsupported`)
/// are returned from `KeywordStore::add`, never panicked, and are atomic per call:
/// a rejected `add` leaves the store exactly as it was before the call.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Attempted to add a zero-length keyword.
    #[error("keyword must not be empty")]
    EmptyKeyword,

    /// Mixed byte and text keywords in the same store.
    #[error("keyword domain {found:?} does not match store domain {expected:?}")]
    DomainMismatch {
        expected: Domain,
        found: Domain,
    },

    /// `ignore_case` requested for a domain/keyword combination that cannot
    /// support it. Reserved for forward compatibility with the error
    /// taxonomy this crate commits to; under the current domain model (byte
    /// keywords carry no attached text encoding) every byte-mode `ignore_case`
    /// request is well-defined as ASCII-only folding, so this variant is
    /// never currently constructed. See DESIGN.md.
    #[error("ignore_case is not supported for this keyword domain")]
    CaseFoldingUnsupported,

    /// The underlying chunk source failed while streaming.
    #[error("stream read failed")]
    StreamReadError(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// A serialized automaton buffer failed structural validation.
    #[error("corrupt automaton serialization: {0}")]
    CorruptSerialization(String),
}

/// The symbol alphabet in use for one [`crate::KeywordStore`] — bytes or
/// Unicode scalar values. Homogeneous per store.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Domain {
    Byte,
    Text,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Byte => write!(f, "byte"),
            Domain::Text => write!(f, "text"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
