use ark_std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteTreeError {
    /// The type byte at the given offset is neither a leaf nor a node marker
    UnknownType(u8, usize),
    /// A leaf length or a node child count of zero at the given offset
    NonPositiveLength(usize),
    /// Leaf at the given offset declares more bytes than are available
    MissingBytes { offset: usize, needed: usize },
    /// Input ended before a header could be read
    Truncated(usize),
    /// Bytes left over after the top-level tree
    TrailingBytes(usize),
    /// Nesting deeper than the decoder accepts
    TooDeep(usize),
    InvalidHex,
    ExpectedLeaf,
    ExpectedNode,
    /// (expected, found)
    WrongChildCount(usize, usize),
    /// (expected, found)
    WrongLeafLength(usize, usize),
}

impl fmt::Display for ByteTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(t, o) => write!(f, "unknown byte tree type {} at offset {}", t, o),
            Self::NonPositiveLength(o) => write!(f, "non-positive length at offset {}", o),
            Self::MissingBytes { offset, needed } => write!(
                f,
                "leaf at offset {} is missing bytes, needs {}",
                offset, needed
            ),
            Self::Truncated(o) => write!(f, "truncated header at offset {}", o),
            Self::TrailingBytes(n) => write!(f, "{} trailing bytes after byte tree", n),
            Self::TooDeep(d) => write!(f, "byte tree nesting exceeds {}", d),
            Self::InvalidHex => write!(f, "invalid hexadecimal string"),
            Self::ExpectedLeaf => write!(f, "expected a leaf"),
            Self::ExpectedNode => write!(f, "expected a node"),
            Self::WrongChildCount(e, g) => write!(f, "expected {} children, found {}", e, g),
            Self::WrongLeafLength(e, g) => write!(f, "expected a leaf of {} bytes, found {}", e, g),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrgError {
    /// Seed shorter than the required number of bytes, (required, given)
    SeedTooShort(usize, usize),
}

impl fmt::Display for PrgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedTooShort(r, g) => write!(f, "seed of {} bytes, needs {}", g, r),
        }
    }
}
