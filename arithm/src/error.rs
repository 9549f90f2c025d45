use ark_std::{fmt, string::String};
use crypto_utils::ByteTreeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmError {
    ByteTree(ByteTreeError),
    /// Operands belong to different rings
    DistinctRings,
    /// Operands belong to different groups
    DistinctGroups,
    /// (expected, found)
    ArityMismatch(usize, usize),
    /// Component at this index is not an element of the corresponding sub-ring
    WrongSubring(usize),
    /// Component at this index is not an element of the corresponding sub-group
    WrongSubgroup(usize),
    NotInvertible,
    /// Integer representative is not canonically reduced
    NotReduced,
    NotInSubgroup,
    NotOnCurve,
    NegativeInteger,
    /// (max, given)
    InputTooLong(usize, usize),
    /// Length prefix found while decoding exceeds the encode length
    IllegalEncodedLength(usize),
    UnknownGroupName(String),
    UnsupportedEncoding(u32),
    InvalidOrder,
    InvalidGroupDescription,
    /// Product of zero rings or groups
    EmptyProduct,
    /// (index, width)
    IndexOutOfBounds(usize, usize),
    InvalidWidth(usize),
}

impl From<ByteTreeError> for ArithmError {
    fn from(e: ByteTreeError) -> Self {
        Self::ByteTree(e)
    }
}

impl fmt::Display for ArithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteTree(e) => write!(f, "byte tree: {}", e),
            Self::ArityMismatch(e, g) => write!(f, "expected {} components, found {}", e, g),
            Self::WrongSubring(i) => write!(f, "component {} belongs to the wrong ring", i),
            Self::WrongSubgroup(i) => write!(f, "component {} belongs to the wrong group", i),
            Self::InputTooLong(m, g) => write!(f, "input of {} bytes exceeds {}", g, m),
            Self::IllegalEncodedLength(l) => write!(f, "illegal length of encoded data {}", l),
            Self::UnknownGroupName(n) => write!(f, "unknown group name {}", n),
            Self::UnsupportedEncoding(e) => write!(f, "unsupported encoding {}", e),
            Self::IndexOutOfBounds(i, w) => write!(f, "index {} out of bounds for width {}", i, w),
            Self::InvalidWidth(w) => write!(f, "invalid width {}", w),
            other => write!(f, "{:?}", other),
        }
    }
}
