//! Byte trees: the self-describing nested encoding used for every serialized ring element, group
//! element, proof and ciphertext.
//!
//! A leaf holding `data` is written as `0x01 | len(data) as u32 BE | data` and a node holding
//! children `c_0, .., c_{l-1}` as `0x00 | l as u32 BE | c_0 | .. | c_{l-1}`.

use crate::error::ByteTreeError;
use ark_std::{
    fmt,
    str::FromStr,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use serde_with::{DeserializeFromStr, SerializeDisplay};

pub const LEAF: u8 = 1;
pub const NODE: u8 = 0;

/// Size of the type byte and the length field
pub const HEADER_SIZE: usize = 5;

/// Maximum nesting accepted when reading untrusted bytes
pub const MAX_DEPTH: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(SerializeDisplay, DeserializeFromStr))]
pub enum ByteTree {
    Leaf(Vec<u8>),
    Node(Vec<ByteTree>),
}

impl ByteTree {
    pub fn leaf(data: impl Into<Vec<u8>>) -> Self {
        Self::Leaf(data.into())
    }

    pub fn node(children: Vec<ByteTree>) -> Self {
        Self::Node(children)
    }

    /// Leaf holding `value` as 4 big-endian bytes
    pub fn from_u32(value: u32) -> Self {
        Self::Leaf(value.to_be_bytes().to_vec())
    }

    /// Leaf holding the ASCII bytes of `s`
    pub fn from_ascii(s: &str) -> Self {
        Self::Leaf(s.as_bytes().to_vec())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Result<&[u8], ByteTreeError> {
        match self {
            Self::Leaf(d) => Ok(d),
            Self::Node(_) => Err(ByteTreeError::ExpectedLeaf),
        }
    }

    pub fn as_node(&self) -> Result<&[ByteTree], ByteTreeError> {
        match self {
            Self::Node(c) => Ok(c),
            Self::Leaf(_) => Err(ByteTreeError::ExpectedNode),
        }
    }

    /// Data of a leaf that must hold exactly `len` bytes
    pub fn as_leaf_of_len(&self, len: usize) -> Result<&[u8], ByteTreeError> {
        let data = self.as_leaf()?;
        if data.len() != len {
            return Err(ByteTreeError::WrongLeafLength(len, data.len()));
        }
        Ok(data)
    }

    /// Children of a node that must have exactly `count` children
    pub fn as_node_of_width(&self, count: usize) -> Result<&[ByteTree], ByteTreeError> {
        let children = self.as_node()?;
        if children.len() != count {
            return Err(ByteTreeError::WrongChildCount(count, children.len()));
        }
        Ok(children)
    }

    /// Reads a 4-byte big-endian leaf
    pub fn to_u32(&self) -> Result<u32, ByteTreeError> {
        let d = self.as_leaf_of_len(4)?;
        Ok(u32::from_be_bytes([d[0], d[1], d[2], d[3]]))
    }

    /// Number of bytes of the serialized form
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(d) => HEADER_SIZE + d.len(),
            Self::Node(c) => HEADER_SIZE + c.iter().map(|c| c.size()).sum::<usize>(),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size());
        self.write_to(&mut bytes);
        bytes
    }

    /// Appends the serialized form to `dest`
    pub fn write_to(&self, dest: &mut Vec<u8>) {
        match self {
            Self::Leaf(d) => {
                dest.push(LEAF);
                dest.extend_from_slice(&(d.len() as u32).to_be_bytes());
                dest.extend_from_slice(d);
            }
            Self::Node(children) => {
                dest.push(NODE);
                dest.extend_from_slice(&(children.len() as u32).to_be_bytes());
                for c in children {
                    c.write_to(dest);
                }
            }
        }
    }

    /// Decodes a byte tree that must span all of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ByteTreeError> {
        let (tree, read) = Self::read(bytes, 0)?;
        if read != bytes.len() {
            return Err(ByteTreeError::TrailingBytes(bytes.len() - read));
        }
        Ok(tree)
    }

    /// Decodes a byte tree starting at `offset`. Returns the tree and the number of bytes read.
    pub fn read(bytes: &[u8], offset: usize) -> Result<(Self, usize), ByteTreeError> {
        let (tree, end) = Self::read_inner(bytes, offset, 0)?;
        Ok((tree, end - offset))
    }

    fn read_inner(
        bytes: &[u8],
        offset: usize,
        depth: usize,
    ) -> Result<(Self, usize), ByteTreeError> {
        if depth > MAX_DEPTH {
            return Err(ByteTreeError::TooDeep(MAX_DEPTH));
        }
        if bytes.len() < offset + HEADER_SIZE {
            return Err(ByteTreeError::Truncated(offset));
        }
        let tag = bytes[offset];
        if tag != LEAF && tag != NODE {
            return Err(ByteTreeError::UnknownType(tag, offset));
        }
        let length = u32::from_be_bytes([
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
            bytes[offset + 4],
        ]) as usize;
        if length == 0 {
            return Err(ByteTreeError::NonPositiveLength(offset));
        }
        let mut index = offset + HEADER_SIZE;

        if tag == LEAF {
            if bytes.len() - index < length {
                return Err(ByteTreeError::MissingBytes {
                    offset,
                    needed: length,
                });
            }
            let data = bytes[index..index + length].to_vec();
            Ok((Self::Leaf(data), index + length))
        } else {
            // Every child takes at least a header so the count can be bounded before allocating.
            let mut children = Vec::with_capacity(length.min((bytes.len() - index) / HEADER_SIZE));
            for _ in 0..length {
                let (child, next) = Self::read_inner(bytes, index, depth + 1)?;
                children.push(child);
                index = next;
            }
            Ok((Self::Node(children), index))
        }
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses a hexadecimal representation. Anything up to and including a leading `::` is
    /// treated as an ASCII comment and discarded.
    pub fn from_hex(s: &str) -> Result<Self, ByteTreeError> {
        let s = match s.find("::") {
            Some(start) if start > 0 => &s[start + 2..],
            _ => s,
        };
        let bytes = if s.len() % 2 == 1 {
            let mut padded = String::with_capacity(s.len() + 1);
            padded.push('0');
            padded.push_str(s);
            hex::decode(padded)
        } else {
            hex::decode(s)
        }
        .map_err(|_| ByteTreeError::InvalidHex)?;
        Self::from_bytes(&bytes)
    }

    /// Nested list rendering with leaves as quoted hex strings. Meant for debugging.
    pub fn to_pretty_string(&self) -> String {
        let mut s = String::new();
        self.pretty_inner("", &mut s);
        s
    }

    fn pretty_inner(&self, indent: &str, out: &mut String) {
        match self {
            Self::Leaf(d) => {
                out.push_str(indent);
                out.push('"');
                out.push_str(&hex::encode(d));
                out.push('"');
            }
            Self::Node(children) => {
                out.push_str(indent);
                out.push_str("[\n");
                let mut inner = indent.to_string();
                inner.push_str("    ");
                for (i, c) in children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                    }
                    c.pretty_inner(&inner, out);
                }
                out.push('\n');
                out.push_str(indent);
                out.push(']');
            }
        }
    }

    /// True when both trees have the same node arities and leaf lengths everywhere
    pub fn has_same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(a), Self::Leaf(b)) => a.len() == b.len(),
            (Self::Node(a), Self::Node(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.has_same_shape(y))
            }
            _ => false,
        }
    }
}

impl From<Vec<u8>> for ByteTree {
    fn from(data: Vec<u8>) -> Self {
        Self::Leaf(data)
    }
}

impl From<&[u8]> for ByteTree {
    fn from(data: &[u8]) -> Self {
        Self::Leaf(data.to_vec())
    }
}

impl From<Vec<ByteTree>> for ByteTree {
    fn from(children: Vec<ByteTree>) -> Self {
        Self::Node(children)
    }
}

impl fmt::Display for ByteTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ByteTree {
    type Err = ByteTreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
