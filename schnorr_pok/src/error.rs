use arithm::ArithmError;
use ark_std::fmt;
use crypto_utils::ByteTreeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigmaError {
    Arithm(ArithmError),
    ByteTree(ByteTreeError),
    /// (expected, found)
    ArityMismatch(usize, usize),
    /// Index of the true branch of an OR proof is not below the number of branches, (index, branches)
    BranchIndexOutOfBounds(usize, usize),
    /// The protocol can only precompute once the instance is known
    PrecomputeRequiresInstance,
    /// Instances of the branches of an OR proof serialize to byte trees of different shapes
    NonUniformInstances,
    /// Composed protocols draw challenges from different fields
    DistinctChallengeSpaces,
    EmptyComposition,
}

impl From<ArithmError> for SigmaError {
    fn from(e: ArithmError) -> Self {
        Self::Arithm(e)
    }
}

impl From<ByteTreeError> for SigmaError {
    fn from(e: ByteTreeError) -> Self {
        Self::ByteTree(e)
    }
}

impl fmt::Display for SigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithm(e) => write!(f, "arithmetic error: {}", e),
            Self::ByteTree(e) => write!(f, "byte tree error: {}", e),
            Self::ArityMismatch(e, g) => write!(f, "expected {} components, found {}", e, g),
            Self::BranchIndexOutOfBounds(i, n) => {
                write!(f, "branch index {} out of bounds for {} branches", i, n)
            }
            Self::PrecomputeRequiresInstance => {
                write!(f, "precomputation needs the instance")
            }
            Self::NonUniformInstances => write!(f, "branch instances have different shapes"),
            Self::DistinctChallengeSpaces => write!(f, "components use distinct challenge spaces"),
            Self::EmptyComposition => write!(f, "composition of no protocols"),
        }
    }
}
