use arithm::ArithmError;
use ark_std::fmt;
use schnorr_pok::SigmaError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptionError {
    Arithm(ArithmError),
    Sigma(SigmaError),
    /// A key can only be widened to a positive width
    InvalidWidth(usize),
    /// Number of components of a public key that is not a pair
    MalformedPublicKey(usize),
}

impl From<ArithmError> for EncryptionError {
    fn from(e: ArithmError) -> Self {
        Self::Arithm(e)
    }
}

impl From<SigmaError> for EncryptionError {
    fn from(e: SigmaError) -> Self {
        Self::Sigma(e)
    }
}

impl fmt::Display for EncryptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithm(e) => write!(f, "arithmetic error: {}", e),
            Self::Sigma(e) => write!(f, "proof error: {}", e),
            Self::InvalidWidth(w) => write!(f, "invalid key width {}", w),
            Self::MalformedPublicKey(n) => {
                write!(f, "public key has {} components instead of 2", n)
            }
        }
    }
}
