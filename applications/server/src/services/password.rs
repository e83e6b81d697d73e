/// Password hashing service
use crate::error::Result;

/// One-way credential codec over bcrypt.
///
/// Hashes are salted per call, so the same plaintext never produces
/// the same opaque value twice. Verification runs in constant time
/// inside the bcrypt crate.
#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    pub fn hash(&self, password: &str) -> Result<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// A malformed stored hash verifies as false rather than erroring;
    /// the caller only ever learns match or no match.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
