//! Protocol configurations.

use derive_builder::{Builder, UninitializedFieldError};

use crate::{tbcs, SecretValue, TransferError};

/// Default bit width of messages and pads.
pub const DEFAULT_BIT_SIZE: usize = 128;

impl From<UninitializedFieldError> for TransferError {
    fn from(err: UninitializedFieldError) -> Self {
        TransferError::config(err.to_string())
    }
}

/// 1-out-of-n OT configuration.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate", error = "TransferError"))]
pub struct OneOfNConfig {
    /// Number of messages, must be a power of two.
    n: usize,
    /// Bit width of messages and pads.
    #[builder(default = "DEFAULT_BIT_SIZE")]
    bit_size: usize,
    /// Number of independent invocations in a batch.
    #[builder(default = "1")]
    count: usize,
}

impl OneOfNConfig {
    /// Creates a new builder for the configuration.
    pub fn builder() -> OneOfNConfigBuilder {
        OneOfNConfigBuilder::default()
    }

    /// Returns the number of messages.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the bit width of messages and pads.
    pub fn bit_size(&self) -> usize {
        self.bit_size
    }

    /// Returns the number of invocations in a batch.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `log2(n)`, the length of the index shares.
    pub fn depth(&self) -> usize {
        self.n.trailing_zeros() as usize
    }

    /// Checks that `messages` holds `n` messages of at most `bit_size` bits.
    pub fn check_messages(&self, messages: &[SecretValue]) -> Result<(), TransferError> {
        check_messages(self.n, self.bit_size, messages)
    }
}

impl OneOfNConfigBuilder {
    fn validate(&self) -> Result<(), TransferError> {
        if let Some(n) = self.n {
            tbcs::depth(n)?;
        }
        check_common(self.bit_size, self.count)
    }
}

/// Ordered t-out-of-n OT configuration.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(build_fn(validate = "Self::validate", error = "TransferError"))]
pub struct PriorityConfig {
    /// Number of messages.
    n: usize,
    /// Number of ranked selections, `1 <= t <= n`.
    t: usize,
    /// Bit width of messages and pads.
    #[builder(default = "DEFAULT_BIT_SIZE")]
    bit_size: usize,
    /// Number of independent invocations in a batch.
    #[builder(default = "1")]
    count: usize,
}

impl PriorityConfig {
    /// Creates a new builder for the configuration.
    pub fn builder() -> PriorityConfigBuilder {
        PriorityConfigBuilder::default()
    }

    /// Returns the number of messages.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the number of ranked selections.
    pub fn t(&self) -> usize {
        self.t
    }

    /// Returns the bit width of messages and pads.
    pub fn bit_size(&self) -> usize {
        self.bit_size
    }

    /// Returns the number of invocations in a batch.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Checks that `messages` holds `n` messages of at most `bit_size` bits.
    pub fn check_messages(&self, messages: &[SecretValue]) -> Result<(), TransferError> {
        check_messages(self.n, self.bit_size, messages)
    }

    /// Checks that `priorities` is a ranked selection of `t` distinct indices in `[0, n)`.
    pub fn check_priorities(&self, priorities: &[usize]) -> Result<(), TransferError> {
        if priorities.len() != self.t {
            return Err(TransferError::config(format!(
                "expected {} priorities, got {}",
                self.t,
                priorities.len()
            )));
        }

        let mut seen = vec![false; self.n];
        for &p in priorities {
            TransferError::check_range(p, self.n)?;
            if std::mem::replace(&mut seen[p], true) {
                return Err(TransferError::config(format!(
                    "priority index {p} is selected more than once"
                )));
            }
        }

        Ok(())
    }
}

impl PriorityConfigBuilder {
    fn validate(&self) -> Result<(), TransferError> {
        if self.n == Some(0) {
            return Err(TransferError::config("the number of messages must be positive"));
        }

        match (self.n, self.t) {
            (_, Some(0)) => {
                return Err(TransferError::config("at least one priority must be selected"))
            }
            (Some(n), Some(t)) if t > n => {
                return Err(TransferError::config(format!(
                    "cannot select {t} priorities out of {n} messages"
                )))
            }
            _ => {}
        }

        check_common(self.bit_size, self.count)
    }
}

pub(crate) fn check_messages(
    n: usize,
    bit_size: usize,
    messages: &[SecretValue],
) -> Result<(), TransferError> {
    if messages.len() != n {
        return Err(TransferError::config(format!(
            "expected {n} messages, got {}",
            messages.len()
        )));
    }

    if let Some((i, msg)) = messages
        .iter()
        .enumerate()
        .find(|(_, msg)| msg.bits() > bit_size as u64)
    {
        return Err(TransferError::config(format!(
            "message {i} has {} bits, expected at most {bit_size}",
            msg.bits()
        )));
    }

    Ok(())
}

fn check_common(bit_size: Option<usize>, count: Option<usize>) -> Result<(), TransferError> {
    if bit_size == Some(0) {
        return Err(TransferError::config("the bit size must be positive"));
    }

    if count == Some(0) {
        return Err(TransferError::config("the invocation count must be positive"));
    }

    Ok(())
}
