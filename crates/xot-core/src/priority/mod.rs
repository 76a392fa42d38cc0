//! Ordered t-out-of-n ("priority") oblivious transfer.
//!
//! The receiver samples a random permutation `w` of the message positions and sends it to the
//! sender. The sender blinds its messages with fresh pads and places message `w[j]` at position
//! `j` of its response. The receiver knows where each of its priorities `p[k]` ended up, picks
//! those ciphertexts in rank order and removes the pads `R[p[k]]` delivered during setup.
//!
//! The permutation is sampled independently of the selection and fresh for every invocation.

pub mod receiver;
pub mod sender;

pub use receiver::Receiver;
pub use sender::Sender;
