//! 1-out-of-n oblivious transfer.
//!
//! The receiver splits the bits of its index `idx` into two XOR shares and sends the first one
//! to the sender. The sender blinds its messages with fresh pads and runs the swap network over
//! them, controlled by the received share. The receiver runs the swap network again with the
//! second share, which moves the ciphertext of message `idx` to the front, and removes the pad
//! `R[idx]` delivered during setup.

pub mod receiver;
pub mod sender;

pub use receiver::Receiver;
pub use sender::Sender;
