//! The Bitcoin transaction model: scripts, outpoints, inputs, outputs, the legacy transaction
//! whose hash is the txid, and the decoded full transaction.

/// Script newtypes
pub mod script;

/// Outpoint and TxInput
pub mod txin;

/// TxOutput
pub mod txout;

/// Legacy (non-witness) transactions
pub mod legacy;

/// Full transactions as served by a node
pub mod raw;

/// Segwit witness programs
pub mod witness;

pub use legacy::*;
pub use raw::*;
pub use script::*;
pub use txin::*;
pub use txout::*;
pub use witness::*;
