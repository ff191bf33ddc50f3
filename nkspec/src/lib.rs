//! # nkspec
//!
//! Core traits shared by the nkspec crates.
//!
//! The workspace turns operator-entered text into values a credential tool
//! can act on, and renders key material back into copyable text:
//!
//! ```text
//! "2w", "2025-01-15"      → expiry   → Unix timestamp
//! "5K", "10B"             → quantity → integer
//! "-----BEGIN ... JWT---" ↔ armor    ↔ payload
//! "SUAM...", "UDXU..."    → keymat   → KeyHandle
//! ```
//!
//! Crates that decode text into a typed value do it through the `Decoder`
//! trait defined here, so callers can write `input.decode()` uniformly.
//!
//! ## Example
//!
//! ```ignore
//! use nkspec::decoder::Decoder;
//! use keymat::KeyHandle;
//! use armor::Armor;
//!
//! let handle: KeyHandle = "UDXU4RCSJNZOIQHZNWXHXORDPRTGNJAHAHFRGZNEEJCPQTT2M7NLCNF4".decode()?;
//! let block: Armor = "-----BEGIN USER JWT-----\neyJ0...\n------END USER JWT------\n".decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
