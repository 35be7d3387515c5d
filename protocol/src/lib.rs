//! Typed parsing of Pokemon Showdown protocol lines.
//!
//! Every line the server sends in a battle room (`|switch|p2a: Toxicroak|...`,
//! `|-damage|...`, `|request|{...}`) is classified by its message kind and broken
//! into a [`BattleEvent`]. Parsing never fails: malformed lines come back as
//! [`BattleEvent::Unknown`] carrying an [`ErrorState`].
//!
//! # Example Usage
//!
//! ```
//! use pokeline_protocol::{BattleEvent, MessageKind, parse};
//!
//! let message = parse("|switch|p2a: Toxicroak|Toxicroak, L81, F|100/100");
//! assert_eq!(message.kind(), MessageKind::Switch);
//!
//! if let BattleEvent::Switch { pokemon, details, .. } = &message.event {
//!     assert_eq!(pokemon.identity, "TOXICROAK");
//!     assert_eq!(details.level, 81);
//! }
//!
//! let message = parse("|totallymadeupkind|foo");
//! assert!(message.is_error());
//! ```

use pokeline_dex::DexError;
use thiserror::Error;

pub mod server;

pub use pokeline_dex::{Category, Dex, DexId};
pub use server::{
    BattleEvent, BattleMessage, ErrorState, Frame, MessageKind, Parser, parse, parse_frame,
    parse_log,
};
pub use server::general::{GeneralEvent, GeneralMessage, parse_general};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed pokemon identifier: {0:?}")]
    MalformedIdentifier(String),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error(transparent)]
    UnknownIdentifier(#[from] DexError),

    #[error("Extraction not implemented for {0}")]
    NotImplemented(String),

    #[error("Empty message")]
    EmptyMessage,
}
