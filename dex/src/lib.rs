//! Name normalization and the static identifier registry for Pokemon Showdown data.
//!
//! Every game entity the protocol mentions by display name (species, moves, items,
//! abilities, types, statuses, weather, ...) maps to a stable numeric [`DexId`].
//! The mapping is closed: it is built once from bundled reference data and never
//! mutated afterwards, so it can be shared freely across threads.
//!
//! # Overview
//!
//! ```text
//! "Scizor-Mega" ──normalize──> "SCIZORMEGA" ──"POKEMON_" prefix──> 212001
//!                                                        base() ──> 212000
//! ```
//!
//! # Example Usage
//!
//! ```
//! use pokeline_dex::{Category, lookup};
//!
//! let id = lookup(Some("Toxicroak"), Category::Species).unwrap().unwrap();
//! assert_eq!(id.value, 454000);
//!
//! // Absent names stay absent
//! assert_eq!(lookup(None, Category::Move).unwrap(), None);
//!
//! // Present but unknown names are an error
//! assert!(lookup(Some("Missingno Prime"), Category::Species).is_err());
//! ```

mod category;
mod id;
mod normalize;
mod registry;

pub use category::Category;
pub use id::DexId;
pub use normalize::normalize;
pub use registry::{Dex, DexError, dex, lookup};
