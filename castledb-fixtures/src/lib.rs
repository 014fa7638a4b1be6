//! # CastleDB Fixtures
//!
//! Types generated at build time from `schema/game.cdb`, compiled as part of
//! the workspace so the emitted code is checked by the compiler and exercised
//! against real documents.
//!
//! - [`game`] is generated with both channels and implements [`Row`]
//! - [`game_binary`] is generated with the binary channel only

/// Marker trait implemented by every generated type of the [`game`] module.
pub trait Row {}

include!(concat!(env!("OUT_DIR"), "/game.rs"));
include!(concat!(env!("OUT_DIR"), "/game_binary.rs"));

/// Document the fixture types were generated from.
pub const GAME_DATABASE: &str = include_str!("../schema/game.cdb");
