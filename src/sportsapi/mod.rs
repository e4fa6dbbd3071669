//! Typed HTTP client for the upstream sports statistics API

pub mod client;
pub mod models;
pub mod options;

pub use client::{ClientError, SportsClient, SportsProvider};
pub use models::{
    display_offset, Fixture, FixtureEvent, FixturePlayer, League, Season, SquadPlayer, Standing,
    Team, Topscorer,
};
pub use options::ListOptions;
