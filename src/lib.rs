//! Force-directed layout and degree-of-interest scoring for interactive
//! node-link graph exploration.
//!
//! The core is headless: [`graph`] indexes a dataset, [`layout`] places nodes,
//! [`interest`] scores them and [`highlight`] derives the adjacency emphasis.
//! [`session`] wires the pieces together the way a viewer drives them.

pub mod config;
pub mod dataset;
pub mod export;
pub mod graph;
pub mod highlight;
pub mod interest;
pub mod layout;
pub mod session;
pub mod util;
pub mod visual;
