/*
 * Created on Tue Jan 09 2024
 *
 * This file is a part of Skytable
 * Skytable (formerly known as TerrabaseDB or Skybase) is a free and open-source
 * NoSQL database written by Sayan Nandan ("the Author") with the
 * vision to provide flexibility in data modelling without compromising
 * on performance, queryability or scalability.
 *
 * Copyright (c) 2024, Sayan Nandan <nandansayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! # segcheck
//!
//! This crate is the segment-health classification and repair-priority core used by the
//! checker loop that walks the metadata store. It owns exactly two pure functions and the
//! data they close over: [`classify`] decides which pieces of a segment are healthy, and
//! [`health`] turns that classification into a single real-valued repair priority.
//!
//! Everything upstream (iterating segments, reading the node overlay, parsing placement
//! rules, running the repair worker, persisting the repair queue) lives outside this crate.
//! See the `driver` module for the thin seam a checker loop uses to call in.

pub mod classify;
pub mod config;
pub mod driver;
pub mod error;
pub mod health;
pub mod intset;
pub mod node;
pub mod placement;

#[cfg(test)]
mod tests;

pub use classify::{classify, ClassificationResult, LogFields};
pub use config::CheckerConfig;
pub use error::{CheckResult, Error};
pub use health::{health, MIN_CHURN_PER_ROUND, MIN_TOTAL_NODES};
pub use intset::IntSet;
pub use node::{CountryCode, NodeId, NodeView, Piece};
pub use placement::{DefaultSubnetInvariant, PlacementContract};
