/*
 * Created on Sun Jan 14 2024
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

//! The thin seam an external checker loop uses to call into this core. Everything here is
//! orchestration only: the segment iterator, the node overlay, the persistent repair queue,
//! and the repair worker itself all live outside this crate.

use std::collections::HashSet;

use crate::{
    classify::classify,
    config::CheckerConfig,
    error::CheckResult,
    health::health,
    node::{CountryCode, NodeView, Piece},
    placement::PlacementContract,
};

/// An opaque handle naming a segment, as minted by the metadata store. This crate never
/// interprets its contents: it is only ever compared and passed through to the repair
/// queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(pub [u8; 32]);

/// What a checker loop forwards a classified segment to. Implementations own persistence and
/// ordering; this crate only produces the `(segment, health)` pair.
pub trait RepairQueue {
    fn enqueue(&mut self, segment: SegmentId, health: f64);
}

/// Run the sequence a checker driver is obliged to perform for one segment: classify, derive
/// `num_healthy`, score, and enqueue. This is a convenience wrapper around [`classify`] and
/// [`health`] for drivers that don't need to inspect the intermediate
/// [`crate::classify::ClassificationResult`] themselves (e.g. for logging); drivers that do
/// want the classification should call `classify` and `health` directly instead.
#[allow(clippy::too_many_arguments)]
pub fn check_segment(
    segment: SegmentId,
    pieces: &[Piece],
    nodes: &[NodeView],
    total_nodes: i64,
    min_pieces: i64,
    config: &CheckerConfig,
    placement: &dyn PlacementContract,
    queue: &mut dyn RepairQueue,
) -> CheckResult<()> {
    let excluded: HashSet<CountryCode> = config.excluded_countries.clone();
    let result = classify(
        pieces,
        nodes,
        &excluded,
        config.do_placement_check,
        config.do_declumping,
        placement,
    )?;
    let num_healthy = result.healthy.count() as i64;
    let score = health(
        num_healthy,
        min_pieces,
        total_nodes,
        config.failure_rate,
        result.forcing_repair.count() as i64,
    )?;
    log::info!("segment health={score} {}", result.log_fields());
    queue.enqueue(segment, score);
    Ok(())
}
