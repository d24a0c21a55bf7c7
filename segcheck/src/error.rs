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

use std::fmt;

pub type CheckResult<T> = Result<T, Error>;

/// Every variant here is a programmer error: a caller violated a precondition that this
/// crate cannot repair on its own. None of these are meant to be retried; a driver that
/// hits one should log it and skip the offending segment (see spec's checker driver
/// contract).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `pieces.len() != nodes.len()`
    LengthMismatch { pieces: usize, nodes: usize },
    /// `nodes[i].id` is non-zero and differs from `pieces[i].node_id`
    OrderMismatch { index: usize },
    /// an `IntSet` insertion targeted an index at or beyond its capacity
    OutOfRangeInsert { index: usize, capacity: usize },
    /// a scalar argument to [`crate::health`] fell outside its legal domain
    InvalidParameter(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { pieces, nodes } => write!(
                f,
                "pieces/nodes length mismatch: {pieces} pieces, {nodes} node views"
            ),
            Self::OrderMismatch { index } => {
                write!(f, "node at index {index} does not match the piece it was paired with")
            }
            Self::OutOfRangeInsert { index, capacity } => write!(
                f,
                "attempted to insert piece {index} into an IntSet of capacity {capacity}"
            ),
            Self::InvalidParameter(name) => write!(f, "invalid parameter: {name}"),
        }
    }
}

impl std::error::Error for Error {}
