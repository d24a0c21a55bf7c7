/*
 * Created on Wed Jan 10 2024
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

/// An opaque node identifier. `NodeId::nil()` is the sentinel for "the overlay could not
/// produce this node" (equivalently, "irrecoverably unknown"), and the classifier treats it
/// identically to an offline node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(uuid::Uuid);

impl NodeId {
    pub const fn nil() -> Self {
        Self(uuid::Uuid::nil())
    }

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Uuid::from_bytes(bytes))
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A two-letter region tag (ISO-3166-1 alpha-2), stored uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    pub fn new(code: [u8; 2]) -> Self {
        Self([code[0].to_ascii_uppercase(), code[1].to_ascii_uppercase()])
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: constructed only from ASCII bytes
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for CountryCode {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err("country code must be exactly two ASCII letters");
        }
        Ok(Self::new([bytes[0], bytes[1]]))
    }
}

/// One numbered share of a segment's erasure stripe. `number` is unique within a segment;
/// `node_id` names the node currently holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub number: u16,
    pub node_id: NodeId,
}

impl Piece {
    pub fn new(number: u16, node_id: NodeId) -> Self {
        Self { number, node_id }
    }
}

/// An immutable, caller-built snapshot of a node's repair-relevant attributes, taken at the
/// moment the segment was read from the overlay database. The classifier never mutates it
/// and performs no I/O of its own: every field here is decided before `classify` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub id: NodeId,
    /// presently reachable and not exited
    pub online: bool,
    /// under reputational suspension
    pub suspended: bool,
    /// has initiated graceful exit
    pub exiting: bool,
    pub country: CountryCode,
    /// a coarse network-neighborhood key (e.g. the node's /24); empty means "unknown"
    pub last_net: String,
}

impl NodeView {
    /// The sentinel view for "no node found": `id` is nil, everything else is the most
    /// conservative (offline) reading. Building this explicitly is useful for tests and for
    /// drivers that can't distinguish "lookup failed" from "lookup returned nothing".
    pub fn disqualified() -> Self {
        Self {
            id: NodeId::nil(),
            online: false,
            suspended: false,
            exiting: false,
            country: CountryCode::new(*b"ZZ"),
            last_net: String::new(),
        }
    }

    /// A disqualified node surfaces through a nil `id` *or* `online = false`; both routes are
    /// treated identically by the classifier (never retrievable, always missing).
    pub fn is_disqualified(&self) -> bool {
        self.id.is_nil() || !self.online
    }
}
