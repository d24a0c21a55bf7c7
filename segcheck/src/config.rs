/*
 * Created on Sat Jan 13 2024
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

//! The shape of the flags a checker driver owns and passes into [`crate::classify::classify`]
//! on every call. This crate does not parse these out of a file or the environment (that's
//! the driver's job); it only defines the `serde`-deserializable shape so a driver's own
//! config loader (however it is built) can embed `checker: CheckerConfig` as a section.

use std::collections::HashSet;

use serde::Deserialize;

use crate::node::CountryCode;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub do_placement_check: bool,
    pub do_declumping: bool,
    /// per-iteration node failure probability; must be in `(0, 1)` before it reaches
    /// [`crate::health::health`]. The default of `0.0` is intentionally invalid: a driver
    /// must override it from measured churn before first use.
    pub failure_rate: f64,
    #[serde(deserialize_with = "deserialize_country_codes")]
    pub excluded_countries: HashSet<CountryCode>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            do_placement_check: true,
            do_declumping: true,
            failure_rate: 0.0,
            excluded_countries: HashSet::new(),
        }
    }
}

fn deserialize_country_codes<'de, D>(deserializer: D) -> Result<HashSet<CountryCode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .map(|s| CountryCode::try_from(s.as_str()).map_err(serde::de::Error::custom))
        .collect()
}
