/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use crate::Int;

/// Errors raised while building a cleaning model. Stepping a model that was built successfully
/// never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CleaningError {
    /// A construction parameter is out of range. The caller must not proceed.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        field: &'static str,

        /// Human readable description of the accepted range.
        reason: String,
    },

    /// There were not enough empty cells left to place every dirt marker.
    #[error("placed {placed} of {requested} dirt markers before running out of empty cells in a grid of {total}")]
    PlacementExhausted {
        /// Dirt markers that were asked for.
        requested: Int,

        /// Dirt markers that were placed before giving up.
        placed: Int,

        /// Total number of cells in the grid.
        total: Int,
    },
}

impl CleaningError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CleaningError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message_names_field() {
        let err = CleaningError::invalid("width", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration for width: must be positive, got 0"
        );
    }

    #[test]
    fn test_placement_exhausted_message() {
        let err = CleaningError::PlacementExhausted {
            requested: 5,
            placed: 4,
            total: 4,
        };
        assert_eq!(
            err.to_string(),
            "placed 4 of 5 dirt markers before running out of empty cells in a grid of 4"
        );
    }
}
