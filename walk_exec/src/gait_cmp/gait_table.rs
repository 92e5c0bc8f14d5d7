//! Gait tables

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{GaitCmpError, PoseCode};
use crate::leg_reg::{LegId, NUM_LEGS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Pose codes of every leg at one instant of the stride, in the fixed leg
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaitRow(pub [PoseCode; NUM_LEGS]);

/// A cyclic sequence of gait rows. The row after the last is the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GaitTable {
    rows: Vec<GaitRow>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GaitRow {
    pub fn code(&self, leg: LegId) -> PoseCode {
        self.0[leg.index()]
    }

    /// The legs lifted in this row.
    pub fn lifted_legs(&self) -> impl Iterator<Item = LegId> + '_ {
        LegId::ALL
            .iter()
            .copied()
            .filter(move |leg| self.code(*leg).lift)
    }

    /// The lifted leg, if there is exactly one.
    pub fn lifted_leg(&self) -> Option<LegId> {
        let mut lifted = self.lifted_legs();
        match (lifted.next(), lifted.next()) {
            (Some(leg), None) => Some(leg),
            _ => None,
        }
    }
}

impl GaitTable {
    /// Build a validated table from rows of integer pose codes.
    pub fn from_codes(rows: &[[i64; NUM_LEGS]]) -> Result<Self, GaitCmpError> {
        let mut table_rows = Vec::with_capacity(rows.len());

        for codes in rows {
            let mut row = [PoseCode::from_code(1)?; NUM_LEGS];
            for (pose, code) in row.iter_mut().zip(codes.iter()) {
                *pose = PoseCode::from_code(*code)?;
            }
            table_rows.push(GaitRow(row));
        }

        let table = Self { rows: table_rows };
        table.validate()?;
        Ok(table)
    }

    /// Check the table is usable as a gait.
    ///
    /// The table must have at least one row and no row may lift more than
    /// one leg. Rows lifting no leg are allowed.
    pub fn validate(&self) -> Result<(), GaitCmpError> {
        if self.rows.is_empty() {
            return Err(GaitCmpError::EmptyTable);
        }

        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.lifted_legs().count() > 1 {
                return Err(GaitCmpError::MultipleLifts { row: row_idx });
            }
        }

        Ok(())
    }

    pub fn rows(&self) -> &[GaitRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the row following `row`, wrapping back to the first.
    pub fn next_row(&self, row: usize) -> usize {
        (row + 1) % self.rows.len().max(1)
    }
}
