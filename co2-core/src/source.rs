use crate::error::Co2Error;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

/// The categorized origin of a CO2 emission.
///
/// Variant order is the canonical column order of the emissions table and
/// the order every series is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    Coal,
    Oil,
    Gas,
    Cement,
    Flaring,
    Other,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Source::Coal,
        Source::Oil,
        Source::Gas,
        Source::Cement,
        Source::Flaring,
        Source::Other,
    ];

    /// Column header of this source in the emissions CSV.
    pub fn name(self) -> &'static str {
        match self {
            Source::Coal => "Coal",
            Source::Oil => "Oil",
            Source::Gas => "Gas",
            Source::Cement => "Cement",
            Source::Flaring => "Flaring",
            Source::Other => "Other",
        }
    }

    /// Chart colour for this source.
    pub fn color(self) -> &'static str {
        match self {
            Source::Coal => "#3d3d3d",
            Source::Oil => "#8c564b",
            Source::Gas => "#1f77b4",
            Source::Cement => "#7f7f7f",
            Source::Flaring => "#ff7f0e",
            Source::Other => "#2ca02c",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = Co2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Source::ALL
            .into_iter()
            .find(|source| source.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Co2Error::UnknownSource(s.to_string()))
    }
}

/// One value per [`Source`], stored in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceValues(pub [f64; 6]);

impl SourceValues {
    pub fn get(&self, source: Source) -> f64 {
        self.0[source.index()]
    }

    /// Add every source of `other` into `self`.
    pub fn accumulate(&mut self, other: &SourceValues) {
        for (slot, value) in self.0.iter_mut().zip(other.0.iter()) {
            *slot += value;
        }
    }

    /// Sum across all six sources.
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Source, f64)> + '_ {
        Source::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Source> for SourceValues {
    type Output = f64;

    fn index(&self, source: Source) -> &f64 {
        &self.0[source.index()]
    }
}

impl IndexMut<Source> for SourceValues {
    fn index_mut(&mut self, source: Source) -> &mut f64 {
        &mut self.0[source.index()]
    }
}
