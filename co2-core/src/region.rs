use crate::error::{Co2Error, Result};
use csv::{ReaderBuilder, Trim};
use log::info;
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
    sync::OnceLock,
};

/// Embedded region lookup: one `region,iso_code` row per membership.
pub static REGIONS_CSV: &str = include_str!("../../fixtures/regions.csv");

static BUILTIN_REGIONS: OnceLock<RegionMap> = OnceLock::new();

/// Read-only lookup from region name to the ISO alpha-3 codes it contains.
///
/// A country may belong to more than one region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionMap {
    regions: BTreeMap<String, BTreeSet<String>>,
}

impl RegionMap {
    /// The embedded region table, parsed on first use.
    pub fn builtin() -> &'static RegionMap {
        BUILTIN_REGIONS.get_or_init(|| match RegionMap::parse_region_csv(REGIONS_CSV) {
            Ok(map) => map,
            Err(e) => panic!("failed to parse embedded regions csv: {}", e),
        })
    }

    /// Parse a CSV string of region memberships.
    ///
    /// Expected CSV columns (with headers): region, iso_code
    pub fn parse_region_csv(csv_object: &str) -> Result<RegionMap> {
        let mut regions: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        for (line, row) in rdr.records().enumerate() {
            let record = row?;
            let region = record.get(0).unwrap_or("");
            let iso_code = record.get(1).unwrap_or("");
            if region.is_empty() || iso_code.is_empty() {
                return Err(Co2Error::InvalidFormat(format!(
                    "region row {} needs both a region and an iso_code",
                    line + 1
                )));
            }
            regions
                .entry(region.to_string())
                .or_default()
                .insert(iso_code.to_uppercase());
        }
        info!("Loaded {} regions", regions.len());
        Ok(RegionMap { regions })
    }

    /// Load a region CSV from disk.
    pub fn load_region_file<P: AsRef<Path>>(path: P) -> Result<RegionMap> {
        let contents = fs::read_to_string(path)?;
        RegionMap::parse_region_csv(&contents)
    }

    /// Region names in alphabetical order.
    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// ISO codes of `region`, or `None` if the region is unknown.
    pub fn countries(&self, region: &str) -> Option<&BTreeSet<String>> {
        self.regions.get(region)
    }

    pub fn contains_region(&self, region: &str) -> bool {
        self.regions.contains_key(region)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
