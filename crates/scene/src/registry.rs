//! Country registry supplied by the host application, and the matcher that
//! ties boundary features to it.

use serde::{Deserialize, Serialize};

/// A country known to the host application.
///
/// The globe only reads these; it never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-3 style identifier.
    pub id: String,
    pub iso2: String,
    pub name: String,
    #[serde(default, alias = "lon")]
    pub longitude: Option<f64>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
}

impl CountryRecord {
    pub fn new(
        id: impl Into<String>,
        iso2: impl Into<String>,
        name: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            iso2: iso2.into(),
            name: name.into(),
            longitude: Some(longitude),
            latitude: Some(latitude),
        }
    }

    /// `(lon, lat)` in degrees when both are known.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        Some((self.longitude?, self.latitude?))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryRegistry {
    records: Vec<CountryRecord>,
}

impl CountryRegistry {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn by_iso2(&self, iso2: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.iso2.eq_ignore_ascii_case(iso2))
    }

    /// Case-insensitive exact match on the display name.
    pub fn by_name(&self, name: &str) -> Option<&CountryRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .find(|r| r.name.to_lowercase() == wanted)
    }
}

/// ISO 3166-1 numeric code to alpha-3 code. Sorted by numeric code.
static NUMERIC_TO_ISO3: &[(u16, &str)] = &[
    (4, "AFG"), (8, "ALB"), (12, "DZA"), (24, "AGO"), (31, "AZE"), (32, "ARG"),
    (36, "AUS"), (40, "AUT"), (50, "BGD"), (51, "ARM"), (56, "BEL"), (64, "BTN"),
    (68, "BOL"), (70, "BIH"), (72, "BWA"), (76, "BRA"), (84, "BLZ"), (90, "SLB"),
    (100, "BGR"), (104, "MMR"), (108, "BDI"), (112, "BLR"), (116, "KHM"), (120, "CMR"),
    (124, "CAN"), (132, "CPV"), (140, "CAF"), (144, "LKA"), (148, "TCD"), (152, "CHL"),
    (156, "CHN"), (170, "COL"), (174, "COM"), (178, "COG"), (180, "COD"), (188, "CRI"),
    (191, "HRV"), (192, "CUB"), (196, "CYP"), (203, "CZE"), (204, "BEN"), (208, "DNK"),
    (212, "DMA"), (214, "DOM"), (218, "ECU"), (222, "SLV"), (226, "GNQ"), (231, "ETH"),
    (232, "ERI"), (233, "EST"), (246, "FIN"), (250, "FRA"), (262, "DJI"), (266, "GAB"),
    (268, "GEO"), (275, "PSE"), (276, "DEU"), (288, "GHA"), (300, "GRC"), (308, "GRD"),
    (320, "GTM"), (324, "GIN"), (328, "GUY"), (332, "HTI"), (340, "HND"), (348, "HUN"),
    (356, "IND"), (360, "IDN"), (364, "IRN"), (368, "IRQ"), (372, "IRL"), (376, "ISR"),
    (380, "ITA"), (388, "JAM"), (392, "JPN"), (398, "KAZ"), (400, "JOR"), (404, "KEN"),
    (408, "PRK"), (410, "KOR"), (414, "KWT"), (417, "KGZ"), (418, "LAO"), (422, "LBN"),
    (426, "LSO"), (428, "LVA"), (430, "LBR"), (434, "LBY"), (438, "LIE"), (440, "LTU"),
    (442, "LUX"), (450, "MDG"), (454, "MWI"), (458, "MYS"), (466, "MLI"), (478, "MRT"),
    (480, "MUS"), (484, "MEX"), (492, "MCO"), (496, "MNG"), (498, "MDA"), (499, "MNE"),
    (504, "MAR"), (508, "MOZ"), (516, "NAM"), (524, "NPL"), (528, "NLD"), (548, "VUT"),
    (554, "NZL"), (558, "NIC"), (562, "NER"), (566, "NGA"), (578, "NOR"), (585, "PLW"),
    (586, "PAK"), (591, "PAN"), (598, "PNG"), (600, "PRY"), (604, "PER"), (608, "PHL"),
    (616, "POL"), (620, "PRT"), (624, "GNB"), (626, "TLS"), (630, "PRI"), (634, "QAT"),
    (642, "ROU"), (643, "RUS"), (646, "RWA"), (659, "KNA"), (662, "LCA"), (670, "VCT"),
    (674, "SMR"), (678, "STP"), (682, "SAU"), (686, "SEN"), (690, "SYC"), (694, "SLE"),
    (703, "SVK"), (704, "VNM"), (705, "SVN"), (706, "SOM"), (710, "ZAF"), (716, "ZWE"),
    (724, "ESP"), (728, "SSD"), (729, "SDN"), (740, "SUR"), (752, "SWE"), (756, "CHE"),
    (760, "SYR"), (762, "TJK"), (764, "THA"), (768, "TGO"), (776, "TON"), (780, "TTO"),
    (784, "ARE"), (788, "TUN"), (792, "TUR"), (795, "TKM"), (798, "TUV"), (800, "UGA"),
    (804, "UKR"), (807, "MKD"), (818, "EGY"), (826, "GBR"), (840, "USA"), (854, "BFA"),
    (858, "URY"), (860, "UZB"), (862, "VEN"), (887, "YEM"), (894, "ZMB"),
];

pub fn iso3_for_numeric(code: u32) -> Option<&'static str> {
    let code = u16::try_from(code).ok()?;
    NUMERIC_TO_ISO3
        .binary_search_by_key(&code, |(n, _)| *n)
        .ok()
        .map(|idx| NUMERIC_TO_ISO3[idx].1)
}

/// Outcome of resolving one boundary feature against the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryMatch<'a> {
    /// The matched record's id, or the numeric table's alpha-3 code.
    pub iso3: Option<String>,
    pub record: Option<&'a CountryRecord>,
}

/// Resolves a feature by numeric code first, then by its embedded name.
///
/// The name fallback runs when the code is missing, absent from the numeric
/// table, or maps to an alpha-3 code the registry does not carry.
pub fn match_country<'a>(
    registry: &'a CountryRegistry,
    numeric_code: Option<u32>,
    name: Option<&str>,
) -> CountryMatch<'a> {
    let table_iso3 = numeric_code.and_then(iso3_for_numeric);
    let record = table_iso3
        .and_then(|iso3| registry.by_id(iso3))
        .or_else(|| name.and_then(|n| registry.by_name(n)));

    let iso3 = record
        .map(|r| r.id.clone())
        .or_else(|| table_iso3.map(str::to_string));

    CountryMatch { iso3, record }
}

#[cfg(test)]
mod tests {
    use super::{CountryRecord, CountryRegistry, NUMERIC_TO_ISO3, iso3_for_numeric, match_country};

    fn registry() -> CountryRegistry {
        CountryRegistry::new(vec![
            CountryRecord::new("FRA", "FR", "France", 2.2, 46.2),
            CountryRecord::new("XKX", "XK", "Kosovo", 20.9, 42.6),
            CountryRecord::new("USA", "US", "United States", -95.7, 37.1),
        ])
    }

    #[test]
    fn numeric_table_is_sorted_and_unique() {
        assert!(NUMERIC_TO_ISO3.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn numeric_lookup() {
        assert_eq!(iso3_for_numeric(250), Some("FRA"));
        assert_eq!(iso3_for_numeric(4), Some("AFG"));
        assert_eq!(iso3_for_numeric(999), None);
        assert_eq!(iso3_for_numeric(u32::MAX), None);
    }

    #[test]
    fn matches_by_numeric_code() {
        let reg = registry();
        let m = match_country(&reg, Some(250), Some("ignored"));
        assert_eq!(m.record.map(|r| r.id.as_str()), Some("FRA"));
        assert_eq!(m.iso3.as_deref(), Some("FRA"));
    }

    #[test]
    fn falls_back_to_case_insensitive_name() {
        let reg = registry();
        let m = match_country(&reg, None, Some("kOsOvO"));
        assert_eq!(m.record.map(|r| r.id.as_str()), Some("XKX"));
        assert_eq!(m.iso3.as_deref(), Some("XKX"));
    }

    #[test]
    fn falls_back_to_name_when_table_code_not_registered() {
        let reg = registry();
        // 4 -> AFG, which this registry does not carry.
        let m = match_country(&reg, Some(4), Some("United States"));
        assert_eq!(m.record.map(|r| r.id.as_str()), Some("USA"));
        assert_eq!(m.iso3.as_deref(), Some("USA"));

        let unregistered = match_country(&reg, Some(4), None);
        assert!(unregistered.record.is_none());
        assert_eq!(unregistered.iso3.as_deref(), Some("AFG"));
    }

    #[test]
    fn unmatched_feature_has_no_record() {
        let reg = registry();
        let m = match_country(&reg, Some(999), Some("Atlantis"));
        assert!(m.record.is_none());
        assert!(m.iso3.is_none());
    }

    #[test]
    fn record_deserializes_short_coordinate_keys() {
        let rec: CountryRecord = serde_json::from_str(
            r#"{"id":"JPN","iso2":"JP","name":"Japan","lon":138.3,"lat":36.2}"#,
        )
        .expect("record");
        assert_eq!(rec.lon_lat(), Some((138.3, 36.2)));
        assert_eq!(registry().by_iso2("fr").map(|r| r.name.as_str()), Some("France"));
    }
}
