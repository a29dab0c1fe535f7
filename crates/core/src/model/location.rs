//! Fixed region → city → barangay/school catalog used by the creation form
//! and the statistics filters.

/// One city with its selectable barangays and schools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    pub barangays: &'static [&'static str],
    pub schools: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub cities: &'static [City],
}

pub const GENDERS: [&str; 4] = ["Male", "Female", "Non-Binary", "Other"];

pub const REGIONS: &[Region] = &[
    Region {
        name: "NCR",
        cities: &[
            City {
                name: "Manila",
                barangays: &[
                    "Barangay 649 (Baseco)",
                    "Barangay 650",
                    "Barangay 651",
                    "Barangay 652",
                    "Barangay 653",
                ],
                schools: &["Manila High School", "Araullo High School", "Tondo High School"],
            },
            City {
                name: "Quezon City",
                barangays: &["Bagbag", "Batasan Hills", "Pasong Tamo"],
                schools: &[
                    "Quezon City Science High School",
                    "Commonwealth High School",
                    "New Era University",
                ],
            },
        ],
    },
    Region {
        name: "Region IV-A",
        cities: &[
            City {
                name: "Cavite City",
                barangays: &["Barangay 10", "Barangay 11", "Barangay 12"],
                schools: &[
                    "Cavite National High School",
                    "St. Joseph College",
                    "San Sebastian College",
                ],
            },
            City {
                name: "Tagaytay",
                barangays: &["Maharlika East", "Maitim 2nd", "Silang Junction"],
                schools: &[
                    "Tagaytay City Science High School",
                    "Mater Dei Academy",
                    "Olivarez College",
                ],
            },
        ],
    },
];

#[must_use]
pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|region| region.name).collect()
}

#[must_use]
pub fn find_city(region: &str, city: &str) -> Option<&'static City> {
    REGIONS
        .iter()
        .find(|r| r.name == region)?
        .cities
        .iter()
        .find(|c| c.name == city)
}

/// Cities of `region`; empty for an unknown or unset region.
#[must_use]
pub fn city_names(region: &str) -> Vec<&'static str> {
    REGIONS
        .iter()
        .find(|r| r.name == region)
        .map(|r| r.cities.iter().map(|c| c.name).collect())
        .unwrap_or_default()
}

#[must_use]
pub fn barangays(region: &str, city: &str) -> &'static [&'static str] {
    find_city(region, city).map_or(&[], |c| c.barangays)
}

#[must_use]
pub fn schools(region: &str, city: &str) -> &'static [&'static str] {
    find_city(region, city).map_or(&[], |c| c.schools)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookups() {
        assert_eq!(region_names(), vec!["NCR", "Region IV-A"]);
        assert_eq!(city_names("NCR"), vec!["Manila", "Quezon City"]);
        assert!(city_names("").is_empty());
        assert_eq!(barangays("Region IV-A", "Tagaytay")[1], "Maitim 2nd");
        assert_eq!(schools("NCR", "Manila").len(), 3);
        assert!(schools("NCR", "Tagaytay").is_empty());
    }
}
