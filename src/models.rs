use serde::Deserialize;

/// Reverse-geocode response from OpenCage. Only the fields the navbar
/// actually reads are modelled; everything else in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub components: AddressComponents,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressComponents {
    pub city: Option<String>,
    pub town: Option<String>,
    pub state: Option<String>,
}

impl AddressComponents {
    /// Best displayable name: city, then town, then state. Empty strings
    /// count as absent.
    pub fn place_name(self) -> Option<String> {
        [self.city, self.town, self.state]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// A service advertised on the landing page.
pub struct Service {
    pub title: &'static str,
    pub is_new: bool,
}

/// The hero grid catalog.
pub const SERVICES: &[Service] = &[
    Service {
        title: "Part-Time Cleaners",
        is_new: false,
    },
    Service {
        title: "Monthly Cleaning Subscription",
        is_new: false,
    },
    Service {
        title: "All-in-one House Help",
        is_new: true,
    },
    Service {
        title: "Salon, Nails & Hair for Women",
        is_new: false,
    },
    Service {
        title: "Massage for Women & Couples",
        is_new: false,
    },
    Service {
        title: "Salon & Massage for Men",
        is_new: false,
    },
    Service {
        title: "Home Repairs & AC Cleaning",
        is_new: false,
    },
    Service {
        title: "Deep Cleaning & Pest Control",
        is_new: false,
    },
];

/// Phrases the search placeholder types through, in cycling order.
pub const SEARCH_PHRASES: &[&str] = &[
    "Massage for Women & Couples",
    "Salon & Massage for Men",
    "House Deep Cleaning",
    "AC Repair & Cleaning",
    "Deep Cleaning & Pest Control",
    "Home Repairs & AC Cleaning",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_geocode_result() {
        let body = r#"{
            "results": [
                {"components": {"city": "Springfield", "state": "Illinois"}}
            ],
            "status": {"code": 200, "message": "OK"}
        }"#;
        let response: GeocodeResponse = serde_json::from_str(body).unwrap();
        let first = response.results.unwrap().remove(0);
        assert_eq!(first.components.place_name().as_deref(), Some("Springfield"));
    }

    #[test]
    fn falls_back_from_city_to_town_to_state() {
        let town_only = AddressComponents {
            city: None,
            town: Some("Windsor".to_string()),
            state: Some("Vermont".to_string()),
        };
        assert_eq!(town_only.place_name().as_deref(), Some("Windsor"));

        let state_only = AddressComponents {
            city: None,
            town: None,
            state: Some("Vermont".to_string()),
        };
        assert_eq!(state_only.place_name().as_deref(), Some("Vermont"));
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let components = AddressComponents {
            city: Some(String::new()),
            town: Some(String::new()),
            state: Some("Dubai".to_string()),
        };
        assert_eq!(components.place_name().as_deref(), Some("Dubai"));
    }

    #[test]
    fn tolerates_missing_results_and_missing_components() {
        let response: GeocodeResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_none());

        let response: GeocodeResponse =
            serde_json::from_str(r#"{"results": [{}]}"#).unwrap();
        let first = response.results.unwrap().remove(0);
        assert_eq!(first.components.place_name(), None);
    }

    #[test]
    fn catalog_matches_the_landing_page() {
        assert_eq!(SERVICES.len(), 8);
        assert_eq!(SERVICES.iter().filter(|s| s.is_new).count(), 1);
        assert_eq!(SEARCH_PHRASES.len(), 6);
    }
}
