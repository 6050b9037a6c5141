//! Static Catalogs
//!
//! Supported recipient timezones and the message collections a purchaser can
//! pick from. Both are read-only.

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};

/// Supported timezone
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timezone {
    /// IANA name, e.g. `Europe/London`
    pub name: &'static str,
    pub label: &'static str,
}

impl Timezone {
    pub fn selection(&self) -> TimezoneSelection {
        TimezoneSelection {
            name: self.name.to_string(),
            label: format!("{} ({})", self.label, self.name),
        }
    }
}

/// The timezone chosen in the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneSelection {
    pub name: String,
    pub label: String,
}

pub const TIMEZONES: &[Timezone] = &[
    Timezone {
        name: "Pacific/Honolulu",
        label: "Hawaii",
    },
    Timezone {
        name: "America/Anchorage",
        label: "Alaska",
    },
    Timezone {
        name: "America/Los_Angeles",
        label: "Pacific Time",
    },
    Timezone {
        name: "America/Denver",
        label: "Mountain Time",
    },
    Timezone {
        name: "America/Chicago",
        label: "Central Time",
    },
    Timezone {
        name: "America/New_York",
        label: "Eastern Time",
    },
    Timezone {
        name: "America/Sao_Paulo",
        label: "Brasilia",
    },
    Timezone {
        name: "Atlantic/Reykjavik",
        label: "Reykjavik",
    },
    Timezone {
        name: "Europe/London",
        label: "London",
    },
    Timezone {
        name: "Europe/Dublin",
        label: "Dublin",
    },
    Timezone {
        name: "Europe/Paris",
        label: "Paris",
    },
    Timezone {
        name: "Europe/Berlin",
        label: "Berlin",
    },
    Timezone {
        name: "Europe/Madrid",
        label: "Madrid",
    },
    Timezone {
        name: "Europe/Athens",
        label: "Athens",
    },
    Timezone {
        name: "Africa/Johannesburg",
        label: "Johannesburg",
    },
    Timezone {
        name: "Asia/Dubai",
        label: "Dubai",
    },
    Timezone {
        name: "Asia/Kolkata",
        label: "India",
    },
    Timezone {
        name: "Asia/Singapore",
        label: "Singapore",
    },
    Timezone {
        name: "Asia/Tokyo",
        label: "Tokyo",
    },
    Timezone {
        name: "Australia/Sydney",
        label: "Sydney",
    },
    Timezone {
        name: "Pacific/Auckland",
        label: "Auckland",
    },
];

/// Find a supported timezone by IANA name
pub fn find_timezone(name: &str) -> Option<&'static Timezone> {
    TIMEZONES.iter().find(|tz| tz.name == name)
}

/// Map a runtime-detected zone onto the supported list
///
/// Returns `None` when nothing was detected or the zone is not offered.
pub fn detected_timezone(detected: Option<&str>) -> Option<TimezoneSelection> {
    detected.and_then(find_timezone).map(Timezone::selection)
}

/// Collection identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(String);

impl CollectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders a sample message for a recipient first name
pub type DemoMessage = fn(&str) -> String;

/// A themed set of message templates
#[derive(Clone, Copy)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
    pub intro: &'static str,
    pub demo_messages: [DemoMessage; 2],
}

impl Collection {
    /// Placeholder names used while the recipient's name is still empty
    pub const PLACEHOLDER_NAMES: [&'static str; 2] = ["Chloe", "James"];

    /// Both demo messages addressed to the recipient
    pub fn preview(&self, recipient_first_name: &str) -> [String; 2] {
        let name_for = |i: usize| {
            if recipient_first_name.is_empty() {
                Self::PLACEHOLDER_NAMES[i]
            } else {
                recipient_first_name
            }
        };
        [
            (self.demo_messages[0])(name_for(0)),
            (self.demo_messages[1])(name_for(1)),
        ]
    }
}

fn science_neutron(name: &str) -> String {
    format!("Hi {name}! Did you know a teaspoon of neutron star would weigh about six billion tonnes?")
}

fn science_octopus(name: &str) -> String {
    format!("Morning {name}! Octopuses have three hearts, and two of them stop when they swim.")
}

fn history_zanzibar(name: &str) -> String {
    format!("Hey {name}! The shortest war in history lasted 38 minutes, Britain vs Zanzibar in 1896.")
}

fn history_cleopatra(name: &str) -> String {
    format!(
        "Hi {name}! Cleopatra lived closer in time to the Moon landing than to the building of the Great Pyramid."
    )
}

fn space_venus(name: &str) -> String {
    format!("Hello {name}! A day on Venus is longer than its year.")
}

fn space_trees(name: &str) -> String {
    format!("Hi {name}! There are more trees on Earth than stars in the Milky Way.")
}

fn words_petrichor(name: &str) -> String {
    format!("Hi {name}! Today's word is 'petrichor': the smell of rain on dry earth.")
}

fn words_sonder(name: &str) -> String {
    format!("Hey {name}! 'Sonder' is the feeling that every passer-by has a life as vivid as your own.")
}

pub const COLLECTIONS: &[Collection] = &[
    Collection {
        id: "science",
        name: "Science Facts",
        intro: "A surprising science fact, straight to their phone",
        demo_messages: [science_neutron, science_octopus],
    },
    Collection {
        id: "history",
        name: "History Snippets",
        intro: "Little stories from the past to brighten their month",
        demo_messages: [history_zanzibar, history_cleopatra],
    },
    Collection {
        id: "space",
        name: "Space Wonders",
        intro: "The universe, one text at a time",
        demo_messages: [space_venus, space_trees],
    },
    Collection {
        id: "words",
        name: "Wonderful Words",
        intro: "A beautiful word and what it means",
        demo_messages: [words_petrichor, words_sonder],
    },
];

/// Collection preselected on page load
pub fn default_collection() -> &'static Collection {
    &COLLECTIONS[0]
}

pub fn find_collection(id: &CollectionId) -> Result<&'static Collection> {
    COLLECTIONS
        .iter()
        .find(|c| c.id == id.as_str())
        .ok_or_else(|| CheckoutError::UnknownCollection(id.to_string()))
}
