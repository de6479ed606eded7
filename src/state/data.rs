//! Static reference data for the application
//!
//! These tables stand in for real backends: the translation engine,
//! the image classifier and the local-info services all answer from here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target languages offered on the Translate screen
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Spanish,
    French,
    Japanese,
    Arabic,
}

impl Language {
    /// All selectable languages, in display order
    pub const ALL: [Language; 4] = [
        Language::Spanish,
        Language::French,
        Language::Japanese,
        Language::Arabic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Japanese => "Japanese",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The one translation every request receives
pub const CANNED_TRANSLATION: &str = "¡Hola! ¿Cómo estás? (Cultural note: In Spain, this casual greeting is perfect for most situations. Local slang: You might also hear \"¿Qué tal?\" which means the same thing)";

/// The phrase "heard" by simulated voice capture
pub const CANNED_VOICE_PHRASE: &str = "Hello, how are you?";

/// A landmark (or dish) the photo classifier can "recognize"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkRecord {
    pub name: &'static str,
    /// Free-form location label (a city, or a cuisine)
    pub location: &'static str,
    pub facts: &'static [&'static str],
    pub best_time_to_visit: &'static str,
    pub tips: &'static [&'static str],
}

/// Every possible classifier answer
pub static LANDMARKS: [LandmarkRecord; 3] = [
    LandmarkRecord {
        name: "Eiffel Tower",
        location: "Paris, France",
        facts: &[
            "Built in 1889 for the World's Fair, it was initially criticized by Parisians but became the symbol of Paris",
            "The tower grows about 6 inches taller in summer due to thermal expansion of the iron",
            "It was the world's tallest structure until 1930 and weighs approximately 10,100 tons",
        ],
        best_time_to_visit: "Early morning (8-10 AM) or evening (6-8 PM) for golden hour photos and fewer crowds",
        tips: &[
            "Go early to avoid crowds - arrive by 9 AM for shortest lines",
            "Book skip-the-line tickets online in advance",
            "Visit the nearby Trocadéro for the best photo spots",
            "Evening visits offer stunning city lights views",
        ],
    },
    LandmarkRecord {
        name: "Colosseum",
        location: "Rome, Italy",
        facts: &[
            "Completed in 80 AD, it could hold 50,000-80,000 spectators and hosted gladiator contests",
            "The arena floor was covered with sand to absorb blood, and had a complex underground system called the hypogeum",
            "It's the largest amphitheater ever built and is considered one of the greatest works of Roman engineering",
        ],
        best_time_to_visit: "Early morning (8:30 AM) or late afternoon (4-6 PM) to avoid peak crowds and heat",
        tips: &[
            "Go early to avoid crowds - first entry at 8:30 AM is ideal",
            "Bring water and wear comfortable shoes",
            "Combine with Roman Forum and Palatine Hill tickets",
            "Underground and upper levels require special tickets",
        ],
    },
    LandmarkRecord {
        name: "Traditional Sushi",
        location: "Japanese Cuisine",
        facts: &[
            "Originally a method of preserving fish in fermented rice, modern sushi was developed in Tokyo in the 1800s",
            "The rice should be body temperature when served, and traditionally eaten with hands, not chopsticks",
            "Master sushi chefs train for decades - it takes 3 years just to learn to properly cook the rice",
        ],
        best_time_to_visit: "Lunch time (11 AM - 2 PM) for fresh morning fish, or dinner (6-8 PM) for full experience",
        tips: &[
            "Go early to avoid crowds at popular sushi restaurants",
            "Eat sushi immediately when served for best taste",
            "Don't mix wasabi with soy sauce - add it directly to the fish",
            "Sit at the sushi counter to watch the master at work",
        ],
    },
];

/// Remote images "taken" by the simulated camera
pub const CAPTURE_URLS: [&str; 3] = [
    "https://images.unsplash.com/photo-1511739001486-6bfe10ce785f?w=400",
    "https://images.unsplash.com/photo-1513581166391-887a96ddeafd?w=400",
    "https://images.unsplash.com/photo-1579952363873-27d3bfad9c0d?w=400",
];

/// An emergency service near the traveller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyContact {
    pub kind: &'static str,
    pub name: &'static str,
    pub phone: &'static str,
    pub distance: &'static str,
}

impl EmergencyContact {
    /// Number to dial by hand; there is no telephony on the desktop
    pub fn dial_label(&self) -> String {
        format!("📞 {}", self.phone)
    }
}

pub static EMERGENCY_CONTACTS: [EmergencyContact; 3] = [
    EmergencyContact {
        kind: "Embassy",
        name: "US Embassy Madrid",
        phone: "+34 91 587 2200",
        distance: "2.3 km",
    },
    EmergencyContact {
        kind: "Hospital",
        name: "Hospital Universitario",
        phone: "+34 91 586 8000",
        distance: "1.1 km",
    },
    EmergencyContact {
        kind: "Police",
        name: "Policía Nacional",
        phone: "091",
        distance: "0.8 km",
    },
];

/// A local event or activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub name: &'static str,
    pub time: &'static str,
    pub price: &'static str,
    pub category: &'static str,
}

pub static LOCAL_EVENTS: [EventRecord; 3] = [
    EventRecord {
        name: "Flamenco Night at Casa Patas",
        time: "9:00 PM",
        price: "€25",
        category: "Culture",
    },
    EventRecord {
        name: "Retiro Park Morning Walk",
        time: "8:00 AM",
        price: "Free",
        category: "Outdoor",
    },
    EventRecord {
        name: "Tapas Tour in La Latina",
        time: "7:00 PM",
        price: "€35",
        category: "Food",
    },
];

/// Point of interest listed beside the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyPoint {
    pub name: &'static str,
    pub distance: &'static str,
    pub kind: &'static str,
}

pub static NEARBY_POINTS: [NearbyPoint; 3] = [
    NearbyPoint {
        name: "Hospital",
        distance: "0.8 km",
        kind: "emergency",
    },
    NearbyPoint {
        name: "ATM",
        distance: "0.3 km",
        kind: "service",
    },
    NearbyPoint {
        name: "Restaurant",
        distance: "0.2 km",
        kind: "food",
    },
];
