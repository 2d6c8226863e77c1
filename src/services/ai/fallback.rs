//! Template content used when the text-generation API is off or fails.
//!
//! Output depends only on destination, duration and start date.

use chrono::Duration;
use serde_json::{Map, Value};

use crate::domain::{
    AccommodationBudget, ActivitiesBudget, Activity, BudgetPlan, CurrencyInfo, DailyBreakdown,
    DayPlan, FoodBudget, ItineraryContent, MiscellaneousBudget, PlacePin, PricedAttraction,
    Recommendations, ShoppingBudget, TotalEstimates, TransportationBudget, TripParameters,
};

/// Lowercase, cut at the first `,`, `-` or `(`, trim.
pub fn normalize_destination(destination: &str) -> String {
    let lower = destination.to_lowercase();
    let head = lower
        .split(|c| matches!(c, ',' | '-' | '('))
        .next()
        .unwrap_or_default();
    head.trim().to_string()
}

// =============================================================================
// Itinerary
// =============================================================================

struct ActivityTemplate {
    time: &'static str,
    activity: &'static str,
    description: &'static str,
    location: &'static str,
    area: Option<&'static str>,
    kind: &'static str,
    cost: f64,
    duration: &'static str,
    rating: Option<f64>,
    best_time: Option<&'static str>,
    tips: &'static str,
    highlights: &'static [&'static str],
}

impl ActivityTemplate {
    fn to_activity(&self) -> Activity {
        Activity {
            time: self.time.to_string(),
            activity: self.activity.to_string(),
            description: self.description.to_string(),
            location: self.location.to_string(),
            area: self.area.map(str::to_string),
            kind: self.kind.to_string(),
            estimated_cost: self.cost,
            duration: self.duration.to_string(),
            rating: self.rating,
            best_time: self.best_time.map(str::to_string),
            tips: self.tips.to_string(),
            highlights: self.highlights.iter().map(|h| h.to_string()).collect(),
        }
    }
}

const TOKYO_ACTIVITIES: &[ActivityTemplate] = &[
    ActivityTemplate {
        time: "Morning (9:00 AM)",
        activity: "Visit Senso-ji Temple in Asakusa",
        description: "Explore Tokyo's oldest Buddhist temple. Pass under the Kaminarimon Gate and browse the traditional stalls along Nakamise Street.",
        location: "2-3-1 Asakusa, Taito City, Tokyo",
        area: Some("Asakusa District"),
        kind: "sightseeing",
        cost: 0.0,
        duration: "2-3 hours",
        rating: Some(4.5),
        best_time: Some("Early Morning"),
        tips: "Admission is free. Arrive around 7-8 AM to beat the crowds and try the snacks on Nakamise Street.",
        highlights: &[
            "Tokyo's oldest temple, founded in 628 AD",
            "The Thunder Gate (Kaminarimon)",
            "Nakamise shopping street",
            "Five-story pagoda",
        ],
    },
    ActivityTemplate {
        time: "Afternoon (1:00 PM)",
        activity: "Explore Shibuya Crossing & Shopping",
        description: "Cross the world's busiest pedestrian intersection, visit the Hachiko statue and browse the fashion floors of Shibuya 109.",
        location: "Shibuya District, Tokyo",
        area: Some("Shibuya"),
        kind: "sightseeing",
        cost: 50.0,
        duration: "3-4 hours",
        rating: Some(4.7),
        best_time: Some("Afternoon/Evening"),
        tips: "The second floor of the station-side Starbucks overlooks the crossing. Evening rush hour is the busiest.",
        highlights: &[
            "World's busiest pedestrian crossing",
            "Hachiko statue",
            "Shibuya 109 fashion building",
            "Youth culture hub",
        ],
    },
    ActivityTemplate {
        time: "Evening (6:00 PM)",
        activity: "Dinner in Shinjuku's Golden Gai",
        description: "Yakitori and drinks in the tiny bars of Golden Gai, a lantern-lit maze of post-war alleys.",
        location: "1 Chome Kabukicho, Shinjuku City, Tokyo",
        area: Some("Shinjuku - Golden Gai"),
        kind: "dining",
        cost: 40.0,
        duration: "2-3 hours",
        rating: Some(4.3),
        best_time: Some("Evening/Night"),
        tips: "Most bars charge a 500-1000 yen cover. Look for signs welcoming first-time visitors.",
        highlights: &[
            "Over 200 tiny bars in narrow alleys",
            "Local atmosphere",
            "Themed bars",
            "Post-war architecture",
        ],
    },
];

const PARIS_ACTIVITIES: &[ActivityTemplate] = &[
    ActivityTemplate {
        time: "Morning (9:00 AM)",
        activity: "Visit the Louvre Museum",
        description: "See the Mona Lisa, the Venus de Milo and thousands more works in the world's largest art museum.",
        location: "Rue de Rivoli, 75001 Paris",
        area: Some("1st Arrondissement"),
        kind: "cultural",
        cost: 17.0,
        duration: "3-4 hours",
        rating: Some(4.8),
        best_time: Some("Early Morning"),
        tips: "Book online to skip the queue. Closed on Tuesdays.",
        highlights: &[
            "Mona Lisa by Leonardo da Vinci",
            "Venus de Milo",
            "More than 35,000 works on display",
            "Former royal palace",
        ],
    },
    ActivityTemplate {
        time: "Afternoon (2:00 PM)",
        activity: "Lunch in Le Marais",
        description: "French bistro classics or a trendy cafe in the historic Marais district.",
        location: "Le Marais, 4th arrondissement, Paris",
        area: Some("Le Marais District"),
        kind: "dining",
        cost: 35.0,
        duration: "2 hours",
        rating: Some(4.6),
        best_time: Some("Lunch/Afternoon"),
        tips: "L'As du Fallafel for falafel, Breizh Cafe for crepes.",
        highlights: &[
            "Historic Jewish quarter",
            "Boutiques and galleries",
            "Famous falafel",
            "Medieval architecture",
        ],
    },
    ActivityTemplate {
        time: "Evening (7:00 PM)",
        activity: "Eiffel Tower at Sunset",
        description: "Ride up the Eiffel Tower for panoramic views, then watch the evening light show.",
        location: "Champ de Mars, 5 Avenue Anatole France, 75007 Paris",
        area: Some("7th Arrondissement"),
        kind: "sightseeing",
        cost: 26.0,
        duration: "2-3 hours",
        rating: Some(4.9),
        best_time: Some("Sunset/Evening"),
        tips: "Book weeks ahead. The tower sparkles for five minutes every hour after dark.",
        highlights: &[
            "324-meter iron tower",
            "Evening light shows",
            "Panoramic city views",
            "Champagne bar at the summit",
        ],
    },
];

const DUBAI_ACTIVITIES: &[ActivityTemplate] = &[
    ActivityTemplate {
        time: "Morning (9:00 AM)",
        activity: "Visit Burj Khalifa Observation Deck",
        description: "Ride to the 124th and 125th floors of the world's tallest building.",
        location: "1 Sheikh Mohammed bin Rashid Blvd, Dubai",
        area: Some("Downtown Dubai"),
        kind: "sightseeing",
        cost: 40.0,
        duration: "2 hours",
        rating: Some(4.8),
        best_time: Some("Early Morning"),
        tips: "Online tickets are cheaper. Mornings have the clearest air and the shortest lines.",
        highlights: &[
            "World's tallest building at 828m",
            "360-degree views",
            "High-speed elevators",
            "Multimedia exhibits",
        ],
    },
    ActivityTemplate {
        time: "Afternoon (2:00 PM)",
        activity: "Gold Souk & Traditional Markets",
        description: "Wander the gold market and the spice souk next door, and practice your bargaining.",
        location: "Gold Souk, Deira, Dubai",
        area: Some("Deira - Old Dubai"),
        kind: "shopping",
        cost: 50.0,
        duration: "3 hours",
        rating: Some(4.4),
        best_time: Some("Afternoon/Evening"),
        tips: "Prices are negotiable. Open at about half the asking price.",
        highlights: &[
            "Over 300 gold retailers",
            "Spice market nearby",
            "Competitive gold prices",
            "Historic trading quarter",
        ],
    },
    ActivityTemplate {
        time: "Evening (7:00 PM)",
        activity: "Dubai Fountain Show & Dinner",
        description: "Watch the choreographed fountain show at Dubai Mall, then dine at a waterfront restaurant.",
        location: "Dubai Mall, Downtown Dubai",
        area: None,
        kind: "entertainment",
        cost: 60.0,
        duration: "3 hours",
        rating: None,
        best_time: None,
        tips: "Shows run every 30 minutes from 6 to 11 PM and are free to watch.",
        highlights: &[],
    },
];

fn activity_templates(key: &str, destination: &str) -> Vec<Activity> {
    let known = match key {
        "tokyo" => Some(TOKYO_ACTIVITIES),
        "paris" => Some(PARIS_ACTIVITIES),
        "dubai" => Some(DUBAI_ACTIVITIES),
        _ => None,
    };

    if let Some(templates) = known {
        return templates.iter().map(ActivityTemplate::to_activity).collect();
    }

    vec![
        Activity {
            time: "Morning (9:00 AM)".into(),
            activity: format!("Morning Sightseeing in {}", destination),
            description: format!(
                "Start the day at {}'s best-known landmarks and soak up the local atmosphere.",
                destination
            ),
            location: format!("{} City Center", destination),
            kind: "sightseeing".into(),
            estimated_cost: 50.0,
            duration: "3 hours".into(),
            tips: "Go early, wear comfortable shoes and carry water.".into(),
            ..Default::default()
        },
        Activity {
            time: "Afternoon (1:00 PM)".into(),
            activity: format!("Cultural Experience in {}", destination),
            description: format!(
                "Museums, markets or heritage sites that show {}'s culture.",
                destination
            ),
            location: format!("{} Cultural District", destination),
            kind: "cultural".into(),
            estimated_cost: 75.0,
            duration: "4 hours".into(),
            tips: "Try the local food and respect local customs.".into(),
            ..Default::default()
        },
        Activity {
            time: "Evening (6:00 PM)".into(),
            activity: format!("Evening Entertainment in {}", destination),
            description: format!("Dinner and nightlife in {}.", destination),
            location: format!("{} Entertainment District", destination),
            kind: "entertainment".into(),
            estimated_cost: 80.0,
            duration: "3 hours".into(),
            tips: "Reserve dinner ahead and check venue dress codes.".into(),
            ..Default::default()
        },
    ]
}

/// Day-by-day template itinerary with static recommendations.
pub fn itinerary(params: &TripParameters) -> ItineraryContent {
    let destination = params.destination.as_str();
    let key = normalize_destination(destination);
    let templates = activity_templates(&key, destination);

    let daily_schedule: Vec<DayPlan> = (1..=params.duration_days)
        .map(|day| {
            let offset = i64::from(day - 1);
            let date = params.start_date + Duration::days(offset);
            let increment = f64::from(day - 1) * 10.0;

            let activities: Vec<Activity> = templates
                .iter()
                .cloned()
                .map(|mut activity| {
                    activity.estimated_cost += increment;
                    activity
                })
                .collect();
            let daily_cost_estimate = activities.iter().map(|a| a.estimated_cost).sum();

            DayPlan {
                day,
                date: date.format("%Y-%m-%d").to_string(),
                title: format!("Day {}: Exploring {}", day, destination),
                theme: format!("Day {} adventures and cultural experiences", day),
                activities,
                dining_recommendations: vec![
                    "Try local restaurants near your activities - ask locals for recommendations"
                        .to_string(),
                    format!("Explore {}'s food scene with authentic local cuisine", destination),
                ],
                daily_cost_estimate,
                transportation_notes: "Use local transport options, estimated $20-30 daily"
                    .to_string(),
            }
        })
        .collect();

    ItineraryContent {
        overview: format!(
            "Experience the very best of {d} with this comprehensive {n}-day itinerary. Each day \
             offers unique experiences from cultural immersion to adventure activities, designed \
             to showcase {d}'s diverse attractions and authentic local life.",
            d = destination,
            n = params.duration_days
        ),
        total_estimated_cost: daily_schedule.iter().map(|d| d.daily_cost_estimate).sum(),
        daily_schedule,
        recommendations: recommendations(destination),
        budget_breakdown: itinerary_budget_breakdown(),
    }
}

fn itinerary_budget_breakdown() -> Map<String, Value> {
    [
        ("accommodation_per_night", 100),
        ("meals_per_day", 60),
        ("activities_per_day", 150),
        ("transportation_daily", 25),
        ("shopping_souvenirs", 200),
        ("emergency_buffer", 300),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), Value::from(value)))
    .collect()
}

// =============================================================================
// Recommendations
// =============================================================================

/// Map pin as (name, type, area, description)
type Pin = (&'static str, &'static str, &'static str, &'static str);

struct RecommendationTable {
    must_visit_attractions: &'static [&'static str],
    local_cuisine: &'static [&'static str],
    must_try_restaurants: &'static [&'static str],
    hidden_gems: &'static [&'static str],
    budget_tips: &'static [&'static str],
    cultural_tips: &'static [&'static str],
    sightseeing: &'static [Pin],
    food_dining: &'static [Pin],
    shopping: &'static [Pin],
    cultural: &'static [Pin],
    attractions: &'static [Pin],
}

const GENERIC_BUDGET_TIPS: &[&str] = &[
    "Book accommodations in advance for better rates",
    "Use public transportation when available",
    "Try local street food for authentic and affordable meals",
];

const GENERIC_CULTURAL_TIPS: &[&str] = &[
    "Respect local customs and traditions",
    "Learn basic local phrases for better interaction",
    "Dress appropriately for cultural and religious sites",
];

const TOKYO: RecommendationTable = RecommendationTable {
    must_visit_attractions: &[
        "Senso-ji Temple in Asakusa - Tokyo's oldest and most significant Buddhist temple",
        "Shibuya Crossing - The world's busiest pedestrian crossing",
        "Meiji Shrine - Forested shrine dedicated to Emperor Meiji and Empress Shoken",
        "Tokyo Skytree - 634m tower with sweeping city views",
        "Tsukiji Outer Market - Fresh seafood and street food stalls",
    ],
    local_cuisine: &[
        "Ramen at Ichiran or Ippudo - $8-15 per bowl",
        "Sushi at Sushi Dai or Daiwa Sushi - $30-50 per person",
        "Tonkatsu at Tonki in Meguro - $12-18 per person",
        "Tempura at Tempura Tsunahachi - $25-40 per person",
        "Takoyaki and yakitori from Shibuya street stalls - $5-10",
    ],
    must_try_restaurants: &[
        "Ichiran Ramen (Multiple locations): Tonkotsu ramen, $10-15, Solo dining booths",
        "Sukiyabashi Jiro (Ginza): Sushi, $$$$, Reserve months ahead",
        "Katsukura (Shinjuku): Tonkatsu, $15-25, Crisp premium pork cutlets",
        "Tsuta (Sugamo): Michelin-starred ramen, $12-18, Arrive early",
        "Gonpachi (Nishi-Azabu): Izakaya, $30-50, The Kill Bill restaurant",
    ],
    hidden_gems: &[
        "Yanaka Ginza - Old Tokyo shopping street with local charm",
        "teamLab Borderless - Digital art museum in Odaiba",
        "Golden Gai - Tiny bar district in Shinjuku",
        "Sumida River Cruise - Boat ride under the cherry blossoms",
        "Nakameguro - Canal-side neighborhood of cafes and boutiques",
    ],
    budget_tips: &[
        "Capsule hotels start around $25/night and business hotels at $60-100",
        "A 7-day JR Pass costs about $200 and covers most train travel",
        "Conveyor-belt sushi and ramen shops serve full meals for $8-15",
        "Meiji Shrine, Senso-ji Temple and the Imperial Palace gardens are free",
        "Don Quijote and 100-yen stores are the cheapest places for souvenirs",
    ],
    cultural_tips: &[
        "Remove your shoes in homes, temples, ryokan and traditional restaurants",
        "Useful phrases: 'Arigatou' (thank you), 'Sumimasen' (excuse me), 'Itadakimasu' (before eating)",
        "A slight bow is a polite greeting; bow deeper in formal situations",
        "Tipping is not customary and can come across as rude",
        "At temples, bow at the gate, rinse your hands at the fountain and keep quiet",
    ],
    sightseeing: &[
        ("Senso-ji Temple", "sightseeing", "Asakusa", "Tokyo's oldest temple, founded in 628 AD"),
        ("Shibuya Crossing", "sightseeing", "Shibuya", "World's busiest pedestrian crossing"),
        ("Meiji Shrine", "sightseeing", "Harajuku", "Shinto shrine in a forest"),
        ("Tokyo Skytree", "sightseeing", "Sumida", "634m observation tower"),
        ("Imperial Palace", "sightseeing", "Chiyoda", "Emperor's residence and gardens"),
        ("Ueno Park", "sightseeing", "Ueno", "Large park with museums and a zoo"),
        ("Tokyo Tower", "sightseeing", "Minato", "Red 333m lattice tower"),
        ("Roppongi Hills", "sightseeing", "Roppongi", "Complex with the Mori Art Museum"),
        ("Odaiba", "sightseeing", "Odaiba", "Waterfront island district"),
        ("Takeshita Street", "sightseeing", "Harajuku", "Youth fashion street"),
    ],
    food_dining: &[
        ("Ichiran Ramen", "restaurant", "Multiple locations", "Tonkotsu ramen, $10-15"),
        ("Sushi Dai", "restaurant", "Toyosu", "Sushi breakfast, $30-50"),
        ("Tonki", "restaurant", "Meguro", "Tonkatsu, $12-18"),
        ("Tempura Tsunahachi", "restaurant", "Shinjuku", "Tempura since 1924, $25-40"),
        ("Gonpachi", "restaurant", "Nishi-Azabu", "Izakaya, $30-50"),
        ("Sukiyabashi Jiro", "restaurant", "Ginza", "Sushi counter, $$$$"),
        ("Tsuta", "restaurant", "Sugamo", "Michelin ramen, $12-18"),
        ("Katsukura", "restaurant", "Shinjuku", "Pork cutlets, $15-25"),
        ("Afuri Ramen", "restaurant", "Harajuku", "Yuzu ramen, $10-15"),
        ("Nakiryu", "restaurant", "Otsuka", "Michelin tantanmen, $12"),
        ("Ginza Kyubey", "restaurant", "Ginza", "Edomae sushi, $100-200"),
        ("Maisen", "restaurant", "Omotesando", "Tonkatsu, $15-25"),
    ],
    shopping: &[
        ("Shibuya 109", "shopping", "Shibuya", "Fashion department store"),
        ("Takeshita Street", "shopping", "Harajuku", "Youth fashion shops"),
        ("Ginza Six", "shopping", "Ginza", "Luxury shopping complex"),
        ("Don Quijote", "shopping", "Multiple locations", "Discount variety store"),
        ("Omotesando Hills", "shopping", "Omotesando", "Designer fashion mall"),
        ("Nakamise Street", "shopping", "Asakusa", "Souvenir stalls"),
        ("Akihabara Electric Town", "shopping", "Akihabara", "Electronics and anime"),
        ("Tokyu Hands", "shopping", "Shibuya", "Lifestyle department store"),
    ],
    cultural: &[
        ("Kabuki-za Theatre", "cultural", "Ginza", "Kabuki performances"),
        ("Tokyo National Museum", "cultural", "Ueno", "Japanese art and antiquities"),
        ("Mori Art Museum", "cultural", "Roppongi", "Contemporary art"),
        ("Ghibli Museum", "cultural", "Mitaka", "Studio Ghibli animation"),
        ("Nezu Museum", "cultural", "Omotesando", "Pre-modern Japanese art"),
        ("Edo-Tokyo Museum", "cultural", "Ryogoku", "City history"),
        ("teamLab Borderless", "cultural", "Odaiba", "Immersive digital art"),
        ("Ryogoku Kokugikan", "cultural", "Ryogoku", "Sumo tournaments"),
    ],
    attractions: &[
        ("Tokyo Disneyland", "attraction", "Urayasu", "Disney theme park"),
        ("Tokyo DisneySea", "attraction", "Urayasu", "Nautical Disney park"),
        ("Pokemon Center", "attraction", "Multiple", "Official Pokemon store"),
        ("Street Kart", "attraction", "Shibuya", "Go-karting through city streets"),
        ("Oedo Onsen", "attraction", "Odaiba", "Hot spring theme park"),
        ("Cat Cafe", "attraction", "Harajuku", "Cafe with resident cats"),
        ("Owl Cafe", "attraction", "Harajuku", "Cafe with owls"),
        ("Tokyo Sea Life Park", "attraction", "Kasai", "Aquarium"),
    ],
};

const PARIS: RecommendationTable = RecommendationTable {
    must_visit_attractions: &[
        "Eiffel Tower - Book tickets online to skip the lines",
        "Louvre Museum - The world's largest art museum, home of the Mona Lisa",
        "Notre-Dame Cathedral - Gothic cathedral on the Ile de la Cite",
        "Arc de Triomphe - Napoleonic arch with rooftop views",
        "Sacre-Coeur Basilica - White basilica on top of Montmartre",
    ],
    local_cuisine: &[
        "Croissants at Du Pain et des Idees - $3-5",
        "Steak frites at Le Relais de l'Entrecote - $30-40 per person",
        "Macarons at Laduree or Pierre Herme - $2-3 each",
        "French onion soup at Au Pied de Cochon - $15-20",
        "Street crepes in Montmartre - $5-10",
    ],
    must_try_restaurants: &[
        "L'Ami Jean (Rue Malar): Basque, $50-70, Cozy and lively",
        "Breizh Cafe (Le Marais): Breton crepes, $20-30, Organic ingredients",
        "Le Comptoir du Relais (Saint-Germain): Bistro, $40-60, Book ahead",
        "Pink Mamma (Pigalle): Italian, $35-50, Rooftop tables",
        "Bouillon Chartier (Grands Boulevards): Brasserie, $20-30, Affordable classics",
    ],
    hidden_gems: &[
        "Musee Rodin Gardens - Sculpture garden away from the crowds",
        "Canal Saint-Martin - Picnics and people-watching along the water",
        "Sainte-Chapelle - Stained glass chapel many visitors skip",
        "Marche des Enfants Rouges - The oldest covered market in Paris",
        "Promenade Plantee - Elevated park that inspired the High Line",
    ],
    budget_tips: &[],
    cultural_tips: &[],
    sightseeing: &[],
    food_dining: &[],
    shopping: &[],
    cultural: &[],
    attractions: &[],
};

const DUBAI: RecommendationTable = RecommendationTable {
    must_visit_attractions: &[
        "Burj Khalifa - Observation deck on the 124th floor",
        "Dubai Mall - Giant mall with the Dubai Aquarium inside",
        "Palm Jumeirah - Artificial island of resorts and beaches",
        "Dubai Fountain - Choreographed show outside Dubai Mall",
        "Gold Souk - Traditional gold jewelry market",
    ],
    local_cuisine: &[
        "Shawarma at Al Mallah - $3-5",
        "Arabic mezze at Al Nafoorah - $40-60 per person",
        "Emirati breakfast at Arabian Tea House - $15-25",
        "Kunafa at Firas Sweets - $5-8",
        "Dates and Arabic coffee - offered free at most venues",
    ],
    must_try_restaurants: &[
        "Al Hadheerah (Bab Al Shams): Desert dining, $80-120, Live entertainment",
        "Pierchic (Al Qasr): Seafood, $100-150, Tables on a pier",
        "Ravi Restaurant (Satwa): Pakistani, $10-15, Local favorite since 1978",
        "Zuma (DIFC): Contemporary Japanese, $80-120, Busy and glamorous",
        "Bu Qtair (Umm Suqeim): Seafood shack, $15-25, No frills",
    ],
    hidden_gems: &[
        "Al Fahidi Historical District - Old Dubai with wind towers",
        "Alserkal Avenue - Art galleries in converted warehouses",
        "Ras Al Khor Wildlife Sanctuary - Flamingo viewing hides",
        "La Mer - Beachfront with street art",
        "Dubai Miracle Garden - Seasonal flower displays",
    ],
    budget_tips: &[],
    cultural_tips: &[],
    sightseeing: &[],
    food_dining: &[],
    shopping: &[],
    cultural: &[],
    attractions: &[],
};

const LONDON: RecommendationTable = RecommendationTable {
    must_visit_attractions: &[
        "British Museum - Free entry, home of the Rosetta Stone",
        "Tower of London - Castle housing the Crown Jewels",
        "Big Ben & Houses of Parliament - The clock tower and Westminster Palace",
        "Buckingham Palace - Changing of the Guard at 11:00 AM",
        "London Eye - Observation wheel on the South Bank",
    ],
    local_cuisine: &[
        "Fish & chips at Poppies (Spitalfields) - $15-20",
        "Sunday roast at The Harwood Arms - $25-35",
        "Afternoon tea at Sketch - $60-80",
        "Pie & mash at M. Manze - $10-15",
        "Full English breakfast at The Wolseley - $20-30",
    ],
    must_try_restaurants: &[
        "Dishoom (Multiple locations): Bombay cafe, $20-35, Book for dinner",
        "Borough Market: Food stalls, $10-20, Busiest Thursday to Saturday",
        "Hawksmoor (Seven Dials): Steakhouse, $50-80, Dry-aged beef",
        "Padella (Borough): Fresh pasta, $12-18, Expect a queue",
        "St. John (Smithfield): British, $50-70, Nose-to-tail cooking",
    ],
    hidden_gems: &[
        "Sky Garden - Free rooftop garden, book ahead",
        "Leake Street Tunnel - Legal graffiti tunnel under Waterloo",
        "God's Own Junkyard - Neon sign gallery in Walthamstow",
        "Hampstead Heath - Swimming ponds and skyline views",
        "Neal's Yard - Colorful courtyard in Covent Garden",
    ],
    budget_tips: &[],
    cultural_tips: &[],
    sightseeing: &[],
    food_dining: &[],
    shopping: &[],
    cultural: &[],
    attractions: &[],
};

const NEW_YORK: RecommendationTable = RecommendationTable {
    must_visit_attractions: &[
        "Central Park - 843 acres of walking paths and lawns",
        "Statue of Liberty & Ellis Island - Book ferry tickets in advance",
        "The Metropolitan Museum of Art - One of the world's great museums",
        "Times Square - Lights and Broadway theaters",
        "Brooklyn Bridge - Walk across for skyline views",
    ],
    local_cuisine: &[
        "Pizza at Joe's Pizza (Greenwich Village) - $3-5 per slice",
        "Pastrami on rye at Katz's Delicatessen - $20-25",
        "Bagels at Russ & Daughters - $10-15",
        "Hot dogs at Gray's Papaya - $5-8",
        "Cheesecake at Junior's - $8-10 per slice",
    ],
    must_try_restaurants: &[
        "Peter Luger Steak House (Brooklyn): Steakhouse, $100-150, Classic since 1887",
        "Xi'an Famous Foods (Multiple): Hand-pulled noodles, $10-15, Spicy cumin lamb",
        "Shake Shack (Madison Square Park): Burgers, $12-18, The original stand",
        "Levain Bakery (Upper West Side): Cookies, $5-6, Arrive early",
        "The Halal Guys (Midtown): Chicken over rice, $8-12, Lines move fast",
    ],
    hidden_gems: &[
        "The High Line - Park built on an old elevated railway",
        "Roosevelt Island Tramway - Cable car ride for a subway fare",
        "The Cloisters - Medieval art in Fort Tryon Park",
        "DUMBO - Cobblestones and bridge views in Brooklyn",
        "Whispering Gallery - Acoustic arches in Grand Central Terminal",
    ],
    budget_tips: &[],
    cultural_tips: &[],
    sightseeing: &[],
    food_dining: &[],
    shopping: &[],
    cultural: &[],
    attractions: &[],
};

fn table(key: &str) -> Option<&'static RecommendationTable> {
    match key {
        "tokyo" => Some(&TOKYO),
        "paris" => Some(&PARIS),
        "dubai" => Some(&DUBAI),
        "london" => Some(&LONDON),
        "new york" => Some(&NEW_YORK),
        _ => None,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pins(items: &[Pin]) -> Vec<PlacePin> {
    items
        .iter()
        .map(|(name, kind, area, description)| PlacePin {
            name: name.to_string(),
            kind: kind.to_string(),
            area: area.to_string(),
            description: description.to_string(),
        })
        .collect()
}

fn or_generic(items: &[&str], generic: &[&str]) -> Vec<String> {
    if items.is_empty() {
        strings(generic)
    } else {
        strings(items)
    }
}

/// Static recommendations for a destination. Unknown destinations get
/// generic advice naming the destination.
pub fn recommendations(destination: &str) -> Recommendations {
    let Some(table) = table(&normalize_destination(destination)) else {
        return generic_recommendations(destination);
    };

    Recommendations {
        budget_tips: or_generic(table.budget_tips, GENERIC_BUDGET_TIPS),
        cultural_tips: or_generic(table.cultural_tips, GENERIC_CULTURAL_TIPS),
        local_cuisine: strings(table.local_cuisine),
        must_visit_attractions: strings(table.must_visit_attractions),
        must_try_restaurants: strings(table.must_try_restaurants),
        hidden_gems: strings(table.hidden_gems),
        sightseeing: pins(table.sightseeing),
        food_dining: pins(table.food_dining),
        shopping: pins(table.shopping),
        cultural: pins(table.cultural),
        attractions: pins(table.attractions),
        adventure: Vec::new(),
    }
}

fn generic_recommendations(d: &str) -> Recommendations {
    Recommendations {
        budget_tips: strings(GENERIC_BUDGET_TIPS),
        cultural_tips: strings(GENERIC_CULTURAL_TIPS),
        must_visit_attractions: vec![
            format!("Research top-rated attractions in {} before your trip", d),
            format!("Visit the main cultural landmarks and historical sites of {}", d),
            format!("Explore local markets and authentic neighborhoods in {}", d),
        ],
        local_cuisine: vec![
            format!("Try traditional local dishes specific to {}", d),
            format!("Visit local markets for authentic street food in {}", d),
            format!("Ask locals for their favorite restaurants in {}", d),
        ],
        must_try_restaurants: vec![
            format!("Research highly-rated local restaurants in {} on TripAdvisor", d),
            "Ask your hotel concierge for authentic dining recommendations".to_string(),
            "Look for restaurants popular with locals, not just tourists".to_string(),
        ],
        hidden_gems: vec![
            format!("Explore off-the-beaten-path neighborhoods in {}", d),
            "Visit local markets and artisan shops".to_string(),
            "Discover lesser-known viewpoints and photo spots".to_string(),
        ],
        ..Default::default()
    }
}

// =============================================================================
// Budget
// =============================================================================

const ACCOMMODATION_BASE: f64 = 80.0;
const FOOD_BASE: f64 = 50.0;
const ACTIVITY_BASE: f64 = 75.0;
const TRANSPORT_BASE: f64 = 25.0;
const AIRPORT_TRANSFERS: f64 = 50.0;

/// Formula budget scaled by trip length.
pub fn budget(destination: &str, days: u32) -> BudgetPlan {
    let d = destination;
    let n = f64::from(days);

    let budget_per_day = ACCOMMODATION_BASE * 0.5 + FOOD_BASE * 0.6 + ACTIVITY_BASE + TRANSPORT_BASE;
    let mid_per_day = ACCOMMODATION_BASE + FOOD_BASE + ACTIVITY_BASE + TRANSPORT_BASE;
    let luxury_per_day =
        ACCOMMODATION_BASE * 2.5 + FOOD_BASE * 2.0 + ACTIVITY_BASE * 1.5 + TRANSPORT_BASE * 1.5;

    BudgetPlan {
        accommodation: AccommodationBudget {
            budget_min: ACCOMMODATION_BASE * 0.5 * n,
            budget_max: ACCOMMODATION_BASE * 2.5 * n,
            recommendations: vec![
                format!("Budget Hotel in {}: ${}/night", d, ACCOMMODATION_BASE * 0.5),
                format!("Mid-range Hotel in {}: ${}/night", d, ACCOMMODATION_BASE),
                format!("Luxury Hotel in {}: ${}/night", d, ACCOMMODATION_BASE * 2.5),
            ],
            daily_average: ACCOMMODATION_BASE,
        },
        transportation: TransportationBudget {
            airport_transfers: AIRPORT_TRANSFERS,
            local_daily: TRANSPORT_BASE,
            total_transport: TRANSPORT_BASE * n + AIRPORT_TRANSFERS,
            options: strings(&["Public Transport", "Ride-sharing", "Private Car"]),
        },
        food: FoodBudget {
            budget_daily: FOOD_BASE * 0.6,
            luxury_daily: FOOD_BASE * 2.0,
            total_food_budget: FOOD_BASE * 0.6 * n,
            total_food_luxury: FOOD_BASE * 2.0 * n,
            dining_recommendations: vec![
                format!("Local restaurants in {}: $15-25 per meal", d),
                format!("Fine dining in {}: $50-100 per meal", d),
            ],
        },
        activities: ActivitiesBudget {
            daily_activity_budget: ACTIVITY_BASE,
            total_activities: ACTIVITY_BASE * n,
            must_see_attractions: vec![
                PricedAttraction {
                    name: format!("Top {} attraction", d),
                    cost: ACTIVITY_BASE,
                },
                PricedAttraction {
                    name: format!("Cultural {} site", d),
                    cost: ACTIVITY_BASE * 0.7,
                },
            ],
            free_activities: vec![
                format!("Walking tours in {}", d),
                "Public parks and beaches".to_string(),
            ],
        },
        shopping: ShoppingBudget {
            souvenirs_budget: 150.0,
            luxury_shopping: 500.0,
            local_markets: Value::from(100),
        },
        miscellaneous: MiscellaneousBudget {
            emergency_fund: 50.0 * n,
            tips_gratuities: 20.0 * n,
            phone_internet: 50.0,
        },
        total_estimates: TotalEstimates {
            budget_total: (budget_per_day * n + 250.0).floor(),
            mid_range_total: (mid_per_day * n + 400.0).floor(),
            luxury_total: (luxury_per_day * n + 700.0).floor(),
        },
        daily_breakdown: DailyBreakdown {
            budget_per_day: budget_per_day.floor(),
            luxury_per_day: luxury_per_day.floor(),
        },
        money_saving_tips: strings(&[
            "Book accommodations well in advance for better rates",
            "Use public transportation instead of taxis",
            "Eat at local restaurants and street food vendors",
            "Look for free walking tours and public attractions",
            "Travel during shoulder season for lower prices",
        ]),
        currency_info: CurrencyInfo {
            local_currency: "Local currency".to_string(),
            exchange_rate_usd: 1.0,
            payment_methods: strings(&["Cash", "Credit Cards", "Mobile Payments"]),
        },
    }
}
