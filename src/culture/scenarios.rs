use serde::{Deserialize, Serialize};

use crate::types::{DifficultyLevel, Localized};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCategory {
    Market,
    Transport,
    Food,
    Work,
    Family,
    Festival,
}

impl ScenarioCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Transport => "transport",
            Self::Food => "food",
            Self::Work => "work",
            Self::Family => "family",
            Self::Festival => "festival",
        }
    }
}

/// Culturally-grounded roleplay scenario. Read-only reference data; the
/// engine filters and hands these out but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub category: ScenarioCategory,
    pub difficulty: DifficultyLevel,
    pub estimated_time_minutes: u32,
    /// Vocabulary entries: `en` is the word, `hi` its meaning.
    pub vocabulary: Vec<Localized>,
    pub cultural_tips: Vec<Localized>,
}

pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self {
            scenarios: builtin_scenarios(),
        }
    }
}

impl ScenarioCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Exact difficulty match, optional category filter.
    pub fn scenarios(
        &self,
        category: Option<ScenarioCategory>,
        difficulty: DifficultyLevel,
    ) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| s.difficulty == difficulty)
            .filter(|s| category.map_or(true, |c| s.category == c))
            .collect()
    }

    /// Largest scenario that fits the time budget at the given level, so a
    /// ten-minute break gets the fullest roleplay it can hold.
    pub fn select_scenario(
        &self,
        level: DifficultyLevel,
        time_available_minutes: u32,
    ) -> Option<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| s.difficulty == level && s.estimated_time_minutes <= time_available_minutes)
            .max_by_key(|s| (s.estimated_time_minutes, std::cmp::Reverse(s.id.clone())))
    }
}

fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            id: "chai_stall".into(),
            title: Localized::new("Ordering at the Chai Stall", "चाय की दुकान पर ऑर्डर"),
            description: Localized::new(
                "Order two cups of cutting chai and a snack, and make small talk with the chaiwala.",
                "दो कटिंग चाय और नाश्ता ऑर्डर करें, और चायवाले से हल्की-फुल्की बातचीत करें।",
            ),
            category: ScenarioCategory::Food,
            difficulty: DifficultyLevel::Beginner,
            estimated_time_minutes: 10,
            vocabulary: vec![
                Localized::new("a cup of tea", "एक कप चाय"),
                Localized::new("less sugar", "कम चीनी"),
                Localized::new("how much", "कितना हुआ"),
            ],
            cultural_tips: vec![Localized::new(
                "Casual friendliness is expected at a chai stall; 'bhaiya' maps to a warm 'brother' but in English a simple friendly tone works.",
                "चाय की दुकान पर अपनापन सामान्य है; अंग्रेज़ी में 'भैया' की जगह बस दोस्ताना लहजा काफी है।",
            )],
        },
        Scenario {
            id: "auto_fare".into(),
            title: Localized::new("Settling an Auto-Rickshaw Fare", "ऑटो रिक्शा का किराया तय करना"),
            description: Localized::new(
                "Ask the driver to go to the railway station and agree on the fare before starting.",
                "ड्राइवर से रेलवे स्टेशन चलने को कहें और चलने से पहले किराया तय करें।",
            ),
            category: ScenarioCategory::Transport,
            difficulty: DifficultyLevel::Beginner,
            estimated_time_minutes: 10,
            vocabulary: vec![
                Localized::new("how far is it", "कितनी दूर है"),
                Localized::new("by the meter", "मीटर से"),
                Localized::new("keep the change", "छुट्टा रख लीजिए"),
            ],
            cultural_tips: vec![Localized::new(
                "Agreeing on the fare up front is normal and not rude.",
                "पहले से किराया तय करना सामान्य है, इसे अशिष्ट नहीं माना जाता।",
            )],
        },
        Scenario {
            id: "diwali_neighbors".into(),
            title: Localized::new("Diwali Greetings with Neighbors", "पड़ोसियों को दिवाली की शुभकामनाएं"),
            description: Localized::new(
                "Exchange festival greetings, offer sweets, and invite your neighbors over.",
                "त्योहार की शुभकामनाएं दें, मिठाई पेश करें और पड़ोसियों को घर बुलाएं।",
            ),
            category: ScenarioCategory::Festival,
            difficulty: DifficultyLevel::Beginner,
            estimated_time_minutes: 8,
            vocabulary: vec![
                Localized::new("happy Diwali", "दिवाली मुबारक"),
                Localized::new("please come over", "घर आइए"),
                Localized::new("homemade sweets", "घर की बनी मिठाई"),
            ],
            cultural_tips: vec![Localized::new(
                "Festival wishes usually come with an offer of food; declining too quickly can seem distant.",
                "त्योहार की शुभकामनाओं के साथ खाने का आग्रह आम है; तुरंत मना करना रूखा लग सकता है।",
            )],
        },
        Scenario {
            id: "sabzi_mandi".into(),
            title: Localized::new("Bargaining at the Sabzi Mandi", "सब्ज़ी मंडी में मोल-भाव"),
            description: Localized::new(
                "Buy vegetables for the week and politely negotiate the price.",
                "हफ्ते भर की सब्ज़ियां खरीदें और विनम्रता से दाम पर मोल-भाव करें।",
            ),
            category: ScenarioCategory::Market,
            difficulty: DifficultyLevel::Intermediate,
            estimated_time_minutes: 15,
            vocabulary: vec![
                Localized::new("what is the rate", "क्या भाव है"),
                Localized::new("a little cheaper", "थोड़ा सस्ता"),
                Localized::new("fresh", "ताज़ा"),
                Localized::new("half a kilo", "आधा किलो"),
            ],
            cultural_tips: vec![Localized::new(
                "Bargaining is a friendly ritual; keep it light and smile.",
                "मोल-भाव एक दोस्ताना रिवाज़ है; इसे हल्के-फुल्के अंदाज़ में रखें।",
            )],
        },
        Scenario {
            id: "office_intro".into(),
            title: Localized::new("First Day Office Introduction", "दफ़्तर में पहले दिन का परिचय"),
            description: Localized::new(
                "Introduce yourself to your new team and ask about the tea break routine.",
                "नई टीम से अपना परिचय कराएं और चाय की छुट्टी के समय के बारे में पूछें।",
            ),
            category: ScenarioCategory::Work,
            difficulty: DifficultyLevel::Intermediate,
            estimated_time_minutes: 20,
            vocabulary: vec![
                Localized::new("I have joined as", "मैंने इस पद पर कार्यभार संभाला है"),
                Localized::new("looking forward to working with you", "आपके साथ काम करने की प्रतीक्षा है"),
                Localized::new("could you show me", "क्या आप मुझे दिखा सकते हैं"),
            ],
            cultural_tips: vec![Localized::new(
                "In most offices 'sir'/'ma'am' is common for seniors, but many teams prefer first names; listen before choosing.",
                "ज़्यादातर दफ़्तरों में वरिष्ठों के लिए 'सर'/'मैम' चलता है, पर कई टीमों में पहला नाम ही प्रचलित है; पहले सुनें, फिर चुनें।",
            )],
        },
        Scenario {
            id: "wedding_small_talk".into(),
            title: Localized::new("Small Talk at a Wedding", "शादी में हल्की-फुल्की बातचीत"),
            description: Localized::new(
                "Chat with distant relatives about family, food, and how you know the couple.",
                "दूर के रिश्तेदारों से परिवार, खाने और दूल्हा-दुल्हन से आपकी जान-पहचान पर बातचीत करें।",
            ),
            category: ScenarioCategory::Family,
            difficulty: DifficultyLevel::Advanced,
            estimated_time_minutes: 20,
            vocabulary: vec![
                Localized::new("from the bride's side", "दुल्हन की तरफ़ से"),
                Localized::new("we are related through", "हमारा रिश्ता इनसे है"),
                Localized::new("the food is wonderful", "खाना बहुत बढ़िया है"),
            ],
            cultural_tips: vec![Localized::new(
                "Questions about family that feel personal elsewhere are warm conversation here.",
                "जो सवाल कहीं और निजी लग सकते हैं, यहां अपनापन दिखाने का तरीका हैं।",
            )],
        },
        Scenario {
            id: "job_interview".into(),
            title: Localized::new("The Job Interview", "नौकरी का इंटरव्यू"),
            description: Localized::new(
                "Answer common interview questions about your background and strengths.",
                "अपनी पृष्ठभूमि और खूबियों के बारे में आम इंटरव्यू सवालों के जवाब दें।",
            ),
            category: ScenarioCategory::Work,
            difficulty: DifficultyLevel::Advanced,
            estimated_time_minutes: 25,
            vocabulary: vec![
                Localized::new("tell me about yourself", "अपने बारे में बताइए"),
                Localized::new("notice period", "नोटिस अवधि"),
                Localized::new("I am comfortable with", "मैं इसमें सहज हूं"),
            ],
            cultural_tips: vec![Localized::new(
                "Introduce yourself with 'I am ...' rather than the common calque 'myself ...'.",
                "परिचय में 'I am ...' कहें; हिंदी प्रभाव वाला 'myself ...' अंग्रेज़ी में प्रचलित नहीं है।",
            )],
        },
    ]
}
