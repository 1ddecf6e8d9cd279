//! Scene catalog and keyword classifier.
//!
//! The catalog is fixed and ordered. Classification is a pure function over
//! it: each scene scores one point per keyword found (case-insensitive
//! substring) in the text, the strictly highest score wins, and ties go to
//! the scene listed first.

use serde::Serialize;

/// Thematic family of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneGroup {
    Nature,
    Business,
    Technology,
    Energy,
    Status,
    Activity,
}

/// One named illustration in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub id: &'static str,
    /// Default accent color, `#rrggbb`.
    pub color: &'static str,
    pub group: SceneGroup,
    /// Lowercase keywords matched as substrings.
    pub keywords: &'static [&'static str],
}

impl Scene {
    const fn new(
        id: &'static str,
        color: &'static str,
        group: SceneGroup,
        keywords: &'static [&'static str],
    ) -> Self {
        Self {
            id,
            color,
            group,
            keywords,
        }
    }

    /// Number of this scene's keywords present in already-lowercased `text`.
    fn score(&self, text: &str) -> usize {
        self.keywords.iter().filter(|k| text.contains(*k)).count()
    }
}

use SceneGroup::*;

/// The full catalog, in tie-break order.
pub const SCENES: &[Scene] = &[
    Scene::new(
        "solar-system",
        "#6366f1",
        Nature,
        &["space", "planet", "galaxy", "universe", "orbit", "solar", "cosmos", "astronaut"],
    ),
    Scene::new(
        "growth-chart",
        "#22c55e",
        Business,
        &[
            "growth", "grew", "revenue", "percent", "chart", "statistic", "increase", "progress",
            "metric", "profit",
        ],
    ),
    Scene::new(
        "globe",
        "#3b82f6",
        Nature,
        &["world", "global", "globe", "international", "country", "countries", "earth"],
    ),
    Scene::new(
        "rocket-launch",
        "#f97316",
        Energy,
        &["rocket", "launch", "liftoff", "take off", "taking off", "blast"],
    ),
    Scene::new(
        "brain-idea",
        "#a78bfa",
        Activity,
        &["idea", "think", "brain", "creativ", "imagine", "insight", "concept"],
    ),
    Scene::new(
        "connections",
        "#06b6d4",
        Technology,
        &["network", "connect", "social", "community", "together", "relationship"],
    ),
    Scene::new(
        "clock-time",
        "#eab308",
        Status,
        &["time", "clock", "deadline", "hour", "minute", "schedule", "late"],
    ),
    Scene::new(
        "heartbeat",
        "#ef4444",
        Status,
        &["health", "heart", "pulse", "alive", "medical", "doctor", "wellness"],
    ),
    Scene::new(
        "money-flow",
        "#10b981",
        Business,
        &["money", "cost", "invest", "dollar", "price", "cash", "budget", "fund", "paid"],
    ),
    Scene::new(
        "lightning",
        "#facc15",
        Energy,
        &["speed", "power", "fast", "lightning", "quick", "instant", "electric"],
    ),
    Scene::new(
        "shopping-cart",
        "#ec4899",
        Business,
        &["shop", "buy", "purchase", "cart", "store", "commerce", "order"],
    ),
    Scene::new(
        "cooking",
        "#f59e0b",
        Activity,
        &["food", "cook", "recipe", "kitchen", "meal", "delicious", "restaurant"],
    ),
    Scene::new(
        "nature-tree",
        "#16a34a",
        Nature,
        &["nature", "tree", "forest", "plant", "environment", "green", "leaf"],
    ),
    Scene::new(
        "city-skyline",
        "#64748b",
        Business,
        &["city", "urban", "building", "skyline", "office", "downtown", "company"],
    ),
    Scene::new(
        "person-walking",
        "#8b5cf6",
        Activity,
        &["walk", "journey", "people", "person", "path", "step by step"],
    ),
    Scene::new(
        "celebration",
        "#f472b6",
        Status,
        &["celebrat", "party", "achievement", "success", "congrat", "cheer", "milestone"],
    ),
    Scene::new(
        "music-notes",
        "#d946ef",
        Activity,
        &["music", "song", "sound", "audio", "melody", "sing", "beat"],
    ),
    Scene::new(
        "book-reading",
        "#0ea5e9",
        Activity,
        &["book", "read", "learn", "study", "education", "school", "lesson"],
    ),
    Scene::new(
        "camera",
        "#94a3b8",
        Technology,
        &["camera", "photo", "video", "film", "record", "picture", "shoot"],
    ),
    Scene::new(
        "code-terminal",
        "#22d3ee",
        Technology,
        &["code", "program", "software", "developer", "terminal", "tech", "computer"],
    ),
    Scene::new(
        "mountain-peak",
        "#0d9488",
        Nature,
        &["mountain", "peak", "summit", "climb", "hike", "altitude"],
    ),
    Scene::new(
        "ocean-waves",
        "#0284c7",
        Nature,
        &["ocean", "wave", "beach", "sea ", "surf", "underwater"],
    ),
    Scene::new(
        "weather-storm",
        "#475569",
        Nature,
        &["storm", "rain", "weather", "thunder", "snow", "hurricane"],
    ),
    Scene::new(
        "handshake",
        "#d97706",
        Business,
        &["deal", "partner", "agreement", "handshake", "collaborat", "negotiat"],
    ),
    Scene::new(
        "target-goal",
        "#dc2626",
        Business,
        &["goal", "target", "objective", "mission", "focus", "aim for"],
    ),
    Scene::new(
        "trophy",
        "#ca8a04",
        Business,
        &["trophy", "winner", "champion", "award", "first place", "victory"],
    ),
    Scene::new(
        "smartphone",
        "#4f46e5",
        Technology,
        &["phone", "mobile", "smartphone", "notification", "download", "device"],
    ),
    Scene::new(
        "ai-robot",
        "#7c3aed",
        Technology,
        &["robot", "automat", "machine learning", "artificial", "algorithm", "neural"],
    ),
    Scene::new(
        "cloud-data",
        "#38bdf8",
        Technology,
        &["cloud", "server", "database", "storage", "upload", "backup"],
    ),
    Scene::new(
        "battery-charge",
        "#84cc16",
        Energy,
        &["battery", "charg", "energy", "recharge", "fuel"],
    ),
    Scene::new("fire-flame", "#ea580c", Energy, &["fire", "flame", "burn", "heat", "blazing"]),
    Scene::new(
        "check-success",
        "#15803d",
        Status,
        &["complete", "finished", "solved", "verified", "approved", "checklist"],
    ),
    Scene::new(
        "warning-alert",
        "#b91c1c",
        Status,
        &["warning", "danger", "alert", "careful", "mistake", "risk", "error"],
    ),
    Scene::new(
        "lock-security",
        "#334155",
        Status,
        &["secur", "lock", "password", "privacy", "protect", "hacker"],
    ),
    Scene::new(
        "airplane-travel",
        "#0369a1",
        Activity,
        &["travel", "flight", "airplane", "trip", "vacation", "airport"],
    ),
];

/// Scenes rotated through when the classifier finds no match.
pub const FALLBACK_SCENES: &[&Scene] = &[
    &SCENES[4],  // brain-idea
    &SCENES[5],  // connections
    &SCENES[2],  // globe
    &SCENES[9],  // lightning
    &SCENES[1],  // growth-chart
    &SCENES[0],  // solar-system
    &SCENES[18], // camera
    &SCENES[13], // city-skyline
];

/// Result of a successful classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMatch {
    pub scene: &'static Scene,
    pub score: usize,
}

impl SceneMatch {
    pub fn id(&self) -> &'static str {
        self.scene.id
    }

    pub fn color(&self) -> &'static str {
        self.scene.color
    }
}

/// Best-scoring scene for `text`, or `None` when nothing matches.
pub fn classify(text: &str) -> Option<SceneMatch> {
    let lowered = text.to_lowercase();
    let mut best: Option<SceneMatch> = None;
    for scene in SCENES {
        let score = scene.score(&lowered);
        if score > best.map_or(0, |b| b.score) {
            best = Some(SceneMatch { scene, score });
        }
    }
    best
}

pub fn find_scene(id: &str) -> Option<&'static Scene> {
    SCENES.iter().find(|s| s.id == id)
}

pub fn is_known_scene(id: &str) -> bool {
    find_scene(id).is_some()
}

/// Rotating fallback for position `index`.
pub fn fallback_scene(index: usize) -> &'static Scene {
    FALLBACK_SCENES[index % FALLBACK_SCENES.len()]
}

/// Classifier hit for `text`, else the fallback scene chosen by `seed`.
pub fn scene_or_fallback(text: &str, seed: usize) -> &'static Scene {
    classify(text).map_or_else(|| fallback_scene(seed), |m| m.scene)
}

pub fn scenes_in_group(group: SceneGroup) -> impl Iterator<Item = &'static Scene> {
    SCENES.iter().filter(move |s| s.group == group)
}
