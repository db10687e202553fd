//! Block types and their content schemas
//!
//! Every block carries a type tag and a content record whose shape depends
//! on the tag. Known tags map onto [`BlockKind`] and a strongly-typed
//! content struct; anything else is kept verbatim in
//! [`BlockContent::Unknown`] so it survives a save/load cycle untouched.
//!
//! Field names follow the interchange file (camelCase), so a content struct
//! serializes to exactly the object stored under a block's `content` key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of block types the builder knows how to render
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BlockKind {
    Hero,
    Section,
    Note,
    Spacer,
    Timeline,
    Wisdom,
    Coupon,
    OpenWhen,
    Gallery,
    Music,
    Video,
    Voice,
    Quiz,
    Poll,
    Game,
    Secret,
    Countdown,
    SpinWheel,
    Drawing,
    Dice,
    Map,
}

/// Grouping used by the block library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum BlockCategory {
    #[strum(serialize = "Basic Elements")]
    Basic,
    #[strum(serialize = "Content")]
    Content,
    #[strum(serialize = "Media")]
    Media,
    #[strum(serialize = "Interactive")]
    Interactive,
    #[strum(serialize = "Special")]
    Special,
}

impl BlockKind {
    /// Type tag as written in the interchange file
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Section => "section",
            BlockKind::Note => "note",
            BlockKind::Spacer => "spacer",
            BlockKind::Timeline => "timeline",
            BlockKind::Wisdom => "wisdom",
            BlockKind::Coupon => "coupon",
            BlockKind::OpenWhen => "openwhen",
            BlockKind::Gallery => "gallery",
            BlockKind::Music => "music",
            BlockKind::Video => "video",
            BlockKind::Voice => "voice",
            BlockKind::Quiz => "quiz",
            BlockKind::Poll => "poll",
            BlockKind::Game => "game",
            BlockKind::Secret => "secret",
            BlockKind::Countdown => "countdown",
            BlockKind::SpinWheel => "spinwheel",
            BlockKind::Drawing => "drawing",
            BlockKind::Dice => "dice",
            BlockKind::Map => "map",
        }
    }

    /// Human label shown in the block library
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Hero => "Heading",
            BlockKind::Section => "Divider",
            BlockKind::Note => "Note",
            BlockKind::Spacer => "Spacer",
            BlockKind::Timeline => "Timeline",
            BlockKind::Wisdom => "Daily Wisdom",
            BlockKind::Coupon => "Coupon",
            BlockKind::OpenWhen => "Open When",
            BlockKind::Gallery => "Gallery",
            BlockKind::Music => "Music",
            BlockKind::Video => "Video",
            BlockKind::Voice => "Voice Message",
            BlockKind::Quiz => "Quiz",
            BlockKind::Poll => "Poll",
            BlockKind::Game => "Memory Game",
            BlockKind::Secret => "Secret",
            BlockKind::Countdown => "Countdown",
            BlockKind::SpinWheel => "Spin Wheel",
            BlockKind::Drawing => "Drawing",
            BlockKind::Dice => "Dice Roller",
            BlockKind::Map => "Map",
        }
    }

    pub fn category(&self) -> BlockCategory {
        match self {
            BlockKind::Hero | BlockKind::Section | BlockKind::Note | BlockKind::Spacer => {
                BlockCategory::Basic
            }
            BlockKind::Timeline | BlockKind::Wisdom | BlockKind::Coupon | BlockKind::OpenWhen => {
                BlockCategory::Content
            }
            BlockKind::Gallery | BlockKind::Music | BlockKind::Video | BlockKind::Voice => {
                BlockCategory::Media
            }
            BlockKind::Quiz
            | BlockKind::Poll
            | BlockKind::Game
            | BlockKind::Secret
            | BlockKind::Countdown
            | BlockKind::SpinWheel
            | BlockKind::Drawing
            | BlockKind::Dice => BlockCategory::Interactive,
            BlockKind::Map => BlockCategory::Special,
        }
    }
}

// ==================== Content schemas ====================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionContent {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteContent {
    pub text: String,
}

/// Multiple-choice question with one correct answer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizContent {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl QuizContent {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_index
    }
}

/// Countdown to a calendar date
///
/// The date is kept as entered (`YYYY-MM-DD`); an empty or unparseable date
/// simply renders as zero days left.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownContent {
    pub date: String,
    pub label: String,
}

impl CountdownContent {
    pub fn target_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// Whole days from `today` until the target, never negative
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        self.target_date()
            .map(|target| (target - today).num_days().max(0))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapContent {
    pub location: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoContent {
    pub url: String,
}

/// A message hidden behind a pass code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretContent {
    pub code: String,
    pub hint: String,
    pub message: String,
}

impl SecretContent {
    /// Codes are compared case-insensitively
    pub fn unlocks(&self, attempt: &str) -> bool {
        attempt.to_lowercase() == self.code.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineContent {
    pub events: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicContent {
    pub title: String,
    pub artist: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryContent {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CouponContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PollContent {
    pub question: String,
    pub options: Vec<String>,
}

/// The memory game has no editable content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameContent {}

/// Fallback quote when a wisdom block has none
pub const DEFAULT_WISDOM_QUOTE: &str = "Today is a beautiful day!";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WisdomContent {
    pub quotes: Vec<String>,
}

impl WisdomContent {
    /// Quote shown on a given day of the month (quotes rotate daily)
    pub fn quote_for_day(&self, day_of_month: u32) -> &str {
        if self.quotes.is_empty() {
            return DEFAULT_WISDOM_QUOTE;
        }
        let index = day_of_month as usize % self.quotes.len();
        &self.quotes[index]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWhenItem {
    pub id: u64,
    pub label: String,
    pub text: String,
}

/// A stack of "open when..." envelopes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWhenContent {
    pub items: Vec<OpenWhenItem>,
}

impl OpenWhenContent {
    /// Append an envelope with an id one past the current maximum
    pub fn push_item(&mut self, label: impl Into<String>, text: impl Into<String>) -> u64 {
        let id = self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        self.items.push(OpenWhenItem {
            id,
            label: label.into(),
            text: text.into(),
        });
        id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceContent {
    #[serde(rename = "audioURL")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinWheelContent {
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawingContent {
    pub drawing_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiceContent {
    pub dice_count: u32,
}

impl Default for DiceContent {
    fn default() -> Self {
        Self { dice_count: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacerHeight {
    Small,
    #[default]
    Medium,
    Large,
    Custom,
}

impl SpacerHeight {
    /// Height in pixels for the fixed sizes
    pub fn pixels(&self) -> Option<u32> {
        match self {
            SpacerHeight::Small => Some(32),
            SpacerHeight::Medium => Some(64),
            SpacerHeight::Large => Some(96),
            SpacerHeight::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Line,
    Dots,
    Pattern,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSpacing {
    Tight,
    #[default]
    Medium,
    Wide,
}

/// Vertical whitespace with an optional divider
///
/// Every field is optional: a fresh spacer stores an empty record and the
/// renderer fills in the defaults, the divider colour coming from the theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<SpacerHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_divider: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_style: Option<DividerStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_spacing: Option<PatternSpacing>,
}

impl SpacerContent {
    pub fn height(&self) -> SpacerHeight {
        self.height.unwrap_or_default()
    }

    pub fn custom_height(&self) -> &str {
        self.custom_height.as_deref().unwrap_or("50px")
    }

    pub fn shows_divider(&self) -> bool {
        self.show_divider.unwrap_or(false)
    }

    pub fn divider_style(&self) -> DividerStyle {
        self.divider_style.unwrap_or_default()
    }

    pub fn divider_color<'a>(&'a self, theme_primary: &'a str) -> &'a str {
        self.divider_color.as_deref().unwrap_or(theme_primary)
    }

    pub fn custom_pattern(&self) -> &str {
        self.custom_pattern.as_deref().unwrap_or("\u{2764}\u{fe0f}")
    }

    pub fn pattern_spacing(&self) -> PatternSpacing {
        self.pattern_spacing.unwrap_or_default()
    }
}

// ==================== Tagged content ====================

macro_rules! block_content {
    ($($kind:ident => $content:ident),+ $(,)?) => {
        /// Content of a block, tagged by its type
        #[derive(Debug, Clone, PartialEq)]
        pub enum BlockContent {
            $($kind($content),)+
            /// A type tag this build does not know, with its content as found
            Unknown { kind: String, raw: Value },
        }

        impl BlockContent {
            /// The known kind, or `None` for [`BlockContent::Unknown`]
            pub fn kind(&self) -> Option<BlockKind> {
                match self {
                    $(BlockContent::$kind(_) => Some(BlockKind::$kind),)+
                    BlockContent::Unknown { .. } => None,
                }
            }

            /// Decode a content value against the schema of `kind`
            pub fn from_value(kind: BlockKind, value: Value) -> Result<Self, serde_json::Error> {
                match kind {
                    $(BlockKind::$kind => serde_json::from_value(value).map(BlockContent::$kind),)+
                }
            }

            /// Encode the content record as it appears in the interchange file
            pub fn to_value(&self) -> Result<Value, serde_json::Error> {
                match self {
                    $(BlockContent::$kind(content) => serde_json::to_value(content),)+
                    BlockContent::Unknown { raw, .. } => Ok(raw.clone()),
                }
            }
        }

        $(
            impl From<$content> for BlockContent {
                fn from(content: $content) -> Self {
                    BlockContent::$kind(content)
                }
            }
        )+
    };
}

block_content! {
    Hero => HeroContent,
    Section => SectionContent,
    Note => NoteContent,
    Spacer => SpacerContent,
    Timeline => TimelineContent,
    Wisdom => WisdomContent,
    Coupon => CouponContent,
    OpenWhen => OpenWhenContent,
    Gallery => GalleryContent,
    Music => MusicContent,
    Video => VideoContent,
    Voice => VoiceContent,
    Quiz => QuizContent,
    Poll => PollContent,
    Game => GameContent,
    Secret => SecretContent,
    Countdown => CountdownContent,
    SpinWheel => SpinWheelContent,
    Drawing => DrawingContent,
    Dice => DiceContent,
    Map => MapContent,
}

impl BlockContent {
    /// Content for a type tag that is not in [`BlockKind`]: an empty record
    pub fn unknown(kind: impl Into<String>) -> Self {
        BlockContent::Unknown {
            kind: kind.into(),
            raw: json!({}),
        }
    }

    /// Default content for a freshly added block of the given tag
    ///
    /// Unrecognized tags get an empty [`BlockContent::Unknown`] record.
    pub fn default_for_tag(tag: &str) -> Self {
        match tag.parse::<BlockKind>() {
            Ok(kind) => Self::default_for(kind),
            Err(_) => Self::unknown(tag),
        }
    }

    /// Decode content for a raw type tag, keeping unknown tags verbatim
    pub fn from_tagged_value(tag: &str, value: Value) -> Result<Self, serde_json::Error> {
        match tag.parse::<BlockKind>() {
            Ok(kind) => Self::from_value(kind, value),
            Err(_) => Ok(BlockContent::Unknown {
                kind: tag.to_string(),
                raw: value,
            }),
        }
    }

    /// Type tag as written in the interchange file
    pub fn type_tag(&self) -> &str {
        match self {
            BlockContent::Unknown { kind, .. } => kind,
            known => known.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }

    /// The default content table
    pub fn default_for(kind: BlockKind) -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        match kind {
            BlockKind::Hero => HeroContent {
                title: "Celebrate!".into(),
                subtitle: "This is for you.".into(),
            }
            .into(),
            BlockKind::Section => SectionContent {
                title: "New Chapter".into(),
            }
            .into(),
            BlockKind::Note => NoteContent {
                text: "Write a heartfelt message...".into(),
            }
            .into(),
            BlockKind::Quiz => QuizContent {
                question: "Who is my favorite superhero?".into(),
                options: strings(&["Batman", "Superman", "Iron Man", "Thor"]),
                correct_index: 0,
            }
            .into(),
            BlockKind::Countdown => CountdownContent {
                date: "2025-01-01".into(),
                label: "Countdown".into(),
            }
            .into(),
            BlockKind::Map => MapContent {
                location: "Paris, France".into(),
                caption: "Where it all began.".into(),
            }
            .into(),
            BlockKind::Video => VideoContent::default().into(),
            BlockKind::Secret => SecretContent {
                code: "1234".into(),
                hint: "Password is 1234".into(),
                message: "Surprise!".into(),
            }
            .into(),
            BlockKind::Timeline => TimelineContent {
                events: vec![TimelineEvent {
                    date: "2023".into(),
                    title: "Start".into(),
                    desc: "A special moment.".into(),
                }],
            }
            .into(),
            BlockKind::Music => MusicContent {
                title: "Our Song".into(),
                artist: "Artist".into(),
                link: String::new(),
            }
            .into(),
            BlockKind::Gallery => GalleryContent::default().into(),
            BlockKind::Coupon => CouponContent {
                text: "Good for One Hug".into(),
            }
            .into(),
            BlockKind::Poll => PollContent {
                question: "What should we do next?".into(),
                options: strings(&["Dinner", "Movie", "Trip"]),
            }
            .into(),
            BlockKind::Game => GameContent::default().into(),
            BlockKind::Wisdom => WisdomContent {
                quotes: strings(&["The best thing to hold onto in life is each other."]),
            }
            .into(),
            BlockKind::OpenWhen => OpenWhenContent {
                items: vec![OpenWhenItem {
                    id: 1,
                    label: "Open when you're happy".into(),
                    text: "I'm glad you're smiling!".into(),
                }],
            }
            .into(),
            BlockKind::Voice => VoiceContent::default().into(),
            BlockKind::SpinWheel => SpinWheelContent {
                options: strings(&["Option 1", "Option 2", "Option 3", "Option 4"]),
            }
            .into(),
            BlockKind::Drawing => DrawingContent::default().into(),
            BlockKind::Dice => DiceContent { dice_count: 1 }.into(),
            BlockKind::Spacer => SpacerContent::default().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_tags_round_trip_through_from_str() {
        for kind in BlockKind::iter() {
            assert_eq!(kind.as_str().parse::<BlockKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert_eq!(BlockKind::iter().count(), 21);
    }

    #[test]
    fn test_multiword_tags_are_concatenated() {
        assert_eq!(
            "openwhen".parse::<BlockKind>().unwrap(),
            BlockKind::OpenWhen
        );
        assert_eq!(
            "spinwheel".parse::<BlockKind>().unwrap(),
            BlockKind::SpinWheel
        );
        assert!("open_when".parse::<BlockKind>().is_err());
    }

    #[test]
    fn test_hero_default() {
        let content = BlockContent::default_for(BlockKind::Hero);
        assert_eq!(
            content.to_value().unwrap(),
            json!({"title": "Celebrate!", "subtitle": "This is for you."})
        );
    }

    #[test]
    fn test_every_default_matches_its_kind() {
        for kind in BlockKind::iter() {
            let content = BlockContent::default_for(kind);
            assert_eq!(content.kind(), Some(kind));
            assert_eq!(content.type_tag(), kind.as_str());
        }
    }

    fn default_value(kind: BlockKind) -> Value {
        BlockContent::default_for(kind).to_value().unwrap()
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let quiz = default_value(BlockKind::Quiz);
        assert_eq!(quiz["correctIndex"], 0);

        let voice = default_value(BlockKind::Voice);
        assert_eq!(voice, json!({"audioURL": null}));

        let dice = default_value(BlockKind::Dice);
        assert_eq!(dice, json!({"diceCount": 1}));

        let drawing = default_value(BlockKind::Drawing);
        assert_eq!(drawing, json!({"drawingData": null}));
    }

    #[test]
    fn test_spacer_and_game_defaults_are_empty_records() {
        assert_eq!(default_value(BlockKind::Spacer), json!({}));
        assert_eq!(default_value(BlockKind::Game), json!({}));
    }

    #[test]
    fn test_unknown_tag_keeps_raw_value() {
        let raw = json!({"anything": [1, 2, 3]});
        let content = BlockContent::from_tagged_value("confetti", raw.clone()).unwrap();
        assert_eq!(content.kind(), None);
        assert_eq!(content.type_tag(), "confetti");
        assert_eq!(content.to_value().unwrap(), raw);

        let fresh = BlockContent::default_for_tag("confetti");
        assert_eq!(fresh.to_value().unwrap(), json!({}));
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        let result = BlockContent::from_value(BlockKind::Quiz, json!({"correctIndex": "zero"}));
        assert!(result.is_err());

        let result = BlockContent::from_value(BlockKind::Note, json!("just text"));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_fields_take_empty_values() {
        let content = BlockContent::from_value(BlockKind::Hero, json!({"title": "Hi"})).unwrap();
        assert_eq!(
            content,
            BlockContent::Hero(HeroContent {
                title: "Hi".into(),
                subtitle: String::new(),
            })
        );
    }

    #[test]
    fn test_secret_unlock_ignores_case() {
        let secret = SecretContent {
            code: "Paris".into(),
            hint: String::new(),
            message: "Surprise!".into(),
        };
        assert!(secret.unlocks("paris"));
        assert!(secret.unlocks("PARIS"));
        assert!(!secret.unlocks("London"));
    }

    #[test]
    fn test_wisdom_rotates_daily() {
        let wisdom = WisdomContent {
            quotes: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(wisdom.quote_for_day(1), "b");
        assert_eq!(wisdom.quote_for_day(3), "a");
        assert_eq!(
            WisdomContent::default().quote_for_day(7),
            DEFAULT_WISDOM_QUOTE
        );
    }

    #[test]
    fn test_countdown_days_left() {
        let countdown = CountdownContent {
            date: "2025-01-11".into(),
            label: "Trip".into(),
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(countdown.days_left(today), 10);

        let past = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(countdown.days_left(past), 0);

        let blank = CountdownContent::default();
        assert_eq!(blank.days_left(today), 0);
    }

    #[test]
    fn test_open_when_push_item_picks_next_id() {
        let mut content = OpenWhenContent::default();
        assert_eq!(content.push_item("Open when sad", "Chin up"), 1);
        assert_eq!(content.push_item("Open when bored", "Call me"), 2);
        assert_eq!(content.items.len(), 2);
    }

    #[test]
    fn test_spacer_accessors_fall_back() {
        let spacer = SpacerContent::default();
        assert_eq!(spacer.height(), SpacerHeight::Medium);
        assert_eq!(spacer.height().pixels(), Some(64));
        assert_eq!(spacer.custom_height(), "50px");
        assert!(!spacer.shows_divider());
        assert_eq!(spacer.divider_color("#1e293b"), "#1e293b");
    }

    #[test]
    fn test_categories() {
        assert_eq!(BlockKind::Hero.category(), BlockCategory::Basic);
        assert_eq!(BlockKind::Voice.category(), BlockCategory::Media);
        assert_eq!(BlockKind::Map.category(), BlockCategory::Special);
        assert_eq!(BlockCategory::Basic.to_string(), "Basic Elements");
    }
}
