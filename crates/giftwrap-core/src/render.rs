//! Renderer dispatch and the plain-text renderer
//!
//! A [`RendererRegistry`] maps type tags to [`BlockRenderer`]s and always
//! has an answer: tags with no registered renderer get a placeholder that
//! names the tag. [`TextRenderer`] renders every known block type as plain
//! text so documents can be previewed from a terminal.

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use strum::IntoEnumIterator;

use crate::block::{Align, Background, Block, BlockStyle, Padding, Width};
use crate::content::{BlockContent, BlockKind, DividerStyle, PatternSpacing, SpacerHeight};
use crate::document::Document;
use crate::theme::ThemeDef;

/// Column width of a full-width block
pub const PAGE_WIDTH: usize = 64;

/// Renders one block's content
///
/// Renderers are pure: the same content, theme and flags always produce the
/// same lines.
pub trait BlockRenderer {
    fn render(
        &self,
        content: &BlockContent,
        theme: &ThemeDef,
        is_editing: bool,
        style: &BlockStyle,
    ) -> Vec<String>;
}

/// Placeholder for tags nobody registered
pub struct UnknownBlockRenderer;

impl BlockRenderer for UnknownBlockRenderer {
    fn render(
        &self,
        content: &BlockContent,
        _theme: &ThemeDef,
        _is_editing: bool,
        _style: &BlockStyle,
    ) -> Vec<String> {
        vec![format!("Unknown Block: {}", content.type_tag())]
    }
}

/// Type tag to renderer, with a fallback for everything else
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn BlockRenderer>>,
    fallback: Box<dyn BlockRenderer>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RendererRegistry {
    /// A registry where every tag renders as the unknown placeholder
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: Box::new(UnknownBlockRenderer),
        }
    }

    /// A registry with [`TextRenderer`] for every known block type
    pub fn text() -> Self {
        Self::text_on(Local::now().date_naive())
    }

    /// Like [`RendererRegistry::text`] with a fixed "today"
    pub fn text_on(today: NaiveDate) -> Self {
        let mut registry = Self::new();
        for kind in BlockKind::iter() {
            registry.register(kind.as_str(), TextRenderer::on(today));
        }
        registry
    }

    pub fn register(&mut self, tag: &str, renderer: impl BlockRenderer + 'static) {
        self.renderers.insert(tag.to_string(), Box::new(renderer));
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.renderers.contains_key(tag)
    }

    /// The renderer for a tag; never fails
    pub fn renderer_for(&self, tag: &str) -> &dyn BlockRenderer {
        self.renderers
            .get(tag)
            .map(|r| r.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    /// Render a block's content laid out according to its style
    pub fn render_block(&self, block: &Block, theme: &ThemeDef, is_editing: bool) -> String {
        let lines = self.renderer_for(block.type_tag()).render(
            &block.content,
            theme,
            is_editing,
            &block.style,
        );
        layout(&lines, &block.style).join("\n")
    }

    /// Render a whole document with its resolved theme
    ///
    /// In editing mode each block is headed by its position, type and
    /// short id.
    pub fn render_document(&self, doc: &Document, is_editing: bool) -> String {
        let theme = doc.theme();
        let mut out = Vec::new();

        out.push(center(&theme.particles.join("  "), PAGE_WIDTH));
        out.push(center(&format!("{} ({})", theme.name, theme.font), PAGE_WIDTH));
        out.push("=".repeat(PAGE_WIDTH));

        if doc.blocks.is_empty() {
            out.push(center("Your canvas is empty", PAGE_WIDTH));
        }

        for (index, block) in doc.blocks.iter().enumerate() {
            if is_editing {
                out.push(format!(
                    "-- {} {} [{}] --",
                    index + 1,
                    block.type_tag(),
                    block.id.short()
                ));
            }
            out.push(self.render_block(block, &theme, is_editing));
        }

        out.join("\n")
    }
}

/// Plain-text rendering of every known block type
pub struct TextRenderer {
    today: NaiveDate,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::on(Local::now().date_naive())
    }

    /// Countdowns and daily quotes are computed relative to `today`
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRenderer for TextRenderer {
    fn render(
        &self,
        content: &BlockContent,
        theme: &ThemeDef,
        is_editing: bool,
        style: &BlockStyle,
    ) -> Vec<String> {
        let width = inner_width(style);
        let mut lines = Vec::new();

        match content {
            BlockContent::Hero(c) => {
                lines.push(c.title.to_uppercase());
                lines.extend(wrap(&c.subtitle, width));
            }
            BlockContent::Section(c) => {
                lines.push(format!("== {} ==", c.title));
            }
            BlockContent::Note(c) => {
                lines.extend(wrap(&c.text, width));
            }
            BlockContent::Spacer(c) => {
                let gap = match c.height() {
                    SpacerHeight::Small => 1,
                    SpacerHeight::Medium | SpacerHeight::Custom => 2,
                    SpacerHeight::Large => 3,
                };
                let half = gap / 2;
                lines.extend(std::iter::repeat(String::new()).take(half));
                if c.shows_divider() {
                    lines.push(divider(
                        c.divider_style(),
                        c.custom_pattern(),
                        c.pattern_spacing(),
                        width,
                    ));
                    if is_editing {
                        let colour = c.divider_color(&theme.primary);
                        lines.push(format!("(divider colour {})", colour));
                    }
                }
                lines.extend(std::iter::repeat(String::new()).take(gap - half));
            }
            BlockContent::Timeline(c) => {
                for event in &c.events {
                    lines.push(format!("o {} | {}", event.date, event.title));
                    let desc = wrap(&event.desc, width.saturating_sub(4));
                    lines.extend(desc.into_iter().map(|l| format!("|   {}", l)));
                }
            }
            BlockContent::Wisdom(c) => {
                lines.push("Daily Wisdom".to_string());
                lines.extend(wrap(&format!("\"{}\"", c.quote_for_day(self.today.day())), width));
            }
            BlockContent::Coupon(c) => {
                let text = format!("COUPON: {}", c.text);
                let rule = "-".repeat(text.chars().count().min(width) + 4);
                lines.push(rule.clone());
                lines.push(format!("| {} |", text));
                lines.push(rule);
            }
            BlockContent::OpenWhen(c) => {
                for item in &c.items {
                    lines.push(format!("[envelope] {}", item.label));
                    if is_editing {
                        let text = wrap(&item.text, width.saturating_sub(4));
                        lines.extend(text.into_iter().map(|l| format!("    {}", l)));
                    }
                }
            }
            BlockContent::Gallery(c) => {
                if c.images.is_empty() {
                    lines.push("Gallery (no photos yet)".to_string());
                } else {
                    lines.push(format!("Gallery ({} photos)", c.images.len()));
                    if is_editing {
                        lines.extend(
                            c.images
                                .iter()
                                .map(|src| format!("  - {}", truncate(src, width - 4))),
                        );
                    }
                }
            }
            BlockContent::Music(c) => {
                lines.push(format!("Now playing: {} by {}", c.title, c.artist));
                if !c.link.is_empty() {
                    lines.push(truncate(&c.link, width));
                }
            }
            BlockContent::Video(c) => {
                if c.url.is_empty() {
                    lines.push("[video] No video linked".to_string());
                } else {
                    lines.push(format!("[video] {}", truncate(&c.url, width - 8)));
                }
            }
            BlockContent::Voice(c) => match &c.audio_url {
                Some(_) => lines.push("[voice message] press play".to_string()),
                None => lines.push("[voice message] nothing recorded".to_string()),
            },
            BlockContent::Quiz(c) => {
                lines.extend(wrap(&c.question, width));
                for (i, option) in c.options.iter().enumerate() {
                    let letter = (b'A' + (i % 26) as u8) as char;
                    let marker = if is_editing && c.is_correct(i) { " *" } else { "" };
                    lines.push(format!("  {}) {}{}", letter, option, marker));
                }
            }
            BlockContent::Poll(c) => {
                lines.extend(wrap(&c.question, width));
                lines.extend(c.options.iter().map(|option| format!("  ( ) {}", option)));
            }
            BlockContent::Game(_) => {
                lines.push("Memory game: flip the cards to find every pair".to_string());
            }
            BlockContent::Secret(c) => {
                if is_editing {
                    lines.push(format!("Secret message (code: {})", c.code));
                    lines.extend(wrap(&c.message, width));
                } else {
                    lines.push("Locked. Enter the code to reveal the secret.".to_string());
                }
                if !c.hint.is_empty() {
                    lines.push(format!("Hint: {}", c.hint));
                }
            }
            BlockContent::Countdown(c) => {
                lines.push(c.label.clone());
                match c.target_date() {
                    Some(date) => {
                        let days = c.days_left(self.today);
                        lines.push(format!("{} days to go ({})", days, date));
                    }
                    None => lines.push("0 days to go".to_string()),
                }
            }
            BlockContent::SpinWheel(c) => {
                lines.push("Spin the wheel".to_string());
                lines.push(c.options.join(" / "));
            }
            BlockContent::Drawing(c) => match c.drawing_data {
                Some(_) => lines.push("[drawing] a sketch for you".to_string()),
                None => lines.push("[drawing] empty canvas".to_string()),
            },
            BlockContent::Dice(c) => {
                let noun = if c.dice_count == 1 { "die" } else { "dice" };
                lines.push(format!("Roll {} {}", c.dice_count, noun));
            }
            BlockContent::Map(c) => {
                lines.push(format!("[map] {}", c.location));
                lines.extend(wrap(&c.caption, width));
            }
            BlockContent::Unknown { kind, .. } => {
                lines.push(format!("Unknown Block: {}", kind));
            }
        }

        lines
    }
}

fn inner_width(style: &BlockStyle) -> usize {
    let outer = match style.width {
        Width::Full => PAGE_WIDTH,
        Width::Half => PAGE_WIDTH / 2,
    };
    outer - background_marker(style.background).chars().count()
}

fn background_marker(background: Background) -> &'static str {
    match background {
        Background::Transparent => "",
        Background::White => "| ",
        Background::PrimaryTint => ": ",
        Background::Dark => "# ",
    }
}

/// Apply alignment, padding and background to rendered lines
fn layout(lines: &[String], style: &BlockStyle) -> Vec<String> {
    let width = inner_width(style);
    let marker = background_marker(style.background);
    let pad = match style.padding {
        Padding::Compact => 0,
        Padding::Normal => 1,
        Padding::Spacious => 2,
    };

    let blank = marker.trim_end().to_string();
    let mut out = Vec::with_capacity(lines.len() + pad * 2);
    out.extend(std::iter::repeat(blank.clone()).take(pad));
    for line in lines {
        let aligned = match style.align {
            Align::Left => line.clone(),
            Align::Center => center(line, width),
            Align::Right => right(line, width),
        };
        out.push(format!("{}{}", marker, aligned).trim_end().to_string());
    }
    out.extend(std::iter::repeat(blank).take(pad));
    out
}

fn divider(style: DividerStyle, pattern: &str, spacing: PatternSpacing, width: usize) -> String {
    match style {
        DividerStyle::Line => "-".repeat(width),
        DividerStyle::Dots => ". ".repeat(width / 2).trim_end().to_string(),
        DividerStyle::Pattern | DividerStyle::Custom => {
            let gap = match spacing {
                PatternSpacing::Tight => 1,
                PatternSpacing::Medium => 2,
                PatternSpacing::Wide => 4,
            };
            let unit = format!("{}{}", pattern, " ".repeat(gap));
            let count = (width / unit.chars().count().max(1)).max(1);
            unit.repeat(count).trim_end().to_string()
        }
    }
}

fn center(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), line)
}

fn right(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    format!("{}{}", " ".repeat(width - len), line)
}

/// Greedy word wrap; words longer than `width` get a line of their own
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = current.chars().count()
                + word.chars().count()
                + usize::from(!current.is_empty());
            if !current.is_empty() && needed > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

/// Truncate to `max_len` characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}
