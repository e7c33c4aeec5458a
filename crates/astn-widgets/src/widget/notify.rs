//! Notification cards
//!
//! Cards slide in from the left or right edge inside one shared
//! `#ast-notify-container`. Each card has its own lifecycle and timers;
//! the container is created on first use and reused afterwards.

use std::collections::BTreeMap;
use std::fmt;

use astn_host::{CardId, Host, Target, Task, TimerId};
use log::{debug, warn};
use serde::{Deserialize, Deserializer};

use super::icon::Icon;
use super::lifecycle::{Lifecycle, Phase};
use super::{Callback, Press};
use crate::coerce::{lenient, DEFAULT_LENGTH_MS, PERSISTENT};
use crate::color::translucent;
use crate::dom::{
    child_with_class, clamp_opacity, closest, element_with_class, element_with_id, px, sanitize,
    set_class, FALLBACK_OPACITY,
};
use crate::error::MountError;
use crate::settings::Settings;
use crate::themes::{self, DEFAULT_THEME};

pub const CONTAINER_ID: &str = "ast-notify-container";
pub const CLOSE_CLASS: &str = "ast-notify-close";
/// Delay between a card starting its exit and its removal
pub const EXIT_DELAY_MS: u32 = 200;
/// Delay before a new card's height is measured
pub const MEASURE_DELAY_MS: u32 = 10;

const ICON_FILE: &str = "error_putih_garis.png";
const HIDDEN_OFFSET: &str = "-350px";
const SHOWN_OFFSET: &str = "10px";

/// Screen edge the cards slide in from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Edge {
    Left,
    #[default]
    Right,
}

impl Edge {
    /// `"left"` or `"right"`, any case
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Edge::Left),
            "right" => Some(Edge::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NotifyOptions {
    /// Card background for the default theme
    pub background: String,
    /// Card text color for the default theme
    pub color: String,
    pub icon: bool,
    pub icon_image: Option<String>,
    pub fa: String,
    /// Dwell time in milliseconds; `-1` persists with a close glyph,
    /// other non-positive values persist without one
    pub length: i64,
    pub alpha: f64,
    pub theme: String,
    pub position: Edge,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        let dark = themes::resolve("dark");
        Self {
            background: dark.background.to_string(),
            color: dark.foreground.to_string(),
            icon: true,
            icon_image: None,
            fa: String::new(),
            length: DEFAULT_LENGTH_MS,
            alpha: FALLBACK_OPACITY,
            theme: DEFAULT_THEME.to_string(),
            position: Edge::Right,
        }
    }
}

/// Partial card options, keyed by their JavaScript names
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotifyPatch {
    #[serde(rename = "bgcolor", deserialize_with = "lenient::text")]
    pub background: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub icon: Option<bool>,
    #[serde(rename = "imgIcon", deserialize_with = "lenient::text")]
    pub icon_image: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub fa: Option<String>,
    #[serde(deserialize_with = "lenient::length")]
    pub length: Option<i64>,
    #[serde(deserialize_with = "lenient::opacity")]
    pub alpha: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "edge")]
    pub position: Option<Edge>,
}

fn edge<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Edge>, D::Error> {
    Ok(lenient::keyword(d)?.and_then(|s| Edge::parse(&s)))
}

/// Content, configuration and callback for the next card
#[derive(Default)]
pub struct Notify {
    title: String,
    message: String,
    footer: String,
    options: NotifyOptions,
    callback: Option<Callback>,
}

impl Notify {
    pub fn options(&self) -> &NotifyOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_content(&mut self, title: &str, message: &str, footer: &str) {
        self.title = sanitize(title);
        self.message = sanitize(message);
        self.footer = sanitize(footer);
    }

    pub fn set_callback(&mut self, callback: Option<Callback>) {
        if callback.is_some() {
            self.callback = callback;
        }
    }

    pub fn configure(&mut self, theme: &str, patch: NotifyPatch) {
        let o = &mut self.options;
        o.theme = theme.to_string();

        let text = |value: Option<String>| value.map(|v| sanitize(&v));
        if let Some(v) = text(patch.background) {
            o.background = v;
        }
        if let Some(v) = text(patch.color) {
            o.color = v;
        }
        if let Some(v) = patch.icon {
            o.icon = v;
        }
        if let Some(v) = text(patch.icon_image) {
            o.icon_image = Some(v);
        }
        if let Some(v) = text(patch.fa) {
            o.fa = v;
        }
        if let Some(v) = patch.length {
            o.length = v;
        }
        if let Some(v) = patch.alpha {
            o.alpha = v;
        }
        if let Some(v) = text(patch.theme) {
            o.theme = v;
        }
        if let Some(v) = patch.position {
            o.position = v;
        }
    }

    fn persistent(&self) -> bool {
        self.options.length == PERSISTENT
    }

    fn dwell(&self) -> Option<u32> {
        let length = self.options.length;
        (length > 0).then(|| length.min(i64::from(u32::MAX)) as u32)
    }

    /// Build a detached card, returning (wrapper, panel)
    fn build<H: Host>(&self, host: &mut H, settings: &Settings) -> Result<(H::Node, H::Node), MountError> {
        let theme = themes::resolve(&self.options.theme);
        let o = &self.options;
        let (background, color) = if theme.is_default() {
            (o.background.as_str(), o.color.as_str())
        } else {
            (theme.background, theme.foreground)
        };

        let wrapper = element_with_class(host, "div", "ast-notify-wrapper")?;
        let panel = child_with_class(host, &wrapper, "div", "ast-notify-el")?;
        host.set_style(&panel, "background-color", Some(background));
        host.set_style(&panel, "color", Some(color));
        host.set_style(&panel, "z-index", Some(&settings.z_index().to_string()));

        let image = o
            .icon_image
            .clone()
            .unwrap_or_else(|| settings.icon_path(ICON_FILE));
        let icon = Icon::choose(&o.fa, o.icon, &image);
        if !icon.is_none() {
            let holder = child_with_class(host, &panel, "div", "ast-notify-icon")?;
            icon.render(host, &holder, None)?;
        }

        let text = child_with_class(host, &panel, "div", "ast-notify-text")?;
        for (class, content) in [
            ("notify-header", &self.title),
            ("notify-body", &self.message),
            ("notify-footer", &self.footer),
        ] {
            let line = child_with_class(host, &text, "p", class)?;
            host.set_inner_html(&line, content);
        }
        child_with_class(host, &panel, "div", "ast-notify-clearfloat")?;

        if self.persistent() {
            let close = child_with_class(host, &panel, "div", CLOSE_CLASS)?;
            host.set_inner_html(&close, "&times;");
        }

        Ok((wrapper, panel))
    }
}

/// One mounted card
struct Card<N> {
    life: Lifecycle<N>,
    panel: N,
    persistent: bool,
    edge: Edge,
    measure_timer: Option<TimerId>,
}

/// The shared card container and every card in it
pub struct NotifyStack<N> {
    notify: Notify,
    container: Option<N>,
    cards: BTreeMap<CardId, Card<N>>,
    next_card: CardId,
}

impl<N> Default for NotifyStack<N> {
    fn default() -> Self {
        Self {
            notify: Notify::default(),
            container: None,
            cards: BTreeMap::new(),
            next_card: 1,
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for NotifyStack<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyStack")
            .field("container", &self.container)
            .field("cards", &self.cards.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<N: Clone + PartialEq + fmt::Debug> NotifyStack<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self) -> &Notify {
        &self.notify
    }

    pub fn notify_mut(&mut self) -> &mut Notify {
        &mut self.notify
    }

    /// Cards currently in the document, exiting ones included
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Ids of cards in the document, oldest first
    pub fn card_ids(&self) -> Vec<CardId> {
        self.cards.keys().copied().collect()
    }

    pub fn card_phase(&self, id: CardId) -> Phase {
        self.cards
            .get(&id)
            .map(|card| card.life.phase())
            .unwrap_or(Phase::Absent)
    }

    /// Wrapper element of a card
    pub fn card_root(&self, id: CardId) -> Option<&N> {
        self.cards.get(&id).and_then(|card| card.life.root())
    }

    /// Visible if any card is visible, Dismissing if only exiting cards remain
    pub fn phase(&self) -> Phase {
        let phases = self.cards.values().map(|card| card.life.phase());
        phases.fold(Phase::Absent, |acc, phase| match (acc, phase) {
            (Phase::Visible, _) | (_, Phase::Visible) => Phase::Visible,
            (Phase::Dismissing, _) | (_, Phase::Dismissing) => Phase::Dismissing,
            _ => Phase::Absent,
        })
    }

    pub fn container(&self) -> Option<&N> {
        self.container.as_ref()
    }

    /// Mount a new card from the current content and options
    pub fn show<H: Host<Node = N>>(&mut self, host: &mut H, settings: &Settings) -> Option<CardId> {
        match self.mount_card(host, settings) {
            Ok(id) => {
                debug!("[notify] card {} mounted", id);
                Some(id)
            }
            Err(e) => {
                warn!("[notify] mount failed: {}", e);
                None
            }
        }
    }

    fn mount_card<H: Host<Node = N>>(&mut self, host: &mut H, settings: &Settings) -> Result<CardId, MountError> {
        let container = self.ensure_container(host)?;
        let (wrapper, panel) = self.notify.build(host, settings)?;
        host.append_child(&container, &wrapper)?;

        let id = self.next_card;
        self.next_card += 1;
        let measure_timer = host.set_timeout(MEASURE_DELAY_MS, Task::Measure(id));

        let alpha = clamp_opacity(self.notify.options.alpha);
        let base = host.style(&panel, "background-color").unwrap_or_default();
        let tinted = translucent(host, &panel, &base, alpha);
        host.set_style(&panel, "background-color", Some(&tinted));

        // Slide in from the configured edge
        let edge = self.notify.options.position;
        host.set_style(&panel, edge.as_str(), Some(HIDDEN_OFFSET));
        host.set_style(&container, "left", None);
        host.set_style(&container, "right", None);
        set_class(host, &panel, "show", true);
        host.set_style(&container, edge.as_str(), Some("0px"));
        host.flush_style(&panel);
        host.set_style(&panel, edge.as_str(), Some(SHOWN_OFFSET));

        host.listen_click(&wrapper, Target::Card(id));

        let mut life = Lifecycle::new(Target::Card(id));
        life.enter(wrapper);
        life.arm(host, self.notify.dwell());

        self.cards.insert(
            id,
            Card {
                life,
                panel,
                persistent: self.notify.persistent(),
                edge,
                measure_timer: Some(measure_timer),
            },
        );
        Ok(id)
    }

    /// The live container, creating (or adopting) it when needed
    fn ensure_container<H: Host<Node = N>>(&mut self, host: &mut H) -> Result<N, MountError> {
        let live = host.element_by_id(CONTAINER_ID);
        if let Some(existing) = &live {
            if self.container.as_ref() == Some(existing) {
                return Ok(existing.clone());
            }
        }

        if self.container.take().is_some() {
            debug!("[notify] container replaced, forgetting {} cards", self.cards.len());
            self.forget_cards(host);
        }

        let container = match live {
            Some(existing) => existing,
            None => {
                let body = host.body().ok_or(MountError::NoBody)?;
                let created = element_with_id(host, "div", CONTAINER_ID)?;
                host.append_child(&body, &created)?;
                created
            }
        };
        self.container = Some(container.clone());
        Ok(container)
    }

    fn forget_cards<H: Host<Node = N>>(&mut self, host: &mut H) {
        for (_, mut card) in std::mem::take(&mut self.cards) {
            if let Some(id) = card.measure_timer.take() {
                host.clear_timeout(id);
            }
            card.life.finish(host);
        }
    }

    /// Interpret a click routed to card `id`
    pub fn press<H: Host<Node = N>>(&self, host: &H, id: CardId, target: &N) -> Option<Press> {
        let card = self.cards.get(&id)?;
        if card.life.phase() != Phase::Visible {
            return None;
        }
        if closest(host, target, &format!(".{}", CLOSE_CLASS)).is_some() {
            return Some(Press::dismiss());
        }
        if card.persistent {
            return None;
        }
        Some(Press {
            callback: self.notify.callback.clone(),
            dismiss: true,
        })
    }

    /// Start the exit animation of card `id`
    ///
    /// `clicked` marks a dismissal by the user rather than by the timer.
    pub fn dismiss<H: Host<Node = N>>(&mut self, host: &mut H, id: CardId, clicked: bool) {
        let Some(card) = self.cards.get_mut(&id) else {
            return;
        };
        if card.life.begin_exit(host).is_none() {
            return;
        }
        let class = if clicked && card.persistent {
            "close-click"
        } else {
            "close"
        };
        set_class(host, &card.panel, class, true);
        host.set_style(&card.panel, card.edge.as_str(), Some(HIDDEN_OFFSET));
        card.life.schedule_detach(host, EXIT_DELAY_MS);
        debug!("[notify] card {} dismissing", id);
    }

    /// Dwell time of card `id` elapsed
    pub fn expire<H: Host<Node = N>>(&mut self, host: &mut H, id: CardId) {
        self.dismiss(host, id, false);
    }

    /// Exit animation of card `id` elapsed
    pub fn detach<H: Host<Node = N>>(&mut self, host: &mut H, id: CardId) {
        if self.card_phase(id) != Phase::Dismissing {
            return;
        }
        if let Some(mut card) = self.cards.remove(&id) {
            if let Some(timer) = card.measure_timer.take() {
                host.clear_timeout(timer);
            }
            card.life.finish(host);
            debug!("[notify] card {} detached", id);
        }
    }

    /// Pin the wrapper of card `id` to the rendered height of its panel
    pub fn measure<H: Host<Node = N>>(&mut self, host: &mut H, id: CardId) {
        let Some(card) = self.cards.get_mut(&id) else {
            return;
        };
        card.measure_timer = None;
        let Some(wrapper) = card.life.root() else {
            return;
        };
        let height = host
            .computed_style(&card.panel, "height")
            .unwrap_or_else(|| px(host.client_height(&card.panel)));
        host.set_style(wrapper, "height", Some(&height));
    }
}
