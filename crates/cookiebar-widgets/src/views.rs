#![forbid(unsafe_code)]

//! The banner's child views.
//!
//! A banner is built from five named elements: the `container` that receives
//! pointer input and carries the background, and the `title`, `message`,
//! `icon` and `action` children inside it. [`CookieViews::build`] turns a
//! [`CookieConfig`] into typed view values, applying visibility rules, theme
//! defaults and spacing. Rendering them is the host's business.
//!
//! # Invariants
//!
//! 1. Every element starts hidden; an element becomes visible only when the
//!    configuration gives it content.
//! 2. The action button is visible only with non-empty text *and* a callback.
//! 3. The message gets a top margin of `round(8dp)` only when a title is shown.
//! 4. Bottom-anchored banners pad their container by the theme padding.

use bitflags::bitflags;
use cookiebar_core::color::Rgba;
use cookiebar_core::geometry::{Sides, dp_round};

use crate::config::{CookieConfig, DisplayMetrics, Edge, ResourceId, Theme};
use crate::error::CookieError;

/// Gap between title and message, in dp.
pub const TITLE_MESSAGE_GAP_DP: f32 = 8.0;

bitflags! {
    /// Set of elements a content template provides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Elements: u8 {
        const CONTAINER = 1 << 0;
        const TITLE = 1 << 1;
        const MESSAGE = 1 << 2;
        const ICON = 1 << 3;
        const ACTION = 1 << 4;
        /// Everything a banner needs.
        const REQUIRED = Self::CONTAINER.bits()
            | Self::TITLE.bits()
            | Self::MESSAGE.bits()
            | Self::ICON.bits()
            | Self::ACTION.bits();
    }
}

/// One of the five required elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Container,
    Title,
    Message,
    Icon,
    Action,
}

impl ElementKind {
    /// All kinds, in validation order.
    pub const ALL: [ElementKind; 5] = [
        Self::Container,
        Self::Title,
        Self::Message,
        Self::Icon,
        Self::Action,
    ];

    /// Element name as used in templates.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Title => "title",
            Self::Message => "message",
            Self::Icon => "icon",
            Self::Action => "action",
        }
    }

    /// The flag for this element.
    pub const fn flag(self) -> Elements {
        match self {
            Self::Container => Elements::CONTAINER,
            Self::Title => Elements::TITLE,
            Self::Message => Elements::MESSAGE,
            Self::Icon => Elements::ICON,
            Self::Action => Elements::ACTION,
        }
    }
}

impl Elements {
    /// First required element this set lacks, in validation order.
    pub fn first_missing(self) -> Option<ElementKind> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| !self.contains(kind.flag()))
    }
}

/// A text element (title or message).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextView {
    pub visible: bool,
    pub text: String,
    pub color: Rgba,
    pub margin: Sides,
}

/// The icon element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconView {
    pub visible: bool,
    pub resource: Option<ResourceId>,
}

/// The action button.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionButton {
    pub visible: bool,
    pub text: String,
    pub color: Rgba,
}

/// The outer element holding the others.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContainerView {
    pub background: Rgba,
    pub padding: Sides,
}

/// The built view tree of one banner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CookieViews {
    pub container: ContainerView,
    pub title: TextView,
    pub message: TextView,
    pub icon: IconView,
    pub action: ActionButton,
}

impl CookieViews {
    /// Build views for `config`.
    ///
    /// Fails if a custom template lacks any required element. Building is
    /// pure: the same inputs always give the same views.
    pub fn build(
        config: &CookieConfig,
        theme: &Theme,
        metrics: DisplayMetrics,
    ) -> Result<Self, CookieError> {
        if !metrics.is_valid() {
            return Err(CookieError::InvalidDensity(metrics.density));
        }
        if let Some(custom) = &config.custom_view
            && let Some(missing) = custom.elements.first_missing()
        {
            return Err(CookieError::MissingElement(missing));
        }

        let mut views = CookieViews {
            container: ContainerView {
                background: config.background.unwrap_or(theme.background),
                padding: Sides::ZERO,
            },
            title: TextView {
                color: theme.title_color,
                ..TextView::default()
            },
            message: TextView {
                color: theme.message_color,
                ..TextView::default()
            },
            icon: IconView::default(),
            action: ActionButton {
                color: theme.action_color,
                ..ActionButton::default()
            },
        };

        if let Some(icon) = config.icon {
            views.icon.visible = true;
            views.icon.resource = Some(icon);
        }

        let mut gap = 0.0;
        if let Some(title) = config.title.as_deref().filter(|t| !t.is_empty()) {
            gap = dp_round(TITLE_MESSAGE_GAP_DP, metrics.density) as f32;
            views.title.visible = true;
            views.title.text = title.to_owned();
            if let Some(color) = config.title_color {
                views.title.color = color;
            }
        }

        if let Some(message) = config.message.as_deref().filter(|m| !m.is_empty()) {
            views.message.visible = true;
            views.message.text = message.to_owned();
            views.message.margin = Sides::top(gap);
            if let Some(color) = config.message_color {
                views.message.color = color;
            }
        }

        if config.has_action()
            && let Some(text) = &config.action
        {
            views.action.visible = true;
            views.action.text = text.clone();
            if let Some(color) = config.action_color {
                views.action.color = color;
            }
        }

        if config.edge == Edge::Bottom {
            let padding = dp_round(theme.padding_dp, metrics.density) as f32;
            views.container.padding = Sides::all(padding);
        }

        Ok(views)
    }
}
