#![forbid(unsafe_code)]

//! Banner configuration.
//!
//! A [`CookieConfig`] is assembled by the host with builder methods and moved
//! into the controller, which treats it as immutable from then on.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use cookiebar_widgets::config::{CookieConfig, Edge};
//!
//! let config = CookieConfig::new()
//!     .title("Saved")
//!     .message("Your draft is safe")
//!     .edge(Edge::Top)
//!     .duration(Duration::from_secs(3))
//!     .action("Undo", || println!("undo"));
//! assert!(config.has_action());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use cookiebar_core::animation::{
    SLIDE_IN_FROM_BOTTOM, SLIDE_IN_FROM_TOP, SLIDE_OUT_TO_BOTTOM, SLIDE_OUT_TO_TOP,
};
use cookiebar_core::color::Rgba;

use crate::views::Elements;

/// Callback run when the action button is tapped.
pub type ActionCallback = Box<dyn FnMut()>;

/// Default display duration before auto-dismiss.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

/// Default banner background when neither the theme nor the config overrides it.
pub const DEFAULT_BACKGROUND: Rgba = Rgba::rgb(0x32, 0x32, 0x32);

/// Screen edge a banner is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Edge {
    /// Anchored to the top; exits upward.
    Top,
    /// Anchored to the bottom; exits downward.
    #[default]
    Bottom,
}

impl Edge {
    /// Name of the enter transition resource.
    pub const fn slide_in(self) -> &'static str {
        match self {
            Self::Top => SLIDE_IN_FROM_TOP,
            Self::Bottom => SLIDE_IN_FROM_BOTTOM,
        }
    }

    /// Name of the exit transition resource.
    pub const fn slide_out(self) -> &'static str {
        match self {
            Self::Top => SLIDE_OUT_TO_TOP,
            Self::Bottom => SLIDE_OUT_TO_BOTTOM,
        }
    }
}

/// Host-side identifier of a drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// A host-inflated content template.
///
/// The template only has to declare which of the required elements it
/// provides; the controller checks the declaration when it builds its views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomView {
    /// Template name, for diagnostics.
    pub name: String,
    /// Elements the template provides.
    pub elements: Elements,
}

impl CustomView {
    /// Declare a template.
    pub fn new(name: impl Into<String>, elements: Elements) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }
}

/// Default colors and spacing, as resolved from the host theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub title_color: Rgba,
    pub message_color: Rgba,
    pub action_color: Rgba,
    pub background: Rgba,
    /// Padding applied around bottom-anchored content, in dp.
    pub padding_dp: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title_color: Rgba::WHITE,
            message_color: Rgba::WHITE,
            action_color: Rgba::WHITE,
            background: DEFAULT_BACKGROUND,
            padding_dp: 16.0,
        }
    }
}

/// Device pixels per density-independent pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub density: f32,
}

impl DisplayMetrics {
    /// Metrics for the given density.
    pub const fn new(density: f32) -> Self {
        Self { density }
    }

    /// Whether the density is usable for layout math.
    pub fn is_valid(&self) -> bool {
        self.density.is_finite() && self.density > 0.0
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Everything a host decides about one banner.
pub struct CookieConfig {
    /// Time the banner stays up after its enter transition.
    pub duration: Duration,
    /// Anchored edge.
    pub edge: Edge,
    /// Custom content template, or `None` for the built-in one.
    pub custom_view: Option<CustomView>,
    pub icon: Option<ResourceId>,
    /// Transition resource played on the icon once the banner is shown.
    pub icon_animator: Option<Cow<'static, str>>,
    pub title: Option<String>,
    pub title_color: Option<Rgba>,
    pub message: Option<String>,
    pub message_color: Option<Rgba>,
    pub action: Option<String>,
    pub action_color: Option<Rgba>,
    pub on_action: Option<ActionCallback>,
    pub background: Option<Rgba>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            edge: Edge::default(),
            custom_view: None,
            icon: None,
            icon_animator: None,
            title: None,
            title_color: None,
            message: None,
            message_color: None,
            action: None,
            action_color: None,
            on_action: None,
            background: None,
        }
    }
}

impl fmt::Debug for CookieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieConfig")
            .field("duration", &self.duration)
            .field("edge", &self.edge)
            .field("custom_view", &self.custom_view)
            .field("icon", &self.icon)
            .field("icon_animator", &self.icon_animator)
            .field("title", &self.title)
            .field("message", &self.message)
            .field("action", &self.action)
            .field("on_action", &self.on_action.is_some())
            .finish_non_exhaustive()
    }
}

impl CookieConfig {
    /// A configuration with default duration and edge and no content.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    /// Set the display duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the anchored edge.
    pub fn edge(mut self, edge: Edge) -> Self {
        self.edge = edge;
        self
    }

    /// Use a custom content template.
    pub fn custom_view(mut self, view: CustomView) -> Self {
        self.custom_view = Some(view);
        self
    }

    /// Show an icon.
    pub fn icon(mut self, icon: ResourceId) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Animate the icon with a named transition resource.
    pub fn icon_animator(mut self, resource: impl Into<Cow<'static, str>>) -> Self {
        self.icon_animator = Some(resource.into());
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Override the title color.
    pub fn title_color(mut self, color: Rgba) -> Self {
        self.title_color = Some(color);
        self
    }

    /// Set the message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the message color.
    pub fn message_color(mut self, color: Rgba) -> Self {
        self.message_color = Some(color);
        self
    }

    /// Add an action button with its tap callback.
    pub fn action(mut self, text: impl Into<String>, on_action: impl FnMut() + 'static) -> Self {
        self.action = Some(text.into());
        self.on_action = Some(Box::new(on_action));
        self
    }

    /// Override the action text color.
    pub fn action_color(mut self, color: Rgba) -> Self {
        self.action_color = Some(color);
        self
    }

    /// Override the background color.
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    // --- Queries ---

    /// Whether the action button will be shown: it needs both text and a
    /// callback.
    pub fn has_action(&self) -> bool {
        self.action.as_deref().is_some_and(|text| !text.is_empty()) && self.on_action.is_some()
    }
}
