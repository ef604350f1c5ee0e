//! Document descriptor handed to the converter.
//!
//! A descriptor is built per request and carries the page setup shared by
//! every object plus one content object per source to render.

use reqwest::Url;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Color,
    Grayscale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => f.write_str("Portrait"),
            Orientation::Landscape => f.write_str("Landscape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
        };
        f.write_str(name)
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            bottom: mm,
            left: mm,
            right: mm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalSettings {
    pub color_mode: ColorMode,
    pub orientation: Orientation,
    pub paper_size: PaperSize,
    pub margins: Margins,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Color,
            orientation: Orientation::Portrait,
            paper_size: PaperSize::A4,
            margins: Margins::uniform(10.0),
        }
    }
}

/// Per-object rendering flags. `None` leaves the converter's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebSettings {
    pub default_encoding: Option<String>,
    pub load_images: Option<bool>,
    pub enable_javascript: Option<bool>,
    pub enable_intelligent_shrinking: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Html(String),
    Url(Url),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSettings {
    pub source: ContentSource,
    pub web: WebSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDescriptor {
    pub global: GlobalSettings,
    pub objects: Vec<ObjectSettings>,
}

const UTF8: &str = "utf-8";

impl DocumentDescriptor {
    /// Inline HTML, decoded as UTF-8 by the renderer.
    pub fn from_html(global: GlobalSettings, html: impl Into<String>) -> Self {
        Self {
            global,
            objects: vec![ObjectSettings {
                source: ContentSource::Html(html.into()),
                web: WebSettings {
                    default_encoding: Some(UTF8.to_string()),
                    ..WebSettings::default()
                },
            }],
        }
    }

    /// A page the renderer navigates to itself, with images, scripts and
    /// shrink-to-fit switched on.
    pub fn from_url(global: GlobalSettings, url: Url) -> Self {
        Self {
            global,
            objects: vec![ObjectSettings {
                source: ContentSource::Url(url),
                web: WebSettings {
                    default_encoding: Some(UTF8.to_string()),
                    load_images: Some(true),
                    enable_javascript: Some(true),
                    enable_intelligent_shrinking: Some(true),
                },
            }],
        }
    }
}
