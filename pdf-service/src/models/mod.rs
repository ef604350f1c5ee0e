pub mod document;

pub use document::{
    ColorMode, ContentSource, DocumentDescriptor, GlobalSettings, Margins, ObjectSettings,
    Orientation, PaperSize, WebSettings,
};
