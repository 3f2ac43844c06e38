//! InDesign operations.
//!
//! Each function maps typed arguments onto the payload the InDesign proxy
//! plugin expects and dispatches it. Page and frame indices are 0-based and
//! frame indices are page-specific. Bounds are `[top, left, bottom, right]`
//! in points from the page origin.

use serde_json::{Value, json};

use adobe_mcp_core::Outcome;

use crate::dispatch::{Dispatcher, params};

/// Default bounds for a single text frame.
pub const DEFAULT_FRAME_BOUNDS: [f64; 4] = [72.0, 72.0, 500.0, 400.0];

/// Default bounds for threaded frames on a letter page with 54pt margins.
pub const DEFAULT_THREADED_BOUNDS: [f64; 4] = [54.0, 54.0, 594.0, 378.0];

/// Default PDF export preset.
pub const DEFAULT_PDF_PRESET: &str = "[High Quality Print]";

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 36.0,
            bottom: 36.0,
            left: 36.0,
            right: 36.0,
        }
    }
}

impl Margins {
    fn to_json(self) -> Value {
        json!({
            "top": self.top,
            "bottom": self.bottom,
            "left": self.left,
            "right": self.right,
        })
    }
}

/// Column layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Columns {
    pub count: u32,
    pub gutter: f64,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            count: 1,
            gutter: 12.0,
        }
    }
}

impl Columns {
    fn to_json(self) -> Value {
        json!({"count": self.count, "gutter": self.gutter})
    }
}

/// Options for [`create_document`].
///
/// `facing_pages` defaults to off: with facing pages InDesign auto-creates
/// primary text frames that can collide with frames created by commands on
/// even pages.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub width: f64,
    pub height: f64,
    pub pages: u32,
    pub facing_pages: bool,
    pub columns: Columns,
    pub margins: Margins,
}

impl NewDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: 0,
            facing_pages: false,
            columns: Columns::default(),
            margins: Margins::default(),
        }
    }

    #[must_use]
    pub const fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }
}

/// What to do with unsaved changes when closing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveOptions {
    #[default]
    Yes,
    No,
    Ask,
}

impl SaveOptions {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Ask => "ask",
        }
    }
}

/// Where [`add_page`] inserts the new page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageLocation {
    AtBeginning,
    #[default]
    AtEnd,
    After,
    Before,
}

impl PageLocation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AtBeginning => "AT_BEGINNING",
            Self::AtEnd => "AT_END",
            Self::After => "AFTER",
            Self::Before => "BEFORE",
        }
    }
}

/// How [`place_image`] fits the image into its frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FitOption {
    #[default]
    Proportionally,
    FillProportionally,
    FitContentToFrame,
    FitFrameToContent,
}

impl FitOption {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proportionally => "PROPORTIONALLY",
            Self::FillProportionally => "FILL_PROPORTIONALLY",
            Self::FitContentToFrame => "FIT_CONTENT_TO_FRAME",
            Self::FitFrameToContent => "FIT_FRAME_TO_CONTENT",
        }
    }
}

// Document operations

/// Create a new document.
pub async fn create_document(dispatcher: &Dispatcher, document: &NewDocument) -> Outcome {
    dispatcher
        .dispatch(
            "createDocument",
            params([
                ("intent", json!("WEB_INTENT")),
                ("pageWidth", json!(document.width)),
                ("pageHeight", json!(document.height)),
                ("margins", document.margins.to_json()),
                ("columns", document.columns.to_json()),
                ("pagesPerDocument", json!(document.pages)),
                ("facingPages", json!(document.facing_pages)),
            ]),
        )
        .await
}

/// Open an `.indd` document or `.indt` template.
pub async fn open_document(dispatcher: &Dispatcher, file_path: &str) -> Outcome {
    dispatcher
        .dispatch("openDocument", params([("filePath", json!(file_path))]))
        .await
}

/// Save the active document.
pub async fn save_document(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("saveDocument", params([])).await
}

/// Save the active document to `file_path`.
pub async fn save_document_as(dispatcher: &Dispatcher, file_path: &str) -> Outcome {
    dispatcher
        .dispatch("saveDocumentAs", params([("filePath", json!(file_path))]))
        .await
}

/// Close the active document.
pub async fn close_document(dispatcher: &Dispatcher, save: SaveOptions) -> Outcome {
    dispatcher
        .dispatch("closeDocument", params([("saveOptions", json!(save.as_str()))]))
        .await
}

/// Page count, dimensions, margins, file path and save state of the active
/// document.
pub async fn get_document_info(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("getDocumentInfo", params([])).await
}

// Text frames

pub async fn get_text_frames(dispatcher: &Dispatcher, page_index: u32) -> Outcome {
    dispatcher
        .dispatch("getTextFrames", params([("pageIndex", json!(page_index))]))
        .await
}

pub async fn get_text_frame_info(
    dispatcher: &Dispatcher,
    frame_index: u32,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "getTextFrameInfo",
            params([
                ("frameIndex", json!(frame_index)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

pub async fn create_text_frame(
    dispatcher: &Dispatcher,
    page_index: u32,
    geometric_bounds: [f64; 4],
) -> Outcome {
    dispatcher
        .dispatch(
            "createTextFrame",
            params([
                ("pageIndex", json!(page_index)),
                ("geometricBounds", json!(geometric_bounds)),
            ]),
        )
        .await
}

pub async fn insert_text(
    dispatcher: &Dispatcher,
    frame_index: u32,
    text: &str,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "insertText",
            params([
                ("frameIndex", json!(frame_index)),
                ("text", json!(text)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

/// Import a `.txt`, `.docx` or `.rtf` file into a frame.
///
/// `insertion_point` of `None` appends at the end of the story.
pub async fn import_text_file(
    dispatcher: &Dispatcher,
    frame_index: u32,
    file_path: &str,
    page_index: u32,
    insertion_point: Option<u32>,
) -> Outcome {
    let insertion_point = insertion_point.map_or(-1, i64::from);
    dispatcher
        .dispatch(
            "importTextFile",
            params([
                ("frameIndex", json!(frame_index)),
                ("filePath", json!(file_path)),
                ("pageIndex", json!(page_index)),
                ("insertionPoint", json!(insertion_point)),
            ]),
        )
        .await
}

/// Remove empty and duplicate frames left behind by primary text frames.
pub async fn remove_duplicate_frames(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("removeDuplicateFrames", params([])).await
}

/// Create one frame per page in `start_page..=end_page` and thread them in a
/// single operation.
pub async fn create_threaded_frames(
    dispatcher: &Dispatcher,
    start_page: u32,
    end_page: u32,
    geometric_bounds: [f64; 4],
) -> Outcome {
    dispatcher
        .dispatch(
            "createThreadedFrames",
            params([
                ("startPage", json!(start_page)),
                ("endPage", json!(end_page)),
                ("geometricBounds", json!(geometric_bounds)),
            ]),
        )
        .await
}

/// Thread `source` into `target`; each is `(page_index, frame_index)`.
pub async fn link_text_frames(
    dispatcher: &Dispatcher,
    source: (u32, u32),
    target: (u32, u32),
) -> Outcome {
    dispatcher
        .dispatch(
            "linkTextFrames",
            params([
                ("sourceFrameIndex", json!(source.1)),
                ("targetFrameIndex", json!(target.1)),
                ("sourcePageIndex", json!(source.0)),
                ("targetPageIndex", json!(target.0)),
            ]),
        )
        .await
}

pub async fn get_text_content(
    dispatcher: &Dispatcher,
    frame_index: u32,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "getTextContent",
            params([
                ("frameIndex", json!(frame_index)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

pub async fn detect_text_overflow(
    dispatcher: &Dispatcher,
    frame_index: u32,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "detectTextOverflow",
            params([
                ("frameIndex", json!(frame_index)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

// Styles

pub async fn get_paragraph_styles(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("getParagraphStyles", params([])).await
}

pub async fn get_character_styles(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("getCharacterStyles", params([])).await
}

/// Apply a paragraph style. `paragraph_range` is `all`, `first`, `last`, an
/// index such as `0`, or a range such as `0-5`.
pub async fn apply_paragraph_style(
    dispatcher: &Dispatcher,
    style_name: &str,
    frame_index: u32,
    paragraph_range: &str,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "applyParagraphStyle",
            params([
                ("styleName", json!(style_name)),
                ("frameIndex", json!(frame_index)),
                ("paragraphRange", json!(paragraph_range)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

/// Apply a character style to occurrences of `search_text`.
///
/// `occurrence` 0 styles every match; n styles only the nth.
pub async fn apply_character_style_to_text(
    dispatcher: &Dispatcher,
    style_name: &str,
    search_text: &str,
    frame_index: u32,
    occurrence: u32,
    page_index: u32,
) -> Outcome {
    dispatcher
        .dispatch(
            "applyCharacterStyleToText",
            params([
                ("styleName", json!(style_name)),
                ("searchText", json!(search_text)),
                ("frameIndex", json!(frame_index)),
                ("occurrence", json!(occurrence)),
                ("pageIndex", json!(page_index)),
            ]),
        )
        .await
}

/// Create a paragraph style from free-form properties (font, size, leading,
/// color...).
pub async fn create_paragraph_style(
    dispatcher: &Dispatcher,
    style_name: &str,
    properties: Value,
) -> Outcome {
    dispatcher
        .dispatch(
            "createParagraphStyle",
            params([
                ("styleName", json!(style_name)),
                ("properties", properties),
            ]),
        )
        .await
}

// Pages

/// Add a page. `reference_page` is required by the proxy for `After` and
/// `Before`.
pub async fn add_page(
    dispatcher: &Dispatcher,
    location: PageLocation,
    reference_page: Option<u32>,
) -> Outcome {
    dispatcher
        .dispatch(
            "addPage",
            params([
                ("location", json!(location.as_str())),
                ("referencePage", json!(reference_page)),
            ]),
        )
        .await
}

// Images

/// Place an image. `position` is `[x, y]` in points; `None` leaves placement
/// to InDesign.
pub async fn place_image(
    dispatcher: &Dispatcher,
    file_path: &str,
    page_index: u32,
    position: Option<[f64; 2]>,
    fit: FitOption,
) -> Outcome {
    dispatcher
        .dispatch(
            "placeImage",
            params([
                ("filePath", json!(file_path)),
                ("pageIndex", json!(page_index)),
                ("position", json!(position)),
                ("fitOption", json!(fit.as_str())),
            ]),
        )
        .await
}

// PDF export

pub async fn get_pdf_export_presets(dispatcher: &Dispatcher) -> Outcome {
    dispatcher.dispatch("getPdfExportPresets", params([])).await
}

/// Export to PDF. `page_range` is `ALL`, `1-5`, `1,3,5`, etc.
pub async fn export_pdf(
    dispatcher: &Dispatcher,
    file_path: &str,
    page_range: &str,
    preset_name: &str,
) -> Outcome {
    dispatcher
        .dispatch(
            "exportPdf",
            params([
                ("filePath", json!(file_path)),
                ("pageRange", json!(page_range)),
                ("presetName", json!(preset_name)),
            ]),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(SaveOptions::default().as_str(), "yes");
        assert_eq!(SaveOptions::Ask.as_str(), "ask");
        assert_eq!(PageLocation::default().as_str(), "AT_END");
        assert_eq!(PageLocation::AtBeginning.as_str(), "AT_BEGINNING");
        assert_eq!(FitOption::default().as_str(), "PROPORTIONALLY");
        assert_eq!(FitOption::FitFrameToContent.as_str(), "FIT_FRAME_TO_CONTENT");
    }

    #[test]
    fn test_layout_defaults() {
        assert_eq!(
            Margins::default().to_json(),
            json!({"top": 36.0, "bottom": 36.0, "left": 36.0, "right": 36.0})
        );
        assert_eq!(
            Columns::default().to_json(),
            json!({"count": 1, "gutter": 12.0})
        );

        let document = NewDocument::new(612.0, 792.0).with_pages(3);
        assert_eq!(document.pages, 3);
        assert!(!document.facing_pages);
    }
}
