//! Ready-made facet implementations.
//!
//! These cover the common cases of a read-mostly text field, a bounded
//! numeric value and a fixed list of actions, so simple providers do not
//! have to implement the facet traits themselves.

use parking_lot::{Mutex, RwLock};
use unicode_segmentation::UnicodeSegmentation;

use crate::geometry::{Point, Rect, Size};
use crate::logging::targets;
use crate::node::{ActionFacet, TextBoundary, TextFacet, TextSegment, ValueFacet};
use crate::variant::Variant;

/// Plain, monospaced text laid out from a screen origin.
///
/// Lines are separated by `'\n'`. Every character occupies one `cell` so
/// character rectangles and hit testing are exact.
pub struct PlainText {
    content: RwLock<String>,
    origin: Point,
    cell: Size,
    attributes: String,
    cursor: Mutex<i32>,
    selections: Mutex<Vec<(i32, i32)>>,
    scrolled_to: Mutex<Option<(i32, i32)>>,
}

impl PlainText {
    /// Create a text facet whose first character is drawn at `origin`.
    pub fn new(content: impl Into<String>, origin: Point, cell: Size) -> Self {
        Self {
            content: RwLock::new(content.into()),
            origin,
            cell,
            attributes: String::new(),
            cursor: Mutex::new(0),
            selections: Mutex::new(Vec::new()),
            scrolled_to: Mutex::new(None),
        }
    }

    /// Set the attribute string reported for the whole text.
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Replace the text content.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.write() = content.into();
    }

    /// The range last passed to [`TextFacet::scroll_to_substring`].
    pub fn scrolled_to(&self) -> Option<(i32, i32)> {
        *self.scrolled_to.lock()
    }

    fn segments(&self, boundary: TextBoundary) -> Vec<(i32, i32)> {
        let content = self.content.read();
        let text = content.as_str();
        let char_offset = |byte: usize| text[..byte].chars().count() as i32;
        let len = text.chars().count() as i32;

        match boundary {
            TextBoundary::Char => (0..len).map(|i| (i, i + 1)).collect(),
            TextBoundary::All => {
                if len == 0 {
                    Vec::new()
                } else {
                    vec![(0, len)]
                }
            }
            TextBoundary::Word => {
                // A word owns the whitespace that follows it.
                let mut segments: Vec<(i32, i32)> = Vec::new();
                for (byte, piece) in text.split_word_bound_indices() {
                    let start = char_offset(byte);
                    let end = start + piece.chars().count() as i32;
                    match segments.last_mut() {
                        Some(last) if piece.chars().all(char::is_whitespace) => last.1 = end,
                        _ => segments.push((start, end)),
                    }
                }
                segments
            }
            TextBoundary::Sentence => text
                .split_sentence_bound_indices()
                .map(|(byte, piece)| {
                    let start = char_offset(byte);
                    (start, start + piece.chars().count() as i32)
                })
                .collect(),
            TextBoundary::Line | TextBoundary::Paragraph => {
                let mut segments = Vec::new();
                let mut start = 0;
                for (i, c) in text.chars().enumerate() {
                    if c == '\n' {
                        segments.push((start, i as i32 + 1));
                        start = i as i32 + 1;
                    }
                }
                if start < len {
                    segments.push((start, len));
                }
                segments
            }
        }
    }

    fn segment(&self, range: Option<(i32, i32)>) -> TextSegment {
        match range {
            Some((start, end)) => TextSegment {
                text: self.text(start, end),
                start,
                end,
            },
            None => TextSegment::default(),
        }
    }

    fn containing(segments: &[(i32, i32)], offset: i32) -> Option<usize> {
        segments.iter().position(|&(start, end)| start <= offset && offset < end)
    }

    /// Line and column of a character offset.
    fn position_of(&self, offset: i32) -> (i32, i32) {
        let content = self.content.read();
        let mut line = 0;
        let mut column = 0;
        for c in content.chars().take(offset.max(0) as usize) {
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

impl TextFacet for PlainText {
    fn character_count(&self) -> usize {
        self.content.read().chars().count()
    }

    fn text(&self, start: i32, end: i32) -> String {
        if start < 0 || end < start {
            return String::new();
        }
        self.content
            .read()
            .chars()
            .skip(start as usize)
            .take((end - start) as usize)
            .collect()
    }

    fn text_before_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment {
        let segments = self.segments(boundary);
        let before = match Self::containing(&segments, offset) {
            Some(index) => index.checked_sub(1).map(|i| segments[i]),
            None => segments.iter().rev().find(|&&(_, end)| end <= offset).copied(),
        };
        self.segment(before)
    }

    fn text_after_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment {
        let segments = self.segments(boundary);
        let after = match Self::containing(&segments, offset) {
            Some(index) => segments.get(index + 1).copied(),
            None => segments.iter().find(|&&(start, _)| start > offset).copied(),
        };
        self.segment(after)
    }

    fn text_at_offset(&self, offset: i32, boundary: TextBoundary) -> TextSegment {
        let segments = self.segments(boundary);
        let at = Self::containing(&segments, offset).map(|i| segments[i]);
        self.segment(at)
    }

    fn cursor_position(&self) -> i32 {
        *self.cursor.lock()
    }

    fn set_cursor_position(&self, position: i32) {
        let len = self.character_count() as i32;
        *self.cursor.lock() = position.clamp(0, len);
    }

    fn selection_count(&self) -> usize {
        self.selections.lock().len()
    }

    fn selection(&self, index: i32) -> (i32, i32) {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.selections.lock().get(i).copied())
            .unwrap_or((0, 0))
    }

    fn add_selection(&self, start: i32, end: i32) {
        self.selections.lock().push((start.min(end), start.max(end)));
    }

    fn remove_selection(&self, index: i32) {
        let mut selections = self.selections.lock();
        if let Ok(i) = usize::try_from(index)
            && i < selections.len()
        {
            selections.remove(i);
        }
    }

    fn set_selection(&self, index: i32, start: i32, end: i32) {
        let mut selections = self.selections.lock();
        if let Ok(i) = usize::try_from(index)
            && let Some(selection) = selections.get_mut(i)
        {
            *selection = (start.min(end), start.max(end));
        }
    }

    fn character_rect(&self, offset: i32) -> Rect {
        if offset < 0 || offset >= self.character_count() as i32 {
            return Rect::default();
        }
        let (line, column) = self.position_of(offset);
        Rect::new(
            self.origin.x + column * self.cell.width,
            self.origin.y + line * self.cell.height,
            self.cell.width,
            self.cell.height,
        )
    }

    fn offset_at_point(&self, point: Point) -> i32 {
        if self.cell.width <= 0 || self.cell.height <= 0 {
            return -1;
        }
        let local = point - self.origin;
        if local.x < 0 || local.y < 0 {
            return -1;
        }
        let (line, column) = (local.y / self.cell.height, local.x / self.cell.width);

        let content = self.content.read();
        let mut line_start = 0;
        for (index, text_line) in content.split('\n').enumerate() {
            let line_len = text_line.chars().count() as i32;
            if index as i32 == line {
                return if column < line_len { line_start + column } else { -1 };
            }
            line_start += line_len + 1;
        }
        -1
    }

    fn attributes(&self, _offset: i32) -> TextSegment {
        TextSegment {
            text: self.attributes.clone(),
            start: 0,
            end: self.character_count() as i32,
        }
    }

    fn scroll_to_substring(&self, start: i32, end: i32) {
        *self.scrolled_to.lock() = Some((start, end));
    }
}

/// A numeric value clamped to `[minimum, maximum]`.
pub struct RangeValue {
    current: Mutex<f64>,
    minimum: f64,
    maximum: f64,
}

impl RangeValue {
    /// Create a range value; `current` is clamped into range.
    pub fn new(current: f64, minimum: f64, maximum: f64) -> Self {
        Self {
            current: Mutex::new(current.clamp(minimum, maximum)),
            minimum,
            maximum,
        }
    }
}

impl ValueFacet for RangeValue {
    fn current_value(&self) -> Variant {
        Variant::Double(*self.current.lock())
    }

    fn set_current_value(&self, value: Variant) {
        if let Some(v) = value.to_f64() {
            *self.current.lock() = v.clamp(self.minimum, self.maximum);
        }
    }

    fn maximum_value(&self) -> Variant {
        Variant::Double(self.maximum)
    }

    fn minimum_value(&self) -> Variant {
        Variant::Double(self.minimum)
    }
}

/// One entry of an [`ActionList`].
#[derive(Debug, Clone, Default)]
pub struct ActionSpec {
    /// Action name, e.g. `"press"`.
    pub name: String,
    /// Localized name; falls back to `name` when empty.
    pub localized_name: String,
    /// Localized description.
    pub description: String,
    /// Key bindings that trigger the action.
    pub key_bindings: Vec<String>,
}

impl ActionSpec {
    /// An action with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the localized name.
    pub fn localized_name(mut self, name: impl Into<String>) -> Self {
        self.localized_name = name.into();
        self
    }

    /// Add a key binding.
    pub fn key_binding(mut self, binding: impl Into<String>) -> Self {
        self.key_bindings.push(binding.into());
        self
    }
}

/// A fixed list of actions that records every invocation.
pub struct ActionList {
    actions: Vec<ActionSpec>,
    performed: Mutex<Vec<String>>,
}

impl ActionList {
    /// Create an action list.
    pub fn new(actions: Vec<ActionSpec>) -> Self {
        Self {
            actions,
            performed: Mutex::new(Vec::new()),
        }
    }

    /// Names of the actions performed so far, oldest first.
    pub fn performed(&self) -> Vec<String> {
        self.performed.lock().clone()
    }

    fn find(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.name == name)
    }
}

impl ActionFacet for ActionList {
    fn action_names(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.name.clone()).collect()
    }

    fn do_action(&self, name: &str) {
        if self.find(name).is_some() {
            tracing::trace!(target: targets::FACETS, action = name, "performed action");
            self.performed.lock().push(name.to_string());
        }
    }

    fn localized_action_name(&self, name: &str) -> String {
        match self.find(name) {
            Some(action) if !action.localized_name.is_empty() => action.localized_name.clone(),
            _ => name.to_string(),
        }
    }

    fn localized_action_description(&self, name: &str) -> String {
        self.find(name).map(|a| a.description.clone()).unwrap_or_default()
    }

    fn key_bindings_for_action(&self, name: &str) -> Vec<String> {
        self.find(name).map(|a| a.key_bindings.clone()).unwrap_or_default()
    }
}
