//! Numeric input fields: identities, parsing and the default-value UX

/// One of the five numeric fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    TranslateX,
    TranslateY,
    Rotate,
    PivotX,
    PivotY,
}

impl FieldId {
    /// Fields in display order
    pub const ALL: [FieldId; 5] = [
        FieldId::TranslateX,
        FieldId::TranslateY,
        FieldId::Rotate,
        FieldId::PivotX,
        FieldId::PivotY,
    ];

    pub fn index(self) -> usize {
        match self {
            FieldId::TranslateX => 0,
            FieldId::TranslateY => 1,
            FieldId::Rotate => 2,
            FieldId::PivotX => 3,
            FieldId::PivotY => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::TranslateX => "Translate X",
            FieldId::TranslateY => "Translate Y",
            FieldId::Rotate => "Rotate (deg)",
            FieldId::PivotX => "Pivot X",
            FieldId::PivotY => "Pivot Y",
        }
    }

    /// Next field, wrapping around
    pub fn next(self) -> FieldId {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping around
    pub fn prev(self) -> FieldId {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Notifications a field emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Focus,
    Blur,
    Input,
}

/// Read/write access to the text of the five fields
pub trait InputFields {
    fn text(&self, field: FieldId) -> &str;
    fn set_text(&mut self, field: FieldId, text: String);
}

/// Parses the leading integer of `text`, falling back to 0.
///
/// Surrounding whitespace and an optional sign are accepted; anything after
/// the digits is ignored, so `"12px"` reads as 12 and `"3.9"` as 3.
pub fn parse_field(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return 0.0;
    }
    // A pure digit string always parses as f64, even past the i64 range
    let magnitude: f64 = rest[..digits_len].parse().unwrap_or(0.0);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Clears a field showing exactly `"0"` so the user can type over it.
/// Returns whether the text changed.
pub fn clear_default<I: InputFields + ?Sized>(inputs: &mut I, field: FieldId) -> bool {
    if inputs.text(field) == "0" {
        inputs.set_text(field, String::new());
        true
    } else {
        false
    }
}

/// Puts `"0"` back into a field left empty or whitespace-only.
/// Returns whether the text changed.
pub fn restore_default<I: InputFields + ?Sized>(inputs: &mut I, field: FieldId) -> bool {
    if inputs.text(field).trim().is_empty() {
        inputs.set_text(field, "0".to_string());
        true
    } else {
        false
    }
}

/// The five field buffers plus keyboard focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    texts: [String; 5],
    focused: Option<FieldId>,
}

impl Default for Form {
    fn default() -> Self {
        Self::with_values(std::array::from_fn(|_| "0".to_string()))
    }
}

impl Form {
    /// Creates a form with initial texts in `FieldId::ALL` order
    pub fn with_values(texts: [String; 5]) -> Self {
        Self {
            texts,
            focused: None,
        }
    }

    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    pub fn set_focus(&mut self, field: Option<FieldId>) {
        self.focused = field;
    }

    pub fn push_char(&mut self, field: FieldId, ch: char) {
        self.texts[field.index()].push(ch);
    }

    /// Removes the last character; returns false when the field was already empty
    pub fn pop_char(&mut self, field: FieldId) -> bool {
        self.texts[field.index()].pop().is_some()
    }
}

impl InputFields for Form {
    fn text(&self, field: FieldId) -> &str {
        &self.texts[field.index()]
    }

    fn set_text(&mut self, field: FieldId, text: String) {
        self.texts[field.index()] = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_integer() {
        assert_eq!(parse_field("42"), 42.0);
        assert_eq!(parse_field("-7"), -7.0);
        assert_eq!(parse_field("+5"), 5.0);
        assert_eq!(parse_field("  12px"), 12.0);
        assert_eq!(parse_field("3.9"), 3.0);
        assert_eq!(parse_field("-0"), 0.0);
    }

    #[test]
    fn unparseable_text_falls_back_to_zero() {
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("   "), 0.0);
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("-"), 0.0);
        assert_eq!(parse_field("--3"), 0.0);
    }

    #[test]
    fn focus_clears_only_a_bare_zero() {
        let mut form = Form::default();
        assert!(clear_default(&mut form, FieldId::Rotate));
        assert_eq!(form.text(FieldId::Rotate), "");

        form.set_text(FieldId::PivotX, "05".to_string());
        assert!(!clear_default(&mut form, FieldId::PivotX));
        assert_eq!(form.text(FieldId::PivotX), "05");
    }

    #[test]
    fn blur_restores_blank_fields() {
        let mut form = Form::default();
        form.set_text(FieldId::TranslateY, "  ".to_string());
        assert!(restore_default(&mut form, FieldId::TranslateY));
        assert_eq!(form.text(FieldId::TranslateY), "0");
        assert!(!restore_default(&mut form, FieldId::TranslateY));
    }

    #[test]
    fn focus_order_wraps() {
        assert_eq!(FieldId::PivotY.next(), FieldId::TranslateX);
        assert_eq!(FieldId::TranslateX.prev(), FieldId::PivotY);
        assert_eq!(FieldId::Rotate.next(), FieldId::PivotX);
    }

    #[test]
    fn editing_appends_and_pops() {
        let mut form = Form::default();
        form.set_text(FieldId::TranslateX, String::new());
        form.push_char(FieldId::TranslateX, '-');
        form.push_char(FieldId::TranslateX, '4');
        assert_eq!(form.text(FieldId::TranslateX), "-4");
        assert!(form.pop_char(FieldId::TranslateX));
        assert!(form.pop_char(FieldId::TranslateX));
        assert!(!form.pop_char(FieldId::TranslateX));
    }
}
