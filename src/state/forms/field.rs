//! Form field value objects

/// How a field's text is edited and displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text
    Text,
    /// Masked unless revealed (passwords)
    Secret,
    /// Decimal degrees
    Coordinate,
}

/// Mask character used for secret fields
const MASK_CHAR: char = '•';

/// Edit buffer for a single input, with its label and placeholder
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &str) -> Self {
        Self::with_kind(label, FieldKind::Text)
    }

    /// Create a new masked field
    pub fn secret(label: &str) -> Self {
        Self::with_kind(label, FieldKind::Secret)
    }

    /// Create a new coordinate field
    pub fn coordinate(label: &str) -> Self {
        Self::with_kind(label, FieldKind::Coordinate)
    }

    fn with_kind(label: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            kind,
            placeholder: None,
        }
    }

    /// Attach placeholder text shown while the field is empty
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Push a character to the field value.
    /// Coordinate fields only take characters that can appear in a decimal.
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = match self.kind {
            FieldKind::Coordinate => c.is_ascii_digit() || matches!(c, '-' | '+' | '.'),
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
        };
        if accepted {
            self.value.push(c);
        }
        accepted
    }

    /// Remove the last character; returns false when already empty
    pub fn pop_char(&mut self) -> bool {
        self.value.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the display value for rendering
    pub fn display_value(&self, reveal: bool) -> String {
        match self.kind {
            FieldKind::Secret if !reveal => {
                std::iter::repeat(MASK_CHAR).take(self.value.chars().count()).collect()
            }
            _ => self.value.clone(),
        }
    }
}
