//! Append-only text accumulator for one record column

/// Text of one column, built from fragments and sealed when its element closes
///
/// A field is in one of three states:
/// - unset: nothing has been assigned; serializing it is an error
/// - open: text fragments are appended in arrival order
/// - sealed: read-only, either because its element closed or because the
///   value came from an attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: Option<String>,
    sealed: bool,
}

impl TextField {
    /// A field with no value
    pub fn unset() -> Self {
        Self::default()
    }

    /// An open field holding the empty string
    pub fn empty() -> Self {
        Self {
            value: Some(String::new()),
            sealed: false,
        }
    }

    /// A sealed field holding `value`, or sealed and unset when `None`
    pub fn fixed(value: Option<&str>) -> Self {
        Self {
            value: value.map(str::to_string),
            sealed: true,
        }
    }

    /// A sealed copy of another field's value, used for inherited keys
    pub fn inherit(other: &TextField) -> Self {
        Self::fixed(other.value())
    }

    /// Start accepting fragments. Returns `false` if the field is sealed.
    pub fn open(&mut self) -> bool {
        if self.sealed {
            return false;
        }
        self.value.get_or_insert_with(String::new);
        true
    }

    /// Append a fragment. Returns `false` if the field is sealed.
    pub fn append(&mut self, fragment: &str) -> bool {
        if self.sealed {
            return false;
        }
        self.value
            .get_or_insert_with(String::new)
            .push_str(fragment);
        true
    }

    /// Set and seal in one step. Returns `false` if the field is sealed.
    pub fn assign(&mut self, value: Option<&str>) -> bool {
        if self.sealed {
            return false;
        }
        *self = Self::fixed(value);
        true
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}
