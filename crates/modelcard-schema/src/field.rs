//! Validator tree model
//!
//! A schema is a tree of [`FieldValidator`] nodes rooted at an
//! [`ObjectSchema`]. Validators are plain data interpreted at runtime by the
//! engine; defaults are carried on the nodes themselves, so no process-wide
//! default tables exist.

use modelcard_value::Value;

/// How absence and explicit null are handled for a field.
///
/// The two axes are independent: a field may allow being absent without
/// allowing null, and vice versa. Conflating them would silently drop the
/// signal for "caller explicitly cleared this field". New validators start
/// at the strictest combination (neither allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presence {
    /// Key may be missing; the field is omitted from the output
    pub allow_absent: bool,
    /// Explicit null is accepted and preserved in the output
    pub allow_null: bool,
}

impl Presence {
    /// Field must be present and non-null
    #[must_use]
    pub fn required() -> Self {
        Self {
            allow_absent: false,
            allow_null: false,
        }
    }

    /// Field may be absent (omitted from output), but not null
    #[must_use]
    pub fn optional() -> Self {
        Self {
            allow_absent: true,
            allow_null: false,
        }
    }

    /// Field must be present but may be explicit null
    #[must_use]
    pub fn nullable() -> Self {
        Self {
            allow_absent: false,
            allow_null: true,
        }
    }

    /// Field may be absent or explicit null
    #[must_use]
    pub fn optional_nullable() -> Self {
        Self {
            allow_absent: true,
            allow_null: true,
        }
    }
}

impl Default for Presence {
    fn default() -> Self {
        Self::required()
    }
}

/// The type a validator checks for
#[derive(Debug, Clone)]
pub enum Kind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Integer,
    /// Floating-point number
    Number,
    /// Boolean
    Boolean,
    /// Identifier token (lowercase atom such as `openai` or `text`)
    Ident,
    /// Nested object validated against a child schema
    Object(ObjectSchema),
    /// Array of elements validated against one element validator
    Array(Box<FieldValidator>),
    /// Ordered alternatives; first structural match wins
    Union(Vec<FieldValidator>),
}

impl Kind {
    /// Human-readable kind name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Ident => "identifier",
            Kind::Object(_) => "object",
            Kind::Array(_) => "array",
            Kind::Union(_) => "union",
        }
    }
}

/// A node in a schema tree: one field's type, constraints, and presence mode
#[derive(Debug, Clone)]
pub struct FieldValidator {
    /// Target kind
    pub kind: Kind,
    /// Absence/null handling
    pub presence: Presence,
    /// Value substituted when the field is absent or null
    pub default: Option<Value>,
    /// Minimum numeric value (checked after coercion)
    pub min: Option<f64>,
    /// Minimum number of array elements
    pub min_items: Option<usize>,
    /// Regex the string value must match
    pub pattern: Option<String>,
    /// Whether string values must parse as a `YYYY-MM-DD` date
    pub date: bool,
}

impl FieldValidator {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            presence: Presence::required(),
            default: None,
            min: None,
            min_items: None,
            pattern: None,
            date: false,
        }
    }

    /// String validator
    #[must_use]
    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    /// Integer validator
    #[must_use]
    pub fn integer() -> Self {
        Self::new(Kind::Integer)
    }

    /// Number validator
    #[must_use]
    pub fn number() -> Self {
        Self::new(Kind::Number)
    }

    /// Boolean validator
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(Kind::Boolean)
    }

    /// Identifier validator (lowercase atom token)
    #[must_use]
    pub fn ident() -> Self {
        Self::new(Kind::Ident)
    }

    /// Nested object validator
    #[must_use]
    pub fn object(schema: ObjectSchema) -> Self {
        Self::new(Kind::Object(schema))
    }

    /// Array validator with one element validator
    #[must_use]
    pub fn array(element: FieldValidator) -> Self {
        Self::new(Kind::Array(Box::new(element)))
    }

    /// Union validator; alternatives are tried in the given order
    #[must_use]
    pub fn union(alternatives: Vec<FieldValidator>) -> Self {
        Self::new(Kind::Union(alternatives))
    }

    /// Allow the field to be absent
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.presence.allow_absent = true;
        self
    }

    /// Allow explicit null to be preserved
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.presence.allow_null = true;
        self
    }

    /// Substitute this value when the field is absent or null
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the minimum numeric value
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the minimum array length
    #[must_use]
    pub fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// Require string values to match a regex
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Require string values to parse as a `YYYY-MM-DD` date
    #[must_use]
    pub fn date(mut self) -> Self {
        self.date = true;
        self
    }
}

/// Policy for input keys not declared in an object schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Silently drop undeclared keys
    #[default]
    Ignore,
    /// Preserve undeclared keys verbatim under the named output field
    Capture(String),
}

/// A named object schema: the root of a record type or a nested sub-record.
///
/// Field declaration order is significant; validation processes fields in
/// the order they were declared.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Record type name (used in logs and panic messages)
    pub name: String,
    fields: Vec<(String, FieldValidator)>,
    /// Handling of undeclared input keys
    pub unknown: UnknownFields,
}

impl ObjectSchema {
    /// Create an empty schema for the named record type
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unknown: UnknownFields::default(),
        }
    }

    /// Declare a field.
    ///
    /// # Panics
    ///
    /// Panics when the field name is already declared. Schemas are
    /// compiled-in data, so a duplicate is a construction bug, not input.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, validator: FieldValidator) -> Self {
        let name = name.into();
        assert!(
            !self.fields.iter().any(|(n, _)| *n == name),
            "duplicate field '{}' in schema '{}'",
            name,
            self.name
        );
        self.fields.push((name, validator));
        self
    }

    /// Preserve undeclared input keys under the named output field
    #[must_use]
    pub fn capture_unknown(mut self, field_name: impl Into<String>) -> Self {
        self.unknown = UnknownFields::Capture(field_name.into());
        self
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValidator)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Look up a declared field's validator
    pub fn get(&self, name: &str) -> Option<&FieldValidator> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether the given input key is declared
    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }
}
