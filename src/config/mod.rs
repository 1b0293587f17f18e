//! Field group configuration model.
//!
//! These types mirror the user-authored, declarative config that describes
//! which fields exist, how they nest, and where they attach. A config is
//! read wholesale at schema-build time and never mutated afterwards; when
//! nesting requires a derived sub-group (a repeater's row type, a flex
//! layout, a prefixed clone) a *new* [`FieldGroup`] value is synthesized
//! rather than mutating the original.

mod index;
mod loader;

pub use index::ConfigIndex;
pub use loader::{load_field_groups_from_dir, load_field_groups_from_file, parse_field_groups};

use serde::{Deserialize, Serialize};

use crate::location::LocationRule;

/// The closed set of supported field kinds.
///
/// A field's kind is immutable once read from config; it determines both the
/// synthesized schema type and the value-coercion rules applied at resolve
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Textarea,
    RichText,
    Oembed,
    Email,
    Url,
    Password,
    ColorPicker,
    Number,
    Range,
    Boolean,
    Select,
    Checkbox,
    Radio,
    ButtonGroup,
    DatePicker,
    DateTimePicker,
    TimePicker,
    Link,
    PageLink,
    GoogleMap,
    File,
    Image,
    Gallery,
    Reference,
    Relationship,
    Group,
    Repeater,
    FlexibleContent,
    Clone,
}

impl FieldKind {
    /// The kind name as it appears in config documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::RichText => "rich_text",
            Self::Oembed => "oembed",
            Self::Email => "email",
            Self::Url => "url",
            Self::Password => "password",
            Self::ColorPicker => "color_picker",
            Self::Number => "number",
            Self::Range => "range",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::ButtonGroup => "button_group",
            Self::DatePicker => "date_picker",
            Self::DateTimePicker => "date_time_picker",
            Self::TimePicker => "time_picker",
            Self::Link => "link",
            Self::PageLink => "page_link",
            Self::GoogleMap => "google_map",
            Self::File => "file",
            Self::Image => "image",
            Self::Gallery => "gallery",
            Self::Reference => "reference",
            Self::Relationship => "relationship",
            Self::Group => "group",
            Self::Repeater => "repeater",
            Self::FlexibleContent => "flexible_content",
            Self::Clone => "clone",
        }
    }

    /// All supported kinds, in declaration order.
    pub fn all() -> &'static [FieldKind] {
        &[
            Self::Text,
            Self::Textarea,
            Self::RichText,
            Self::Oembed,
            Self::Email,
            Self::Url,
            Self::Password,
            Self::ColorPicker,
            Self::Number,
            Self::Range,
            Self::Boolean,
            Self::Select,
            Self::Checkbox,
            Self::Radio,
            Self::ButtonGroup,
            Self::DatePicker,
            Self::DateTimePicker,
            Self::TimePicker,
            Self::Link,
            Self::PageLink,
            Self::GoogleMap,
            Self::File,
            Self::Image,
            Self::Gallery,
            Self::Reference,
            Self::Relationship,
            Self::Group,
            Self::Repeater,
            Self::FlexibleContent,
            Self::Clone,
        ]
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How stored line breaks should be converted when a text value resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineBreakMode {
    /// Blank-line separated blocks become paragraph markup
    Paragraphs,
    /// Every newline becomes a break tag
    Breaks,
}

/// One named layout of a flexible-content field.
///
/// Each layout becomes its own object type implementing the field's layout
/// interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlexLayout {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub sub_fields: Vec<Field>,
}

impl FlexLayout {
    /// The display name used to derive the layout's type name.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// One field instance inside a field group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Storage key the external data store indexes values by
    pub key: String,
    /// Config-level name, used to derive the schema field name
    pub name: String,
    pub kind: FieldKind,
    /// Explicit schema field name, overriding the derived one
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    /// Fields explicitly hidden from the schema are silently excluded
    #[serde(default = "default_true")]
    pub show_in_schema: bool,
    /// Sub-fields for `group` and `repeater` kinds
    #[serde(default)]
    pub sub_fields: Vec<Field>,
    /// Named layouts for the `flexible_content` kind
    #[serde(default)]
    pub layouts: Vec<FlexLayout>,
    /// Keys of cloned groups or fields for the `clone` kind
    #[serde(default)]
    pub clone: Vec<String>,
    /// Whether a clone wraps its targets in a new nested type
    #[serde(default)]
    pub prefix_name: bool,
    /// Set on re-synthesized clone copies: the original field's storage key.
    /// Clones never have independent storage.
    #[serde(default)]
    pub cloned_from: Option<String>,
    /// Target host type for `reference` and `relationship` kinds
    #[serde(default)]
    pub to_type: Option<String>,
    /// Whether a choice kind accepts multiple values
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub line_breaks: Option<LineBreakMode>,
    /// Input format for date/time kinds, overriding the kind default
    #[serde(default)]
    pub input_format: Option<String>,
}

impl Field {
    /// Minimal field constructor used by tests and derived configs.
    pub fn new(key: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
            field_name: None,
            description: None,
            instructions: None,
            show_in_schema: true,
            sub_fields: Vec::new(),
            layouts: Vec::new(),
            clone: Vec::new(),
            prefix_name: false,
            cloned_from: None,
            to_type: None,
            multiple: false,
            line_breaks: None,
            input_format: None,
        }
    }

    /// The storage key resolution should read from.
    ///
    /// Cloned fields resolve against the original field's key.
    pub fn storage_key(&self) -> &str {
        self.cloned_from.as_deref().unwrap_or(&self.key)
    }

    /// The raw name used to derive the schema field name.
    pub fn display_name(&self) -> &str {
        self.field_name.as_deref().unwrap_or(&self.name)
    }

    /// Description shown in the schema, falling back to config instructions.
    pub fn schema_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or(self.instructions.as_deref())
    }
}

/// A named, ordered collection of fields: the unit of schema synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Identifying key, unique across the config set
    pub key: String,
    /// Display name the type name derives from
    pub title: String,
    /// Explicit type-name override
    #[serde(default)]
    pub type_name: Option<String>,
    /// Whether the group appears in the schema; `None` defers to the
    /// registry's visibility policy
    #[serde(default)]
    pub show_in_schema: Option<bool>,
    /// The underlying REST-style visibility flag some policies inherit from
    #[serde(default)]
    pub show_in_rest: Option<bool>,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Explicit host-type list. `Some(vec![])` is a deliberate "attach
    /// nowhere" and is respected as given, not treated as unset.
    #[serde(default)]
    pub host_types: Option<Vec<String>>,
    /// When set, location rules are evaluated even if an explicit host-type
    /// list is present
    #[serde(default)]
    pub map_from_rules: bool,
    /// OR-of-AND location rule tree
    #[serde(default)]
    pub location: Vec<LocationRule>,
    /// Parent group key, set on synthesized sub-groups
    #[serde(default)]
    pub parent: Option<String>,
    /// Extra interfaces the synthesized type should implement
    #[serde(default)]
    pub interfaces: Vec<String>,
    /// Slug of the options-style singleton entity this group reads from
    #[serde(default)]
    pub options_slug: Option<String>,
    /// Whether this group represents one flex-content layout
    #[serde(default)]
    pub is_layout: bool,
}

impl FieldGroup {
    /// Minimal group constructor used by tests and derived configs.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            type_name: None,
            show_in_schema: None,
            show_in_rest: None,
            fields: Vec::new(),
            host_types: None,
            map_from_rules: false,
            location: Vec::new(),
            parent: None,
            interfaces: Vec::new(),
            options_slug: None,
            is_layout: false,
        }
    }

    /// The raw name the schema type name derives from.
    pub fn display_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or(&self.title)
    }

    /// Whether this group is an options-style singleton group.
    pub fn is_options_group(&self) -> bool {
        self.options_slug.is_some()
    }
}

fn default_true() -> bool {
    true
}
