//! Built-in field kind definitions, one module per kind.
//!
//! Scalar kinds map to fixed primitive types. Container kinds (group,
//! repeater, flexible content, clone) are `Structural`: their types are
//! synthesized per field instance by recursing into the registry. Reference
//! kinds register connections instead of inline types.

mod boolean;
mod button_group;
mod checkbox;
mod clone_field;
mod color_picker;
mod date_picker;
mod date_time_picker;
mod email;
mod file;
mod flexible_content;
mod gallery;
mod google_map;
mod group;
mod image;
mod link;
mod number;
mod oembed;
mod page_link;
mod password;
mod radio;
mod range;
mod reference;
mod relationship;
mod repeater;
mod rich_text;
mod select;
mod text;
mod textarea;
mod time_picker;
mod url;

use super::FieldKindDefinition;

/// Every built-in kind definition, in registration order.
pub fn all_definitions() -> Vec<FieldKindDefinition> {
    vec![
        text::definition(),
        textarea::definition(),
        rich_text::definition(),
        oembed::definition(),
        email::definition(),
        url::definition(),
        password::definition(),
        color_picker::definition(),
        number::definition(),
        range::definition(),
        boolean::definition(),
        select::definition(),
        checkbox::definition(),
        radio::definition(),
        button_group::definition(),
        date_picker::definition(),
        date_time_picker::definition(),
        time_picker::definition(),
        link::definition(),
        google_map::definition(),
        page_link::definition(),
        file::definition(),
        image::definition(),
        gallery::definition(),
        reference::definition(),
        relationship::definition(),
        group::definition(),
        repeater::definition(),
        flexible_content::definition(),
        clone_field::definition(),
    ]
}

/// The shared `Link` object type structured kinds refer to.
pub const LINK_TYPE_NAME: &str = "Link";

/// The shared `GoogleMap` object type map picks resolve to.
pub const GOOGLE_MAP_TYPE_NAME: &str = "GoogleMap";
