//! Message template rendering
//!
//! - `render`: placeholder substitution (`{nome}` → value)
//! - `variables`: the standard placeholders and how a billing record fills them

pub mod render;
pub mod variables;

pub use render::{
    placeholders, render, render_strict, render_with_policy, PlaceholderPolicy, TemplateValues,
};
pub use variables::{
    billing_values, check_date_format, format_date, TemplateVariable, FALLBACK_DATE_FORMAT,
};
