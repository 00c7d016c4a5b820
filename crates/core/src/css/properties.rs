//! Inline declaration parsing and the utility-class rule tables.
//!
//! Every tracked property owns an ordered slice of [`ClassRule`]s; the first
//! rule that matches the element's class string supplies the value. New
//! utility conventions are added by appending rules, not by touching
//! `infer_style`.

use std::collections::HashMap;

/// Pixels per utility spacing step (`p-4` → 16px).
pub const SPACING_UNIT: u32 = 4;

/// Parse a `style` attribute into property → value.
///
/// Declarations without a `:` or with an empty name/value are skipped.
/// Later declarations of the same property win.
pub fn parse_inline_style(style_str: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for declaration in style_str.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        let mut parts = declaration.splitn(2, ':');
        let property = match parts.next() {
            Some(p) => p.trim().to_lowercase(),
            None => continue,
        };
        let value = match parts.next() {
            Some(v) => v.trim(),
            None => continue,
        };
        if property.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(property, value.to_string());
    }
    map
}

/// One utility-class heuristic for a single property.
#[derive(Clone, Copy)]
pub enum ClassRule {
    /// The class string contains the needle anywhere.
    Contains(&'static str, &'static str),
    /// A class token `prefix<N>` resolves to `N * 4` px.
    Spacing(&'static str),
    /// Free-form matcher for rules that need more than a lookup.
    Custom(fn(&str) -> Option<String>),
}

impl ClassRule {
    pub fn resolve(&self, class: &str) -> Option<String> {
        match self {
            ClassRule::Contains(needle, value) => {
                class.contains(needle).then(|| value.to_string())
            }
            ClassRule::Spacing(prefix) => {
                token_number(class, prefix)
                    .and_then(spacing_px)
                    .map(|px| format!("{}px", px))
            }
            ClassRule::Custom(f) => f(class),
        }
    }
}

/// First matching rule's value, if any.
pub fn resolve_class(rules: &[ClassRule], class: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.resolve(class))
}

/// Find the first class token of the form `prefix<digits>` and return the
/// number. A token may carry variant prefixes (`md:p-4`); the prefix must
/// start the token or follow a `:`.
pub fn token_number(class: &str, prefix: &str) -> Option<u32> {
    for (idx, _) in class.match_indices(prefix) {
        let at_boundary = class[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == ':');
        if !at_boundary {
            continue;
        }
        let digits: String = class[idx + prefix.len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(n) = digits.parse() {
            return Some(n);
        }
    }
    None
}

// --- Rule tables ---

pub const FLEX_DIRECTION_RULES: &[ClassRule] = &[ClassRule::Contains("flex-col", "column")];

pub const JUSTIFY_RULES: &[ClassRule] = &[
    ClassRule::Contains("justify-center", "center"),
    ClassRule::Contains("justify-between", "space-between"),
    ClassRule::Contains("justify-around", "space-around"),
    ClassRule::Contains("justify-evenly", "space-evenly"),
    ClassRule::Contains("justify-end", "flex-end"),
    ClassRule::Contains("justify-start", "flex-start"),
];

pub const ALIGN_RULES: &[ClassRule] = &[
    ClassRule::Contains("items-center", "center"),
    ClassRule::Contains("items-start", "flex-start"),
    ClassRule::Contains("items-end", "flex-end"),
    ClassRule::Contains("items-stretch", "stretch"),
    ClassRule::Contains("items-baseline", "baseline"),
];

pub const GRID_COLUMNS_RULES: &[ClassRule] = &[ClassRule::Custom(grid_columns)];

pub const GAP_RULES: &[ClassRule] = &[ClassRule::Spacing("gap-")];

pub const PADDING_RULES: &[ClassRule] = &[ClassRule::Spacing("p-"), ClassRule::Custom(axis_padding)];

pub const MARGIN_RULES: &[ClassRule] = &[
    ClassRule::Spacing("m-"),
    ClassRule::Contains("mx-auto", "0 auto"),
];

pub const BACKGROUND_RULES: &[ClassRule] = &[
    ClassRule::Contains("bg-white", "#ffffff"),
    ClassRule::Contains("bg-black", "#000000"),
    ClassRule::Contains("bg-gray-", "#6b7280"),
    ClassRule::Contains("bg-blue-", "#3b82f6"),
    ClassRule::Contains("bg-indigo-", "#6366f1"),
    ClassRule::Contains("bg-purple-", "#8b5cf6"),
    ClassRule::Contains("bg-gradient", "linear-gradient(...)"),
];

pub const FONT_SIZE_RULES: &[ClassRule] = &[
    ClassRule::Contains("text-xs", "12px"),
    ClassRule::Contains("text-sm", "14px"),
    ClassRule::Contains("text-base", "16px"),
    ClassRule::Contains("text-lg", "18px"),
    ClassRule::Contains("text-xl", "20px"),
    ClassRule::Contains("text-2xl", "24px"),
    ClassRule::Contains("text-3xl", "30px"),
    ClassRule::Contains("text-4xl", "36px"),
    ClassRule::Contains("text-5xl", "48px"),
    ClassRule::Contains("text-6xl", "60px"),
];

pub const FONT_WEIGHT_RULES: &[ClassRule] = &[
    ClassRule::Contains("font-thin", "100"),
    ClassRule::Contains("font-light", "300"),
    ClassRule::Contains("font-normal", "400"),
    ClassRule::Contains("font-medium", "500"),
    ClassRule::Contains("font-semibold", "600"),
    ClassRule::Contains("font-bold", "700"),
    ClassRule::Contains("font-extrabold", "800"),
];

// `rounded` matches every `rounded-*` class, so it stays last.
pub const RADIUS_RULES: &[ClassRule] = &[
    ClassRule::Contains("rounded-full", "9999px"),
    ClassRule::Contains("rounded-3xl", "24px"),
    ClassRule::Contains("rounded-2xl", "16px"),
    ClassRule::Contains("rounded-xl", "12px"),
    ClassRule::Contains("rounded-lg", "8px"),
    ClassRule::Contains("rounded-md", "6px"),
    ClassRule::Contains("rounded-sm", "2px"),
    ClassRule::Contains("rounded", "4px"),
];

pub const SHADOW_RULES: &[ClassRule] = &[
    ClassRule::Contains("shadow-2xl", "0 25px 50px -12px rgba(0,0,0,0.25)"),
    ClassRule::Contains("shadow-xl", "0 20px 25px -5px rgba(0,0,0,0.1)"),
    ClassRule::Contains("shadow-lg", "0 10px 15px -3px rgba(0,0,0,0.1)"),
    ClassRule::Contains("shadow-md", "0 4px 6px -1px rgba(0,0,0,0.1)"),
    ClassRule::Contains("shadow-sm", "0 1px 2px 0 rgba(0,0,0,0.05)"),
    ClassRule::Contains("shadow", "0 1px 3px 0 rgba(0,0,0,0.1)"),
];

pub const WIDTH_RULES: &[ClassRule] = &[
    ClassRule::Contains("w-full", "100%"),
    ClassRule::Contains("w-screen", "100vw"),
    ClassRule::Contains("w-auto", "auto"),
    ClassRule::Spacing("w-"),
];

pub const HEIGHT_RULES: &[ClassRule] = &[
    ClassRule::Contains("h-full", "100%"),
    ClassRule::Contains("h-screen", "100vh"),
    ClassRule::Contains("h-auto", "auto"),
    ClassRule::Spacing("h-"),
];

pub const MAX_WIDTH_RULES: &[ClassRule] = &[
    ClassRule::Contains("max-w-7xl", "1280px"),
    ClassRule::Contains("max-w-6xl", "1152px"),
    ClassRule::Contains("max-w-5xl", "1024px"),
    ClassRule::Contains("max-w-4xl", "896px"),
    ClassRule::Contains("max-w-3xl", "768px"),
    ClassRule::Contains("max-w-2xl", "672px"),
    ClassRule::Contains("max-w-xl", "576px"),
    ClassRule::Contains("max-w-lg", "512px"),
    ClassRule::Contains("max-w-md", "448px"),
    ClassRule::Contains("max-w-sm", "384px"),
];

fn grid_columns(class: &str) -> Option<String> {
    token_number(class, "grid-cols-").map(|n| format!("repeat({}, minmax(0, 1fr))", n))
}

/// `px-N` / `py-N` → `"{py}px {px}px"`, missing axis as 0. An axis that
/// overflows makes the whole rule a non-match.
fn axis_padding(class: &str) -> Option<String> {
    let x = token_number(class, "px-");
    let y = token_number(class, "py-");
    if x.is_none() && y.is_none() {
        return None;
    }
    let x = spacing_px(x.unwrap_or(0))?;
    let y = spacing_px(y.unwrap_or(0))?;
    Some(format!("{}px {}px", y, x))
}

/// `steps` spacing units in pixels. A count too large to scale is not a
/// spacing class.
fn spacing_px(steps: u32) -> Option<u32> {
    steps.checked_mul(SPACING_UNIT)
}
