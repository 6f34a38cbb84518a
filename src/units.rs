//! Display formatting for raw API fields

use std::fmt;

const INCHES_PER_DECIMETER: f64 = 10.0 / 2.54;
const POUNDS_PER_HECTOGRAM: f64 = 0.220_462_262_2;

/// Decimeters to `F' II"`, rounded to the nearest inch.
pub fn convert_height(decimeters: u32) -> String {
    let total_inches = f64::from(decimeters) * INCHES_PER_DECIMETER;
    let mut feet = (total_inches / 12.0).floor() as u32;
    let mut inches = (total_inches - f64::from(feet) * 12.0).round() as u32;
    if inches >= 12 {
        feet += 1;
        inches = 0;
    }
    format!("{feet}' {inches:02}\"")
}

/// Weight in pounds, rounded to one decimal place
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pounds {
    /// The rounded value has no fractional part
    Whole(u32),
    Tenths(f64),
}

impl Pounds {
    pub fn value(&self) -> f64 {
        match self {
            Pounds::Whole(pounds) => f64::from(*pounds),
            Pounds::Tenths(pounds) => *pounds,
        }
    }
}

impl fmt::Display for Pounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pounds::Whole(pounds) => write!(f, "{pounds}"),
            Pounds::Tenths(pounds) => write!(f, "{pounds:.1}"),
        }
    }
}

pub fn convert_weight(hectograms: u32) -> Pounds {
    let tenths = (f64::from(hectograms) * POUNDS_PER_HECTOGRAM * 10.0).round() as u64;
    if tenths % 10 == 0 {
        Pounds::Whole((tenths / 10) as u32)
    } else {
        Pounds::Tenths(tenths as f64 / 10.0)
    }
}

/// `"Type: x"` for a single type, `"Types: a, b"` otherwise.
pub fn type_names(types: &[String]) -> String {
    match types {
        [] => "Type: unknown".to_string(),
        [single] => format!("Type: {single}"),
        many => format!("Types: {}", many.join(", ")),
    }
}

pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
