//! Document categories: the three contexts a lawyer can draft for.
//!
//! Each category maps 1:1 to a fixed style block via a plain `match`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drafting::prompts::{AUSSERGERICHTLICH_STYLE, KLAGEERWIDERUNG_STYLE, KLAGESCHRIFT_STYLE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Klageschrift")]
    Klageschrift,
    #[serde(rename = "Klageerwiderung")]
    Klageerwiderung,
    #[serde(rename = "Außergerichtliches Schreiben")]
    AussergerichtlichesSchreiben,
}

impl Category {
    /// Dropdown order.
    pub const ALL: [Category; 3] = [
        Category::Klageschrift,
        Category::Klageerwiderung,
        Category::AussergerichtlichesSchreiben,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Klageschrift => "Klageschrift",
            Category::Klageerwiderung => "Klageerwiderung",
            Category::AussergerichtlichesSchreiben => "Außergerichtliches Schreiben",
        }
    }

    pub fn style_instruction(self) -> &'static str {
        match self {
            Category::Klageschrift => KLAGESCHRIFT_STYLE,
            Category::Klageerwiderung => KLAGEERWIDERUNG_STYLE,
            Category::AussergerichtlichesSchreiben => AUSSERGERICHTLICH_STYLE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
