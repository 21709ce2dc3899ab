//! Prop category tags.

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use std::fmt;
use std::str::FromStr;

/// Catalog category. A prop carries one or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "prop_category", no_pg_array)]
pub enum PropCategory {
    /// Costumes.
    #[serde(rename = "Costume")]
    #[sqlx(rename = "Costume")]
    Costume,
    /// Hand props and accessories.
    #[serde(rename = "Accessory & Props")]
    #[sqlx(rename = "Accessory & Props")]
    AccessoryAndProps,
    /// Makeup and wigs.
    #[serde(rename = "Makeup & Hair")]
    #[sqlx(rename = "Makeup & Hair")]
    MakeupAndHair,
    /// Scenery and stage dressing.
    #[serde(rename = "Set & Stage Decor")]
    #[sqlx(rename = "Set & Stage Decor")]
    SetAndStageDecor,
}

impl PgHasArrayType for PropCategory {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_prop_category")
    }
}

impl PropCategory {
    /// Return the display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Costume => "Costume",
            Self::AccessoryAndProps => "Accessory & Props",
            Self::MakeupAndHair => "Makeup & Hair",
            Self::SetAndStageDecor => "Set & Stage Decor",
        }
    }
}

impl fmt::Display for PropCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropCategory {
    type Err = propshop_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Costume" => Ok(Self::Costume),
            "Accessory & Props" => Ok(Self::AccessoryAndProps),
            "Makeup & Hair" => Ok(Self::MakeupAndHair),
            "Set & Stage Decor" => Ok(Self::SetAndStageDecor),
            _ => Err(propshop_core::AppError::validation(format!(
                "Invalid category: '{s}'"
            ))),
        }
    }
}
