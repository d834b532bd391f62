use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Gallery category, stored in Postgres as the `asset_category` enum.
///
/// The set is closed: the site navigation is built around exactly these six
/// sections, and an unknown value in a request is a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "asset_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Facades,
    Restauration,
    Immeuble,
    Professionel,
    Appartement,
    Fabrication,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid category")]
pub struct InvalidCategory;

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Facades,
        Category::Restauration,
        Category::Immeuble,
        Category::Professionel,
        Category::Appartement,
        Category::Fabrication,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Facades => "facades",
            Category::Restauration => "restauration",
            Category::Immeuble => "immeuble",
            Category::Professionel => "professionel",
            Category::Appartement => "appartement",
            Category::Fabrication => "fabrication",
        }
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    // Matching is exact: the public site sends the slugs verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facades" => Ok(Category::Facades),
            "restauration" => Ok(Category::Restauration),
            "immeuble" => Ok(Category::Immeuble),
            "professionel" => Ok(Category::Professionel),
            "appartement" => Ok(Category::Appartement),
            "fabrication" => Ok(Category::Fabrication),
            _ => Err(InvalidCategory),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slug_parses_back_to_itself() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().expect("known slug");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_and_miscased_slugs_are_rejected() {
        assert!("garden".parse::<Category>().is_err());
        assert!("Facades".parse::<Category>().is_err());
        assert!("FABRICATION".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn serde_uses_the_slug() {
        let json = serde_json::to_string(&Category::Immeuble).unwrap();
        assert_eq!(json, "\"immeuble\"");
        let back: Category = serde_json::from_str("\"professionel\"").unwrap();
        assert_eq!(back, Category::Professionel);
    }
}
