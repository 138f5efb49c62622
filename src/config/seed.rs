use crate::domain::model::SellerDraft;
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Venue bootstrap file: categories to register plus sellers to run through
/// the regular create path before the first request is served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueSeed {
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub sellers: Vec<SellerDraft>,
}

impl VenueSeed {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VenueError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| VenueError::ConfigError {
            field: "seed".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }
}

impl Validate for VenueSeed {
    fn validate(&self) -> Result<()> {
        for (index, name) in self.categories.iter().enumerate() {
            crate::utils::validation::validate_non_empty_string(
                &format!("categories.{}", index),
                name,
            )?;
        }
        Ok(())
    }
}

/// Replaces `${VAR}` references with the environment value, leaving unknown
/// variables untouched.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Sector;
    use std::io::Write;

    const SEED: &str = r#"
categories = ["toys", "clothing"]

[[sellers]]
name = "Ana Maria"
phoneNumber = "11987654321"
productCategories = ["toys"]

[[sellers.boxes]]
sector = "blue"
streetLetter = "A"
boxNumber = 2
"#;

    #[test]
    fn test_parse_seed() {
        let seed = VenueSeed::from_toml_str(SEED).unwrap();
        assert_eq!(seed.categories, vec!["toys", "clothing"]);
        assert_eq!(seed.sellers.len(), 1);

        let seller = &seed.sellers[0];
        assert_eq!(seller.name, "Ana Maria");
        let boxes = seller.boxes.as_ref().unwrap();
        assert_eq!(boxes[0].sector, Sector::Blue);
        assert_eq!(boxes[0].street_letter, 'A');
        assert_eq!(boxes[0].box_number, 2);
        assert!(seller.stores.is_none());
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SEED.as_bytes()).unwrap();
        let seed = VenueSeed::from_file(file.path()).unwrap();
        assert_eq!(seed.sellers.len(), 1);
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("VENUE_SEED_OWNER", "Ana Maria");
        let seed = VenueSeed::from_toml_str(
            "categories = []\n[[sellers]]\nname = \"${VENUE_SEED_OWNER}\"\n",
        )
        .unwrap();
        assert_eq!(seed.sellers[0].name, "Ana Maria");
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let err = VenueSeed::from_toml_str("categories = not-a-list").unwrap_err();
        assert!(matches!(err, VenueError::ConfigError { .. }));
    }
}
