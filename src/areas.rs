use crate::error::{Error, Result};
use log::warn;
use std::collections::{BTreeMap, BTreeSet};

/// Area code of the whole-country aggregate.
pub const WHOLE_COUNTRY_CODE: &str = "SSS";
/// Display name StatFin uses for the whole-country aggregate.
pub const WHOLE_COUNTRY_NAME: &str = "WHOLE COUNTRY";

/// One entry of the area dimension: internal code plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub code: String,
    pub name: String,
}

/// The loaded set of valid areas with bidirectional lookup.
///
/// Codes are unique; name lookup is case-insensitive. A directory built via
/// [`AreaDirectory::fallback`] is marked incomplete and resolves permissively:
/// unknown input passes through upper-cased instead of being rejected, so a
/// failed metadata fetch does not lock the user out of known codes.
#[derive(Debug, Clone)]
pub struct AreaDirectory {
    areas: Vec<Area>,
    codes: BTreeSet<String>,
    code_by_name: BTreeMap<String, String>,
    complete: bool,
}

impl AreaDirectory {
    pub fn from_areas(areas: Vec<Area>) -> Self {
        let mut codes = BTreeSet::new();
        let mut code_by_name = BTreeMap::new();
        for a in &areas {
            codes.insert(a.code.to_uppercase());
            code_by_name.insert(a.name.to_lowercase(), a.code.clone());
        }
        Self {
            areas,
            codes,
            code_by_name,
            complete: true,
        }
    }

    /// Minimal directory used when the metadata fetch fails: one entry for
    /// the whole country, permissive resolution for everything else.
    pub fn fallback() -> Self {
        let mut dir = Self::from_areas(vec![Area {
            code: WHOLE_COUNTRY_CODE.to_string(),
            name: WHOLE_COUNTRY_NAME.to_string(),
        }]);
        dir.complete = false;
        dir
    }

    /// Load the directory via `fetch`, falling back to the single-entry
    /// whole-country directory on any failure. Never returns an error.
    pub fn load_with<F>(fetch: F) -> Self
    where
        F: FnOnce() -> Result<Vec<Area>>,
    {
        match fetch() {
            Ok(areas) if !areas.is_empty() => Self::from_areas(areas),
            Ok(_) => {
                warn!("area metadata response contained no areas, using whole-country fallback");
                Self::fallback()
            }
            Err(e) => {
                warn!("failed to load area metadata ({e}), using whole-country fallback");
                Self::fallback()
            }
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Display name for a code, if known. Case-insensitive.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.areas
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
            .map(|a| a.name.as_str())
    }

    /// Resolve free-text input to an area code.
    ///
    /// Empty input and "whole country" (case-insensitive) map to the `SSS`
    /// sentinel; otherwise the input must match a known code or a known
    /// display name exactly (codes upper-cased, names case-insensitive).
    /// Unknown input is an [`Error::UnknownArea`] on a complete directory and
    /// passes through upper-cased on an incomplete one.
    pub fn resolve(&self, raw_input: &str) -> Result<String> {
        let input = raw_input.trim().to_lowercase();
        if input.is_empty() || input == "whole country" {
            return Ok(WHOLE_COUNTRY_CODE.to_string());
        }
        let as_code = input.to_uppercase();
        if self.codes.contains(&as_code) {
            return Ok(as_code);
        }
        if let Some(code) = self.code_by_name.get(&input) {
            return Ok(code.clone());
        }
        if !self.complete {
            return Ok(as_code);
        }
        Err(Error::UnknownArea {
            input: raw_input.trim().to_string(),
        })
    }

    pub fn is_valid(&self, raw_input: &str) -> bool {
        self.resolve(raw_input).is_ok()
    }

    /// Display label for resolved input: the directory name when known,
    /// otherwise the trimmed input itself ("whole country" for empty input).
    pub fn display_label(&self, raw_input: &str) -> String {
        let input = raw_input.trim();
        if input.is_empty() {
            return "whole country".to_string();
        }
        match self.resolve(input) {
            Ok(code) => self
                .name_of(&code)
                .map(|n| n.to_string())
                .unwrap_or_else(|| input.to_string()),
            Err(_) => input.to_string(),
        }
    }
}
