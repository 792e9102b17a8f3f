use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fields requested from the countries API, in the order the API documents them.
pub const DETAIL_FIELDS: &str =
    "area,capital,latlng,car,currencies,flags,idd,languages,name,population,tld";

/// ISO 3166-1 alpha-2 code, always stored upper-case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidCountryCode(pub String);

impl fmt::Display for InvalidCountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ISO2 country code: {:?}", self.0)
    }
}

impl std::error::Error for InvalidCountryCode {}

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = InvalidCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 2 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(CountryCode(trimmed.to_ascii_uppercase()))
        } else {
            Err(InvalidCountryCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for CountryCode {
    type Error = InvalidCountryCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl TryFrom<Vec<f64>> for LatLng {
    type Error = String;

    fn try_from(value: Vec<f64>) -> Result<Self, Self::Error> {
        match value.as_slice() {
            [lat, lng] if lat.is_finite() && lng.is_finite() => Ok(LatLng::new(*lat, *lng)),
            _ => Err(format!("latlng must be [lat, lng], got {:?}", value)),
        }
    }
}

impl From<LatLng> for Vec<f64> {
    fn from(p: LatLng) -> Self {
        vec![p.lat, p.lng]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Idd {
    #[serde(default)]
    pub root: String,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

impl Idd {
    /// Root plus the first suffix, e.g. `+33`.
    pub fn calling_code(&self) -> String {
        let suffix = self.suffixes.first().map(String::as_str).unwrap_or("");
        format!("{}{}", self.root, suffix)
    }
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub side: String,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub alt: String,
}

/// Country facts as returned by `GET /alpha/{code}?fields=...`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryDetail {
    pub name: CountryName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub idd: Idd,
    #[serde(default)]
    pub car: Car,
    #[serde(default)]
    pub tld: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
    pub latlng: LatLng,
}

impl CountryDetail {
    pub fn currency_names(&self) -> Vec<&str> {
        self.currencies.values().map(|c| c.name.as_str()).collect()
    }

    pub fn language_names(&self) -> Vec<&str> {
        self.languages.values().map(String::as_str).collect()
    }
}
