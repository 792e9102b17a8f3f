use crate::hooks::use_country_map;
use crate::icons::X;
use crate::models::CountryDetail;
use dioxus::prelude::*;

/// Labelled lines shown under the popup heading, in display order.
pub fn detail_lines(detail: &CountryDetail) -> Vec<(&'static str, String)> {
    vec![
        ("Official name", detail.name.official.clone()),
        ("Capital", detail.capital.join(", ")),
        ("Area", detail.area.to_string()),
        ("Population estimate", detail.population.to_string()),
        ("Currency", detail.currency_names().join(", ")),
        ("Languages spoken", detail.language_names().join(", ")),
        ("Country call code", detail.idd.calling_code()),
        ("Driving side", detail.car.side.clone()),
        ("Internet domain (TLD)", detail.tld.join(", ")),
    ]
}

#[component]
pub fn CountryPopup(detail: CountryDetail, x: f64, y: f64) -> Element {
    let client = use_country_map();
    let lines = detail_lines(&detail);
    let flag_src = detail.flags.png.clone();
    let flag_alt = detail.flags.alt.clone();

    rsx! {
        div {
            class: "atlas-popup",
            style: "left: {x:.1}px; top: {y:.1}px;",
            button {
                class: "atlas-popup-close",
                title: "Close",
                onclick: move |_| client.dismiss(),
                X { size: 14 }
            }
            h1 { "{detail.name.common}" }
            for (label, value) in lines {
                p { key: "{label}", "{label}: {value}" }
            }
            if !flag_src.is_empty() {
                img { class: "flag", width: "50%", src: "{flag_src}", alt: "{flag_alt}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_france_popup_lines() {
        let detail: CountryDetail = serde_json::from_str(
            r#"{
                "name": {"common": "France", "official": "French Republic"},
                "capital": ["Paris"],
                "area": 551695,
                "population": 67000000,
                "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
                "languages": {"fra": "French"},
                "idd": {"root": "+3", "suffixes": ["3"]},
                "car": {"side": "right"},
                "tld": [".fr"],
                "latlng": [46, 2]
            }"#,
        )
        .unwrap();

        let lines = detail_lines(&detail);
        let get = |label: &str| {
            lines
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get("Capital"), "Paris");
        assert_eq!(get("Area"), "551695");
        assert_eq!(get("Population estimate"), "67000000");
        assert_eq!(get("Currency"), "Euro");
        assert_eq!(get("Country call code"), "+33");
        assert_eq!(get("Internet domain (TLD)"), ".fr");
    }

    #[test]
    fn test_multiple_languages_are_joined() {
        let detail: CountryDetail = serde_json::from_str(
            r#"{
                "name": {"common": "Switzerland", "official": "Swiss Confederation"},
                "languages": {"fra": "French", "gsw": "Swiss German", "ita": "Italian", "roh": "Romansh"},
                "latlng": [47, 8]
            }"#,
        )
        .unwrap();
        let lines = detail_lines(&detail);
        assert_eq!(
            lines[5],
            ("Languages spoken", "French, Swiss German, Italian, Romansh".to_string())
        );
    }
}
