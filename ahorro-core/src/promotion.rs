//! Promotion record types: categories, weekdays and eligible cards.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Fixed set of promotion categories. Serialized with the Spanish label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Combustible,
    Supermercado,
    Indumentaria,
    Farmacia,
    Libreria,
    Entretenimiento,
    Tecnologia,
    Gastronomia,
    Viajes,
    #[default]
    Otros,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Combustible,
        Category::Supermercado,
        Category::Indumentaria,
        Category::Farmacia,
        Category::Libreria,
        Category::Entretenimiento,
        Category::Tecnologia,
        Category::Gastronomia,
        Category::Viajes,
        Category::Otros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Combustible => "Combustible",
            Category::Supermercado => "Supermercado",
            Category::Indumentaria => "Indumentaria",
            Category::Farmacia => "Farmacia",
            Category::Libreria => "Librería",
            Category::Entretenimiento => "Entretenimiento",
            Category::Tecnologia => "Tecnología",
            Category::Gastronomia => "Gastronomía",
            Category::Viajes => "Viajes",
            Category::Otros => "Otros",
        }
    }

    /// Icon shown next to the category in listings.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Combustible => "⛽",
            Category::Supermercado => "🛒",
            Category::Indumentaria => "👕",
            Category::Farmacia => "💊",
            Category::Libreria => "📚",
            Category::Entretenimiento => "🎬",
            Category::Tecnologia => "💻",
            Category::Gastronomia => "🍔",
            Category::Viajes => "✈️",
            Category::Otros => "📌",
        }
    }

    /// Map a stored label back to a category. Unknown labels land in `Otros`.
    pub fn from_label(label: &str) -> Category {
        let wanted = fold_accents(label.trim());
        Category::ALL
            .into_iter()
            .find(|c| fold_accents(c.as_str()) == wanted)
            .unwrap_or(Category::Otros)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

/// Canonical Spanish weekday names, Monday first. Serialized with the accented
/// name; read back through `FromStr`, so "Miercoles" and "MIÉ" also load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Lunes,
        Weekday::Martes,
        Weekday::Miercoles,
        Weekday::Jueves,
        Weekday::Viernes,
        Weekday::Sabado,
        Weekday::Domingo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Lunes => "Lunes",
            Weekday::Martes => "Martes",
            Weekday::Miercoles => "Miércoles",
            Weekday::Jueves => "Jueves",
            Weekday::Viernes => "Viernes",
            Weekday::Sabado => "Sábado",
            Weekday::Domingo => "Domingo",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Weekday::Lunes => "LUN",
            Weekday::Martes => "MAR",
            Weekday::Miercoles => "MIÉ",
            Weekday::Jueves => "JUE",
            Weekday::Viernes => "VIE",
            Weekday::Sabado => "SÁB",
            Weekday::Domingo => "DOM",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Lunes,
            chrono::Weekday::Tue => Weekday::Martes,
            chrono::Weekday::Wed => Weekday::Miercoles,
            chrono::Weekday::Thu => Weekday::Jueves,
            chrono::Weekday::Fri => Weekday::Viernes,
            chrono::Weekday::Sat => Weekday::Sabado,
            chrono::Weekday::Sun => Weekday::Domingo,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts full names or abbreviations, with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold_accents(s.trim());
        Weekday::ALL
            .into_iter()
            .find(|d| fold_accents(d.as_str()) == wanted || fold_accents(d.abbreviation()) == wanted)
            .ok_or_else(|| format!("día desconocido: {s}"))
    }
}

/// The sentinel value meaning every card of the bank is eligible.
pub const ALL_CARDS: &str = "todas";

/// Cards eligible for a promotion. On the wire this is a plain array where
/// an entry equal to `"todas"` (any case) stands for every card. An empty
/// array is kept as an empty list and matches no card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Tarjetas {
    #[default]
    Todas,
    Cards(Vec<String>),
}

impl Tarjetas {
    pub fn is_all(&self) -> bool {
        matches!(self, Tarjetas::Todas)
    }

    /// True when `card` is eligible: either every card is, or some listed card
    /// name contains it (case-insensitive).
    pub fn accepts(&self, card: &str) -> bool {
        match self {
            Tarjetas::Todas => true,
            Tarjetas::Cards(cards) => {
                let needle = card.to_lowercase();
                cards.iter().any(|c| c.to_lowercase().contains(&needle))
            }
        }
    }
}

impl From<Vec<String>> for Tarjetas {
    fn from(cards: Vec<String>) -> Self {
        if cards.iter().any(|c| c.trim().eq_ignore_ascii_case(ALL_CARDS)) {
            Tarjetas::Todas
        } else {
            Tarjetas::Cards(cards)
        }
    }
}

impl From<Tarjetas> for Vec<String> {
    fn from(t: Tarjetas) -> Self {
        match t {
            Tarjetas::Todas => vec![ALL_CARDS.to_string()],
            Tarjetas::Cards(cards) => cards,
        }
    }
}

/// One advertised discount or benefit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: u32,
    pub comercio: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub detalle: String,
    #[serde(default)]
    pub tarjetas: Tarjetas,
    #[serde(default)]
    pub categoria: Category,
    #[serde(default = "default_vigencia")]
    pub vigencia: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descuento: Option<u32>,
    #[serde(default)]
    pub dias: Vec<Weekday>,
}

pub const DEFAULT_VIGENCIA: &str = "Vigente";

fn default_vigencia() -> String {
    DEFAULT_VIGENCIA.to_string()
}

impl Promotion {
    /// Description text, falling back to the merchant name.
    pub fn description(&self) -> &str {
        if self.descripcion.trim().is_empty() {
            &self.comercio
        } else {
            &self.descripcion
        }
    }

    /// Discount percentage, 0 when the promotion carries none.
    pub fn discount(&self) -> u32 {
        self.descuento.unwrap_or(0)
    }

    /// Empty or full-week `dias` both mean the promotion applies every day.
    pub fn applies_every_day(&self) -> bool {
        self.dias.is_empty() || self.dias.len() >= Weekday::ALL.len()
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.applies_every_day() || self.dias.contains(&day)
    }
}

/// Lowercase and strip the Spanish accents so "miercoles" finds "Miércoles".
pub(crate) fn fold_accents(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip_through_json() {
        let json = serde_json::to_string(&Category::Libreria).unwrap();
        assert_eq!(json, "\"Librería\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Libreria);
    }

    #[test]
    fn test_unknown_category_is_otros() {
        let c: Category = serde_json::from_str("\"Mascotas\"").unwrap();
        assert_eq!(c, Category::Otros);
        assert_eq!(Category::from_label("tecnologia"), Category::Tecnologia);
    }

    #[test]
    fn test_weekday_parsing_accepts_unaccented_and_abbrev() {
        assert_eq!("miercoles".parse::<Weekday>().unwrap(), Weekday::Miercoles);
        assert_eq!("SÁB".parse::<Weekday>().unwrap(), Weekday::Sabado);
        assert_eq!("Domingo".parse::<Weekday>().unwrap(), Weekday::Domingo);
        assert!("feriado".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_tarjetas_sentinel() {
        let t: Tarjetas = serde_json::from_str(r#"["todas"]"#).unwrap();
        assert!(t.is_all());
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"["todas"]"#);

        let t: Tarjetas = serde_json::from_str(r#"["Visa Crédito", "Mastercard"]"#).unwrap();
        assert!(!t.is_all());
        assert!(t.accepts("visa"));
        assert!(!t.accepts("Cabal"));
    }

    #[test]
    fn test_empty_card_list_stays_empty() {
        let p: Promotion =
            serde_json::from_str(r#"{"id": 1, "comercio": "X", "tarjetas": []}"#).unwrap();
        assert_eq!(p.tarjetas, Tarjetas::Cards(Vec::new()));
        assert!(!p.tarjetas.accepts("Visa"));

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["tarjetas"], serde_json::json!([]));

        let visa = crate::filter::Filter {
            card: Some("Visa".to_string()),
            ..Default::default()
        };
        assert!(!visa.matches(&p));
    }

    #[test]
    fn test_sentinel_ignores_case() {
        let t: Tarjetas = serde_json::from_str(r#"["Todas"]"#).unwrap();
        assert!(t.is_all());
    }

    #[test]
    fn test_unaccented_day_names_load() {
        let p: Promotion = serde_json::from_str(
            r#"{"id": 1, "comercio": "Coto", "dias": ["Miercoles", "SAB"]}"#,
        )
        .unwrap();
        assert_eq!(p.dias, vec![Weekday::Miercoles, Weekday::Sabado]);
        assert_eq!(
            serde_json::to_string(&p.dias).unwrap(),
            r#"["Miércoles","Sábado"]"#
        );
        assert!(serde_json::from_str::<Weekday>("\"Feriado\"").is_err());
    }

    #[test]
    fn test_promotion_defaults() {
        let p: Promotion = serde_json::from_str(r#"{"id": 7, "comercio": "YPF"}"#).unwrap();
        assert_eq!(p.description(), "YPF");
        assert_eq!(p.vigencia, "Vigente");
        assert_eq!(p.categoria, Category::Otros);
        assert!(p.tarjetas.is_all());
        assert_eq!(p.discount(), 0);
        assert!(p.applies_on(Weekday::Martes));
    }

    #[test]
    fn test_day_restriction() {
        let mut p: Promotion = serde_json::from_str(
            r#"{"id": 1, "comercio": "Coto", "dias": ["Miércoles"]}"#,
        )
        .unwrap();
        assert!(p.applies_on(Weekday::Miercoles));
        assert!(!p.applies_on(Weekday::Jueves));

        p.dias = Weekday::ALL.to_vec();
        assert!(p.applies_every_day());
    }
}
