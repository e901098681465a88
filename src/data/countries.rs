/// Dial code entry of the country picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub code: &'static str,
    pub name: &'static str,
    pub dial: &'static str,
    pub flag: &'static str,
}

const fn country(
    code: &'static str,
    name: &'static str,
    dial: &'static str,
    flag: &'static str,
) -> CountryCode {
    CountryCode {
        code,
        name,
        dial,
        flag,
    }
}

pub const COUNTRIES: &[CountryCode] = &[
    country("FR", "France", "+33", "🇫🇷"),
    country("ML", "Mali", "+223", "🇲🇱"),
    country("SN", "Sénégal", "+221", "🇸🇳"),
    country("CI", "Côte d'Ivoire", "+225", "🇨🇮"),
    country("BF", "Burkina Faso", "+226", "🇧🇫"),
    country("GN", "Guinée", "+224", "🇬🇳"),
    country("NE", "Niger", "+227", "🇳🇪"),
    country("MR", "Mauritanie", "+222", "🇲🇷"),
    country("DZ", "Algérie", "+213", "🇩🇿"),
    country("MA", "Maroc", "+212", "🇲🇦"),
    country("TN", "Tunisie", "+216", "🇹🇳"),
    country("CM", "Cameroun", "+237", "🇨🇲"),
    country("GA", "Gabon", "+241", "🇬🇦"),
    country("TG", "Togo", "+228", "🇹🇬"),
    country("BJ", "Bénin", "+229", "🇧🇯"),
    country("BE", "Belgique", "+32", "🇧🇪"),
    country("CH", "Suisse", "+41", "🇨🇭"),
    country("CA", "Canada", "+1", "🇨🇦"),
    country("US", "États-Unis", "+1", "🇺🇸"),
    country("GB", "Royaume-Uni", "+44", "🇬🇧"),
    country("DE", "Allemagne", "+49", "🇩🇪"),
    country("ES", "Espagne", "+34", "🇪🇸"),
    country("IT", "Italie", "+39", "🇮🇹"),
];

pub fn default_country() -> &'static CountryCode {
    &COUNTRIES[0]
}

pub fn find_country(code: &str) -> Option<&'static CountryCode> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Case-insensitive match on name, dial code or ISO code.
pub fn filter_countries(query: &str) -> Vec<&'static CountryCode> {
    let query = query.trim().to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.name.to_lowercase().contains(&query)
                || c.dial.contains(&query)
                || c.code.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn france_is_the_default() {
        assert_eq!(default_country().code, "FR");
        assert_eq!(default_country().dial, "+33");
    }

    #[test]
    fn filters_by_name_dial_or_code() {
        assert_eq!(filter_countries("mali")[0].code, "ML");
        assert_eq!(filter_countries("+223")[0].code, "ML");
        assert!(filter_countries("sn").iter().any(|c| c.code == "SN"));
        assert_eq!(filter_countries("").len(), COUNTRIES.len());
        assert!(filter_countries("atlantis").is_empty());
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(find_country("ml").map(|c| c.name), Some("Mali"));
    }
}
