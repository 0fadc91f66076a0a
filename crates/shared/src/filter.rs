use chrono::NaiveDate;

/// Wire/display format for filter dates, as produced by `<input type="date">`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const PARAM_MIN_MAGNITUDE: &str = "min_magnitud";
pub const PARAM_START_TIME: &str = "start_time";
pub const PARAM_END_TIME: &str = "end_time";

/// Named fallbacks for blank filter controls. The end date defaults to
/// "today", which the caller supplies at resolve time.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDefaults {
    pub min_magnitude: f64,
    pub start_date: NaiveDate,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            min_magnitude: 0.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Raw values of the three filter controls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInput {
    pub min_magnitude: String,
    pub start_date: String,
    pub end_date: String,
}

/// A fully resolved filter, ready to be encoded into a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub min_magnitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FilterInput {
    /// Resolve each control against its default. Blank or unparseable values
    /// fall back; the latter is logged.
    pub fn resolve(&self, defaults: &FilterDefaults, today: NaiveDate) -> Filter {
        Filter {
            min_magnitude: parse_or(
                PARAM_MIN_MAGNITUDE,
                &self.min_magnitude,
                defaults.min_magnitude,
                |s| s.parse::<f64>().ok().filter(|m| m.is_finite()),
            ),
            start_date: parse_or(PARAM_START_TIME, &self.start_date, defaults.start_date, parse_date),
            end_date: parse_or(PARAM_END_TIME, &self.end_date, today, parse_date),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn parse_or<T: std::fmt::Debug + Copy>(
    field: &str,
    raw: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> T {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    match parse(raw) {
        Some(v) => v,
        None => {
            tracing::warn!(field, value = raw, fallback = ?default, "ignoring unparseable filter value");
            default
        }
    }
}

impl Filter {
    /// Query parameters in the order the endpoint documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (PARAM_MIN_MAGNITUDE, self.min_magnitude.to_string()),
            (PARAM_START_TIME, self.start_date.format(DATE_FORMAT).to_string()),
            (PARAM_END_TIME, self.end_date.format(DATE_FORMAT).to_string()),
        ]
    }

    /// `min_magnitud=..&start_time=..&end_time=..`. Values are numbers and
    /// ISO dates, so nothing needs percent-encoding.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 9, 30)
    }

    #[test]
    fn test_all_blank_uses_defaults() {
        let f = FilterInput::default().resolve(&FilterDefaults::default(), today());
        assert_eq!(f.min_magnitude, 0.0);
        assert_eq!(f.start_date, date(2025, 1, 1));
        assert_eq!(f.end_date, today());
    }

    #[test]
    fn test_each_blank_field_falls_back_independently() {
        let defaults = FilterDefaults::default();
        let input = FilterInput {
            min_magnitude: "4.5".to_string(),
            start_date: String::new(),
            end_date: "2025-08-01".to_string(),
        };
        let f = input.resolve(&defaults, today());
        assert_eq!(f.min_magnitude, 4.5);
        assert_eq!(f.start_date, date(2025, 1, 1));
        assert_eq!(f.end_date, date(2025, 8, 1));

        let input = FilterInput {
            min_magnitude: String::new(),
            start_date: "2025-02-10".to_string(),
            end_date: String::new(),
        };
        let f = input.resolve(&defaults, today());
        assert_eq!(f.min_magnitude, 0.0);
        assert_eq!(f.start_date, date(2025, 2, 10));
        assert_eq!(f.end_date, today());
    }

    #[test]
    fn test_whitespace_counts_as_blank() {
        let input = FilterInput {
            min_magnitude: "  ".to_string(),
            start_date: " ".to_string(),
            end_date: "\t".to_string(),
        };
        let f = input.resolve(&FilterDefaults::default(), today());
        assert_eq!(f, FilterInput::default().resolve(&FilterDefaults::default(), today()));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let input = FilterInput {
            min_magnitude: "strong".to_string(),
            start_date: "01/02/2025".to_string(),
            end_date: "yesterday".to_string(),
        };
        let f = input.resolve(&FilterDefaults::default(), today());
        assert_eq!(f.min_magnitude, 0.0);
        assert_eq!(f.start_date, date(2025, 1, 1));
        assert_eq!(f.end_date, today());
    }

    #[test]
    fn test_non_finite_magnitude_falls_back() {
        let input = FilterInput {
            min_magnitude: "NaN".to_string(),
            ..Default::default()
        };
        let f = input.resolve(&FilterDefaults::default(), today());
        assert_eq!(f.min_magnitude, 0.0);
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = FilterDefaults {
            min_magnitude: 4.5,
            start_date: date(2025, 7, 12),
        };
        let f = FilterInput::default().resolve(&defaults, today());
        assert_eq!(f.min_magnitude, 4.5);
        assert_eq!(f.start_date, date(2025, 7, 12));
    }

    #[test]
    fn test_query_string_defaults() {
        let f = FilterInput::default().resolve(&FilterDefaults::default(), today());
        assert_eq!(
            f.query_string(),
            "min_magnitud=0&start_time=2025-01-01&end_time=2025-09-30"
        );
    }

    #[test]
    fn test_query_pairs_fractional_magnitude() {
        let f = Filter {
            min_magnitude: 4.5,
            start_date: date(2025, 3, 1),
            end_date: date(2025, 3, 9),
        };
        let pairs = f.query_pairs();
        assert_eq!(pairs[0], ("min_magnitud", "4.5".to_string()));
        assert_eq!(pairs[1], ("start_time", "2025-03-01".to_string()));
        assert_eq!(pairs[2], ("end_time", "2025-03-09".to_string()));
    }
}
