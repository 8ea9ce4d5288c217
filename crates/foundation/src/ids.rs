use serde::{Deserialize, Serialize};

/// Stable product identity.
///
/// Ids come from the page as plain JSON numbers and are echoed back into
/// `data-*` attributes, so the text form is the bare integer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(n: u64) -> Self {
        ProductId(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parses an id out of a DOM attribute value.
    ///
    /// Accepts surrounding whitespace and integral decimal forms such as `"3.0"`,
    /// which is what a page gets when it stringifies a JS number.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<u64>() {
            return Some(ProductId(n));
        }
        let f = raw.parse::<f64>().ok()?;
        if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
            Some(ProductId(f as u64))
        } else {
            None
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ProductId;

    #[test]
    fn parses_attribute_values() {
        assert_eq!(ProductId::parse("7"), Some(ProductId::new(7)));
        assert_eq!(ProductId::parse(" 12 "), Some(ProductId::new(12)));
        assert_eq!(ProductId::parse("3.0"), Some(ProductId::new(3)));
    }

    #[test]
    fn rejects_non_ids() {
        assert_eq!(ProductId::parse(""), None);
        assert_eq!(ProductId::parse("abc"), None);
        assert_eq!(ProductId::parse("-1"), None);
        assert_eq!(ProductId::parse("1.5"), None);
        assert_eq!(ProductId::parse("NaN"), None);
    }

    #[test]
    fn display_is_bare_integer() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }
}
