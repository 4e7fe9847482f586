pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;
pub const DEFAULT_OFFSET: usize = 0;

/// A window into a tenant's shipments, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    /// Build a page, rejecting limits above `MAX_LIMIT`.
    pub fn new(limit: usize, offset: usize) -> Result<Self, PageError> {
        if limit > MAX_LIMIT {
            return Err(PageError::LimitTooLarge { limit, max: MAX_LIMIT });
        }

        Ok(Self { limit, offset })
    }

    /// Parse raw `limit`/`offset` query values. Missing or empty values fall back
    /// to the defaults.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, PageError> {
        let limit = match limit.filter(|s| !s.is_empty()) {
            None => DEFAULT_LIMIT,
            Some(raw) => parse_non_negative(raw)
                .map_err(|kind| PageError::InvalidLimit { value: raw.to_string(), kind })?,
        };

        let offset = match offset.filter(|s| !s.is_empty()) {
            None => DEFAULT_OFFSET,
            Some(raw) => parse_non_negative(raw)
                .map_err(|kind| PageError::InvalidOffset { value: raw.to_string(), kind })?,
        };

        Self::new(limit, offset)
    }

    /// The page that follows this one, given how many items this one returned.
    pub fn next(&self, returned: usize) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + returned,
        }
    }
}

fn parse_non_negative(raw: &str) -> Result<usize, NumberKind> {
    let value: i64 = raw.parse().map_err(|_| NumberKind::NotAnInteger)?;
    if value < 0 {
        return Err(NumberKind::Negative);
    }
    usize::try_from(value).map_err(|_| NumberKind::NotAnInteger)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    NotAnInteger,
    Negative,
}

impl std::fmt::Display for NumberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberKind::NotAnInteger => write!(f, "is not an integer"),
            NumberKind::Negative => write!(f, "must be a non-negative integer"),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("limit [{value}] {kind}")]
    InvalidLimit { value: String, kind: NumberKind },

    #[error("limit: {limit} is greater than max: {max}")]
    LimitTooLarge { limit: usize, max: usize },

    #[error("offset [{value}] {kind}")]
    InvalidOffset { value: String, kind: NumberKind },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::parse(None, None).unwrap();
        assert_eq!(page, Page { limit: 10, offset: 0 });

        let page = Page::parse(Some(""), Some("")).unwrap();
        assert_eq!(page, Page::default());
    }

    #[test]
    fn test_explicit_values() {
        let page = Page::parse(Some("0"), Some("25")).unwrap();
        assert_eq!(page, Page { limit: 0, offset: 25 });

        let page = Page::parse(Some("100"), None).unwrap();
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_limit_cap() {
        let err = Page::parse(Some("101"), None).unwrap_err();
        assert_eq!(err, PageError::LimitTooLarge { limit: 101, max: 100 });
    }

    #[test]
    fn test_rejects_negative_and_garbage() {
        let err = Page::parse(Some("-1"), None).unwrap_err();
        assert!(matches!(err, PageError::InvalidLimit { kind: NumberKind::Negative, .. }));

        let err = Page::parse(None, Some("ten")).unwrap_err();
        assert!(matches!(err, PageError::InvalidOffset { kind: NumberKind::NotAnInteger, .. }));
        assert_eq!(err.to_string(), "offset [ten] is not an integer");
    }

    #[test]
    fn test_rejects_surrounding_whitespace() {
        let err = Page::parse(Some(" 5"), None).unwrap_err();
        assert_eq!(
            err,
            PageError::InvalidLimit { value: " 5".to_string(), kind: NumberKind::NotAnInteger }
        );

        let err = Page::parse(None, Some("5 ")).unwrap_err();
        assert!(matches!(err, PageError::InvalidOffset { kind: NumberKind::NotAnInteger, .. }));
    }

    #[test]
    fn test_next_page() {
        let page = Page { limit: 10, offset: 20 };
        assert_eq!(page.next(7), Page { limit: 10, offset: 27 });
    }
}
