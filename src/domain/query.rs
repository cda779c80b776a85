//! Filter and paging types shared by repositories and services.
//!
//! Filters are "example" style: every `None` field is ignored, every `Some`
//! field adds one predicate. Text fields match case-insensitively as a
//! substring (`ILIKE '%value%'`); see [`like_pattern`].

/// Example-matching filter over meetups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetupFilter {
    pub event: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub meetup_date: Option<String>,
    pub address: Option<String>,
}

impl MeetupFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Containment patterns in column order:
    /// `event, description, organizer, meetup_date, address`.
    pub fn patterns(&self) -> [Option<String>; 5] {
        [
            self.event.as_deref().and_then(like_pattern),
            self.description.as_deref().and_then(like_pattern),
            self.organizer.as_deref().and_then(like_pattern),
            self.meetup_date.as_deref().and_then(like_pattern),
            self.address.as_deref().and_then(like_pattern),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.patterns().iter().all(Option::is_none)
    }
}

/// Example-matching filter over registrations.
///
/// `registered` and `meetup_id` match exactly; the text fields match by
/// case-insensitive containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFilter {
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_registration: Option<String>,
    pub registered: Option<bool>,
    pub meetup_id: Option<i32>,
}

impl RegistrationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person_name(mut self, person_name: impl Into<String>) -> Self {
        self.person_name = Some(person_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_registered(mut self, registered: bool) -> Self {
        self.registered = Some(registered);
        self
    }

    pub fn with_meetup(mut self, meetup_id: i32) -> Self {
        self.meetup_id = Some(meetup_id);
        self
    }

    /// Containment patterns in column order:
    /// `person_name, email, date_of_registration`.
    pub fn patterns(&self) -> [Option<String>; 3] {
        [
            self.person_name.as_deref().and_then(like_pattern),
            self.email.as_deref().and_then(like_pattern),
            self.date_of_registration.as_deref().and_then(like_pattern),
        ]
    }
}

/// Builds an `ILIKE` containment pattern for `value`.
///
/// LIKE metacharacters (`\`, `%`, `_`) are escaped so they match literally.
/// An empty value yields `None`: it constrains nothing, same as an absent field.
pub fn like_pattern(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// A request for one page of results. `page` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u32 = 20;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// One page of results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    /// Number of pages needed for `total_elements`, saturating at `u32::MAX`.
    pub fn total_pages(&self) -> u32 {
        if self.size == 0 {
            return 0;
        }
        let total = u64::try_from(self.total_elements).unwrap_or(0);
        u32::try_from(total.div_ceil(u64::from(self.size))).unwrap_or(u32::MAX)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_value() {
        assert_eq!(like_pattern("dados"), Some("%dados%".to_string()));
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off"), Some("%50\\%\\_off%".to_string()));
        assert_eq!(like_pattern("a\\b"), Some("%a\\\\b%".to_string()));
    }

    #[test]
    fn test_like_pattern_empty_is_none() {
        assert_eq!(like_pattern(""), None);
    }

    #[test]
    fn test_empty_meetup_filter_has_no_predicates() {
        let filter = MeetupFilter::new();
        assert!(filter.is_empty());
        assert!(filter.patterns().iter().all(Option::is_none));
    }

    #[test]
    fn test_meetup_filter_single_field() {
        let filter = MeetupFilter::new().with_event("Dados");
        let [event, description, organizer, date, address] = filter.patterns();

        assert_eq!(event, Some("%Dados%".to_string()));
        assert!(description.is_none());
        assert!(organizer.is_none());
        assert!(date.is_none());
        assert!(address.is_none());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_registration_filter_builder() {
        let filter = RegistrationFilter::new()
            .with_email("gmail")
            .with_registered(true)
            .with_meetup(11);

        let [name, email, date] = filter.patterns();
        assert!(name.is_none());
        assert_eq!(email, Some("%gmail%".to_string()));
        assert!(date.is_none());
        assert_eq!(filter.registered, Some(true));
        assert_eq!(filter.meetup_id, Some(11));
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::default().offset(), 0);
        assert_eq!(PageRequest::default().limit(), 20);
        assert_eq!(PageRequest::new(3, 50).offset(), 150);
    }

    #[test]
    fn test_page_total_pages() {
        let page: Page<i32> = Page::new(vec![1, 2], PageRequest::new(0, 2), 5);
        assert_eq!(page.total_pages(), 3);

        let empty: Page<i32> = Page::new(vec![], PageRequest::new(0, 20), 0);
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_page_total_pages_edges() {
        let exact: Page<i32> = Page::new(vec![], PageRequest::new(0, 5), 10);
        assert_eq!(exact.total_pages(), 2);

        let zero_size: Page<i32> = Page::new(vec![], PageRequest::new(0, 0), 10);
        assert_eq!(zero_size.total_pages(), 0);

        let negative: Page<i32> = Page::new(vec![], PageRequest::new(0, 20), -3);
        assert_eq!(negative.total_pages(), 0);

        let huge: Page<i32> = Page::new(vec![], PageRequest::new(0, 1), i64::MAX);
        assert_eq!(huge.total_pages(), u32::MAX);

        let large: Page<i32> = Page::new(vec![], PageRequest::new(0, 1000), 9_007_199_254_740_993);
        assert_eq!(large.total_pages(), u32::MAX);

        let big_exact: Page<i32> = Page::new(vec![], PageRequest::new(0, 1000), 4_000_000_001);
        assert_eq!(big_exact.total_pages(), 4_000_001);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(1, 3), 7).map(|n| n * 10);

        assert_eq!(page.content, vec![10, 20, 30]);
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 3);
        assert_eq!(page.total_elements, 7);
    }
}
